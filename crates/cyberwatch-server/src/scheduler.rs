//! Background job scheduler.
//!
//! Registers the recurring scrape job when `CYBERWATCH_SCRAPE_SCHEDULE` is
//! set; otherwise the scheduler runs with no jobs.

use std::sync::Arc;

use cyberwatch_core::AppConfig;
use cyberwatch_relevance::RelevanceConfig;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised, the
/// cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    config: Arc<AppConfig>,
    relevance: Arc<RelevanceConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    if let Some(schedule) = config.scrape_schedule.clone() {
        register_scrape_job(&scheduler, &schedule, pool, config, relevance).await?;
        tracing::info!(schedule = %schedule, "scheduler: scrape job registered");
    } else {
        tracing::info!("scheduler: CYBERWATCH_SCRAPE_SCHEDULE not set; no scrape job");
    }

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_scrape_job(
    scheduler: &JobScheduler,
    schedule: &str,
    pool: PgPool,
    config: Arc<AppConfig>,
    relevance: Arc<RelevanceConfig>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let pool = pool.clone();
        let config = Arc::clone(&config);
        let relevance = Arc::clone(&relevance);

        Box::pin(async move {
            tracing::info!("scheduler: starting scrape run");
            let today = cyberwatch_core::today();
            match cyberwatch_ingest::run_scrape(&pool, &config, &relevance, &[], today).await {
                Ok(summary) => tracing::info!(
                    inserted = summary.inserted,
                    alerts = summary.alerts,
                    "scheduler: scrape run complete"
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: scrape run failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
