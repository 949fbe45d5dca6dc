use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub feeds_path: PathBuf,
    pub relevance_path: PathBuf,
    pub webhook_url: Option<String>,
    pub webhook_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub fetch_user_agent: String,
    pub fetch_max_items: usize,
    pub fetch_max_concurrent_feeds: usize,
    pub fetch_max_retries: u32,
    pub fetch_retry_backoff_base_secs: u64,
    /// Cron expression for server-driven scraping. `None` disables the job.
    pub scrape_schedule: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("feeds_path", &self.feeds_path)
            .field("relevance_path", &self.relevance_path)
            .field("database_url", &"[redacted]")
            .field(
                "webhook_url",
                &self.webhook_url.as_ref().map(|_| "[redacted]"),
            )
            .field("webhook_timeout_secs", &self.webhook_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("fetch_user_agent", &self.fetch_user_agent)
            .field("fetch_max_items", &self.fetch_max_items)
            .field(
                "fetch_max_concurrent_feeds",
                &self.fetch_max_concurrent_feeds,
            )
            .field("fetch_max_retries", &self.fetch_max_retries)
            .field(
                "fetch_retry_backoff_base_secs",
                &self.fetch_retry_backoff_base_secs,
            )
            .field("scrape_schedule", &self.scrape_schedule)
            .finish()
    }
}
