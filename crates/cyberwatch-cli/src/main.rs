use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod feed;
mod scrape;
mod search;
mod trends;

/// Shortest accepted search term, in characters.
const MIN_SEARCH_TERM_CHARS: usize = 2;

#[derive(Debug, Parser)]
#[command(name = "cyberwatch")]
#[command(about = "Cyber-Watch news relevance tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Fetch all feeds, store new articles and send alerts
    Scrape {
        /// Print fetched articles with their scores; no database is needed
        #[arg(long)]
        dry_run: bool,
        /// 1-based positions (as printed by --dry-run) to leave out, e.g. 1,3
        #[arg(long, value_delimiter = ',')]
        skip: Vec<usize>,
    },
    /// Search stored articles by title or source
    Search {
        /// Text to look for (at least 2 characters)
        #[arg(value_parser = parse_search_term)]
        term: String,
        /// Maximum number of results to print
        #[arg(long, default_value_t = 20, value_parser = parse_positive)]
        limit: usize,
    },
    /// Show the most active sources and trending keywords
    Trends {
        /// Window length in days (defaults to the configured window)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=365))]
        days: Option<u32>,
        /// Number of keywords to show (defaults to the configured value)
        #[arg(long, value_parser = parse_positive)]
        top: Option<usize>,
    },
    /// Ranked article feed with headline numbers
    Feed {
        /// How many days back to look
        #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(1..=365))]
        days: u32,
        /// Only keep titles containing this text
        #[arg(long)]
        query: Option<String>,
        /// Only keep these sources (repeatable)
        #[arg(long = "source")]
        sources: Vec<String>,
        /// Maximum number of articles to print
        #[arg(long, default_value_t = 50, value_parser = parse_positive)]
        limit: usize,
        /// Also write the full ranked list to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

fn parse_search_term(raw: &str) -> Result<String, String> {
    let term = raw.trim();
    if term.chars().count() < MIN_SEARCH_TERM_CHARS {
        return Err(format!(
            "search term must be at least {MIN_SEARCH_TERM_CHARS} characters"
        ));
    }
    Ok(term.to_string())
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Whether `command` opens a database connection and so needs `DATABASE_URL`.
fn needs_database(command: &Commands) -> bool {
    !matches!(command, Commands::Scrape { dry_run: true, .. })
}

/// Shorten `text` to `max_chars`, marking the cut with `...`.
pub(crate) fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

async fn connect(config: &cyberwatch_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = cyberwatch_db::PoolConfig::from_app_config(config);
    Ok(cyberwatch_db::connect_pool(&config.database_url, pool_config).await?)
}

fn load_relevance(
    config: &cyberwatch_core::AppConfig,
) -> anyhow::Result<cyberwatch_relevance::RelevanceConfig> {
    Ok(cyberwatch_relevance::load_relevance_config(
        &config.relevance_path,
    )?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = if needs_database(&command) {
        cyberwatch_core::load_app_config()?
    } else {
        cyberwatch_core::load_offline_app_config()?
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    cyberwatch_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    tracing::info!("running migrations");
                    let applied = cyberwatch_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Commands::Scrape { dry_run, skip } => {
            let relevance = load_relevance(&config)?;
            if dry_run {
                scrape::run_scrape_dry_run(&config, &relevance, &skip).await?;
            } else {
                let pool = connect(&config).await?;
                scrape::run_scrape(&pool, &config, &relevance, &skip).await?;
            }
        }
        Commands::Search { term, limit } => {
            let pool = connect(&config).await?;
            search::run_search(&pool, &term, limit).await?;
        }
        Commands::Trends { days, top } => {
            let relevance = load_relevance(&config)?;
            let pool = connect(&config).await?;
            trends::run_trends(&pool, &relevance, days, top).await?;
        }
        Commands::Feed {
            days,
            query,
            sources,
            limit,
            export,
        } => {
            let relevance = load_relevance(&config)?;
            let pool = connect(&config).await?;
            let options = feed::FeedOptions {
                days,
                query,
                sources,
                limit,
                export,
            };
            feed::run_feed(&pool, &relevance, &options).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
