use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0.0.0 cyberwatch/0.1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load configuration for commands that never open a database connection.
///
/// Same as [`load_app_config`] except that `DATABASE_URL` may be unset, in
/// which case `database_url` is empty.
///
/// # Errors
///
/// Returns `ConfigError` if any other value is invalid.
pub fn load_offline_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_offline_app_config(|key| std::env::var(key))
}

fn build_offline_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    build_app_config(|key| match lookup(key) {
        Err(_) if key == "DATABASE_URL" => Ok(String::new()),
        found => found,
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Unset and blank values are treated the same way.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("CYBERWATCH_ENV", "development"))?;

    let bind_addr = parse_addr("CYBERWATCH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CYBERWATCH_LOG_LEVEL", "info");
    let feeds_path = PathBuf::from(or_default("CYBERWATCH_FEEDS_PATH", "./config/feeds.yaml"));
    let relevance_path = PathBuf::from(or_default(
        "CYBERWATCH_RELEVANCE_PATH",
        "./config/relevance.yaml",
    ));

    let webhook_url = optional("CYBERWATCH_WEBHOOK_URL");
    if let Some(url) = &webhook_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "CYBERWATCH_WEBHOOK_URL",
                "must start with http:// or https://".to_string(),
            ));
        }
    }
    let webhook_timeout_secs = parse_u64("CYBERWATCH_WEBHOOK_TIMEOUT_SECS", "2")?;

    let db_max_connections = parse_u32("CYBERWATCH_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("CYBERWATCH_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("CYBERWATCH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let fetch_timeout_secs = parse_u64("CYBERWATCH_FETCH_TIMEOUT_SECS", "10")?;
    let fetch_user_agent = or_default("CYBERWATCH_FETCH_USER_AGENT", DEFAULT_USER_AGENT);
    let fetch_max_items = parse_positive_usize("CYBERWATCH_FETCH_MAX_ITEMS", "100")?;
    let fetch_max_concurrent_feeds =
        parse_positive_usize("CYBERWATCH_FETCH_MAX_CONCURRENT_FEEDS", "4")?;
    let fetch_max_retries = parse_u32("CYBERWATCH_FETCH_MAX_RETRIES", "2")?;
    let fetch_retry_backoff_base_secs = parse_u64("CYBERWATCH_FETCH_RETRY_BACKOFF_BASE_SECS", "1")?;

    let scrape_schedule = optional("CYBERWATCH_SCRAPE_SCHEDULE");

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        feeds_path,
        relevance_path,
        webhook_url,
        webhook_timeout_secs,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        fetch_timeout_secs,
        fetch_user_agent,
        fetch_max_items,
        fetch_max_concurrent_feeds,
        fetch_max_retries,
        fetch_retry_backoff_base_secs,
        scrape_schedule,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CYBERWATCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
