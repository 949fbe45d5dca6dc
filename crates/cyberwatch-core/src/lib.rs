//! Shared domain types and configuration loading for Cyber-Watch.

pub mod app_config;
pub mod articles;
pub mod config;
pub mod feeds;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use articles::{clip_field, today, utc_day, Article, MAX_FIELD_CHARS};
pub use config::{load_app_config, load_app_config_from_env, load_offline_app_config};
pub use feeds::{load_feeds, FeedConfig, FeedsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    FileParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
