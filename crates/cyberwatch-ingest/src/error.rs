use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to parse feed '{feed}': {source}")]
    Parse {
        feed: String,
        #[source]
        source: feed_rs::parser::ParseFeedError,
    },

    #[error(transparent)]
    Config(#[from] cyberwatch_core::ConfigError),
}
