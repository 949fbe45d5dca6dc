//! Feed ingestion for Cyber-Watch: fetch and parse RSS/Atom feeds, store new
//! articles, and notify a webhook about the relevant ones.

pub mod client;
pub mod error;
pub mod notify;
pub mod parse;
pub mod pipeline;
mod retry;

pub use client::FeedClient;
pub use error::IngestError;
pub use notify::{AlertPayload, WebhookNotifier};
pub use parse::parse_feed;
pub use pipeline::{
    collect_feeds, exclude_by_position, persist_and_alert, run_scrape, select_alerts,
    ScrapeSummary,
};
