use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Column width of `articles.title` and `articles.link`, in characters.
pub const MAX_FIELD_CHARS: usize = 255;

/// A news item as supplied by a feed or read back from storage.
///
/// `link` is the natural deduplication key. `title` is `None` when the feed
/// entry had no usable title; such articles always score zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: Option<String>,
    pub link: String,
    pub published: NaiveDate,
}

impl Article {
    /// Title text for display, with a placeholder for untitled items.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}

/// Calendar day an instant falls on.
///
/// Every article date and every "today" is a UTC day, so a story stamped
/// late in the evening west of Greenwich still lands in the current window.
#[must_use]
pub fn utc_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// The current UTC calendar day.
#[must_use]
pub fn today() -> NaiveDate {
    utc_day(Utc::now())
}

/// Truncate `value` to at most `max_chars` characters, on a char boundary.
#[must_use]
pub fn clip_field(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => value[..byte_idx].to_string(),
        None => value.to_string(),
    }
}
