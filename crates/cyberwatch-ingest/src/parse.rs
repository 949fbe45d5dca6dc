use chrono::NaiveDate;
use cyberwatch_core::{clip_field, utc_day, Article, MAX_FIELD_CHARS};
use feed_rs::model::Link;

use crate::error::IngestError;

/// Parse an RSS 0.9/1.0/2.0, Atom or JSON Feed document into articles.
///
/// Only the first `max_items` entries are considered. Entries without a link
/// are dropped since the link is the deduplication key. Titles and links are
/// clipped to the storage column width; blank titles become `None`. The
/// publication date is the UTC day of the entry's published timestamp, else
/// of its updated timestamp, else `today`.
///
/// # Errors
///
/// Returns [`IngestError::Parse`] if the document is not a recognizable feed.
pub fn parse_feed(
    bytes: &[u8],
    source: &str,
    max_items: usize,
    today: NaiveDate,
) -> Result<Vec<Article>, IngestError> {
    let feed = feed_rs::parser::parse(bytes).map_err(|e| IngestError::Parse {
        feed: source.to_string(),
        source: e,
    })?;

    let mut dropped = 0usize;
    let articles: Vec<Article> = feed
        .entries
        .into_iter()
        .take(max_items)
        .filter_map(|entry| {
            let Some(link) = entry_link(&entry.links) else {
                dropped += 1;
                return None;
            };

            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .filter(|t| !t.is_empty())
                .map(|t| clip_field(&t, MAX_FIELD_CHARS));

            let published = entry
                .published
                .or(entry.updated)
                .map_or(today, utc_day);

            Some(Article {
                source: source.to_string(),
                title,
                link: clip_field(link, MAX_FIELD_CHARS),
                published,
            })
        })
        .collect();

    if dropped > 0 {
        tracing::debug!(source, dropped, "skipped feed entries without a link");
    }

    Ok(articles)
}

/// The entry's page link: the first `alternate` (or untyped) link, else the
/// first non-empty link of any kind.
fn entry_link(links: &[Link]) -> Option<&str> {
    let mut usable = links.iter().filter(|l| !l.href.trim().is_empty());
    let fallback = usable.clone().next();
    usable
        .find(|l| {
            l.rel
                .as_deref()
                .is_none_or(|rel| rel.eq_ignore_ascii_case("alternate"))
        })
        .or(fallback)
        .map(|l| l.href.trim())
}
