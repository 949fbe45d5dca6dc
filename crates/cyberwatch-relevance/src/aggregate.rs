//! Dashboard-style aggregations over a set of articles.

use std::collections::HashMap;

use chrono::NaiveDate;
use cyberwatch_core::Article;
use serde::Serialize;

use crate::scorer::ScoredArticle;
use crate::text::normalize;

/// User-supplied narrowing applied before ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Keep articles published on or after this date.
    pub since: Option<NaiveDate>,
    /// Keep articles from these sources. Empty keeps every source.
    pub sources: Vec<String>,
    /// Case-insensitive substring the title must contain.
    pub title_query: Option<String>,
}

impl ArticleFilter {
    #[must_use]
    pub fn matches(&self, article: &Article) -> bool {
        if self.since.is_some_and(|since| article.published < since) {
            return false;
        }
        if !self.sources.is_empty() && !self.sources.iter().any(|s| *s == article.source) {
            return false;
        }
        match self
            .title_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
        {
            None => true,
            Some(query) => article
                .title
                .as_deref()
                .is_some_and(|title| normalize(title).contains(&normalize(query))),
        }
    }

    /// Keep only matching articles, in input order.
    pub fn apply<I>(&self, articles: I) -> Vec<Article>
    where
        I: IntoIterator<Item = Article>,
    {
        articles.into_iter().filter(|a| self.matches(a)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceVolume {
    pub source: String,
    pub count: usize,
}

/// Article counts per source, largest first, ties by source name.
///
/// At most `top` entries are returned.
#[must_use]
pub fn source_volume<'a, I>(articles: I, top: usize) -> Vec<SourceVolume>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for article in articles {
        *counts.entry(article.source.as_str()).or_default() += 1;
    }

    let mut volumes: Vec<SourceVolume> = counts
        .into_iter()
        .map(|(source, count)| SourceVolume {
            source: source.to_string(),
            count,
        })
        .collect();
    volumes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    volumes.truncate(top);
    volumes
}

/// Headline numbers for a ranked article set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSummary {
    pub total: usize,
    pub top_source: Option<String>,
    pub latest: Option<NaiveDate>,
    /// Articles with a non-zero score.
    pub relevant: usize,
}

impl FeedSummary {
    #[must_use]
    pub fn from_ranked(ranked: &[ScoredArticle]) -> Self {
        let top_source = source_volume(ranked.iter().map(|s| &s.article), 1)
            .into_iter()
            .next()
            .map(|v| v.source);
        Self {
            total: ranked.len(),
            top_source,
            latest: ranked.iter().map(|s| s.article.published).max(),
            relevant: ranked.iter().filter(|s| s.score > 0).count(),
        }
    }
}
