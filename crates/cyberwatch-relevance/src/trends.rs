//! Keyword frequency over a window of titles.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use cyberwatch_core::Article;
use serde::Serialize;

use crate::aggregate::{source_volume, SourceVolume};
use crate::text::{tokenize, StopwordSet};

/// Longest window a caller may request, in days.
pub const MAX_WINDOW_DAYS: u32 = 365;

/// One trending token and how often it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub token: String,
    pub count: usize,
}

/// Counts non-stopword tokens across titles.
///
/// Does not consult the scoring lexicon.
#[derive(Debug, Clone, Copy)]
pub struct TrendAnalyzer<'a> {
    stopwords: &'a StopwordSet,
    min_token_len: usize,
}

impl<'a> TrendAnalyzer<'a> {
    /// `min_token_len` is in characters; shorter tokens are discarded.
    #[must_use]
    pub fn new(stopwords: &'a StopwordSet, min_token_len: usize) -> Self {
        Self {
            stopwords,
            min_token_len,
        }
    }

    fn keeps(&self, token: &str) -> bool {
        token.chars().count() >= self.min_token_len && !self.stopwords.contains(token)
    }

    /// The `n` most frequent tokens, most frequent first.
    ///
    /// Equal counts keep the order in which tokens were first seen. Missing
    /// titles contribute nothing.
    #[must_use]
    pub fn top_keywords<'t, I>(&self, titles: I, n: usize) -> Vec<KeywordCount>
    where
        I: IntoIterator<Item = Option<&'t str>>,
    {
        let mut counts: Vec<KeywordCount> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for title in titles.into_iter().flatten() {
            for token in tokenize(title) {
                if !self.keeps(&token) {
                    continue;
                }
                if let Some(&i) = index.get(&token) {
                    counts[i].count += 1;
                } else {
                    index.insert(token.clone(), counts.len());
                    counts.push(KeywordCount { token, count: 1 });
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(n);
        counts
    }
}

/// Articles published within an inclusive date range.
///
/// Keywords and source volume are both computed over the same set, so a
/// trend view never mixes in articles outside `start..=end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub articles: Vec<Article>,
}

impl TrendWindow {
    /// Window covering the `days` days ending on `end` (inclusive).
    ///
    /// `days` is clamped to `1..=MAX_WINDOW_DAYS`. Articles outside the
    /// range are ignored.
    #[must_use]
    pub fn ending<'a, I>(end: NaiveDate, days: u32, articles: I) -> Self
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let start = window_start(end, days);
        let articles = articles
            .into_iter()
            .filter(|a| (start..=end).contains(&a.published))
            .cloned()
            .collect();
        Self {
            start,
            end,
            articles,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    #[must_use]
    pub fn top_keywords(&self, analyzer: &TrendAnalyzer<'_>, n: usize) -> Vec<KeywordCount> {
        analyzer.top_keywords(self.articles.iter().map(|a| a.title.as_deref()), n)
    }

    /// Busiest sources inside the window.
    #[must_use]
    pub fn source_volume(&self, top: usize) -> Vec<SourceVolume> {
        source_volume(&self.articles, top)
    }
}

/// First day of a `days`-long window ending on `end`, inclusive.
#[must_use]
pub fn window_start(end: NaiveDate, days: u32) -> NaiveDate {
    let days = days.clamp(1, MAX_WINDOW_DAYS);
    end.checked_sub_days(Days::new(u64::from(days - 1)))
        .unwrap_or(NaiveDate::MIN)
}
