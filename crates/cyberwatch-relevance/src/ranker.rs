//! Total orderings over scored articles.
//!
//! Both rankers sort by score descending, then publication date descending.
//! Sorting is stable, so articles with equal score and date keep their input
//! order; the result is fully determined by the input sequence.

use std::cmp::Ordering;

use chrono::NaiveDate;
use cyberwatch_core::Article;
use serde::Serialize;

use crate::lexicon::KeywordLexicon;
use crate::scorer::{ScoredArticle, TitleScorer};
use crate::text::normalize;

/// Bonus when the search term appears in the title.
pub const TITLE_MATCH_BONUS: u32 = 10;
/// Bonus when the search term appears in the source label.
pub const SOURCE_MATCH_BONUS: u32 = 5;

fn by_score_then_recency(
    a_score: u32,
    a_date: NaiveDate,
    b_score: u32,
    b_date: NaiveDate,
) -> Ordering {
    b_score.cmp(&a_score).then_with(|| b_date.cmp(&a_date))
}

/// Orders articles by lexicon score, breaking ties by recency.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceRanker<'a> {
    scorer: TitleScorer<'a>,
}

impl<'a> RelevanceRanker<'a> {
    #[must_use]
    pub fn new(lexicon: &'a KeywordLexicon) -> Self {
        Self {
            scorer: TitleScorer::new(lexicon),
        }
    }

    /// Score every article and return them most relevant first.
    #[must_use]
    pub fn rank<I>(&self, articles: I) -> Vec<ScoredArticle>
    where
        I: IntoIterator<Item = Article>,
    {
        let mut scored: Vec<ScoredArticle> = articles
            .into_iter()
            .map(|a| self.scorer.score_article(a))
            .collect();
        scored.sort_by(|a, b| {
            by_score_then_recency(a.score, a.article.published, b.score, b.article.published)
        });
        scored
    }
}

/// An article matched by a free-text search, with its match score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub article: Article,
    pub score: u32,
}

/// Ranks articles against a free-text search term.
///
/// The term is matched case-insensitively as a substring of the title
/// ([`TITLE_MATCH_BONUS`]) and of the source label ([`SOURCE_MATCH_BONUS`]).
/// Articles matching neither are dropped, so the ranker doubles as a filter.
#[derive(Debug, Clone)]
pub struct SearchRanker {
    term: String,
}

impl SearchRanker {
    /// Build a ranker for `term`. Surrounding whitespace is ignored; an empty
    /// term matches everything.
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self {
            term: normalize(term.trim()),
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Match score of one article: title and source bonuses summed.
    #[must_use]
    pub fn match_score(&self, article: &Article) -> u32 {
        let title_bonus = article
            .title
            .as_deref()
            .filter(|t| normalize(t).contains(&self.term))
            .map_or(0, |_| TITLE_MATCH_BONUS);
        let source_bonus = if normalize(&article.source).contains(&self.term) {
            SOURCE_MATCH_BONUS
        } else {
            0
        };
        title_bonus + source_bonus
    }

    /// Keep matching articles and return them best match first.
    #[must_use]
    pub fn rank<I>(&self, articles: I) -> Vec<SearchHit>
    where
        I: IntoIterator<Item = Article>,
    {
        let mut hits: Vec<SearchHit> = articles
            .into_iter()
            .filter_map(|article| {
                let score = self.match_score(&article);
                (score > 0).then_some(SearchHit { article, score })
            })
            .collect();
        hits.sort_by(|a, b| {
            by_score_then_recency(a.score, a.article.published, b.score, b.article.published)
        });
        hits
    }
}
