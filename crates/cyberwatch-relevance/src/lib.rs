//! Relevance scoring and ranking engine for Cyber-Watch.
//!
//! Maps article titles to integer priority scores using a tiered keyword
//! lexicon, orders scored articles by relevance then recency, extracts
//! trending tokens from a time window of titles, and decides which scores
//! warrant an alert. Every operation here is pure and synchronous: the
//! lexicon and stopword set are loaded once and only ever read.

pub mod aggregate;
pub mod alert;
pub mod config;
pub mod export;
pub mod lexicon;
pub mod ranker;
pub mod scorer;
pub mod text;
pub mod trends;

pub use aggregate::{source_volume, ArticleFilter, FeedSummary, SourceVolume};
pub use alert::{should_alert, AlertGate};
pub use config::{
    load_relevance_config, parse_relevance_config, AlertSettings, RelevanceConfig, TrendSettings,
};
pub use export::scored_articles_csv;
pub use lexicon::{KeywordLexicon, KeywordTier};
pub use ranker::{RelevanceRanker, SearchHit, SearchRanker, SOURCE_MATCH_BONUS, TITLE_MATCH_BONUS};
pub use scorer::{ScoredArticle, TitleScorer};
pub use text::{tokenize, StopwordSet};
pub use trends::{window_start, KeywordCount, TrendAnalyzer, TrendWindow, MAX_WINDOW_DAYS};
