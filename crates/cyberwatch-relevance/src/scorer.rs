//! Lexicon-based title scorer.

use cyberwatch_core::Article;
use serde::Serialize;

use crate::lexicon::KeywordLexicon;
use crate::text::normalize;

/// An article together with its relevance score.
///
/// The score is derived from the title and the current lexicon on demand;
/// it is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    pub score: u32,
}

/// Scores titles against a keyword lexicon.
///
/// Every lexicon keyword found anywhere in the lowercased title, as a plain
/// substring, adds its tier weight once. Overlapping matches all count
/// (`"cybersecurity"` hits both `cyber` and `security`); repeating a keyword
/// does not.
#[derive(Debug, Clone, Copy)]
pub struct TitleScorer<'a> {
    lexicon: &'a KeywordLexicon,
}

impl<'a> TitleScorer<'a> {
    #[must_use]
    pub fn new(lexicon: &'a KeywordLexicon) -> Self {
        Self { lexicon }
    }

    /// Score an optional title. A missing title scores `0`.
    #[must_use]
    pub fn score(&self, title: Option<&str>) -> u32 {
        title.map_or(0, |t| self.score_title(t))
    }

    /// Score a title string. Empty or unmatched titles score `0`.
    #[must_use]
    pub fn score_title(&self, title: &str) -> u32 {
        if title.is_empty() {
            return 0;
        }
        let lowered = normalize(title);
        self.lexicon
            .iter()
            .filter(|(keyword, _)| lowered.contains(*keyword))
            .fold(0_u32, |acc, (_, tier)| acc.saturating_add(tier.weight()))
    }

    #[must_use]
    pub fn score_article(&self, article: Article) -> ScoredArticle {
        let score = self.score(article.title.as_deref());
        ScoredArticle { article, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::KeywordTier;

    fn lexicon(pairs: &[(&str, KeywordTier)]) -> KeywordLexicon {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_title_scores_zero() {
        let lex = lexicon(&[("linux", KeywordTier::Context)]);
        assert_eq!(TitleScorer::new(&lex).score_title(""), 0);
    }

    #[test]
    fn missing_title_scores_zero() {
        let lex = lexicon(&[("linux", KeywordTier::Context)]);
        assert_eq!(TitleScorer::new(&lex).score(None), 0);
    }

    #[test]
    fn unknown_text_scores_zero() {
        let lex = lexicon(&[("ransomware", KeywordTier::Critical)]);
        assert_eq!(TitleScorer::new(&lex).score_title("Weather report"), 0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let lex = lexicon(&[("ransomware", KeywordTier::Critical)]);
        assert_eq!(TitleScorer::new(&lex).score_title("RANSOMWARE wave"), 3);
    }

    #[test]
    fn matching_is_substring_not_whole_word() {
        let lex = lexicon(&[("cyber", KeywordTier::Important)]);
        assert_eq!(
            TitleScorer::new(&lex).score_title("Cybersecurity budget"),
            2
        );
    }

    #[test]
    fn overlapping_matches_each_count() {
        let lex = lexicon(&[
            ("cyber", KeywordTier::Important),
            ("security", KeywordTier::Important),
        ]);
        assert_eq!(TitleScorer::new(&lex).score_title("cybersecurity"), 4);
    }

    #[test]
    fn synonyms_both_contribute() {
        let lex = lexicon(&[
            ("0-day", KeywordTier::Critical),
            ("zero-day", KeywordTier::Critical),
        ]);
        assert_eq!(
            TitleScorer::new(&lex).score_title("Zero-day (0-day) in Chrome"),
            6
        );
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let lex = lexicon(&[("linux", KeywordTier::Context)]);
        let scorer = TitleScorer::new(&lex);
        assert_eq!(scorer.score_title("Linux"), scorer.score_title("Linux, Linux, Linux"));
    }

    #[test]
    fn empty_lexicon_always_scores_zero() {
        let lex = KeywordLexicon::new();
        assert_eq!(TitleScorer::new(&lex).score_title("Critical ransomware"), 0);
    }

    #[test]
    fn score_article_keeps_article_intact() {
        let lex = lexicon(&[("cve", KeywordTier::Critical)]);
        let article = Article {
            source: "[CYBER] ANSSI (CERT-FR)".to_string(),
            title: Some("CVE-2026-0001 dans OpenSSH".to_string()),
            link: "https://www.cert.ssi.gouv.fr/avis/1".to_string(),
            published: chrono::NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(),
        };
        let scored = TitleScorer::new(&lex).score_article(article.clone());
        assert_eq!(scored.score, 3);
        assert_eq!(scored.article, article);
    }
}
