//! Keyword → weight configuration driving title scoring.

use serde::{Deserialize, Serialize};

/// Weight tier of a lexicon keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordTier {
    /// Useful background signal.
    Context,
    /// Security topics and major tooling.
    Important,
    /// Threats and emergencies.
    Critical,
}

impl KeywordTier {
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            KeywordTier::Context => 1,
            KeywordTier::Important => 2,
            KeywordTier::Critical => 3,
        }
    }

    /// Map a raw integer weight back to its tier. Only 1, 2 and 3 are valid.
    #[must_use]
    pub fn from_weight(weight: u32) -> Option<Self> {
        match weight {
            1 => Some(KeywordTier::Context),
            2 => Some(KeywordTier::Important),
            3 => Some(KeywordTier::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for KeywordTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordTier::Context => write!(f, "context"),
            KeywordTier::Important => write!(f, "important"),
            KeywordTier::Critical => write!(f, "critical"),
        }
    }
}

/// Ordered mapping from lowercase keyword to tier.
///
/// Keywords are normalized (trimmed, lowercased) on insertion. Inserting an
/// existing keyword replaces its tier in place. Blank keywords are ignored:
/// an empty needle would match every title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordLexicon {
    entries: Vec<(String, KeywordTier)>,
}

impl KeywordLexicon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a keyword. Returns the previous tier, if any.
    pub fn insert(&mut self, keyword: &str, tier: KeywordTier) -> Option<KeywordTier> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return None;
        }
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            return Some(std::mem::replace(&mut entry.1, tier));
        }
        self.entries.push((keyword, tier));
        None
    }

    /// Tier of `keyword`, matched case-insensitively.
    #[must_use]
    pub fn tier_of(&self, keyword: &str) -> Option<KeywordTier> {
        let keyword = keyword.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, tier)| *tier)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, KeywordTier)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), *t))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, KeywordTier)> for KeywordLexicon {
    fn from_iter<I: IntoIterator<Item = (S, KeywordTier)>>(iter: I) -> Self {
        let mut lexicon = Self::new();
        for (keyword, tier) in iter {
            lexicon.insert(keyword.as_ref(), tier);
        }
        lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_weights_are_one_two_three() {
        assert_eq!(KeywordTier::Context.weight(), 1);
        assert_eq!(KeywordTier::Important.weight(), 2);
        assert_eq!(KeywordTier::Critical.weight(), 3);
    }

    #[test]
    fn from_weight_rejects_out_of_range() {
        assert_eq!(KeywordTier::from_weight(0), None);
        assert_eq!(KeywordTier::from_weight(4), None);
        assert_eq!(KeywordTier::from_weight(3), Some(KeywordTier::Critical));
    }

    #[test]
    fn insert_normalizes_keyword() {
        let mut lexicon = KeywordLexicon::new();
        lexicon.insert("  RansomWare ", KeywordTier::Critical);
        assert_eq!(lexicon.iter().next(), Some(("ransomware", KeywordTier::Critical)));
    }

    #[test]
    fn insert_replaces_existing_keyword() {
        let mut lexicon = KeywordLexicon::new();
        lexicon.insert("linux", KeywordTier::Context);
        let previous = lexicon.insert("LINUX", KeywordTier::Important);
        assert_eq!(previous, Some(KeywordTier::Context));
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.tier_of("linux"), Some(KeywordTier::Important));
    }

    #[test]
    fn insert_ignores_blank_keyword() {
        let mut lexicon = KeywordLexicon::new();
        lexicon.insert("   ", KeywordTier::Critical);
        assert!(lexicon.is_empty());
    }

    #[test]
    fn collects_from_pairs_in_order() {
        let lexicon: KeywordLexicon = [
            ("cve", KeywordTier::Critical),
            ("docker", KeywordTier::Important),
            ("rust", KeywordTier::Context),
        ]
        .into_iter()
        .collect();
        let keywords: Vec<&str> = lexicon.iter().map(|(k, _)| k).collect();
        assert_eq!(keywords, vec!["cve", "docker", "rust"]);
    }
}
