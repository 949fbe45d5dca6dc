//! Tokenization and stopword utilities shared by scoring and trend analysis.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Lowercase form used for every case-insensitive comparison in this crate.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Split a title into lowercase word tokens.
///
/// A word is a maximal run of Unicode alphanumeric or underscore characters;
/// everything else (spaces, punctuation, symbols) separates tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = normalize(text);
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Set of lowercase tokens excluded from trend analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|w| normalize(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }
}
