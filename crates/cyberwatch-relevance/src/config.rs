//! Loading of the relevance configuration file.

use std::collections::HashMap;
use std::path::Path;

use cyberwatch_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::alert::AlertGate;
use crate::lexicon::{KeywordLexicon, KeywordTier};
use crate::ranker::RelevanceRanker;
use crate::scorer::TitleScorer;
use crate::text::StopwordSet;
use crate::trends::{TrendAnalyzer, MAX_WINDOW_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSettings {
    /// Tokens with fewer characters than this are not counted.
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_min_token_len() -> usize {
    4
}

fn default_window_days() -> u32 {
    7
}

fn default_top_n() -> usize {
    5
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            min_token_len: default_min_token_len(),
            window_days: default_window_days(),
            top_n: default_top_n(),
        }
    }
}

/// The threshold has no default: every deployment must choose one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub threshold: u32,
}

#[derive(Debug, Default, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    critical: Vec<String>,
    #[serde(default)]
    important: Vec<String>,
    #[serde(default)]
    context: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RelevanceFile {
    #[serde(default)]
    lexicon: LexiconFile,
    #[serde(default)]
    stopwords: Vec<String>,
    #[serde(default)]
    trends: TrendSettings,
    alerts: AlertSettings,
}

/// Immutable scoring configuration, loaded once and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceConfig {
    pub lexicon: KeywordLexicon,
    pub stopwords: StopwordSet,
    pub trends: TrendSettings,
    pub alerts: AlertSettings,
}

impl RelevanceConfig {
    #[must_use]
    pub fn scorer(&self) -> TitleScorer<'_> {
        TitleScorer::new(&self.lexicon)
    }

    #[must_use]
    pub fn ranker(&self) -> RelevanceRanker<'_> {
        RelevanceRanker::new(&self.lexicon)
    }

    #[must_use]
    pub fn trend_analyzer(&self) -> TrendAnalyzer<'_> {
        TrendAnalyzer::new(&self.stopwords, self.trends.min_token_len)
    }

    #[must_use]
    pub fn alert_gate(&self) -> AlertGate {
        AlertGate::new(self.alerts.threshold)
    }
}

/// Load and validate the relevance configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_relevance_config(path: &Path) -> Result<RelevanceConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let config = parse_relevance_config(&content)?;
    tracing::debug!(
        path = %path.display(),
        keywords = config.lexicon.len(),
        stopwords = config.stopwords.len(),
        threshold = config.alerts.threshold,
        "relevance config loaded"
    );
    Ok(config)
}

/// Parse and validate relevance configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError::FileParse` for malformed YAML (including a missing
/// `alerts.threshold`) and `ConfigError::Validation` for rule violations.
pub fn parse_relevance_config(yaml: &str) -> Result<RelevanceConfig, ConfigError> {
    let file: RelevanceFile = serde_yaml::from_str(yaml)?;
    validate_trends(&file.trends)?;
    let lexicon = build_lexicon(&file.lexicon)?;
    let stopwords: StopwordSet = file.stopwords.iter().collect();

    if lexicon.is_empty() {
        tracing::warn!("relevance lexicon is empty; every title will score 0");
    }
    if stopwords.is_empty() {
        tracing::warn!("stopword list is empty; trends will not be filtered");
    }

    Ok(RelevanceConfig {
        lexicon,
        stopwords,
        trends: file.trends,
        alerts: file.alerts,
    })
}

fn build_lexicon(file: &LexiconFile) -> Result<KeywordLexicon, ConfigError> {
    let tiers = [
        (KeywordTier::Critical, &file.critical),
        (KeywordTier::Important, &file.important),
        (KeywordTier::Context, &file.context),
    ];

    let mut seen: HashMap<String, KeywordTier> = HashMap::new();
    let mut lexicon = KeywordLexicon::new();
    for (tier, keywords) in tiers {
        for raw in keywords {
            let keyword = raw.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "empty keyword in {tier} tier"
                )));
            }
            if let Some(existing) = seen.insert(keyword.clone(), tier) {
                if existing == tier {
                    return Err(ConfigError::Validation(format!(
                        "duplicate keyword '{keyword}' in {tier} tier"
                    )));
                }
                return Err(ConfigError::Validation(format!(
                    "keyword '{keyword}' appears in both {existing} and {tier} tiers"
                )));
            }
            lexicon.insert(&keyword, tier);
        }
    }
    Ok(lexicon)
}

fn validate_trends(trends: &TrendSettings) -> Result<(), ConfigError> {
    if trends.min_token_len == 0 {
        return Err(ConfigError::Validation(
            "trends.min_token_len must be at least 1".to_string(),
        ));
    }
    if trends.top_n == 0 {
        return Err(ConfigError::Validation(
            "trends.top_n must be at least 1".to_string(),
        ));
    }
    if !(1..=MAX_WINDOW_DAYS).contains(&trends.window_days) {
        return Err(ConfigError::Validation(format!(
            "trends.window_days must be between 1 and {MAX_WINDOW_DAYS}, got {}",
            trends.window_days
        )));
    }
    Ok(())
}
