use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::articles::MAX_FIELD_CHARS;
use crate::ConfigError;

/// One RSS/Atom source. `name` becomes the article `source` label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedsFile {
    pub feeds: Vec<FeedConfig>,
}

/// Load and validate the feed list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_feeds(path: &Path) -> Result<FeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let feeds_file: FeedsFile = serde_yaml::from_str(&content)?;
    validate_feeds(&feeds_file)?;

    Ok(feeds_file)
}

fn validate_feeds(feeds_file: &FeedsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_urls = HashSet::new();

    for feed in &feeds_file.feeds {
        if feed.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feed name must be non-empty".to_string(),
            ));
        }

        if feed.name.chars().count() > MAX_FIELD_CHARS {
            return Err(ConfigError::Validation(format!(
                "feed name '{}...' is longer than {MAX_FIELD_CHARS} characters",
                feed.name.chars().take(32).collect::<String>()
            )));
        }

        if !(feed.url.starts_with("http://") || feed.url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "feed '{}' has invalid url '{}'; must be http(s)",
                feed.name, feed.url
            )));
        }

        if !seen_names.insert(feed.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate feed name: '{}'",
                feed.name
            )));
        }

        if !seen_urls.insert(feed.url.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate feed url: '{}' (from feed '{}')",
                feed.url, feed.name
            )));
        }
    }

    Ok(())
}
