//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Maximum concurrent downloads.
const MAX_WORKERS: usize = 64;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_collection(&config.scraper.collection)?;

    if config.scraper.limit == 0 {
        return Err(Error::ConfigValidation {
            field: "limit".to_string(),
            message: "Limit must be at least 1".to_string(),
        });
    }

    if config.scraper.workers == 0 || config.scraper.workers > MAX_WORKERS {
        return Err(Error::ConfigValidation {
            field: "workers".to_string(),
            message: format!(
                "Workers must be between 1 and {} (got {})",
                MAX_WORKERS, config.scraper.workers
            ),
        });
    }

    url::Url::parse(&config.network.base_url)?;

    Ok(())
}

/// Strip a leading `r/` or `/r/` from a collection name.
pub fn normalize_collection(input: &str) -> String {
    let input = input.trim();
    input
        .strip_prefix("/r/")
        .or_else(|| input.strip_prefix("r/"))
        .unwrap_or(input)
        .trim_end_matches('/')
        .to_string()
}

/// Validate a collection name.
pub fn validate_collection(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::ConfigValidation {
            field: "collection".to_string(),
            message: "A collection name is required".to_string(),
        });
    }

    // Subreddit names: 2-21 chars, alphanumeric and underscores
    let pattern = Regex::new(r"^[A-Za-z0-9_]{2,21}$")
        .map_err(|e| Error::Config(format!("Invalid collection pattern: {}", e)))?;

    if !pattern.is_match(name) {
        return Err(Error::ConfigValidation {
            field: "collection".to_string(),
            message: format!(
                "Collection '{}' is invalid. Use 2-21 letters, digits or underscores.",
                name
            ),
        });
    }

    Ok(())
}
