//! Configuration structures and loading logic.

use crate::config::modes::{SortMode, TimeWindow};
use crate::error::{Error, Result};
use crate::media::FilterPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// What to scrape and where to put it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Collection (subreddit) name, without the `r/` prefix.
    #[serde(default)]
    pub collection: String,

    /// Base directory for downloads. Each collection gets its own folder.
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// Number of candidates to collect.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Listing sort order.
    #[serde(default)]
    pub sort: SortMode,

    /// Time window, only sent when sort is `top`.
    #[serde(default)]
    pub time_window: TimeWindow,

    /// Concurrent downloads.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Seed the dedup index from files already on disk.
    #[serde(default = "default_true")]
    pub skip_existing: bool,

    /// Show per-download progress.
    #[serde(default = "default_true")]
    pub verbose: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            collection: String::new(),
            output_directory: default_output_directory(),
            limit: default_limit(),
            sort: SortMode::default(),
            time_window: TimeWindow::default(),
            workers: default_workers(),
            skip_existing: true,
            verbose: true,
        }
    }
}

/// Candidate inclusion thresholds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub min_score: i64,

    #[serde(default)]
    pub min_width: u32,

    #[serde(default)]
    pub min_height: u32,

    /// Include posts flagged as sensitive.
    #[serde(default)]
    pub include_nsfw: bool,
}

/// HTTP settings shared by the listing client and the downloader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Listing host, overridable for testing.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Referer sent with asset downloads.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Pause between listing pages, in milliseconds.
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,

    /// Extra random pause added to `request_delay_ms`, in milliseconds.
    #[serde(default)]
    pub request_jitter_ms: u64,

    /// Cooldown before retrying a rate-limited listing request, in seconds.
    #[serde(default = "default_rate_limit_cooldown")]
    pub rate_limit_cooldown_secs: u64,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            referer: default_referer(),
            request_delay_ms: default_request_delay(),
            request_jitter_ms: 0,
            rate_limit_cooldown_secs: default_rate_limit_cooldown(),
            timeout_secs: default_timeout(),
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn rate_limit_cooldown(&self) -> Duration {
        Duration::from_secs(self.rate_limit_cooldown_secs)
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_limit() -> usize {
    25
}

fn default_workers() -> usize {
    5
}

fn default_base_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_referer() -> String {
    "https://www.reddit.com/".to_string()
}

fn default_request_delay() -> u64 {
    500
}

fn default_rate_limit_cooldown() -> u64 {
    60
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Filter thresholds as a policy value.
    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy {
            min_score: self.filter.min_score,
            min_width: self.filter.min_width,
            min_height: self.filter.min_height,
            include_nsfw: self.filter.include_nsfw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.scraper.limit, 25);
        assert_eq!(config.scraper.workers, 5);
        assert_eq!(config.scraper.sort, SortMode::Hot);
        assert_eq!(config.scraper.time_window, TimeWindow::Week);
        assert!(config.scraper.skip_existing);
        assert!(!config.filter.include_nsfw);
        assert_eq!(config.network.rate_limit_cooldown_secs, 60);
        assert_eq!(config.network.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scraper]
            collection = "wallpapers"
            sort = "top"
            time_window = "all"

            [filter]
            min_width = 1920
            "#,
        )
        .unwrap();

        assert_eq!(config.scraper.collection, "wallpapers");
        assert_eq!(config.scraper.sort, SortMode::Top);
        assert_eq!(config.scraper.time_window, TimeWindow::All);
        assert_eq!(config.scraper.limit, 25);
        assert_eq!(config.filter.min_width, 1920);
        assert_eq!(config.network.base_url, "https://www.reddit.com");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scraper.collection = "earthporn".to_string();
        config.filter.min_score = 1000;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.scraper.collection, "earthporn");
        assert_eq!(loaded.filter.min_score, 1000);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
