//! Error types for the reddit-image-scraper application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Listing errors
    #[error("Network error: {0}")]
    TransientNetwork(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Malformed listing response: {0}")]
    MalformedResponse(String),

    #[error("Upstream returned HTTP {status} for {url}")]
    Upstream { status: u16, url: String },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Unexpected content type: {0}")]
    ContentType(String),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Whether this error is an HTTP 429 from the listing endpoint.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }

    /// Whether this error came from the transport layer (connect, timeout, reset).
    pub fn is_transient(&self) -> bool {
        match self {
            Error::TransientNetwork(_) => true,
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
///
/// Partial or total listing/download failure still exits with `SUCCESS`
/// once the summary has been printed.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::RateLimited(60).is_rate_limited());
        assert!(!Error::RateLimited(60).is_transient());
        assert!(Error::TransientNetwork("timed out".into()).is_transient());
        assert!(!Error::MalformedResponse("eof".into()).is_transient());
    }

    #[test]
    fn test_display() {
        let err = Error::Upstream {
            status: 503,
            url: "https://example.com/r/pics/hot.json".into(),
        };
        assert_eq!(
            err.to_string(),
            "Upstream returned HTTP 503 for https://example.com/r/pics/hot.json"
        );
    }
}
