//! Asset retrieval over HTTP.

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::config::NetworkConfig;
use crate::error::{Error, Result};

/// Fetches the body of an asset URL.
///
/// Implementations must only return a body that is an image.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`AssetFetcher`] backed by reqwest.
pub struct HttpFetcher {
    client: Client,
    referer: String,
}

impl HttpFetcher {
    /// Create a fetcher with the configured identity and timeout.
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&network.user_agent)
            .timeout(network.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            referer: network.referer.clone(),
        })
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::REFERER, &self.referer)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download(format!("HTTP {} for {}", status, url)));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.starts_with("image/") {
            return Err(Error::ContentType(if content_type.is_empty() {
                "missing".to_string()
            } else {
                content_type
            }));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
