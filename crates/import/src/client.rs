//! Extraction service clients.

use crate::config::ImportConfig;
use crate::error::{ImportError, Result};
use crate::wire::{parse_response, ExtractionRequest};
use async_trait::async_trait;
use log::{debug, warn};
use pyramid_core::SlideDraft;
use reqwest::Client;

/// Something that turns freeform text into slide drafts.
#[async_trait]
pub trait SlideExtractor: Send + Sync {
    /// Extract slides from `request.text`.
    ///
    /// Implementations return validated drafts, each with at least one
    /// argument entry.
    async fn extract(&self, request: &ExtractionRequest) -> Result<Vec<SlideDraft>>;
}

/// Extractor backed by the HTTP extraction endpoint.
pub struct HttpExtractor {
    /// HTTP client for API requests.
    client: Client,
    /// Endpoint and timeout.
    config: ImportConfig,
}

impl HttpExtractor {
    /// Create an extractor for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ImportConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SlideExtractor for HttpExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> Result<Vec<SlideDraft>> {
        debug!(
            "Sending {} characters to {}",
            request.text.chars().count(),
            self.config.endpoint
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!("Extraction request failed: {err}");
                ImportError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Extraction service answered {status}");
            return Err(ImportError::Transport {
                detail: format!("HTTP {status}"),
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}
