//! REST client for the TMDB movie catalog.
//!
//! Wraps the two list endpoints the search pipeline needs (discovery and
//! title search) using [`reqwest`]. Every request carries the configured
//! bearer token.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::config::CatalogConfig;
use crate::request::CatalogRequest;
use crate::response::CatalogPage;

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not valid JSON for a list response.
    #[error("Malformed catalog response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Network and status failures, as opposed to undecodable bodies.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::ApiError { .. })
    }
}

/// Anything that can answer catalog list requests.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn fetch(&self, request: &CatalogRequest) -> Result<CatalogPage, CatalogError>;
}

/// HTTP client for the TMDB v3 API.
pub struct TmdbApi {
    client: reqwest::Client,
    api_base_url: String,
    bearer: String,
}

impl TmdbApi {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bearer: format!("Bearer {}", config.api_key),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, returning the body
    /// text of a failed response inside [`CatalogError::ApiError`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MovieCatalog for TmdbApi {
    /// Sends `GET {api_base_url}{path}` and decodes the list payload.
    async fn fetch(&self, request: &CatalogRequest) -> Result<CatalogPage, CatalogError> {
        let url = request.url(&self.api_base_url);
        tracing::debug!(search = request.is_search(), "Querying movie catalog");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.bearer)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
