//! Document store seam and its Appwrite REST implementation.
//!
//! The pipeline only ever talks to [`DocumentStore`]; [`AppwriteStore`] is
//! constructed once at startup and shared behind an `Arc`.

use async_trait::async_trait;
use reel_core::types::{NewSearchCount, SearchCountRecord};
use serde::Deserialize;

use crate::config::StoreConfig;
use crate::query::Query;

/// Placeholder id asking the store to assign a unique document id.
const UNIQUE_ID: &str = "unique()";

/// Errors from the document store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store returned a non-2xx status code.
    #[error("Document store error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The body did not decode into the expected document shape.
    #[error("Malformed document store response: {0}")]
    Parse(#[from] serde_json::Error),

    /// An update targeted a document that does not exist.
    #[error("Document not found: {0}")]
    NotFound(String),
}

/// Operations on the search-count collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List documents matching every query clause, in store order.
    async fn list_documents(&self, queries: &[Query])
        -> Result<Vec<SearchCountRecord>, StoreError>;

    /// Overwrite the counter of an existing document.
    async fn update_count(&self, id: &str, count: i64) -> Result<SearchCountRecord, StoreError>;

    /// Create a new document with a store-assigned id.
    async fn create_document(
        &self,
        document: &NewSearchCount,
    ) -> Result<SearchCountRecord, StoreError>;
}

/// Envelope returned by the list endpoint.
#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<SearchCountRecord>,
}

/// HTTP client for an Appwrite databases collection.
pub struct AppwriteStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl AppwriteStore {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: StoreConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- private helpers ----

    /// Attach project and (optional) key headers.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header("X-Appwrite-Project", &self.config.project_id);
        match &self.config.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    /// Send a request and decode a successful JSON body.
    async fn send<T: serde::de::DeserializeOwned>(
        builder: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn list_documents(
        &self,
        queries: &[Query],
    ) -> Result<Vec<SearchCountRecord>, StoreError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_wire()))
            .collect();

        let request = self
            .authorize(self.client.get(self.config.documents_url()))
            .query(&params);

        let list: DocumentList = Self::send(request).await?;
        Ok(list.documents)
    }

    async fn update_count(&self, id: &str, count: i64) -> Result<SearchCountRecord, StoreError> {
        let body = serde_json::json!({ "data": { "count": count } });
        let request = self
            .authorize(
                self.client
                    .patch(format!("{}/{}", self.config.documents_url(), id)),
            )
            .json(&body);

        match Self::send(request).await {
            Err(StoreError::ApiError { status: 404, .. }) => {
                Err(StoreError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    async fn create_document(
        &self,
        document: &NewSearchCount,
    ) -> Result<SearchCountRecord, StoreError> {
        let body = serde_json::json!({
            "documentId": UNIQUE_ID,
            "data": document,
        });
        let request = self
            .authorize(self.client.post(self.config.documents_url()))
            .json(&body);

        Self::send(request).await
    }
}
