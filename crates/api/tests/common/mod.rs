//! Shared fixtures for API integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use reel_api::config::ServerConfig;
use reel_api::router::build_app_router;
use reel_api::state::AppState;
use reel_catalog::{CatalogError, CatalogPage, CatalogRequest, MovieCatalog};
use reel_pipeline::{Pipeline, PipelineConfig};
use reel_store::MemoryStore;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
    }
}

/// Catalog answering from a fixed term → JSON page table.
///
/// Unknown terms answer with an upstream 500.
#[derive(Default)]
pub struct StubCatalog {
    pages: Mutex<HashMap<String, serde_json::Value>>,
}

impl StubCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn page(&self, term: &str, page: serde_json::Value) {
        self.pages.lock().unwrap().insert(term.to_string(), page);
    }
}

#[async_trait]
impl MovieCatalog for StubCatalog {
    async fn fetch(&self, request: &CatalogRequest) -> Result<CatalogPage, CatalogError> {
        let term = match request {
            CatalogRequest::Discover => "",
            CatalogRequest::Search(term) => term.as_str(),
        };
        let page = self.pages.lock().unwrap().get(term).cloned();
        match page {
            Some(json) => Ok(serde_json::from_value(json)?),
            None => Err(CatalogError::ApiError {
                status: 500,
                body: String::new(),
            }),
        }
    }
}

pub fn build_pipeline(catalog: Arc<StubCatalog>, store: Arc<MemoryStore>) -> Pipeline {
    Pipeline::new(catalog, store, PipelineConfig::default())
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pipeline: Pipeline) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        pipeline,
    };
    build_app_router(state, &config).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
