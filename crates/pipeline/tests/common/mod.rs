//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reel_catalog::{CatalogError, CatalogPage, CatalogRequest, MovieCatalog};
use reel_core::state::RequestState;
use reel_pipeline::{Pipeline, PipelineConfig};
use reel_store::MemoryStore;
use tokio::sync::watch;

pub const CDN: &str = "https://image.tmdb.org/t/p/w500";

/// Canned reply for one term.
#[derive(Clone)]
pub enum Reply {
    Page(serde_json::Value),
    Status(u16),
    Malformed,
}

#[derive(Clone)]
struct Route {
    delay: Duration,
    reply: Reply,
}

/// Scripted catalog keyed by term (`""` is discovery).
#[derive(Default)]
pub struct FakeCatalog {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, term: &str, reply: Reply) {
        self.reply_after(term, Duration::ZERO, reply);
    }

    pub fn reply_after(&self, term: &str, delay: Duration, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .insert(term.to_string(), Route { delay, reply });
    }

    /// Every `path?query` requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    async fn fetch(&self, request: &CatalogRequest) -> Result<CatalogPage, CatalogError> {
        self.requests.lock().unwrap().push(request.path_and_query());
        let term = match request {
            CatalogRequest::Discover => String::new(),
            CatalogRequest::Search(term) => term.clone(),
        };
        let route = self
            .routes
            .lock()
            .unwrap()
            .get(&term)
            .cloned()
            .unwrap_or(Route {
                delay: Duration::ZERO,
                reply: Reply::Page(serde_json::json!({"results": []})),
            });

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        match route.reply {
            Reply::Page(json) => Ok(serde_json::from_value(json)?),
            Reply::Status(status) => Err(CatalogError::ApiError {
                status,
                body: "{\"status_message\":\"Internal error\"}".into(),
            }),
            Reply::Malformed => Ok(serde_json::from_str("<html>not json</html>")?),
        }
    }
}

/// A page with the given `(id, poster_path)` movies.
pub fn movies(items: &[(i64, &str)]) -> serde_json::Value {
    let results: Vec<_> = items
        .iter()
        .map(|(id, poster)| serde_json::json!({"id": id, "poster_path": poster, "title": format!("Movie {id}")}))
        .collect();
    serde_json::json!({"page": 1, "results": results})
}

pub fn pipeline(catalog: Arc<FakeCatalog>, store: Arc<MemoryStore>) -> Pipeline {
    Pipeline::new(
        catalog,
        store,
        PipelineConfig {
            image_base_url: CDN.to_string(),
            ..PipelineConfig::default()
        },
    )
}

/// Wait until the observed state is terminal and return it.
pub async fn wait_for_terminal(rx: &mut watch::Receiver<RequestState>) -> RequestState {
    let state = rx
        .wait_for(|s| s.is_terminal())
        .await
        .expect("result store dropped");
    state.clone()
}
