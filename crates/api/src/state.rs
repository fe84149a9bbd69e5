use std::sync::Arc;

use reel_pipeline::Pipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the config is behind `Arc` and [`Pipeline`] holds
/// only shared handles.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Catalog and store clients plus the recorder task tracker.
    pub pipeline: Pipeline,
}
