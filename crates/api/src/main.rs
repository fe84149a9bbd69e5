use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reel_catalog::{CatalogConfig, TmdbApi};
use reel_pipeline::{Pipeline, PipelineConfig};
use reel_store::{AppwriteStore, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reel_api::config::ServerConfig;
use reel_api::router::build_app_router;
use reel_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "reel_api=debug,reel_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = or_exit(ServerConfig::from_env(), "Invalid server configuration");
    let catalog_config = or_exit(CatalogConfig::from_env(), "Invalid catalog configuration");
    let store_config = or_exit(StoreConfig::from_env(), "Invalid store configuration");
    let pipeline_config = or_exit(PipelineConfig::from_env(), "Invalid pipeline configuration");
    tracing::info!(?catalog_config, ?store_config, "Configuration loaded");

    // --- Clients ---
    let catalog = or_exit(TmdbApi::new(&catalog_config), "Failed to build catalog client");
    let store = or_exit(AppwriteStore::new(store_config), "Failed to build store client");
    let pipeline = Pipeline::new(Arc::new(catalog), Arc::new(store), pipeline_config);

    let state = AppState {
        config: Arc::new(config.clone()),
        pipeline: pipeline.clone(),
    };
    let app = or_exit(build_app_router(state, &config), "Invalid router configuration");

    let host = or_exit(config.host.parse(), "Invalid HOST");
    let addr = SocketAddr::new(host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = or_exit(
        tokio::net::TcpListener::bind(addr).await,
        "Failed to bind address",
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    let pending = pipeline.pending_recordings();
    tracing::info!(pending, "Server stopped accepting connections, draining recordings");

    let drained = pipeline
        .drain_recordings(Duration::from_secs(config.shutdown_timeout_secs))
        .await;
    if !drained {
        tracing::warn!(
            remaining = pipeline.pending_recordings(),
            "Recordings still in flight at shutdown"
        );
    }

    tracing::info!("Graceful shutdown complete");
}

/// Unwrap a startup result, or log its message and exit non-zero.
fn or_exit<T, E: std::fmt::Display>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "{context}");
            std::process::exit(1);
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
