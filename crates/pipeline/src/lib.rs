//! Search-debounce-fetch-reconcile pipeline.
//!
//! - [`QueryDispatcher`] turns a settled term into one catalog request and
//!   a terminal [`RequestState`](reel_core::state::RequestState).
//! - [`ResultStore`] holds that state behind a sequence guard.
//! - [`PopularityRecorder`] upserts per-term search counters.
//! - [`TrendingLoader`] reads the most searched terms.
//! - [`SearchSession`] wires a debouncer to a dispatcher for one client.
//!
//! [`Pipeline`] holds the shared clients and is built once at startup.

pub mod config;
pub mod dispatcher;
pub mod recorder;
pub mod result_store;
pub mod session;
pub mod trending;

use std::sync::Arc;
use std::time::Duration;

use reel_catalog::MovieCatalog;
use reel_core::debounce::Debouncer;
use reel_store::DocumentStore;
use tokio_util::task::TaskTracker;

pub use config::PipelineConfig;
pub use dispatcher::QueryDispatcher;
pub use recorder::{PopularityRecorder, RecordOutcome};
pub use result_store::ResultStore;
pub use session::SearchSession;
pub use trending::TrendingLoader;

/// Shared clients and settings; cheap to clone.
#[derive(Clone)]
pub struct Pipeline {
    catalog: Arc<dyn MovieCatalog>,
    store: Arc<dyn DocumentStore>,
    recorder: Arc<PopularityRecorder>,
    recordings: TaskTracker,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        store: Arc<dyn DocumentStore>,
        config: PipelineConfig,
    ) -> Self {
        let recorder = Arc::new(PopularityRecorder::new(
            Arc::clone(&store),
            config.image_base_url.clone(),
        ));
        Self {
            catalog,
            store,
            recorder,
            recordings: TaskTracker::new(),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// A dispatcher writing to a fresh result store.
    pub fn dispatcher(&self) -> QueryDispatcher {
        QueryDispatcher::new(
            Arc::clone(&self.catalog),
            Arc::clone(&self.recorder),
            Arc::new(ResultStore::new()),
            self.recordings.clone(),
        )
    }

    /// A loader with an empty initial list.
    pub fn trending_loader(&self) -> TrendingLoader {
        TrendingLoader::new(Arc::clone(&self.store))
    }

    /// Start a debounced session for one client.
    pub fn start_session(&self) -> SearchSession {
        SearchSession::start(
            self.dispatcher(),
            self.trending_loader(),
            Debouncer::new(self.config.debounce),
            self.config.trending_limit,
        )
    }

    /// Recorder tasks still running across all sessions.
    pub fn pending_recordings(&self) -> usize {
        self.recordings.len()
    }

    /// Wait (bounded) for in-flight recordings; used at shutdown.
    pub async fn drain_recordings(&self, timeout: Duration) -> bool {
        dispatcher::drain_recordings(&self.recordings, timeout).await
    }
}
