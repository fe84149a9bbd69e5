//! Query dispatcher: one catalog request per stabilized search term.
//!
//! A dispatch enters `Loading`, queries the discovery or search endpoint,
//! classifies the reply and commits a terminal state to the
//! [`ResultStore`]. Nothing fails past this boundary: transport, decoding
//! and upstream errors all become [`RequestState::Error`].
//!
//! Successful non-empty searches hand the term and the top-ranked movie
//! to the [`PopularityRecorder`] on a detached task. The dispatch does
//! not wait for it and its outcome is only logged.

use std::sync::Arc;
use std::time::Duration;

use reel_catalog::{CatalogPage, CatalogRequest, MovieCatalog, PageOutcome};
use reel_core::state::{RequestState, FETCH_ERROR, FETCH_FAILED, NO_MOVIES_FOUND};
use reel_core::types::Movie;
use tokio_util::task::TaskTracker;

use crate::recorder::PopularityRecorder;
use crate::result_store::{DispatchTicket, ResultStore};

/// Issues catalog requests and owns the writes to one [`ResultStore`].
pub struct QueryDispatcher {
    catalog: Arc<dyn MovieCatalog>,
    recorder: Arc<PopularityRecorder>,
    results: Arc<ResultStore>,
    /// Detached recorder tasks, tracked so shutdown can drain them.
    recordings: TaskTracker,
}

impl QueryDispatcher {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        recorder: Arc<PopularityRecorder>,
        results: Arc<ResultStore>,
        recordings: TaskTracker,
    ) -> Self {
        Self {
            catalog,
            recorder,
            results,
            recordings,
        }
    }

    pub fn results(&self) -> &Arc<ResultStore> {
        &self.results
    }

    /// Run one dispatch for `term` and return the state it produced.
    ///
    /// The returned state is this dispatch's own outcome. It is committed
    /// to the result store only if no newer dispatch started meanwhile.
    pub async fn dispatch(&self, term: &str) -> RequestState {
        let ticket = self.results.begin();
        let guard = LoadingGuard::new(&self.results, ticket);
        let request = CatalogRequest::for_term(term);

        let (state, top_movie) = match self.catalog.fetch(&request).await {
            Ok(page) => classify(page),
            Err(e) => {
                tracing::error!(
                    search = request.is_search(),
                    transport = e.is_transport(),
                    error = %e,
                    "Error fetching movies",
                );
                (RequestState::Error(FETCH_ERROR.to_string()), None)
            }
        };

        if !guard.commit(state.clone()) {
            tracing::debug!(seq = ticket.seq(), "Discarding stale catalog response");
        }

        if let (CatalogRequest::Search(term), Some(top)) = (request, top_movie) {
            self.spawn_recording(term, top);
        }

        state
    }

    /// Recorder tasks still running.
    pub fn pending_recordings(&self) -> usize {
        self.recordings.len()
    }

    // ---- private helpers ----

    fn spawn_recording(&self, term: String, top: Movie) {
        let recorder = Arc::clone(&self.recorder);
        self.recordings.spawn(async move {
            recorder.record(&term, &top).await;
        });
    }
}

/// Map a well-formed page to a terminal state and the top-ranked movie.
fn classify(page: CatalogPage) -> (RequestState, Option<Movie>) {
    match page.classify() {
        PageOutcome::Movies(movies) => {
            let top = movies.first().cloned();
            (RequestState::Success(movies), top)
        }
        PageOutcome::Empty => (RequestState::Error(NO_MOVIES_FOUND.to_string()), None),
        PageOutcome::Failed(message) => {
            tracing::warn!(message = ?message, "Catalog signalled an error");
            let message = message.unwrap_or_else(|| FETCH_FAILED.to_string());
            (RequestState::Error(message), None)
        }
    }
}

/// Wait for tracked recorder tasks, bounded by `timeout`.
///
/// Returns `true` if every task finished in time. The tracker is reopened
/// afterwards so it keeps accepting work.
pub async fn drain_recordings(recordings: &TaskTracker, timeout: Duration) -> bool {
    recordings.close();
    let drained = tokio::time::timeout(timeout, recordings.wait()).await.is_ok();
    recordings.reopen();
    if !drained {
        tracing::warn!(
            pending = recordings.len(),
            "Timed out waiting for search count recordings",
        );
    }
    drained
}

// ---------------------------------------------------------------------------
// LoadingGuard
// ---------------------------------------------------------------------------

/// Makes sure a dispatch never leaves the store stuck in `Loading`.
///
/// If the dispatch future is dropped before committing, the guard resets
/// the store to `Idle` (provided no newer dispatch owns it).
struct LoadingGuard<'a> {
    results: &'a ResultStore,
    ticket: DispatchTicket,
    committed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(results: &'a ResultStore, ticket: DispatchTicket) -> Self {
        Self {
            results,
            ticket,
            committed: false,
        }
    }

    fn commit(mut self, state: RequestState) -> bool {
        self.committed = true;
        self.results.commit(self.ticket, state)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.results.commit(self.ticket, RequestState::Idle);
        }
    }
}
