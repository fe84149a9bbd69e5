//! One client's search session.
//!
//! Raw input goes through the [`Debouncer`]; each settled term starts its
//! own dispatch task. Older dispatches are not cancelled when a newer
//! term arrives; the result store's sequence guard discards their
//! results instead. The top-searches list is loaded once, independently,
//! when the session starts.

use std::sync::Arc;

use reel_core::debounce::Debouncer;
use reel_core::state::RequestState;
use reel_core::types::SearchCountRecord;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::dispatcher::QueryDispatcher;
use crate::trending::TrendingLoader;

/// Stabilized-term channel capacity.
const TERM_CHANNEL_CAPACITY: usize = 16;

/// Debounced search pipeline for a single client.
///
/// Dropping the session cancels its tasks; call
/// [`shutdown`](Self::shutdown) to also wait for them to finish.
pub struct SearchSession {
    input: watch::Sender<String>,
    dispatcher: Arc<QueryDispatcher>,
    trending: Arc<watch::Sender<Vec<SearchCountRecord>>>,
    cancel: CancellationToken,
    tasks: TaskTracker,
}

impl SearchSession {
    /// Spawn the debounce, dispatch and trending tasks.
    pub fn start(
        dispatcher: QueryDispatcher,
        trending: TrendingLoader,
        debouncer: Debouncer,
        trending_limit: usize,
    ) -> Self {
        let cancel = CancellationToken::new();
        let tasks = TaskTracker::new();
        let dispatcher = Arc::new(dispatcher);

        let (input, input_rx) = watch::channel(String::new());
        let (term_tx, term_rx) = mpsc::channel(TERM_CHANNEL_CAPACITY);
        tasks.spawn(debouncer.run(input_rx, term_tx, cancel.clone()));
        tasks.spawn(dispatch_loop(
            Arc::clone(&dispatcher),
            term_rx,
            tasks.clone(),
            cancel.clone(),
        ));

        let (trending_tx, _) = watch::channel(Vec::new());
        let trending_tx = Arc::new(trending_tx);
        let trending_cancel = cancel.clone();
        let publish = Arc::clone(&trending_tx);
        tasks.spawn(async move {
            tokio::select! {
                _ = trending_cancel.cancelled() => {}
                records = trending.load_top(trending_limit) => {
                    publish.send_replace(records);
                }
            }
        });

        tracing::debug!(quiet_ms = debouncer.quiet_period().as_millis() as u64, "Search session started");

        Self {
            input,
            dispatcher,
            trending: trending_tx,
            cancel,
            tasks,
        }
    }

    /// Feed the latest raw input value (e.g. after every keystroke).
    pub fn set_query(&self, term: impl Into<String>) {
        self.input.send_replace(term.into());
    }

    /// Observe request state transitions.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.dispatcher.results().subscribe()
    }

    pub fn state(&self) -> RequestState {
        self.dispatcher.results().current()
    }

    /// Observe the trending list; it changes at most once per session.
    pub fn subscribe_trending(&self) -> watch::Receiver<Vec<SearchCountRecord>> {
        self.trending.subscribe()
    }

    pub fn trending(&self) -> Vec<SearchCountRecord> {
        self.trending.borrow().clone()
    }

    /// Cancel all session tasks and wait for them to stop.
    ///
    /// Recorder tasks already handed off are not part of the session and
    /// keep running.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tasks.close();
        self.tasks.wait().await;
        tracing::debug!("Search session stopped");
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Start one dispatch per settled term until cancelled.
async fn dispatch_loop(
    dispatcher: Arc<QueryDispatcher>,
    mut terms: mpsc::Receiver<String>,
    tasks: TaskTracker,
    cancel: CancellationToken,
) {
    loop {
        let term = tokio::select! {
            _ = cancel.cancelled() => break,
            term = terms.recv() => match term {
                Some(term) => term,
                None => break,
            },
        };

        tracing::debug!(term = %term, "Dispatching settled search term");
        let dispatcher = Arc::clone(&dispatcher);
        let cancel = cancel.clone();
        tasks.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = dispatcher.dispatch(&term) => {}
            }
        });
    }
}
