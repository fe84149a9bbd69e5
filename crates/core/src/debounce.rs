//! Quiet-period debouncing of a continuously changing value.
//!
//! [`Debouncer`] watches a [`watch`] channel and forwards the latest value
//! to an [`mpsc`] channel only after the input has been silent for the
//! full quiet period. Every new input resets the pending timer, so the
//! intermediate values typed during a burst are never emitted.
//!
//! The value present when the debouncer starts counts as an input too: it
//! is emitted after one quiet period unless something newer replaces it.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Default quiet period between the last keystroke and a search.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Output channel capacity. Emissions are at least one quiet period apart,
/// so a small buffer is plenty.
const OUTPUT_CAPACITY: usize = 16;

/// Emits the latest input value once the input has settled.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    quiet: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Spawn the debounce loop on the current runtime.
    ///
    /// Returns the stabilized-value receiver and the task handle. The task
    /// ends when `cancel` fires, when the receiver is dropped, or after the
    /// input sender is dropped and any pending value has been flushed.
    pub fn spawn<T>(
        self,
        input: watch::Receiver<T>,
        cancel: CancellationToken,
    ) -> (mpsc::Receiver<T>, JoinHandle<()>)
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(OUTPUT_CAPACITY);
        let handle = tokio::spawn(self.run(input, tx, cancel));
        (rx, handle)
    }

    /// Run the debounce loop until cancelled or either side closes.
    ///
    /// A settled value equal to the last emitted one is not emitted again.
    pub async fn run<T>(
        self,
        mut input: watch::Receiver<T>,
        output: mpsc::Sender<T>,
        cancel: CancellationToken,
    ) where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        input.borrow_and_update();
        let mut deadline = Some(Instant::now() + self.quiet);
        let mut last_emitted: Option<T> = None;
        let mut input_open = true;

        loop {
            let pending_at = deadline;
            let settled = async move {
                match pending_at {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Debouncer cancelled");
                    break;
                }
                changed = input.changed(), if input_open => {
                    match changed {
                        Ok(()) => deadline = Some(Instant::now() + self.quiet),
                        Err(_) => {
                            input_open = false;
                            if deadline.is_none() {
                                break;
                            }
                        }
                    }
                }
                () = settled => {
                    deadline = None;
                    let value = input.borrow_and_update().clone();
                    if last_emitted.as_ref() != Some(&value) {
                        if output.send(value.clone()).await.is_err() {
                            tracing::debug!("Debounce output closed");
                            break;
                        }
                        last_emitted = Some(value);
                    }
                    if !input_open {
                        break;
                    }
                }
            }
        }
    }
}
