//! Observable holder of the current [`RequestState`].
//!
//! Every dispatch takes a [`DispatchTicket`] when it starts. Only the
//! holder of the most recently issued ticket may commit a result, so a
//! slow response to an older term can never overwrite a newer one. Both
//! the ticket issue and the commit check run under the watch channel's
//! write lock, which makes them atomic with respect to each other.

use std::sync::atomic::{AtomicU64, Ordering};

use reel_core::state::RequestState;
use tokio::sync::watch;

/// Proof that a dispatch was started; carries its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTicket {
    seq: u64,
}

impl DispatchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Current request state plus the sequence guard.
pub struct ResultStore {
    tx: watch::Sender<RequestState>,
    latest: AtomicU64,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(RequestState::Idle);
        Self {
            tx,
            latest: AtomicU64::new(0),
        }
    }

    /// Receive every state transition.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.tx.subscribe()
    }

    /// Clone of the current state.
    pub fn current(&self) -> RequestState {
        self.tx.borrow().clone()
    }

    /// Sequence number of the newest dispatch, `0` before the first.
    pub fn latest_seq(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Enter `Loading` and issue a ticket newer than every previous one.
    ///
    /// Any error from the previous dispatch is cleared by the transition.
    pub fn begin(&self) -> DispatchTicket {
        let mut seq = 0;
        self.tx.send_modify(|state| {
            seq = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
            *state = RequestState::Loading;
        });
        DispatchTicket { seq }
    }

    /// Store `state` if `ticket` is still the newest one.
    ///
    /// Returns `false` (and leaves the store untouched) for stale tickets.
    pub fn commit(&self, ticket: DispatchTicket, state: RequestState) -> bool {
        let mut state = Some(state);
        self.tx.send_if_modified(|current| {
            if self.latest.load(Ordering::Acquire) != ticket.seq {
                return false;
            }
            if let Some(next) = state.take() {
                *current = next;
            }
            true
        })
    }
}
