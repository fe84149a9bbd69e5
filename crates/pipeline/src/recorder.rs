//! Popularity recorder: per-term search counters in the document store.
//!
//! The store offers no atomic upsert, so a record is found by term and
//! then either incremented or created. Inside one process, recordings of
//! the same term are serialized through a per-term async lock so two
//! concurrent first searches cannot both create a record. Separate
//! processes sharing a collection can still race.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reel_core::types::{Movie, NewSearchCount, SearchCountRecord};
use reel_store::{DocumentStore, Query, StoreError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// What a successful recording did.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// First occurrence of the term; a record with `count = 1` was created.
    Created(SearchCountRecord),
    /// The existing record's count was incremented.
    Incremented(SearchCountRecord),
}

impl RecordOutcome {
    pub fn record(&self) -> &SearchCountRecord {
        match self {
            Self::Created(r) | Self::Incremented(r) => r,
        }
    }
}

/// Upserts search counters for successful searches.
pub struct PopularityRecorder {
    store: Arc<dyn DocumentStore>,
    image_base_url: String,
    locks: TermLocks,
}

impl PopularityRecorder {
    pub fn new(store: Arc<dyn DocumentStore>, image_base_url: impl Into<String>) -> Self {
        Self {
            store,
            image_base_url: image_base_url.into(),
            locks: TermLocks::default(),
        }
    }

    /// Record `term` and log any failure.
    ///
    /// Never fails: store errors are reported through `tracing` only.
    pub async fn record(&self, term: &str, top_movie: &Movie) -> Option<RecordOutcome> {
        match self.try_record(term, top_movie).await {
            Ok(outcome) => {
                let record = outcome.record();
                tracing::info!(
                    search_term = %record.search_term,
                    count = record.count,
                    created = matches!(outcome, RecordOutcome::Created(_)),
                    "Search count recorded",
                );
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(search_term = %term, error = %e, "Error updating search count");
                None
            }
        }
    }

    /// Find the record for `term`, then increment it or create it.
    pub async fn try_record(
        &self,
        term: &str,
        top_movie: &Movie,
    ) -> Result<RecordOutcome, StoreError> {
        let _lease = self.locks.lock(term).await;

        let existing = self
            .store
            .list_documents(&[Query::search_term_equals(term)])
            .await?;

        match existing.into_iter().next() {
            Some(doc) => {
                let updated = self.store.update_count(&doc.id, doc.count + 1).await?;
                Ok(RecordOutcome::Incremented(updated))
            }
            None => {
                let new = NewSearchCount::first_occurrence(term, top_movie, &self.image_base_url);
                let created = self.store.create_document(&new).await?;
                Ok(RecordOutcome::Created(created))
            }
        }
    }

    /// Number of terms with a recording in progress or waiting.
    pub fn terms_in_flight(&self) -> usize {
        self.locks.map().len()
    }
}

// ---------------------------------------------------------------------------
// Per-term locks
// ---------------------------------------------------------------------------

/// Lazily created async lock per term; entries are removed once unused.
#[derive(Default)]
struct TermLocks {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl TermLocks {
    fn map(&self) -> MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn lock(&self, term: &str) -> TermLease<'_> {
        let slot = Arc::clone(self.map().entry(term.to_string()).or_default());
        let guard = Arc::clone(&slot).lock_owned().await;
        TermLease {
            locks: self,
            term: term.to_string(),
            slot,
            guard: Some(guard),
        }
    }
}

/// Held for the duration of one recording.
struct TermLease<'a> {
    locks: &'a TermLocks,
    term: String,
    slot: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for TermLease<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut map = self.locks.map();
        // One reference in the map, one here: nobody else is waiting.
        if Arc::strong_count(&self.slot) == 2 {
            map.remove(&self.term);
        }
    }
}
