//! Top-searches loader.
//!
//! Reads the highest-count search records once per session. A failed
//! load is logged and leaves the previously loaded list in place.

use std::sync::Arc;

use reel_core::types::SearchCountRecord;
use reel_store::{DocumentStore, Query};
use tokio::sync::RwLock;

/// Default number of trending searches shown.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Owns the current top-searches list.
pub struct TrendingLoader {
    store: Arc<dyn DocumentStore>,
    records: RwLock<Vec<SearchCountRecord>>,
}

impl TrendingLoader {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            records: RwLock::default(),
        }
    }

    /// Load the `n` highest counters, ordered by descending count.
    ///
    /// Returns the list now held, which is the previous one if the store
    /// could not be read.
    pub async fn load_top(&self, n: usize) -> Vec<SearchCountRecord> {
        match self.store.list_documents(&Query::top_by_count(n)).await {
            Ok(mut records) => {
                // Re-sort locally in case the store ignores ordering.
                records.sort_by(|a, b| b.count.cmp(&a.count));
                records.truncate(n);
                tracing::debug!(count = records.len(), "Loaded trending searches");
                *self.records.write().await = records.clone();
                records
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching trending searches");
                self.current().await
            }
        }
    }

    /// The most recently loaded list (initially empty).
    pub async fn current(&self) -> Vec<SearchCountRecord> {
        self.records.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use reel_core::types::NewSearchCount;
    use reel_store::{MemoryStore, StoreError};

    use super::*;

    fn record(id: &str, count: i64) -> SearchCountRecord {
        SearchCountRecord {
            id: id.into(),
            search_term: format!("term-{id}"),
            count,
            movie_id: 1,
            poster_url: String::new(),
        }
    }

    /// Serves a fixed list until told to fail.
    struct FlakyStore {
        fail: AtomicBool,
        inner: MemoryStore,
    }

    #[async_trait]
    impl DocumentStore for FlakyStore {
        async fn list_documents(
            &self,
            queries: &[Query],
        ) -> Result<Vec<SearchCountRecord>, StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::ApiError {
                    status: 500,
                    body: "down".into(),
                });
            }
            self.inner.list_documents(queries).await
        }

        async fn update_count(&self, id: &str, count: i64) -> Result<SearchCountRecord, StoreError> {
            self.inner.update_count(id, count).await
        }

        async fn create_document(
            &self,
            document: &NewSearchCount,
        ) -> Result<SearchCountRecord, StoreError> {
            self.inner.create_document(document).await
        }
    }

    #[tokio::test]
    async fn loads_highest_counts_first() {
        let store = Arc::new(MemoryStore::with_documents(vec![
            record("a", 1),
            record("b", 10),
            record("c", 4),
            record("d", 7),
            record("e", 2),
            record("f", 3),
        ]));
        let loader = TrendingLoader::new(store);

        let top = loader.load_top(DEFAULT_TRENDING_LIMIT).await;
        let counts: Vec<_> = top.iter().map(|r| r.count).collect();
        assert_eq!(counts, [10, 7, 4, 3, 2]);
        assert_eq!(loader.current().await, top);
    }

    #[tokio::test]
    async fn failure_keeps_initial_empty_list() {
        let store = Arc::new(FlakyStore {
            fail: AtomicBool::new(true),
            inner: MemoryStore::new(),
        });
        let loader = TrendingLoader::new(store);
        assert!(loader.load_top(5).await.is_empty());
    }

    #[tokio::test]
    async fn failure_keeps_previous_list() {
        let store = Arc::new(FlakyStore {
            fail: AtomicBool::new(false),
            inner: MemoryStore::with_documents(vec![record("a", 3), record("b", 8)]),
        });
        let loader = TrendingLoader::new(store.clone());

        let first = loader.load_top(5).await;
        assert_eq!(first.len(), 2);

        store.fail.store(true, Ordering::SeqCst);
        let second = loader.load_top(5).await;
        assert_eq!(second, first);
    }
}
