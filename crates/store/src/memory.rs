//! In-process [`DocumentStore`] used for local runs and tests.
//!
//! Evaluates [`Query`] clauses against the JSON form of each record, so
//! attribute names match the remote store exactly.

use std::cmp::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use reel_core::types::{NewSearchCount, SearchCountRecord};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::api::{DocumentStore, StoreError};
use crate::query::Query;

/// Vector-backed document store.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<SearchCountRecord>>,
    /// Artificial delay applied before every operation.
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every operation, widening the window between a read and the
    /// write that follows it.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            documents: RwLock::default(),
            latency: Some(latency),
        }
    }

    /// Pre-populate with existing records.
    pub fn with_documents(documents: Vec<SearchCountRecord>) -> Self {
        Self {
            documents: RwLock::new(documents),
            latency: None,
        }
    }

    /// Snapshot of every stored record in insertion order.
    pub async fn documents(&self) -> Vec<SearchCountRecord> {
        self.documents.read().await.clone()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

/// Read an attribute from the record's wire form.
fn attribute(record: &SearchCountRecord, name: &str) -> Value {
    serde_json::to_value(record)
        .ok()
        .and_then(|v| v.get(name).cloned())
        .unwrap_or(Value::Null)
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(
        &self,
        queries: &[Query],
    ) -> Result<Vec<SearchCountRecord>, StoreError> {
        self.simulate_latency().await;
        let mut matched = self.documents.read().await.clone();
        let mut limit = None;

        for query in queries {
            match query {
                Query::Equal { attribute: name, value } => {
                    matched.retain(|record| &attribute(record, name) == value);
                }
                Query::OrderDesc(name) => {
                    // Stable sort keeps insertion order among equal counts.
                    matched.sort_by(|a, b| {
                        compare_values(&attribute(b, name), &attribute(a, name))
                    });
                }
                Query::Limit(n) => limit = Some(*n),
            }
        }

        if let Some(n) = limit {
            matched.truncate(n);
        }
        Ok(matched)
    }

    async fn update_count(&self, id: &str, count: i64) -> Result<SearchCountRecord, StoreError> {
        self.simulate_latency().await;
        let mut documents = self.documents.write().await;
        let record = documents
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.count = count;
        Ok(record.clone())
    }

    async fn create_document(
        &self,
        document: &NewSearchCount,
    ) -> Result<SearchCountRecord, StoreError> {
        self.simulate_latency().await;
        let record = SearchCountRecord {
            id: uuid::Uuid::new_v4().simple().to_string(),
            search_term: document.search_term.clone(),
            count: document.count,
            movie_id: document.movie_id,
            poster_url: document.poster_url.clone(),
        };
        self.documents.write().await.push(record.clone());
        Ok(record)
    }
}
