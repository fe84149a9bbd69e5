//! Document store client library.
//!
//! Provides the [`DocumentStore`] trait used by the popularity recorder and
//! top-searches loader, the Appwrite REST implementation, and an in-memory
//! implementation for local runs and tests.

pub mod api;
pub mod config;
pub mod memory;
pub mod query;

pub use api::{AppwriteStore, DocumentStore, StoreError};
pub use config::StoreConfig;
pub use memory::MemoryStore;
pub use query::Query;
