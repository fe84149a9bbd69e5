//! Reel core types.
//!
//! Zero internal dependencies: data types, the request state machine,
//! the input debouncer and environment configuration helpers shared by
//! the catalog, store, pipeline and API crates.

pub mod config;
pub mod debounce;
pub mod error;
pub mod state;
pub mod types;
