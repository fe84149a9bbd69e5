//! Movie catalog client library.
//!
//! Provides endpoint selection, the TMDB REST client behind the
//! [`MovieCatalog`] trait, and classification of list payloads.

pub mod api;
pub mod config;
pub mod request;
pub mod response;

pub use api::{CatalogError, MovieCatalog, TmdbApi};
pub use config::CatalogConfig;
pub use request::CatalogRequest;
pub use response::{CatalogPage, PageOutcome};
