//! Request lifecycle state observed by clients.

use serde::Serialize;

use crate::types::{Movie, MovieList};

/// Message shown when a search yields no results.
pub const NO_MOVIES_FOUND: &str = "No movies found.";

/// Fallback when the catalog signals an error without a message.
pub const FETCH_FAILED: &str = "Failed to fetch movies";

/// Message shown for transport and decoding failures.
pub const FETCH_ERROR: &str = "Error fetching movies. Try again later.";

/// State of the most recent catalog request.
///
/// Loading, result list and error message live in one enum so that
/// combinations such as "loading with an error set" cannot exist.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(MovieList),
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Terminal states are the ones a dispatch ends in.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    /// Current movie list; empty unless the state is `Success`.
    pub fn movies(&self) -> &[Movie] {
        match self {
            Self::Success(list) => list,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
