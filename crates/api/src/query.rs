//! Query parameter types for API handlers.

use serde::Deserialize;

/// Upper bound for `?limit=` on the trending endpoint.
pub const MAX_TRENDING_LIMIT: usize = 20;

/// `?query=` for the movie search endpoint. Absent means discovery.
#[derive(Debug, Default, Deserialize)]
pub struct MovieSearchParams {
    #[serde(default)]
    pub query: String,
}

/// `?limit=` for the trending endpoint.
#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub limit: Option<usize>,
}

impl TrendingParams {
    /// Resolve the requested limit, clamped to `1..=MAX_TRENDING_LIMIT`.
    pub fn resolve(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_TRENDING_LIMIT)
    }
}
