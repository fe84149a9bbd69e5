//! Catalog response payloads and their classification.

use reel_core::types::MovieList;
use serde::Deserialize;

/// Body of a catalog list response.
///
/// Besides the `results` list, two error-signalling shapes are recognised:
/// the legacy `{"Response": "False", "Error": "..."}` form and TMDB's own
/// `{"success": false, "status_message": "..."}` form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub results: Option<MovieList>,
    #[serde(rename = "Response", default)]
    pub response_flag: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// What a well-formed catalog page means for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// At least one movie, in upstream ranking order.
    Movies(MovieList),
    /// The query matched nothing.
    Empty,
    /// The payload signalled an error, with the upstream message if any.
    Failed(Option<String>),
}

impl CatalogPage {
    /// A page holding the given movies and nothing else.
    pub fn with_results(results: MovieList) -> Self {
        Self {
            results: Some(results),
            ..Self::default()
        }
    }

    /// Whether the payload carries an explicit error marker.
    pub fn signals_error(&self) -> bool {
        self.response_flag.as_deref() == Some("False") || self.success == Some(false)
    }

    /// Classify the page into movies, no match, or an upstream error.
    pub fn classify(self) -> PageOutcome {
        if self.signals_error() {
            let message = self
                .error
                .or(self.status_message)
                .filter(|m| !m.trim().is_empty());
            return PageOutcome::Failed(message);
        }

        match self.results {
            Some(results) if !results.is_empty() => PageOutcome::Movies(results),
            _ => PageOutcome::Empty,
        }
    }
}
