//! Endpoint selection for catalog queries.

/// Which catalog endpoint a term maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Generally popular movies, used when no term is given.
    Discover,
    /// Title search for a non-empty term.
    Search(String),
}

impl CatalogRequest {
    /// Empty terms select discovery mode; anything else is a search.
    pub fn for_term(term: &str) -> Self {
        if term.is_empty() {
            Self::Discover
        } else {
            Self::Search(term.to_string())
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search(_))
    }

    /// Path and query string relative to the API root.
    ///
    /// ```
    /// use reel_catalog::request::CatalogRequest;
    /// assert_eq!(
    ///     CatalogRequest::for_term("").path_and_query(),
    ///     "/discover/movie?sort_by=popularity.desc"
    /// );
    /// assert_eq!(
    ///     CatalogRequest::for_term("star wars").path_and_query(),
    ///     "/search/movie?query=star%20wars"
    /// );
    /// ```
    pub fn path_and_query(&self) -> String {
        match self {
            Self::Discover => "/discover/movie?sort_by=popularity.desc".to_string(),
            Self::Search(term) => format!("/search/movie?query={}", urlencoding::encode(term)),
        }
    }

    /// Absolute URL under `api_base_url`.
    pub fn url(&self, api_base_url: &str) -> String {
        format!(
            "{}{}",
            api_base_url.trim_end_matches('/'),
            self.path_and_query()
        )
    }
}
