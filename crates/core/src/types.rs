//! Shared data types passed between the catalog, store and pipeline crates.

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog-assigned movie identifier.
pub type MovieId = i64;

/// A movie as returned by the catalog.
///
/// Only `id` and `poster_path` are interpreted; every other field the
/// upstream sends is kept verbatim in `extra` so the full object can be
/// handed back to clients untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Movie {
    /// Build a movie with no pass-through fields.
    pub fn new(id: MovieId, poster_path: Option<&str>) -> Self {
        Self {
            id,
            poster_path: poster_path.map(str::to_string),
            extra: serde_json::Map::new(),
        }
    }

    /// Title as reported by the catalog, if present.
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(|v| v.as_str())
    }
}

/// Ordered result list; replaced wholesale on every successful fetch.
pub type MovieList = Vec<Movie>;

/// Popularity counter stored per distinct search term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCountRecord {
    /// Store-assigned document identifier.
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: i64,
    pub movie_id: MovieId,
    /// The store reports an unset attribute as `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub poster_url: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Attributes of a counter record that does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSearchCount {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: i64,
    pub movie_id: MovieId,
    pub poster_url: String,
}

impl NewSearchCount {
    /// First occurrence of `term`, denormalizing the top movie's poster.
    pub fn first_occurrence(term: &str, top_movie: &Movie, image_base_url: &str) -> Self {
        Self {
            search_term: term.to_string(),
            count: 1,
            movie_id: top_movie.id,
            poster_url: poster_url(image_base_url, top_movie.poster_path.as_deref()),
        }
    }
}

/// Concatenate the image CDN base with a movie's poster path.
///
/// A movie without a poster yields an empty string.
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> String {
    match poster_path {
        Some(path) => format!("{image_base_url}{path}"),
        None => String::new(),
    }
}
