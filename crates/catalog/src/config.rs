use std::time::Duration;

use reel_core::config;
use reel_core::error::CoreError;

/// Default TMDB v3 API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default image CDN prefix for `w500` posters.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the movie catalog.
#[derive(Clone)]
pub struct CatalogConfig {
    /// API root without a trailing slash.
    pub api_base_url: String,
    /// Bearer token (TMDB "API read access token").
    pub api_key: String,
    /// Prefix prepended to `poster_path` values.
    pub image_base_url: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"<redacted>")
            .field("image_base_url", &self.image_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl CatalogConfig {
    /// Build a config with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: api_key.into(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Load catalog configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default                            |
    /// |-----------------------------|----------|------------------------------------|
    /// | `TMDB_API_KEY`              | **yes**  | --                                 |
    /// | `TMDB_API_BASE_URL`         | no       | `https://api.themoviedb.org/3`     |
    /// | `TMDB_IMAGE_BASE_URL`       | no       | `https://image.tmdb.org/t/p/w500`  |
    /// | `REEL_REQUEST_TIMEOUT_SECS` | no       | `10`                               |
    pub fn from_env() -> Result<Self, CoreError> {
        let api_key = config::required("TMDB_API_KEY")?;
        let api_base_url = config::or_default("TMDB_API_BASE_URL", DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let image_base_url = config::or_default("TMDB_IMAGE_BASE_URL", DEFAULT_IMAGE_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let timeout_secs =
            config::parsed_or("REEL_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url,
            api_key,
            image_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
