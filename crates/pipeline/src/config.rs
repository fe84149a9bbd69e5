use std::time::Duration;

use reel_catalog::config::DEFAULT_IMAGE_BASE_URL;
use reel_core::config;
use reel_core::debounce::DEFAULT_QUIET_PERIOD;
use reel_core::error::CoreError;

use crate::trending::DEFAULT_TRENDING_LIMIT;

/// Tuning for search sessions.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Quiet period before a typed value is searched.
    pub debounce: Duration,
    /// Number of trending searches loaded per session.
    pub trending_limit: usize,
    /// Prefix for denormalized poster URLs.
    pub image_base_url: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_QUIET_PERIOD,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load pipeline tuning from environment variables.
    ///
    /// | Env Var               | Default                           |
    /// |-----------------------|-----------------------------------|
    /// | `REEL_DEBOUNCE_MS`    | `500`                             |
    /// | `REEL_TRENDING_LIMIT` | `5`                               |
    /// | `TMDB_IMAGE_BASE_URL` | `https://image.tmdb.org/t/p/w500` |
    pub fn from_env() -> Result<Self, CoreError> {
        let debounce_ms =
            config::parsed_or("REEL_DEBOUNCE_MS", DEFAULT_QUIET_PERIOD.as_millis() as u64)?;
        let trending_limit: usize =
            config::parsed_or("REEL_TRENDING_LIMIT", DEFAULT_TRENDING_LIMIT)?;
        if trending_limit == 0 {
            return Err(CoreError::InvalidConfig {
                name: "REEL_TRENDING_LIMIT",
                reason: "must be at least 1".into(),
            });
        }
        let image_base_url = config::or_default("TMDB_IMAGE_BASE_URL", DEFAULT_IMAGE_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            debounce: Duration::from_millis(debounce_ms),
            trending_limit,
            image_base_url,
        })
    }
}
