//! Environment lookup helpers used by every `from_env` constructor.
//!
//! Required variables fail fast with a [`CoreError::MissingConfig`] that
//! names the variable, so a missing credential is reported at startup
//! instead of surfacing later as an opaque authorization failure.

use std::str::FromStr;

use crate::error::CoreError;

/// Read a required, non-empty environment variable.
pub fn required(name: &'static str) -> Result<String, CoreError> {
    required_from(name, std::env::var(name).ok())
}

/// Read an optional environment variable, falling back to `default`.
pub fn or_default(name: &'static str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read an optional, non-empty environment variable.
pub fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse an optional environment variable, falling back to `default`.
pub fn parsed_or<T>(name: &'static str, default: T) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(name, std::env::var(name).ok(), default)
}

fn required_from(name: &'static str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::MissingConfig { name }),
    }
}

fn parse_value<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| CoreError::InvalidConfig {
            name,
            reason: e.to_string(),
        }),
    }
}
