/// Domain-level errors shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required environment variable is missing or empty.
    #[error("Configuration error: {name} must be set")]
    MissingConfig { name: &'static str },

    /// An environment variable is present but cannot be parsed.
    #[error("Configuration error: {name} is invalid ({reason})")]
    InvalidConfig { name: &'static str, reason: String },
}
