//! Error types for the recollect crate.

use thiserror::Error;

/// Errors that can occur when compiling patterns or loading query definitions.
///
/// Path resolution and predicate evaluation never fail; only the operations
/// that build something from external input return this type.
#[derive(Debug, Error)]
pub enum RecollectError {
    /// A LIKE pattern could not be compiled into a matcher.
    #[error("invalid LIKE pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A JSON query definition or JSON collection could not be parsed.
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML query definition could not be parsed.
    #[error("invalid YAML input: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for recollect operations.
pub type Result<T> = std::result::Result<T, RecollectError>;
