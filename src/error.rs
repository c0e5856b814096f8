use std::path::PathBuf;
use thiserror::Error;

/// Application error types
///
/// The estimation engine itself is infallible; these only arise while
/// loading configuration or pricing data, or parsing user-supplied keys.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pricing table failed validation or could not be parsed
    #[error("Invalid pricing table: {0}")]
    InvalidPricing(String),

    /// A tier or service key that is not part of the closed set
    #[error("Unknown {kind}: '{value}' (expected one of: {expected})")]
    UnknownValue {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// File could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
