//! Error types for rs-readability.
//!
//! Only a parse failure aborts an extraction. Everything the heuristics
//! cannot decide is resolved locally and, at most, reported as a warning.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// The configured base URL is not an absolute http(s) URL.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// A keyword pattern supplied in the options does not compile.
    #[error("Invalid keyword pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
