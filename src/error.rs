//! Error types for the Rexa library.
//!
//! Classification and extraction never fail on user input: an utterance that
//! matches nothing resolves to `none`, and fragments that cannot be parsed are
//! skipped. The errors below cover construction (taxonomy, configuration,
//! patterns) and I/O at the edges (configuration files, transaction stores).
//!
//! # Examples
//!
//! ```
//! use rexa::error::{RexaError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(RexaError::invalid_config("threshold must be within [0, 1]"))
//! }
//!
//! assert!(load().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Rexa operations.
#[derive(Error, Debug)]
pub enum RexaError {
    /// I/O errors (configuration and store files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Analysis-related errors (tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The intent taxonomy is malformed
    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    /// Invalid resolver or CLI configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A record failed validation at construction
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A transaction store lookup failed
    #[error("Store error: {0}")]
    Store(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with RexaError.
pub type Result<T> = std::result::Result<T, RexaError>;

impl RexaError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RexaError::Analysis(msg.into())
    }

    /// Create a new taxonomy error.
    pub fn taxonomy<S: Into<String>>(msg: S) -> Self {
        RexaError::Taxonomy(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        RexaError::InvalidConfig(msg.into())
    }

    /// Create a new invalid record error.
    pub fn invalid_record<S: Into<String>>(msg: S) -> Self {
        RexaError::InvalidRecord(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        RexaError::Store(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RexaError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = RexaError::taxonomy("duplicate intent 'atm_info'");
        assert_eq!(
            error.to_string(),
            "Taxonomy error: duplicate intent 'atm_info'"
        );

        let error = RexaError::invalid_config("threshold out of range");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: threshold out of range"
        );

        let error = RexaError::store("unknown account");
        assert_eq!(error.to_string(), "Store error: unknown account");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let rexa_error = RexaError::from(io_error);

        match rexa_error {
            RexaError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_error = regex::Regex::new("(unclosed").unwrap_err();
        let rexa_error = RexaError::from(regex_error);

        assert!(matches!(rexa_error, RexaError::Pattern(_)));
    }
}
