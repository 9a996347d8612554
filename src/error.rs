//! Error types for voter roll search.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! None of these are fatal: the session converts them into state or empty results.

use thiserror::Error;

/// Errors that can occur while fetching or parsing a snapshot.
#[derive(Error, Debug)]
pub enum LoadError {
    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Server returned an error status code
    #[error("Snapshot server error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Failed to read a local snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the snapshot JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Background fetch task failed
    #[error("Task join error: {0}")]
    Join(String),
}

/// Errors raised by the corpus store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CorpusError {
    /// Zero records were supplied
    #[error("Corpus is empty")]
    Empty,
}

/// Reasons a query is not searched at all.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Nothing left after trimming
    #[error("Query is empty")]
    Empty,

    /// Below the minimum searchable length
    #[error("Query too short: {actual} characters, need at least {min}")]
    TooShort { min: usize, actual: usize },
}

/// Errors that can occur while annotating matches.
#[derive(Error, Debug)]
pub enum HighlightError {
    /// The escaped query could not be compiled
    #[error("Highlight pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with LoadError
pub type LoadResult<T> = Result<T, LoadError>;

/// Convenience type alias for Results with CorpusError
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Convenience type alias for Results with QueryError
pub type QueryResult<T> = Result<T, QueryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CorpusError::Empty;
        assert_eq!(err.to_string(), "Corpus is empty");

        let err = ConfigError::MissingVar("VOTER_SNAPSHOT".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: VOTER_SNAPSHOT"
        );

        let err = QueryError::TooShort { min: 2, actual: 1 };
        assert_eq!(
            err.to_string(),
            "Query too short: 1 characters, need at least 2"
        );

        let err = LoadError::Timeout;
        assert_eq!(err.to_string(), "Request timeout");
    }

    #[test]
    fn test_status_error_variant() {
        let err = LoadError::Status {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: LoadError = parse_err.into();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
