//! Error types for the quotebar system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the quotebar system.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interval selector outside `daily|weekly|monthly`.
    #[error("Invalid interval: {value:?} (expected daily, weekly or monthly)")]
    InvalidInterval { value: String },

    /// Request date in neither accepted format.
    #[error("Invalid date: {value:?} (expected YYYY-MM-DD or YYYYMMDD)")]
    InvalidDate { value: String },

    /// Request range with `from` after `to`.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: String, to: String },

    /// Two daily quotes share a date and the policy rejects duplicates.
    #[error("Duplicate quote date: {date}")]
    DuplicateDate { date: String },

    /// Upstream quote source failure.
    #[error("Source error: {0}")]
    Source(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid interval error.
    pub fn invalid_interval(value: impl Into<String>) -> Self {
        Error::InvalidInterval {
            value: value.into(),
        }
    }

    /// Create an invalid date error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Error::InvalidDate {
            value: value.into(),
        }
    }

    /// Create a source error.
    pub fn source(msg: impl Into<String>) -> Self {
        Error::Source(msg.into())
    }

    /// Whether the error stems from caller input rather than processing.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::InvalidInterval { .. }
                | Error::InvalidDate { .. }
                | Error::InvalidRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(Error::invalid_interval("hourly").is_validation());
        assert!(Error::invalid_date("2024/01/01").is_validation());
        assert!(!Error::source("upstream down").is_validation());
        assert!(!Error::DuplicateDate {
            date: "2024-01-01".into()
        }
        .is_validation());
    }

    #[test]
    fn test_display() {
        let err = Error::invalid_interval("hourly");
        assert_eq!(
            err.to_string(),
            "Invalid interval: \"hourly\" (expected daily, weekly or monthly)"
        );
    }
}
