//! Configuration structures for the quotebar system.

use crate::error::{Error, Result};
use crate::types::{parse_quote_date, Interval};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Aggregation engine configuration.
    pub engine: EngineConfig,
    /// Default request window.
    pub request: RequestConfig,
}

impl Config {
    /// Parse configuration from JSON text. Missing sections use defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let from = parse_quote_date(&self.request.from_date).ok_or_else(|| {
            Error::config(format!("request.from_date {:?} is not a date", self.request.from_date))
        })?;
        let to = parse_quote_date(&self.request.to_date).ok_or_else(|| {
            Error::config(format!("request.to_date {:?} is not a date", self.request.to_date))
        })?;
        if from > to {
            return Err(Error::config(format!(
                "request.from_date {} is after request.to_date {}",
                self.request.from_date, self.request.to_date
            )));
        }
        Ok(())
    }
}

/// What to do when two daily quotes share a date after sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep only the last record (in declared order) for each date.
    #[default]
    LastWins,
    /// Keep every record.
    Keep,
    /// Fail the request.
    Reject,
}

/// Aggregation engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Target bar granularity.
    pub interval: Interval,
    /// Duplicate-date handling.
    pub duplicate_policy: DuplicatePolicy,
}

/// Default upstream request window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// First date requested (inclusive).
    pub from_date: String,
    /// Last date requested (inclusive).
    pub to_date: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            from_date: "20240620".to_string(),
            to_date: "20250620".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.interval, Interval::Daily);
        assert_eq!(config.engine.duplicate_policy, DuplicatePolicy::LastWins);
        assert_eq!(config.request.from_date, "20240620");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json_str(r#"{"engine": {"interval": "weekly"}}"#).unwrap();
        assert_eq!(config.engine.interval, Interval::Weekly);
        assert_eq!(config.engine.duplicate_policy, DuplicatePolicy::LastWins);
        assert_eq!(config.request.to_date, "20250620");
    }

    #[test]
    fn test_duplicate_policy_names() {
        let config =
            Config::from_json_str(r#"{"engine": {"duplicate_policy": "reject"}}"#).unwrap();
        assert_eq!(config.engine.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_rejects_unknown_interval() {
        let err = Config::from_json_str(r#"{"engine": {"interval": "hourly"}}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = Config::from_json_str(
            r#"{"request": {"from_date": "2025-01-01", "to_date": "2024-01-01"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
