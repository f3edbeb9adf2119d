//! Validated daily-quote requests.

use chrono::NaiveDate;
use quotebar_core::{parse_quote_date, Error, Interval, RequestConfig, Result};

/// Upstream query date format.
const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// A validated request for one instrument's bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyQuotesRequest {
    /// Instrument code.
    pub code: String,
    /// First date (inclusive).
    pub from_date: NaiveDate,
    /// Last date (inclusive).
    pub to_date: NaiveDate,
    /// Target bar granularity.
    pub interval: Interval,
}

impl DailyQuotesRequest {
    /// Build a request from typed parts.
    pub fn new(
        code: impl Into<String>,
        from_date: NaiveDate,
        to_date: NaiveDate,
        interval: Interval,
    ) -> Result<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(Error::config("instrument code must not be empty"));
        }
        if from_date > to_date {
            return Err(Error::InvalidRange {
                from: from_date.to_string(),
                to: to_date.to_string(),
            });
        }
        Ok(Self {
            code,
            from_date,
            to_date,
            interval,
        })
    }

    /// Build a request from textual parameters.
    pub fn parse(code: &str, from_date: &str, to_date: &str, interval: &str) -> Result<Self> {
        let from = parse_quote_date(from_date).ok_or_else(|| Error::invalid_date(from_date))?;
        let to = parse_quote_date(to_date).ok_or_else(|| Error::invalid_date(to_date))?;
        Self::new(code, from, to, interval.parse()?)
    }

    /// Build a request, taking omitted parameters from configuration.
    pub fn with_defaults(
        code: &str,
        from_date: Option<&str>,
        to_date: Option<&str>,
        interval: Option<&str>,
        defaults: &RequestConfig,
    ) -> Result<Self> {
        Self::parse(
            code,
            from_date.unwrap_or(defaults.from_date.as_str()),
            to_date.unwrap_or(defaults.to_date.as_str()),
            interval.unwrap_or(Interval::default().as_str()),
        )
    }

    /// Query string for the upstream daily-quotes endpoint.
    pub fn query_string(&self) -> String {
        format!(
            "code={}&from={}&to={}",
            self.code,
            self.from_date.format(QUERY_DATE_FORMAT),
            self.to_date.format(QUERY_DATE_FORMAT)
        )
    }
}
