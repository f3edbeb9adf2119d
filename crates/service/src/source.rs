//! Upstream quote source boundary.
//!
//! Network retrieval and credential handling live behind [`QuoteSource`];
//! callers resolve them before the pipeline runs.

use crate::request::DailyQuotesRequest;
use quotebar_core::{RawListedRecord, RawQuoteRecord, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Supplier of raw upstream records.
pub trait QuoteSource {
    /// Raw daily records for one instrument and date range.
    fn fetch_daily_quotes(&self, request: &DailyQuotesRequest) -> Result<Vec<RawQuoteRecord>>;

    /// Raw listed-company records.
    fn fetch_listed_info(&self) -> Result<Vec<RawListedRecord>>;
}

impl<S: QuoteSource + ?Sized> QuoteSource for &S {
    fn fetch_daily_quotes(&self, request: &DailyQuotesRequest) -> Result<Vec<RawQuoteRecord>> {
        (**self).fetch_daily_quotes(request)
    }

    fn fetch_listed_info(&self) -> Result<Vec<RawListedRecord>> {
        (**self).fetch_listed_info()
    }
}

#[derive(Deserialize)]
struct DailyQuotesBody {
    #[serde(default)]
    daily_quotes: Option<Vec<RawQuoteRecord>>,
}

#[derive(Deserialize)]
struct ListedInfoBody {
    #[serde(default)]
    info: Option<Vec<RawListedRecord>>,
}

/// Parse a daily-quotes payload: a bare array, or a body with `daily_quotes`.
pub fn parse_daily_quotes(payload: &str) -> Result<Vec<RawQuoteRecord>> {
    parse_records(payload, |body: DailyQuotesBody| body.daily_quotes)
}

/// Parse a listed-info payload: a bare array, or a body with `info`.
pub fn parse_listed_info(payload: &str) -> Result<Vec<RawListedRecord>> {
    parse_records(payload, |body: ListedInfoBody| body.info)
}

fn parse_records<T, B>(payload: &str, extract: impl FnOnce(B) -> Option<Vec<T>>) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    B: DeserializeOwned,
{
    let value: Value = serde_json::from_str(payload)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }
    let body: B = serde_json::from_value(value)?;
    // A body without the array carries no records.
    Ok(extract(body).unwrap_or_default())
}

/// A source over recorded upstream response bodies.
#[derive(Debug, Clone, Default)]
pub struct JsonPayloadSource {
    daily_quotes: Vec<RawQuoteRecord>,
    listed: Vec<RawListedRecord>,
}

impl JsonPayloadSource {
    /// Create a source from already-parsed records.
    pub fn new(daily_quotes: Vec<RawQuoteRecord>, listed: Vec<RawListedRecord>) -> Self {
        Self {
            daily_quotes,
            listed,
        }
    }

    /// Create a source from a daily-quotes payload.
    pub fn from_daily_payload(payload: &str) -> Result<Self> {
        Ok(Self::new(parse_daily_quotes(payload)?, Vec::new()))
    }

    /// Create a source from a listed-info payload.
    pub fn from_listed_payload(payload: &str) -> Result<Self> {
        Ok(Self::new(Vec::new(), parse_listed_info(payload)?))
    }
}

impl QuoteSource for JsonPayloadSource {
    /// Returns the recorded records as-is; the recording already reflects the request.
    fn fetch_daily_quotes(&self, _request: &DailyQuotesRequest) -> Result<Vec<RawQuoteRecord>> {
        Ok(self.daily_quotes.clone())
    }

    fn fetch_listed_info(&self) -> Result<Vec<RawListedRecord>> {
        Ok(self.listed.clone())
    }
}
