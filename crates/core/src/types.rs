//! Core data types for the quotebar system.

use crate::error::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Window lengths of the close-price moving averages (ma5, ma25, ma75).
pub const CLOSE_MA_WINDOWS: [usize; 3] = [5, 25, 75];

/// Window length of the volume moving average.
pub const VOLUME_MA_WINDOW: usize = 25;

/// Accepted textual date formats, tried in order.
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Canonical output date format.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date in one of the accepted formats. The first format that parses wins.
pub fn parse_quote_date(text: &str) -> Option<NaiveDate> {
    // chrono tolerates a signed year and leading whitespace; neither format allows them.
    let bytes = text.as_bytes();
    if !bytes.first().is_some_and(u8::is_ascii_digit)
        || !bytes.last().is_some_and(u8::is_ascii_digit)
    {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Render a date in the canonical `YYYY-MM-DD` form.
#[inline]
pub fn format_quote_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Resampling granularity of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// One bar per trading day (no resampling).
    #[default]
    Daily,
    /// One bar per ISO-8601 week.
    Weekly,
    /// One bar per calendar month.
    Monthly,
}

impl Interval {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(Error::invalid_interval(value)),
        }
    }
}

/// A single daily price record as delivered by the upstream provider.
///
/// Every field is optional and untyped; numbers may arrive as JSON numbers
/// or as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQuoteRecord {
    /// Trading date, `YYYY-MM-DD` or `YYYYMMDD`.
    #[serde(rename = "Date", default)]
    pub date: Option<Value>,
    /// Instrument code.
    #[serde(rename = "Code", default)]
    pub code: Option<Value>,
    #[serde(rename = "Open", default)]
    pub open: Option<Value>,
    #[serde(rename = "High", default)]
    pub high: Option<Value>,
    #[serde(rename = "Low", default)]
    pub low: Option<Value>,
    #[serde(rename = "Close", default)]
    pub close: Option<Value>,
    #[serde(rename = "Volume", default)]
    pub volume: Option<Value>,
    /// Traded value for the day.
    #[serde(rename = "TurnoverValue", default)]
    pub turnover_value: Option<Value>,
}

/// Canonical quote: one daily record, or the OHLCV reduction of a bucket.
///
/// `None` means "not reported" and is distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Calendar date (last member date for aggregated bars).
    pub date: NaiveDate,
    /// Instrument code, copied through as opaque text.
    pub code: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub turnover_value: Option<f64>,
    /// Granularity this quote represents.
    pub interval: Interval,
}

impl Quote {
    /// Date in canonical `YYYY-MM-DD` form.
    pub fn canonical_date(&self) -> String {
        format_quote_date(self.date)
    }
}

/// Trailing simple moving averages attached to a bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// 5-bar SMA of close.
    pub ma5: Option<f64>,
    /// 25-bar SMA of close.
    pub ma25: Option<f64>,
    /// 75-bar SMA of close.
    pub ma75: Option<f64>,
    /// 25-bar SMA of volume.
    pub volume_ma25: Option<f64>,
}

/// An aggregated bar annotated with indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    pub quote: Quote,
    pub indicators: Indicators,
}

impl EnrichedBar {
    /// Wrap a bar with no indicators computed yet.
    pub fn new(quote: Quote) -> Self {
        Self {
            quote,
            indicators: Indicators::default(),
        }
    }
}

impl From<Quote> for EnrichedBar {
    fn from(quote: Quote) -> Self {
        Self::new(quote)
    }
}

/// A listed-company record as delivered by the upstream provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawListedRecord {
    #[serde(rename = "Code", default)]
    pub code: Option<Value>,
    #[serde(rename = "CompanyName", default)]
    pub company_name: Option<Value>,
    #[serde(rename = "MarketCodeName", default)]
    pub market_code_name: Option<Value>,
    #[serde(rename = "Sector17CodeName", default)]
    pub sector17_code_name: Option<Value>,
}

/// Normalized listed-company entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedStock {
    pub code: String,
    pub name: Option<String>,
    pub market: Option<String>,
    pub industry: Option<String>,
}

/// Listed-company directory response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDirectory {
    pub count: usize,
    pub items: Vec<ListedStock>,
}

impl StockDirectory {
    pub fn new(items: Vec<ListedStock>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}
