//! Response projection of enriched bars.
//!
//! Drops internal fields and renders dates as `YYYY-MM-DD`, using the
//! upstream's field names.

use quotebar_core::{EnrichedBar, Interval, Result};
use serde::{Deserialize, Serialize};

/// Externally visible bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Open")]
    pub open: Option<f64>,
    #[serde(rename = "High")]
    pub high: Option<f64>,
    #[serde(rename = "Low")]
    pub low: Option<f64>,
    #[serde(rename = "Close")]
    pub close: Option<f64>,
    #[serde(rename = "Volume")]
    pub volume: Option<f64>,
    #[serde(rename = "TurnoverValue")]
    pub turnover_value: Option<f64>,
    pub interval: Interval,
    pub ma5: Option<f64>,
    pub ma25: Option<f64>,
    pub ma75: Option<f64>,
    pub volume_ma25: Option<f64>,
}

impl From<&EnrichedBar> for BarRecord {
    fn from(bar: &EnrichedBar) -> Self {
        let quote = &bar.quote;
        Self {
            date: quote.canonical_date(),
            code: quote.code.clone(),
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
            turnover_value: quote.turnover_value,
            interval: quote.interval,
            ma5: bar.indicators.ma5,
            ma25: bar.indicators.ma25,
            ma75: bar.indicators.ma75,
            volume_ma25: bar.indicators.volume_ma25,
        }
    }
}

/// Project bars to their response form, preserving order.
pub fn serialize_bars(bars: &[EnrichedBar]) -> Vec<BarRecord> {
    bars.iter().map(BarRecord::from).collect()
}

/// Render any serializable response as JSON text.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
