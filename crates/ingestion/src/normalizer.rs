//! Raw record normalization and chronological ordering.
//!
//! Turns untyped upstream records into canonical daily quotes. Records
//! without a usable date are dropped; malformed numbers become `None`.

use quotebar_core::{
    format_quote_date, parse_quote_date, DuplicatePolicy, Error, Interval, Quote, RawQuoteRecord,
    Result,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Statistics about normalization quality.
#[derive(Debug, Clone, Default)]
pub struct NormalizationStats {
    /// Total records seen.
    pub total_records: u64,
    /// Records turned into quotes.
    pub accepted: u64,
    /// Records dropped because the date was absent or empty.
    pub missing_date: u64,
    /// Records dropped because the date matched no accepted format.
    pub unparseable_date: u64,
    /// Numeric fields that were present but not coercible.
    pub malformed_values: u64,
}

impl NormalizationStats {
    /// Number of records dropped.
    pub fn dropped(&self) -> u64 {
        self.missing_date + self.unparseable_date
    }
}

/// Converts raw upstream records into canonical daily quotes.
#[derive(Debug, Default)]
pub struct QuoteNormalizer {
    stats: NormalizationStats,
}

impl QuoteNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a single record. Returns `None` if the record must be dropped.
    pub fn normalize(&mut self, record: &RawQuoteRecord) -> Option<Quote> {
        self.stats.total_records += 1;

        let date_text = match record.date.as_ref() {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Null) | None => {
                self.stats.missing_date += 1;
                debug!("dropping record without date");
                return None;
            }
            Some(Value::String(_)) => {
                self.stats.missing_date += 1;
                debug!("dropping record with empty date");
                return None;
            }
            Some(other) => {
                self.stats.unparseable_date += 1;
                debug!(date = %other, "dropping record with non-text date");
                return None;
            }
        };

        let Some(date) = parse_quote_date(date_text) else {
            self.stats.unparseable_date += 1;
            debug!(date = %date_text, "dropping record with unparseable date");
            return None;
        };

        let quote = Quote {
            date,
            code: coerce_text(record.code.as_ref()).unwrap_or_default(),
            open: self.number(record.open.as_ref()),
            high: self.number(record.high.as_ref()),
            low: self.number(record.low.as_ref()),
            close: self.number(record.close.as_ref()),
            volume: self.number(record.volume.as_ref()),
            turnover_value: self.number(record.turnover_value.as_ref()),
            interval: Interval::Daily,
        };

        self.stats.accepted += 1;
        Some(quote)
    }

    /// Normalize a batch of records, preserving input order.
    pub fn normalize_batch(&mut self, records: &[RawQuoteRecord]) -> Vec<Quote> {
        let quotes: Vec<Quote> = records.iter().filter_map(|r| self.normalize(r)).collect();
        debug!(
            total = records.len(),
            accepted = quotes.len(),
            "normalized raw quote records"
        );
        quotes
    }

    /// Get normalization statistics.
    pub fn stats(&self) -> &NormalizationStats {
        &self.stats
    }

    fn number(&mut self, value: Option<&Value>) -> Option<f64> {
        let parsed = coerce_number(value);
        if parsed.is_none() && value.is_some_and(|v| !is_blank(v)) {
            self.stats.malformed_values += 1;
        }
        parsed
    }
}

/// Coerce an untyped value to a finite number.
///
/// JSON numbers and numeric text are accepted; anything else is `None`.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Coerce an untyped value to text. Numbers are rendered, other kinds are `None`.
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Stable sort by date ascending. Equal dates keep their input order.
pub fn sort_chronologically(quotes: &mut [Quote]) {
    quotes.sort_by_key(|q| q.date);
}

/// Resolve equal dates in a sorted series according to `policy`.
pub fn apply_duplicate_policy(quotes: Vec<Quote>, policy: DuplicatePolicy) -> Result<Vec<Quote>> {
    match policy {
        DuplicatePolicy::Keep => Ok(quotes),
        DuplicatePolicy::Reject => {
            if let Some(pair) = quotes.windows(2).find(|w| w[0].date == w[1].date) {
                return Err(Error::DuplicateDate {
                    date: format_quote_date(pair[0].date),
                });
            }
            Ok(quotes)
        }
        DuplicatePolicy::LastWins => {
            let before = quotes.len();
            let mut deduped: Vec<Quote> = Vec::with_capacity(before);
            for quote in quotes {
                if deduped.last().is_some_and(|last| last.date == quote.date) {
                    deduped.pop();
                }
                deduped.push(quote);
            }
            if deduped.len() < before {
                warn!(
                    replaced = before - deduped.len(),
                    "duplicate quote dates resolved by keeping the last record"
                );
            }
            Ok(deduped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn raw(value: Value) -> RawQuoteRecord {
        serde_json::from_value(value).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_quote(date: NaiveDate, close: f64) -> Quote {
        Quote {
            date,
            code: "7203".into(),
            open: None,
            high: None,
            low: None,
            close: Some(close),
            volume: None,
            turnover_value: None,
            interval: Interval::Daily,
        }
    }

    #[test]
    fn test_normalize_full_record() {
        let mut normalizer = QuoteNormalizer::new();
        let quote = normalizer
            .normalize(&raw(json!({
                "Date": "2024-06-20",
                "Code": "72030",
                "Open": 2800.0,
                "High": "2850.5",
                "Low": 2790,
                "Close": "2830",
                "Volume": 1_200_000,
                "TurnoverValue": "3400000000"
            })))
            .unwrap();

        assert_eq!(quote.date, ymd(2024, 6, 20));
        assert_eq!(quote.code, "72030");
        assert_eq!(quote.open, Some(2800.0));
        assert_eq!(quote.high, Some(2850.5));
        assert_eq!(quote.low, Some(2790.0));
        assert_eq!(quote.close, Some(2830.0));
        assert_eq!(quote.volume, Some(1_200_000.0));
        assert_eq!(quote.turnover_value, Some(3_400_000_000.0));
        assert_eq!(quote.interval, Interval::Daily);
    }

    #[test]
    fn test_drops_bad_dates() {
        let mut normalizer = QuoteNormalizer::new();
        let records = vec![
            raw(json!({"Close": 1.0})),
            raw(json!({"Date": null, "Close": 1.0})),
            raw(json!({"Date": "", "Close": 1.0})),
            raw(json!({"Date": "2024/06/20", "Close": 1.0})),
            raw(json!({"Date": 20240620, "Close": 1.0})),
            raw(json!({"Date": "-2024-06-20", "Close": 1.0})),
            raw(json!({"Date": "20240621", "Close": 1.0})),
        ];

        let quotes = normalizer.normalize_batch(&records);

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].date, ymd(2024, 6, 21));
        let stats = normalizer.stats();
        assert_eq!(stats.total_records, 7);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.missing_date, 3);
        assert_eq!(stats.unparseable_date, 3);
        assert_eq!(stats.dropped(), 6);
    }

    #[test]
    fn test_malformed_numbers_become_missing_not_zero() {
        let mut normalizer = QuoteNormalizer::new();
        let quote = normalizer
            .normalize(&raw(json!({
                "Date": "2024-06-20",
                "Open": "n/a",
                "High": "",
                "Low": true,
                "Close": 0,
                "Volume": "NaN"
            })))
            .unwrap();

        assert_eq!(quote.open, None);
        assert_eq!(quote.high, None);
        assert_eq!(quote.low, None);
        assert_eq!(quote.close, Some(0.0));
        assert_eq!(quote.volume, None);
        assert_eq!(quote.turnover_value, None);
        assert_eq!(normalizer.stats().malformed_values, 3);
    }

    #[test]
    fn test_code_copied_as_text() {
        assert_eq!(coerce_text(Some(&json!("13010"))), Some("13010".into()));
        assert_eq!(coerce_text(Some(&json!(7203))), Some("7203".into()));
        assert_eq!(coerce_text(Some(&json!(null))), None);
        assert_eq!(coerce_text(None), None);
    }

    #[test]
    fn test_coerce_number_trims_text() {
        assert_eq!(coerce_number(Some(&json!(" 12.5 "))), Some(12.5));
        assert_eq!(coerce_number(Some(&json!("1e3"))), Some(1000.0));
        assert_eq!(coerce_number(Some(&json!("inf"))), None);
        assert_eq!(coerce_number(Some(&json!([1]))), None);
    }

    #[test]
    fn test_both_formats_sort_adjacently_in_declared_order() {
        let mut normalizer = QuoteNormalizer::new();
        let records = vec![
            raw(json!({"Date": "2024-06-21", "Close": 3.0})),
            raw(json!({"Date": "20240620", "Close": 1.0})),
            raw(json!({"Date": "2024-06-19", "Close": 0.5})),
            raw(json!({"Date": "2024-06-20", "Close": 2.0})),
        ];
        let mut quotes = normalizer.normalize_batch(&records);
        sort_chronologically(&mut quotes);

        let closes: Vec<f64> = quotes.iter().filter_map(|q| q.close).collect();
        assert_eq!(closes, vec![0.5, 1.0, 2.0, 3.0]);
        assert_eq!(quotes[1].date, quotes[2].date);
        assert_eq!(quotes[1].canonical_date(), "2024-06-20");
    }

    #[test]
    fn test_last_wins_policy() {
        let quotes = vec![
            make_quote(ymd(2024, 6, 19), 1.0),
            make_quote(ymd(2024, 6, 20), 2.0),
            make_quote(ymd(2024, 6, 20), 3.0),
            make_quote(ymd(2024, 6, 21), 4.0),
        ];
        let deduped = apply_duplicate_policy(quotes, DuplicatePolicy::LastWins).unwrap();

        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[1].close, Some(3.0));
        assert!(deduped.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_keep_policy() {
        let quotes = vec![
            make_quote(ymd(2024, 6, 20), 2.0),
            make_quote(ymd(2024, 6, 20), 3.0),
        ];
        let kept = apply_duplicate_policy(quotes, DuplicatePolicy::Keep).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_reject_policy() {
        let quotes = vec![
            make_quote(ymd(2024, 6, 20), 2.0),
            make_quote(ymd(2024, 6, 20), 3.0),
        ];
        let err = apply_duplicate_policy(quotes, DuplicatePolicy::Reject).unwrap_err();
        match err {
            Error::DuplicateDate { date } => assert_eq!(date, "2024-06-20"),
            other => panic!("unexpected error: {other}"),
        }

        let unique = vec![make_quote(ymd(2024, 6, 20), 2.0)];
        assert!(apply_duplicate_policy(unique, DuplicatePolicy::Reject).is_ok());
    }
}
