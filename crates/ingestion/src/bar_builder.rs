//! Calendar bucket bar building from daily quotes.
//!
//! Resamples an ascending daily series into weekly (ISO-8601) or monthly
//! OHLCV bars. Buckets are contiguous runs of equal keys.

use chrono::{Datelike, NaiveDate};
use ordered_float::OrderedFloat;
use quotebar_core::{Interval, Quote};
use tracing::debug;

/// Grouping key of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// ISO-8601 week-numbering year and week number.
    IsoWeek { year: i32, week: u32 },
    /// Calendar year and month.
    Month { year: i32, month: u32 },
}

impl BucketKey {
    /// Key for `date` at `interval`. Daily bars have no bucket.
    pub fn for_date(date: NaiveDate, interval: Interval) -> Option<Self> {
        match interval {
            Interval::Daily => None,
            Interval::Weekly => {
                let iso = date.iso_week();
                Some(BucketKey::IsoWeek {
                    year: iso.year(),
                    week: iso.week(),
                })
            }
            Interval::Monthly => Some(BucketKey::Month {
                year: date.year(),
                month: date.month(),
            }),
        }
    }
}

/// A bar that's currently being built.
#[derive(Debug, Clone)]
struct BarInProgress {
    key: BucketKey,
    date: NaiveDate,
    code: String,
    open: Option<f64>,
    high: Option<OrderedFloat<f64>>,
    low: Option<OrderedFloat<f64>>,
    close: Option<f64>,
    volume: f64,
    turnover_value: f64,
    member_count: usize,
}

impl BarInProgress {
    fn new(key: BucketKey, first: &Quote) -> Self {
        Self {
            key,
            date: first.date,
            code: first.code.clone(),
            open: None,
            high: None,
            low: None,
            close: None,
            volume: 0.0,
            turnover_value: 0.0,
            member_count: 0,
        }
    }

    fn add_quote(&mut self, quote: &Quote) {
        // Earliest present open, latest present close.
        if self.open.is_none() {
            self.open = quote.open;
        }
        if quote.close.is_some() {
            self.close = quote.close;
        }
        self.high = combine(self.high, quote.high, std::cmp::max);
        self.low = combine(self.low, quote.low, std::cmp::min);
        self.volume += quote.volume.unwrap_or(0.0);
        self.turnover_value += quote.turnover_value.unwrap_or(0.0);
        self.date = quote.date;
        self.code.clone_from(&quote.code);
        self.member_count += 1;
    }

    fn to_bar(&self, interval: Interval) -> Quote {
        Quote {
            date: self.date,
            code: self.code.clone(),
            open: self.open,
            high: self.high.map(OrderedFloat::into_inner),
            low: self.low.map(OrderedFloat::into_inner),
            close: self.close,
            volume: Some(self.volume),
            turnover_value: Some(self.turnover_value),
            interval,
        }
    }
}

fn combine(
    current: Option<OrderedFloat<f64>>,
    value: Option<f64>,
    pick: fn(OrderedFloat<f64>, OrderedFloat<f64>) -> OrderedFloat<f64>,
) -> Option<OrderedFloat<f64>> {
    match (current, value.map(OrderedFloat)) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, b) => a.or(b),
    }
}

/// Builder for interval bars from an ascending daily quote stream.
pub struct BarBuilder {
    /// Target interval.
    interval: Interval,
    /// Bucket currently being filled.
    current: Option<BarInProgress>,
    /// Finished bars in emission order.
    completed: Vec<Quote>,
}

impl BarBuilder {
    /// Create a new bar builder.
    pub fn new(interval: Interval) -> Self {
        Self {
            interval,
            current: None,
            completed: Vec::new(),
        }
    }

    /// Add the next daily quote.
    ///
    /// A new bucket starts whenever the key differs from the previous
    /// quote's key. A key that recurs after a different one opens a
    /// second bucket.
    pub fn add_quote(&mut self, quote: &Quote) {
        let Some(key) = BucketKey::for_date(quote.date, self.interval) else {
            self.completed.push(quote.clone());
            return;
        };

        if self.current.as_ref().is_some_and(|bar| bar.key != key) {
            self.flush();
        }

        self.current
            .get_or_insert_with(|| BarInProgress::new(key, quote))
            .add_quote(quote);
    }

    /// Add multiple quotes.
    pub fn add_quotes(&mut self, quotes: &[Quote]) {
        for quote in quotes {
            self.add_quote(quote);
        }
    }

    fn flush(&mut self) {
        if let Some(bar) = self.current.take() {
            self.completed.push(bar.to_bar(self.interval));
        }
    }

    /// Number of quotes in the bucket still being filled.
    pub fn pending_member_count(&self) -> usize {
        self.current.as_ref().map_or(0, |bar| bar.member_count)
    }

    /// Close the open bucket and return all bars.
    pub fn finish(mut self) -> Vec<Quote> {
        self.flush();
        debug!(
            interval = %self.interval,
            bars = self.completed.len(),
            "built interval bars"
        );
        self.completed
    }

    /// Clear all state.
    pub fn clear(&mut self) {
        self.current = None;
        self.completed.clear();
    }
}

/// Resample an ascending daily series into `interval` bars.
///
/// Daily is the identity (each quote cloned).
pub fn aggregate_quotes(quotes: &[Quote], interval: Interval) -> Vec<Quote> {
    let mut builder = BarBuilder::new(interval);
    builder.add_quotes(quotes);
    builder.finish()
}
