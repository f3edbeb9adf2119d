//! Indicator computation engine.
//!
//! Annotates an ordered bar series with trailing moving averages of close
//! (5/25/75 bars) and volume (25 bars) in a single left-to-right pass.

use crate::moving_average::RollingMean;
use quotebar_core::{EnrichedBar, Indicators, Quote, CLOSE_MA_WINDOWS, VOLUME_MA_WINDOW};
use tracing::debug;

/// Indicator computation engine.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    /// Close-price windows, in `CLOSE_MA_WINDOWS` order.
    close_windows: [RollingMean; 3],
    /// Volume window.
    volume_window: RollingMean,
}

impl IndicatorEngine {
    /// Create an engine with the fixed window lengths.
    pub fn new() -> Self {
        Self {
            close_windows: CLOSE_MA_WINDOWS.map(RollingMean::new),
            volume_window: RollingMean::new(VOLUME_MA_WINDOW),
        }
    }

    /// Feed the next bar and return its indicators.
    ///
    /// Only this bar and earlier ones contribute.
    pub fn update(&mut self, quote: &Quote) -> Indicators {
        let [ma5, ma25, ma75] = self
            .close_windows
            .each_mut()
            .map(|window| window.update(quote.close));
        let volume_ma25 = self.volume_window.update(quote.volume);

        Indicators {
            ma5,
            ma25,
            ma75,
            volume_ma25,
        }
    }

    /// Annotate bars in place, in order.
    pub fn apply(&mut self, bars: &mut [EnrichedBar]) {
        for bar in bars.iter_mut() {
            bar.indicators = self.update(&bar.quote);
        }
        debug!(bars = bars.len(), "computed moving averages");
    }

    /// Wrap and annotate an ordered bar series.
    pub fn enrich(&mut self, quotes: Vec<Quote>) -> Vec<EnrichedBar> {
        let mut bars: Vec<EnrichedBar> = quotes.into_iter().map(EnrichedBar::new).collect();
        self.apply(&mut bars);
        bars
    }

    /// Check if every window is full.
    pub fn is_ready(&self) -> bool {
        self.close_windows.iter().all(RollingMean::is_ready) && self.volume_window.is_ready()
    }

    /// Clear all state.
    pub fn clear(&mut self) {
        for window in &mut self.close_windows {
            window.clear();
        }
        self.volume_window.clear();
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}
