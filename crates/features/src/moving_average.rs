//! Trailing simple moving average.
//!
//! Averages the last `window` observations. A missing observation clears the
//! window, so the average only reappears after `window` fresh values.

use std::collections::VecDeque;

/// Fixed-capacity trailing mean with reset-on-gap.
#[derive(Debug, Clone)]
pub struct RollingMean {
    /// Window size in bars.
    window: usize,
    /// Most recent observations, oldest first.
    values: VecDeque<f64>,
}

impl RollingMean {
    /// Create a new rolling mean over `window` bars.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Add an observation and return the current mean.
    ///
    /// `None` clears the window and yields `None`.
    pub fn update(&mut self, value: Option<f64>) -> Option<f64> {
        match value {
            Some(v) => {
                self.push(v);
                self.mean()
            }
            None => {
                self.clear();
                None
            }
        }
    }

    fn push(&mut self, value: f64) {
        if self.values.len() >= self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Mean of the window, only once it holds exactly `window` values.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        // Recomputed from the window contents, no running total.
        let sum: f64 = self.values.iter().sum();
        Some(sum / self.window as f64)
    }

    /// Check if the window is full.
    pub fn is_ready(&self) -> bool {
        self.window > 0 && self.values.len() == self.window
    }

    /// Get the number of observations held.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
