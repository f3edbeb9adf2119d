//! Indicator computation for the quotebar system.
//!
//! This crate handles:
//! - Trailing simple moving averages with reset-on-gap
//! - Close-price (5/25/75) and volume (25) indicator annotation

pub mod moving_average;
pub mod engine;

pub use moving_average::RollingMean;
pub use engine::IndicatorEngine;
