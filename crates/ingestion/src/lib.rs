//! Data ingestion and normalization for the quotebar system.
//!
//! This crate handles:
//! - Raw record normalization (tolerant dates, numeric coercion)
//! - Chronological ordering and duplicate-date resolution
//! - Weekly/monthly bar building
//! - Listed-company record normalization

pub mod normalizer;
pub mod bar_builder;
pub mod listing;

pub use normalizer::{
    apply_duplicate_policy, coerce_number, coerce_text, sort_chronologically, NormalizationStats,
    QuoteNormalizer,
};
pub use bar_builder::{aggregate_quotes, BarBuilder, BucketKey};
pub use listing::{build_directory, normalize_listed};
