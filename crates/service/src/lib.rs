//! Bar series service for the quotebar system.
//!
//! This crate provides:
//! - The end-to-end bar pipeline
//! - Response projection of enriched bars
//! - Request validation
//! - The upstream quote source boundary

pub mod output;
pub mod pipeline;
pub mod request;
pub mod service;
pub mod source;

pub use output::{serialize_bars, to_json, BarRecord};
pub use pipeline::BarPipeline;
pub use request::DailyQuotesRequest;
pub use service::DailyQuoteService;
pub use source::{parse_daily_quotes, parse_listed_info, JsonPayloadSource, QuoteSource};
