//! Core types and configuration for the quotebar system.
//!
//! This crate provides shared types used across all other crates:
//! - Raw upstream records and canonical daily quotes
//! - Resampling intervals and indicator-enriched bars
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, DuplicatePolicy, EngineConfig, RequestConfig};
pub use error::{Error, Result};
pub use types::*;
