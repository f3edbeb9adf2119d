//! End-to-end bar pipeline.
//!
//! normalize -> sort -> duplicate policy -> aggregate -> indicators.
//! Each run starts from scratch; nothing is shared between runs.

use crate::output::{serialize_bars, BarRecord};
use quotebar_core::{EngineConfig, EnrichedBar, Interval, RawQuoteRecord, Result};
use quotebar_features::IndicatorEngine;
use quotebar_ingestion::{
    aggregate_quotes, apply_duplicate_policy, sort_chronologically, QuoteNormalizer,
};
use tracing::{debug, info};

/// Batch transform from raw upstream records to enriched bars.
#[derive(Debug, Clone, Default)]
pub struct BarPipeline {
    config: EngineConfig,
}

impl BarPipeline {
    /// Create a pipeline from configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create a pipeline for `interval` with the default duplicate policy.
    pub fn for_interval(interval: Interval) -> Self {
        Self::new(EngineConfig {
            interval,
            ..EngineConfig::default()
        })
    }

    /// Pipeline configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the pipeline. Empty input yields an empty series.
    pub fn run(&self, records: &[RawQuoteRecord]) -> Result<Vec<EnrichedBar>> {
        let mut normalizer = QuoteNormalizer::new();
        let mut quotes = normalizer.normalize_batch(records);
        if quotes.is_empty() {
            debug!(records = records.len(), "no usable quotes");
            return Ok(Vec::new());
        }

        sort_chronologically(&mut quotes);
        let quotes = apply_duplicate_policy(quotes, self.config.duplicate_policy)?;
        let bars = aggregate_quotes(&quotes, self.config.interval);
        let enriched = IndicatorEngine::new().enrich(bars);

        info!(
            interval = %self.config.interval,
            records = records.len(),
            dropped = normalizer.stats().dropped(),
            malformed_values = normalizer.stats().malformed_values,
            bars = enriched.len(),
            "built bar series"
        );
        Ok(enriched)
    }

    /// Run the pipeline and project to response records.
    pub fn run_serialized(&self, records: &[RawQuoteRecord]) -> Result<Vec<BarRecord>> {
        Ok(serialize_bars(&self.run(records)?))
    }
}
