//! Request-level composition of a quote source and the bar pipeline.

use crate::output::BarRecord;
use crate::pipeline::BarPipeline;
use crate::request::DailyQuotesRequest;
use crate::source::QuoteSource;
use quotebar_core::{Config, EngineConfig, Result, StockDirectory};
use quotebar_ingestion::build_directory;
use tracing::debug;

/// Serves bar series and the listed-company directory from a [`QuoteSource`].
pub struct DailyQuoteService<S> {
    source: S,
    config: Config,
}

impl<S: QuoteSource> DailyQuoteService<S> {
    /// Create a service over `source`.
    pub fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    /// Service configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate textual request parameters, filling omitted ones from configuration.
    pub fn request(
        &self,
        code: &str,
        from_date: Option<&str>,
        to_date: Option<&str>,
        interval: Option<&str>,
    ) -> Result<DailyQuotesRequest> {
        let interval = interval.unwrap_or(self.config.engine.interval.as_str());
        DailyQuotesRequest::with_defaults(
            code,
            from_date,
            to_date,
            Some(interval),
            &self.config.request,
        )
    }

    /// Fetch and build the bar series for `request`.
    pub fn daily_bars(&self, request: &DailyQuotesRequest) -> Result<Vec<BarRecord>> {
        let records = self.source.fetch_daily_quotes(request)?;
        debug!(
            code = %request.code,
            records = records.len(),
            "fetched daily quotes"
        );
        let pipeline = BarPipeline::new(EngineConfig {
            interval: request.interval,
            duplicate_policy: self.config.engine.duplicate_policy,
        });
        pipeline.run_serialized(&records)
    }

    /// Fetch and normalize the listed-company directory.
    pub fn listed_stocks(&self) -> Result<StockDirectory> {
        let records = self.source.fetch_listed_info()?;
        Ok(build_directory(&records))
    }
}
