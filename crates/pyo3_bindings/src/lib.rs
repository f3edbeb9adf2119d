//! PyO3 bindings for the quotebar bar pipeline.
//!
//! Exposes the Rust pipeline to the Python web layer:
//! - Raw payload to enriched bar series
//! - Listed-company normalization

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use quotebar_core::{EngineConfig, Error as RustError, Interval, ListedStock as RustListedStock};
use quotebar_ingestion::build_directory;
use quotebar_service::{parse_daily_quotes, parse_listed_info, to_json, BarPipeline, BarRecord};

fn to_py_err(err: RustError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn run_pipeline(payload: &str, interval: &str) -> Result<Vec<BarRecord>, RustError> {
    let interval: Interval = interval.parse()?;
    let records = parse_daily_quotes(payload)?;
    BarPipeline::new(EngineConfig {
        interval,
        ..EngineConfig::default()
    })
    .run_serialized(&records)
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// An enriched price bar.
#[pyclass]
#[derive(Clone)]
pub struct Bar {
    #[pyo3(get)]
    pub date: String,
    #[pyo3(get)]
    pub code: String,
    #[pyo3(get)]
    pub open: Option<f64>,
    #[pyo3(get)]
    pub high: Option<f64>,
    #[pyo3(get)]
    pub low: Option<f64>,
    #[pyo3(get)]
    pub close: Option<f64>,
    #[pyo3(get)]
    pub volume: Option<f64>,
    #[pyo3(get)]
    pub turnover_value: Option<f64>,
    #[pyo3(get)]
    pub interval: String,
    #[pyo3(get)]
    pub ma5: Option<f64>,
    #[pyo3(get)]
    pub ma25: Option<f64>,
    #[pyo3(get)]
    pub ma75: Option<f64>,
    #[pyo3(get)]
    pub volume_ma25: Option<f64>,
}

#[pymethods]
impl Bar {
    fn __repr__(&self) -> String {
        format!(
            "Bar(date={}, code={}, interval={}, close={:?}, ma5={:?})",
            self.date, self.code, self.interval, self.close, self.ma5
        )
    }
}

impl From<BarRecord> for Bar {
    fn from(b: BarRecord) -> Self {
        Bar {
            date: b.date,
            code: b.code,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: b.volume,
            turnover_value: b.turnover_value,
            interval: b.interval.to_string(),
            ma5: b.ma5,
            ma25: b.ma25,
            ma75: b.ma75,
            volume_ma25: b.volume_ma25,
        }
    }
}

/// A listed company.
#[pyclass]
#[derive(Clone)]
pub struct ListedStock {
    #[pyo3(get)]
    pub code: String,
    #[pyo3(get)]
    pub name: Option<String>,
    #[pyo3(get)]
    pub market: Option<String>,
    #[pyo3(get)]
    pub industry: Option<String>,
}

#[pymethods]
impl ListedStock {
    fn __repr__(&self) -> String {
        format!("ListedStock(code={}, name={:?})", self.code, self.name)
    }
}

impl From<RustListedStock> for ListedStock {
    fn from(s: RustListedStock) -> Self {
        ListedStock {
            code: s.code,
            name: s.name,
            market: s.market,
            industry: s.industry,
        }
    }
}

// ============================================================================
// Python-exposed Functions
// ============================================================================

/// Build the enriched bar series from a daily-quotes payload.
#[pyfunction]
#[pyo3(signature = (payload, interval = "daily"))]
fn build_bars(payload: &str, interval: &str) -> PyResult<Vec<Bar>> {
    let records = run_pipeline(payload, interval).map_err(to_py_err)?;
    Ok(records.into_iter().map(Bar::from).collect())
}

/// Build the enriched bar series and return it as JSON text.
#[pyfunction]
#[pyo3(signature = (payload, interval = "daily"))]
fn build_bars_json(payload: &str, interval: &str) -> PyResult<String> {
    let records = run_pipeline(payload, interval).map_err(to_py_err)?;
    to_json(&records, false).map_err(to_py_err)
}

/// Normalize a listed-info payload.
#[pyfunction]
fn normalize_listed(payload: &str) -> PyResult<Vec<ListedStock>> {
    let records = parse_listed_info(payload).map_err(to_py_err)?;
    Ok(build_directory(&records)
        .items
        .into_iter()
        .map(ListedStock::from)
        .collect())
}

// ============================================================================
// Module Definition
// ============================================================================

/// Quotebar - Rust bar pipeline for Python.
#[pymodule]
fn quotebar(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<Bar>()?;
    m.add_class::<ListedStock>()?;

    // Functions
    m.add_function(wrap_pyfunction!(build_bars, m)?)?;
    m.add_function(wrap_pyfunction!(build_bars_json, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_listed, m)?)?;

    Ok(())
}
