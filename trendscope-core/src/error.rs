//! Analysis error types.
//!
//! Per-field gaps (warmup, NaN closes) are carried as `Option`/NaN markers on
//! the derived values. The variants here are the run-level outcomes.

use crate::data::provider::DataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("insufficient data: {required} observations required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("no data found for '{symbol}' in the requested range")]
    NoDataFound { symbol: String },

    #[error("bar dates must be strictly increasing (violation at row {index})")]
    NonMonotonicDates { index: usize },

    #[error("lookback of {lookback} days is outside the supported range 50..=200")]
    InvalidLookback { lookback: usize },

    #[error(transparent)]
    Data(#[from] DataError),
}
