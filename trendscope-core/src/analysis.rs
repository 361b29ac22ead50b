//! Analysis runs over an already materialised daily series.
//!
//! Two independent reports:
//! - [`analyze_macd`]: resample into the four timeframes, classify MACD on
//!   each, and fold the results into a composite score.
//! - [`analyze_relative_strength`]: the relative-strength table for the
//!   daily series, optionally restricted to a reporting window.
//!
//! Both are pure: the same input series always yields the same report.

use crate::data::DataSource;
use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use crate::fingerprint::dataset_hash;
use crate::indicators::MacdParams;
use crate::relative_strength::{compute_relative_strength, RsRow, RsTable};
use crate::resample::resample;
use crate::signals::{bullish, classify_macd, CompositeScore, MacdState};
use crate::timeframe::Timeframe;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// MACD result for one timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeframeOutcome {
    Classified(MacdState),
    InsufficientData { required: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSignal {
    pub timeframe: Timeframe,
    /// Rows in the resampled series.
    pub observations: usize,
    pub outcome: TimeframeOutcome,
}

impl TimeframeSignal {
    pub fn state(&self) -> Option<&MacdState> {
        match &self.outcome {
            TimeframeOutcome::Classified(state) => Some(state),
            TimeframeOutcome::InsufficientData { .. } => None,
        }
    }

    /// `(macd, signal)`, NaN for a timeframe without enough history.
    pub fn pair(&self) -> (f64, f64) {
        self.state()
            .map_or((f64::NAN, f64::NAN), |s| (s.macd_line, s.signal_line))
    }

    pub fn is_bullish(&self) -> bool {
        let (macd, signal) = self.pair();
        bullish(macd, signal)
    }

    /// Status label, or the reason no status was computed.
    pub fn status_label(&self) -> String {
        match &self.outcome {
            TimeframeOutcome::Classified(state) => state.status.to_string(),
            TimeframeOutcome::InsufficientData {
                required,
                available,
            } => format!("Insufficient data ({available}/{required})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdReport {
    pub symbol: String,
    /// Date of the last daily bar.
    pub as_of: NaiveDate,
    pub source: Option<DataSource>,
    pub dataset_hash: String,
    /// Daily, weekly, monthly, quarterly.
    pub timeframes: [TimeframeSignal; 4],
    pub composite: CompositeScore,
}

impl MacdReport {
    pub fn timeframe(&self, timeframe: Timeframe) -> &TimeframeSignal {
        &self.timeframes[Timeframe::ALL
            .iter()
            .position(|t| *t == timeframe)
            .unwrap_or(0)]
    }

    /// True when no timeframe produced a status.
    pub fn all_insufficient(&self) -> bool {
        self.timeframes.iter().all(|t| t.state().is_none())
    }
}

fn timeframe_signal(
    daily: &PriceSeries,
    timeframe: Timeframe,
    params: MacdParams,
) -> Result<TimeframeSignal, AnalysisError> {
    let series = resample(daily, timeframe)?;
    let outcome = match classify_macd(&series, params) {
        Ok(state) => {
            tracing::debug!(
                symbol = daily.symbol(),
                %timeframe,
                macd = state.macd_line,
                signal = state.signal_line,
                status = %state.status,
                "classified MACD"
            );
            TimeframeOutcome::Classified(state)
        }
        Err(AnalysisError::InsufficientData {
            required,
            available,
        }) => {
            tracing::warn!(
                symbol = daily.symbol(),
                %timeframe,
                required,
                available,
                "not enough history for MACD"
            );
            TimeframeOutcome::InsufficientData {
                required,
                available,
            }
        }
        Err(e) => return Err(e),
    };
    Ok(TimeframeSignal {
        timeframe,
        observations: series.len(),
        outcome,
    })
}

/// Multi-timeframe MACD report for a daily series.
///
/// Only an empty series fails; short timeframes are reported as
/// `InsufficientData` and count as bearish in the composite.
pub fn analyze_macd(daily: &PriceSeries, params: MacdParams) -> Result<MacdReport, AnalysisError> {
    let as_of = daily.last_date().ok_or(AnalysisError::EmptySeries)?;

    let timeframes = [
        timeframe_signal(daily, Timeframe::Daily, params)?,
        timeframe_signal(daily, Timeframe::Weekly, params)?,
        timeframe_signal(daily, Timeframe::Monthly, params)?,
        timeframe_signal(daily, Timeframe::Quarterly, params)?,
    ];
    let composite = CompositeScore::from_pairs(timeframes.map(|t| t.pair()));

    Ok(MacdReport {
        symbol: daily.symbol().to_string(),
        as_of,
        source: None,
        dataset_hash: dataset_hash(daily),
        timeframes,
        composite,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsReport {
    pub symbol: String,
    pub lookback_days: usize,
    pub source: Option<DataSource>,
    pub dataset_hash: String,
    /// Reporting window; `None` means the whole series.
    pub window: Option<(NaiveDate, NaiveDate)>,
    pub table: RsTable,
}

impl RsReport {
    /// Rows for display and export: inside the window and fully computed.
    pub fn complete_rows(&self) -> impl Iterator<Item = &RsRow> {
        self.table.complete_rows()
    }

    pub fn has_complete_rows(&self) -> bool {
        self.table.latest_complete().is_some()
    }
}

/// Relative-strength report over the full `daily` history, restricted to
/// `window` afterwards when given.
pub fn analyze_relative_strength(
    daily: &PriceSeries,
    lookback_days: usize,
    window: Option<(NaiveDate, NaiveDate)>,
) -> Result<RsReport, AnalysisError> {
    let full = compute_relative_strength(daily, lookback_days)?;
    let table = match window {
        Some((start, end)) => full.within(start, end),
        None => full,
    };
    Ok(RsReport {
        symbol: daily.symbol().to_string(),
        lookback_days,
        source: None,
        dataset_hash: dataset_hash(daily),
        window,
        table,
    })
}
