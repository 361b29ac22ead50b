//! MACD cross-over classification at the end of a series.

use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use crate::indicators::{macd_series, MacdParams};
use serde::{Deserialize, Serialize};
use std::fmt;

/// MACD state of the most recent observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacdStatus {
    /// MACD crossed above the signal line on the last bar.
    PositiveCrossover,
    /// MACD crossed below the signal line on the last bar.
    NegativeCrossover,
    Up,
    Down,
    /// Fallthrough when no comparison holds. Unreachable for finite values.
    Neutral,
}

impl MacdStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MacdStatus::PositiveCrossover => "P+.Cross Over",
            MacdStatus::NegativeCrossover => "N-.Cross Over",
            MacdStatus::Up => "Up",
            MacdStatus::Down => "Down",
            MacdStatus::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for MacdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Latest MACD and signal values with their classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdState {
    pub macd_line: f64,
    pub signal_line: f64,
    pub status: MacdStatus,
}

/// Classify from `(macd, signal)` at `t-1` and `t`.
///
/// Priority is fixed: cross up, cross down, up, down, then neutral.
pub fn classify_status(previous: (f64, f64), current: (f64, f64)) -> MacdStatus {
    let (prev_macd, prev_signal) = previous;
    let (macd, signal) = current;

    let cross_up = macd > signal && prev_macd <= prev_signal;
    let cross_down = macd < signal && prev_macd >= prev_signal;

    if cross_up {
        MacdStatus::PositiveCrossover
    } else if cross_down {
        MacdStatus::NegativeCrossover
    } else if macd >= signal {
        MacdStatus::Up
    } else if signal > macd {
        MacdStatus::Down
    } else {
        MacdStatus::Neutral
    }
}

/// Compute MACD over `series` and classify its last observation.
///
/// Needs `params.min_observations()` rows with valid closes at the tail;
/// anything shorter is `InsufficientData`, never a numeric status.
pub fn classify_macd(series: &PriceSeries, params: MacdParams) -> Result<MacdState, AnalysisError> {
    let n = series.len();
    if n == 0 {
        return Err(AnalysisError::EmptySeries);
    }
    let required = params.min_observations();
    let insufficient = AnalysisError::InsufficientData {
        required,
        available: n,
    };
    if n < required {
        return Err(insufficient);
    }

    let lines = macd_series(&series.closes(), params);
    let previous = lines.at(n - 2);
    let current = lines.at(n - 1);
    if [previous.0, previous.1, current.0, current.1]
        .iter()
        .any(|v| v.is_nan())
    {
        return Err(insufficient);
    }

    Ok(MacdState {
        macd_line: current.0,
        signal_line: current.1,
        status: classify_status(previous, current),
    })
}
