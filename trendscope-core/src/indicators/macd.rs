//! Moving Average Convergence/Divergence (MACD).
//!
//! MACD[t]   = EMA(close, fast)[t] - EMA(close, slow)[t]
//! Signal[t] = EMA(MACD, signal)[t], seeded on the first `signal` valid MACD values.
//! Lookback: slow - 1 for the MACD line, slow + signal - 2 for the signal line.

use super::ema::{ema_from_first_valid, ema_of_series};
use super::Indicator;
use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// EMA periods for the MACD computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdParams {
    /// Index of the first valid signal value.
    pub fn signal_lookback(&self) -> usize {
        (self.slow + self.signal).saturating_sub(2)
    }

    /// Observations needed for valid MACD and signal at both `t` and `t-1`.
    pub fn min_observations(&self) -> usize {
        self.signal_lookback() + 2
    }
}

/// Full MACD and signal series aligned to the source index.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    /// `(macd, signal)` at index `i`, NaN when out of range.
    pub fn at(&self, i: usize) -> (f64, f64) {
        (
            self.macd.get(i).copied().unwrap_or(f64::NAN),
            self.signal.get(i).copied().unwrap_or(f64::NAN),
        )
    }
}

/// Compute MACD and signal lines over a close series.
pub fn macd_series(closes: &[f64], params: MacdParams) -> MacdSeries {
    let fast = ema_of_series(closes, params.fast);
    let slow = ema_of_series(closes, params.slow);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_from_first_valid(&macd, params.signal);
    MacdSeries { macd, signal }
}

/// MACD line as a bar-based [`Indicator`].
///
/// Classification reads both lines from one [`macd_series`] pass; this view
/// and [`MacdSignal`] exist for the truncated-vs-full look-ahead checks and
/// the benches, and must agree with [`macd_series`] bit for bit.
#[derive(Debug, Clone)]
pub struct MacdLine {
    params: MacdParams,
    name: String,
}

impl MacdLine {
    pub fn new(params: MacdParams) -> Self {
        assert!(
            params.fast >= 1 && params.slow >= 1,
            "MACD periods must be >= 1"
        );
        Self {
            params,
            name: format!("macd_{}_{}", params.fast, params.slow),
        }
    }
}

impl Indicator for MacdLine {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.params.fast.max(self.params.slow).saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        macd_series(&closes, self.params).macd
    }
}

/// MACD signal line as a bar-based [`Indicator`]. See [`MacdLine`].
#[derive(Debug, Clone)]
pub struct MacdSignal {
    params: MacdParams,
    name: String,
}

impl MacdSignal {
    pub fn new(params: MacdParams) -> Self {
        assert!(
            params.fast >= 1 && params.slow >= 1 && params.signal >= 1,
            "MACD periods must be >= 1"
        );
        Self {
            params,
            name: format!(
                "macd_signal_{}_{}_{}",
                params.fast, params.slow, params.signal
            ),
        }
    }
}

impl Indicator for MacdSignal {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.params.signal_lookback()
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        macd_series(&closes, self.params).signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn default_params_need_35_observations() {
        let params = MacdParams::default();
        assert_eq!(params.signal_lookback(), 33);
        assert_eq!(params.min_observations(), 35);
    }

    #[test]
    fn constant_series_has_zero_macd_and_signal() {
        let closes = vec![50.0; 40];
        let series = macd_series(&closes, MacdParams::default());
        assert!(series.macd[24].is_nan());
        assert_approx(series.macd[25], 0.0, DEFAULT_EPSILON);
        assert!(series.signal[32].is_nan());
        assert_approx(series.signal[33], 0.0, DEFAULT_EPSILON);
        assert_approx(series.signal[39], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn small_periods_known_values() {
        // fast=1 → EMA = close; slow=2 → alpha 2/3, seed at 1 = mean(1,3) = 2
        // EMA2[2] = 2/3*5 + 1/3*2 = 4; MACD = [NaN, 1, 1]
        // signal=1 → signal equals MACD where valid
        let params = MacdParams {
            fast: 1,
            slow: 2,
            signal: 1,
        };
        let series = macd_series(&[1.0, 3.0, 5.0], params);
        assert!(series.macd[0].is_nan());
        assert_approx(series.macd[1], 1.0, DEFAULT_EPSILON);
        assert_approx(series.macd[2], 1.0, DEFAULT_EPSILON);
        assert_approx(series.signal[1], 1.0, DEFAULT_EPSILON);
        assert_approx(series.signal[2], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rising_series_has_positive_macd() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let series = macd_series(&closes, MacdParams::default());
        let (macd, signal) = series.at(59);
        assert!(macd > 0.0);
        assert!(signal > 0.0);
    }

    #[test]
    fn indicators_match_series_function() {
        let closes: Vec<f64> = (0..50)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0)
            .collect();
        let bars = make_bars(&closes);
        let params = MacdParams::default();
        let direct = macd_series(&closes, params);
        let line = MacdLine::new(params).compute(&bars);
        let signal = MacdSignal::new(params).compute(&bars);
        for i in 0..50 {
            assert_eq!(line[i].to_bits(), direct.macd[i].to_bits());
            assert_eq!(signal[i].to_bits(), direct.signal[i].to_bits());
        }
    }

    #[test]
    fn at_out_of_range_is_nan() {
        let series = macd_series(&[1.0, 2.0], MacdParams::default());
        let (m, s) = series.at(10);
        assert!(m.is_nan() && s.is_nan());
    }
}
