//! Rolling percentile rank of the close within a trailing window.
//!
//! rank = (# values < x) + (# values == x + 1) / 2   (average rank for ties, x counted in ties)
//! PercentRank[t] = rank / window * 100 over closes[t-window+1..=t].
//! Lookback: window - 1.
//!
//! Each position is recomputed from its own window; nothing is carried
//! between rows.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct PercentRank {
    window: usize,
    name: String,
}

impl PercentRank {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "PercentRank window must be >= 1");
        Self {
            window,
            name: format!("percent_rank_{window}"),
        }
    }
}

impl Indicator for PercentRank {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let mut result = vec![f64::NAN; closes.len()];
        for t in self.lookback()..closes.len() {
            let window = &closes[t + 1 - self.window..=t];
            result[t] = percent_rank_at(window).unwrap_or(f64::NAN);
        }
        result
    }
}

/// Percentile rank (0–100] of the last element of `window` within it.
///
/// Returns `None` for an empty window or one containing NaN.
pub fn percent_rank_at(window: &[f64]) -> Option<f64> {
    let &x = window.last()?;
    if window.iter().any(|v| v.is_nan()) {
        return None;
    }
    let less = window.iter().filter(|&&v| v < x).count() as f64;
    let equal = window.iter().filter(|&&v| v == x).count() as f64;
    let rank = less + (equal + 1.0) / 2.0;
    Some(rank / window.len() as f64 * 100.0)
}
