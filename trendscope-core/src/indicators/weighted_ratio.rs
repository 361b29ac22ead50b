//! Weighted price ratio over a fixed offset.
//!
//! Ratio[t] = weight * close[t] / close[t-offset]
//! Lookback: offset. NaN when either close is NaN or the base close is zero.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct WeightedRatio {
    offset: usize,
    weight: f64,
    name: String,
}

impl WeightedRatio {
    pub fn new(offset: usize, weight: f64) -> Self {
        assert!(offset >= 1, "WeightedRatio offset must be >= 1");
        Self {
            offset,
            weight,
            name: format!("weighted_ratio_{offset}"),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Indicator for WeightedRatio {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.offset
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        for i in self.offset..n {
            let base = bars[i - self.offset].close;
            let curr = bars[i].close;
            if !(base.is_nan() || curr.is_nan() || base == 0.0) {
                result[i] = self.weight * curr / base;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn ratio_basic() {
        let bars = make_bars(&[100.0, 110.0, 120.0]);
        let result = WeightedRatio::new(2, 0.4).compute(&bars);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 0.4 * 1.2, DEFAULT_EPSILON);
    }

    #[test]
    fn ratio_nan_and_zero_base() {
        let mut bars = make_bars(&[0.0, 10.0, 20.0, 30.0]);
        bars[3].close = f64::NAN;
        let result = WeightedRatio::new(1, 1.0).compute(&bars);
        assert!(result[1].is_nan()); // base 0
        assert_approx(result[2], 2.0, DEFAULT_EPSILON);
        assert!(result[3].is_nan());
    }

    #[test]
    fn ratio_lookback_is_offset() {
        assert_eq!(WeightedRatio::new(63, 0.4).lookback(), 63);
    }
}
