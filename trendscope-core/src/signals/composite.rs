//! Composite multi-timeframe MACD score.
//!
//! Each timeframe contributes one bullish bit (MACD at or above signal). The
//! bits are packed into decimal places, daily in the units digit through
//! quarterly in the thousands digit, and also counted.

use crate::timeframe::Timeframe;
use serde::{Deserialize, Serialize};

/// `macd >= signal`. Any NaN makes the comparison false, i.e. bearish.
pub fn bullish(macd: f64, signal: f64) -> bool {
    macd >= signal
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeScore {
    pub total: u32,
    pub count: u32,
}

impl CompositeScore {
    /// Score from `(macd, signal)` pairs ordered daily, weekly, monthly, quarterly.
    pub fn from_pairs(pairs: [(f64, f64); 4]) -> Self {
        let mut total = 0;
        let mut count = 0;
        for (timeframe, (macd, signal)) in Timeframe::ALL.iter().zip(pairs) {
            if bullish(macd, signal) {
                total += timeframe.weight();
                count += 1;
            }
        }
        Self { total, count }
    }

    /// Bullish bits recovered from the decimal digits of `total`.
    pub fn bits(&self) -> [bool; 4] {
        let mut bits = [false; 4];
        for (bit, timeframe) in bits.iter_mut().zip(Timeframe::ALL) {
            *bit = (self.total / timeframe.weight()) % 10 == 1;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULL: (f64, f64) = (1.0, 0.0);
    const BEAR: (f64, f64) = (0.0, 1.0);

    #[test]
    fn mixed_bits_pack_into_digits() {
        // daily bull, weekly bear, monthly bull, quarterly bull → 1101
        let score = CompositeScore::from_pairs([BULL, BEAR, BULL, BULL]);
        assert_eq!(score.total, 1101);
        assert_eq!(score.count, 3);
        assert_eq!(score.bits(), [true, false, true, true]);
    }

    #[test]
    fn every_bit_pattern_round_trips_through_digits() {
        for mask in 0u32..16 {
            let pairs: [(f64, f64); 4] =
                std::array::from_fn(|i| if mask & (1 << i) != 0 { BULL } else { BEAR });
            let score = CompositeScore::from_pairs(pairs);
            let expected: [bool; 4] = std::array::from_fn(|i| mask & (1 << i) != 0);
            assert_eq!(score.bits(), expected, "mask {mask:04b}");
            assert_eq!(score.count, mask.count_ones());
        }
    }

    #[test]
    fn equality_counts_as_bullish() {
        let score = CompositeScore::from_pairs([(0.5, 0.5), BEAR, BEAR, BEAR]);
        assert_eq!(score.total, 1);
        assert_eq!(score.count, 1);
    }

    #[test]
    fn nan_is_bearish_not_an_error() {
        let nan = (f64::NAN, f64::NAN);
        let score = CompositeScore::from_pairs([nan, BULL, (f64::NAN, 0.0), (0.0, f64::NAN)]);
        assert_eq!(score.total, 10);
        assert_eq!(score.count, 1);
    }

    #[test]
    fn all_bullish_is_1111() {
        let score = CompositeScore::from_pairs([BULL; 4]);
        assert_eq!(score.total, 1111);
        assert_eq!(score.count, 4);
    }
}
