//! Deterministic synthetic price history.
//!
//! A random walk seeded from the BLAKE3 hash of the symbol, one bar per
//! weekday. The same symbol and range always produce the same series, which
//! makes it usable offline and in demos. Results are tagged `Synthetic`.

use super::provider::{DataError, DataSource, PriceHistoryProvider};
use crate::domain::{Bar, PriceSeries};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    start_price: f64,
    /// Mean daily return added to the uniform noise.
    drift: f64,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            drift: 0.0003,
        }
    }
}

impl SyntheticProvider {
    pub fn new(start_price: f64, drift: f64) -> Self {
        Self { start_price, drift }
    }

    /// Generate weekday bars for `[start, end]`.
    pub fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::new();
        let mut price = self.start_price;
        for date in start.iter_days().take_while(|d| *d <= end) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let daily_return: f64 = self.drift + rng.gen_range(-0.02..0.02);
            let open = price;
            let close = (price * (1.0 + daily_return)).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64);

            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
            price = close;
        }
        bars
    }
}

impl PriceHistoryProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        tracing::warn!(
            symbol,
            "generating synthetic history, results are not market data"
        );
        let bars = self.generate(symbol, start, end);
        Ok(PriceSeries::from_unsorted(symbol, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[test]
    fn skips_weekends() {
        let (start, end) = range();
        let bars = SyntheticProvider::default().generate("SPY", start, end);
        assert_eq!(bars.len(), 23);
        assert!(bars
            .iter()
            .all(|b| !matches!(b.date.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn deterministic_per_symbol() {
        let (start, end) = range();
        let provider = SyntheticProvider::default();
        let spy = provider.generate("SPY", start, end);
        assert_eq!(spy, provider.generate("SPY", start, end));
        assert_ne!(spy, provider.generate("QQQ", start, end));
    }

    #[test]
    fn bars_are_sane() {
        let (start, end) = range();
        assert!(SyntheticProvider::default()
            .generate("SPY", start, end)
            .iter()
            .all(|b| b.is_sane()));
    }

    #[test]
    fn inverted_range_is_empty() {
        let (start, end) = range();
        let series = SyntheticProvider::default()
            .fetch("SPY", end, start)
            .unwrap();
        assert!(series.is_empty());
    }
}
