//! TrendScope Core: multi-timeframe MACD and relative-strength signals.
//!
//! This crate contains the computation pipeline and its collaborators:
//! - Domain types (bars, ordered price series)
//! - Calendar resampling into weekly, monthly and quarterly series
//! - Indicators (EMA, MACD, weighted price ratios, rolling percent rank)
//! - MACD cross-over classification and the composite multi-timeframe score
//! - Relative-strength table with a rolling percentile rank
//! - Price history providers (Yahoo Finance, CSV file, synthetic)
//! - Result sinks (console, CSV, JSON) and TOML configuration

pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod pipeline;
pub mod relative_strength;
pub mod reporting;
pub mod resample;
pub mod signals;
pub mod timeframe;

pub use analysis::{analyze_macd, analyze_relative_strength, MacdReport, RsReport};
pub use error::AnalysisError;
pub use timeframe::Timeframe;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: reports and providers can cross thread boundaries,
    /// so a caller may run the blocking fetch on a worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<MacdReport>();
        require_sync::<MacdReport>();
        require_send::<RsReport>();
        require_sync::<RsReport>();
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();

        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::CsvFileProvider>();
        require_sync::<data::CsvFileProvider>();
        require_send::<data::SyntheticProvider>();
        require_sync::<data::SyntheticProvider>();
    }

    /// Providers are usable as trait objects.
    #[test]
    fn provider_trait_is_object_safe() {
        fn _check(provider: &dyn data::PriceHistoryProvider) -> &str {
            provider.name()
        }
        let synthetic = data::SyntheticProvider::default();
        assert_eq!(_check(&synthetic), "synthetic");
    }
}
