//! Fetch-then-analyse entry points.
//!
//! These wrap a [`PriceHistoryProvider`] around the pure analysis functions
//! and turn "nothing came back" into [`AnalysisError::NoDataFound`], the only
//! provider outcome the analysis layer gives a meaning to.

use crate::analysis::{analyze_macd, analyze_relative_strength, MacdReport, RsReport};
use crate::data::{DataError, PriceHistoryProvider};
use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use crate::indicators::MacdParams;
use chrono::{Days, Months, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct MacdRequest {
    pub symbol: String,
    /// Last date of history to include.
    pub end: NaiveDate,
    pub history_years: u32,
    pub params: MacdParams,
}

impl MacdRequest {
    pub fn start(&self) -> NaiveDate {
        self.end
            .checked_sub_months(Months::new(self.history_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RsRequest {
    pub symbol: String,
    /// First date reported.
    pub start: NaiveDate,
    /// Last date reported.
    pub end: NaiveDate,
    pub lookback_days: usize,
    /// Calendar days fetched before `start` so the ratios are warm at `start`.
    pub warmup_days: u32,
}

impl RsRequest {
    pub fn fetch_start(&self) -> NaiveDate {
        self.start
            .checked_sub_days(Days::new(u64::from(self.warmup_days)))
            .unwrap_or(NaiveDate::MIN)
    }
}

fn fetch_history(
    provider: &dyn PriceHistoryProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, AnalysisError> {
    let series = match provider.fetch(symbol, start, end) {
        Ok(series) => series,
        Err(DataError::SymbolNotFound { symbol }) => {
            return Err(AnalysisError::NoDataFound { symbol })
        }
        Err(e) => return Err(e.into()),
    };
    if series.is_empty() {
        return Err(AnalysisError::NoDataFound {
            symbol: symbol.to_string(),
        });
    }
    tracing::info!(
        symbol,
        provider = provider.name(),
        bars = series.len(),
        first = ?series.first_date(),
        last = ?series.last_date(),
        "loaded daily history"
    );
    let suspect = series.bars().iter().filter(|b| !b.is_sane()).count();
    if suspect > 0 {
        tracing::warn!(symbol, suspect, "bars with missing or inconsistent OHLC");
    }
    Ok(series)
}

/// Fetch `history_years` of daily bars ending at `end` and build the MACD report.
pub fn run_macd(
    provider: &dyn PriceHistoryProvider,
    request: &MacdRequest,
) -> Result<MacdReport, AnalysisError> {
    let series = fetch_history(provider, &request.symbol, request.start(), request.end)?;
    let mut report = analyze_macd(&series, request.params)?;
    report.source = Some(provider.source());
    Ok(report)
}

/// Fetch history with a warmup buffer and build the relative-strength report
/// for `[start, end]`.
pub fn run_relative_strength(
    provider: &dyn PriceHistoryProvider,
    request: &RsRequest,
) -> Result<RsReport, AnalysisError> {
    let series = fetch_history(
        provider,
        &request.symbol,
        request.fetch_start(),
        request.end,
    )?;
    let mut report = analyze_relative_strength(
        &series,
        request.lookback_days,
        Some((request.start, request.end)),
    )?;
    report.source = Some(provider.source());
    if !report.has_complete_rows() {
        tracing::warn!(
            symbol = %request.symbol,
            rows = report.table.len(),
            "no fully computed relative-strength rows in the requested window"
        );
    }
    Ok(report)
}
