//! Calendar resampling of a daily series into weekly/monthly/quarterly bars.
//!
//! Each bucket is represented by its chronologically last daily bar, copied
//! field by field and re-dated to the bucket end. Buckets without trading
//! days are skipped; nothing is forward-filled.

use crate::domain::{Bar, PriceSeries};
use crate::error::AnalysisError;
use crate::timeframe::Timeframe;

/// Resample `series` into `timeframe` buckets.
///
/// `Timeframe::Daily` returns a copy of the input.
pub fn resample(series: &PriceSeries, timeframe: Timeframe) -> Result<PriceSeries, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    if timeframe == Timeframe::Daily {
        return Ok(series.clone());
    }

    let mut buckets: Vec<Bar> = Vec::new();
    for bar in series.bars() {
        let end = timeframe.bucket_end(bar.date);
        let representative = Bar {
            date: end,
            ..bar.clone()
        };
        match buckets.last_mut() {
            // Input is strictly increasing, so a repeated bucket is always the
            // current tail and the later bar wins.
            Some(last) if last.date == end => *last = representative,
            _ => buckets.push(representative),
        }
    }

    tracing::debug!(
        symbol = series.symbol(),
        %timeframe,
        input = series.len(),
        output = buckets.len(),
        "resampled series"
    );

    PriceSeries::new(series.symbol(), buckets)
}
