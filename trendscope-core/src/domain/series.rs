//! PriceSeries: an ordered run of bars for one symbol.

use super::bar::Bar;
use crate::error::AnalysisError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered bars for one symbol, strictly increasing by date.
///
/// The ordering is checked once at construction; every indicator in the crate
/// relies on it and never re-sorts. Deserialization goes through the same
/// check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

/// Unchecked wire form of [`PriceSeries`].
#[derive(Deserialize)]
struct RawSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl TryFrom<RawSeries> for PriceSeries {
    type Error = AnalysisError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.bars)
    }
}

impl PriceSeries {
    /// Build a series, rejecting duplicate or out-of-order dates.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, AnalysisError> {
        if let Some(index) = bars
            .windows(2)
            .position(|pair| pair[1].date <= pair[0].date)
        {
            return Err(AnalysisError::NonMonotonicDates { index: index + 1 });
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Sort by date and keep the last bar for any repeated date, then build.
    ///
    /// Provider output is not trusted to be ordered; this is the ingest path.
    pub fn from_unsorted(symbol: impl Into<String>, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }
        Self {
            symbol: symbol.into(),
            bars: deduped,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}
