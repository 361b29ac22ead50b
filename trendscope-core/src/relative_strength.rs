//! Multi-horizon relative strength and rolling percentile rank.
//!
//! For every daily row:
//! - four weighted price ratios over 63/126/189/250 sessions (3/6/9/12 months),
//! - their sum (`rs_raw`), absent if any ratio is absent,
//! - the percentile rank of the close within the trailing `lookback_days` window.
//!
//! All rows are kept in the table; dropping incomplete rows is left to the
//! reporting layer through [`RsTable::complete_rows`].

use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use crate::indicators::{Indicator, PercentRank, WeightedRatio};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Supported percentile-rank window, in sessions.
pub const LOOKBACK_RANGE: RangeInclusive<usize> = 50..=200;

/// Default percentile-rank window.
pub const DEFAULT_LOOKBACK: usize = 100;

/// `(offset in sessions, weight)` for the 3/6/9/12-month horizons.
pub const HORIZONS: [(usize, f64); 4] = [(63, 0.4), (126, 0.2), (189, 0.2), (250, 0.2)];

/// Derived values for one daily row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsRow {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    pub three_month_rs: Option<f64>,
    pub six_month_rs: Option<f64>,
    pub nine_month_rs: Option<f64>,
    pub twelve_month_rs: Option<f64>,
    pub rs_raw: Option<f64>,
    pub percent_rank: Option<f64>,
}

impl RsRow {
    /// True when every derived field carries a value.
    pub fn is_complete(&self) -> bool {
        self.rs_raw.is_some() && self.percent_rank.is_some()
    }

    /// HSB colour for charting the rank, hue scaled into 0..=64.
    pub fn rank_color(&self) -> Option<RankColor> {
        self.percent_rank.map(RankColor::from_percent_rank)
    }
}

/// Hue/saturation/brightness triple used to colour a percentile rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankColor {
    pub hue: f64,
    pub saturation: u8,
    pub brightness: u8,
}

impl RankColor {
    pub fn from_percent_rank(percent_rank: f64) -> Self {
        Self {
            hue: percent_rank * 64.0 / 100.0,
            saturation: 255,
            brightness: 255,
        }
    }
}

/// Relative-strength output aligned one-to-one with the input series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsTable {
    pub symbol: String,
    pub lookback_days: usize,
    rows: Vec<RsRow>,
}

impl RsTable {
    /// Every row, including warmup rows with absent fields.
    pub fn rows(&self) -> &[RsRow] {
        &self.rows
    }

    /// Rows where every derived field is present.
    pub fn complete_rows(&self) -> impl Iterator<Item = &RsRow> {
        self.rows.iter().filter(|r| r.is_complete())
    }

    /// Keep only rows dated within `[start, end]`.
    ///
    /// Values were computed on the full history, so rows near `start` keep
    /// the ratios their warmup history allowed.
    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> RsTable {
        RsTable {
            symbol: self.symbol.clone(),
            lookback_days: self.lookback_days,
            rows: self
                .rows
                .iter()
                .filter(|r| r.date >= start && r.date <= end)
                .cloned()
                .collect(),
        }
    }

    /// Latest complete row, if any.
    pub fn latest_complete(&self) -> Option<&RsRow> {
        self.rows.iter().rev().find(|r| r.is_complete())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn finite(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}

/// Compute the relative-strength table for a daily series.
pub fn compute_relative_strength(
    series: &PriceSeries,
    lookback_days: usize,
) -> Result<RsTable, AnalysisError> {
    if !LOOKBACK_RANGE.contains(&lookback_days) {
        return Err(AnalysisError::InvalidLookback {
            lookback: lookback_days,
        });
    }
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    let bars = series.bars();
    let ratios: Vec<Vec<f64>> = HORIZONS
        .iter()
        .map(|&(offset, weight)| WeightedRatio::new(offset, weight).compute(bars))
        .collect();
    let ranks = PercentRank::new(lookback_days).compute(bars);

    let rows: Vec<RsRow> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let terms: [Option<f64>; 4] = std::array::from_fn(|h| finite(ratios[h][i]));
            let rs_raw = terms
                .iter()
                .try_fold(0.0, |acc, term| term.map(|v| acc + v));
            RsRow {
                date: bar.date,
                close: bar.close,
                volume: bar.volume,
                three_month_rs: terms[0],
                six_month_rs: terms[1],
                nine_month_rs: terms[2],
                twelve_month_rs: terms[3],
                rs_raw,
                percent_rank: finite(ranks[i]),
            }
        })
        .collect();

    let complete = rows.iter().filter(|r| r.is_complete()).count();
    tracing::debug!(
        symbol = series.symbol(),
        lookback_days,
        rows = rows.len(),
        complete,
        "computed relative strength"
    );
    if complete == 0 {
        tracing::warn!(
            symbol = series.symbol(),
            available = rows.len(),
            required = HORIZONS[3].0 + 1,
            "no row has full relative-strength history"
        );
    }

    Ok(RsTable {
        symbol: series.symbol().to_string(),
        lookback_days,
        rows,
    })
}
