//! Spreadsheet export as CSV.
//!
//! - `<SYMBOL>_RS_Analysis.csv`: date, close, volume, rs_raw, percent_rank, rank_hue
//! - `<SYMBOL>_MACD_Summary.csv`: one row per timeframe
//! - `<SYMBOL>_MACD_Score.csv`: composite total and count

use super::{ensure_dir, file_stem, ResultSink, SinkError};
use crate::analysis::{MacdReport, RsReport};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct RsRecord {
    date: NaiveDate,
    close: f64,
    volume: u64,
    rs_raw: f64,
    percent_rank: f64,
    rank_hue: f64,
}

#[derive(Serialize)]
struct TimeframeRecord<'a> {
    symbol: &'a str,
    as_of: NaiveDate,
    timeframe: &'static str,
    observations: usize,
    macd: Option<f64>,
    signal: Option<f64>,
    status: String,
    bullish: bool,
}

#[derive(Serialize)]
struct ScoreRecord<'a> {
    symbol: &'a str,
    as_of: NaiveDate,
    macd_total: u32,
    macd_count: u32,
    dataset_hash: &'a str,
}

/// Writes CSV files into a directory and remembers what it wrote.
pub struct CsvSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn writer(&self, stem: &str) -> Result<(::csv::Writer<std::fs::File>, PathBuf), SinkError> {
        ensure_dir(&self.dir)?;
        let path = self.dir.join(format!("{stem}.csv"));
        let writer = ::csv::Writer::from_path(&path)?;
        Ok((writer, path))
    }

    fn finish(
        &mut self,
        mut writer: ::csv::Writer<std::fs::File>,
        path: PathBuf,
    ) -> Result<(), SinkError> {
        writer.flush().map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote csv export");
        self.written.push(path);
        Ok(())
    }
}

impl ResultSink for CsvSink {
    fn write_macd(&mut self, report: &MacdReport) -> Result<(), SinkError> {
        let (mut writer, path) = self.writer(&file_stem(&report.symbol, "MACD_Summary"))?;
        for signal in &report.timeframes {
            let state = signal.state();
            writer.serialize(TimeframeRecord {
                symbol: &report.symbol,
                as_of: report.as_of,
                timeframe: signal.timeframe.label(),
                observations: signal.observations,
                macd: state.map(|s| s.macd_line),
                signal: state.map(|s| s.signal_line),
                status: signal.status_label(),
                bullish: signal.is_bullish(),
            })?;
        }
        self.finish(writer, path)?;

        let (mut writer, path) = self.writer(&file_stem(&report.symbol, "MACD_Score"))?;
        writer.serialize(ScoreRecord {
            symbol: &report.symbol,
            as_of: report.as_of,
            macd_total: report.composite.total,
            macd_count: report.composite.count,
            dataset_hash: &report.dataset_hash,
        })?;
        self.finish(writer, path)
    }

    fn write_rs(&mut self, report: &RsReport) -> Result<(), SinkError> {
        let (mut writer, path) = self.writer(&file_stem(&report.symbol, "RS_Analysis"))?;
        for row in report.complete_rows() {
            let (Some(rs_raw), Some(percent_rank), Some(color)) =
                (row.rs_raw, row.percent_rank, row.rank_color())
            else {
                continue;
            };
            writer.serialize(RsRecord {
                date: row.date,
                close: row.close,
                volume: row.volume,
                rs_raw,
                percent_rank,
                rank_hue: color.hue,
            })?;
        }
        self.finish(writer, path)
    }
}
