//! Pretty-printed JSON export of full reports.

use super::{ensure_dir, file_stem, ResultSink, SinkError};
use crate::analysis::{MacdReport, RsReport};
use crate::relative_strength::RsRow;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct RsDocument<'a> {
    symbol: &'a str,
    lookback_days: usize,
    dataset_hash: &'a str,
    rows: Vec<&'a RsRow>,
}

pub struct JsonSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write<T: Serialize>(&mut self, stem: &str, value: &T) -> Result<(), SinkError> {
        ensure_dir(&self.dir)?;
        let path = self.dir.join(format!("{stem}.json"));
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote json export");
        self.written.push(path);
        Ok(())
    }
}

impl ResultSink for JsonSink {
    fn write_macd(&mut self, report: &MacdReport) -> Result<(), SinkError> {
        self.write(&file_stem(&report.symbol, "MACD_Summary"), report)
    }

    fn write_rs(&mut self, report: &RsReport) -> Result<(), SinkError> {
        let document = RsDocument {
            symbol: &report.symbol,
            lookback_days: report.lookback_days,
            dataset_hash: &report.dataset_hash,
            rows: report.complete_rows().collect(),
        };
        self.write(&file_stem(&report.symbol, "RS_Analysis"), &document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::fixtures;

    #[test]
    fn macd_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonSink::new(dir.path());
        let report = fixtures::macd_report();
        sink.write_macd(&report).unwrap();

        let text = std::fs::read_to_string(&sink.written()[0]).unwrap();
        let back: MacdReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.composite, report.composite);
        for (a, b) in back.timeframes.iter().zip(&report.timeframes) {
            assert_eq!(a.timeframe, b.timeframe);
            assert_eq!(a.status_label(), b.status_label());
        }
    }

    #[test]
    fn rs_json_lists_complete_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonSink::new(dir.path());
        sink.write_rs(&fixtures::rs_report()).unwrap();

        let text = std::fs::read_to_string(dir.path().join("TEST_RS_Analysis.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["lookback_days"], 100);
        assert_eq!(value["rows"].as_array().unwrap().len(), 50);
    }
}
