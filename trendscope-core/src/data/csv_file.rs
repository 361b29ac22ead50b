//! Local CSV price history.
//!
//! Expects a header row naming `date,open,high,low,close,volume` in lowercase,
//! capitalised (Yahoo export) or upper case. Column order is free and extra
//! columns such as `Adj Close` are ignored. Empty price cells become NaN.

use super::provider::{DataError, DataSource, PriceHistoryProvider};
use crate::domain::{Bar, PriceSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "DATE")]
    date: NaiveDate,
    #[serde(alias = "Open", alias = "OPEN")]
    open: Option<f64>,
    #[serde(alias = "High", alias = "HIGH")]
    high: Option<f64>,
    #[serde(alias = "Low", alias = "LOW")]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "CLOSE")]
    close: Option<f64>,
    #[serde(alias = "Volume", alias = "VOLUME", default)]
    volume: Option<f64>,
}

impl From<CsvRow> for Bar {
    fn from(row: CsvRow) -> Self {
        Bar {
            date: row.date,
            open: row.open.unwrap_or(f64::NAN),
            high: row.high.unwrap_or(f64::NAN),
            low: row.low.unwrap_or(f64::NAN),
            close: row.close.unwrap_or(f64::NAN),
            volume: row.volume.map_or(0, |v| v.max(0.0) as u64),
        }
    }
}

/// Read every bar from a CSV source.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut bars = Vec::new();
    for row in csv.deserialize::<CsvRow>() {
        bars.push(row?.into());
    }
    Ok(bars)
}

/// Serves a single file's history for whatever symbol is requested.
pub struct CsvFileProvider {
    path: PathBuf,
}

impl CsvFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceHistoryProvider for CsvFileProvider {
    fn name(&self) -> &str {
        "csv_file"
    }

    fn source(&self) -> DataSource {
        DataSource::CsvFile
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        tracing::info!(
            symbol,
            path = %self.path.display(),
            "reading daily history from csv"
        );
        let file = std::fs::File::open(&self.path)?;
        let bars: Vec<Bar> = read_bars(file)?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        Ok(PriceSeries::from_unsorted(symbol, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-03,11,12,10,11.5,11.5,2000
2024-01-02,10,11,9,10.5,10.5,1000
2024-01-04,12,13,11,,12.5,3000
";

    #[test]
    fn reads_yahoo_style_headers() {
        let bars = read_bars(SAMPLE.as_bytes()).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].close, 11.5);
        assert_eq!(bars[1].volume, 1000);
        assert!(bars[2].close.is_nan());
    }

    #[test]
    fn reads_lowercase_headers() {
        let csv = "date,open,high,low,close,volume\n2024-01-02,1,2,0.5,1.5,10\n";
        let bars = read_bars(csv.as_bytes()).unwrap();
        assert_eq!(bars[0].high, 2.0);
    }

    #[test]
    fn bad_date_is_csv_error() {
        let csv = "date,open,high,low,close,volume\nnot-a-date,1,2,0.5,1.5,10\n";
        assert!(matches!(read_bars(csv.as_bytes()), Err(DataError::Csv(_))));
    }

    #[test]
    fn provider_sorts_and_filters_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let provider = CsvFileProvider::new(file.path());
        let series = provider
            .fetch(
                "XYZ",
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            )
            .unwrap();
        assert_eq!(series.symbol(), "XYZ");
        assert_eq!(series.closes(), vec![10.5, 11.5]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let provider = CsvFileProvider::new("/definitely/not/here.csv");
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(matches!(
            provider.fetch("X", day, day),
            Err(DataError::Io(_))
        ));
    }
}
