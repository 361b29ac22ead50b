//! Result sinks: where finished reports go.
//!
//! The analysis core hands over typed reports; sinks own formatting and
//! persistence. Relative-strength exports contain complete rows only.

pub mod console;
pub mod csv;
pub mod json;

pub use self::console::ConsoleSink;
pub use self::csv::CsvSink;
pub use self::json::JsonSink;

use crate::analysis::{MacdReport, RsReport};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("console output failed: {0}")]
    Console(#[from] std::io::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Consumer of finished reports.
pub trait ResultSink {
    fn write_macd(&mut self, report: &MacdReport) -> Result<(), SinkError>;

    fn write_rs(&mut self, report: &RsReport) -> Result<(), SinkError>;
}

/// Export file stem: `<SYMBOL>_<suffix>`, with path separators replaced.
pub(crate) fn file_stem(symbol: &str, suffix: &str) -> String {
    let safe: String = symbol
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '^' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}_{suffix}")
}

pub(crate) fn ensure_dir(dir: &std::path::Path) -> Result<(), SinkError> {
    std::fs::create_dir_all(dir).map_err(|source| SinkError::Io {
        path: dir.to_path_buf(),
        source,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_sanitises_symbol() {
        assert_eq!(file_stem("BRK.B", "RS_Analysis"), "BRK.B_RS_Analysis");
        assert_eq!(file_stem("^GSPC", "MACD_Summary"), "^GSPC_MACD_Summary");
        assert_eq!(file_stem("../etc", "x"), ".._etc_x");
    }
}
