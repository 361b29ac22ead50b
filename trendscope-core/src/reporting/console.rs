//! Plain-text tables for terminal output.

use super::{ResultSink, SinkError};
use crate::analysis::{MacdReport, RsReport};
use std::io::Write;

/// Writes reports as text tables to any writer (stdout in the CLI).
pub struct ConsoleSink<W: Write> {
    out: W,
    /// Relative-strength rows shown, counted from the end.
    tail_rows: usize,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, tail_rows: usize) -> Self {
        Self { out, tail_rows }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout(tail_rows: usize) -> Self {
        Self::new(std::io::stdout(), tail_rows)
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn write_macd(&mut self, report: &MacdReport) -> Result<(), SinkError> {
        let out = &mut self.out;
        writeln!(
            out,
            "MACD Signal Summary for {} (as of {})",
            report.symbol, report.as_of
        )?;
        for signal in &report.timeframes {
            writeln!(
                out,
                "  {:<10} : {}",
                signal.timeframe.label(),
                signal.status_label()
            )?;
        }
        writeln!(out)?;
        writeln!(out, "  MACDTotal  : {}", report.composite.total)?;
        writeln!(out, "  MACDCount  : {}", report.composite.count)?;
        Ok(())
    }

    fn write_rs(&mut self, report: &RsReport) -> Result<(), SinkError> {
        let out = &mut self.out;
        writeln!(
            out,
            "Relative strength for {} (percent rank lookback {} days)",
            report.symbol, report.lookback_days
        )?;

        let rows: Vec<_> = report.complete_rows().collect();
        if rows.is_empty() {
            writeln!(
                out,
                "  no rows with full 12-month history in the requested range"
            )?;
            return Ok(());
        }

        writeln!(
            out,
            "  {:<10}  {:>12}  {:>14}  {:>8}  {:>12}",
            "Date", "Close", "Volume", "RSraw", "PercentRank"
        )?;
        let skip = rows.len().saturating_sub(self.tail_rows);
        for row in &rows[skip..] {
            writeln!(
                out,
                "  {:<10}  {:>12.4}  {:>14}  {:>8.4}  {:>12.2}",
                row.date,
                row.close,
                row.volume,
                row.rs_raw.unwrap_or(f64::NAN),
                row.percent_rank.unwrap_or(f64::NAN),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::fixtures;

    fn render_macd() -> String {
        let mut sink = ConsoleSink::new(Vec::new(), 5);
        sink.write_macd(&fixtures::macd_report()).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn macd_summary_lists_every_timeframe() {
        let text = render_macd();
        for label in [
            "Daily",
            "Weekly",
            "Monthly",
            "Quarterly",
            "MACDTotal",
            "MACDCount",
        ] {
            assert!(text.contains(label), "missing {label} in:\n{text}");
        }
    }

    #[test]
    fn rs_table_shows_tail_rows() {
        let mut sink = ConsoleSink::new(Vec::new(), 3);
        sink.write_rs(&fixtures::rs_report()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        // title + header + 3 rows
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("2023-10-28"));
    }
}
