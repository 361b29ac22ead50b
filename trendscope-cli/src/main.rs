//! TrendScope CLI: multi-timeframe MACD and relative-strength reports.
//!
//! Commands:
//! - `macd`: MACD status on daily/weekly/monthly/quarterly bars plus the composite score
//! - `rs`: relative-strength table with rolling percentile rank
//! - `report`: both of the above for one symbol

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use trendscope_core::analysis::{MacdReport, RsReport};
use trendscope_core::config::AnalysisConfig;
use trendscope_core::data::{
    CircuitBreaker, CsvFileProvider, PriceHistoryProvider, SyntheticProvider, YahooProvider,
};
use trendscope_core::pipeline::{run_macd, run_relative_strength, MacdRequest, RsRequest};
use trendscope_core::reporting::{ConsoleSink, CsvSink, JsonSink, ResultSink};
use trendscope_core::AnalysisError;

#[derive(Parser)]
#[command(
    name = "trendscope",
    about = "TrendScope CLI: multi-timeframe MACD and relative strength for a ticker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file. Flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where daily history comes from.
    #[arg(long, global = true, value_enum, default_value_t = Source::Yahoo)]
    source: Source,

    /// CSV file with daily bars (required with --source csv).
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Output directory for csv/json exports. Defaults to the config value.
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Console)]
    format: Format,

    /// Use raw Yahoo prices instead of split/dividend-adjusted ones.
    #[arg(long, global = true, default_value_t = false)]
    unadjusted: bool,

    /// Debug-level logging.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// MACD status per timeframe and the composite score.
    Macd {
        /// Ticker symbol (e.g., SPY, AAPL).
        symbol: String,

        /// Last date of history (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Years of daily history to fetch.
        #[arg(long)]
        years: Option<u32>,
    },
    /// Relative strength with a rolling percentile rank.
    Rs {
        /// Ticker symbol.
        symbol: String,

        /// First reported date (YYYY-MM-DD). Defaults to one year before --end.
        #[arg(long)]
        start: Option<String>,

        /// Last reported date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Percentile-rank window in sessions (50..=200).
        #[arg(long)]
        lookback: Option<usize>,
    },
    /// MACD and relative strength together.
    Report {
        /// Ticker symbol.
        symbol: String,

        /// First reported RS date (YYYY-MM-DD). Defaults to one year before --end.
        #[arg(long)]
        start: Option<String>,

        /// Last date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Percentile-rank window in sessions (50..=200).
        #[arg(long)]
        lookback: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    Yahoo,
    Csv,
    Synthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Console,
    Csv,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        std::process::exit(report_failure(&err));
    }
}

/// Log a failed run, explain it on stderr and pick the exit code.
fn report_failure(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AnalysisError>() {
        Some(AnalysisError::NoDataFound { symbol }) => {
            tracing::error!(%symbol, "no data found");
            eprintln!("No data found for {symbol}. Check the ticker and date range.");
            2
        }
        _ => {
            tracing::error!(error = %err, "run failed");
            eprintln!("Error: {err:#}");
            1
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = &cli.output {
        config.output.directory = dir.clone();
    }

    let provider = build_provider(cli.source, cli.csv.as_ref(), cli.unadjusted)?;
    let mut sink = build_sink(cli.format, &config);

    match cli.command {
        Commands::Macd { symbol, end, years } => {
            if let Some(years) = years {
                config.macd.history_years = years;
            }
            config.validate()?;
            let end = parse_date(end.as_deref())?.unwrap_or_else(today);
            let report = macd_cmd(provider.as_ref(), &config, symbol, end)?;
            sink.write_macd(&report)?;
        }
        Commands::Rs {
            symbol,
            start,
            end,
            lookback,
        } => {
            apply_lookback(&mut config, lookback)?;
            let (start, end) = report_window(start.as_deref(), end.as_deref())?;
            let report = rs_cmd(provider.as_ref(), &config, symbol, start, end)?;
            sink.write_rs(&report)?;
        }
        Commands::Report {
            symbol,
            start,
            end,
            lookback,
        } => {
            apply_lookback(&mut config, lookback)?;
            let (start, end) = report_window(start.as_deref(), end.as_deref())?;
            let macd = macd_cmd(provider.as_ref(), &config, symbol.clone(), end)?;
            let rs = rs_cmd(provider.as_ref(), &config, symbol, start, end)?;
            sink.write_macd(&macd)?;
            sink.write_rs(&rs)?;
        }
    }

    Ok(())
}

fn build_provider(
    source: Source,
    csv: Option<&PathBuf>,
    unadjusted: bool,
) -> Result<Box<dyn PriceHistoryProvider>> {
    Ok(match source {
        Source::Yahoo => {
            let circuit_breaker = Arc::new(CircuitBreaker::default_provider());
            let provider = YahooProvider::new(circuit_breaker)?;
            Box::new(if unadjusted {
                provider.unadjusted()
            } else {
                provider
            })
        }
        Source::Csv => {
            let Some(path) = csv else {
                bail!("--source csv requires --csv <path>");
            };
            Box::new(CsvFileProvider::new(path))
        }
        Source::Synthetic => Box::new(SyntheticProvider::default()),
    })
}

fn build_sink(format: Format, config: &AnalysisConfig) -> Box<dyn ResultSink> {
    let dir = config.output.directory.clone();
    match format {
        Format::Console => Box::new(ConsoleSink::stdout(config.output.tail_rows)),
        Format::Csv => Box::new(CsvSink::new(dir)),
        Format::Json => Box::new(JsonSink::new(dir)),
    }
}

fn apply_lookback(config: &mut AnalysisConfig, lookback: Option<usize>) -> Result<()> {
    if let Some(lookback) = lookback {
        config.relative_strength.lookback_days = lookback;
    }
    config.validate()?;
    Ok(())
}

fn macd_cmd(
    provider: &dyn PriceHistoryProvider,
    config: &AnalysisConfig,
    symbol: String,
    end: NaiveDate,
) -> Result<MacdReport> {
    let request = MacdRequest {
        symbol,
        end,
        history_years: config.macd.history_years,
        params: config.macd.params(),
    };
    let report = run_macd(provider, &request)?;
    if report.all_insufficient() {
        tracing::warn!(
            symbol = %report.symbol,
            min_bars = request.params.min_observations(),
            "insufficient history on every timeframe"
        );
        eprintln!(
            "Not enough history for {}: every timeframe needs at least {} bars.",
            report.symbol,
            request.params.min_observations()
        );
    }
    Ok(report)
}

fn rs_cmd(
    provider: &dyn PriceHistoryProvider,
    config: &AnalysisConfig,
    symbol: String,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RsReport> {
    let request = RsRequest {
        symbol,
        start,
        end,
        lookback_days: config.relative_strength.lookback_days,
        warmup_days: config.relative_strength.warmup_days,
    };
    let report = run_relative_strength(provider, &request)?;
    if !report.has_complete_rows() {
        tracing::warn!(
            symbol = %report.symbol,
            %start,
            "no complete relative-strength rows"
        );
        eprintln!(
            "Not enough history for {}: relative strength needs about a year of sessions before {start}.",
            report.symbol
        );
    }
    Ok(report)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn parse_date(s: Option<&str>) -> Result<Option<NaiveDate>> {
    s.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
    })
    .transpose()
}

/// `[start, end]` for relative strength; start defaults to one year before end.
fn report_window(start: Option<&str>, end: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
    let end = parse_date(end)?.unwrap_or_else(today);
    let start = match parse_date(start)? {
        Some(start) => start,
        None => end
            .checked_sub_months(chrono::Months::new(12))
            .context("end date too early")?,
    };
    if start > end {
        bail!("--start ({start}) is after --end ({end})");
    }
    Ok((start, end))
}
