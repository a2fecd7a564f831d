//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::{CsvAdapter, CsvColumns, CsvInput};
use crate::adapters::csv_report::{write_rsi_csv, write_snapshot_csv};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analysis::{analyze_latest, AnalysisConfig};
use crate::domain::config_validation::validate_analysis_config;
use crate::domain::error::{period_from_signed, AnalyzerError};
use crate::domain::indicator::{calculate_rsi_with, RsiSmoothing};
use crate::domain::price_series::PriceSeries;
use crate::domain::signal::RsiThresholds;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;

const DEFAULT_LOG_FILTER: &str = "warn,stockta=info";

#[derive(Parser, Debug)]
#[command(name = "stockta", about = "RSI and technical indicators for closing prices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the RSI series for a price file
    Rsi(CommonArgs),
    /// Classify the latest bar with every indicator
    Snapshot(CommonArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Price CSV, or `-` for stdin
    #[arg(short, long)]
    pub input: String,
    /// INI file with indicator parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// RSI look-back period (overrides config)
    #[arg(short, long, allow_negative_numbers = true)]
    pub period: Option<i64>,
    /// RSI smoothing: simple or wilder (overrides config)
    #[arg(long)]
    pub smoothing: Option<String>,
    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // a subscriber may already be installed when called more than once
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Rsi(args) => run_rsi(&args),
        Command::Snapshot(args) => run_snapshot(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, AnalyzerError> {
    match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

fn read_period(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, AnalyzerError> {
    match config.get_int(section, key)? {
        Some(value) => period_from_signed(&format!("[{section}] {key}"), value),
        None => Ok(default),
    }
}

fn read_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, AnalyzerError> {
    Ok(config.get_double(section, key)?.unwrap_or(default))
}

pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, AnalyzerError> {
    let defaults = AnalysisConfig::default();

    let rsi_smoothing = match config.get_string("rsi", "smoothing") {
        Some(s) => s.parse::<RsiSmoothing>().map_err(|e| AnalyzerError::ConfigInvalid {
            section: "rsi".into(),
            key: "smoothing".into(),
            reason: e.to_string(),
        })?,
        None => defaults.rsi_smoothing,
    };

    Ok(AnalysisConfig {
        rsi_period: read_period(config, "rsi", "period", defaults.rsi_period)?,
        rsi_smoothing,
        rsi_thresholds: RsiThresholds {
            overbought: read_double(
                config,
                "rsi",
                "overbought",
                defaults.rsi_thresholds.overbought,
            )?,
            oversold: read_double(config, "rsi", "oversold", defaults.rsi_thresholds.oversold)?,
        },
        ma_short: read_period(config, "moving_average", "short", defaults.ma_short)?,
        ma_long: read_period(config, "moving_average", "long", defaults.ma_long)?,
        macd_fast: read_period(config, "macd", "fast", defaults.macd_fast)?,
        macd_slow: read_period(config, "macd", "slow", defaults.macd_slow)?,
        macd_signal: read_period(config, "macd", "signal", defaults.macd_signal)?,
        bollinger_period: read_period(config, "bollinger", "period", defaults.bollinger_period)?,
        bollinger_multiplier: read_double(
            config,
            "bollinger",
            "multiplier",
            defaults.bollinger_multiplier,
        )?,
        volatility_period: read_period(
            config,
            "volatility",
            "period",
            defaults.volatility_period,
        )?,
        outlier_threshold: read_double(
            config,
            "input",
            "outlier_threshold",
            defaults.outlier_threshold,
        )?,
    })
}

pub fn build_columns(config: &dyn ConfigPort) -> CsvColumns {
    let defaults = CsvColumns::default();
    CsvColumns {
        close: config
            .get_string("input", "close_column")
            .unwrap_or(defaults.close),
        date: config
            .get_string("input", "date_column")
            .unwrap_or(defaults.date),
    }
}

/// Command line flags win over config values.
pub fn apply_overrides(
    mut config: AnalysisConfig,
    args: &CommonArgs,
) -> Result<AnalysisConfig, AnalyzerError> {
    if let Some(period) = args.period {
        config.rsi_period = period_from_signed("period", period)?;
    }
    if let Some(ref smoothing) = args.smoothing {
        config.rsi_smoothing = smoothing.parse()?;
    }
    Ok(config)
}

/// Shared front half of every command: config, validation, cleaned prices.
pub fn prepare(args: &CommonArgs) -> Result<(AnalysisConfig, PriceSeries), AnalyzerError> {
    let adapter = load_config(args.config.as_ref())?;
    let config = apply_overrides(build_analysis_config(&adapter)?, args)?;
    validate_analysis_config(&config)?;

    let input = CsvInput::from_arg(&args.input);
    tracing::info!("Reading prices from {}", args.input);
    let source = CsvAdapter::new(input, build_columns(&adapter));
    let (mut series, gaps) = source.load_series()?;
    if gaps > 0 {
        tracing::warn!(gaps, "filled missing closes");
    }
    let outliers = series.smooth_outliers(config.outlier_threshold);
    if outliers > 0 {
        tracing::warn!(outliers, "smoothed outlier closes");
    }
    tracing::debug!(points = series.len(), "price series ready");
    Ok((config, series))
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>, AnalyzerError> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

pub fn run_rsi(args: &CommonArgs) -> Result<(), AnalyzerError> {
    let (config, series) = prepare(args)?;

    tracing::info!(
        period = config.rsi_period,
        smoothing = %config.rsi_smoothing,
        points = series.len(),
        "Computing RSI"
    );
    let rsi = calculate_rsi_with(&series.closes(), config.rsi_period, config.rsi_smoothing)?;

    let out = open_output(args.output.as_ref())?;
    write_rsi_csv(out, &series, &rsi, &config.rsi_thresholds)?;
    if let Some(path) = &args.output {
        tracing::info!("RSI written to {}", path.display());
    }
    Ok(())
}

pub fn run_snapshot(args: &CommonArgs) -> Result<(), AnalyzerError> {
    let (config, series) = prepare(args)?;

    tracing::info!(points = series.len(), "Analyzing latest bar");
    let snapshot = analyze_latest(&series, &config)?;
    tracing::info!(
        score = snapshot.score,
        recommendation = %snapshot.recommendation,
        "Analysis complete"
    );

    let out = open_output(args.output.as_ref())?;
    write_snapshot_csv(out, &snapshot)?;
    Ok(())
}
