//! Indicache CLI: run the Drawer indicator through the candle cache.
//!
//! Commands:
//! - `run`: resolve one entry per bar of a CSV file and print them
//! - `params`: print Drawer parameters as TOML with their fingerprint

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use indicache_core::config::DrawerConfig;
use indicache_core::domain::{AppliedPrice, Bar, BarSeries};
use indicache_core::indicators::Drawer;
use indicache_core::{DrawerParams, IndicatorDataEntry};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "indicache",
    about = "Indicache CLI: cached per-timestamp indicator entries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the Drawer indicator for every bar of a CSV file.
    Run {
        /// CSV with columns timestamp,open,high,low,close,volume (unix seconds).
        #[arg(long)]
        bars: PathBuf,

        /// Path to a TOML config file ([drawer] and [buffer] sections).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Smoothing period. Overrides the config file.
        #[arg(long)]
        period: Option<u32>,

        /// Applied price: close, open, high, low, median, typical, weighted.
        #[arg(long)]
        applied_price: Option<AppliedPrice>,

        /// Print a JSON array instead of one line per bar.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print Drawer parameters as TOML with their fingerprint.
    Params {
        /// Smoothing period.
        #[arg(long)]
        period: Option<u32>,

        /// Applied price: close, open, high, low, median, typical, weighted.
        #[arg(long)]
        applied_price: Option<AppliedPrice>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            bars,
            config,
            period,
            applied_price,
            json,
        } => run_drawer(&bars, config.as_deref(), period, applied_price, json),
        Commands::Params {
            period,
            applied_price,
        } => print_params(period, applied_price),
    }
}

/// One resolved entry as printed by `run --json`.
#[derive(Serialize)]
struct EntryRow {
    timestamp: i64,
    time: String,
    value: Option<f64>,
    flags: String,
    flag_bits: u8,
    valid: bool,
}

impl EntryRow {
    fn from_entry(entry: &IndicatorDataEntry) -> Self {
        let valid = entry.is_valid();
        Self {
            timestamp: entry.timestamp,
            time: format_time(entry.timestamp),
            value: entry.get(0).filter(|_| valid).map(|v| v.as_f64()),
            flags: entry.flags.to_string(),
            flag_bits: entry.flags.bits(),
            valid,
        }
    }
}

fn run_drawer(
    bars_path: &Path,
    config_path: Option<&Path>,
    period: Option<u32>,
    applied_price: Option<AppliedPrice>,
    json: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => DrawerConfig::load(path)?,
        None => DrawerConfig::default(),
    };
    if let Some(period) = period {
        config.drawer.period = period;
    }
    if let Some(price) = applied_price {
        config.drawer.applied_price = price;
    }
    config.validate()?;

    let series = load_bars(bars_path)?;
    if series.is_empty() {
        bail!("no bars in {}", bars_path.display());
    }
    info!(
        bars = series.len(),
        period = config.drawer.period,
        applied_price = %config.drawer.applied_price,
        fingerprint = %config.drawer.fingerprint().short(),
        "running drawer"
    );

    let stamps: Vec<i64> = series.bars().iter().map(|b| b.timestamp).collect();
    let mut candle = Drawer::candle(config.drawer, series, &config.buffer);
    let rows: Vec<EntryRow> = stamps
        .iter()
        .map(|&ts| EntryRow::from_entry(&candle.get_entry(ts)))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{:<20} {:>12}  {}", "Time", "Value", "Flags");
        println!("{}", "-".repeat(56));
        for row in &rows {
            let value = row
                .value
                .map(|v| format!("{v:.4}"))
                .unwrap_or_else(|| "-".into());
            println!("{:<20} {:>12}  {}", row.time, value, row.flags);
        }
    }

    info!(
        cached = candle.cached_len(),
        capacity = candle.buffer().capacity(),
        ready = candle.state().is_ready,
        "drawer done"
    );
    Ok(())
}

fn load_bars(path: &Path) -> Result<BarSeries> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open bars file {}", path.display()))?;
    let mut bars = Vec::new();
    for (line, record) in reader.deserialize::<Bar>().enumerate() {
        let bar = record.with_context(|| format!("bad bar at record {}", line + 1))?;
        if !bar.is_sane() {
            bail!("bad bar at record {}: inconsistent OHLC {bar:?}", line + 1);
        }
        bars.push(bar);
    }
    Ok(BarSeries::new(bars))
}

fn print_params(period: Option<u32>, applied_price: Option<AppliedPrice>) -> Result<()> {
    let mut params = DrawerParams::default();
    if let Some(period) = period {
        if period == 0 {
            bail!("--period must be >= 1");
        }
        params.period = period;
    }
    if let Some(price) = applied_price {
        params.applied_price = price;
    }

    print!("{}", toml::to_string_pretty(&params)?);
    println!();
    println!("# fingerprint: {}", params.fingerprint());
    Ok(())
}

fn format_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
