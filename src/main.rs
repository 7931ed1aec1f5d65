// =============================================================================
// Chartmark — Main Entry Point
// =============================================================================
//
// Fetches the daily history for one symbol, enriches it with Bollinger Band
// and moving-average-crossover series, then writes an annotated chart payload
// for a long (360-bar) and a short (30-bar) trailing window.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod errors;
mod indicators;
mod market_data;
mod render;
mod series;
mod signals;
mod types;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::analysis::AnalyzedSeries;
use crate::indicators::{BollingerConfig, CrossoverConfig};
use crate::market_data::HistoryClient;
use crate::types::ANALYSIS_SPANS;

/// Annotated indicator charts for one ticker symbol.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Ticker symbol to analyse (e.g. BTCUSDT).
    symbol: String,

    /// Short moving-average window override, in bars.
    #[arg(short = 's', long = "short-window-ma")]
    short_window_ma: Option<i64>,

    /// Long moving-average window override, in bars.
    #[arg(short = 'l', long = "long-window-ma")]
    long_window_ma: Option<i64>,

    /// Years of daily history to fetch.
    #[arg(long, default_value_t = 5)]
    years: u32,

    /// Directory the chart payloads are written into.
    #[arg(long, default_value = "charts")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let symbol = cli.symbol.trim().to_uppercase();

    // Validate window overrides before any work happens: a bad window must
    // abort the run without producing partial artifacts.
    let crossover_config =
        CrossoverConfig::with_overrides(cli.short_window_ma, cli.long_window_ma)?;
    let bollinger_config = BollingerConfig::default();

    info!(
        symbol = %symbol,
        short_window = crossover_config.short_window,
        long_window = crossover_config.long_window,
        years = cli.years,
        "Chartmark starting"
    );

    // ── 2. Fetch history ─────────────────────────────────────────────────
    let client = HistoryClient::new();
    let bars = client.daily_history(&symbol, cli.years).await?;

    // ── 3. Compute indicators over the full history ──────────────────────
    let analyzed = AnalyzedSeries::compute(bars, &bollinger_config, &crossover_config)?;
    info!(bars = analyzed.len(), "indicator series computed");

    // ── 4. Slice, annotate, and emit each analysis window ────────────────
    for span in &ANALYSIS_SPANS {
        let window = analyzed.trailing_window(span.trailing_bars)?;
        let annotations = window.annotate();
        let payload = render::chart_payload(&symbol, span, &window, &annotations);
        let path = render::write_chart(&payload, &cli.out_dir)?;
        info!(
            span = %span,
            bars = window.len(),
            markers = payload.markers.len(),
            path = %path.display(),
            "analysis window written"
        );
    }

    info!("Chartmark run complete.");
    Ok(())
}
