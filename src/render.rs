// =============================================================================
// Chart payload assembly & artifact output
// =============================================================================
//
// The renderer consumes one JSON document per analysis window: the window's
// bars, the band and moving-average overlays aligned to the bar axis
// (undefined positions serialise as null), and the marker series.  A marker
// series that never fired is omitted entirely, mirroring how an empty scatter
// layer would be dropped from a chart.
//
// Artifacts are written atomically (tmp + rename) into the results
// directory, which is created on demand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::analysis::{AnalyzedSeries, WindowAnnotations};
use crate::market_data::DailyBar;
use crate::series::SignalSeries;
use crate::types::AnalysisSpan;

/// One marker: a date and the nudged price it sits at.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A named scatter layer of markers with its display hints.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerSeries {
    pub name: &'static str,
    pub shape: &'static str,
    pub color: &'static str,
    pub points: Vec<MarkerPoint>,
}

/// Everything the renderer needs for one chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    pub symbol: String,
    pub span: String,
    pub bars: Vec<DailyBar>,
    pub upper_band: Vec<Option<f64>>,
    pub lower_band: Vec<Option<f64>>,
    pub short_ma: Vec<Option<f64>>,
    pub long_ma: Vec<Option<f64>>,
    pub markers: Vec<MarkerSeries>,
}

/// Assemble the payload for one analysis window.
pub fn chart_payload(
    symbol: &str,
    span: &AnalysisSpan,
    window: &AnalyzedSeries,
    annotations: &WindowAnnotations,
) -> ChartPayload {
    let layers = [
        ("bollinger-low", "up", "orange", &annotations.bollinger_low),
        ("bollinger-high", "down", "blue", &annotations.bollinger_high),
        ("crossover-low", "up", "green", &annotations.crossover_low),
        ("crossover-high", "down", "red", &annotations.crossover_high),
    ];

    let markers = layers
        .into_iter()
        .filter(|(_, _, _, signals)| !signals.is_empty())
        .map(|(name, shape, color, signals)| marker_series(name, shape, color, signals))
        .collect();

    ChartPayload {
        symbol: symbol.to_string(),
        span: span.label.to_string(),
        bars: window.bars().bars().to_vec(),
        upper_band: window.bollinger.upper.values(),
        lower_band: window.bollinger.lower.values(),
        short_ma: window.crossover.short_ma.values(),
        long_ma: window.crossover.long_ma.values(),
        markers,
    }
}

fn marker_series(
    name: &'static str,
    shape: &'static str,
    color: &'static str,
    signals: &SignalSeries,
) -> MarkerSeries {
    MarkerSeries {
        name,
        shape,
        color,
        points: signals
            .iter()
            .map(|(date, value)| MarkerPoint { date, value })
            .collect(),
    }
}

/// Write the payload into `out_dir` as `{SYMBOL}-{span}.json`, atomically.
pub fn write_chart(payload: &ChartPayload, out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create results directory {}", out_dir.display()))?;

    let path = out_dir.join(format!("{}-{}.json", payload.symbol, payload.span));
    let content = serde_json::to_string_pretty(payload)
        .context("failed to serialise chart payload to JSON")?;

    // Atomic write: write to a temporary sibling file, then rename.
    let tmp_path = path.with_extension("json.tmp");

    std::fs::write(&tmp_path, &content)
        .with_context(|| format!("failed to write tmp payload to {}", tmp_path.display()))?;

    std::fs::rename(&tmp_path, &path)
        .with_context(|| format!("failed to rename tmp payload to {}", path.display()))?;

    info!(path = %path.display(), markers = payload.markers.len(), "chart payload written");
    Ok(path)
}
