// =============================================================================
// Daily bar series
// =============================================================================
//
// The shared input of the whole pipeline: one OHLCV bar per trading day, in
// strictly increasing date order.  Calendar gaps (weekends, holidays) are
// expected and are not an error; nothing downstream may assume fixed spacing.
// The series is read-only after construction.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::series::IndicatorSeries;

/// A single OHLCV observation for one trading day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Chronologically ordered, duplicate-free sequence of daily bars.
#[derive(Debug, Clone)]
pub struct BarSeries {
    bars: Vec<DailyBar>,
}

impl BarSeries {
    /// Build a series, enforcing strictly increasing dates.
    pub fn from_bars(bars: Vec<DailyBar>) -> Result<Self> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                bail!(
                    "bars out of order: {} does not follow {}",
                    pair[1].date,
                    pair[0].date
                );
            }
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, i: usize) -> &DailyBar {
        &self.bars[i]
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// The date axis every derived series aligns to.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Close prices as an always-defined indicator series.
    pub fn close_series(&self) -> IndicatorSeries {
        let dates = self.dates();
        let values = self.bars.iter().map(|b| Some(b.close)).collect();
        IndicatorSeries::from_values(&dates, values)
    }

    /// Close prices in date order.
    pub fn closes(&self) -> Vec<Option<f64>> {
        self.bars.iter().map(|b| Some(b.close)).collect()
    }

    /// Volumes in date order.
    pub fn volumes(&self) -> Vec<Option<f64>> {
        self.bars.iter().map(|b| Some(b.volume)).collect()
    }

    /// A copy of the positions `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            bars: self.bars[start..end].to_vec(),
        }
    }
}
