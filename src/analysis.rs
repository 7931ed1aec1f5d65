// =============================================================================
// Analysis pipeline — enriched series, window slicing, annotation
// =============================================================================
//
// `AnalyzedSeries` bundles the bar series with every derived indicator series
// on one shared date axis.  Indicators are computed once over the full
// history; taking a trailing window slices all series consistently and never
// recomputes, so a short window still carries fully warmed-up moving
// averages.
//
// A trailing window of `n` bars deliberately excludes the final bar of the
// series: the most recent bar may still be forming and would distort the
// chart.

use tracing::debug;

use crate::errors::AnalysisError;
use crate::indicators::{BollingerConfig, BollingerSeries, CrossoverConfig, CrossoverSeries};
use crate::market_data::BarSeries;
use crate::series::SignalSeries;
use crate::signals::EdgeTrigger;

/// The bar series plus every indicator series derived from it.
#[derive(Debug, Clone)]
pub struct AnalyzedSeries {
    bars: BarSeries,
    pub bollinger: BollingerSeries,
    pub crossover: CrossoverSeries,
}

/// The four marker series produced for one analysis window.
#[derive(Debug, Clone)]
pub struct WindowAnnotations {
    pub bollinger_low: SignalSeries,
    pub bollinger_high: SignalSeries,
    pub crossover_low: SignalSeries,
    pub crossover_high: SignalSeries,
}

impl AnalyzedSeries {
    /// Run both indicator calculators over `bars`.
    pub fn compute(
        bars: BarSeries,
        bollinger: &BollingerConfig,
        crossover: &CrossoverConfig,
    ) -> Result<Self, AnalysisError> {
        let bollinger = BollingerSeries::compute(&bars, bollinger)?;
        let crossover = CrossoverSeries::compute(&bars, crossover)?;
        Ok(Self {
            bars,
            bollinger,
            crossover,
        })
    }

    pub fn bars(&self) -> &BarSeries {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The last `n` bars excluding the very last one, with every indicator
    /// series sliced to the same range.
    ///
    /// Fails when the series has fewer than 2 bars, when `n` exceeds the
    /// series length, or when the remaining range would hold fewer than
    /// 2 bars.
    pub fn trailing_window(&self, n: usize) -> Result<AnalyzedSeries, AnalysisError> {
        let len = self.bars.len();
        let empty_range = AnalysisError::EmptyRange {
            requested: n,
            available: len,
        };

        if len < 2 || n > len {
            return Err(empty_range);
        }
        // Dropping the final bar leaves n - 1 bars; insist on at least 2.
        if n < 3 {
            return Err(empty_range);
        }

        let start = len - n;
        let end = len - 1;

        debug!(
            requested = n,
            start, end, "trailing window selected"
        );

        Ok(AnalyzedSeries {
            bars: self.bars.slice(start, end),
            bollinger: self.bollinger.slice(start, end),
            crossover: self.crossover.slice(start, end),
        })
    }

    /// Run the edge-trigger detector over both indicator pairs of this
    /// window: Bollinger %B against the close, and the crossover position
    /// against the long moving average.
    pub fn annotate(&self) -> WindowAnnotations {
        let closes = self.bars.close_series();

        WindowAnnotations {
            bollinger_low: EdgeTrigger::below_zero().detect(&self.bollinger.percent_b, &closes),
            bollinger_high: EdgeTrigger::above_one().detect(&self.bollinger.percent_b, &closes),
            crossover_low: EdgeTrigger::below_zero()
                .detect(&self.crossover.position, &self.crossover.long_ma),
            crossover_high: EdgeTrigger::above_one()
                .detect(&self.crossover.position, &self.crossover.long_ma),
        }
    }
}
