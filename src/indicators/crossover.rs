// =============================================================================
// Moving Average Crossover
// =============================================================================
//
// Two rolling means of the close with independent window lengths, a direction
// series, and its first difference:
//
//   signal   = sign(short_ma - long_ma)   (0 while either MA is undefined,
//                                          and on an exact tie)
//   position = signal_t - signal_{t-1}    (undefined at the first position)
//
// A position of +2 marks the short MA overtaking the long MA (golden cross),
// -2 the reverse.  Window ordering is not enforced; choosing a short window
// that is actually shorter is the caller's business.

use crate::errors::AnalysisError;
use crate::indicators::rolling::rolling_mean;
use crate::market_data::BarSeries;
use crate::series::IndicatorSeries;

/// Crossover parameters: the two rolling window lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverConfig {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            short_window: 50,
            long_window: 100,
        }
    }
}

impl CrossoverConfig {
    /// Apply optional overrides on top of the defaults, validating that each
    /// supplied window is positive.
    pub fn with_overrides(
        short: Option<i64>,
        long: Option<i64>,
    ) -> Result<Self, AnalysisError> {
        let defaults = Self::default();
        Ok(Self {
            short_window: validate("short-window-ma", short, defaults.short_window)?,
            long_window: validate("long-window-ma", long, defaults.long_window)?,
        })
    }
}

fn validate(
    name: &'static str,
    override_value: Option<i64>,
    default: usize,
) -> Result<usize, AnalysisError> {
    match override_value {
        None => Ok(default),
        Some(v) if v >= 1 => Ok(v as usize),
        Some(v) => Err(AnalysisError::Configuration { name, value: v }),
    }
}

/// The four crossover series, all aligned to the bar date axis.
#[derive(Debug, Clone)]
pub struct CrossoverSeries {
    pub short_ma: IndicatorSeries,
    pub long_ma: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub position: IndicatorSeries,
}

impl CrossoverSeries {
    /// Compute all four series over `bars`.
    pub fn compute(bars: &BarSeries, config: &CrossoverConfig) -> Result<Self, AnalysisError> {
        let closes = bars.closes();
        let dates = bars.dates();

        let short_ma = rolling_mean(&closes, config.short_window)?;
        let long_ma = rolling_mean(&closes, config.long_window)?;

        let signal: Vec<Option<f64>> = short_ma
            .iter()
            .zip(&long_ma)
            .map(|(s, l)| match (s, l) {
                (Some(s), Some(l)) if s > l => Some(1.0),
                (Some(s), Some(l)) if s < l => Some(-1.0),
                _ => Some(0.0),
            })
            .collect();

        let position: Vec<Option<f64>> = signal
            .iter()
            .enumerate()
            .map(|(i, current)| {
                if i == 0 {
                    None
                } else {
                    Some((*current)? - signal[i - 1]?)
                }
            })
            .collect();

        Ok(Self {
            short_ma: IndicatorSeries::from_values(&dates, short_ma),
            long_ma: IndicatorSeries::from_values(&dates, long_ma),
            signal: IndicatorSeries::from_values(&dates, signal),
            position: IndicatorSeries::from_values(&dates, position),
        })
    }

    /// A copy with every series restricted to positions `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            short_ma: self.short_ma.slice(start, end),
            long_ma: self.long_ma.slice(start, end),
            signal: self.signal.slice(start, end),
            position: self.position.slice(start, end),
        }
    }
}
