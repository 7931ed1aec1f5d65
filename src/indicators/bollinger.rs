// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (rolling mean of the close), an
// upper band (mean + k*σ), and a lower band (mean - k*σ), here joined by a
// rolling volume mean and two normalised series:
//
//   bandwidth = (upper - lower) / mean
//   %B        = (close - lower) / (upper - lower)
//
// Both normalised series are undefined wherever the band has zero width, and
// bandwidth is additionally undefined for a zero mean.  Degenerate
// denominators never raise; they produce undefined positions.

use crate::errors::AnalysisError;
use crate::indicators::rolling::{rolling_mean, rolling_std};
use crate::market_data::BarSeries;
use crate::series::IndicatorSeries;

/// Band parameters: rolling window length and the deviation multiplier.
#[derive(Debug, Clone, Copy)]
pub struct BollingerConfig {
    pub window: usize,
    pub num_std: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            window: 20,
            num_std: 2.0,
        }
    }
}

/// The six band series, all aligned to the bar date axis.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub mean: IndicatorSeries,
    pub upper: IndicatorSeries,
    pub lower: IndicatorSeries,
    pub volume_mean: IndicatorSeries,
    pub bandwidth: IndicatorSeries,
    pub percent_b: IndicatorSeries,
}

impl BollingerSeries {
    /// Compute all six series over `bars`.
    pub fn compute(bars: &BarSeries, config: &BollingerConfig) -> Result<Self, AnalysisError> {
        let closes = bars.closes();
        let volumes = bars.volumes();
        let dates = bars.dates();

        let mean = rolling_mean(&closes, config.window)?;
        let std_dev = rolling_std(&closes, config.window)?;
        let volume_mean = rolling_mean(&volumes, config.window)?;

        let upper: Vec<Option<f64>> = mean
            .iter()
            .zip(&std_dev)
            .map(|(m, s)| Some((*m)? + config.num_std * (*s)?))
            .collect();
        let lower: Vec<Option<f64>> = mean
            .iter()
            .zip(&std_dev)
            .map(|(m, s)| Some((*m)? - config.num_std * (*s)?))
            .collect();

        let bandwidth: Vec<Option<f64>> = upper
            .iter()
            .zip(&lower)
            .zip(&mean)
            .map(|((u, l), m)| {
                let (u, l, m) = (u.as_ref()?, l.as_ref()?, m.as_ref()?);
                if *m == 0.0 || u == l {
                    None
                } else {
                    Some((u - l) / m)
                }
            })
            .collect();

        let percent_b: Vec<Option<f64>> = upper
            .iter()
            .zip(&lower)
            .zip(&closes)
            .map(|((u, l), c)| {
                let (u, l, c) = (u.as_ref()?, l.as_ref()?, c.as_ref()?);
                if u == l {
                    None
                } else {
                    Some((c - l) / (u - l))
                }
            })
            .collect();

        Ok(Self {
            mean: IndicatorSeries::from_values(&dates, mean),
            upper: IndicatorSeries::from_values(&dates, upper),
            lower: IndicatorSeries::from_values(&dates, lower),
            volume_mean: IndicatorSeries::from_values(&dates, volume_mean),
            bandwidth: IndicatorSeries::from_values(&dates, bandwidth),
            percent_b: IndicatorSeries::from_values(&dates, percent_b),
        })
    }

    /// A copy with every series restricted to positions `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            mean: self.mean.slice(start, end),
            upper: self.upper.slice(start, end),
            lower: self.lower.slice(start, end),
            volume_mean: self.volume_mean.slice(start, end),
            bandwidth: self.bandwidth.slice(start, end),
            percent_b: self.percent_b.slice(start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::DailyBar;
    use chrono::NaiveDate;

    fn bars_from_closes(closes: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 100.0 + i as f64,
            })
            .collect();
        BarSeries::from_bars(bars).unwrap()
    }

    fn small_config(window: usize) -> BollingerConfig {
        BollingerConfig {
            window,
            num_std: 2.0,
        }
    }

    #[test]
    fn warmup_prefix_is_undefined() {
        let bars = bars_from_closes(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let bb = BollingerSeries::compute(&bars, &small_config(3)).unwrap();
        for i in 0..2 {
            assert_eq!(bb.mean.value(i), None);
            assert_eq!(bb.upper.value(i), None);
            assert_eq!(bb.lower.value(i), None);
            assert_eq!(bb.volume_mean.value(i), None);
        }
        assert!(bb.mean.value(2).is_some());
        assert!(bb.volume_mean.value(2).is_some());
    }

    #[test]
    fn band_ordering_holds_wherever_defined() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let bars = bars_from_closes(&closes);
        let bb = BollingerSeries::compute(&bars, &BollingerConfig::default()).unwrap();
        let mut checked = 0;
        for i in 0..bars.len() {
            if let (Some(u), Some(m), Some(l)) =
                (bb.upper.value(i), bb.mean.value(i), bb.lower.value(i))
            {
                assert!(l <= m && m <= u, "band ordering violated at {i}");
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn known_values_with_window_three() {
        let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0]);
        let bb = BollingerSeries::compute(&bars, &small_config(3)).unwrap();
        // Window [1,2,3]: mean 2, sample std 1 => upper 4, lower 0.
        assert!((bb.mean.value(2).unwrap() - 2.0).abs() < 1e-12);
        assert!((bb.upper.value(2).unwrap() - 4.0).abs() < 1e-12);
        assert!((bb.lower.value(2).unwrap() - 0.0).abs() < 1e-12);
        // %B of close 3 within [0, 4] = 0.75.
        assert!((bb.percent_b.value(2).unwrap() - 0.75).abs() < 1e-12);
        // Bandwidth = (4 - 0) / 2 = 2.
        assert!((bb.bandwidth.value(2).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn constant_closes_collapse_the_band() {
        // 25 identical closes, window 20: all three bands coincide from
        // position 19 on, so the normalised series are undefined there.
        let bars = bars_from_closes(&[50.0; 25]);
        let bb = BollingerSeries::compute(&bars, &BollingerConfig::default()).unwrap();
        for i in 19..25 {
            let mean = bb.mean.value(i).unwrap();
            assert!((bb.upper.value(i).unwrap() - mean).abs() < 1e-12);
            assert!((bb.lower.value(i).unwrap() - mean).abs() < 1e-12);
            assert_eq!(bb.percent_b.value(i), None);
            assert_eq!(bb.bandwidth.value(i), None);
        }
    }

    #[test]
    fn zero_mean_leaves_bandwidth_undefined() {
        // Mean of [-5, 5] is zero while the band has width.
        let bars = bars_from_closes(&[-5.0, 5.0, 3.0]);
        let bb = BollingerSeries::compute(&bars, &small_config(2)).unwrap();
        assert_eq!(bb.mean.value(1), Some(0.0));
        assert_eq!(bb.bandwidth.value(1), None);
        // %B only needs band width, so it stays defined.
        assert!(bb.percent_b.value(1).is_some());
    }

    #[test]
    fn volume_mean_tracks_volume_not_close() {
        let bars = bars_from_closes(&[10.0, 10.0, 10.0]);
        let bb = BollingerSeries::compute(&bars, &small_config(3)).unwrap();
        // Volumes are 100, 101, 102.
        assert!((bb.volume_mean.value(2).unwrap() - 101.0).abs() < 1e-12);
    }

    #[test]
    fn zero_window_is_a_configuration_error() {
        let bars = bars_from_closes(&[1.0, 2.0]);
        let result = BollingerSeries::compute(&bars, &small_config(0));
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration { value: 0, .. })
        ));
    }
}
