// =============================================================================
// Edge-triggered breach detector
// =============================================================================
//
// Scans an oscillator-style indicator series against a fixed band and emits a
// marker only at the instant the series crosses out of the band — not for
// every bar it stays outside.  Two symmetric variants:
//
// - below-zero: fires when the value drops below 0 after sitting at or above
//   it; marker value = reference * 0.99 (nudged under the price for display).
// - above-one:  fires when the value rises above 1 after sitting at or below
//   it; marker value = reference * 1.01.
//
// The scan is a fold carrying the prior observation explicitly.  Before the
// first bar there is no prior, so the first bar can never fire; an undefined
// value satisfies neither the breach condition nor the in-band prior
// condition, which keeps the warm-up prefix of any rolling indicator silent.

use crate::series::{IndicatorSeries, SignalSeries};

/// Prior observation carried through the scan.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Prior {
    /// No bar has been examined yet.
    Start,
    /// The previous bar's indicator value was undefined.
    Undefined,
    /// The previous bar's indicator value.
    Value(f64),
}

/// Which band edge the detector watches.
#[derive(Debug, Clone, Copy)]
enum Breach {
    BelowZero,
    AboveOne,
}

/// Edge-triggered detector over one (indicator, reference) series pair.
#[derive(Debug, Clone, Copy)]
pub struct EdgeTrigger {
    breach: Breach,
}

impl EdgeTrigger {
    /// Detector for the drop below the lower band limit (0).
    pub fn below_zero() -> Self {
        Self {
            breach: Breach::BelowZero,
        }
    }

    /// Detector for the rise above the upper band limit (1).
    pub fn above_one() -> Self {
        Self {
            breach: Breach::AboveOne,
        }
    }

    /// Scan `indicator` and emit one marker per breach instant, positioned at
    /// the nudged `reference` value of that date.
    ///
    /// Both series must share the same date axis.  A breach whose reference
    /// value is undefined is suppressed — a marker cannot sit at an undefined
    /// price.
    pub fn detect(&self, indicator: &IndicatorSeries, reference: &IndicatorSeries) -> SignalSeries {
        debug_assert_eq!(indicator.len(), reference.len());

        let mut signals = SignalSeries::new();
        let mut prior = Prior::Start;

        for i in 0..indicator.len() {
            let date = indicator.date(i);
            let value = indicator.value(i);
            debug_assert_eq!(date, reference.date(i));

            let fired = match (value, prior) {
                (Some(v), Prior::Value(p)) => match self.breach {
                    Breach::BelowZero => v < 0.0 && p >= 0.0,
                    Breach::AboveOne => v > 1.0 && p <= 1.0,
                },
                _ => false,
            };

            if fired {
                if let Some(r) = reference.value(i) {
                    signals.insert(date, r * self.nudge());
                }
            }

            prior = match value {
                Some(v) => Prior::Value(v),
                None => Prior::Undefined,
            };
        }

        signals
    }

    fn nudge(&self) -> f64 {
        match self.breach {
            Breach::BelowZero => 0.99,
            Breach::AboveOne => 1.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    fn series(values: Vec<Option<f64>>) -> IndicatorSeries {
        let dates: Vec<NaiveDate> = (1..=values.len() as u32).map(d).collect();
        IndicatorSeries::from_values(&dates, values)
    }

    fn defined(values: &[f64]) -> IndicatorSeries {
        series(values.iter().copied().map(Some).collect())
    }

    #[test]
    fn fires_only_at_the_breach_instant() {
        let indicator = defined(&[0.5, -0.2, -0.1, 0.3]);
        let reference = defined(&[100.0, 90.0, 95.0, 110.0]);
        let signals = EdgeTrigger::below_zero().detect(&indicator, &reference);

        assert_eq!(signals.len(), 1);
        assert!((signals.get(d(2)).unwrap() - 89.1).abs() < 1e-12);
        assert_eq!(signals.get(d(1)), None);
        assert_eq!(signals.get(d(3)), None);
        assert_eq!(signals.get(d(4)), None);
    }

    #[test]
    fn never_fires_on_the_first_bar() {
        // First value already out of band: without a prior there is no edge.
        let indicator = defined(&[-0.4, -0.5, -0.6]);
        let reference = defined(&[10.0, 10.0, 10.0]);
        let signals = EdgeTrigger::below_zero().detect(&indicator, &reference);
        assert!(signals.is_empty());
    }

    #[test]
    fn above_one_variant_is_symmetric() {
        let indicator = defined(&[0.5, 1.2, 1.3, 0.8]);
        let reference = defined(&[100.0, 200.0, 210.0, 220.0]);
        let signals = EdgeTrigger::above_one().detect(&indicator, &reference);

        assert_eq!(signals.len(), 1);
        assert!((signals.get(d(2)).unwrap() - 202.0).abs() < 1e-12);
    }

    #[test]
    fn re_entry_and_second_breach_fire_again() {
        let indicator = defined(&[0.5, -0.2, 0.3, -0.4]);
        let reference = defined(&[100.0, 100.0, 100.0, 100.0]);
        let signals = EdgeTrigger::below_zero().detect(&indicator, &reference);
        assert_eq!(signals.len(), 2);
        assert!(signals.get(d(2)).is_some());
        assert!(signals.get(d(4)).is_some());
    }

    #[test]
    fn undefined_values_suppress_the_edge() {
        // Undefined -> negative is not an edge: the prior was not in band.
        let indicator = series(vec![None, Some(-0.5), Some(0.2), None, Some(-0.3)]);
        let reference = defined(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        let signals = EdgeTrigger::below_zero().detect(&indicator, &reference);
        // Position 1: prior undefined, no fire.  Position 4: prior undefined
        // (position 3), no fire either.
        assert!(signals.is_empty());
    }

    #[test]
    fn undefined_reference_suppresses_the_marker() {
        let indicator = defined(&[0.5, -0.2]);
        let reference = series(vec![Some(100.0), None]);
        let signals = EdgeTrigger::below_zero().detect(&indicator, &reference);
        assert!(signals.is_empty());
    }

    #[test]
    fn detection_is_a_pure_function_of_its_inputs() {
        let indicator = defined(&[0.5, -0.2, -0.1, 0.3, 1.5]);
        let reference = defined(&[100.0, 90.0, 95.0, 110.0, 120.0]);
        let detector = EdgeTrigger::below_zero();
        let first = detector.detect(&indicator, &reference);
        let second = detector.detect(&indicator, &reference);
        assert_eq!(first, second);
    }
}
