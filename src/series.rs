// =============================================================================
// Indicator & signal series
// =============================================================================
//
// Two value types shared by the whole computation pipeline:
//
// - `IndicatorSeries`: a dense series aligned to the bar date axis, one
//   value-or-undefined entry per date.  Undefined entries are ordinary data
//   (the warm-up prefix of any rolling window, degenerate denominators), not
//   errors.
// - `SignalSeries`: a sparse date -> marker-value map.  A date that carries
//   no marker is simply absent, so a renderer can tell "no marker" apart from
//   "marker at value 0".
//
// Both are immutable once built.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A dense, date-aligned numeric series where individual entries may be
/// undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    points: Vec<(NaiveDate, Option<f64>)>,
}

impl IndicatorSeries {
    /// Build a series from a date axis and an equally long value vector.
    pub fn from_values(dates: &[NaiveDate], values: Vec<Option<f64>>) -> Self {
        assert_eq!(
            dates.len(),
            values.len(),
            "date axis and value vector must have equal length"
        );
        Self {
            points: dates.iter().copied().zip(values).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The date at position `i`.
    pub fn date(&self, i: usize) -> NaiveDate {
        self.points[i].0
    }

    /// The value at position `i`, or `None` when undefined there.
    pub fn value(&self, i: usize) -> Option<f64> {
        self.points[i].1
    }

    /// Look up the value for `date`. Returns `None` both for a date outside
    /// the axis and for an undefined entry.
    pub fn at(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .and_then(|i| self.points[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.points.iter().copied()
    }

    /// Values only, in date order.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    /// Number of defined entries.
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|(_, v)| v.is_some()).count()
    }

    /// A copy of the positions `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            points: self.points[start..end].to_vec(),
        }
    }
}

/// A sparse series of chart markers keyed by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSeries {
    markers: BTreeMap<NaiveDate, f64>,
}

impl SignalSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, value: f64) {
        self.markers.insert(date, value);
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.markers.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.markers.iter().map(|(d, v)| (*d, *v))
    }
}
