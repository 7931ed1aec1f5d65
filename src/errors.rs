// =============================================================================
// Analysis error taxonomy
// =============================================================================
//
// Only structural misuse surfaces as an error: a non-positive window length or
// a trailing-window request the series cannot satisfy.  Numeric degeneracies
// (insufficient history, zero-width bands, zero denominators) are absorbed
// into `None` values inside the indicator series and never raise.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A rolling computation was asked for a window of zero or negative bars.
    #[error("invalid {name}: {value} (window length must be at least 1 bar)")]
    Configuration { name: &'static str, value: i64 },

    /// A trailing window was requested that the series cannot provide.
    #[error(
        "cannot take a {requested}-bar trailing window from a {available}-bar series"
    )]
    EmptyRange { requested: usize, available: usize },
}
