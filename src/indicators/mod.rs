// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free derivations over the daily bar series.  Every
// computed position is value-or-undefined so callers are forced to handle
// insufficient-history and numerical-edge-case scenarios; only a structurally
// invalid window length is an error.

pub mod bollinger;
pub mod crossover;
pub mod rolling;

pub use bollinger::{BollingerConfig, BollingerSeries};
pub use crossover::{CrossoverConfig, CrossoverSeries};
