// =============================================================================
// Signals Module
// =============================================================================
//
// Turns continuous indicator series into sparse chart markers: an
// edge-triggered detector that fires once per breach reversal instead of for
// every bar spent outside the band.

pub mod edge_trigger;

pub use edge_trigger::EdgeTrigger;
