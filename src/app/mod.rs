// PeakQC - app/mod.rs
//
// Application layer: orchestration of a single aggregation run.
// Dependencies: core and platform layers.

pub mod aggregate;
