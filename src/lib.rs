// PeakQC - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// for pipelines that embed the aggregation instead of shelling out.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
