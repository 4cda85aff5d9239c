// PeakQC - platform/mod.rs
//
// Platform abstraction layer: filesystem access and config loading.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
