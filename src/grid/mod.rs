// src/grid/mod.rs
//! Sweep and heatmap evaluation on top of the pricing kernel

pub mod config;
pub mod heatmap;
pub mod sweep;

pub use config::GridConfig;
pub use heatmap::{heatmap, heatmap_with_config, HeatmapGrid};
pub use sweep::{sweep, sweep_raw, sweep_with_config, SweepPoint, SweepResult, SweepSpec, SweepVariable};
