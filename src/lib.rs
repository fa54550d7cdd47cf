//! Net salt thickness from top/bottom horizon picks.
//!
//! Horizon files are read into a [`LocationTable`], each location's intervals
//! are trimmed to a valid non-nested set, then swept into one net thickness
//! per grid location.

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::LocalStorage;
pub use crate::core::{etl::ThicknessEngine, pipeline::ThicknessPipeline};
pub use domain::model::{
    HorizonInterval, Location, LocationTable, OutputFormat, PickSide, ThicknessRecord, TrimStats,
};
pub use domain::services::compute_thickness;
pub use utils::error::{Result, ThicknessError};
