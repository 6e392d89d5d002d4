//! Configuration module for Budget Pilot
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Engine tuning (history shape, reallocation cap, simulation)

pub mod paths;
pub mod settings;

pub use paths::PilotPaths;
pub use settings::{
    HistorySettings, PlanModeKind, ReallocationSettings, Settings, SimulationSettings,
};
