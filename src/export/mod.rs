//! Export module for Budget Pilot
//!
//! Provides data export in multiple formats:
//! - CSV: synthetic history and spend curve (spreadsheet-compatible)
//! - JSON: machine-readable scenario snapshot
//! - YAML: human-readable scenario snapshot

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_curve_csv, export_history_csv};
pub use json::{export_scenario_json, ExportMetadata, ScenarioExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_scenario_yaml;
