//! Storage layer for Budget Pilot
//!
//! Scenario files in JSON or YAML with atomic writes and automatic
//! directory creation.

pub mod file_io;
pub mod scenario;

pub use file_io::{read_required, write_atomic, DataFormat};
pub use scenario::{Scenario, ScenarioRepository, SCENARIO_SCHEMA_VERSION};

use tracing::info;

use crate::config::{PilotPaths, Settings};
use crate::error::PilotError;
use crate::models::CategorySpec;
use crate::services::LedgerService;

/// Total budget of the default scenario
pub const DEFAULT_TOTAL_BUDGET: f64 = 1600.0;

/// Initialize storage for a fresh installation
///
/// Writes default settings and the default scenario unless they already
/// exist. Returns `true` when anything was created.
pub fn initialize_storage(paths: &PilotPaths) -> Result<bool, PilotError> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created = true;
    }

    let repo = ScenarioRepository::new(paths.scenario_file());
    if !repo.exists() {
        let ledger = LedgerService::build_ledger(&CategorySpec::defaults(), DEFAULT_TOTAL_BUDGET)?;
        repo.save(&Scenario::new(ledger))?;
        created = true;
    }

    if created {
        info!(base = %paths.base_dir().display(), "initialized storage");
    }
    Ok(created)
}
