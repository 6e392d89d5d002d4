//! Scenario repository
//!
//! A scenario is the persisted ledger plus the day its spend figures refer
//! to. It is read once per command and written back whole.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PilotError;
use crate::models::{Ledger, DAYS_IN_MONTH};
use crate::services::{check_day, LedgerService};

use super::file_io::{read_required, write_atomic};

/// Current scenario file schema
pub const SCENARIO_SCHEMA_VERSION: u32 = 1;

/// Serializable scenario file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(flatten)]
    pub ledger: Ledger,

    /// Day of month the spend figures were taken on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of_day: Option<u32>,
}

fn default_schema_version() -> u32 {
    SCENARIO_SCHEMA_VERSION
}

impl Scenario {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            schema_version: SCENARIO_SCHEMA_VERSION,
            ledger,
            as_of_day: None,
        }
    }

    /// Day to forecast for: the explicit one, else the recorded one
    pub fn resolve_day(&self, day: Option<u32>) -> Result<u32, PilotError> {
        let day = day.or(self.as_of_day).ok_or_else(|| {
            PilotError::Validation(format!(
                "No day given and the scenario records none; pass --day 1..={}",
                DAYS_IN_MONTH
            ))
        })?;
        check_day(day)
    }
}

/// Loads and stores a scenario file
pub struct ScenarioRepository {
    path: PathBuf,
}

impl ScenarioRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and validate the scenario
    pub fn load(&self) -> Result<Scenario, PilotError> {
        let scenario: Scenario = read_required(&self.path)?;

        if scenario.schema_version > SCENARIO_SCHEMA_VERSION {
            return Err(PilotError::Storage(format!(
                "{} uses schema version {}, newer than supported {}",
                self.path.display(),
                scenario.schema_version,
                SCENARIO_SCHEMA_VERSION
            )));
        }

        LedgerService::validate(&scenario.ledger)?;
        debug!(path = %self.path.display(), "loaded scenario");
        Ok(scenario)
    }

    pub fn save(&self, scenario: &Scenario) -> Result<(), PilotError> {
        write_atomic(&self.path, scenario)?;
        debug!(path = %self.path.display(), "saved scenario");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySpec;
    use tempfile::TempDir;

    fn scenario() -> Scenario {
        let ledger = LedgerService::build_ledger(&CategorySpec::defaults(), 1600.0).unwrap();
        Scenario::new(ledger)
    }

    #[test]
    fn test_save_and_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ScenarioRepository::new(temp_dir.path().join("scenario.json"));
        assert!(!repo.exists());

        let mut original = scenario();
        original.as_of_day = Some(12);
        repo.save(&original).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_save_and_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ScenarioRepository::new(temp_dir.path().join("scenario.yml"));

        repo.save(&scenario()).unwrap();
        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("total_budget: 1600"));

        assert_eq!(repo.load().unwrap(), scenario());
    }

    #[test]
    fn test_hand_written_file_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mine.json");
        std::fs::write(
            &path,
            r#"{
                "total_budget": 500,
                "categories": [
                    {"name": "Rent", "budget": 400, "priority": 5},
                    {"name": "Fun", "budget": 100, "priority": 1, "spent_so_far": 20}
                ]
            }"#,
        )
        .unwrap();

        let loaded = ScenarioRepository::new(path).load().unwrap();
        assert_eq!(loaded.schema_version, SCENARIO_SCHEMA_VERSION);
        assert_eq!(loaded.as_of_day, None);
        assert_eq!(loaded.ledger.get("Rent").unwrap().spent_so_far, 0.0);
        assert_eq!(loaded.ledger.total_spent(), 20.0);
    }

    #[test]
    fn test_load_rejects_invalid_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"total_budget": 100, "categories": [
                {"name": "A", "budget": 50, "priority": 2},
                {"name": "A", "budget": 50, "priority": 3}
            ]}"#,
        )
        .unwrap();

        let err = ScenarioRepository::new(path).load().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_resolve_day() {
        let mut s = scenario();
        assert!(s.resolve_day(None).unwrap_err().is_validation());
        assert_eq!(s.resolve_day(Some(3)).unwrap(), 3);

        s.as_of_day = Some(20);
        assert_eq!(s.resolve_day(None).unwrap(), 20);
        assert_eq!(s.resolve_day(Some(5)).unwrap(), 5);
        assert!(s.resolve_day(Some(0)).unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_day_rejects_recorded_day_out_of_range() {
        let mut s = scenario();
        s.as_of_day = Some(45);

        let err = s.resolve_day(None).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("between 1 and 30"));
        assert_eq!(s.resolve_day(Some(30)).unwrap(), 30);
    }
}
