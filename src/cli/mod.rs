//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Handlers print their
//! results to stdout; diagnostics go through `tracing`.

pub mod export;
pub mod forecast;
pub mod ledger;
pub mod plan;

pub use export::{handle_export_command, ExportCommands};
pub use forecast::{handle_forecast_command, ForecastArgs};
pub use ledger::{handle_ledger_command, handle_simulate_command, handle_spend_command, SimulateArgs};
pub use plan::{handle_plan_command, PlanArgs};

use std::path::PathBuf;

use crate::config::{PilotPaths, Settings};
use crate::error::{PilotError, PilotResult};
use crate::models::{Ledger, SpendCurve, TransactionSet};
use crate::services::{CurveBuilder, HistoryGenerator};
use crate::storage::{Scenario, ScenarioRepository};

/// Everything a command needs: paths, settings and the scenario location
pub struct CliContext {
    pub paths: PilotPaths,
    pub settings: Settings,
    pub scenarios: ScenarioRepository,
}

impl CliContext {
    /// `file` overrides the default scenario location
    pub fn new(paths: PilotPaths, settings: Settings, file: Option<PathBuf>) -> Self {
        let scenario_path = file.unwrap_or_else(|| paths.scenario_file());
        Self {
            paths,
            settings,
            scenarios: ScenarioRepository::new(scenario_path),
        }
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn load_scenario(&self) -> PilotResult<Scenario> {
        if !self.scenarios.exists() {
            return Err(PilotError::Storage(format!(
                "No scenario at {}. Run 'budget-pilot init' first or pass --file.",
                self.scenarios.path().display()
            )));
        }
        self.scenarios.load()
    }

    /// Synthetic history for the ledger, settings filling unset options
    pub fn history(
        &self,
        ledger: &Ledger,
        months: Option<u32>,
        seed: Option<u64>,
    ) -> PilotResult<TransactionSet> {
        let history = &self.settings.history;
        HistoryGenerator::from_settings(history).generate(
            ledger,
            months.unwrap_or(history.months),
            seed.unwrap_or(history.seed),
        )
    }

    pub fn curve(
        &self,
        ledger: &Ledger,
        months: Option<u32>,
        seed: Option<u64>,
    ) -> PilotResult<SpendCurve> {
        Ok(CurveBuilder::build(&self.history(ledger, months, seed)?))
    }
}
