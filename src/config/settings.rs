//! User settings for Budget Pilot
//!
//! Manages the tunable constants of the forecasting and reallocation engine:
//! synthetic history shape, reallocation safety cap, spending simulation and
//! display preferences.

use serde::{Deserialize, Serialize};

use super::paths::PilotPaths;
use crate::error::PilotError;

/// Default reallocation addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanModeKind {
    /// Route the shortfall into a virtual overspend buffer
    Buffer,
    /// Route the shortfall straight into the overspending category
    #[default]
    Direct,
}

/// Synthetic history generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Number of simulated months
    #[serde(default = "default_months")]
    pub months: u32,
    /// Seed for the history generator
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Expected transactions per category per day
    #[serde(default = "default_poisson_rate")]
    pub poisson_rate: f64,
    /// Standard deviation of the underlying normal of transaction amounts
    #[serde(default = "default_amount_sigma")]
    pub amount_sigma: f64,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            months: default_months(),
            seed: default_seed(),
            poisson_rate: default_poisson_rate(),
            amount_sigma: default_amount_sigma(),
        }
    }
}

/// Reallocation planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReallocationSettings {
    /// Largest share of a source budget a single transfer may take
    #[serde(default = "default_max_cut_ratio")]
    pub max_cut_ratio: f64,
    /// Mode used when none is given on the command line
    #[serde(default)]
    pub default_mode: PlanModeKind,
    /// Name of the buffer pseudo-category
    #[serde(default = "default_buffer_name")]
    pub buffer_name: String,
}

impl Default for ReallocationSettings {
    fn default() -> Self {
        Self {
            max_cut_ratio: default_max_cut_ratio(),
            default_mode: PlanModeKind::default(),
            buffer_name: default_buffer_name(),
        }
    }
}

/// Current-month spending simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Share of the budget expected to be spent by month end
    #[serde(default = "default_pace_factor")]
    pub pace_factor: f64,
    /// Standard deviation as a share of the budget
    #[serde(default = "default_noise_ratio")]
    pub noise_ratio: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            pace_factor: default_pace_factor(),
            noise_ratio: default_noise_ratio(),
        }
    }
}

/// User settings for Budget Pilot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub reallocation: ReallocationSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_months() -> u32 {
    3
}

fn default_seed() -> u64 {
    42
}

fn default_poisson_rate() -> f64 {
    0.9
}

fn default_amount_sigma() -> f64 {
    0.6
}

fn default_max_cut_ratio() -> f64 {
    0.30
}

fn default_buffer_name() -> String {
    "Overspend buffer".to_string()
}

fn default_pace_factor() -> f64 {
    0.85
}

fn default_noise_ratio() -> f64 {
    0.10
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            history: HistorySettings::default(),
            reallocation: ReallocationSettings::default(),
            simulation: SimulationSettings::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PilotPaths) -> Result<Self, PilotError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PilotError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PilotError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PilotPaths) -> Result<(), PilotError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PilotError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PilotError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<(), PilotError> {
        if self.history.months == 0 {
            return Err(PilotError::Config("history.months must be at least 1".into()));
        }
        if !(self.history.poisson_rate.is_finite() && self.history.poisson_rate > 0.0) {
            return Err(PilotError::Config(
                "history.poisson_rate must be a positive number".into(),
            ));
        }
        if !(self.history.amount_sigma.is_finite() && self.history.amount_sigma > 0.0) {
            return Err(PilotError::Config(
                "history.amount_sigma must be a positive number".into(),
            ));
        }
        let cut = self.reallocation.max_cut_ratio;
        if !(cut.is_finite() && cut > 0.0 && cut <= 1.0) {
            return Err(PilotError::Config(
                "reallocation.max_cut_ratio must be in (0, 1]".into(),
            ));
        }
        if self.reallocation.buffer_name.trim().is_empty() {
            return Err(PilotError::Config(
                "reallocation.buffer_name cannot be empty".into(),
            ));
        }
        if !(self.simulation.pace_factor.is_finite() && self.simulation.pace_factor >= 0.0)
            || !(self.simulation.noise_ratio.is_finite() && self.simulation.noise_ratio >= 0.0)
        {
            return Err(PilotError::Config(
                "simulation factors must be non-negative numbers".into(),
            ));
        }
        Ok(())
    }
}
