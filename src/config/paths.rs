//! Path management for Budget Pilot
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_PILOT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/budget-pilot` on Linux,
//!    `~/Library/Application Support/budget-pilot` on macOS,
//!    `%APPDATA%\budget-pilot` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::PilotError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGET_PILOT_DATA_DIR";

/// Manages all paths used by Budget Pilot
#[derive(Debug, Clone)]
pub struct PilotPaths {
    base_dir: PathBuf,
}

impl PilotPaths {
    /// Create a new PilotPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, PilotError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PilotPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the export directory (<base>/exports/)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the default scenario (categories, spend, total budget)
    pub fn scenario_file(&self) -> PathBuf {
        self.data_dir().join("scenario.json")
    }

    /// Ensure the base, data and export directories exist
    pub fn ensure_directories(&self) -> Result<(), PilotError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PilotError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PilotError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| PilotError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if Budget Pilot has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, PilotError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| PilotError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("budget-pilot"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PilotPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);

        let paths = PilotPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PilotPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.export_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PilotPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.scenario_file(),
            temp_dir.path().join("data").join("scenario.json")
        );
    }
}
