//! Error type shared by the engine, storage and CLI
//!
//! Bad input (blank names, negative money, days outside the month) is a
//! `Validation` error and is raised before any computation runs. An
//! uncoverable reallocation is never an error; it is reported as the plan's
//! `uncovered` amount.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PilotError {
    /// Settings that cannot be loaded, saved or used
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),

    /// Rejected input: empty ledger, blank names, negative amounts, bad days
    #[error("Validation error: {0}")]
    Validation(String),

    /// A name that matches no category in the ledger
    #[error("Category not found: {0}")]
    UnknownCategory(String),

    /// Two categories whose trimmed names collide
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    /// Writing CSV, JSON or YAML output failed
    #[error("Export error: {0}")]
    Export(String),

    /// Scenario or settings file missing, unreadable or too new
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PilotError {
    pub fn category_not_found(name: impl Into<String>) -> Self {
        Self::UnknownCategory(name.into())
    }

    pub fn duplicate_category(name: impl Into<String>) -> Self {
        Self::DuplicateCategory(name.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownCategory(_))
    }

    /// Bad input, including a duplicate category name
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DuplicateCategory(_))
    }
}

impl From<std::io::Error> for PilotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PilotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for PilotError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

pub type PilotResult<T> = Result<T, PilotError>;
