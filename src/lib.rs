//! Budget Pilot - priority-aware budget forecasting and reallocation
//!
//! This library forecasts end-of-month spending per budget category and
//! proposes transfers between categories when one is heading over budget.
//! Forecasts divide the spend so far by an average cumulative spend curve
//! learned from a seeded synthetic history; transfers drain the
//! lowest-priority categories first, never taking more than a fixed share
//! of any single budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, ledger, curve, forecasts, plans)
//! - `services`: History generation, curve building, forecasting, planning
//! - `storage`: Scenario files in JSON or YAML with atomic writes
//! - `reports`, `display`: Terminal and CSV output
//! - `export`: History, curve and scenario export
//! - `cli`: Command handlers used by the binary
//!
//! # Example
//!
//! ```rust
//! use budget_pilot::models::{CategorySpec, ReallocationMode};
//! use budget_pilot::services::{LedgerService, ReallocationPlanner};
//! use std::collections::BTreeMap;
//!
//! let ledger = LedgerService::build_ledger(&CategorySpec::defaults(), 1600.0)?;
//! let mut spend = BTreeMap::new();
//! spend.insert("Groceries".to_string(), 400.0);
//! let ledger = LedgerService::record_spending(&ledger, &spend)?;
//!
//! let mode = ReallocationMode::Direct("Groceries".into());
//! let plan = ReallocationPlanner::default().plan(&ledger, &mode, 50.0)?;
//! assert_eq!(plan.transfers[0].from_category, "Leisure");
//! # Ok::<(), budget_pilot::PilotError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PilotError, PilotResult};
