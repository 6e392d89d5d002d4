//! Core data models for Budget Pilot
//!
//! This module contains the data structures of the forecasting and
//! reallocation engine: categories and ledgers, synthetic history, the
//! spend curve, forecasts and transfer plans.

pub mod category;
pub mod curve;
pub mod forecast;
pub mod history;
pub mod ledger;
pub mod transfer;

pub use category::{Category, CategorySpec, CategoryValidationError, Priority};
pub use curve::{clamp_fraction, CurvePoint, SpendCurve, MAX_FRACTION, MIN_FRACTION};
pub use forecast::{ForecastMethod, ForecastResult, LedgerForecast, PaceRisk};
pub use history::{SyntheticTransaction, TransactionSet, DAYS_IN_MONTH};
pub use ledger::{AllocationStatus, Ledger};
pub use transfer::{ReallocationMode, ReallocationPlan, Transfer, TransferTarget};
