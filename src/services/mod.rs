//! Service layer for Budget Pilot
//!
//! The service layer holds the engine: ledger setup and mutation, synthetic
//! history, spend curves, forecasting and reallocation planning. Services
//! are stateless and never mutate their inputs.

pub mod curve;
pub mod forecast;
pub mod history;
pub mod ledger;
pub mod reallocation;
pub mod spending;

pub use curve::{CurveBuilder, MonthlyCumulative};
pub use forecast::{check_day, forecast_end_of_month, ForecastService};
pub use history::HistoryGenerator;
pub use ledger::LedgerService;
pub use reallocation::{pick_target, ReallocationPlanner, TargetBasis, TargetNeed};
pub use spending::SpendingSimulator;
