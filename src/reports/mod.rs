//! Reports module for Budget Pilot
//!
//! Provides the allocation check and the end-of-month forecast report.

pub mod allocation;
pub mod forecast;

pub use allocation::AllocationReport;
pub use forecast::ForecastReport;
