//! End-of-month forecaster
//!
//! Projects each category's full-month spend from its spend so far. When
//! the curve knows the (category, day) pair, the projection is
//! `spent / fraction`; otherwise it extrapolates the current pace linearly.

use tracing::debug;

use crate::error::{PilotError, PilotResult};
use crate::models::{
    clamp_fraction, ForecastMethod, ForecastResult, Ledger, LedgerForecast, PaceRisk, SpendCurve,
    DAYS_IN_MONTH,
};

/// Project one category's month-end spend
///
/// `day = 0` is treated as day 1 on the pace path.
pub fn forecast_end_of_month(
    spent_so_far: f64,
    day: u32,
    curve: &SpendCurve,
    category: &str,
) -> (f64, ForecastMethod) {
    match curve.fraction(category, day) {
        Some(fraction) => (spent_so_far / clamp_fraction(fraction), ForecastMethod::Curve),
        None => (pace_projection(spent_so_far, day), ForecastMethod::Pace),
    }
}

fn pace_projection(spent_so_far: f64, day: u32) -> f64 {
    spent_so_far * (DAYS_IN_MONTH as f64 / day.max(1) as f64)
}

/// Reject a day of month outside `1..=DAYS_IN_MONTH`
pub fn check_day(day: u32) -> PilotResult<u32> {
    if (1..=DAYS_IN_MONTH).contains(&day) {
        Ok(day)
    } else {
        Err(PilotError::Validation(format!(
            "Day of month must be between 1 and {} (got {})",
            DAYS_IN_MONTH, day
        )))
    }
}

pub struct ForecastService;

impl ForecastService {
    /// Forecast every category of the ledger for the given day
    pub fn forecast(ledger: &Ledger, day: u32, curve: &SpendCurve) -> PilotResult<LedgerForecast> {
        check_day(day)?;

        let results = ledger
            .categories
            .iter()
            .map(|c| {
                let (forecast_total, method) =
                    forecast_end_of_month(c.spent_so_far, day, curve, &c.name);
                debug!(
                    category = %c.name,
                    spent = c.spent_so_far,
                    forecast = forecast_total,
                    ?method,
                    "forecast category"
                );
                ForecastResult {
                    category: c.name.clone(),
                    budget: c.budget,
                    spent_so_far: c.spent_so_far,
                    forecast_total,
                    gap_vs_budget: forecast_total - c.budget,
                    method,
                }
            })
            .collect();

        Ok(LedgerForecast { day, results })
    }

    /// Project total spending at the current pace against the overall cap
    pub fn project_total(ledger: &Ledger, day: u32) -> PilotResult<PaceRisk> {
        check_day(day)?;

        let total_spent = ledger.total_spent();
        let projected_total = pace_projection(total_spent, day);

        Ok(PaceRisk {
            day,
            total_spent,
            projected_total,
            total_budget: ledger.total_budget,
            over_by: projected_total - ledger.total_budget,
        })
    }
}
