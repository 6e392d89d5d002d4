//! End-of-month forecast results

use serde::{Deserialize, Serialize};

/// How a forecast figure was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    /// Spent so far divided by the curve's cumulative fraction
    Curve,
    /// Linear extrapolation of the current pace
    Pace,
}

/// Projection for a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub category: String,
    pub budget: f64,
    pub spent_so_far: f64,
    pub forecast_total: f64,
    /// forecast_total - budget; positive means projected overspend
    pub gap_vs_budget: f64,
    pub method: ForecastMethod,
}

impl ForecastResult {
    pub fn is_projected_overspend(&self) -> bool {
        self.gap_vs_budget > 0.0
    }
}

/// Forecasts for every category of a ledger, in ledger order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerForecast {
    pub day: u32,
    pub results: Vec<ForecastResult>,
}

impl LedgerForecast {
    pub fn get(&self, category: &str) -> Option<&ForecastResult> {
        self.results.iter().find(|r| r.category == category)
    }

    pub fn total_forecast(&self) -> f64 {
        self.results.iter().map(|r| r.forecast_total).sum()
    }

    /// The category with the largest positive projected overspend
    pub fn worst_overspend(&self) -> Option<&ForecastResult> {
        self.results
            .iter()
            .filter(|r| r.is_projected_overspend())
            .fold(None, |best: Option<&ForecastResult>, r| match best {
                Some(b) if b.gap_vs_budget >= r.gap_vs_budget => Some(b),
                _ => Some(r),
            })
    }
}

/// Whole-ledger projection against the overall cap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRisk {
    pub day: u32,
    pub total_spent: f64,
    pub projected_total: f64,
    pub total_budget: f64,
    /// projected_total - total_budget; positive means the cap is at risk
    pub over_by: f64,
}

impl PaceRisk {
    pub fn is_at_risk(&self) -> bool {
        self.over_by > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(category: &str, gap: f64) -> ForecastResult {
        ForecastResult {
            category: category.into(),
            budget: 100.0,
            spent_so_far: 50.0,
            forecast_total: 100.0 + gap,
            gap_vs_budget: gap,
            method: ForecastMethod::Pace,
        }
    }

    #[test]
    fn test_worst_overspend() {
        let forecast = LedgerForecast {
            day: 10,
            results: vec![result("A", 20.0), result("B", -5.0), result("C", 45.0)],
        };

        assert_eq!(forecast.worst_overspend().unwrap().category, "C");
        assert_eq!(forecast.total_forecast(), 360.0);
        assert!(forecast.get("B").is_some());
    }

    #[test]
    fn test_no_overspend() {
        let forecast = LedgerForecast {
            day: 10,
            results: vec![result("A", 0.0), result("B", -5.0)],
        };
        assert!(forecast.worst_overspend().is_none());
    }
}
