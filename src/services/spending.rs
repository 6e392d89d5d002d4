//! Current-month spending simulator
//!
//! Fills `spent_so_far` for a demo scenario: each category is assumed to
//! spend `pace_factor` of its budget by month end at an even pace, with
//! normal noise scaled to the budget. Draws never go below zero.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use crate::config::SimulationSettings;
use crate::error::{PilotError, PilotResult};
use crate::models::{Ledger, DAYS_IN_MONTH};

use super::forecast::check_day;

pub struct SpendingSimulator;

impl SpendingSimulator {
    /// Return a copy of `ledger` with simulated spend up to `day`
    pub fn simulate(
        ledger: &Ledger,
        day: u32,
        seed: u64,
        settings: &SimulationSettings,
    ) -> PilotResult<Ledger> {
        check_day(day)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let elapsed = day as f64 / DAYS_IN_MONTH as f64;
        let mut result = ledger.clone();

        for category in &mut result.categories {
            let mean = category.budget * settings.pace_factor * elapsed;
            let spread = category.budget * settings.noise_ratio;
            let noise = Normal::new(mean, spread)
                .map_err(|e| PilotError::Config(format!("Invalid spending noise: {}", e)))?;

            category.spent_so_far = noise.sample(&mut rng).max(0.0);
            debug!(
                category = %category.name,
                spent = category.spent_so_far,
                "simulated spend"
            );
        }

        info!(day, seed, total_spent = result.total_spent(), "simulated spending");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySpec;
    use crate::services::LedgerService;

    fn ledger() -> Ledger {
        LedgerService::build_ledger(&CategorySpec::defaults(), 1600.0).unwrap()
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let settings = SimulationSettings::default();
        let a = SpendingSimulator::simulate(&ledger(), 20, 123, &settings).unwrap();
        let b = SpendingSimulator::simulate(&ledger(), 20, 123, &settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_without_noise_follows_pace() {
        let settings = SimulationSettings {
            pace_factor: 0.85,
            noise_ratio: 0.0,
        };
        let simulated = SpendingSimulator::simulate(&ledger(), 15, 1, &settings).unwrap();

        let groceries = simulated.get("Groceries").unwrap();
        assert!((groceries.spent_so_far - 350.0 * 0.85 * 0.5).abs() < 1e-9);
        assert_eq!(simulated.total_budget, 1600.0);
    }

    #[test]
    fn test_spend_never_negative() {
        let settings = SimulationSettings {
            pace_factor: 0.0,
            noise_ratio: 1.0,
        };
        for seed in 0..20 {
            let simulated = SpendingSimulator::simulate(&ledger(), 1, seed, &settings).unwrap();
            assert!(simulated.categories.iter().all(|c| c.spent_so_far >= 0.0));
        }
    }

    #[test]
    fn test_budgets_untouched() {
        let base = ledger();
        let simulated =
            SpendingSimulator::simulate(&base, 10, 5, &SimulationSettings::default()).unwrap();
        for (before, after) in base.categories.iter().zip(&simulated.categories) {
            assert_eq!(before.name, after.name);
            assert_eq!(before.budget, after.budget);
            assert_eq!(before.priority, after.priority);
        }
    }

    #[test]
    fn test_rejects_bad_day() {
        let settings = SimulationSettings::default();
        assert!(SpendingSimulator::simulate(&ledger(), 0, 1, &settings)
            .unwrap_err()
            .is_validation());
        assert!(SpendingSimulator::simulate(&ledger(), 31, 1, &settings)
            .unwrap_err()
            .is_validation());
    }
}
