//! Synthetic history generator
//!
//! Simulates several months of per-day purchases for every category of a
//! ledger. Each day draws a Poisson-distributed number of purchases, and
//! each purchase a log-normal amount centred on the category's daily
//! budget. The generator owns no random state: callers pass a seed (or
//! their own seeded generator), so identical inputs always produce the
//! identical transaction set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, Poisson};
use tracing::{debug, info};

use crate::config::HistorySettings;
use crate::error::{PilotError, PilotResult};
use crate::models::{Ledger, SyntheticTransaction, TransactionSet, DAYS_IN_MONTH};

/// Floor for the daily mean so that `ln` stays finite for zero budgets
const MIN_DAILY_MEAN: f64 = 1e-6;

/// Generates reproducible synthetic transaction history
#[derive(Debug, Clone)]
pub struct HistoryGenerator {
    poisson_rate: f64,
    amount_sigma: f64,
}

impl Default for HistoryGenerator {
    fn default() -> Self {
        Self::from_settings(&HistorySettings::default())
    }
}

impl HistoryGenerator {
    pub fn new(poisson_rate: f64, amount_sigma: f64) -> Self {
        Self {
            poisson_rate,
            amount_sigma,
        }
    }

    pub fn from_settings(settings: &HistorySettings) -> Self {
        Self::new(settings.poisson_rate, settings.amount_sigma)
    }

    /// Generate `months` months of history from a fresh generator seeded
    /// with `seed`
    pub fn generate(&self, ledger: &Ledger, months: u32, seed: u64) -> PilotResult<TransactionSet> {
        let mut rng = StdRng::seed_from_u64(seed);
        let transactions = self.generate_with_rng(ledger, months, &mut rng)?;

        info!(
            months,
            seed,
            transactions = transactions.len(),
            "generated synthetic history"
        );

        Ok(TransactionSet {
            months,
            seed,
            transactions,
        })
    }

    /// Generate history drawing from a caller-owned generator
    ///
    /// Draw order is month, then category in ledger order, then day.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        ledger: &Ledger,
        months: u32,
        rng: &mut R,
    ) -> PilotResult<Vec<SyntheticTransaction>> {
        if months == 0 {
            return Err(PilotError::Validation(
                "History must cover at least one month".into(),
            ));
        }

        let counts = Poisson::new(self.poisson_rate)
            .map_err(|e| PilotError::Config(format!("Invalid Poisson rate: {}", e)))?;

        let amount_dists = ledger
            .categories
            .iter()
            .map(|c| {
                let daily_mean = (c.budget / DAYS_IN_MONTH as f64).max(MIN_DAILY_MEAN);
                LogNormal::new(daily_mean.ln(), self.amount_sigma)
                    .map_err(|e| PilotError::Config(format!("Invalid amount spread: {}", e)))
            })
            .collect::<PilotResult<Vec<_>>>()?;

        let mut transactions = Vec::new();

        for month_index in 1..=months {
            for (category, amounts) in ledger.categories.iter().zip(&amount_dists) {
                for day_of_month in 1..=DAYS_IN_MONTH {
                    let n_tx: f64 = counts.sample(rng);

                    for _ in 0..n_tx as u64 {
                        transactions.push(SyntheticTransaction {
                            month_index,
                            day_of_month,
                            category: category.name.clone(),
                            amount: amounts.sample(rng),
                        });
                    }
                }
            }
            debug!(month_index, total = transactions.len(), "simulated month");
        }

        Ok(transactions)
    }
}
