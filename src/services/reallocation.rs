//! Reallocation planner
//!
//! Proposes transfers that cover a shortfall by trimming other categories,
//! lowest priority first. A single transfer never takes more than the cap
//! share of its source budget, nor more than the source has left to spend.
//! Whatever the caps leave unsourced is returned as `uncovered`.
//!
//! The planner never mutates the ledger; use
//! [`LedgerService::apply_transfers`](crate::services::LedgerService::apply_transfers)
//! to commit a plan.

use std::cmp::Ordering;

use tracing::{debug, info, warn};

use crate::config::ReallocationSettings;
use crate::error::{PilotError, PilotResult};
use crate::models::{
    Category, Ledger, LedgerForecast, ReallocationMode, ReallocationPlan, Transfer,
};

/// What decides the direct-mode target and the amount it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetBasis {
    /// Largest positive gap between forecast and budget
    Forecast,
    /// Largest amount already spent beyond budget
    Overspend,
}

/// A category chosen to receive funds, with the amount it needs
#[derive(Debug, Clone, PartialEq)]
pub struct TargetNeed {
    pub category: String,
    pub amount_needed: f64,
}

/// Pick the direct-mode target from the ledger or its forecast
pub fn pick_target(
    ledger: &Ledger,
    forecast: &LedgerForecast,
    basis: TargetBasis,
) -> Option<TargetNeed> {
    match basis {
        TargetBasis::Forecast => forecast.worst_overspend().map(|r| TargetNeed {
            category: r.category.clone(),
            amount_needed: r.gap_vs_budget,
        }),
        TargetBasis::Overspend => ledger.most_overspent().map(|c| TargetNeed {
            category: c.name.clone(),
            amount_needed: c.overspend_now(),
        }),
    }
}

/// Greedy, priority-ordered transfer planner
#[derive(Debug, Clone)]
pub struct ReallocationPlanner {
    max_cut_ratio: f64,
}

impl Default for ReallocationPlanner {
    fn default() -> Self {
        Self::from_settings(&ReallocationSettings::default())
    }
}

impl ReallocationPlanner {
    pub fn new(max_cut_ratio: f64) -> Self {
        Self { max_cut_ratio }
    }

    pub fn from_settings(settings: &ReallocationSettings) -> Self {
        Self::new(settings.max_cut_ratio)
    }

    /// Most that may be taken from `source` in one transfer
    pub fn max_reducible(&self, source: &Category) -> f64 {
        (self.max_cut_ratio * source.budget).min(source.remaining())
    }

    /// Donor order: every category except the target that still has budget
    /// left, by priority ascending, then remaining descending, then budget
    /// descending
    pub fn candidates<'a>(&self, ledger: &'a Ledger, target: &str) -> Vec<&'a Category> {
        let mut candidates: Vec<&Category> = ledger
            .categories
            .iter()
            .filter(|c| c.name != target && c.remaining() > 0.0)
            .collect();

        candidates.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| desc(a.remaining(), b.remaining()))
                .then_with(|| desc(a.budget, b.budget))
        });

        candidates
    }

    /// Plan transfers covering `amount_needed` for the given mode
    ///
    /// Returns an empty plan with nothing uncovered when `amount_needed` is
    /// not positive. Fails only on bad input: a non-finite amount or a
    /// direct target missing from the ledger.
    pub fn plan(
        &self,
        ledger: &Ledger,
        mode: &ReallocationMode,
        amount_needed: f64,
    ) -> PilotResult<ReallocationPlan> {
        if !amount_needed.is_finite() {
            return Err(PilotError::Validation(
                "Amount needed must be a finite number".into(),
            ));
        }

        if let ReallocationMode::Direct(name) = mode {
            if !ledger.contains(name) {
                return Err(PilotError::category_not_found(name.clone()));
            }
        }

        if amount_needed <= 0.0 {
            debug!(amount_needed, "nothing to reallocate");
            return Ok(ReallocationPlan::noop(mode.clone(), amount_needed));
        }

        let mut plan = ReallocationPlan::noop(mode.clone(), amount_needed);
        let target = plan.target();
        let mut still_needed = amount_needed;

        for source in self.candidates(ledger, mode.target_name()) {
            if still_needed <= 0.0 {
                break;
            }

            let move_amount = self.max_reducible(source).min(still_needed);
            if move_amount > 0.0 {
                debug!(
                    from = %source.name,
                    priority = source.priority.value(),
                    amount = move_amount,
                    "selected transfer"
                );
                plan.transfers.push(Transfer {
                    from_category: source.name.clone(),
                    from_priority: source.priority,
                    to: target.clone(),
                    amount_moved: move_amount,
                });
                still_needed -= move_amount;
            }
        }

        plan.uncovered = still_needed.max(0.0);

        if plan.uncovered > 0.0 {
            warn!(
                uncovered = plan.uncovered,
                amount_needed, "safety caps left part of the shortfall uncovered"
            );
        }
        info!(
            mode = %mode,
            transfers = plan.transfers.len(),
            moved = plan.total_moved(),
            "planned reallocation"
        );

        Ok(plan)
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
