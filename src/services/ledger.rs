//! Ledger service
//!
//! Builds validated ledgers from user input, records spending snapshots and
//! applies reallocation transfers. Every operation returns a new ledger and
//! leaves its input untouched.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info};

use crate::error::{PilotError, PilotResult};
use crate::models::{
    Category, CategorySpec, Ledger, Priority, ReallocationMode, Transfer, TransferTarget,
};

/// Service for ledger setup and mutation
pub struct LedgerService;

impl LedgerService {
    /// Build a ledger from category definitions and an overall cap
    ///
    /// Fails when the list is empty, a name is blank or repeated, a budget is
    /// negative or a priority lies outside 1..=5.
    pub fn build_ledger(specs: &[CategorySpec], total_budget: f64) -> PilotResult<Ledger> {
        if specs.is_empty() {
            return Err(PilotError::Validation(
                "At least one category is required".into(),
            ));
        }

        if !total_budget.is_finite() || total_budget < 0.0 {
            return Err(PilotError::Validation(
                "Total budget must be a non-negative number".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(specs.len());

        for spec in specs {
            let priority = Priority::new(spec.priority)
                .map_err(|e| PilotError::Validation(format!("{}: {}", spec.name.trim(), e)))?;
            let category = Category::new(&spec.name, spec.budget, priority);

            category
                .validate()
                .map_err(|e| PilotError::Validation(e.to_string()))?;

            if !seen.insert(category.name.clone()) {
                return Err(PilotError::duplicate_category(category.name));
            }

            categories.push(category);
        }

        info!(
            categories = categories.len(),
            total_budget, "built ledger"
        );

        Ok(Ledger {
            categories,
            total_budget,
        })
    }

    /// Check an already-constructed ledger (e.g. one loaded from disk)
    pub fn validate(ledger: &Ledger) -> PilotResult<()> {
        if ledger.is_empty() {
            return Err(PilotError::Validation(
                "At least one category is required".into(),
            ));
        }

        if !ledger.total_budget.is_finite() || ledger.total_budget < 0.0 {
            return Err(PilotError::Validation(
                "Total budget must be a non-negative number".into(),
            ));
        }

        let mut seen = HashSet::new();
        for category in &ledger.categories {
            category
                .validate()
                .map_err(|e| PilotError::Validation(e.to_string()))?;
            if category.name != category.name.trim() {
                return Err(PilotError::Validation(format!(
                    "Category name has surrounding whitespace: '{}'",
                    category.name
                )));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(PilotError::duplicate_category(category.name.clone()));
            }
        }

        Ok(())
    }

    /// Replace the spent-so-far figure of the named categories
    ///
    /// Categories missing from `spend` keep their current figure. Nothing is
    /// changed if any entry is rejected.
    pub fn record_spending(ledger: &Ledger, spend: &BTreeMap<String, f64>) -> PilotResult<Ledger> {
        for (name, amount) in spend {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(PilotError::Validation(format!(
                    "Spent amount for '{}' must be a non-negative number",
                    name
                )));
            }
            if !ledger.contains(name) {
                return Err(PilotError::category_not_found(name.clone()));
            }
        }

        let mut updated = ledger.clone();
        for (name, amount) in spend {
            if let Some(category) = updated.get_mut(name) {
                debug!(category = %name, spent = amount, "recorded spending");
                category.spent_so_far = *amount;
            }
        }

        Ok(updated)
    }

    /// Apply a set of transfers produced for `mode`
    ///
    /// Each source budget is reduced by its transfer amount and the target
    /// (or buffer) budget grows by the total moved, so the sum of category
    /// budgets is unchanged. In buffer mode the buffer is created on first
    /// use with the highest priority and nothing spent.
    pub fn apply_transfers(
        ledger: &Ledger,
        transfers: &[Transfer],
        mode: &ReallocationMode,
    ) -> PilotResult<Ledger> {
        let target = mode.target_name();

        if let ReallocationMode::Direct(name) = mode {
            if !ledger.contains(name) {
                return Err(PilotError::category_not_found(name.clone()));
            }
        }

        for transfer in transfers {
            if !transfer.amount_moved.is_finite() || transfer.amount_moved <= 0.0 {
                return Err(PilotError::Validation(format!(
                    "Transfer from '{}' must move a positive amount",
                    transfer.from_category
                )));
            }
            if transfer.from_category == target {
                return Err(PilotError::Validation(format!(
                    "'{}' cannot transfer to itself",
                    target
                )));
            }
            if !ledger.contains(&transfer.from_category) {
                return Err(PilotError::category_not_found(
                    transfer.from_category.clone(),
                ));
            }
            let matches_mode = match (&transfer.to, mode) {
                (TransferTarget::Buffer(to), ReallocationMode::Buffer(name))
                | (TransferTarget::Category(to), ReallocationMode::Direct(name)) => to == name,
                _ => false,
            };
            if !matches_mode {
                return Err(PilotError::Validation(format!(
                    "Transfer to '{}' does not match {} mode",
                    transfer.to, mode
                )));
            }
        }

        let mut updated = ledger.clone();
        let mut total_moved = 0.0;

        for transfer in transfers {
            if let Some(source) = updated.get_mut(&transfer.from_category) {
                source.budget -= transfer.amount_moved;
                total_moved += transfer.amount_moved;
            }
        }

        if transfers.is_empty() {
            return Ok(updated);
        }

        match updated.get_mut(target) {
            Some(receiver) => receiver.budget += total_moved,
            None => {
                // Only reachable in buffer mode; direct targets were checked above.
                updated
                    .categories
                    .push(Category::new(target, total_moved, Priority::HIGHEST));
            }
        }

        info!(
            transfers = transfers.len(),
            total_moved,
            target,
            "applied transfers"
        );

        Ok(updated)
    }
}
