//! Ledger model
//!
//! An ordered set of categories plus an overall spending cap. The cap is
//! independent of the sum of category budgets; any difference is reported
//! as an allocation gap.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Outcome of comparing the category budgets with the overall cap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocationStatus {
    /// Money left to distribute across categories
    Unallocated(f64),
    /// Category budgets exceed the cap by this much
    Overallocated(f64),
    Balanced,
}

/// Ordered collection of categories with an overall cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub categories: Vec<Category>,
    pub total_budget: f64,
}

impl Ledger {
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Sum of all category budgets
    pub fn total_planned(&self) -> f64 {
        self.categories.iter().map(|c| c.budget).sum()
    }

    /// Sum of spending across all categories
    pub fn total_spent(&self) -> f64 {
        self.categories.iter().map(|c| c.spent_so_far).sum()
    }

    /// Overall cap minus planned budgets (+ unallocated, - overallocated)
    pub fn allocation_gap(&self) -> f64 {
        self.total_budget - self.total_planned()
    }

    pub fn allocation_status(&self) -> AllocationStatus {
        let gap = self.allocation_gap();
        if gap > 0.0 {
            AllocationStatus::Unallocated(gap)
        } else if gap < 0.0 {
            AllocationStatus::Overallocated(-gap)
        } else {
            AllocationStatus::Balanced
        }
    }

    /// Share of the overall cap assigned to categories, capped at 1
    ///
    /// `None` when the cap is zero.
    pub fn allocated_fraction(&self) -> Option<f64> {
        if self.total_budget > 0.0 {
            Some((self.total_planned() / self.total_budget).min(1.0))
        } else {
            None
        }
    }

    /// The category furthest above its budget right now, if any
    pub fn most_overspent(&self) -> Option<&Category> {
        self.categories
            .iter()
            .filter(|c| c.overspend_now() > 0.0)
            .fold(None, |best: Option<&Category>, c| match best {
                Some(b) if b.overspend_now() >= c.overspend_now() => Some(b),
                _ => Some(c),
            })
    }
}
