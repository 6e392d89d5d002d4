//! Category model
//!
//! A category is a spending bucket with a planned monthly budget, a
//! protection priority and the amount already spent this month.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protection priority of a category, 1 (low) to 5 (high)
///
/// Lower priorities are drained first when budget has to be reallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Highest protection; used for the buffer pseudo-category
    pub const HIGHEST: Priority = Priority(Self::MAX);

    pub fn new(value: u8) -> Result<Self, CategoryValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CategoryValidationError::PriorityOutOfRange(value))
        }
    }

    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = CategoryValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input record used to set up a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub budget: f64,
    pub priority: u8,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, budget: f64, priority: u8) -> Self {
        Self {
            name: name.into(),
            budget,
            priority,
        }
    }

    /// The categories a fresh scenario starts with
    pub fn defaults() -> Vec<CategorySpec> {
        vec![
            CategorySpec::new("Groceries", 350.0, 5),
            CategorySpec::new("Eating out", 250.0, 3),
            CategorySpec::new("Leisure", 200.0, 2),
            CategorySpec::new("Transport", 100.0, 4),
        ]
    }
}

/// A budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique, trimmed, non-empty name
    pub name: String,

    /// Planned monthly allocation
    pub budget: f64,

    pub priority: Priority,

    /// Amount spent so far this month
    #[serde(default)]
    pub spent_so_far: f64,
}

impl Category {
    /// Create a new category with nothing spent yet
    pub fn new(name: impl Into<String>, budget: f64, priority: Priority) -> Self {
        Self {
            name: name.into().trim().to_string(),
            budget,
            priority,
            spent_so_far: 0.0,
        }
    }

    /// Budget minus spent; negative once the category is overspent
    pub fn remaining(&self) -> f64 {
        self.budget - self.spent_so_far
    }

    /// How far spending already exceeds the budget, or zero
    pub fn overspend_now(&self) -> f64 {
        (self.spent_so_far - self.budget).max(0.0)
    }

    pub fn is_overspent(&self) -> bool {
        self.spent_so_far > self.budget
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(CategoryValidationError::NegativeBudget);
        }

        if !self.spent_so_far.is_finite() || self.spent_so_far < 0.0 {
            return Err(CategoryValidationError::NegativeSpend);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NegativeBudget,
    NegativeSpend,
    PriorityOutOfRange(u8),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NegativeBudget => write!(f, "Budget must be a non-negative number"),
            Self::NegativeSpend => write!(f, "Spent amount must be a non-negative number"),
            Self::PriorityOutOfRange(value) => {
                write!(f, "Priority must be between 1 and 5 (got {})", value)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
