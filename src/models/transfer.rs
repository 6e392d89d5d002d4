//! Budget transfer models
//!
//! A transfer moves planned budget from one category to another category
//! or to the overspend buffer. Transfers are proposals until applied.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Priority;

/// Where a reallocation routes the money it collects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "target", rename_all = "lowercase")]
pub enum ReallocationMode {
    /// Into a virtual buffer category with the given name
    Buffer(String),
    /// Straight into the named category
    Direct(String),
}

impl ReallocationMode {
    /// The name of the category receiving the funds
    pub fn target_name(&self) -> &str {
        match self {
            Self::Buffer(name) | Self::Direct(name) => name,
        }
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }

    fn transfer_target(&self) -> TransferTarget {
        match self {
            Self::Buffer(name) => TransferTarget::Buffer(name.clone()),
            Self::Direct(name) => TransferTarget::Category(name.clone()),
        }
    }
}

impl fmt::Display for ReallocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer(name) => write!(f, "buffer ({})", name),
            Self::Direct(name) => write!(f, "direct ({})", name),
        }
    }
}

/// Destination of a single transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum TransferTarget {
    Category(String),
    Buffer(String),
}

impl TransferTarget {
    pub fn name(&self) -> &str {
        match self {
            Self::Category(name) | Self::Buffer(name) => name,
        }
    }
}

impl fmt::Display for TransferTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A proposed movement of planned budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from_category: String,
    pub from_priority: Priority,
    pub to: TransferTarget,
    /// Always > 0
    pub amount_moved: f64,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} from {} (priority {}) to {}",
            self.amount_moved, self.from_category, self.from_priority, self.to
        )
    }
}

/// Output of the reallocation planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReallocationPlan {
    pub mode: ReallocationMode,
    pub amount_needed: f64,
    pub transfers: Vec<Transfer>,
    /// Portion of `amount_needed` the safety caps left unsourced
    pub uncovered: f64,
}

impl ReallocationPlan {
    /// A plan that moves nothing and owes nothing
    pub fn noop(mode: ReallocationMode, amount_needed: f64) -> Self {
        Self {
            mode,
            amount_needed,
            transfers: Vec::new(),
            uncovered: 0.0,
        }
    }

    pub(crate) fn target(&self) -> TransferTarget {
        self.mode.transfer_target()
    }

    pub fn total_moved(&self) -> f64 {
        self.transfers.iter().map(|t| t.amount_moved).sum()
    }

    pub fn is_fully_covered(&self) -> bool {
        self.uncovered <= 0.0
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_target() {
        let buffer = ReallocationMode::Buffer("Overspend buffer".into());
        let direct = ReallocationMode::Direct("Groceries".into());

        assert!(buffer.is_buffer());
        assert_eq!(direct.target_name(), "Groceries");
        assert_eq!(
            buffer.transfer_target(),
            TransferTarget::Buffer("Overspend buffer".into())
        );
        assert_eq!(
            direct.transfer_target(),
            TransferTarget::Category("Groceries".into())
        );
    }

    #[test]
    fn test_plan_totals() {
        let plan = ReallocationPlan {
            mode: ReallocationMode::Direct("Groceries".into()),
            amount_needed: 100.0,
            transfers: vec![
                Transfer {
                    from_category: "Leisure".into(),
                    from_priority: Priority::new(2).unwrap(),
                    to: TransferTarget::Category("Groceries".into()),
                    amount_moved: 60.0,
                },
                Transfer {
                    from_category: "Eating out".into(),
                    from_priority: Priority::new(3).unwrap(),
                    to: TransferTarget::Category("Groceries".into()),
                    amount_moved: 15.0,
                },
            ],
            uncovered: 25.0,
        };

        assert_eq!(plan.total_moved(), 75.0);
        assert!(!plan.is_fully_covered());
        assert_eq!(
            plan.transfers[0].to_string(),
            "60.00 from Leisure (priority 2) to Groceries"
        );
    }

    #[test]
    fn test_mode_serde_shape() {
        let json = serde_json::to_string(&ReallocationMode::Direct("Groceries".into())).unwrap();
        assert_eq!(json, r#"{"mode":"direct","target":"Groceries"}"#);
    }
}
