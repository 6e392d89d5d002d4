//! Synthetic transaction history
//!
//! Transactions here are simulated stand-ins for real history. They exist
//! only to shape the spend curve and are never stored.

use serde::{Deserialize, Serialize};

/// Number of days in a modelled month
pub const DAYS_IN_MONTH: u32 = 30;

/// A single simulated purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticTransaction {
    /// 1-based simulated month
    pub month_index: u32,
    /// 1..=30
    pub day_of_month: u32,
    pub category: String,
    /// Always > 0
    pub amount: f64,
}

/// The full output of one history generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSet {
    pub months: u32,
    pub seed: u64,
    pub transactions: Vec<SyntheticTransaction>,
}

impl TransactionSet {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Total simulated spend for one category across all months
    pub fn total_for(&self, category: &str) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_for() {
        let set = TransactionSet {
            months: 1,
            seed: 1,
            transactions: vec![
                SyntheticTransaction {
                    month_index: 1,
                    day_of_month: 3,
                    category: "Leisure".into(),
                    amount: 12.5,
                },
                SyntheticTransaction {
                    month_index: 1,
                    day_of_month: 9,
                    category: "Leisure".into(),
                    amount: 7.5,
                },
                SyntheticTransaction {
                    month_index: 1,
                    day_of_month: 9,
                    category: "Transport".into(),
                    amount: 4.0,
                },
            ],
        };

        assert_eq!(set.len(), 3);
        assert_eq!(set.total_for("Leisure"), 20.0);
        assert_eq!(set.total_for("Groceries"), 0.0);
    }
}
