//! Spend-curve builder
//!
//! Turns a synthetic transaction set into the average cumulative share of
//! monthly spend reached by each day of the month, per category.
//!
//! Steps:
//! 1. sum amounts per (month, category, day)
//! 2. densify every (month, category) seen in the data to days 1..=30,
//!    filling gaps with zero
//! 3. running cumulative sum across the days of each (month, category)
//! 4. divide by that month's total (0.0 when the total is zero)
//! 5. average the fractions across months per (category, day)
//! 6. clamp into `[0.01, 0.99]`

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::models::{clamp_fraction, SpendCurve, TransactionSet, DAYS_IN_MONTH};

/// Densified daily spend of one category in one simulated month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCumulative {
    pub month_index: u32,
    pub category: String,
    /// Running total for days 1..=30 (index 0 is day 1)
    pub cumulative: Vec<f64>,
}

impl MonthlyCumulative {
    pub fn monthly_total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Cumulative share of the month's spend for each day
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.monthly_total();
        self.cumulative
            .iter()
            .map(|c| if total > 0.0 { c / total } else { 0.0 })
            .collect()
    }
}

pub struct CurveBuilder;

impl CurveBuilder {
    /// Densified running totals for every (month, category) in the data
    ///
    /// Only months and categories that appear in the transaction set are
    /// covered; each of them gets all 30 days.
    pub fn cumulative_by_month(history: &TransactionSet) -> Vec<MonthlyCumulative> {
        let mut daily: BTreeMap<(u32, &str, u32), f64> = BTreeMap::new();
        let mut months = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for tx in &history.transactions {
            if !(1..=DAYS_IN_MONTH).contains(&tx.day_of_month) {
                warn!(
                    day = tx.day_of_month,
                    category = %tx.category,
                    "skipping transaction outside the modelled month"
                );
                continue;
            }
            *daily
                .entry((tx.month_index, tx.category.as_str(), tx.day_of_month))
                .or_insert(0.0) += tx.amount;
            months.insert(tx.month_index);
            categories.insert(tx.category.as_str());
        }

        let mut result = Vec::with_capacity(months.len() * categories.len());

        for &month_index in &months {
            for &category in &categories {
                let mut running = 0.0;
                let cumulative = (1..=DAYS_IN_MONTH)
                    .map(|day| {
                        running += daily
                            .get(&(month_index, category, day))
                            .copied()
                            .unwrap_or(0.0);
                        running
                    })
                    .collect();

                result.push(MonthlyCumulative {
                    month_index,
                    category: category.to_string(),
                    cumulative,
                });
            }
        }

        result
    }

    /// Build the clamped average cumulative-fraction curve
    ///
    /// An empty history yields an empty curve; forecasting then falls back
    /// to the linear pace.
    pub fn build(history: &TransactionSet) -> SpendCurve {
        let monthly = Self::cumulative_by_month(history);
        let mut curve = SpendCurve::new();

        if monthly.is_empty() {
            debug!("no history, spend curve is empty");
            return curve;
        }

        let mut sums: BTreeMap<(&str, u32), (f64, u32)> = BTreeMap::new();

        for month in &monthly {
            for (offset, fraction) in month.fractions().into_iter().enumerate() {
                let day = offset as u32 + 1;
                let entry = sums.entry((month.category.as_str(), day)).or_insert((0.0, 0));
                entry.0 += fraction;
                entry.1 += 1;
            }
        }

        for ((category, day), (sum, count)) in sums {
            let average = sum / count as f64;
            curve.insert(category, day, clamp_fraction(average));
        }

        debug!(points = curve.len(), "built spend curve");
        curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorySpec, SyntheticTransaction, MAX_FRACTION, MIN_FRACTION};
    use crate::services::{HistoryGenerator, LedgerService};

    fn tx(month: u32, day: u32, category: &str, amount: f64) -> SyntheticTransaction {
        SyntheticTransaction {
            month_index: month,
            day_of_month: day,
            category: category.into(),
            amount,
        }
    }

    fn set(transactions: Vec<SyntheticTransaction>) -> TransactionSet {
        TransactionSet {
            months: 2,
            seed: 0,
            transactions,
        }
    }

    fn generated() -> TransactionSet {
        let ledger = LedgerService::build_ledger(&CategorySpec::defaults(), 1600.0).unwrap();
        HistoryGenerator::default().generate(&ledger, 3, 42).unwrap()
    }

    #[test]
    fn test_empty_history_gives_empty_curve() {
        let curve = CurveBuilder::build(&set(vec![]));
        assert!(curve.is_empty());
    }

    #[test]
    fn test_densifies_and_accumulates() {
        let history = set(vec![
            tx(1, 1, "Leisure", 10.0),
            tx(1, 1, "Leisure", 5.0),
            tx(1, 10, "Leisure", 15.0),
        ]);

        let monthly = CurveBuilder::cumulative_by_month(&history);
        assert_eq!(monthly.len(), 1);
        let leisure = &monthly[0];
        assert_eq!(leisure.cumulative.len(), DAYS_IN_MONTH as usize);
        assert_eq!(leisure.cumulative[0], 15.0);
        assert_eq!(leisure.cumulative[8], 15.0);
        assert_eq!(leisure.cumulative[9], 30.0);
        assert_eq!(leisure.monthly_total(), 30.0);
        assert_eq!(leisure.fractions()[0], 0.5);
    }

    #[test]
    fn test_averages_across_months() {
        // Month 1 spends everything on day 1, month 2 everything on day 30.
        let history = set(vec![tx(1, 1, "Leisure", 50.0), tx(2, 30, "Leisure", 80.0)]);
        let curve = CurveBuilder::build(&history);

        assert_eq!(curve.len(), DAYS_IN_MONTH as usize);
        assert_eq!(curve.fraction("Leisure", 1), Some(0.5));
        assert_eq!(curve.fraction("Leisure", 29), Some(0.5));
        // (1.0 + 1.0) / 2 clamps to the upper bound
        assert_eq!(curve.fraction("Leisure", 30), Some(MAX_FRACTION));
    }

    #[test]
    fn test_category_missing_in_a_month_counts_as_zero() {
        let history = set(vec![
            tx(1, 1, "Leisure", 50.0),
            tx(1, 1, "Transport", 20.0),
            tx(2, 1, "Leisure", 50.0),
        ]);
        let curve = CurveBuilder::build(&history);

        // Transport: month 1 -> 1.0, month 2 (no spend) -> 0.0
        assert_eq!(curve.fraction("Transport", 1), Some(0.5));
        assert_eq!(curve.fraction("Leisure", 1), Some(MAX_FRACTION));
    }

    #[test]
    fn test_back_loaded_clamps_low() {
        let history = set(vec![tx(1, 30, "Leisure", 50.0)]);
        let curve = CurveBuilder::build(&history);
        assert_eq!(curve.fraction("Leisure", 1), Some(MIN_FRACTION));
    }

    #[test]
    fn test_generated_curve_bounds() {
        let curve = CurveBuilder::build(&generated());

        assert_eq!(curve.len(), 4 * DAYS_IN_MONTH as usize);
        for point in curve.points() {
            assert!(point.avg_cumulative_fraction >= MIN_FRACTION);
            assert!(point.avg_cumulative_fraction <= MAX_FRACTION);
        }
    }

    #[test]
    fn test_generated_cumulative_monotonic() {
        for month in CurveBuilder::cumulative_by_month(&generated()) {
            for pair in month.cumulative.windows(2) {
                assert!(pair[0] <= pair[1], "{} month {}", month.category, month.month_index);
            }
        }
    }

    #[test]
    fn test_generated_curve_roughly_linear() {
        let curve = CurveBuilder::build(&generated());
        let mid = curve.fraction("Groceries", 15).unwrap();
        assert!(mid > 0.25 && mid < 0.75, "got {}", mid);
    }
}
