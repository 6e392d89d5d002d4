//! Average cumulative spend-fraction curve
//!
//! For every (category, day) the curve stores the historical average share
//! of that category's monthly spend already incurred by that day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lower bound applied to every curve fraction
pub const MIN_FRACTION: f64 = 0.01;

/// Upper bound applied to every curve fraction
pub const MAX_FRACTION: f64 = 0.99;

/// Clamp a fraction into `[MIN_FRACTION, MAX_FRACTION]`
pub fn clamp_fraction(fraction: f64) -> f64 {
    fraction.clamp(MIN_FRACTION, MAX_FRACTION)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub category: String,
    pub day_of_month: u32,
    pub avg_cumulative_fraction: f64,
}

/// Curve points keyed by (category, day)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendCurve {
    points: BTreeMap<(String, u32), f64>,
}

impl SpendCurve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a point
    ///
    /// The fraction is stored as given; the curve builder clamps before
    /// inserting and the forecaster clamps again on lookup.
    pub fn insert(&mut self, category: impl Into<String>, day: u32, fraction: f64) {
        self.points.insert((category.into(), day), fraction);
    }

    pub fn fraction(&self, category: &str, day: u32) -> Option<f64> {
        self.points.get(&(category.to_string(), day)).copied()
    }

    /// All points ordered by category, then day
    pub fn points(&self) -> Vec<CurvePoint> {
        self.points
            .iter()
            .map(|((category, day), f)| CurvePoint {
                category: category.clone(),
                day_of_month: *day,
                avg_cumulative_fraction: *f,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
