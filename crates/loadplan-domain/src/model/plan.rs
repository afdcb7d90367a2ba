//! Planner output types

use serde::{Deserialize, Serialize};

/// Planned fill for one active compartment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    pub comp_number: u32,
    /// Effective capacity
    pub max_gallons: f64,
    pub planned_gallons: f64,
    pub lbs_per_gal: f64,
    pub position: f64,
    pub product_id: String,
}

impl PlanRow {
    pub fn planned_lbs(&self) -> f64 {
        self.planned_gallons * self.lbs_per_gal
    }

    /// Fraction of effective capacity planned, 0 for zero-capacity rows
    pub fn fill_fraction(&self) -> f64 {
        if self.max_gallons > 0.0 {
            self.planned_gallons / self.max_gallons
        } else {
            0.0
        }
    }
}

/// Complete plan for a trailer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadPlan {
    /// Sorted by compartment number
    pub rows: Vec<PlanRow>,
    /// Largest total volume whose weight fits the budget
    pub effective_max_gallons: f64,
}

impl LoadPlan {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn planned_gallons_total(&self) -> f64 {
        self.rows.iter().map(|r| r.planned_gallons).sum()
    }

    pub fn planned_weight_lbs(&self) -> f64 {
        total_weight_lbs(&self.rows)
    }

    /// Allowed minus planned payload
    pub fn margin_lbs(&self, allowed_lbs: f64) -> f64 {
        allowed_lbs - self.planned_weight_lbs()
    }
}

/// Sum of planned gallons times density
pub fn total_weight_lbs(rows: &[PlanRow]) -> f64 {
    rows.iter().map(PlanRow::planned_lbs).sum()
}
