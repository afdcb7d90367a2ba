//! Begin/complete load transaction records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version tag written into every planned snapshot
pub const PLAN_SNAPSHOT_VERSION: u32 = 1;

/// One planned compartment fill on a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadLine {
    pub comp_number: u32,
    pub product_id: String,
    pub planned_gallons: f64,
    pub planned_lbs: f64,
    pub lbs_per_gal: f64,
    #[serde(default)]
    pub temp_f: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTotals {
    pub planned_total_gal: f64,
    pub planned_total_lbs: f64,
    pub planned_gross_lbs: f64,
}

/// Record written when loading begins at the rack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTicket {
    pub load_id: String,
    pub snapshot_version: u32,
    pub combo_id: String,
    #[serde(default)]
    pub terminal_id: Option<String>,
    pub cg_bias: f64,
    #[serde(default)]
    pub ambient_temp_f: Option<f64>,
    #[serde(default)]
    pub product_temp_f: Option<f64>,
    pub tare_lbs: f64,
    pub buffer_lbs: f64,
    pub totals: PlannedTotals,
    pub lines: Vec<LoadLine>,
    pub created_at: DateTime<Utc>,
}

impl LoadTicket {
    /// Distinct product ids in line order
    pub fn product_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for line in &self.lines {
            if !ids.contains(&line.product_id) {
                ids.push(line.product_id.clone());
            }
        }
        ids
    }
}

/// Rack readings for a product after loading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductObservation {
    /// Observed API gravity
    pub api: f64,
    pub temp_f: f64,
}

/// Actual weight for one compartment after loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualLine {
    pub comp_number: u32,
    pub product_id: String,
    pub actual_gallons: f64,
    pub actual_lbs: f64,
    #[serde(default)]
    pub temp_f: Option<f64>,
    /// True when the planned weight was reused for lack of product data
    #[serde(default)]
    pub estimated: bool,
}

/// Planned vs actual comparison produced when a load completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub load_id: String,
    pub lines: Vec<ActualLine>,
    pub planned_total_gal: f64,
    pub planned_gross_lbs: f64,
    pub actual_gross_lbs: f64,
    pub diff_lbs: f64,
    pub completed_at: DateTime<Utc>,
}
