//! Capacity-capped proportional allocation ("water-filling")
//!
//! Each compartment receives volume in proportion to a weight of
//! `shape * max_gallons`, where the shape tilts the fill toward the front
//! (positive bias) or rear (negative bias) of the trailer. Compartments that
//! reach capacity drop out and the leftover volume is redistributed over the
//! rest on the next pass.

use crate::model::{ActiveCompartment, PlanRow};
use crate::service::cg_bias::clamp_bias;

/// How strongly bias × position skews the fill shape
pub const TILT_GAIN: f64 = 0.85;

/// Floor for the fill shape so no compartment gets a zero or negative weight
pub const MIN_SHAPE: f64 = 0.05;

/// Upper bound on redistribution passes
pub const MAX_FILL_PASSES: usize = 20;

/// Tolerance for "at capacity" and "nothing left to place"
pub const CAPACITY_EPSILON: f64 = 1e-6;

/// Positional fill shape for a compartment under `bias`
pub fn shape_factor(bias: f64, position: f64) -> f64 {
    (1.0 + bias * position * TILT_GAIN).max(MIN_SHAPE)
}

/// Distribute `total_gallons` over `comps` under the given bias.
///
/// Returns one row per compartment sorted by compartment number. Volume that
/// cannot be placed (request larger than total capacity) is dropped.
pub fn allocate_with_caps(
    total_gallons: f64,
    comps: &[ActiveCompartment],
    bias: f64,
) -> Vec<PlanRow> {
    let bias = clamp_bias(bias);
    let total = total_gallons.max(0.0);

    let weights: Vec<f64> = comps
        .iter()
        .map(|c| shape_factor(bias, c.position) * c.max_gallons)
        .collect();
    let mut planned = vec![0.0_f64; comps.len()];
    let mut active: Vec<usize> = (0..comps.len())
        .filter(|&i| comps[i].max_gallons > 0.0)
        .collect();
    let mut remaining = total;

    for _ in 0..MAX_FILL_PASSES {
        if remaining <= CAPACITY_EPSILON || active.is_empty() {
            break;
        }

        let denom: f64 = active.iter().map(|&i| weights[i]).sum();
        if !(denom > 0.0) {
            break;
        }
        let k = remaining / denom;

        for &i in &active {
            let want = k * weights[i];
            let room = comps[i].max_gallons - planned[i];
            let add = want.min(room).max(0.0);
            planned[i] = (planned[i] + add).min(comps[i].max_gallons);
        }

        let planned_now: f64 = planned.iter().sum();
        remaining = (total - planned_now).max(0.0);

        let before = active.len();
        active.retain(|&i| planned[i] < comps[i].max_gallons - CAPACITY_EPSILON);
        if active.len() == before {
            break;
        }
    }

    let mut rows: Vec<PlanRow> = comps
        .iter()
        .zip(planned)
        .map(|(c, planned_gallons)| PlanRow {
            comp_number: c.comp_number,
            max_gallons: c.max_gallons,
            planned_gallons,
            lbs_per_gal: c.lbs_per_gal,
            position: c.position,
            product_id: c.product_id.clone(),
        })
        .collect();
    rows.sort_by_key(|r| r.comp_number);
    rows
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::ActiveCompartment;

    pub fn comp(comp_number: u32, max_gallons: f64, position: f64, lbs_per_gal: f64) -> ActiveCompartment {
        ActiveCompartment {
            comp_number,
            max_gallons,
            position,
            product_id: "ulsd".to_string(),
            lbs_per_gal,
        }
    }

    /// 4 x 1000 gal, front to rear
    pub fn four_even() -> Vec<ActiveCompartment> {
        vec![
            comp(1, 1000.0, 2.0, 6.0),
            comp(2, 1000.0, 1.0, 6.0),
            comp(3, 1000.0, -1.0, 6.0),
            comp(4, 1000.0, -2.0, 6.0),
        ]
    }
}
