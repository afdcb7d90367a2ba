//! Maximum legal load search
//!
//! Weight is non-decreasing in requested volume because allocation only ever
//! adds gallons, so a bisection over `[0, capacity]` converges on the largest
//! volume whose planned weight stays within the payload budget.

use tracing::debug;

use crate::model::plan::total_weight_lbs;
use crate::model::{ActiveCompartment, LoadPlan};
use crate::service::allocation::allocate_with_caps;

/// Bisection steps; capacity / 2^22 is far below a gallon for real trailers
pub const SEARCH_ITERATIONS: usize = 22;

/// Slack allowed over the weight budget for floating-point noise
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Find the heaviest plan under `allowed_lbs`.
///
/// Returns an empty plan when there is nothing to plan or no capacity.
pub fn plan_max_load(
    comps: &[ActiveCompartment],
    allowed_lbs: f64,
    bias: f64,
    capacity_gallons: f64,
) -> LoadPlan {
    if comps.is_empty() {
        return LoadPlan::empty();
    }
    let capacity = capacity_gallons.max(0.0);
    if !(capacity > 0.0) {
        return LoadPlan::empty();
    }

    let mut lo = 0.0_f64;
    let mut hi = capacity;
    for _ in 0..SEARCH_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let rows = allocate_with_caps(mid, comps, bias);
        if total_weight_lbs(&rows) <= allowed_lbs + WEIGHT_EPSILON {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let rows = allocate_with_caps(lo, comps, bias);
    debug!(
        effective_max_gallons = lo,
        planned_lbs = total_weight_lbs(&rows),
        allowed_lbs,
        bias,
        "planned max load"
    );

    LoadPlan {
        rows,
        effective_max_gallons: lo,
    }
}
