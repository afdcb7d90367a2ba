//! Derive the compartments that take part in a plan

use std::collections::HashMap;

use crate::model::{ActiveCompartment, Compartment, CompartmentSelection, Product};
use crate::service::density::is_usable_density;

/// Bind trailer compartments to their selected products at `temp_f`.
///
/// A compartment is skipped when it has no selection, is marked empty, has
/// no product, has no effective capacity, or its product has no usable
/// density. The result is ordered rear to front by position.
pub fn build_active_compartments(
    compartments: &[Compartment],
    selections: &HashMap<u32, CompartmentSelection>,
    products: &[Product],
    temp_f: f64,
) -> Vec<ActiveCompartment> {
    let mut out = Vec::new();

    for c in compartments {
        let Some(selection) = selections.get(&c.comp_number) else {
            continue;
        };
        if selection.empty {
            continue;
        }
        let Some(product_id) = selection.product_id.as_deref().filter(|p| !p.is_empty()) else {
            continue;
        };

        let max_gallons = c.effective_max_gallons(selection.headspace_pct);
        if max_gallons <= 0.0 {
            continue;
        }

        let Some(lbs_per_gal) = products
            .iter()
            .find(|p| p.product_id == product_id)
            .and_then(|p| p.lbs_per_gal_at(temp_f))
            .filter(|lpg| is_usable_density(*lpg))
        else {
            continue;
        };

        out.push(ActiveCompartment {
            comp_number: c.comp_number,
            max_gallons,
            position: if c.position.is_finite() { c.position } else { 0.0 },
            product_id: product_id.to_string(),
            lbs_per_gal,
        });
    }

    out.sort_by(|a, b| a.position.total_cmp(&b.position));
    out
}

/// Sum of effective capacities
pub fn active_capacity_gallons(comps: &[ActiveCompartment]) -> f64 {
    comps.iter().map(|c| c.max_gallons.max(0.0)).sum()
}
