//! Planning Service - maximum legal load for a combo
//!
//! Resolves the combo and trailer from the catalog, binds compartments to
//! products at the product temperature, and runs the max-load search.

use std::collections::HashMap;

use loadplan_domain::model::{CompartmentSelection, EquipmentCombo, LoadPlan, Product};
use loadplan_domain::repository::{EquipmentRepository, ProductRepository};
use loadplan_domain::service::cg_bias::{is_unstable_load, slider_to_bias};
use loadplan_domain::service::{
    active_capacity_gallons, build_active_compartments, plan_max_load,
};
use loadplan_types::{CatalogError, Result};
use serde::Serialize;
use tracing::{info, warn};

/// Inputs for one planning run
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    pub combo_id: String,
    /// Per-compartment selections keyed by compartment number
    pub selections: HashMap<u32, CompartmentSelection>,
    /// Product for compartments without an explicit selection
    pub default_product: Option<String>,
    pub product_temp_f: f64,
    /// 0 = full rear, 0.5 = neutral, 1 = full front
    pub cg_slider: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    pub combo: EquipmentCombo,
    pub allowed_lbs: f64,
    pub cg_slider: f64,
    pub bias: f64,
    /// Rear-biased loads are flagged
    pub unstable: bool,
    pub product_temp_f: f64,
    pub active_capacity_gallons: f64,
    pub trailer_capacity_gallons: f64,
    pub plan: LoadPlan,
}

impl PlanOutcome {
    pub fn margin_lbs(&self) -> f64 {
        self.plan.margin_lbs(self.allowed_lbs)
    }
}

pub struct PlanningService<'a, E, P> {
    equipment: &'a E,
    products: &'a P,
}

impl<'a, E: EquipmentRepository, P: ProductRepository> PlanningService<'a, E, P> {
    pub fn new(equipment: &'a E, products: &'a P) -> Self {
        Self {
            equipment,
            products,
        }
    }

    /// Products known to the catalog
    pub fn products(&self) -> Result<Vec<Product>> {
        self.products.find_all_products()
    }

    pub fn combo(&self, combo_id: &str) -> Result<EquipmentCombo> {
        self.equipment
            .find_combo(combo_id)?
            .ok_or_else(|| CatalogError::UnknownCombo(combo_id.to_string()).into())
    }

    pub fn plan(&self, request: &PlanRequest) -> Result<PlanOutcome> {
        let combo = self.combo(&request.combo_id)?;
        if !combo.active {
            warn!(combo_id = %combo.combo_id, "planning with an inactive combo");
        }
        let trailer = self
            .equipment
            .find_trailer(&combo.trailer_id)?
            .ok_or_else(|| CatalogError::UnknownTrailer(combo.trailer_id.clone()))?;
        let products = self.products.find_all_products()?;

        let mut selections = request.selections.clone();
        if let Some(ref product_id) = request.default_product {
            for c in &trailer.compartments {
                selections
                    .entry(c.comp_number)
                    .or_insert_with(|| CompartmentSelection::product(product_id.clone()));
            }
        }
        for selection in selections.values() {
            if let Some(ref id) = selection.product_id {
                if !selection.empty && !products.iter().any(|p| &p.product_id == id) {
                    return Err(CatalogError::UnknownProduct(id.clone()).into());
                }
            }
        }

        let active = build_active_compartments(
            &trailer.compartments,
            &selections,
            &products,
            request.product_temp_f,
        );
        let bias = slider_to_bias(request.cg_slider);
        let allowed_lbs = combo.allowed_lbs();
        let capacity = active_capacity_gallons(&active);
        let plan = plan_max_load(&active, allowed_lbs, bias, capacity);

        info!(
            combo_id = %combo.combo_id,
            active = active.len(),
            planned_gallons = plan.planned_gallons_total(),
            planned_lbs = plan.planned_weight_lbs(),
            "plan complete"
        );

        Ok(PlanOutcome {
            allowed_lbs,
            cg_slider: request.cg_slider,
            bias,
            unstable: is_unstable_load(request.cg_slider),
            product_temp_f: request.product_temp_f,
            active_capacity_gallons: capacity,
            trailer_capacity_gallons: trailer.capacity_gallons(),
            plan,
            combo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadplan_domain::model::{Compartment, Trailer};
    use loadplan_types::Error;

    struct MemoryCatalog {
        combos: Vec<EquipmentCombo>,
        trailers: Vec<Trailer>,
        products: Vec<Product>,
    }

    impl EquipmentRepository for MemoryCatalog {
        fn find_all_combos(&self) -> Result<Vec<EquipmentCombo>> {
            Ok(self.combos.clone())
        }

        fn find_combo(&self, combo_id: &str) -> Result<Option<EquipmentCombo>> {
            Ok(self.combos.iter().find(|c| c.combo_id == combo_id).cloned())
        }

        fn find_trailer(&self, trailer_id: &str) -> Result<Option<Trailer>> {
            Ok(self.trailers.iter().find(|t| t.trailer_id == trailer_id).cloned())
        }
    }

    impl ProductRepository for MemoryCatalog {
        fn find_all_products(&self) -> Result<Vec<Product>> {
            Ok(self.products.clone())
        }
    }

    fn catalog() -> MemoryCatalog {
        let compartments = (1..=4)
            .map(|n| Compartment {
                comp_number: n,
                max_gallons: 3000.0,
                position: n as f64,
            })
            .collect();
        MemoryCatalog {
            combos: vec![EquipmentCombo {
                combo_id: "c1".to_string(),
                combo_name: "Tractor 12 / Trailer 40".to_string(),
                trailer_id: "t1".to_string(),
                tare_lbs: 30000.0,
                gross_limit_lbs: 80000.0,
                buffer_lbs: 0.0,
                active: true,
            }],
            trailers: vec![Trailer {
                trailer_id: "t1".to_string(),
                compartments,
            }],
            products: vec![Product {
                product_id: "ulsd".to_string(),
                name: "ULSD".to_string(),
                api_60: Some(35.0),
                alpha_per_f: Some(0.00046),
            }],
        }
    }

    #[test]
    fn test_plan_stays_within_allowed() {
        let catalog = catalog();
        let service = PlanningService::new(&catalog, &catalog);
        let outcome = service
            .plan(&PlanRequest {
                combo_id: "c1".to_string(),
                default_product: Some("ulsd".to_string()),
                product_temp_f: 60.0,
                cg_slider: 0.5,
                ..PlanRequest::default()
            })
            .unwrap();

        assert_eq!(outcome.allowed_lbs, 50000.0);
        assert_eq!(outcome.plan.rows.len(), 4);
        assert_eq!(outcome.trailer_capacity_gallons, 12000.0);
        assert!(outcome.plan.planned_weight_lbs() <= 50000.0 + 1e-6);
        assert!(outcome.margin_lbs() >= -1e-6);
        assert!(!outcome.unstable);
    }

    #[test]
    fn test_unknown_combo() {
        let catalog = catalog();
        let service = PlanningService::new(&catalog, &catalog);
        let err = service
            .plan(&PlanRequest {
                combo_id: "nope".to_string(),
                ..PlanRequest::default()
            })
            .unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::UnknownCombo(_))));
    }

    #[test]
    fn test_unknown_product_rejected() {
        let catalog = catalog();
        let service = PlanningService::new(&catalog, &catalog);
        let mut selections = HashMap::new();
        selections.insert(1, CompartmentSelection::product("jet"));
        let err = service
            .plan(&PlanRequest {
                combo_id: "c1".to_string(),
                selections,
                ..PlanRequest::default()
            })
            .unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::UnknownProduct(_))));
    }

    #[test]
    fn test_empty_selection_overrides_default_product() {
        let catalog = catalog();
        let service = PlanningService::new(&catalog, &catalog);
        let mut selections = HashMap::new();
        selections.insert(2, CompartmentSelection::empty());
        let outcome = service
            .plan(&PlanRequest {
                combo_id: "c1".to_string(),
                selections,
                default_product: Some("ulsd".to_string()),
                product_temp_f: 60.0,
                cg_slider: 0.2,
            })
            .unwrap();
        assert_eq!(outcome.plan.rows.len(), 3);
        assert!(outcome.plan.rows.iter().all(|r| r.comp_number != 2));
        assert!(outcome.unstable);
        assert!(outcome.bias < 0.0);
    }
}
