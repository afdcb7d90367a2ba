//! Begin / complete load transactions

use std::collections::HashMap;

use chrono::Utc;
use loadplan_types::LoadError;
use uuid::Uuid;

use crate::model::load_ticket::PLAN_SNAPSHOT_VERSION;
use crate::model::{
    ActualLine, EquipmentCombo, LoadLine, LoadPlan, LoadReport, LoadTicket, PlannedTotals,
    Product, ProductObservation,
};
use crate::service::density::{is_usable_density, lbs_per_gallon_at_temp};

/// Everything besides the plan that goes on a ticket
#[derive(Debug, Clone)]
pub struct BeginLoadContext<'a> {
    pub combo: &'a EquipmentCombo,
    pub terminal_id: Option<String>,
    pub cg_bias: f64,
    pub ambient_temp_f: Option<f64>,
    pub product_temp_f: Option<f64>,
}

/// Snapshot a plan into a new load ticket.
pub fn begin_load(plan: &LoadPlan, ctx: &BeginLoadContext<'_>) -> Result<LoadTicket, LoadError> {
    if plan.is_empty() {
        return Err(LoadError::EmptyPlan);
    }

    let lines: Vec<LoadLine> = plan
        .rows
        .iter()
        .filter(|r| !r.product_id.is_empty() && r.planned_gallons > 0.0)
        .map(|r| LoadLine {
            comp_number: r.comp_number,
            product_id: r.product_id.clone(),
            planned_gallons: r.planned_gallons,
            planned_lbs: r.planned_lbs(),
            lbs_per_gal: r.lbs_per_gal,
            temp_f: ctx.product_temp_f,
        })
        .collect();

    if lines.is_empty() {
        return Err(LoadError::NoFilledCompartments);
    }

    let planned_total_lbs = plan.planned_weight_lbs();
    let totals = PlannedTotals {
        planned_total_gal: plan.planned_gallons_total(),
        planned_total_lbs,
        planned_gross_lbs: ctx.combo.tare_lbs + ctx.combo.buffer_lbs + planned_total_lbs,
    };

    Ok(LoadTicket {
        load_id: Uuid::new_v4().to_string(),
        snapshot_version: PLAN_SNAPSHOT_VERSION,
        combo_id: ctx.combo.combo_id.clone(),
        terminal_id: ctx.terminal_id.clone(),
        cg_bias: ctx.cg_bias,
        ambient_temp_f: ctx.ambient_temp_f,
        product_temp_f: ctx.product_temp_f,
        tare_lbs: ctx.combo.tare_lbs,
        buffer_lbs: ctx.combo.buffer_lbs,
        totals,
        lines,
        created_at: Utc::now(),
    })
}

/// Reconcile a ticket against rack readings.
///
/// Every product on the ticket needs an observation. When a product's
/// expansion coefficient is unknown the planned weight is reused for its lines.
pub fn complete_load(
    ticket: &LoadTicket,
    observations: &HashMap<String, ProductObservation>,
    products: &[Product],
) -> Result<LoadReport, LoadError> {
    for product_id in ticket.product_ids() {
        let usable = observations
            .get(&product_id)
            .is_some_and(|o| o.api.is_finite() && o.temp_f.is_finite());
        if !usable {
            return Err(LoadError::MissingObservation(product_id));
        }
    }

    let mut lines = Vec::with_capacity(ticket.lines.len());
    let mut actual_payload_lbs = 0.0;

    for line in &ticket.lines {
        let Some(obs) = observations.get(&line.product_id) else {
            continue;
        };
        let alpha = products
            .iter()
            .find(|p| p.product_id == line.product_id)
            .and_then(|p| p.alpha_per_f)
            .filter(|a| a.is_finite());

        let measured = alpha
            .map(|a| lbs_per_gallon_at_temp(obs.api, a, obs.temp_f))
            .filter(|lpg| is_usable_density(*lpg));

        let (actual_lbs, estimated) = match measured {
            Some(lpg) => (line.planned_gallons * lpg, false),
            None => (line.planned_lbs, true),
        };

        actual_payload_lbs += actual_lbs;
        lines.push(ActualLine {
            comp_number: line.comp_number,
            product_id: line.product_id.clone(),
            actual_gallons: line.planned_gallons,
            actual_lbs,
            temp_f: Some(obs.temp_f),
            estimated,
        });
    }

    let planned_gross_lbs = ticket.totals.planned_gross_lbs;
    let actual_gross_lbs = ticket.tare_lbs + ticket.buffer_lbs + actual_payload_lbs;

    Ok(LoadReport {
        load_id: ticket.load_id.clone(),
        lines,
        planned_total_gal: ticket.totals.planned_total_gal,
        planned_gross_lbs,
        actual_gross_lbs,
        diff_lbs: actual_gross_lbs - planned_gross_lbs,
        completed_at: Utc::now(),
    })
}
