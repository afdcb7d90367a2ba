//! Output formatting module

use std::path::Path;

use loadplan_app::app::{PlanOutcome, TemperatureOutcome};
use loadplan_domain::model::{LoadReport, LoadTicket};
use loadplan_types::{OutputFormat, Result, TankPreset};
use serde_json::json;

pub fn output_plan(output_format: OutputFormat, outcome: &PlanOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    let combo = &outcome.combo;
    println!("\nLoad Plan");
    println!("=========");
    if combo.combo_name.is_empty() {
        println!("Combo:           {}", combo.combo_id);
    } else {
        println!("Combo:           {} ({})", combo.combo_name, combo.combo_id);
    }
    println!("Allowed payload: {:.0} lbs", outcome.allowed_lbs);
    println!("Product temp:    {:.1} °F", outcome.product_temp_f);
    println!(
        "CG slider:       {:.2} (bias {:+.3}){}",
        outcome.cg_slider,
        outcome.bias,
        if outcome.unstable { "  [rear-biased]" } else { "" }
    );

    if outcome.plan.is_empty() {
        println!("\nNo compartments to fill");
        return Ok(());
    }

    println!();
    println!(
        "{:>4}  {:<10} {:>8} {:>9} {:>9} {:>6} {:>10}",
        "Comp", "Product", "Pos", "Max gal", "Gallons", "Fill", "Lbs"
    );
    println!("{}", "-".repeat(64));
    for row in &outcome.plan.rows {
        println!(
            "{:>4}  {:<10} {:>8.2} {:>9.0} {:>9.0} {:>5.0}% {:>10.0}",
            row.comp_number,
            row.product_id,
            row.position,
            row.max_gallons,
            row.planned_gallons,
            row.fill_fraction() * 100.0,
            row.planned_lbs()
        );
    }
    println!("{}", "-".repeat(64));
    println!(
        "Total:           {:.0} gal / {:.0} gal capacity",
        outcome.plan.planned_gallons_total(),
        outcome.active_capacity_gallons
    );
    println!("Payload:         {:.0} lbs", outcome.plan.planned_weight_lbs());
    println!("Margin:          {:.0} lbs", outcome.margin_lbs());

    Ok(())
}

pub fn output_ticket(output_format: OutputFormat, ticket: &LoadTicket, path: &Path) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(ticket)?);
        return Ok(());
    }

    println!("\nLoad Ticket");
    println!("===========");
    println!("Load id:         {}", ticket.load_id);
    println!("Combo:           {}", ticket.combo_id);
    if let Some(ref terminal) = ticket.terminal_id {
        println!("Terminal:        {}", terminal);
    }
    println!("Lines:           {}", ticket.lines.len());
    println!("Planned gallons: {:.0}", ticket.totals.planned_total_gal);
    println!("Planned gross:   {:.0} lbs", ticket.totals.planned_gross_lbs);
    println!("Saved to:        {}", path.display());
    Ok(())
}

pub fn output_report(output_format: OutputFormat, report: &LoadReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nLoad Report");
    println!("===========");
    println!("Load id:         {}", report.load_id);
    println!();
    println!("{:>4}  {:<10} {:>9} {:>10}", "Comp", "Product", "Gallons", "Lbs");
    for line in &report.lines {
        println!(
            "{:>4}  {:<10} {:>9.0} {:>10.0}{}",
            line.comp_number,
            line.product_id,
            line.actual_gallons,
            line.actual_lbs,
            if line.estimated { "  (est.)" } else { "" }
        );
    }
    println!();
    println!("Planned gross:   {:.0} lbs", report.planned_gross_lbs);
    println!("Actual gross:    {:.0} lbs", report.actual_gross_lbs);
    println!("Difference:      {:+.0} lbs", report.diff_lbs);
    Ok(())
}

pub fn output_temperature(
    output_format: OutputFormat,
    outcome: &TemperatureOutcome,
    preset: TankPreset,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    let prediction = &outcome.prediction;
    println!("\nProduct Temperature");
    println!("===================");
    println!("Predicted:       {:.1} °F", prediction.predicted_temp_f);
    println!("Confidence:      {}", prediction.confidence);
    println!("Tank preset:     {}", preset);
    println!("Ambient now:     {:.1} °F", outcome.ambient_now_f);
    println!("Hourly samples:  {}", outcome.samples);
    if let Some(debug) = prediction.debug {
        println!("\n--- Simulation ---");
        println!("Seed temp:       {:.1} °F", debug.seed_temp_f);
        println!("Last sample ts:  {}", debug.last_sim_ts);
        println!("k0:              {}", debug.k0);
        println!("beta_sun:        {}", debug.beta_sun);
    }
    Ok(())
}

pub fn output_density(
    output_format: OutputFormat,
    api: f64,
    alpha: f64,
    temp_f: f64,
    lbs_per_gal: f64,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = json!({
            "api_60": api,
            "alpha_per_f": alpha,
            "temp_f": temp_f,
            "lbs_per_gal": lbs_per_gal,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{:.4} lbs/gal at {:.1} °F (API {})", lbs_per_gal, temp_f, api);
    }
    Ok(())
}

pub fn output_bias(output_format: OutputFormat, slider: f64, bias: f64, unstable: bool) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = json!({ "slider": slider, "bias": bias, "unstable": unstable });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!(
            "Slider {:.2} -> bias {:+.3}{}",
            slider,
            bias,
            if unstable { " (rear-biased, unstable)" } else { "" }
        );
    }
    Ok(())
}
