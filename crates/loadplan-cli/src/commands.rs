//! Command handlers

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;
use loadplan_app::app::{PlanOutcome, PlanRequest, PlanningService, TemperatureRequest, TemperatureService};
use loadplan_app::config::Config;
use loadplan_app::repository::{open_catalog_repo, open_weather_source};
use loadplan_domain::model::{CompartmentSelection, ProductObservation};
use loadplan_domain::service::cg_bias::{is_unstable_load, slider_to_bias};
use loadplan_domain::service::density::is_usable_density;
use loadplan_domain::service::{begin_load, complete_load, lbs_per_gallon_at_temp, BeginLoadContext};
use loadplan_infra::load_ticket_file::{load_ticket, save_report, save_ticket};
use loadplan_types::{Error, OutputFormat, Result, TankPreset};
use tracing::info;

use crate::cli::{Cli, Commands, PlanArgs};
use crate::output;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Plan { args } => {
            let outcome = run_plan(&config, cli.catalog.clone(), args)?;
            output::output_plan(format, &outcome)
        }

        Commands::Begin {
            args,
            terminal,
            ambient,
            out,
        } => cmd_begin(&config, cli.catalog.clone(), format, args, terminal.clone(), *ambient, out),

        Commands::Complete {
            ticket,
            observations,
            out,
        } => cmd_complete(&config, cli.catalog.clone(), format, ticket, observations, out.clone()),

        Commands::Temp {
            weather,
            lat,
            lon,
            city,
            state,
            ambient,
            now,
            preset,
            debug,
        } => {
            let mut config = config.clone();
            if let Some(preset) = preset {
                config.tank_preset = *preset;
            }
            let source = open_weather_source(weather.clone())?;
            let mut service = TemperatureService::from_config(source, &config);
            let mut outcome = service.predict(&TemperatureRequest {
                city: city.clone(),
                state: state.clone(),
                lat: *lat,
                lon: *lon,
                ambient_now_f: *ambient,
                now_ts: now.unwrap_or_else(|| Utc::now().timestamp()),
            })?;
            if !debug {
                outcome.prediction.debug = None;
            }
            output::output_temperature(format, &outcome, config.tank_preset)
        }

        Commands::Density { api, alpha, temp } => {
            let lbs_per_gal = lbs_per_gallon_at_temp(*api, *alpha, *temp);
            if !is_usable_density(lbs_per_gal) {
                return Err(Error::InvalidInput(format!(
                    "no usable density for API {} at {}°F",
                    api, temp
                )));
            }
            output::output_density(format, *api, *alpha, *temp, lbs_per_gal)
        }

        Commands::Bias { slider } => output::output_bias(
            format,
            *slider,
            slider_to_bias(*slider),
            is_unstable_load(*slider),
        ),

        Commands::Config {
            show,
            set_catalog,
            set_output,
            set_temp,
            set_slider,
            set_preset,
            reset,
        } => cmd_config(
            *show,
            set_catalog.clone(),
            *set_output,
            *set_temp,
            *set_slider,
            *set_preset,
            *reset,
        ),
    }
}

fn plan_request(config: &Config, args: &PlanArgs) -> PlanRequest {
    let mut selections: HashMap<u32, CompartmentSelection> = HashMap::new();
    for (n, product) in &args.comps {
        selections.insert(*n, CompartmentSelection::product(product.clone()));
    }
    for n in &args.empties {
        selections.insert(*n, CompartmentSelection::empty());
    }
    for (n, pct) in &args.headspaces {
        let selection = selections
            .remove(n)
            .or_else(|| args.product.clone().map(CompartmentSelection::product))
            .unwrap_or_default();
        selections.insert(*n, selection.with_headspace(*pct));
    }

    PlanRequest {
        combo_id: args.combo.clone(),
        selections,
        default_product: args.product.clone(),
        product_temp_f: args.temp.unwrap_or(config.default_product_temp_f),
        cg_slider: args.slider.unwrap_or(config.default_cg_slider),
    }
}

fn run_plan(config: &Config, catalog: Option<PathBuf>, args: &PlanArgs) -> Result<PlanOutcome> {
    let repo = open_catalog_repo(config, catalog)?;
    let service = PlanningService::new(&repo, &repo);
    service.plan(&plan_request(config, args))
}

fn cmd_begin(
    config: &Config,
    catalog: Option<PathBuf>,
    format: OutputFormat,
    args: &PlanArgs,
    terminal: Option<String>,
    ambient: Option<f64>,
    out: &PathBuf,
) -> Result<()> {
    let outcome = run_plan(config, catalog, args)?;
    let ticket = begin_load(
        &outcome.plan,
        &BeginLoadContext {
            combo: &outcome.combo,
            terminal_id: terminal,
            cg_bias: outcome.bias,
            ambient_temp_f: ambient,
            product_temp_f: Some(outcome.product_temp_f),
        },
    )?;
    save_ticket(out, &ticket)?;
    output::output_ticket(format, &ticket, out)
}

fn cmd_complete(
    config: &Config,
    catalog: Option<PathBuf>,
    format: OutputFormat,
    ticket_path: &PathBuf,
    observations: &[(String, f64, f64)],
    out: Option<PathBuf>,
) -> Result<()> {
    let ticket = load_ticket(ticket_path)?;
    let repo = open_catalog_repo(config, catalog)?;
    let products = PlanningService::new(&repo, &repo).products()?;

    let observations: HashMap<String, ProductObservation> = observations
        .iter()
        .map(|(product, api, temp_f)| {
            (
                product.clone(),
                ProductObservation {
                    api: *api,
                    temp_f: *temp_f,
                },
            )
        })
        .collect();

    let report = complete_load(&ticket, &observations, &products)?;
    info!(load_id = %report.load_id, diff_lbs = report.diff_lbs, "load completed");
    if let Some(path) = out {
        save_report(&path, &report)?;
    }
    output::output_report(format, &report)
}

fn cmd_config(
    show: bool,
    set_catalog: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_temp: Option<f64>,
    set_slider: Option<f64>,
    set_preset: Option<TankPreset>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(path) = set_catalog {
        config.catalog_path = Some(path);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(temp) = set_temp {
        config.default_product_temp_f = temp;
        modified = true;
    }

    if let Some(slider) = set_slider {
        if !(0.0..=1.0).contains(&slider) {
            return Err(Error::InvalidInput(format!(
                "CG slider must be within [0, 1], got {}",
                slider
            )));
        }
        config.default_cg_slider = slider;
        modified = true;
    }

    if let Some(preset) = set_preset {
        config.tank_preset = preset;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
