//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use loadplan_types::{OutputFormat, TankPreset};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loadplan")]
#[command(version)]
#[command(about = "Plan legal maximum fuel loads for multi-compartment tank trailers")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Equipment and product catalog (TOML). Uses config value if not specified.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Compartment and product choices shared by `plan` and `begin`
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Equipment combo id
    #[arg(long, short = 'c')]
    pub combo: String,

    /// Product for every compartment not set with --comp
    #[arg(long, short = 'p')]
    pub product: Option<String>,

    /// Product for one compartment (e.g., 3=ulsd)
    #[arg(long = "comp", value_parser = parse_comp_product)]
    pub comps: Vec<(u32, String)>,

    /// Leave a compartment empty
    #[arg(long = "empty")]
    pub empties: Vec<u32>,

    /// Headspace fraction for a compartment (e.g., 2=0.1, capped at 0.3)
    #[arg(long = "headspace", value_parser = parse_comp_headspace)]
    pub headspaces: Vec<(u32, f64)>,

    /// Product temperature in °F. Uses config value if not specified.
    #[arg(long, short = 't')]
    pub temp: Option<f64>,

    /// CG slider: 0 = full rear, 0.5 = neutral, 1 = full front
    #[arg(long, short = 's')]
    pub slider: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan the heaviest legal load for a combo
    Plan {
        #[command(flatten)]
        args: PlanArgs,
    },

    /// Plan a load and write a load ticket
    Begin {
        #[command(flatten)]
        args: PlanArgs,

        /// Terminal id recorded on the ticket
        #[arg(long)]
        terminal: Option<String>,

        /// Ambient temperature in °F recorded on the ticket
        #[arg(long)]
        ambient: Option<f64>,

        /// Ticket output path
        #[arg(long, short = 'o')]
        out: PathBuf,
    },

    /// Reconcile a load ticket against rack readings
    Complete {
        /// Load ticket written by `begin`
        #[arg(long)]
        ticket: PathBuf,

        /// Observed API gravity and temperature per product (e.g., ulsd=34.8@72)
        #[arg(long = "obs", value_parser = parse_observation, required = true)]
        observations: Vec<(String, f64, f64)>,

        /// Also write the report to this path
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Estimate storage-tank product temperature from hourly weather
    Temp {
        /// Hourly weather file (.csv or One Call .json)
        #[arg(long, short = 'w')]
        weather: PathBuf,

        /// Site latitude (decimal degrees)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Site longitude (decimal degrees, east positive)
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// City used as the cache key
        #[arg(long, default_value = "")]
        city: String,

        /// State used as the cache key
        #[arg(long, default_value = "")]
        state: String,

        /// Current ambient temperature in °F (defaults to the newest sample)
        #[arg(long)]
        ambient: Option<f64>,

        /// Prediction time in unix seconds (defaults to now)
        #[arg(long)]
        now: Option<i64>,

        /// Tank size preset. Uses config value if not specified.
        #[arg(long)]
        preset: Option<TankPreset>,

        /// Include simulation internals
        #[arg(long)]
        debug: bool,
    },

    /// Pounds per gallon from API gravity at a temperature
    Density {
        /// API gravity at 60°F
        #[arg(long)]
        api: f64,

        /// Thermal expansion coefficient per °F
        #[arg(long)]
        alpha: f64,

        /// Product temperature in °F
        #[arg(long, short = 't', allow_hyphen_values = true)]
        temp: f64,
    },

    /// Show the allocation bias for a CG slider position
    Bias {
        /// Slider position in [0, 1]
        slider: f64,
    },

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set catalog path
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default product temperature (°F)
        #[arg(long)]
        set_temp: Option<f64>,

        /// Set default CG slider position
        #[arg(long)]
        set_slider: Option<f64>,

        /// Set tank size preset
        #[arg(long)]
        set_preset: Option<TankPreset>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

fn split_pair<'a>(s: &'a str, what: &str) -> Result<(u32, &'a str), String> {
    let (n, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected N={}, got '{}'", what, s))?;
    let n = n
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid compartment number in '{}'", s))?;
    Ok((n, value.trim()))
}

fn parse_comp_product(s: &str) -> Result<(u32, String), String> {
    let (n, product) = split_pair(s, "PRODUCT")?;
    if product.is_empty() {
        return Err(format!("missing product in '{}'", s));
    }
    Ok((n, product.to_string()))
}

fn parse_comp_headspace(s: &str) -> Result<(u32, f64), String> {
    let (n, pct) = split_pair(s, "FRACTION")?;
    let pct = pct
        .parse::<f64>()
        .map_err(|_| format!("invalid headspace fraction in '{}'", s))?;
    Ok((n, pct))
}

fn parse_observation(s: &str) -> Result<(String, f64, f64), String> {
    let (product, reading) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PRODUCT=API@TEMP, got '{}'", s))?;
    let (api, temp) = reading
        .split_once('@')
        .ok_or_else(|| format!("expected PRODUCT=API@TEMP, got '{}'", s))?;
    let api = api
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid API gravity in '{}'", s))?;
    let temp = temp
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid temperature in '{}'", s))?;
    Ok((product.trim().to_string(), api, temp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pairs() {
        assert_eq!(parse_comp_product("3=ulsd").unwrap(), (3, "ulsd".to_string()));
        assert!(parse_comp_product("x=ulsd").is_err());
        assert!(parse_comp_product("3=").is_err());
        assert_eq!(parse_comp_headspace("2=0.1").unwrap(), (2, 0.1));
        assert_eq!(
            parse_observation("ulsd=34.8@72").unwrap(),
            ("ulsd".to_string(), 34.8, 72.0)
        );
        assert!(parse_observation("ulsd=34.8").is_err());
    }

    #[test]
    fn test_plan_args() {
        let cli = Cli::try_parse_from([
            "loadplan", "plan", "-c", "c1", "-p", "ulsd", "--comp", "2=rug", "--empty", "4",
            "--headspace", "1=0.05", "-f", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Plan { args } => {
                assert_eq!(args.combo, "c1");
                assert_eq!(args.comps, vec![(2, "rug".to_string())]);
                assert_eq!(args.empties, vec![4]);
                assert_eq!(args.headspaces, vec![(1, 0.05)]);
            }
            _ => panic!("expected plan"),
        }
    }
}
