//! Configuration management for loadplan
//!
//! Config stored at: ~/.config/loadplan/config.json

use std::path::{Path, PathBuf};

use loadplan_domain::service::PredictorParams;
use loadplan_types::{ConfigError, OutputFormat, Result, TankPreset};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Equipment and product catalog (TOML)
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Product temperature used when none is given
    #[serde(default = "default_product_temp_f")]
    pub default_product_temp_f: f64,

    /// CG slider position used when none is given
    #[serde(default = "default_cg_slider")]
    pub default_cg_slider: f64,

    #[serde(default)]
    pub tank_preset: TankPreset,

    #[serde(default = "default_beta_sun")]
    pub beta_sun: f64,

    #[serde(default = "default_cw_wind")]
    pub cw_wind: f64,

    #[serde(default = "default_max_wind_multiplier")]
    pub max_wind_multiplier: f64,

    #[serde(default = "default_ambient_cache_ttl_minutes")]
    pub ambient_cache_ttl_minutes: u64,

    #[serde(default = "default_weather_cache_ttl_minutes")]
    pub weather_cache_ttl_minutes: u64,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_product_temp_f() -> f64 {
    60.0
}

fn default_cg_slider() -> f64 {
    0.5
}

fn default_beta_sun() -> f64 {
    2.0
}

fn default_cw_wind() -> f64 {
    0.04
}

fn default_max_wind_multiplier() -> f64 {
    2.5
}

fn default_ambient_cache_ttl_minutes() -> u64 {
    10
}

fn default_weather_cache_ttl_minutes() -> u64 {
    25
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            catalog_path: None,
            default_product_temp_f: default_product_temp_f(),
            default_cg_slider: default_cg_slider(),
            tank_preset: TankPreset::default(),
            beta_sun: default_beta_sun(),
            cw_wind: default_cw_wind(),
            max_wind_multiplier: default_max_wind_multiplier(),
            ambient_cache_ttl_minutes: default_ambient_cache_ttl_minutes(),
            weather_cache_ttl_minutes: default_weather_cache_ttl_minutes(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("loadplan");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Thermal model tunables from this config
    pub fn predictor_params(&self) -> PredictorParams {
        PredictorParams {
            tank_preset: self.tank_preset,
            beta_sun: self.beta_sun,
            cw_wind: self.cw_wind,
            max_wind_multiplier: self.max_wind_multiplier,
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Loadplan Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "Output format:        {}", self.output_format)?;
        writeln!(
            f,
            "Catalog:              {}",
            self.catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        )?;
        writeln!(f, "Product temp (°F):    {:.1}", self.default_product_temp_f)?;
        writeln!(f, "CG slider:            {:.2}", self.default_cg_slider)?;
        writeln!(f, "Tank preset:          {}", self.tank_preset)?;
        writeln!(f, "Sun gain (°F/h):      {}", self.beta_sun)?;
        writeln!(f, "Wind coefficient:     {}", self.cw_wind)?;
        writeln!(f, "Max wind multiplier:  {}", self.max_wind_multiplier)?;
        writeln!(f, "Ambient cache (min):  {}", self.ambient_cache_ttl_minutes)?;
        writeln!(f, "Weather cache (min):  {}", self.weather_cache_ttl_minutes)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:          {}", path.display())?;
        }

        Ok(())
    }
}
