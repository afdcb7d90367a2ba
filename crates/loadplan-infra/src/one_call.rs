//! OpenWeather One Call hourly payload mapping
//!
//! Only the `hourly` block is used; units are expected to be imperial.

use std::path::Path;

use loadplan_types::{HourlyWeather, Result, WeatherError};
use serde::Deserialize;

/// Hourly samples kept from a forecast payload (~30 hours)
pub const MAX_HOURLY_SAMPLES: usize = 30;

/// Minimum samples a payload must provide
pub const MIN_HOURLY_SAMPLES: usize = 6;

#[derive(Debug, Deserialize)]
struct OneCallHourly {
    dt: i64,
    temp: f64,
    #[serde(default)]
    wind_speed: Option<f64>,
    #[serde(default)]
    clouds: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    #[serde(default)]
    hourly: Vec<OneCallHourly>,
}

/// Map a One Call JSON document to hourly weather samples
pub fn parse_one_call(json: &str) -> Result<Vec<HourlyWeather>> {
    let response: OneCallResponse = serde_json::from_str(json)?;

    if response.hourly.len() < MIN_HOURLY_SAMPLES {
        return Err(WeatherError::TooShort(response.hourly.len()).into());
    }

    Ok(response
        .hourly
        .into_iter()
        .take(MAX_HOURLY_SAMPLES)
        .map(|h| HourlyWeather {
            ts: h.dt,
            temp_f: h.temp,
            wind_mph: h.wind_speed.unwrap_or(0.0),
            cloud_pct: h.clouds.unwrap_or(0.0),
        })
        .collect())
}

/// Load a saved One Call JSON file
pub fn load_one_call_file(path: &Path) -> Result<Vec<HourlyWeather>> {
    let content = std::fs::read_to_string(path)?;
    parse_one_call(&content)
}
