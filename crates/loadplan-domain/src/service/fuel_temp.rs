//! Storage-tank fuel temperature predictor
//!
//! First-order thermal lag toward ambient plus additive solar gain, integrated
//! hour by hour over a recent weather history, then nudged toward the current
//! ambient reading for the part of the hour since the last sample.

use serde::{Deserialize, Serialize};

use loadplan_types::{Confidence, HourlyWeather, TankPreset};

use crate::service::solar::solar_elevation_rad;

/// Fewer samples than this and the simulation is skipped
pub const MIN_WEATHER_SAMPLES: usize = 6;

/// Offset below ambient used when there is not enough history
pub const FALLBACK_OFFSET_F: f64 = 2.0;

/// Shortest integration step (hours)
pub const MIN_STEP_HOURS: f64 = 0.25;

const K_MIN: f64 = 0.005;
const K_MAX: f64 = 0.25;
const WITHIN_HOUR_FACTOR: f64 = 0.35;

/// Tunables for the thermal model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictorParams {
    pub tank_preset: TankPreset,
    /// °F per hour at peak sun, clear sky
    pub beta_sun: f64,
    /// Increase of the lag constant per mph of wind
    pub cw_wind: f64,
    /// Cap on the wind multiplier
    pub max_wind_multiplier: f64,
}

impl Default for PredictorParams {
    fn default() -> Self {
        Self {
            tank_preset: TankPreset::Large,
            beta_sun: 2.0,
            cw_wind: 0.04,
            max_wind_multiplier: 2.5,
        }
    }
}

/// Simulation internals reported alongside a prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionDebug {
    pub seed_temp_f: f64,
    pub last_sim_ts: i64,
    pub k0: f64,
    pub beta_sun: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelTempPrediction {
    /// Rounded to 0.1°F
    pub predicted_temp_f: f64,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<PredictionDebug>,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Lag constant after wind, per hour
pub fn effective_lag_constant(k0: f64, wind_mph: f64, params: &PredictorParams) -> f64 {
    let wind = wind_mph.max(0.0);
    let wind_mult = (1.0 + params.cw_wind * wind).clamp(1.0, params.max_wind_multiplier.max(1.0));
    (k0 * wind_mult).clamp(K_MIN, K_MAX)
}

/// Solar heating rate in °F/hour; zero whenever the sun is at or below the horizon
pub fn solar_gain_per_hour(beta_sun: f64, elevation_rad: f64, cloud_pct: f64) -> f64 {
    let sun_factor = elevation_rad.sin().max(0.0);
    let cloud_factor = 1.0 - (cloud_pct / 100.0).clamp(0.0, 1.0);
    beta_sun * sun_factor * cloud_factor
}

/// Advisory confidence from average cloud cover and wind
pub fn confidence_from_cloud_and_wind(hourlies: &[HourlyWeather]) -> Confidence {
    if hourlies.is_empty() {
        return Confidence::Low;
    }
    let n = hourlies.len() as f64;
    let avg_cloud = hourlies.iter().map(|h| h.cloud_pct).sum::<f64>() / n;
    let avg_wind = hourlies.iter().map(|h| h.wind_mph).sum::<f64>() / n;

    if avg_cloud < 35.0 && avg_wind < 15.0 {
        Confidence::High
    } else if avg_cloud < 70.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Predict the current product temperature in a storage tank.
///
/// `hourlies` is ordered oldest to newest, ideally 24-30 hourly samples.
pub fn predict_fuel_temp_now(
    hourlies: &[HourlyWeather],
    lat_deg: f64,
    lon_deg: f64,
    ambient_now_f: f64,
    now_ts: i64,
    params: &PredictorParams,
) -> FuelTempPrediction {
    let (first, last) = match (hourlies.first(), hourlies.last()) {
        (Some(first), Some(last)) if hourlies.len() >= MIN_WEATHER_SAMPLES => (first, last),
        _ => {
            return FuelTempPrediction {
                predicted_temp_f: round1(ambient_now_f - FALLBACK_OFFSET_F),
                confidence: Confidence::Low,
                debug: None,
            };
        }
    };

    let k0 = params.tank_preset.k0();
    let mut tf = first.temp_f;
    let mut last_ts = first.ts;

    for h in hourlies {
        let dt_hours = ((h.ts - last_ts) as f64 / 3600.0).max(MIN_STEP_HOURS);
        let k = effective_lag_constant(k0, h.wind_mph, params);

        let elevation = solar_elevation_rad(h.ts, lat_deg, lon_deg);
        let q_sun = solar_gain_per_hour(params.beta_sun, elevation, h.cloud_pct);

        tf += k * (h.temp_f - tf) * dt_hours + q_sun * dt_hours;
        last_ts = h.ts;
    }

    let frac_hour = ((now_ts - last.ts) as f64 / 3600.0).clamp(0.0, 1.0);
    let k_within = WITHIN_HOUR_FACTOR * k0;
    tf += k_within * (ambient_now_f - tf) * frac_hour;

    FuelTempPrediction {
        predicted_temp_f: round1(tf),
        confidence: confidence_from_cloud_and_wind(hourlies),
        debug: Some(PredictionDebug {
            seed_temp_f: first.temp_f,
            last_sim_ts: last_ts,
            k0,
            beta_sun: params.beta_sun,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // 2024-07-15 00:00:00 UTC
    const BASE_TS: i64 = 1_721_001_600;
    const HOUSTON: (f64, f64) = (29.76, -95.37);

    fn series(count: usize, temp: impl Fn(usize) -> f64, wind: f64, cloud: f64) -> Vec<HourlyWeather> {
        (0..count)
            .map(|i| HourlyWeather {
                ts: BASE_TS + i as i64 * 3600,
                temp_f: temp(i),
                wind_mph: wind,
                cloud_pct: cloud,
            })
            .collect()
    }

    #[test]
    fn test_five_samples_fall_back() {
        let h = series(5, |_| 80.0, 3.0, 0.0);
        let p = predict_fuel_temp_now(&h, HOUSTON.0, HOUSTON.1, 71.3, BASE_TS, &PredictorParams::default());
        assert_relative_eq!(p.predicted_temp_f, 69.3, epsilon = 1e-9);
        assert_eq!(p.confidence, Confidence::Low);
        assert!(p.debug.is_none());
    }

    #[test]
    fn test_empty_history_falls_back() {
        let p = predict_fuel_temp_now(&[], 0.0, 0.0, 50.0, 0, &PredictorParams::default());
        assert_relative_eq!(p.predicted_temp_f, 48.0);
        assert_eq!(p.confidence, Confidence::Low);
    }

    #[test]
    fn test_constant_overcast_stays_at_ambient() {
        let h = series(24, |_| 70.0, 5.0, 100.0);
        let now = BASE_TS + 23 * 3600 + 1800;
        let p = predict_fuel_temp_now(&h, HOUSTON.0, HOUSTON.1, 70.0, now, &PredictorParams::default());
        assert_relative_eq!(p.predicted_temp_f, 70.0);
        assert_eq!(p.confidence, Confidence::Low);
        let debug = p.debug.unwrap();
        assert_eq!(debug.seed_temp_f, 70.0);
        assert_eq!(debug.last_sim_ts, BASE_TS + 23 * 3600);
        assert_relative_eq!(debug.k0, 0.03);
    }

    #[test]
    fn test_now_before_last_sample_skips_ambient_nudge() {
        let h = series(24, |_| 70.0, 5.0, 100.0);
        let last = BASE_TS + 23 * 3600;
        let params = PredictorParams::default();
        let warm = predict_fuel_temp_now(&h, HOUSTON.0, HOUSTON.1, 90.0, last - 1800, &params);
        let cold = predict_fuel_temp_now(&h, HOUSTON.0, HOUSTON.1, 50.0, last - 1800, &params);
        assert_relative_eq!(warm.predicted_temp_f, 70.0);
        assert_relative_eq!(cold.predicted_temp_f, 70.0);
    }

    #[test]
    fn test_ambient_nudge_capped_at_one_hour() {
        let h = series(24, |_| 70.0, 5.0, 100.0);
        let last = BASE_TS + 23 * 3600;
        let params = PredictorParams::default();
        // 70 + 0.35 * 0.03 * (80 - 70) = 70.105
        let one_hour = predict_fuel_temp_now(&h, HOUSTON.0, HOUSTON.1, 80.0, last + 3600, &params);
        let three_hours =
            predict_fuel_temp_now(&h, HOUSTON.0, HOUSTON.1, 80.0, last + 3 * 3600, &params);
        assert_relative_eq!(one_hour.predicted_temp_f, 70.1);
        assert_relative_eq!(three_hours.predicted_temp_f, one_hour.predicted_temp_f);
    }

    #[test]
    fn test_clear_sky_adds_solar_gain() {
        let clear = series(30, |_| 75.0, 2.0, 0.0);
        let overcast = series(30, |_| 75.0, 2.0, 100.0);
        let now = BASE_TS + 29 * 3600;
        let params = PredictorParams::default();
        let p_clear = predict_fuel_temp_now(&clear, HOUSTON.0, HOUSTON.1, 75.0, now, &params);
        let p_overcast = predict_fuel_temp_now(&overcast, HOUSTON.0, HOUSTON.1, 75.0, now, &params);
        assert!(p_clear.predicted_temp_f > p_overcast.predicted_temp_f);
        assert_eq!(p_clear.confidence, Confidence::High);
    }

    #[test]
    fn test_large_tank_lags_a_warming_trend() {
        // Steady warming, no sun: slower tanks stay colder
        let h = series(24, |i| 50.0 + i as f64, 0.0, 100.0);
        let now = BASE_TS + 23 * 3600;
        let large = predict_fuel_temp_now(&h, 0.0, 0.0, 73.0, now, &PredictorParams::default());
        let small = predict_fuel_temp_now(
            &h,
            0.0,
            0.0,
            73.0,
            now,
            &PredictorParams {
                tank_preset: TankPreset::Small,
                ..Default::default()
            },
        );
        assert!(large.predicted_temp_f < small.predicted_temp_f);
        assert!(small.predicted_temp_f < 73.0);
    }

    #[test]
    fn test_no_solar_gain_below_horizon() {
        for cloud in [0.0, 25.0, 100.0] {
            assert_eq!(solar_gain_per_hour(2.0, -0.3, cloud), 0.0);
            assert_eq!(solar_gain_per_hour(2.0, 0.0, cloud), 0.0);
        }
        assert_relative_eq!(solar_gain_per_hour(2.0, std::f64::consts::FRAC_PI_2, 50.0), 1.0);
    }

    #[test]
    fn test_night_samples_contribute_nothing() {
        // Houston 03:00-08:00 CDT = 08:00-13:00 UTC; sun is down for the first samples
        let el = solar_elevation_rad(BASE_TS + 8 * 3600, HOUSTON.0, HOUSTON.1);
        assert!(el <= 0.0);
        assert_eq!(solar_gain_per_hour(2.0, el, 0.0), 0.0);
    }

    #[test]
    fn test_lag_constant_limits() {
        let params = PredictorParams::default();
        assert_relative_eq!(effective_lag_constant(0.03, 0.0, &params), 0.03);
        assert_relative_eq!(effective_lag_constant(0.03, -10.0, &params), 0.03);
        // 1 + 0.04 * 100 = 5 -> capped at 2.5
        assert_relative_eq!(effective_lag_constant(0.08, 100.0, &params), 0.2);
        assert_relative_eq!(effective_lag_constant(0.001, 0.0, &params), K_MIN);
    }

    #[test]
    fn test_confidence_heuristic() {
        assert_eq!(confidence_from_cloud_and_wind(&series(6, |_| 60.0, 5.0, 20.0)), Confidence::High);
        assert_eq!(confidence_from_cloud_and_wind(&series(6, |_| 60.0, 20.0, 20.0)), Confidence::Medium);
        assert_eq!(confidence_from_cloud_and_wind(&series(6, |_| 60.0, 5.0, 50.0)), Confidence::Medium);
        assert_eq!(confidence_from_cloud_and_wind(&series(6, |_| 60.0, 5.0, 90.0)), Confidence::Low);
    }

    #[test]
    fn test_within_hour_blend_moves_toward_ambient() {
        let h = series(12, |_| 60.0, 0.0, 100.0);
        let at_sample = predict_fuel_temp_now(&h, 0.0, 0.0, 80.0, BASE_TS + 11 * 3600, &PredictorParams::default());
        let later = predict_fuel_temp_now(&h, 0.0, 0.0, 80.0, BASE_TS + 12 * 3600, &PredictorParams::default());
        assert_relative_eq!(at_sample.predicted_temp_f, 60.0);
        // 60 + 0.35 * 0.03 * 20 = 60.21
        assert_relative_eq!(later.predicted_temp_f, 60.2);
    }
}
