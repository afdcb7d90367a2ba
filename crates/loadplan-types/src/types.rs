//! Shared value types

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One hourly weather sample (oldest to newest when in a sequence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeather {
    /// Unix seconds
    pub ts: i64,
    pub temp_f: f64,
    /// 0 if unknown
    #[serde(default)]
    pub wind_mph: f64,
    /// 0..100
    #[serde(default)]
    pub cloud_pct: f64,
}

/// Advisory confidence of a fuel temperature prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Storage tank size preset for the thermal lag model.
///
/// Larger tanks respond more slowly to ambient changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankPreset {
    /// ~250k gal
    Small,
    /// ~1M gal
    Medium,
    /// ~3M gal
    #[default]
    Large,
}

impl TankPreset {
    /// Base thermal lag constant (per hour)
    pub fn k0(&self) -> f64 {
        match self {
            TankPreset::Small => 0.08,
            TankPreset::Medium => 0.05,
            TankPreset::Large => 0.03,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TankPreset::Small => "small",
            TankPreset::Medium => "medium",
            TankPreset::Large => "large",
        }
    }
}

impl std::fmt::Display for TankPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tank_preset_k0_ordering() {
        assert!(TankPreset::Small.k0() > TankPreset::Medium.k0());
        assert!(TankPreset::Medium.k0() > TankPreset::Large.k0());
        assert_eq!(TankPreset::default(), TankPreset::Large);
    }

    #[test]
    fn test_confidence_serializes_lowercase() {
        let json = serde_json::to_string(&Confidence::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn test_hourly_weather_defaults_missing_wind_and_cloud() {
        let h: HourlyWeather = serde_json::from_str(r#"{"ts": 100, "temp_f": 55.5}"#).unwrap();
        assert_eq!(h.wind_mph, 0.0);
        assert_eq!(h.cloud_pct, 0.0);
    }
}
