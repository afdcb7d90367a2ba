//! Hourly weather loader from CSV
//!
//! Expected header: `ts,temp_f,wind_mph,cloud_pct`. `ts` is unix seconds or
//! RFC 3339; blank wind or cloud values read as 0.

use std::io::Read;
use std::path::Path;

use chrono::DateTime;
use loadplan_types::{HourlyWeather, Result, WeatherError};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct WeatherRecord {
    ts: String,
    temp_f: f64,
    #[serde(default)]
    wind_mph: Option<f64>,
    #[serde(default)]
    cloud_pct: Option<f64>,
}

/// Parse a timestamp as unix seconds or RFC 3339
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<i64>() {
        return Some(secs);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp())
}

/// Load hourly weather from a CSV file, sorted oldest to newest
pub fn load_weather_from_csv(path: &Path) -> Result<Vec<HourlyWeather>> {
    let file = std::fs::File::open(path)?;
    load_weather_from_reader(file)
}

/// Load hourly weather from any CSV reader
pub fn load_weather_from_reader<R: Read>(reader: R) -> Result<Vec<HourlyWeather>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut samples = Vec::new();

    for (index, record) in rdr.deserialize::<WeatherRecord>().enumerate() {
        let record = record?;
        let Some(ts) = parse_timestamp(&record.ts) else {
            return Err(WeatherError::ParseError(format!(
                "row {}: invalid timestamp '{}'",
                index + 1,
                record.ts
            ))
            .into());
        };
        if !record.temp_f.is_finite() {
            warn!(row = index + 1, "skipping weather row with non-finite temperature");
            continue;
        }
        samples.push(HourlyWeather {
            ts,
            temp_f: record.temp_f,
            wind_mph: record.wind_mph.unwrap_or(0.0),
            cloud_pct: record.cloud_pct.unwrap_or(0.0),
        });
    }

    samples.sort_by_key(|h| h.ts);
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadplan_types::Error;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("1721001600"), Some(1_721_001_600));
        assert_eq!(parse_timestamp("2024-07-15T00:00:00Z"), Some(1_721_001_600));
        assert_eq!(parse_timestamp("2024-07-14T19:00:00-05:00"), Some(1_721_001_600));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_load_sorts_and_defaults() {
        let data = "ts,temp_f,wind_mph,cloud_pct\n\
                    1721005200,78.5,,40\n\
                    1721001600,77.0,6.5,\n";
        let samples = load_weather_from_reader(data.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].ts, 1_721_001_600);
        assert_eq!(samples[0].wind_mph, 6.5);
        assert_eq!(samples[0].cloud_pct, 0.0);
        assert_eq!(samples[1].wind_mph, 0.0);
        assert_eq!(samples[1].cloud_pct, 40.0);
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let data = "ts,temp_f,wind_mph,cloud_pct\nnoon,70,0,0\n";
        let err = load_weather_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Weather(WeatherError::ParseError(_))));
    }

    #[test]
    fn test_bad_temperature_is_a_csv_error() {
        let data = "ts,temp_f,wind_mph,cloud_pct\n1721001600,warm,0,0\n";
        let err = load_weather_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }
}
