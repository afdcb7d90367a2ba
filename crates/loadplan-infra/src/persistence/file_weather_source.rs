//! File-based implementation of WeatherSource

use std::path::{Path, PathBuf};

use loadplan_domain::repository::WeatherSource;
use loadplan_types::{Error, HourlyWeather, WeatherError};
use tracing::debug;

use crate::one_call::load_one_call_file;
use crate::weather_csv::load_weather_from_csv;

/// Supported weather file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherFileFormat {
    Csv,
    OneCallJson,
}

impl WeatherFileFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(WeatherFileFormat::Csv),
            Some("json") => Ok(WeatherFileFormat::OneCallJson),
            _ => Err(WeatherError::UnsupportedFormat(path.display().to_string()).into()),
        }
    }
}

/// Weather history read from a saved file; the site coordinates are ignored
pub struct FileWeatherSource {
    path: PathBuf,
    format: WeatherFileFormat,
}

impl FileWeatherSource {
    pub fn open(path: PathBuf) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let format = WeatherFileFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WeatherSource for FileWeatherSource {
    fn hourly_weather(&self, lat: f64, lon: f64) -> Result<Vec<HourlyWeather>, Error> {
        debug!(path = %self.path.display(), lat, lon, "reading hourly weather");
        match self.format {
            WeatherFileFormat::Csv => load_weather_from_csv(&self.path),
            WeatherFileFormat::OneCallJson => load_one_call_file(&self.path),
        }
    }
}
