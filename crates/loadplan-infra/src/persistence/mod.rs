//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_catalog_repo;
mod file_weather_source;

pub use file_catalog_repo::FileCatalogRepository;
pub use file_weather_source::{FileWeatherSource, WeatherFileFormat};
