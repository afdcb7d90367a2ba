//! Error types for loadplan

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("No catalog configured; pass --catalog or run `loadplan config --set-catalog`")]
    MissingCatalog,
}

/// Equipment / product catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    ParseError(String),

    #[error("Unknown equipment combo: {0}")]
    UnknownCombo(String),

    #[error("Unknown trailer: {0}")]
    UnknownTrailer(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),
}

/// Hourly weather input errors
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to parse weather data: {0}")]
    ParseError(String),

    #[error("Hourly weather too short: {0} samples (need at least 6)")]
    TooShort(usize),

    #[error("Unsupported weather file: {0}")]
    UnsupportedFormat(String),
}

/// Load ticket (begin / complete) validation errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No plan to load")]
    EmptyPlan,

    #[error("No filled compartments")]
    NoFilledCompartments,

    #[error("Missing API and temperature observation for product {0}")]
    MissingObservation(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
