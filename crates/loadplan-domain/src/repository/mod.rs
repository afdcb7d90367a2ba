//! Repository trait definitions for catalog and weather data

use loadplan_types::{Error, HourlyWeather};

use crate::model::{EquipmentCombo, Product, Trailer};

/// Equipment combos and the trailers they pull
pub trait EquipmentRepository {
    /// Find all combos, active or not
    fn find_all_combos(&self) -> Result<Vec<EquipmentCombo>, Error>;

    /// Find a combo by its id
    fn find_combo(&self, combo_id: &str) -> Result<Option<EquipmentCombo>, Error>;

    /// Find a trailer by its id
    fn find_trailer(&self, trailer_id: &str) -> Result<Option<Trailer>, Error>;

    /// Combos available for selection
    fn find_active_combos(&self) -> Result<Vec<EquipmentCombo>, Error> {
        Ok(self
            .find_all_combos()?
            .into_iter()
            .filter(|c| c.active)
            .collect())
    }
}

/// Products offered at the loading terminal
pub trait ProductRepository {
    /// Find all products
    fn find_all_products(&self) -> Result<Vec<Product>, Error>;

    /// Find a product by its id
    fn find_product(&self, product_id: &str) -> Result<Option<Product>, Error> {
        Ok(self
            .find_all_products()?
            .into_iter()
            .find(|p| p.product_id == product_id))
    }
}

/// Source of recent hourly weather for a site
pub trait WeatherSource {
    /// Hourly samples ordered oldest to newest
    fn hourly_weather(&self, lat: f64, lon: f64) -> Result<Vec<HourlyWeather>, Error>;
}
