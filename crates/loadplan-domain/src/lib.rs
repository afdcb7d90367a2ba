//! Domain models, planning services, and repository traits

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::{EquipmentRepository, ProductRepository, WeatherSource};
