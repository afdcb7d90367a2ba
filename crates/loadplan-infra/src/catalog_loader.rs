//! Equipment and product catalog loader from TOML

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use loadplan_domain::model::{EquipmentCombo, Product, Trailer};
use loadplan_types::{CatalogError, Error, Result};
use serde::Deserialize;
use tracing::debug;

/// Sign convention of compartment positions in the source data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionConvention {
    #[default]
    FrontPositive,
    RearPositive,
}

/// Container for parsing catalog.toml
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    position_convention: PositionConvention,
    #[serde(default)]
    combos: Vec<EquipmentCombo>,
    #[serde(default)]
    trailers: Vec<Trailer>,
    #[serde(default)]
    products: Vec<Product>,
}

/// Catalog of combos, trailers, and products with positions normalized to
/// positive = front
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    combos: Vec<EquipmentCombo>,
    trailers: HashMap<String, Trailer>,
    products: Vec<Product>,
}

impl CatalogLoader {
    /// Load a catalog from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load a catalog from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml_content).map_err(|e| {
            Error::Catalog(CatalogError::ParseError(format!(
                "Failed to parse catalog TOML: {}",
                e
            )))
        })?;

        let flip = file.position_convention == PositionConvention::RearPositive;
        let trailers: HashMap<String, Trailer> = file
            .trailers
            .into_iter()
            .map(|mut t| {
                if flip {
                    for c in &mut t.compartments {
                        c.position = -c.position;
                    }
                }
                (t.trailer_id.clone(), t)
            })
            .collect();

        debug!(
            combos = file.combos.len(),
            trailers = trailers.len(),
            products = file.products.len(),
            flipped_positions = flip,
            "loaded catalog"
        );

        Ok(Self {
            combos: file.combos,
            trailers,
            products: file.products,
        })
    }

    pub fn combos(&self) -> &[EquipmentCombo] {
        &self.combos
    }

    pub fn combo(&self, combo_id: &str) -> Option<&EquipmentCombo> {
        self.combos.iter().find(|c| c.combo_id == combo_id)
    }

    pub fn trailer(&self, trailer_id: &str) -> Option<&Trailer> {
        self.trailers.get(trailer_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}
