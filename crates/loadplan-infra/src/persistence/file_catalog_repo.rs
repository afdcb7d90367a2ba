//! File-based implementation of EquipmentRepository and ProductRepository

use std::path::PathBuf;

use loadplan_domain::model::{EquipmentCombo, Product, Trailer};
use loadplan_domain::repository::{EquipmentRepository, ProductRepository};
use loadplan_types::Error;
use tracing::debug;

use crate::catalog_loader::CatalogLoader;

/// Catalog repository backed by a TOML file, read once at open
pub struct FileCatalogRepository {
    loader: CatalogLoader,
}

impl FileCatalogRepository {
    pub fn new(toml_path: PathBuf) -> Result<Self, Error> {
        let loader = CatalogLoader::load_from_file(&toml_path)?;
        debug!(path = %toml_path.display(), "opened catalog");
        Ok(Self { loader })
    }
}

impl EquipmentRepository for FileCatalogRepository {
    fn find_all_combos(&self) -> Result<Vec<EquipmentCombo>, Error> {
        Ok(self.loader.combos().to_vec())
    }

    fn find_combo(&self, combo_id: &str) -> Result<Option<EquipmentCombo>, Error> {
        Ok(self.loader.combo(combo_id).cloned())
    }

    fn find_trailer(&self, trailer_id: &str) -> Result<Option<Trailer>, Error> {
        Ok(self.loader.trailer(trailer_id).cloned())
    }
}

impl ProductRepository for FileCatalogRepository {
    fn find_all_products(&self) -> Result<Vec<Product>, Error> {
        Ok(self.loader.products().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CATALOG: &str = r#"
[[combos]]
combo_id = "c1"
trailer_id = "t1"
tare_lbs = 32000
gross_limit_lbs = 80000

[[combos]]
combo_id = "c2"
trailer_id = "t1"
tare_lbs = 31000
gross_limit_lbs = 80000
active = false

[[trailers]]
trailer_id = "t1"
[[trailers.compartments]]
comp_number = 1
max_gallons = 4000
position = 1

[[products]]
product_id = "ulsd"
api_60 = 35.0
alpha_per_f = 0.00046
"#;

    #[test]
    fn test_repository_queries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, CATALOG).unwrap();

        let repo = FileCatalogRepository::new(path).unwrap();
        assert_eq!(repo.find_all_combos().unwrap().len(), 2);
        assert_eq!(repo.find_active_combos().unwrap().len(), 1);
        assert!(repo.find_combo("c1").unwrap().is_some());
        assert!(repo.find_combo("nope").unwrap().is_none());
        assert_eq!(repo.find_trailer("t1").unwrap().unwrap().compartments.len(), 1);
        assert!(repo.find_product("ulsd").unwrap().is_some());
        assert!(repo.find_product("rug").unwrap().is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = FileCatalogRepository::new(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
