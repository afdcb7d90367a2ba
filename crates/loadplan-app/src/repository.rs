//! Repository adapters for persistence layer

use std::path::PathBuf;

use loadplan_infra::persistence::{FileCatalogRepository, FileWeatherSource};
use loadplan_types::{ConfigError, Result};

use crate::config::Config;

/// Open the catalog named by an explicit path, else by the config
pub fn open_catalog_repo(config: &Config, path: Option<PathBuf>) -> Result<FileCatalogRepository> {
    let path = path
        .or_else(|| config.catalog_path.clone())
        .ok_or(ConfigError::MissingCatalog)?;
    FileCatalogRepository::new(path)
}

/// Open a saved weather history (CSV or One Call JSON)
pub fn open_weather_source(path: PathBuf) -> Result<FileWeatherSource> {
    FileWeatherSource::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadplan_types::Error;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_catalog_path() {
        let err = open_catalog_repo(&Config::default(), None).err().unwrap();
        assert!(matches!(err, Error::Config(ConfigError::MissingCatalog)));
    }

    #[test]
    fn test_explicit_path_wins_over_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "[[products]]\nproduct_id = \"ulsd\"\n").unwrap();
        let config = Config {
            catalog_path: Some(dir.path().join("absent.toml")),
            ..Config::default()
        };
        assert!(open_catalog_repo(&config, Some(path)).is_ok());
        assert!(matches!(
            open_catalog_repo(&config, None).err().unwrap(),
            Error::FileNotFound(_)
        ));
    }
}
