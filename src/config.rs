use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShopConfig {
    /// Database file, relative to the working directory
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("shopdb.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("ShopDatabase.db")
}

pub fn load_config(path: Option<&Path>) -> Result<Option<ShopConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ShopConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

/// CLI override, then config file, then `ShopDatabase.db`
pub fn resolve_database_path(cli: Option<&Path>, config: Option<&ShopConfig>) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(default_database_path)
}

pub fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn config_file_sets_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdb.toml");
        std::fs::write(&path, "database = \"data/shops.db\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database.as_deref(), Some("data/shops.db"));
        assert_eq!(
            resolve_database_path(None, Some(&config)),
            PathBuf::from("data/shops.db")
        );
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdb.toml");
        std::fs::write(&path, "database = [").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn cli_override_wins() {
        let config = ShopConfig { database: Some("from-config.db".to_string()) };
        let resolved = resolve_database_path(Some(Path::new("cli.db")), Some(&config));
        assert_eq!(resolved, PathBuf::from("cli.db"));
        assert_eq!(resolve_database_path(None, None), default_database_path());
    }

    #[test]
    fn ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("shop.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
        ensure_db_dir(Path::new("ShopDatabase.db")).unwrap();
    }
}
