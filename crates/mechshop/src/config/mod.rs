use crate::error::{Result, ShopError};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default database location.
pub const DB_ENV_VAR: &str = "MECHSHOP_DB";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    /// Builds a config for the given database file, creating its parent
    /// directory if it does not exist yet.
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if db_path.as_os_str().is_empty() {
            return Err(ShopError::Config("database path is empty".to_string()));
        }
        if db_path.is_dir() {
            return Err(ShopError::Config(format!(
                "Database path is a directory: {}",
                db_path.display()
            )));
        }

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { db_path })
    }

    /// Resolves the database path from an explicit flag, falling back to the
    /// per-user data directory.
    pub fn resolve(db_path: Option<PathBuf>) -> Result<Self> {
        Self::new(db_path.unwrap_or_else(Self::default_db_path))
    }

    pub fn default_db_path() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("mechshop"))
            .unwrap_or_else(|| PathBuf::from(".mechshop"))
            .join("shop.db")
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
