mod types;

pub use types::*;

use crate::error::{DumpError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("sql-dump-notify"))
        .unwrap_or_else(|| PathBuf::from(".sql-dump-notify"))
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Loads the config file (defaults when absent) and layers the
/// process environment on top.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
    let mut config = load_from(&path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    Ok(config)
}

pub fn load_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        debug!("Config file not found at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    info!("Loading configuration from {:?}", path);
    let contents = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&contents)?;
    Ok(config)
}

pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating config directory: {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    info!("Configuration saved to {:?}", path);
    Ok(())
}

impl AppConfig {
    /// Overrides file values with `DB_*` / `DUMP_STORAGE_ROOT` variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            self.database.port = port
                .trim()
                .parse()
                .map_err(|_| DumpError::Config(format!("DB_PORT is not a valid port: {}", port)))?;
        }
        if let Some(username) = lookup("DB_USERNAME") {
            self.database.username = username;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.database.password = password;
        }
        if let Some(database) = lookup("DB_DATABASE") {
            self.database.database = Some(database);
        }
        if let Some(root) = lookup("DUMP_STORAGE_ROOT") {
            self.storage_root = PathBuf::from(root);
        }
        Ok(())
    }

    /// Returns the database name to dump, rejecting settings the dump
    /// cannot start without.
    pub fn validate(&self) -> Result<&str> {
        if self.database.host.trim().is_empty() {
            return Err(DumpError::Config("database host is not set".to_string()));
        }
        match self.database.database.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(DumpError::Config("database name is not set".to_string())),
        }
    }
}
