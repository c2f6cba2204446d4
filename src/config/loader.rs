//! Configuration loading utilities
//!
//! This module handles loading configuration from various sources with proper
//! precedence and validation.

use super::*;
use crate::core::error::{Error, Result};
use std::env;
use std::fs;
use std::path::Path;

/// Load configuration from environment variables on top of the defaults
pub fn load_from_env() -> Result<DashboardConfig> {
    let mut config = DashboardConfig::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Override configuration values with any `SALESDASH_*` environment variables that are set
pub fn apply_env_overrides(config: &mut DashboardConfig) -> Result<()> {
    if let Ok(dir) = env::var("SALESDASH_DATA_DIR") {
        config.sources.data_dir = PathBuf::from(dir);
    }

    if let Ok(sheet) = env::var("SALESDASH_SHEET") {
        config.sources.sheet = Some(sheet);
    }

    if let Ok(policy) = env::var("SALESDASH_DUPLICATE_KEYS") {
        config.join.duplicate_keys = policy.parse().map_err(|e| {
            Error::ConfigurationError(format!("Invalid SALESDASH_DUPLICATE_KEYS: {}", e))
        })?;
    }

    if let Ok(top_n) = env::var("SALESDASH_TOP_N") {
        config.analytics.top_n = top_n
            .parse()
            .map_err(|e| Error::ConfigurationError(format!("Invalid SALESDASH_TOP_N: {}", e)))?;
    }

    if let Ok(log_level) = env::var("SALESDASH_LOG_LEVEL").or_else(|_| env::var("RUST_LOG")) {
        config.logging.level = log_level;
    }

    Ok(())
}

/// Load configuration from a file (YAML or TOML based on extension)
pub fn load_from_file(path: &Path) -> Result<DashboardConfig> {
    if !path.exists() {
        return Err(Error::ConfigurationError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(&contents),
        Some("toml") => load_from_toml(&contents),
        Some(ext) => Err(Error::ConfigurationError(format!(
            "Unsupported config file format: {}",
            ext
        ))),
        None => {
            // Try to parse as YAML first, then TOML
            load_from_yaml(&contents).or_else(|_| load_from_toml(&contents))
        }
    }
}

/// Load configuration from YAML string
pub fn load_from_yaml(yaml: &str) -> Result<DashboardConfig> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse YAML config: {}", e)))
}

/// Load configuration from TOML string
pub fn load_from_toml(toml: &str) -> Result<DashboardConfig> {
    toml::from_str(toml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse TOML config: {}", e)))
}

/// Load configuration with precedence: defaults -> file -> environment
pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<DashboardConfig> {
    // Fields missing from the file keep their defaults
    let mut config = match config_file {
        Some(file_path) => load_from_file(file_path.as_ref())?,
        None => DashboardConfig::default(),
    };

    // Environment has the highest precedence
    apply_env_overrides(&mut config)?;

    config.validate()?;

    Ok(config)
}

/// Save configuration to a file
pub fn save_to_file(config: &DashboardConfig, path: &Path) -> Result<()> {
    let contents = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => config.to_yaml()?,
        Some("toml") => config.to_toml()?,
        _ => {
            return Err(Error::ConfigurationError(format!(
                "Unsupported config file format: {}",
                path.display()
            )))
        }
    };

    fs::write(path, contents).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to write config file {}: {}",
            path.display(),
            e
        ))
    })
}
