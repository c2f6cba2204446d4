//! Configuration management for salesdash
//!
//! This module provides centralized configuration with support for:
//! - Environment variables
//! - YAML/TOML configuration files
//! - Configuration validation

use crate::core::error::{Error, Result};
use crate::ledger::DuplicateKeyPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the six source tables live
    pub sources: SourceConfig,
    /// Join behaviour
    pub join: JoinConfig,
    /// Query settings
    pub analytics: AnalyticsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Source file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory the file names below are relative to
    pub data_dir: PathBuf,
    pub calendar: String,
    pub partners: String,
    pub plan: String,
    pub staff: String,
    pub products: String,
    pub fact: String,
    /// Worksheet to read from spreadsheet sources (first sheet if unset)
    pub sheet: Option<String>,
}

/// Join configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Handling of repeated keys in dimension tables
    pub duplicate_keys: DuplicateKeyPolicy,
}

/// Query configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Row limit of the top customer / top product rankings
    pub top_n: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error, off)
    pub level: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            data_dir: PathBuf::from("data"),
            calendar: "calendar.xlsx".to_string(),
            partners: "partners.xlsx".to_string(),
            plan: "plan.xlsx".to_string(),
            staff: "staff.xlsx".to_string(),
            products: "products.xlsx".to_string(),
            fact: "fact.xlsx".to_string(),
            sheet: None,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            top_n: crate::analytics::DEFAULT_TOP_N,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl SourceConfig {
    /// Source config reading every table from `data_dir` with the default file names
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        SourceConfig {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..SourceConfig::default()
        }
    }

    /// Source config for CSV exports named `<table>.csv` in `data_dir`
    pub fn csv_in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        SourceConfig {
            data_dir: data_dir.as_ref().to_path_buf(),
            calendar: "calendar.csv".to_string(),
            partners: "partners.csv".to_string(),
            plan: "plan.csv".to_string(),
            staff: "staff.csv".to_string(),
            products: "products.csv".to_string(),
            fact: "fact.csv".to_string(),
            sheet: None,
        }
    }

    pub fn calendar_path(&self) -> PathBuf {
        self.data_dir.join(&self.calendar)
    }

    pub fn partners_path(&self) -> PathBuf {
        self.data_dir.join(&self.partners)
    }

    pub fn plan_path(&self) -> PathBuf {
        self.data_dir.join(&self.plan)
    }

    pub fn staff_path(&self) -> PathBuf {
        self.data_dir.join(&self.staff)
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products)
    }

    pub fn fact_path(&self) -> PathBuf {
        self.data_dir.join(&self.fact)
    }

    /// (table, file name) pairs, in load order
    pub fn files(&self) -> [(&'static str, &str); 6] {
        [
            ("calendar", self.calendar.as_str()),
            ("partner", self.partners.as_str()),
            ("plan", self.plan.as_str()),
            ("staff", self.staff.as_str()),
            ("product", self.products.as_str()),
            ("fact", self.fact.as_str()),
        ]
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        loader::load_from_env()
    }

    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        loader::load_from_file(path.as_ref())
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        loader::load_from_yaml(yaml)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        loader::load_from_toml(toml)
    }

    /// Load configuration with precedence: defaults -> file -> environment
    pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        loader::load_with_precedence(config_file)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to YAML: {}", e))
        })
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to TOML: {}", e))
        })
    }
}
