//! Configuration validation utilities

use super::*;
use crate::core::error::{Error, Result};

/// Levels accepted by `logging.level`
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Validate the entire configuration
pub fn validate_config(config: &DashboardConfig) -> Result<()> {
    validate_source_config(&config.sources)?;
    validate_analytics_config(&config.analytics)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

/// Validate source file names
pub fn validate_source_config(config: &SourceConfig) -> Result<()> {
    for (table, file) in config.files() {
        if file.trim().is_empty() {
            return Err(Error::ConfigurationError(format!(
                "No file name configured for the {} table",
                table
            )));
        }
    }

    if let Some(sheet) = &config.sheet {
        if sheet.trim().is_empty() {
            return Err(Error::ConfigurationError(
                "sheet must not be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate query settings
pub fn validate_analytics_config(config: &AnalyticsConfig) -> Result<()> {
    if config.top_n == 0 {
        return Err(Error::ConfigurationError(
            "top_n must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration.
///
/// The level may be a full `env_logger` filter such as
/// `salesdash=debug,warn/regex`. Directives are read the way `env_logger`
/// reads them: a bare word is either a level or a module name (which enables
/// every level for that module), and `module=level` must name a known level.
/// Only directives `env_logger` itself would discard are rejected.
pub fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    let directives = match config.level.split_once('/') {
        Some((directives, _regex)) => directives,
        None => config.level.as_str(),
    };

    for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let mut parts = directive.split('=');
        let _module = parts.next();
        match (parts.next(), parts.next()) {
            (None, _) => {}
            (Some(level), None) => {
                let level = level.trim();
                if !level.is_empty() && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
                {
                    return Err(Error::ConfigurationError(format!(
                        "Invalid log level '{}' in '{}'",
                        level, directive
                    )));
                }
            }
            (Some(_), Some(_)) => {
                return Err(Error::ConfigurationError(format!(
                    "Invalid log directive: {}",
                    directive
                )));
            }
        }
    }

    Ok(())
}
