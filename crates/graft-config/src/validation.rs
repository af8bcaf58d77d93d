// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and well-formed reserved-name lists.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::GraftConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &GraftConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.plugins.root.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugins.root must not be empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, stem) in config.plugins.reserved_files.iter().enumerate() {
        if stem.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("plugins.reserved_files[{i}] must not be empty"),
            });
        } else if !seen.insert(stem) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate entry `{stem}` in plugins.reserved_files"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.logging.level
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = GraftConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_root_fails_validation() {
        let mut config = GraftConfig::default();
        config.plugins.root = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("plugins.root"))));
    }

    #[test]
    fn duplicate_reserved_file_fails_validation() {
        let mut config = GraftConfig::default();
        config.plugins.reserved_files.push("base".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate entry `base`"))));
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = GraftConfig::default();
        config.logging.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("logging.level"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = GraftConfig::default();
        config.plugins.root = "/srv/graft/plugins".to_string();
        config.plugins.autoload = false;
        config.logging.level = "debug".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
