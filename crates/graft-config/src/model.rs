// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Graft plugin mechanism.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Graft configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GraftConfig {
    /// Plugin root, discovery, and reserved-name settings.
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Logging settings for subscriber setup by the host application.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Plugin discovery and loading configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Root directory of the plugin tree (`<root>/<category>/<name>/`).
    #[serde(default = "default_plugin_root")]
    pub root: String,

    /// Run discovery in load mode at bootstrap. When false, bootstrap only
    /// notes which units exist.
    #[serde(default = "default_autoload")]
    pub autoload: bool,

    /// File stems skipped during discovery even when a matching unit file
    /// exists.
    #[serde(default = "default_reserved_files")]
    pub reserved_files: Vec<String>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            root: default_plugin_root(),
            autoload: default_autoload(),
            reserved_files: default_reserved_files(),
        }
    }
}

fn default_plugin_root() -> String {
    "./plugins".to_string()
}

fn default_autoload() -> bool {
    true
}

fn default_reserved_files() -> Vec<String> {
    vec![
        "__init__".to_string(),
        "base".to_string(),
        "register".to_string(),
    ]
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
