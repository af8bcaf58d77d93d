// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./graft.toml` > `~/.config/graft/graft.toml` >
//! `/etc/graft/graft.toml` with environment variable overrides via `GRAFT_`
//! prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GraftConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/graft/graft.toml` (system-wide)
/// 3. `~/.config/graft/graft.toml` (user XDG config)
/// 4. `./graft.toml` (local directory)
/// 5. `GRAFT_*` environment variables
pub fn load_config() -> Result<GraftConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<GraftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GraftConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GraftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GraftConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for
/// diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GraftConfig::default()))
        .merge(Toml::file("/etc/graft/graft.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("graft/graft.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("graft.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GRAFT_PLUGINS_RESERVED_FILES` must map
/// to `plugins.reserved_files`, not `plugins.reserved.files`.
fn env_provider() -> Env {
    Env::prefixed("GRAFT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: GRAFT_PLUGINS_ROOT -> "plugins_root"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("plugins_", "plugins.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
