// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry, discovery walker, loader, and reload facility.
//!
//! Plugins live under a directory convention
//! (`<root>/<category>/<name>/<name>.toml`) and are constructed through an
//! explicit [`FactorySet`] built at bootstrap. The [`PluginRegistry`] holds
//! one canonical instance per (category, name) pair and exposes the lookup
//! facade (`get_plugin`, `is_plugin_loaded`, `reload_plugin`,
//! `get_plugin_type`, `defaults`) consumed by collaborator plugins.
//!
//! # Usage
//!
//! ```no_run
//! use graft_config::load_and_validate;
//! use graft_registry::{bootstrap, FactorySet};
//!
//! let config = load_and_validate().expect("config errors");
//! let factories = FactorySet::new();
//! let registry = bootstrap(&config.plugins, factories).expect("discovery failed");
//! assert!(registry.get_plugin_type("Echo").is_none());
//! ```

pub mod discovery;
pub mod facade;
pub mod factory;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod reload;

pub use facade::LoadOptions;
pub use factory::{FactorySet, PluginFactory};
pub use manifest::{parse_unit_manifest, PluginDecl, UnitManifest, UNIT_EXT};
pub use registry::{PluginEntry, PluginRegistry, ABSTRACT_SUFFIX, RESERVED_FILES};

// Re-export the mode enum so hosts don't need a direct graft-core
// dependency for discovery calls.
pub use graft_core::DiscoveryMode;

use std::sync::Arc;

use graft_config::PluginsConfig;
use graft_core::GraftError;
use tracing::info;

/// Build a registry from configuration and run initial discovery.
///
/// Discovery runs in load mode when `config.autoload` is set, and in scan
/// mode otherwise. Fatal registration errors surface here so the host can
/// report them instead of letting them propagate unbounded.
pub fn bootstrap(
    config: &PluginsConfig,
    factories: FactorySet,
) -> Result<Arc<PluginRegistry>, GraftError> {
    let registry = Arc::new(PluginRegistry::from_config(config, factories));
    let mode = if config.autoload {
        DiscoveryMode::Load
    } else {
        DiscoveryMode::Scan
    };
    let found = registry.discover(mode)?;
    info!(found, %mode, root = %registry.root().display(), "plugin bootstrap complete");
    Ok(registry)
}
