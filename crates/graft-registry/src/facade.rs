// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup and invocation facade consumed by collaborator plugins.

use graft_core::{ConfigMap, GraftError, PluginValue};
use tracing::{debug, warn};

use crate::registry::PluginRegistry;

/// Side-effect switches for [`PluginRegistry::is_plugin_loaded`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// When the plugin is absent, attempt a single-unit load from the
    /// standard convention path `<root>/<category>/<name>/`.
    pub autoload: bool,
    /// When the plugin is present, cycle it through remove + reload before
    /// answering.
    pub force_reload: bool,
}

impl PluginRegistry {
    /// Check whether (category, name) is loaded, optionally loading or
    /// reloading it on the way.
    ///
    /// Answers whether the entry is loaded once the requested side effects
    /// have run: a failed forced reload leaves the entry removed and
    /// reports `false`; a failed autoload reports `false` with the failure
    /// logged. Without options this is a pure presence check.
    pub fn is_plugin_loaded(&self, category: &str, name: &str, opts: LoadOptions) -> bool {
        if self.contains(category, name) {
            if opts.force_reload {
                if let Err(err) = self.reload(name, Some(category)) {
                    warn!(category, name, error = %err, "forced reload failed");
                }
                return self.contains(category, name);
            }
            return true;
        }

        if opts.autoload {
            let dir = self.root().join(category).join(name);
            if let Err(err) = self.load_unit(name, &dir) {
                debug!(category, name, error = %err, "autoload failed");
                return false;
            }
            return self.contains(category, name);
        }

        false
    }

    /// Look up a plugin and produce a configured value from it.
    ///
    /// Loads the plugin on demand via the standard convention path. A
    /// lookup miss is soft (`Ok(None)`); failures inside the plugin's
    /// `init` propagate as errors.
    pub fn get_plugin(
        &self,
        category: &str,
        name: &str,
        config: &ConfigMap,
    ) -> Result<Option<PluginValue>, GraftError> {
        let opts = LoadOptions {
            autoload: true,
            ..LoadOptions::default()
        };
        if !self.is_plugin_loaded(category, name, opts) {
            return Ok(None);
        }
        match self.entry(category, name) {
            Some(entry) => entry.instance.init(config).map(Some),
            None => Ok(None),
        }
    }

    /// The category a plugin name belongs to.
    ///
    /// Categories are scanned in sorted order; when the same name exists in
    /// several categories the first match wins.
    pub fn get_plugin_type(&self, name: &str) -> Option<String> {
        let entries = self.read_entries();
        let mut categories: Vec<&String> = entries.keys().collect();
        categories.sort();
        categories
            .into_iter()
            .find(|category| entries[*category].contains_key(name))
            .cloned()
    }

    /// The default configuration mapping advertised by a loaded plugin.
    ///
    /// Defaults are advisory: `get_plugin` passes the caller's
    /// configuration through to `init` verbatim and never merges these in.
    pub fn defaults(&self, category: &str, name: &str) -> Option<ConfigMap> {
        self.entry(category, name)
            .map(|entry| entry.instance.defaults())
    }
}
