// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-place plugin reload.
//!
//! Reload removes an entry and re-runs the loader against the directory the
//! entry was originally loaded from. There is no rest state between the
//! two: either the unit re-lands in the registry, or the caller observes a
//! failure while the prior entry remains removed.

use graft_core::GraftError;
use tracing::{debug, warn};

use crate::registry::PluginRegistry;

impl PluginRegistry {
    /// Remove and re-load one already-known plugin.
    ///
    /// With a category, removes that exact (category, name) entry. Without
    /// one, categories are scanned in sorted order and the first match
    /// wins. A missing target is [`GraftError::PluginNotFound`]; loader
    /// failures propagate with the prior entry already removed.
    pub fn reload(&self, name: &str, category: Option<&str>) -> Result<(), GraftError> {
        let removed = match category {
            Some(cat) => self.remove(cat, name),
            None => self.remove_first_match(name),
        };
        let entry = removed.ok_or_else(|| GraftError::PluginNotFound {
            category: category.map(str::to_string),
            name: name.to_string(),
        })?;

        debug!(category = %entry.category, name = %entry.name, "reloading plugin");
        self.load_unit(&entry.loader, &entry.source_dir)?;
        Ok(())
    }

    /// Boolean-compatible wrapper around [`reload`](Self::reload).
    ///
    /// Collapses every failure to `false`; the typed error is logged so the
    /// failure kind is not lost.
    pub fn reload_plugin(&self, name: &str, category: Option<&str>) -> bool {
        match self.reload(name, category) {
            Ok(()) => true,
            Err(err) => {
                warn!(name, error = %err, "plugin reload failed");
                false
            }
        }
    }
}
