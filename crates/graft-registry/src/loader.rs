// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-unit loading.
//!
//! The loader is an independent primitive: reload re-runs one unit without
//! a tree walk, and the discovery walker funnels every eligible unit
//! through it. Loading resolves `<dir>/<unit>.toml`, parses the manifest,
//! and fires the registration hook for each declaration.

use std::fs;
use std::path::Path;

use graft_core::GraftError;
use tracing::debug;

use crate::manifest::{parse_unit_manifest, UNIT_EXT};
use crate::registry::PluginRegistry;

impl PluginRegistry {
    /// Load exactly one named unit from one directory.
    ///
    /// Returns the number of plugins the unit registered. A missing unit
    /// file is [`GraftError::UnitNotFound`]; read and parse failures are
    /// [`GraftError::Load`]; registration failures propagate from the hook.
    pub fn load_unit(&self, unit: &str, dir: &Path) -> Result<usize, GraftError> {
        let unit_path = dir.join(format!("{unit}.{UNIT_EXT}"));
        if !unit_path.is_file() {
            return Err(GraftError::UnitNotFound {
                unit: unit.to_string(),
                dir: dir.to_path_buf(),
            });
        }

        let content = fs::read_to_string(&unit_path).map_err(|e| GraftError::Load {
            unit: unit.to_string(),
            message: format!("unreadable unit file: {e}"),
            source: Some(Box::new(e)),
        })?;

        let manifest = parse_unit_manifest(unit, &content)?;
        if manifest.plugins.is_empty() {
            debug!(unit, "unit defines no plugins");
        }

        let mut registered = 0;
        for decl in &manifest.plugins {
            if self.register_declaration(decl, unit, &unit_path)? {
                registered += 1;
            }
        }
        Ok(registered)
    }
}
