// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory-convention discovery walker.
//!
//! The walker enumerates the plugin root's immediate subdirectories as
//! categories and their subdirectories as plugin names, looking for a
//! same-named unit file: `<root>/<category>/<name>/<name>.toml`. Directory
//! listings are sorted, so discovery order is deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use graft_core::{DiscoveryMode, GraftError};
use tracing::{debug, warn};

use crate::manifest::UNIT_EXT;
use crate::registry::PluginRegistry;

impl PluginRegistry {
    /// Walk the plugin root, loading or noting every eligible unit.
    ///
    /// Eligible units are non-reserved names with a same-named unit file.
    /// In [`DiscoveryMode::Load`] each one goes through the loader; in
    /// [`DiscoveryMode::Scan`] existence is noted without executing
    /// anything. Returns the number of eligible units found in both modes.
    ///
    /// Discovery always runs against the live registry: a Scan-mode call
    /// does not narrow subsequent lookups to newly discovered names, and
    /// entries loaded earlier remain visible.
    ///
    /// Registration failures (missing enablement attribute, duplicate
    /// names, missing factories) abort the walk and propagate, so a
    /// bootstrap routine can catch and report them.
    pub fn discover(&self, mode: DiscoveryMode) -> Result<usize, GraftError> {
        let root = self.root().to_path_buf();
        let mut found = 0;

        for category_dir in sorted_dirs(&root)? {
            for name_dir in sorted_dirs(&category_dir)? {
                let Some(name) = name_dir.file_name().and_then(|s| s.to_str()) else {
                    warn!(path = %name_dir.display(), "skipping non-UTF-8 plugin directory");
                    continue;
                };

                let unit_path = name_dir.join(format!("{name}.{UNIT_EXT}"));
                if !unit_path.is_file() {
                    continue;
                }
                if self.reserved().contains(name) {
                    debug!(name, "skipping reserved unit");
                    continue;
                }

                found += 1;
                if mode == DiscoveryMode::Load {
                    self.load_unit(name, &name_dir)?;
                }
            }
        }

        debug!(found, %mode, "plugin discovery finished");
        Ok(found)
    }
}

/// Immediate subdirectories of `dir`, sorted by path.
fn sorted_dirs(dir: &Path) -> Result<Vec<PathBuf>, GraftError> {
    let listing = fs::read_dir(dir).map_err(|e| GraftError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut dirs = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|e| GraftError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
