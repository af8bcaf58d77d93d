// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tempdir-backed plugin trees following the discovery convention.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// An on-disk plugin tree under a temporary root, laid out as
/// `<root>/<category>/<name>/<name>.toml`.
///
/// The tree is removed when the fixture is dropped.
pub struct PluginTree {
    dir: TempDir,
}

impl PluginTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create fixture tempdir"),
        }
    }

    /// Root directory of the tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a unit file with explicit manifest content, returning the unit
    /// directory.
    pub fn add_unit(&self, category: &str, name: &str, manifest: &str) -> PathBuf {
        let dir = self.root().join(category).join(name);
        fs::create_dir_all(&dir).expect("failed to create unit directory");
        fs::write(dir.join(format!("{name}.toml")), manifest).expect("failed to write unit file");
        dir
    }

    /// Write a unit declaring a single enabled plugin of `type_name`
    /// registered as `name`.
    pub fn add_plugin(&self, category: &str, name: &str, type_name: &str) -> PathBuf {
        self.add_unit(category, name, &single_plugin_manifest(type_name, name))
    }

    /// Create a plugin directory without a unit file (never eligible).
    pub fn add_bare_dir(&self, category: &str, name: &str) -> PathBuf {
        let dir = self.root().join(category).join(name);
        fs::create_dir_all(&dir).expect("failed to create bare directory");
        dir
    }

    /// Delete a unit file, leaving its directory in place.
    pub fn remove_unit_file(&self, category: &str, name: &str) {
        let path = self
            .root()
            .join(category)
            .join(name)
            .join(format!("{name}.toml"));
        fs::remove_file(path).expect("failed to remove unit file");
    }
}

impl Default for PluginTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Manifest text declaring one enabled plugin.
pub fn single_plugin_manifest(type_name: &str, name: &str) -> String {
    format!("[[plugin]]\ntype = \"{type_name}\"\nname = \"{name}\"\ndisabled = false\n")
}
