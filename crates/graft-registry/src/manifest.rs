// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unit manifest parsing from `<name>.toml` unit files.
//!
//! A unit is the loadable file of one plugin directory
//! (`<root>/<category>/<name>/<name>.toml`). Loading a unit means parsing
//! its manifest and running the registration hook for every `[[plugin]]`
//! declaration it contains.

use graft_core::GraftError;
use serde::Deserialize;

/// File extension of loadable unit files.
pub const UNIT_EXT: &str = "toml";

/// One `[[plugin]]` declaration inside a unit manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginDecl {
    /// Declared type name; resolves the compiled factory. A trailing `Base`
    /// marks the declaration abstract and it is skipped at registration.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Registered plugin name. Defaults to the type name.
    #[serde(default)]
    pub name: Option<String>,

    /// Enablement attribute. Must be present in the manifest; a missing
    /// value is a fatal configuration error at registration time.
    #[serde(default)]
    pub disabled: Option<bool>,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl PluginDecl {
    /// The name this declaration registers under.
    pub fn registered_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.type_name)
    }
}

/// Intermediate TOML deserialization struct for a unit file.
#[derive(Debug, Deserialize)]
struct UnitManifestFile {
    #[serde(default, rename = "plugin")]
    plugin: Vec<PluginDecl>,
}

/// Parsed unit manifest: the plugin declarations a unit defines.
#[derive(Debug, Clone)]
pub struct UnitManifest {
    pub plugins: Vec<PluginDecl>,
}

/// Parse a unit manifest from TOML content.
///
/// Validates that every declaration carries a non-empty type name. Parse
/// failures are load errors -- the unit was found but failed while being
/// executed.
pub fn parse_unit_manifest(unit: &str, toml_content: &str) -> Result<UnitManifest, GraftError> {
    let file: UnitManifestFile = toml::from_str(toml_content).map_err(|e| GraftError::Load {
        unit: unit.to_string(),
        message: format!("invalid unit manifest: {e}"),
        source: Some(Box::new(e)),
    })?;

    for decl in &file.plugin {
        if decl.type_name.is_empty() {
            return Err(GraftError::Load {
                unit: unit.to_string(),
                message: "unit manifest: plugin type must not be empty".to_string(),
                source: None,
            });
        }
    }

    Ok(UnitManifest {
        plugins: file.plugin,
    })
}
