// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Graft plugin mechanism.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the Graft registry and its collaborators.
#[derive(Debug, Error)]
pub enum GraftError {
    /// Configuration errors (invalid manifest fields, missing required
    /// attributes at registration, bad bootstrap parameters).
    #[error("configuration error: {0}")]
    Config(String),

    /// A plugin with the same name is already registered in that category.
    /// Registration never silently overwrites an existing entry.
    #[error("plugin \"{name}\" was already found in category \"{category}\"")]
    DuplicatePlugin { category: String, name: String },

    /// The named unit file does not exist in the searched directory.
    #[error("unit \"{unit}\" not found in {dir}")]
    UnitNotFound { unit: String, dir: PathBuf },

    /// A unit was found but failed while being loaded (unreadable file,
    /// malformed manifest, or a declaration with no compiled factory).
    #[error("failed to load unit \"{unit}\": {message}")]
    Load {
        unit: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested plugin is not present in the registry. Soft at the
    /// facade (collapses to `None`/`false`); typed here for reload and
    /// logging.
    #[error("plugin not found: {name}")]
    PluginNotFound {
        category: Option<String>,
        name: String,
    },

    /// Filesystem errors while walking the plugin root.
    #[error("i/o error at {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
