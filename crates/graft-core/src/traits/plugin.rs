// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base capability trait that every plugin satisfies.

use crate::error::GraftError;
use crate::types::{ConfigMap, PluginValue};

/// The capability contract every Graft plugin implements.
///
/// The registry holds exactly one long-lived instance per (category, name)
/// pair. Configuration happens per call through [`init`], which may be
/// invoked repeatedly with different configuration; each call produces a
/// fresh configured value and must not mutate registry identity.
///
/// [`init`]: Plugin::init
pub trait Plugin: Send + Sync + 'static {
    /// Returns the name of this plugin.
    fn name(&self) -> &str;

    /// Default configuration mapping for this plugin.
    ///
    /// Override when the plugin wants to advertise baseline settings to its
    /// callers. The registry never merges these into an `init` call on its
    /// own; they are part of the lookup facade surface.
    fn defaults(&self) -> ConfigMap {
        ConfigMap::new()
    }

    /// Produces a configured value from the given configuration.
    fn init(&self, config: &ConfigMap) -> Result<PluginValue, GraftError>;

    /// Releases any resources the plugin holds.
    fn shutdown(&self) -> Result<(), GraftError> {
        Ok(())
    }
}
