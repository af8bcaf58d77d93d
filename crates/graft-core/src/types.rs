// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the registry and its collaborators.

use std::any::Any;

use strum::{Display, EnumString};

/// Keyword-configuration mapping passed to [`init`] and returned by
/// [`defaults`].
///
/// [`init`]: crate::traits::Plugin::init
/// [`defaults`]: crate::traits::Plugin::defaults
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// The configured value produced by a plugin's `init` call.
///
/// Each `init` invocation yields a fresh value; callers downcast to the
/// concrete type the plugin documents.
pub type PluginValue = Box<dyn Any + Send + Sync>;

/// Controls whether the discovery walker executes eligible units or only
/// notes their existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum DiscoveryMode {
    /// Note eligible units without executing them.
    Scan,
    /// Pass every eligible unit to the loader.
    Load,
}
