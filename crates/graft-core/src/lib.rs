// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Graft plugin mechanism.
//!
//! This crate provides the foundational trait definition, error types, and
//! common types used throughout the Graft workspace. Plugins implement
//! [`Plugin`]; the registry and facade live in `graft-registry`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GraftError;
pub use traits::Plugin;
pub use types::{ConfigMap, DiscoveryMode, PluginValue};
