// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability trait definitions for the Graft plugin mechanism.

pub mod plugin;

pub use plugin::Plugin;
