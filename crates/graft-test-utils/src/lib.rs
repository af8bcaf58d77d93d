// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Graft integration tests.
//!
//! Provides mock plugins and on-disk fixtures for fast, deterministic,
//! CI-runnable tests without real plugin crates.
//!
//! # Components
//!
//! - [`PluginTree`] - Tempdir-backed plugin tree following the discovery
//!   convention
//! - [`EchoTask`] / [`CountingTask`] - Task-contract mock plugins
//! - [`LogSink`] - Logging-plugin mock with message capture

pub mod fixture;
pub mod mock_logger;
pub mod mock_task;

pub use fixture::{single_plugin_manifest, PluginTree};
pub use mock_logger::{LogHandle, LogSink};
pub use mock_task::{CountingTask, EchoHandle, EchoTask, TaskCounters};

/// Install a `tracing` subscriber honoring `RUST_LOG` for test output.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
