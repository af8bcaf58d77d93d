// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging-plugin mock.
//!
//! `LogSink` plays the role of a logging collaborator plugin: `init`
//! requires a `name` key, honors an optional `level`, and returns a fresh
//! [`LogHandle`] per call. Handles emit through `tracing` and capture their
//! messages so tests can assert on them without a subscriber.

use std::sync::{Arc, Mutex, PoisonError};

use graft_core::{ConfigMap, GraftError, Plugin, PluginValue};
use graft_registry::FactorySet;
use tracing::Level;

/// A mock logging plugin.
pub struct LogSink;

impl LogSink {
    /// Register a factory for the sink under `type_name`.
    pub fn register(factories: &mut FactorySet, type_name: &str) -> Result<(), GraftError> {
        factories.register_fn(type_name, || Arc::new(LogSink) as Arc<dyn Plugin>)
    }
}

impl Plugin for LogSink {
    fn name(&self) -> &str {
        "Logger"
    }

    fn defaults(&self) -> ConfigMap {
        let mut defaults = ConfigMap::new();
        defaults.insert("name".to_string(), "logger.base".into());
        defaults
    }

    fn init(&self, config: &ConfigMap) -> Result<PluginValue, GraftError> {
        // A name must be given to the logger.
        let name = config
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                GraftError::Config("no logger name passed as configuration key `name`".to_string())
            })?
            .to_string();

        let level = match config.get("level").and_then(|v| v.as_str()) {
            None => Level::DEBUG,
            Some("trace") => Level::TRACE,
            Some("debug") => Level::DEBUG,
            Some("info") => Level::INFO,
            Some("warn") => Level::WARN,
            Some("error") => Level::ERROR,
            Some(other) => {
                return Err(GraftError::Config(format!(
                    "unknown logger level `{other}`"
                )));
            }
        };

        Ok(Box::new(LogHandle {
            name,
            level,
            records: Mutex::new(Vec::new()),
        }))
    }
}

/// The configured value produced by [`LogSink::init`]: a named logger that
/// records everything it emits.
pub struct LogHandle {
    name: String,
    level: Level,
    records: Mutex<Vec<String>>,
}

impl LogHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Log a message at the handle's level and capture it.
    pub fn log(&self, message: &str) {
        if self.level == Level::TRACE {
            tracing::trace!(logger = %self.name, "{message}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(logger = %self.name, "{message}");
        } else if self.level == Level::INFO {
            tracing::info!(logger = %self.name, "{message}");
        } else if self.level == Level::WARN {
            tracing::warn!(logger = %self.name, "{message}");
        } else {
            tracing::error!(logger = %self.name, "{message}");
        }
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    /// Everything logged through this handle, in order.
    pub fn records(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
