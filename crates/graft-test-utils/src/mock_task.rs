// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task-style mock plugins for deterministic testing.
//!
//! `EchoTask` stands in for an ordinary task-contract plugin; its
//! configured value is an [`EchoHandle`] that can be run. `CountingTask`
//! additionally counts constructions and inits so tests can assert how
//! often the registry actually executed anything.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use graft_core::{ConfigMap, GraftError, Plugin, PluginValue};
use graft_registry::FactorySet;

/// A mock task plugin that echoes its configuration back.
pub struct EchoTask {
    name: String,
}

impl EchoTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Register a factory for this task under `type_name`, producing
    /// instances named `name`.
    pub fn register(
        factories: &mut FactorySet,
        type_name: &str,
        name: &str,
    ) -> Result<(), GraftError> {
        let name = name.to_string();
        factories.register_fn(type_name, move || {
            Arc::new(EchoTask::new(name.clone())) as Arc<dyn Plugin>
        })
    }
}

impl Plugin for EchoTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn defaults(&self) -> ConfigMap {
        let mut defaults = ConfigMap::new();
        defaults.insert("message".to_string(), "echo".into());
        defaults
    }

    fn init(&self, config: &ConfigMap) -> Result<PluginValue, GraftError> {
        let message = config
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("echo")
            .to_string();
        Ok(Box::new(EchoHandle { message }))
    }
}

/// The configured value produced by [`EchoTask::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoHandle {
    message: String,
}

impl EchoHandle {
    /// Run the task, returning its configured message.
    pub fn run(&self) -> &str {
        &self.message
    }
}

/// Shared counters reporting how often a [`CountingTask`] was constructed
/// and initialized.
#[derive(Debug, Default)]
pub struct TaskCounters {
    constructions: AtomicUsize,
    inits: AtomicUsize,
}

impl TaskCounters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }
}

/// A mock task plugin that records registry-driven activity.
pub struct CountingTask {
    name: String,
    counters: Arc<TaskCounters>,
}

impl CountingTask {
    /// Register a counting factory under `type_name`, producing instances
    /// named `name` that report into `counters`.
    pub fn register(
        factories: &mut FactorySet,
        type_name: &str,
        name: &str,
        counters: &Arc<TaskCounters>,
    ) -> Result<(), GraftError> {
        let name = name.to_string();
        let counters = counters.clone();
        factories.register_fn(type_name, move || {
            counters.constructions.fetch_add(1, Ordering::SeqCst);
            Arc::new(CountingTask {
                name: name.clone(),
                counters: counters.clone(),
            }) as Arc<dyn Plugin>
        })
    }
}

impl Plugin for CountingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&self, _config: &ConfigMap) -> Result<PluginValue, GraftError> {
        self.counters.inits.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(()))
    }
}
