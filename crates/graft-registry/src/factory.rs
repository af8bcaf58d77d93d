// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled-in plugin factories.
//!
//! The original mechanism registered plugin types as a side effect of
//! defining them; here a [`FactorySet`] is built explicitly at bootstrap and
//! handed to the registry. Loading a unit resolves each declared type name
//! against this set and constructs the canonical instance through its
//! factory.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use graft_core::{GraftError, Plugin};

/// Factory trait for creating plugin instances.
///
/// Factories take no arguments -- configuration happens later, per call,
/// through [`Plugin::init`].
pub trait PluginFactory: Send + Sync {
    /// The declared type name this factory produces.
    fn type_name(&self) -> &str;

    /// Create the canonical instance of the plugin type.
    fn create(&self) -> Arc<dyn Plugin>;
}

/// Closure adapter so tests and hosts can register factories without a
/// dedicated struct per plugin type.
struct FnFactory {
    type_name: String,
    create: Box<dyn Fn() -> Arc<dyn Plugin> + Send + Sync>,
}

impl PluginFactory for FnFactory {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn create(&self) -> Arc<dyn Plugin> {
        (self.create)()
    }
}

/// The set of compiled-in plugin factories, keyed by declared type name.
///
/// Immutable once handed to the registry. Registering two factories under
/// the same type name is a bootstrap configuration error.
#[derive(Default)]
pub struct FactorySet {
    factories: HashMap<String, Box<dyn PluginFactory>>,
}

impl fmt::Debug for FactorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactorySet")
            .field("types", &self.type_names())
            .finish()
    }
}

impl FactorySet {
    /// Create a new empty factory set.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under its declared type name.
    pub fn register(&mut self, factory: Box<dyn PluginFactory>) -> Result<(), GraftError> {
        let type_name = factory.type_name().to_string();
        if type_name.is_empty() {
            return Err(GraftError::Config(
                "factory type name must not be empty".to_string(),
            ));
        }
        if self.factories.contains_key(&type_name) {
            return Err(GraftError::Config(format!(
                "factory for plugin type \"{type_name}\" is already registered"
            )));
        }
        self.factories.insert(type_name, factory);
        Ok(())
    }

    /// Register a closure as the factory for `type_name`.
    pub fn register_fn<F>(
        &mut self,
        type_name: impl Into<String>,
        create: F,
    ) -> Result<(), GraftError>
    where
        F: Fn() -> Arc<dyn Plugin> + Send + Sync + 'static,
    {
        self.register(Box::new(FnFactory {
            type_name: type_name.into(),
            create: Box::new(create),
        }))
    }

    /// Look up a factory by declared type name.
    pub fn get(&self, type_name: &str) -> Option<&dyn PluginFactory> {
        self.factories.get(type_name).map(Box::as_ref)
    }

    /// All registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no factories are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
