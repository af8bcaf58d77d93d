// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for discovery, registration, reload, and the lookup
//! facade, exercised end-to-end over on-disk plugin trees.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use graft_core::{ConfigMap, GraftError, Plugin, PluginValue};
use graft_registry::{bootstrap, DiscoveryMode, FactorySet, LoadOptions, PluginRegistry};
use tempfile::TempDir;

struct EchoTask {
    name: &'static str,
}

impl Plugin for EchoTask {
    fn name(&self) -> &str {
        self.name
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
        Ok(Box::new(message))
    }
}

/// Writes `<root>/<category>/<name>/<name>.toml` declaring one plugin.
fn write_unit(root: &Path, category: &str, name: &str, type_name: &str) {
    let dir = root.join(category).join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(format!("{name}.toml")),
        format!("[[plugin]]\ntype = \"{type_name}\"\nname = \"{name}\"\ndisabled = false\n"),
    )
    .unwrap();
}

/// A factory set with one counting constructor per type name; all of them
/// produce `EchoTask` instances named after their unit.
fn counting_factories(
    types: &[&'static str],
    constructions: &Arc<AtomicUsize>,
) -> FactorySet {
    let mut factories = FactorySet::new();
    for type_name in types {
        let constructions = constructions.clone();
        let name = type_name.strip_suffix("Task").unwrap_or(type_name);
        factories
            .register_fn(*type_name, move || {
                constructions.fetch_add(1, Ordering::SeqCst);
                Arc::new(EchoTask { name })
            })
            .unwrap();
    }
    factories
}

#[test]
fn discovered_and_loaded_plugins_are_queryable() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Echo", "EchoTask");
    write_unit(tmp.path(), "report", "Logger", "LoggerTask");

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry = PluginRegistry::new(
        tmp.path(),
        counting_factories(&["EchoTask", "LoggerTask"], &constructions),
    );
    let found = registry.discover(DiscoveryMode::Load).unwrap();

    assert_eq!(found, 2);
    for (category, name) in [("tasks", "Echo"), ("report", "Logger")] {
        assert!(registry.is_plugin_loaded(category, name, LoadOptions::default()));
        assert_eq!(registry.get_plugin_type(name).as_deref(), Some(category));
    }
}

#[test]
fn duplicate_name_in_same_category_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Echo", "EchoTask");
    // A second, distinct unit declaring the same registered name.
    let dir = tmp.path().join("tasks").join("Other");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Other.toml"),
        "[[plugin]]\ntype = \"OtherTask\"\nname = \"Echo\"\ndisabled = false\n",
    )
    .unwrap();

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry = PluginRegistry::new(
        tmp.path(),
        counting_factories(&["EchoTask", "OtherTask"], &constructions),
    );

    let err = registry.discover(DiscoveryMode::Load).unwrap_err();
    assert!(matches!(
        err,
        GraftError::DuplicatePlugin { ref category, ref name }
            if category == "tasks" && name == "Echo"
    ));
    // The first registration survives; nothing was overwritten.
    assert_eq!(registry.len(), 1);
}

#[test]
fn same_name_in_two_categories_registers_independently() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Echo", "EchoTask");
    write_unit(tmp.path(), "report", "Echo", "ReportEchoTask");

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry = PluginRegistry::new(
        tmp.path(),
        counting_factories(&["EchoTask", "ReportEchoTask"], &constructions),
    );
    registry.discover(DiscoveryMode::Load).unwrap();

    assert!(registry.is_plugin_loaded("tasks", "Echo", LoadOptions::default()));
    assert!(registry.is_plugin_loaded("report", "Echo", LoadOptions::default()));
    assert_eq!(registry.len(), 2);
}

#[test]
fn reload_preserves_exactly_one_entry() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Echo", "EchoTask");

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry =
        PluginRegistry::new(tmp.path(), counting_factories(&["EchoTask"], &constructions));
    registry.discover(DiscoveryMode::Load).unwrap();

    let before: Vec<_> = registry
        .snapshot()
        .into_iter()
        .map(|e| (e.category, e.name))
        .collect();
    assert_eq!(before, vec![("tasks".to_string(), "Echo".to_string())]);

    assert!(registry.reload_plugin("Echo", None));

    let after: Vec<_> = registry
        .snapshot()
        .into_iter()
        .map(|e| (e.category, e.name))
        .collect();
    assert_eq!(after, before);
    // The entry was genuinely cycled: a fresh instance was constructed.
    assert_eq!(constructions.load(Ordering::SeqCst), 2);
}

#[test]
fn get_plugin_for_missing_name_returns_none() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("tasks")).unwrap();

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry =
        PluginRegistry::new(tmp.path(), counting_factories(&["EchoTask"], &constructions));

    let result = registry.get_plugin("tasks", "Missing", &ConfigMap::new());
    assert!(matches!(result, Ok(None)));
    assert_eq!(constructions.load(Ordering::SeqCst), 0);
}

#[test]
fn reserved_units_are_never_loaded() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Echo", "EchoTask");
    write_unit(tmp.path(), "tasks", "base", "EchoTask");

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry =
        PluginRegistry::new(tmp.path(), counting_factories(&["EchoTask"], &constructions));
    registry.discover(DiscoveryMode::Load).unwrap();

    assert!(registry.contains("tasks", "Echo"));
    assert!(!registry.contains("tasks", "base"));
    // Exactly one construction: nothing in base/ was ever executed.
    assert_eq!(constructions.load(Ordering::SeqCst), 1);
}

#[test]
fn sequential_loads_in_one_category_both_persist() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Alpha", "AlphaTask");
    write_unit(tmp.path(), "tasks", "Beta", "BetaTask");

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry = PluginRegistry::new(
        tmp.path(),
        counting_factories(&["AlphaTask", "BetaTask"], &constructions),
    );
    registry.discover(DiscoveryMode::Load).unwrap();

    assert!(registry.contains("tasks", "Alpha"));
    assert!(registry.contains("tasks", "Beta"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn scan_mode_notes_units_without_executing() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Echo", "EchoTask");

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry =
        PluginRegistry::new(tmp.path(), counting_factories(&["EchoTask"], &constructions));

    let found = registry.discover(DiscoveryMode::Scan).unwrap();
    assert_eq!(found, 1);
    assert!(registry.is_empty());
    assert_eq!(constructions.load(Ordering::SeqCst), 0);

    // The live registry is shared across modes: entries loaded earlier stay
    // visible after a later scan.
    registry.discover(DiscoveryMode::Load).unwrap();
    registry.discover(DiscoveryMode::Scan).unwrap();
    assert!(registry.contains("tasks", "Echo"));
}

#[test]
fn get_plugin_configures_a_fresh_value_per_call() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Echo", "EchoTask");

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry =
        PluginRegistry::new(tmp.path(), counting_factories(&["EchoTask"], &constructions));

    let mut config = ConfigMap::new();
    config.insert("message".to_string(), "first".into());
    let first = registry.get_plugin("tasks", "Echo", &config).unwrap().unwrap();
    assert_eq!(first.downcast_ref::<String>().unwrap(), "first");

    config.insert("message".to_string(), "second".into());
    let second = registry.get_plugin("tasks", "Echo", &config).unwrap().unwrap();
    assert_eq!(second.downcast_ref::<String>().unwrap(), "second");

    // Only the autoload constructed an instance; init calls reuse it.
    assert_eq!(constructions.load(Ordering::SeqCst), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn bootstrap_honors_autoload_config() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "tasks", "Echo", "EchoTask");

    let mut config = graft_config::PluginsConfig::default();
    config.root = tmp.path().display().to_string();

    let constructions = Arc::new(AtomicUsize::new(0));
    let registry = bootstrap(
        &config,
        counting_factories(&["EchoTask"], &constructions),
    )
    .unwrap();
    assert!(registry.contains("tasks", "Echo"));

    config.autoload = false;
    let scanned = bootstrap(
        &config,
        counting_factories(&["EchoTask"], &constructions),
    )
    .unwrap();
    assert!(scanned.is_empty());
}

#[test]
fn bootstrap_surfaces_fatal_registration_errors() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("tasks").join("Echo");
    fs::create_dir_all(&dir).unwrap();
    // Enablement attribute missing entirely.
    fs::write(dir.join("Echo.toml"), "[[plugin]]\ntype = \"EchoTask\"\n").unwrap();

    let mut config = graft_config::PluginsConfig::default();
    config.root = tmp.path().display().to_string();

    let constructions = Arc::new(AtomicUsize::new(0));
    let err = bootstrap(&config, counting_factories(&["EchoTask"], &constructions)).unwrap_err();
    assert!(matches!(err, GraftError::Config(_)));
}
