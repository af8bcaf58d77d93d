// SPDX-FileCopyrightText: 2026 Graft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide plugin registry and its registration hook.
//!
//! The registry maps category -> name -> [`PluginEntry`] and holds exactly
//! one canonical instance per pair. It is constructed once at startup,
//! shared by `Arc`, and mutated only by the registration hook (insert) and
//! the reload facility (remove + reinsert).

use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use graft_config::PluginsConfig;
use graft_core::{GraftError, Plugin};
use tracing::{debug, info, warn};

use crate::factory::FactorySet;
use crate::manifest::PluginDecl;

/// Declared type names ending in this suffix are abstract and never
/// registered.
pub const ABSTRACT_SUFFIX: &str = "Base";

/// Default file stems skipped during discovery.
pub const RESERVED_FILES: &[&str] = &["__init__", "base", "register"];

pub(crate) type CategoryMap = HashMap<String, HashMap<String, PluginEntry>>;

/// A single entry in the plugin registry.
#[derive(Clone)]
pub struct PluginEntry {
    /// The canonical, shared instance of the plugin.
    pub instance: Arc<dyn Plugin>,
    /// Name of the unit that loaded this plugin, for reload.
    pub loader: String,
    /// Directory the unit was loaded from, for reload.
    pub source_dir: PathBuf,
    /// Category the plugin registered under.
    pub category: String,
    /// Name the plugin registered under, unique within the category.
    pub name: String,
}

impl std::fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEntry")
            .field("category", &self.category)
            .field("name", &self.name)
            .field("loader", &self.loader)
            .field("source_dir", &self.source_dir)
            .finish()
    }
}

/// Process-wide registry of loaded plugins.
///
/// All mutations run under one write-lock scope (single-writer discipline);
/// reads clone snapshots out of a read-lock scope. No lock is ever held
/// while factory constructors, `init`, or filesystem I/O run, so a unit
/// whose constructor recursively triggers discovery or lookup serializes on
/// the next short lock scope instead of deadlocking.
pub struct PluginRegistry {
    root: PathBuf,
    reserved: HashSet<String>,
    factories: FactorySet,
    entries: RwLock<CategoryMap>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("root", &self.root)
            .field("reserved", &self.reserved)
            .field("factories", &self.factories)
            .field("len", &self.len())
            .finish()
    }
}

impl PluginRegistry {
    /// Create an empty registry over `root` with the default reserved set.
    pub fn new(root: impl Into<PathBuf>, factories: FactorySet) -> Self {
        Self::with_reserved_files(
            root,
            factories,
            RESERVED_FILES.iter().map(|s| s.to_string()),
        )
    }

    /// Create an empty registry with an explicit reserved-filenames set.
    pub fn with_reserved_files(
        root: impl Into<PathBuf>,
        factories: FactorySet,
        reserved: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            root: root.into(),
            reserved: reserved.into_iter().collect(),
            factories,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create an empty registry from the `[plugins]` configuration section.
    pub fn from_config(config: &PluginsConfig, factories: FactorySet) -> Self {
        Self::with_reserved_files(&config.root, factories, config.reserved_files.clone())
    }

    /// Root directory of the plugin tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn reserved(&self) -> &HashSet<String> {
        &self.reserved
    }

    pub(crate) fn read_entries(&self) -> RwLockReadGuard<'_, CategoryMap> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, CategoryMap> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registration hook, fired by the loader for every declaration a
    /// freshly parsed unit defines.
    ///
    /// Returns `Ok(true)` when an entry was registered, `Ok(false)` for
    /// silent skips (abstract type names, disabled declarations). A missing
    /// `disabled` attribute and duplicate (category, name) pairs are fatal.
    pub(crate) fn register_declaration(
        &self,
        decl: &PluginDecl,
        unit: &str,
        unit_path: &Path,
    ) -> Result<bool, GraftError> {
        if decl.type_name.ends_with(ABSTRACT_SUFFIX) {
            debug!(type_name = %decl.type_name, "skipping abstract plugin type");
            return Ok(false);
        }

        let disabled = decl.disabled.ok_or_else(|| {
            GraftError::Config(format!(
                "plugin \"{}\" is missing attribute: disabled",
                decl.type_name
            ))
        })?;
        if disabled {
            debug!(type_name = %decl.type_name, "skipping disabled plugin");
            return Ok(false);
        }

        let category = infer_category(unit_path)?;
        let name = decl.registered_name().to_string();

        let factory = self.factories.get(&decl.type_name).ok_or_else(|| {
            GraftError::Load {
                unit: unit.to_string(),
                message: format!(
                    "no factory registered for plugin type \"{}\"",
                    decl.type_name
                ),
                source: None,
            }
        })?;

        // Construct outside any lock scope; the constructor may touch the
        // registry itself.
        let instance = factory.create();
        if instance.name() != name {
            warn!(
                declared = %name,
                reported = %instance.name(),
                "plugin instance reports a different name than its declaration"
            );
        }

        let source_dir = unit_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.insert(PluginEntry {
            instance,
            loader: unit.to_string(),
            source_dir,
            category: category.clone(),
            name: name.clone(),
        })?;
        info!(category = %category, name = %name, "discovered new plugin");
        Ok(true)
    }

    /// Insert an entry, failing on a (category, name) collision.
    ///
    /// The duplicate check and the insert share one write scope, so entries
    /// racing through the unlocked construction window cannot overwrite each
    /// other.
    pub(crate) fn insert(&self, entry: PluginEntry) -> Result<(), GraftError> {
        let mut entries = self.write_entries();
        let category_map = entries.entry(entry.category.clone()).or_default();
        if category_map.contains_key(&entry.name) {
            return Err(GraftError::DuplicatePlugin {
                category: entry.category,
                name: entry.name,
            });
        }
        category_map.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Remove the entry for (category, name), returning it if present.
    pub(crate) fn remove(&self, category: &str, name: &str) -> Option<PluginEntry> {
        let mut entries = self.write_entries();
        entries.get_mut(category)?.remove(name)
    }

    /// Remove the first entry matching `name` across categories in sorted
    /// order.
    pub(crate) fn remove_first_match(&self, name: &str) -> Option<PluginEntry> {
        let mut entries = self.write_entries();
        let mut categories: Vec<String> = entries.keys().cloned().collect();
        categories.sort();
        for category in categories {
            if let Some(entry) = entries.get_mut(&category).and_then(|m| m.remove(name)) {
                return Some(entry);
            }
        }
        None
    }

    /// True when (category, name) is registered.
    pub fn contains(&self, category: &str, name: &str) -> bool {
        self.read_entries()
            .get(category)
            .is_some_and(|m| m.contains_key(name))
    }

    /// A clone of the entry for (category, name).
    pub fn entry(&self, category: &str, name: &str) -> Option<PluginEntry> {
        self.read_entries()
            .get(category)
            .and_then(|m| m.get(name))
            .cloned()
    }

    /// All registered categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        let entries = self.read_entries();
        let mut categories: Vec<String> = entries
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(c, _)| c.clone())
            .collect();
        categories.sort();
        categories
    }

    /// A snapshot of every entry, sorted by (category, name).
    pub fn snapshot(&self) -> Vec<PluginEntry> {
        let entries = self.read_entries();
        let mut all: Vec<PluginEntry> = entries
            .values()
            .flat_map(|m| m.values().cloned())
            .collect();
        all.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        all
    }

    /// Returns the number of registered plugins across all categories.
    pub fn len(&self) -> usize {
        self.read_entries().values().map(HashMap::len).sum()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Category = name of the directory two levels above the unit file
/// (`root/<category>/<name>/<name>.toml`).
fn infer_category(unit_path: &Path) -> Result<String, GraftError> {
    unit_path
        .parent()
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .and_then(OsStr::to_str)
        .map(str::to_string)
        .ok_or_else(|| {
            GraftError::Config(format!(
                "cannot infer category for unit at {}",
                unit_path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{ConfigMap, PluginValue};

    struct NullTask;

    impl Plugin for NullTask {
        fn name(&self) -> &str {
            "Null"
        }
        fn init(&self, _config: &ConfigMap) -> Result<PluginValue, GraftError> {
            Ok(Box::new(()))
        }
    }

    fn test_entry(category: &str, name: &str) -> PluginEntry {
        PluginEntry {
            instance: Arc::new(NullTask),
            loader: name.to_string(),
            source_dir: PathBuf::from(format!("/plugins/{category}/{name}")),
            category: category.to_string(),
            name: name.to_string(),
        }
    }

    fn empty_registry() -> PluginRegistry {
        PluginRegistry::new("/plugins", FactorySet::new())
    }

    #[test]
    fn insert_and_lookup_roundtrip() {
        let registry = empty_registry();
        registry.insert(test_entry("tasks", "Echo")).unwrap();

        assert!(registry.contains("tasks", "Echo"));
        let entry = registry.entry("tasks", "Echo").unwrap();
        assert_eq!(entry.category, "tasks");
        assert_eq!(entry.name, "Echo");
        assert_eq!(entry.loader, "Echo");
    }

    #[test]
    fn duplicate_insert_fails() {
        let registry = empty_registry();
        registry.insert(test_entry("tasks", "Echo")).unwrap();
        let err = registry.insert(test_entry("tasks", "Echo")).unwrap_err();
        assert!(matches!(
            err,
            GraftError::DuplicatePlugin { ref category, ref name }
                if category == "tasks" && name == "Echo"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_name_different_categories_coexist() {
        let registry = empty_registry();
        registry.insert(test_entry("tasks", "Echo")).unwrap();
        registry.insert(test_entry("report", "Echo")).unwrap();

        assert!(registry.contains("tasks", "Echo"));
        assert!(registry.contains("report", "Echo"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_returns_entry() {
        let registry = empty_registry();
        registry.insert(test_entry("tasks", "Echo")).unwrap();

        let removed = registry.remove("tasks", "Echo").unwrap();
        assert_eq!(removed.name, "Echo");
        assert!(!registry.contains("tasks", "Echo"));
        assert!(registry.remove("tasks", "Echo").is_none());
    }

    #[test]
    fn remove_first_match_scans_categories_in_sorted_order() {
        let registry = empty_registry();
        registry.insert(test_entry("tasks", "Echo")).unwrap();
        registry.insert(test_entry("report", "Echo")).unwrap();

        // "report" sorts before "tasks".
        let removed = registry.remove_first_match("Echo").unwrap();
        assert_eq!(removed.category, "report");
        assert!(registry.contains("tasks", "Echo"));
    }

    #[test]
    fn categories_and_snapshot_are_sorted() {
        let registry = empty_registry();
        registry.insert(test_entry("tasks", "Zeta")).unwrap();
        registry.insert(test_entry("tasks", "Alpha")).unwrap();
        registry.insert(test_entry("report", "Logger")).unwrap();

        assert_eq!(registry.categories(), vec!["report", "tasks"]);
        let names: Vec<(String, String)> = registry
            .snapshot()
            .into_iter()
            .map(|e| (e.category, e.name))
            .collect();
        assert_eq!(
            names,
            vec![
                ("report".to_string(), "Logger".to_string()),
                ("tasks".to_string(), "Alpha".to_string()),
                ("tasks".to_string(), "Zeta".to_string()),
            ]
        );
    }

    #[test]
    fn infer_category_from_convention_path() {
        let path = Path::new("/plugins/tasks/Echo/Echo.toml");
        assert_eq!(infer_category(path).unwrap(), "tasks");
    }

    #[test]
    fn infer_category_fails_at_filesystem_root() {
        let err = infer_category(Path::new("/Echo.toml")).unwrap_err();
        assert!(matches!(err, GraftError::Config(_)));
    }
}
