//! Module set management for tracking parsed source modules.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use smol_str::SmolStr;

use crate::base::ModuleId;
use crate::syntax::SourceModule;

/// Manages the mapping between module paths and ModuleIds.
///
/// Assigns stable ids to paths and holds the current AST of each module.
/// A path keeps its id across removal and re-insertion.
#[derive(Debug, Default)]
pub struct ModuleSet {
    inner: RwLock<ModuleSetInner>,
}

#[derive(Debug, Default)]
struct ModuleSetInner {
    /// Path → ModuleId mapping
    path_to_id: IndexMap<SmolStr, ModuleId>,
    /// ModuleId → current AST, in insertion order
    modules: IndexMap<ModuleId, Arc<SourceModule>>,
    /// Next ModuleId to assign
    next_id: u32,
}

impl ModuleSet {
    /// Create a new empty module set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a ModuleId for a path.
    pub fn module_id(&self, path: &str) -> ModuleId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(path) {
                return id;
            }
        }

        // Slow path: write lock
        let mut inner = self.inner.write();

        // Double-check
        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = ModuleId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(SmolStr::new(path), id);
        id
    }

    /// Find the id of a module currently in the set.
    pub fn lookup(&self, path: &str) -> Option<ModuleId> {
        let inner = self.inner.read();
        inner
            .path_to_id
            .get(path)
            .copied()
            .filter(|id| inner.modules.contains_key(id))
    }

    /// Insert or replace a module, keyed by its path.
    pub fn insert(&self, module: SourceModule) -> ModuleId {
        let id = self.module_id(&module.path);
        self.inner.write().modules.insert(id, Arc::new(module));
        id
    }

    /// Get a module's AST.
    pub fn get(&self, module: ModuleId) -> Option<Arc<SourceModule>> {
        self.inner.read().modules.get(&module).cloned()
    }

    /// Get the path of a module currently in the set.
    pub fn path(&self, module: ModuleId) -> Option<SmolStr> {
        self.inner.read().modules.get(&module).map(|m| m.path.clone())
    }

    /// Remove a module from the set. Its id stays reserved for the path.
    pub fn remove(&self, module: ModuleId) -> Option<Arc<SourceModule>> {
        self.inner.write().modules.shift_remove(&module)
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.inner.read().modules.len()
    }

    /// Check if the module set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all modules in insertion order.
    pub fn snapshot(&self) -> Vec<(ModuleId, Arc<SourceModule>)> {
        self.inner
            .read()
            .modules
            .iter()
            .map(|(&id, module)| (id, Arc::clone(module)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_set_id_assignment() {
        let modules = ModuleSet::new();

        let id1 = modules.module_id("src/a.ts");
        let id2 = modules.module_id("src/b.ts");
        let id3 = modules.module_id("src/a.ts"); // same as id1

        assert_ne!(id1, id2);
        assert_eq!(id1, id3);
    }

    #[test]
    fn test_insert_replaces_by_path() {
        let modules = ModuleSet::new();
        let id = modules.insert(SourceModule::new("src/a.ts"));
        let again = modules.insert(SourceModule::new("src/a.ts"));

        assert_eq!(id, again);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules.path(id).as_deref(), Some("src/a.ts"));
    }

    #[test]
    fn test_remove_keeps_id_reserved() {
        let modules = ModuleSet::new();
        let a = modules.insert(SourceModule::new("a.ts"));
        let b = modules.insert(SourceModule::new("b.ts"));

        assert!(modules.remove(a).is_some());
        assert!(modules.get(a).is_none());
        assert_eq!(modules.lookup("a.ts"), None);
        assert_eq!(modules.lookup("b.ts"), Some(b));
        assert_eq!(modules.snapshot().len(), 1);
        assert_eq!(modules.snapshot()[0].0, b);

        assert_eq!(modules.insert(SourceModule::new("a.ts")), a);
    }
}
