//! The process-wide registry handle.
//!
//! All mutations run as load-modify-save of the whole persisted state.
//! A single mutex is held for the full cycle: two concurrent mutations
//! must serialize, otherwise the second save would silently drop the
//! first one's update.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use berth_common::error::{BerthError, Result};

use crate::state::RegistryState;
use crate::store::{JsonFileStore, MemoryStore, StateStore};

/// Shared handle over a [`StateStore`] with serialized mutations.
pub struct Registry {
    store: Mutex<Box<dyn StateStore>>,
}

impl Registry {
    /// Creates a registry over an injected storage backend.
    #[must_use]
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Creates a registry backed by a JSON file at the given path.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(JsonFileStore::new(path)))
    }

    /// Creates a registry backed by volatile in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn store(&self) -> MutexGuard<'_, Box<dyn StateStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current state.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be read.
    pub fn snapshot(&self) -> Result<RegistryState> {
        self.store().load()
    }

    /// Registers an alias, overwriting any previous target.
    ///
    /// The container name is a soft reference; its existence in the
    /// runtime is not checked.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the state cannot be loaded or saved.
    pub fn add_alias(&self, alias: &str, container: &str) -> Result<()> {
        let store = self.store();
        let mut state = store.load()?;
        state.add_alias(alias, container);
        store.save(&state)?;
        tracing::info!(alias, container, "alias registered");
        Ok(())
    }

    /// Removes an alias. Removing an absent alias is a no-op; the return
    /// value reports whether an entry was actually removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the state cannot be loaded or saved.
    pub fn remove_alias(&self, alias: &str) -> Result<bool> {
        let store = self.store();
        let mut state = store.load()?;
        let removed = state.remove_alias(alias);
        if removed {
            store.save(&state)?;
            tracing::info!(alias, "alias removed");
        }
        Ok(removed)
    }

    /// Adds a container to a project, creating the project if needed.
    /// Adding an existing member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the state cannot be loaded or saved.
    pub fn add_to_project(&self, project: &str, container: &str) -> Result<()> {
        let store = self.store();
        let mut state = store.load()?;
        state.add_to_project(project, container);
        store.save(&state)?;
        tracing::info!(project, container, "project member added");
        Ok(())
    }

    /// Removes a project. Removing an absent project is a no-op; the
    /// return value reports whether an entry was actually removed.
    ///
    /// Running members of the project are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the state cannot be loaded or saved.
    pub fn remove_project(&self, project: &str) -> Result<bool> {
        let store = self.store();
        let mut state = store.load()?;
        let removed = state.remove_project(project);
        if removed {
            store.save(&state)?;
            tracing::info!(project, "project removed");
        }
        Ok(removed)
    }

    /// Resolves an alias to its container name.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::UnknownAlias`] if the alias is not
    /// registered, or a storage error if the state cannot be read.
    pub fn resolve_alias(&self, alias: &str) -> Result<String> {
        let state = self.store().load()?;
        state
            .alias_target(alias)
            .map(ToOwned::to_owned)
            .ok_or_else(|| BerthError::UnknownAlias {
                alias: alias.to_string(),
            })
    }

    /// Resolves a project to its full member list.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::UnknownProject`] if the project is not
    /// registered, or a storage error if the state cannot be read.
    pub fn resolve_project(&self, project: &str) -> Result<Vec<String>> {
        let state = self.store().load()?;
        state
            .project_members(project)
            .map(<[String]>::to_vec)
            .ok_or_else(|| BerthError::UnknownProject {
                project: project.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn resolve_alias_after_add() {
        let registry = Registry::in_memory();
        registry.add_alias("db", "postgres-1").expect("add");
        assert_eq!(registry.resolve_alias("db").expect("resolve"), "postgres-1");
    }

    #[test]
    fn resolve_unknown_alias_fails() {
        let registry = Registry::in_memory();
        let err = registry.resolve_alias("cache").expect_err("must fail");
        assert!(matches!(err, BerthError::UnknownAlias { alias } if alias == "cache"));
    }

    #[test]
    fn resolve_project_after_delete_fails() {
        let registry = Registry::in_memory();
        registry.add_to_project("web", "nginx").expect("add");
        registry.add_to_project("web", "app").expect("add");
        assert!(registry.remove_project("web").expect("remove"));

        let err = registry.resolve_project("web").expect_err("must fail");
        assert!(matches!(err, BerthError::UnknownProject { project } if project == "web"));
    }

    #[test]
    fn remove_absent_keys_is_noop_not_error() {
        let registry = Registry::in_memory();
        assert!(!registry.remove_alias("missing").expect("no error"));
        assert!(!registry.remove_project("missing").expect("no error"));
    }

    #[test]
    fn file_backed_registry_persists_across_handles() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("registry.json");

        let first = Registry::open(&path);
        first.add_alias("db", "postgres-1").expect("add");
        drop(first);

        let second = Registry::open(&path);
        assert_eq!(second.resolve_alias("db").expect("resolve"), "postgres-1");
    }

    #[test]
    fn concurrent_mutations_lose_no_updates() {
        let registry = Arc::new(Registry::in_memory());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for i in 0..10 {
                        registry
                            .add_to_project("stress", &format!("c-{t}-{i}"))
                            .expect("add");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread joins");
        }

        let members = registry.resolve_project("stress").expect("resolve");
        assert_eq!(members.len(), 80);
    }
}
