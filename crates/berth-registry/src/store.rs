//! Storage backends for the registry.
//!
//! The registry reads and writes its state through the [`StateStore`]
//! capability trait so callers can inject a JSON file on disk, or an
//! in-memory store in tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use berth_common::error::{BerthError, Result};

use crate::state::RegistryState;

/// Capability interface for loading and saving the full registry state.
///
/// Every mutation is a read-modify-write of the entire structure; there
/// are no partial updates.
pub trait StateStore: Send + Sync {
    /// Loads the persisted state, or an empty default when no state has
    /// been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::StorageCorrupt`] if the backing store exists
    /// but cannot be parsed.
    fn load(&self) -> Result<RegistryState>;

    /// Persists the full state.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::StorageUnwritable`] on I/O failure.
    fn save(&self, state: &RegistryState) -> Result<()>;
}

/// JSON file store with write-to-temp-then-rename persistence, so a crash
/// mid-write never leaves a half-written, unparsable file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the given file path. The file is not
    /// touched until the first load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unwritable(&self, source: std::io::Error) -> BerthError {
        BerthError::StorageUnwritable {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<RegistryState> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no registry file, starting empty");
                return Ok(RegistryState::default());
            }
            Err(e) => {
                return Err(BerthError::StorageCorrupt {
                    path: self.path.clone(),
                    source: <serde_json::Error as serde::de::Error>::custom(e),
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| BerthError::StorageCorrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, state: &RegistryState) -> Result<()> {
        let json =
            serde_json::to_vec_pretty(state).map_err(|e| self.unwritable(std::io::Error::other(e)))?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            std::fs::create_dir_all(dir).map_err(|e| self.unwritable(e))?;
        }

        // Temp file in the target directory so the rename stays on one
        // filesystem and is atomic.
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))
            .map_err(|e| self.unwritable(e))?;
        tmp.write_all(&json).map_err(|e| self.unwritable(e))?;
        let _ = tmp
            .persist(&self.path)
            .map_err(|e| self.unwritable(e.error))?;

        tracing::debug!(path = %self.path.display(), "registry saved");
        Ok(())
    }
}

/// Volatile in-memory store, used by tests and available as an explicit
/// "don't persist anything" backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<RegistryState>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<RegistryState> {
        Ok(self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn save(&self, state: &RegistryState) -> Result<()> {
        *self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_yields_empty_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("registry.json"));
        let state = store.load().expect("load succeeds");
        assert_eq!(state, RegistryState::default());
    }

    #[test]
    fn save_then_load_is_a_fixed_point() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("registry.json"));

        let mut state = RegistryState::default();
        state.add_alias("db", "postgres-1");
        state.add_to_project("web", "nginx");
        state.add_to_project("web", "app");

        store.save(&state).expect("save succeeds");
        assert_eq!(store.load().expect("load succeeds"), state);
    }

    #[test]
    fn load_garbage_reports_corrupt_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("registry.json");
        std::fs::write(&path, b"{ not json").expect("write fixture");

        let err = JsonFileStore::new(&path).load().expect_err("load must fail");
        assert!(matches!(err, BerthError::StorageCorrupt { .. }));
    }

    #[test]
    fn load_wrong_schema_reports_corrupt_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("registry.json");
        std::fs::write(&path, br#"{ "aliases": [] }"#).expect("write fixture");

        let err = JsonFileStore::new(&path).load().expect_err("load must fail");
        assert!(matches!(err, BerthError::StorageCorrupt { .. }));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("registry.json");
        let store = JsonFileStore::new(&path);

        store.save(&RegistryState::default()).expect("save succeeds");
        assert!(path.exists());
    }

    #[test]
    fn save_overwrites_previous_contents_completely() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("registry.json"));

        let mut big = RegistryState::default();
        for i in 0..50 {
            big.add_alias(format!("alias-{i}"), "c");
        }
        store.save(&big).expect("save big");
        store.save(&RegistryState::default()).expect("save small");

        assert_eq!(store.load().expect("load"), RegistryState::default());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        let mut state = RegistryState::default();
        state.add_alias("db", "postgres-1");
        store.save(&state).expect("save");
        assert_eq!(store.load().expect("load"), state);
    }
}
