//! # JSON key-value store
//!
//! File-backed key-value adapter: one JSON document per logical key, stored
//! under a single data directory. Key names embed the application prefix and
//! the data-format version so future migrations can coexist with old files.
//!
//! ## File layout
//!
//! ```text
//! data/
//! ├── fuel_tracker_vehicles_v2.json
//! ├── fuel_tracker_history_v2.json
//! └── fuel_tracker_settings_v2.json
//! ```
//!
//! Reads never fail: a missing or corrupt file yields the caller's default
//! (the corrupt value is discarded and logged). Writes are atomic (temp file
//! then rename) and report distinct failure classes so the UI can show a
//! specific message for each.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix shared by every file this store owns.
const KEY_PREFIX: &str = "fuel_tracker";

/// Bumped whenever the persisted record shapes change incompatibly.
const DATA_VERSION: u32 = 2;

/// Storage failure classes. Each variant maps to its own user-visible
/// message key; callers must treat any error as "the mutation did not
/// take effect".
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data directory cannot be created or written at all.
    #[error("local storage is unavailable: {0}")]
    Unavailable(String),

    /// The disk (or quota) is full.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The value could not be serialized to JSON.
    #[error("failed to serialize value for key '{key}'")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any other write error.
    #[error("storage write failed for key '{key}'")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Translation-catalog key for the user-visible message.
    pub fn message_key(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "error.storage_unavailable",
            StoreError::QuotaExceeded => "error.storage_quota",
            StoreError::Serialize { .. } | StoreError::Io { .. } => "error.storage_write",
        }
    }
}

// ENOSPC and EDQUOT land in the quota bucket; everything else stays an
// ordinary write error.
fn classify_io(key: &str, source: io::Error) -> StoreError {
    match source.raw_os_error() {
        Some(28) | Some(122) => StoreError::QuotaExceeded,
        _ => StoreError::Io {
            key: key.to_string(),
            source,
        },
    }
}

/// File-backed JSON key-value store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// Runs the capability probe (write + delete a sentinel file) before
    /// reporting success, so callers learn up front that storage is
    /// unavailable instead of failing on the first real write.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let store = Self { root };
        store.probe()?;
        debug!("opened json store at {}", store.root.display());
        Ok(store)
    }

    fn probe(&self) -> Result<(), StoreError> {
        let sentinel = self.root.join(format!("{}_probe.tmp", KEY_PREFIX));
        fs::write(&sentinel, b"ok").map_err(|e| StoreError::Unavailable(e.to_string()))?;
        fs::remove_file(&sentinel).map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Base directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}_{}_v{}.json", KEY_PREFIX, key, DATA_VERSION))
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// A missing file returns `default`. A malformed file also returns
    /// `default`: the stored value is discarded and a warning logged, never
    /// an error surfaced to the user.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return default,
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("discarding corrupt value for key '{}': {}", key, e);
                default
            }
        }
    }

    /// Serialize `value` and write it under `key`.
    ///
    /// Uses the atomic write pattern: write to a temp file, then rename.
    /// There is no retry; on error the previous value (if any) is still in
    /// place and the caller must not assume the mutation took effect.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json).map_err(|e| classify_io(key, e))?;
        fs::rename(&temp_path, &path).map_err(|e| classify_io(key, e))?;

        debug!("wrote key '{}' to {}", key, path.display());
        Ok(())
    }

    /// Delete the value stored under `key`. Deleting an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(classify_io(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_store() -> (JsonStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn missing_key_returns_default() {
        let (store, _dir) = setup_store();
        let value: Vec<String> = store.get("nothing", Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn set_then_get_round_trips() {
        let (store, _dir) = setup_store();
        store.set("names", &vec!["a".to_string(), "b".to_string()]).unwrap();
        let value: Vec<String> = store.get("names", Vec::new());
        assert_eq!(value, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn corrupt_file_is_discarded_and_default_returned() {
        let (store, dir) = setup_store();
        store.set("numbers", &vec![1, 2, 3]).unwrap();

        // Clobber the file with something that is not JSON
        let path = dir
            .path()
            .join(format!("{}_numbers_v{}.json", KEY_PREFIX, DATA_VERSION));
        fs::write(&path, "{not json at all").unwrap();

        let value: Vec<i32> = store.get("numbers", vec![9]);
        assert_eq!(value, vec![9]);
    }

    #[test]
    fn file_names_carry_prefix_and_version() {
        let (store, dir) = setup_store();
        store.set("settings", &42).unwrap();
        assert!(dir
            .path()
            .join(format!("{}_settings_v{}.json", KEY_PREFIX, DATA_VERSION))
            .exists());
    }

    #[test]
    fn remove_is_idempotent() {
        let (store, _dir) = setup_store();
        store.set("gone", &1).unwrap();
        store.remove("gone").unwrap();
        store.remove("gone").unwrap();
        let value: i32 = store.get("gone", 0);
        assert_eq!(value, 0);
    }

    #[test]
    fn open_fails_when_directory_cannot_be_created() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let result = JsonStore::open(blocker.join("sub"));
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn write_survives_reload() {
        let dir = tempdir().unwrap();
        {
            let store = JsonStore::open(dir.path()).unwrap();
            store.set("persisted", &"hello".to_string()).unwrap();
        }
        let store = JsonStore::open(dir.path()).unwrap();
        let value: String = store.get("persisted", String::new());
        assert_eq!(value, "hello");
    }
}
