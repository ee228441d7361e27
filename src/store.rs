//! Key-value persistence.
//!
//! Every persisted value is a JSON document under its own key. Loading is
//! forgiving: a missing, empty or malformed entry falls back to a default for
//! that key only. [`FileStore`] keeps one `<key>.json` file per key in a data
//! directory; [`MemoryStore`] keeps entries in memory for tests and dry runs.

use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persisted keys.
pub mod keys {
    /// Credit balance (integer).
    pub const BALANCE: &str = "lf_balance";
    /// Bet size (integer).
    pub const BET: &str = "lf_bet";
    /// Symbol table (list of symbols).
    pub const SYMBOLS: &str = "lf_symbols_v1";
    /// Mute flag (boolean).
    pub const MUTE: &str = "lf_mute";
    /// Sound style (string).
    pub const SOUND: &str = "lf_sound_style";

    /// Every key, in load order.
    pub const ALL: [&str; 5] = [BALANCE, BET, SYMBOLS, MUTE, SOUND];
}

/// Raw string key-value storage.
pub trait Store {
    /// Read the raw value for a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the raw value for a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load a JSON value, falling back to `fallback` on any problem.
///
/// Missing and empty entries fall back silently; unreadable or malformed
/// entries are logged at warn level.
pub fn load_or<T, S>(store: &S, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => return fallback,
        Err(e) => {
            warn!(key, error = %e, "cannot read stored value, using default");
            return fallback;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "malformed stored value, using default");
            fallback
        }
    }
}

/// Serialize a value to JSON and store it.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| StoreError::Encode {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, &json)?;
    debug!(key, bytes = json.len(), "saved");
    Ok(())
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store with one JSON file per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The backing directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Data directory name under the home directory.
const DATA_DIR_NAME: &str = ".lucky-frogs";

/// Path to the default data directory (`~/.lucky-frogs`).
///
/// # Errors
///
/// Returns [`StoreError::NoHomeDir`] if neither `HOME` nor `USERPROFILE` is set.
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| StoreError::NoHomeDir)?;
    Ok(Path::new(&home).join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_roundtrip() {
        let mut store = MemoryStore::new();
        save(&mut store, keys::BALANCE, &1234u64).unwrap();
        assert_eq!(load_or(&store, keys::BALANCE, 0u64), 1234);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_and_empty_fall_back() {
        let mut store = MemoryStore::new();
        assert!(load_or(&store, keys::MUTE, true));
        store.set(keys::MUTE, "").unwrap();
        assert!(load_or(&store, keys::MUTE, true));
    }

    #[test]
    fn test_malformed_falls_back() {
        let mut store = MemoryStore::new();
        store.set(keys::BET, "{not json").unwrap();
        assert_eq!(load_or(&store, keys::BET, 10u64), 10);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("data")).unwrap();
        save(&mut store, keys::SOUND, "edm").unwrap();
        assert_eq!(store.get(keys::SOUND).unwrap().as_deref(), Some("\"edm\""));
        assert!(dir.path().join("data").join("lf_sound_style.json").exists());

        store.remove(keys::SOUND).unwrap();
        store.remove(keys::SOUND).unwrap();
        assert_eq!(store.get(keys::SOUND).unwrap(), None);
    }
}
