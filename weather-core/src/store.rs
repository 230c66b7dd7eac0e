//! Local persistent key/value storage.
//!
//! [`KeyValueStorage`] is the raw string store (one value per key).
//! [`LocalStore`] sits on top of it, speaks JSON, and never lets a failure
//! escape: problems are reported through the [`Notifier`] and degrade to
//! "no data".

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

use crate::notify::Notifier;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not serialize value: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("stored value is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("storage unavailable")]
    Unavailable,
}

pub trait KeyValueStorage: Send + Sync + Debug {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform data directory.
    pub fn default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self::new(dirs.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use parking_lot::Mutex;
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicBool, Ordering},
    };

    use super::{KeyValueStorage, StoreError};

    /// In-process storage. Can be switched into a failing mode to simulate a
    /// full or unavailable store.
    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        items: Mutex<HashMap<String, String>>,
        failing: AtomicBool,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Raw stored text, bypassing the failure switch.
        pub fn raw(&self, key: &str) -> Option<String> {
            self.items.lock().get(key).cloned()
        }

        pub fn insert_raw(&self, key: &str, value: &str) {
            self.items.lock().insert(key.to_string(), value.to_string());
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable);
            }
            Ok(self.raw(key))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable);
            }
            self.insert_raw(key, value);
            Ok(())
        }
    }
}

/// Outcome of [`LocalStore::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum Stored<T> {
    Found(T),
    /// Nothing stored, or an empty string.
    Missing,
    /// Storage failed or held corrupt JSON. Already reported to the user.
    Failed,
}

impl<T> Stored<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Stored::Found(value) => Some(value),
            Stored::Missing | Stored::Failed => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: Arc<dyn KeyValueStorage>,
    notifier: Arc<dyn Notifier>,
}

impl LocalStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, notifier: Arc<dyn Notifier>) -> Self {
        Self { storage, notifier }
    }

    /// Serialize `value` as JSON under `key`. Returns `false` if nothing was
    /// written; the user has been notified in that case.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StoreError::Serialize)
            .and_then(|json| self.storage.set_item(key, &json));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to save data");
                self.notifier.error(&format!("Error saving data for {key}"));
                false
            }
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Stored<T> {
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Stored::Missing,
            Err(e) => return self.read_failed(key, e),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Stored::Found(value),
            Err(e) => self.read_failed(key, StoreError::Parse(e)),
        }
    }

    fn read_failed<T>(&self, key: &str, error: StoreError) -> Stored<T> {
        tracing::warn!(key, %error, "failed to read data");
        self.notifier.error(&format!("Error getting data for {key}"));
        Stored::Failed
    }
}
