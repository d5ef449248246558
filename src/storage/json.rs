//! JSON file-based key-value storage.
//!
//! Keeps every entry in memory and rewrites the whole file on change, using an
//! atomic write (write-to-temp + rename) so the file is never left half-written.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "isLoggedIn": "true",
//!     "theme": "dark"
//!   }
//! }
//! ```

use crate::domain::error::{Result, UserDeskError};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// This type is `Send` but not `Sync`; it is owned by the application state and
/// used from a single thread.
pub struct JsonKeyValueStore {
    file_path: PathBuf,
    data: StorageData,
    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonKeyValueStore {
    /// Creates or opens a JSON store at `file_path`.
    ///
    /// Loads existing entries if the file exists; parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use userdesk::storage::JsonKeyValueStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonKeyValueStore::new(PathBuf::from("/tmp/userdesk/preferences.json"))?;
    /// # Ok::<(), userdesk::UserDeskError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON key-value store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StorageData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| UserDeskError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > STORAGE_VERSION {
            return Err(UserDeskError::Storage(format!(
                "unsupported storage version {} (expected <= {STORAGE_VERSION})",
                data.version
            )));
        }

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Saves pending changes with an atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write or the rename fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| UserDeskError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.data.entries.get(key).cloned();
        tracing::trace!(key = key, found = value.is_some(), "json_get");
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = key, value = value).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            tracing::trace!("value unchanged");
            return Ok(());
        }

        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_remove", key = key).entered();

        if self.data.entries.remove(key).is_none() {
            tracing::trace!("key absent");
            return Ok(());
        }

        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonKeyValueStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
