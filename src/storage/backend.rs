//! Key-value storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the durable
//! storage holding the session and theme flags. Session and theme state receive the
//! store as a parameter instead of reaching for a global, so tests can swap in
//! [`MemoryStore`](crate::storage::MemoryStore).
//!
//! # Design Philosophy
//!
//! Values are plain strings under fixed keys. Each key holds a single scalar, so
//! there are no transactions and no batch operations.

use crate::domain::error::Result;

/// Abstraction over durable string key-value storage.
///
/// # Implementations
///
/// - [`JsonKeyValueStore`](crate::storage::JsonKeyValueStore): JSON file with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process map, nothing persisted
///
/// # Examples
///
/// ```
/// use userdesk::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("theme", "dark")?;
/// assert_eq!(store.get("theme")?.as_deref(), Some("dark"));
/// store.remove("theme")?;
/// assert_eq!(store.get("theme")?, None);
/// # Ok::<(), userdesk::UserDeskError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;
}
