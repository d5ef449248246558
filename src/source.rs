//! External user sources for the one-shot startup seed.
//!
//! The collection starts empty and is filled once from a [`UserSource`]. The
//! payload is an ordered JSON array of user-like objects; fields other than
//! `id`, `name`, `email` and `phone` are ignored.

use crate::domain::error::{Result, UserDeskError};
use crate::domain::User;
use std::path::PathBuf;

/// Number of records kept from the source when no limit is configured.
pub const DEFAULT_SEED_LIMIT: usize = 5;

/// A read-once provider of user records.
pub trait UserSource: Send {
    /// Fetches the full ordered list. Truncation is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`UserDeskError::Source`] or [`UserDeskError::Io`] if the
    /// records cannot be obtained or parsed.
    fn fetch(&self) -> Result<Vec<User>>;
}

/// Parses a JSON array of user objects.
///
/// # Errors
///
/// Returns [`UserDeskError::Source`] if the payload is not an array of objects
/// carrying integer `id` and string `name`/`email`.
///
/// # Examples
///
/// ```
/// use userdesk::source::parse_users;
///
/// let users = parse_users(r#"[{"id": 1, "name": "Leanne", "email": "l@x", "username": "Bret"}]"#)?;
/// assert_eq!(users[0].name, "Leanne");
/// # Ok::<(), userdesk::UserDeskError>(())
/// ```
pub fn parse_users(payload: &str) -> Result<Vec<User>> {
    serde_json::from_str(payload).map_err(|e| UserDeskError::Source(format!("invalid user payload: {e}")))
}

/// Reads users from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UserSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<User>> {
        let _span = tracing::debug_span!("json_file_fetch", path = ?self.path).entered();

        let contents = std::fs::read_to_string(&self.path)?;
        let users = parse_users(&contents)?;

        tracing::debug!(count = users.len(), "users read from file");
        Ok(users)
    }
}

/// Serves a fixed list of users.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    users: Vec<User>,
}

impl StaticSource {
    #[must_use]
    pub const fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl UserSource for StaticSource {
    fn fetch(&self) -> Result<Vec<User>> {
        Ok(self.users.clone())
    }
}
