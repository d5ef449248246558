//! Error types for userdesk.
//!
//! This module defines the centralized error type [`UserDeskError`] and a type alias
//! [`Result`] used throughout the crate. Variants split into two groups:
//!
//! - **Domain outcomes** (`DuplicateEmail`, `NotFound`, `IncompleteCredentials`) are
//!   absorbed by the application layer and turned into a notice or a silent no-op.
//! - **Infrastructure faults** (`Storage`, `Io`, `Config`, `Source`, `Worker`) are
//!   propagated to the host with `?`.

use thiserror::Error;

/// The main error type for userdesk operations.
///
/// # Examples
///
/// ```
/// use userdesk::UserDeskError;
///
/// let err = UserDeskError::DuplicateEmail("a@b.com".to_string());
/// assert!(err.is_domain());
/// assert_eq!(err.to_string(), "A user with email a@b.com already exists");
/// ```
#[derive(Debug, Error)]
pub enum UserDeskError {
    /// A create was rejected because another record already uses the email.
    ///
    /// Compared case-insensitively. The collection is left unchanged.
    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),

    /// No record with the given id exists in the collection.
    #[error("User not found: {0}")]
    NotFound(i64),

    /// Login was attempted with an empty email or password.
    #[error("Email and password are both required")]
    IncompleteCredentials,

    /// Key-value storage operation failed.
    ///
    /// Occurs when reading from or writing to the storage backend fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external user source could not be read or parsed.
    #[error("Source error: {0}")]
    Source(String),

    /// Communication with the seed worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// The global tracing subscriber could not be installed.
    #[error("Tracing error: {0}")]
    Tracing(String),
}

impl UserDeskError {
    /// Returns `true` for outcomes the application layer absorbs instead of propagating.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEmail(_) | Self::NotFound(_) | Self::IncompleteCredentials
        )
    }
}

/// A specialized `Result` type for userdesk operations.
pub type Result<T> = std::result::Result<T, UserDeskError>;
