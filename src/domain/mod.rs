//! Domain layer for userdesk.
//!
//! Core types independent of storage, worker or presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`user`]: User record and draft types
//!
//! # Examples
//!
//! ```
//! use userdesk::domain::{Result, User, UserDraft};
//!
//! fn build() -> Result<User> {
//!     Ok(User::from_draft(1, UserDraft::new("Amy", "amy@example.com", "555-0100")))
//! }
//! ```

pub mod error;
pub mod user;

pub use error::{Result, UserDeskError};
pub use user::{User, UserDraft};
