//! Persisted per-browser preferences: the login gate and the theme.
//!
//! Both states are restored once at startup and written back on every change
//! through an injected [`KeyValueStore`](crate::storage::KeyValueStore).

pub mod auth;
pub mod theme;

pub use auth::{LoginOutcome, SessionState, SESSION_KEY};
pub use theme::{ThemeMode, ThemeState, THEME_KEY};
