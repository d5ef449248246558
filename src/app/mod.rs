//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the host (which renders and performs side effects)
//! and the engine layers (session, store, worker). Data flows one way:
//!
//! ```text
//! User Input → Event → handle_event → State Mutations → Actions → Host
//!                  ↑                                          ↓
//!                  └────────────── Worker Responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Screen, form and seed progress types
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, DUPLICATE_EMAIL_NOTICE};
pub use handler::{handle_event, Event};
pub use modes::{FormMode, Screen, SeedState};
pub use state::AppState;
