//! Presentation boundary.
//!
//! Rendering itself belongs to the host. This module defines the view model
//! the host renders from:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → host renderer
//! ```

pub mod viewmodel;

pub use viewmodel::{EmptyState, FormView, SearchBarInfo, StatsView, UIViewModel, UserRow};
