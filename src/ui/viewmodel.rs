//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and handed to
//! whatever renders the screen. They carry display-ready data only.

use crate::app::modes::Screen;
use crate::domain::UserDraft;
use crate::session::ThemeMode;
use crate::store::{ChartPanel, ChartSeries, SortOrder, UserStats};

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub screen: Screen,
    pub theme: ThemeMode,

    /// Create/edit form; `None` on the login screen.
    pub form: Option<FormView>,

    /// Table rows in display order.
    pub rows: Vec<UserRow>,

    /// Set when the dashboard table has no rows.
    pub empty_state: Option<EmptyState>,

    /// Search box and sort buttons; `None` on the login screen.
    pub search_bar: Option<SearchBarInfo>,

    /// Statistics panel; `None` on the login screen.
    pub stats: Option<StatsView>,
}

/// One row of the user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Whether this row is the one loaded into the form.
    pub is_editing: bool,
}

/// The create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// "Add User" or "Edit User".
    pub title: String,
    /// "Create User" or "Update User".
    pub submit_label: String,
    /// Pre-filled values; empty when creating.
    pub values: UserDraft,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Search bar and sort control state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub sort_order: SortOrder,
}

/// Statistics panel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub stats: UserStats,
    pub chart: ChartSeries,
    /// Charts to draw, each plotting `chart`.
    pub panels: Vec<ChartPanel>,
}
