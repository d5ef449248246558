//! Screen and form mode types.
//!
//! Both are derived from state rather than stored: the screen follows the
//! session flag, the form mode follows the store's edit selection.

/// Which screen the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Logged out: only the login form is shown and only login is handled.
    Login,
    /// Logged in: form, table and statistics.
    Dashboard,
}

/// What submitting the user form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Submitting creates a new record.
    Create,
    /// Submitting overwrites the record with this id.
    Edit(i64),
}

impl FormMode {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => "Add User",
            Self::Edit(_) => "Edit User",
        }
    }

    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Create User",
            Self::Edit(_) => "Update User",
        }
    }
}

/// Progress of the one-shot seed fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedState {
    /// No fetch requested yet.
    #[default]
    Idle,
    /// A fetch was posted to the worker and has not answered.
    Requested,
    /// A response arrived (successful or not); later responses are ignored.
    Done,
}
