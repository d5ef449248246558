//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O beyond the
//! injected preference store. Everything else it wants done is returned as an
//! [`Action`] for the host to carry out, in order.

use crate::session::ThemeMode;
use crate::worker::WorkerMessage;

/// Notice shown when a create is rejected for a duplicate email.
pub const DUPLICATE_EMAIL_NOTICE: &str = "A user with this email already exists.";

/// Commands for the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show a non-blocking acknowledgement to the user.
    Notify {
        message: String,
    },

    /// Hand a request to the seed worker.
    PostToWorker(WorkerMessage),

    /// Apply the theme to the presentation layer (e.g. a document-level class).
    ApplyTheme(ThemeMode),
}

impl Action {
    pub fn notify(message: impl Into<String>) -> Self {
        Self::Notify {
            message: message.into(),
        }
    }
}
