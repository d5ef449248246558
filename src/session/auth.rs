//! Login gate state.
//!
//! Any non-empty email/password pair logs in; nothing is checked against a
//! credential store. The flag is persisted so a reload keeps the user signed in.

use crate::domain::error::Result;
use crate::storage::KeyValueStore;

/// Storage key holding the login flag.
pub const SESSION_KEY: &str = "isLoggedIn";

/// Stored value meaning "logged in". Any other value, or no value, means logged out.
const LOGGED_IN: &str = "true";

/// Result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Both fields were filled in; the session is now authenticated.
    LoggedIn,
    /// One of the fields was empty; nothing changed.
    IncompleteCredentials,
}

/// Authentication state of the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    authenticated: bool,
}

impl SessionState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Restores the flag from `store`.
    ///
    /// Authenticated iff the stored value is exactly `"true"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(&mut self, store: &dyn KeyValueStore) -> Result<()> {
        let stored = store.get(SESSION_KEY)?;
        self.authenticated = stored.as_deref() == Some(LOGGED_IN);
        tracing::debug!(authenticated = self.authenticated, "session restored");
        Ok(())
    }

    /// Logs in when both `email` and `password` are non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be persisted.
    ///
    /// # Examples
    ///
    /// ```
    /// use userdesk::session::{LoginOutcome, SessionState};
    /// use userdesk::storage::MemoryStore;
    ///
    /// let mut store = MemoryStore::default();
    /// let mut session = SessionState::default();
    ///
    /// assert_eq!(session.login(&mut store, "admin@mail.com", "")?, LoginOutcome::IncompleteCredentials);
    /// assert!(!session.is_authenticated());
    ///
    /// assert_eq!(session.login(&mut store, "admin@mail.com", "pw")?, LoginOutcome::LoggedIn);
    /// assert!(session.is_authenticated());
    /// # Ok::<(), userdesk::UserDeskError>(())
    /// ```
    pub fn login(
        &mut self,
        store: &mut dyn KeyValueStore,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome> {
        if email.is_empty() || password.is_empty() {
            tracing::debug!("login ignored, incomplete credentials");
            return Ok(LoginOutcome::IncompleteCredentials);
        }

        store.set(SESSION_KEY, LOGGED_IN)?;
        self.authenticated = true;
        tracing::info!("user logged in");
        Ok(LoginOutcome::LoggedIn)
    }

    /// Logs out and removes the persisted flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be removed.
    pub fn logout(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.remove(SESSION_KEY)?;
        self.authenticated = false;
        tracing::info!("user logged out");
        Ok(())
    }
}
