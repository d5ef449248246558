//! The authoritative in-memory user collection.
//!
//! [`UserStore`] owns the ordered list of records and is the only place the list
//! is mutated. Creation enforces email uniqueness; update and delete address
//! records by id. The store also tracks which record, if any, the form is editing.

use crate::domain::error::{Result, UserDeskError};
use crate::domain::{User, UserDraft};
use chrono::{DateTime, Utc};

/// Message shown before a delete is carried out.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this user?";

/// Blocking yes/no interaction with the person at the keyboard.
pub trait Prompt {
    /// Asks `message` and returns `true` if the answer was yes.
    fn confirm(&mut self, message: &str) -> bool;
}

/// A prompt that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl Prompt for FixedAnswer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// Insertion-ordered user collection, unique by id.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Vec<User>,
    /// Id of the record being edited, if any.
    editing: Option<i64>,
    /// Highest id handed out by [`UserStore::create`].
    last_issued: i64,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Replaces the collection with `records`, preserving their order.
    ///
    /// Records repeating an earlier id are dropped so the collection stays
    /// unique by id. Any edit in progress is cancelled.
    pub fn seed(&mut self, records: Vec<User>) {
        let mut seen = std::collections::HashSet::with_capacity(records.len());
        let incoming = records.len();

        self.users = records.into_iter().filter(|u| seen.insert(u.id)).collect();
        self.editing = None;

        tracing::debug!(
            incoming = incoming,
            seeded = self.users.len(),
            "collection seeded"
        );
    }

    /// Creates a record from `draft`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`UserDeskError::DuplicateEmail`] when another record already uses
    /// the email (ignoring case). The collection is left unchanged.
    pub fn create(&mut self, draft: UserDraft) -> Result<User> {
        self.create_at(draft, Utc::now())
    }

    /// Creates a record from `draft`, deriving its id from `now`.
    ///
    /// The new record is prepended so the newest entry comes first.
    ///
    /// # Errors
    ///
    /// Returns [`UserDeskError::DuplicateEmail`] when another record already uses
    /// the email (ignoring case).
    ///
    /// # Examples
    ///
    /// ```
    /// use userdesk::domain::UserDraft;
    /// use userdesk::store::UserStore;
    ///
    /// let mut store = UserStore::new();
    /// store.create(UserDraft::new("Amy", "A@B.com", "1"))?;
    ///
    /// let dup = store.create(UserDraft::new("X", "a@b.com", "2"));
    /// assert!(matches!(dup, Err(userdesk::UserDeskError::DuplicateEmail(_))));
    /// assert_eq!(store.len(), 1);
    /// # Ok::<(), userdesk::UserDeskError>(())
    /// ```
    pub fn create_at(&mut self, draft: UserDraft, now: DateTime<Utc>) -> Result<User> {
        let _span = tracing::debug_span!("create_user", email = %draft.email).entered();

        if self.users.iter().any(|u| u.has_email(&draft.email)) {
            tracing::debug!("rejected, email already in use");
            return Err(UserDeskError::DuplicateEmail(draft.email));
        }

        let id = self.next_id(now.timestamp_millis());
        let user = User::from_draft(id, draft);
        self.users.insert(0, user.clone());

        tracing::debug!(user_id = id, total = self.users.len(), "user created");
        Ok(user)
    }

    /// Replaces the fields of the record with `record.id`, keeping its position.
    ///
    /// Email uniqueness is not re-checked. A successful update ends any edit
    /// in progress.
    ///
    /// # Errors
    ///
    /// Returns [`UserDeskError::NotFound`] if no record has `record.id`.
    pub fn update(&mut self, record: User) -> Result<()> {
        let _span = tracing::debug_span!("update_user", user_id = record.id).entered();

        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id == record.id)
            .ok_or(UserDeskError::NotFound(record.id))?;

        *slot = record;
        self.editing = None;

        tracing::debug!("user updated");
        Ok(())
    }

    /// Removes the record with `id` once `prompt` confirms.
    ///
    /// Returns `true` if a record was removed. Declining, or naming an id that
    /// is not in the collection, leaves everything unchanged.
    pub fn delete(&mut self, id: i64, prompt: &mut dyn Prompt) -> bool {
        let _span = tracing::debug_span!("delete_user", user_id = id).entered();

        if !prompt.confirm(DELETE_CONFIRMATION) {
            tracing::debug!("delete declined");
            return false;
        }

        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        let removed = self.users.len() < before;

        if removed && self.editing == Some(id) {
            self.editing = None;
        }

        tracing::debug!(removed = removed, total = self.users.len(), "delete handled");
        removed
    }

    /// Marks the record with `id` as being edited, replacing any earlier selection.
    ///
    /// Returns the record to pre-fill the form with, or `None` (and no change)
    /// if the id is unknown.
    pub fn start_edit(&mut self, id: i64) -> Option<&User> {
        let user = self.users.iter().find(|u| u.id == id)?;
        self.editing = Some(id);
        tracing::debug!(user_id = id, "edit started");
        Some(user)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// The record currently being edited.
    #[must_use]
    pub fn editing(&self) -> Option<&User> {
        self.editing.and_then(|id| self.get(id))
    }

    /// Next id: `now_ms`, or one past the last issued id if the clock has not
    /// moved, skipping any id already present.
    fn next_id(&mut self, now_ms: i64) -> i64 {
        let mut id = now_ms.max(self.last_issued.saturating_add(1));
        while self.users.iter().any(|u| u.id == id) {
            id = id.saturating_add(1);
        }
        self.last_issued = id;
        id
    }
}
