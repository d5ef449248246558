//! User domain model.
//!
//! A [`User`] is one row of the managed collection. A [`UserDraft`] holds the
//! field values typed into the create/edit form before the store assigns an id.

use serde::{Deserialize, Serialize};

/// A user record in the collection.
///
/// `id` is unique within the collection and never changes after creation.
/// Records created through the store carry a millisecond Unix timestamp as id;
/// seeded records keep whatever id the source supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl User {
    /// Builds a record from an id and a draft.
    #[must_use]
    pub fn from_draft(id: i64, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
        }
    }

    /// Returns `true` if `email` matches this record's email, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use userdesk::domain::{User, UserDraft};
    ///
    /// let user = User::from_draft(1, UserDraft::new("Amy", "A@B.com", "555"));
    /// assert!(user.has_email("a@b.com"));
    /// assert!(!user.has_email("b@b.com"));
    /// ```
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    /// Returns the editable fields of this record as a draft.
    ///
    /// Used to pre-fill the form when an edit starts.
    #[must_use]
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Field values for a new or edited record, prior to id assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}
