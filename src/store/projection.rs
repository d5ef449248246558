//! Visible-list derivation: search filter plus name sort.
//!
//! [`project`] is a pure function of the collection and the two view
//! parameters. Callers invoke it again after every mutation or parameter change
//! instead of relying on any reactive re-evaluation.

use crate::domain::User;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Direction of the name sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// A to Z.
    #[default]
    Ascending,
    /// Z to A.
    Descending,
}

/// One collation element: a lowercased base letter, the accents that follow
/// it after canonical decomposition, and whether it was written uppercase.
struct Element {
    base: String,
    marks: Vec<char>,
    upper: bool,
}

fn elements(name: &str) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::with_capacity(name.len());
    for c in name.nfd() {
        match out.last_mut() {
            Some(last) if is_combining_mark(c) => last.marks.push(c),
            _ => out.push(Element {
                base: c.to_lowercase().collect(),
                marks: Vec::new(),
                upper: c.is_uppercase(),
            }),
        }
    }
    out
}

/// Compares two names the way a locale-aware UI collation does.
///
/// Three levels, each consulted only when the previous one ties:
///
/// 1. base letters, ignoring accents and case (`"Émile"` sorts with `"Emile"`);
/// 2. accents, unaccented first at the first position that differs;
/// 3. case, lowercase first at the first position that differs.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use userdesk::store::locale_cmp;
///
/// assert_eq!(locale_cmp("amy", "Bob"), Ordering::Less);
/// assert_eq!(locale_cmp("Émile", "Eve"), Ordering::Less);
/// assert_eq!(locale_cmp("Eve", "Ève"), Ordering::Less);
/// assert_eq!(locale_cmp("bob", "Bob"), Ordering::Less);
/// assert_eq!(locale_cmp("Bob", "Bob"), Ordering::Equal);
/// ```
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (elements(a), elements(b));

    let primary = a.iter().map(|e| e.base.as_str()).cmp(b.iter().map(|e| e.base.as_str()));
    let secondary = || a.iter().map(|e| &e.marks).cmp(b.iter().map(|e| &e.marks));
    let tertiary = || a.iter().map(|e| e.upper).cmp(b.iter().map(|e| e.upper));

    primary.then_with(secondary).then_with(tertiary)
}

/// Returns `true` if `name` contains `needle` ignoring case.
///
/// `needle` must already be lowercased.
fn name_matches(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

/// Filters `users` by `search_term` and sorts them by name.
///
/// An empty search term keeps every record. The sort is stable, so records
/// with equal names keep their relative collection order in both directions.
/// The input slice is never modified; an empty result is a valid outcome.
///
/// # Examples
///
/// ```
/// use userdesk::domain::User;
/// use userdesk::store::{project, SortOrder};
///
/// let users = vec![
///     User { id: 1, name: "Bob".into(), email: "bob@x".into(), phone: String::new() },
///     User { id: 2, name: "Amy".into(), email: "amy@x".into(), phone: String::new() },
/// ];
///
/// let names = |v: Vec<User>| v.into_iter().map(|u| u.name).collect::<Vec<_>>();
/// assert_eq!(names(project(&users, "", SortOrder::Ascending)), ["Amy", "Bob"]);
/// assert_eq!(names(project(&users, "", SortOrder::Descending)), ["Bob", "Amy"]);
/// ```
#[must_use]
pub fn project(users: &[User], search_term: &str, sort_order: SortOrder) -> Vec<User> {
    let _span = tracing::debug_span!("project_users",
        total = users.len(),
        term_len = search_term.len(),
        sort_order = ?sort_order
    )
    .entered();

    let needle = search_term.to_lowercase();

    let mut visible: Vec<User> = users
        .iter()
        .filter(|u| name_matches(&u.name, &needle))
        .cloned()
        .collect();

    match sort_order {
        SortOrder::Ascending => visible.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortOrder::Descending => visible.sort_by(|a, b| locale_cmp(&b.name, &a.name)),
    }

    tracing::debug!(visible = visible.len(), "projection computed");
    visible
}
