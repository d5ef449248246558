//! Event handling and state transition logic.
//!
//! [`handle_event`] is the one place state changes. Each call runs to
//! completion synchronously; there are no concurrent mutations.
//!
//! # Event Types
//!
//! - **Session**: `Login`, `Logout`
//! - **Presentation**: `ToggleTheme`, `SetSearchTerm`, `SetSortOrder`
//! - **Collection**: `SubmitForm`, `EditUser`, `CancelEdit`, `DeleteUser`
//! - **Worker**: `WorkerResponse` carrying the seed fetch result
//!
//! While logged out only `Login` and `WorkerResponse` are handled; every other
//! event is ignored.
//!
//! # Failure Handling
//!
//! Domain failures never leave this module as errors. A duplicate email
//! becomes an [`Action::Notify`]; a missing update target and incomplete
//! credentials are dropped silently. Only preference-store faults propagate.

use super::actions::DUPLICATE_EMAIL_NOTICE;
use super::modes::{Screen, SeedState};
use crate::app::{Action, AppState};
use crate::domain::error::{Result, UserDeskError};
use crate::domain::{User, UserDraft};
use crate::session::LoginOutcome;
use crate::store::{Prompt, SortOrder};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Inputs from the user or the seed worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Login form submitted.
    Login { email: String, password: String },
    Logout,
    ToggleTheme,
    /// Search box contents changed.
    SetSearchTerm(String),
    SetSortOrder(SortOrder),
    /// User form submitted; creates or updates depending on the edit selection.
    SubmitForm(UserDraft),
    /// Load the record with `id` into the form.
    EditUser { id: i64 },
    CancelEdit,
    /// Delete button pressed; confirmation is asked before anything changes.
    DeleteUser { id: i64 },
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns `(needs_render, actions)`.
///
/// `prompt` answers the blocking delete confirmation.
///
/// # Errors
///
/// Returns an error only if the preference store fails while persisting the
/// session or theme flag.
///
/// # Example
///
/// ```rust
/// use userdesk::app::{handle_event, Action, AppState, Event};
/// use userdesk::storage::MemoryStore;
/// use userdesk::store::FixedAnswer;
///
/// let mut state = AppState::new(Box::new(MemoryStore::default()), 5, chrono::Duration::days(7));
/// let (render, actions) = handle_event(
///     &mut state,
///     &Event::Login { email: "admin@mail.com".into(), password: "pw".into() },
///     &mut FixedAnswer(true),
/// )?;
/// assert!(render);
/// assert!(matches!(actions[0], Action::PostToWorker(_)));
/// # Ok::<(), userdesk::UserDeskError>(())
/// ```
pub fn handle_event(
    state: &mut AppState,
    event: &Event,
    prompt: &mut dyn Prompt,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.screen() == Screen::Login
        && !matches!(event, Event::Login { .. } | Event::WorkerResponse(_))
    {
        tracing::debug!("ignored while logged out");
        return Ok((false, vec![]));
    }

    match event {
        Event::Login { email, password } => {
            if state.session.is_authenticated() {
                return Ok((false, vec![]));
            }

            match state.session.login(state.storage.as_mut(), email, password)? {
                LoginOutcome::LoggedIn => Ok((true, request_seed(state))),
                LoginOutcome::IncompleteCredentials => Ok((false, vec![])),
            }
        }
        Event::Logout => {
            state.session.logout(state.storage.as_mut())?;
            state.reset_dashboard();
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            let mode = state.theme.toggle(state.storage.as_mut())?;
            Ok((true, vec![Action::ApplyTheme(mode)]))
        }
        Event::SetSearchTerm(term) => {
            if &state.search_term == term {
                return Ok((false, vec![]));
            }
            state.search_term.clone_from(term);
            tracing::trace!(term = %term, "search term updated");
            Ok((true, vec![]))
        }
        Event::SetSortOrder(order) => {
            if state.sort_order == *order {
                return Ok((false, vec![]));
            }
            state.sort_order = *order;
            Ok((true, vec![]))
        }
        Event::SubmitForm(draft) => Ok(submit_form(state, draft.clone())),
        Event::EditUser { id } => {
            let found = state.store.start_edit(*id).is_some();
            if !found {
                tracing::debug!(user_id = id, "edit target not found");
            }
            Ok((found, vec![]))
        }
        Event::CancelEdit => {
            let was_editing = state.store.editing().is_some();
            state.store.cancel_edit();
            Ok((was_editing, vec![]))
        }
        Event::DeleteUser { id } => {
            let removed = state.store.delete(*id, prompt);
            Ok((removed, vec![]))
        }
        Event::WorkerResponse(response) => Ok(apply_worker_response(state, response)),
    }
}

/// Posts the seed fetch unless one was already requested for this dashboard.
pub(crate) fn request_seed(state: &mut AppState) -> Vec<Action> {
    if state.seed_state != SeedState::Idle {
        return vec![];
    }
    state.seed_state = SeedState::Requested;
    state.seed_request = state.seed_request.wrapping_add(1);
    tracing::debug!(limit = state.seed_limit, request_id = state.seed_request, "requesting seed");
    vec![Action::PostToWorker(WorkerMessage::fetch_users(
        state.seed_limit,
        state.seed_request,
    ))]
}

/// Creates, or updates the record under edit.
fn submit_form(state: &mut AppState, draft: UserDraft) -> (bool, Vec<Action>) {
    if let Some(id) = state.store.editing().map(|u| u.id) {
        return match state.store.update(User::from_draft(id, draft)) {
            Ok(()) => (true, vec![]),
            Err(e) => {
                tracing::debug!(error = %e, "update dropped");
                (false, vec![])
            }
        };
    }

    match state.store.create(draft) {
        Ok(user) => {
            tracing::debug!(user_id = user.id, "user added");
            (true, vec![])
        }
        Err(UserDeskError::DuplicateEmail(email)) => {
            tracing::debug!(email = %email, "duplicate email");
            (false, vec![Action::notify(DUPLICATE_EMAIL_NOTICE)])
        }
        Err(e) => {
            tracing::debug!(error = %e, "create dropped");
            (false, vec![])
        }
    }
}

fn apply_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    if state.seed_state != SeedState::Requested {
        tracing::debug!(seed_state = ?state.seed_state, "unexpected worker response ignored");
        return (false, vec![]);
    }
    if response.request_id() != state.seed_request {
        tracing::debug!(
            request_id = response.request_id(),
            expected = state.seed_request,
            "stale worker response ignored"
        );
        return (false, vec![]);
    }
    state.seed_state = SeedState::Done;

    match response {
        WorkerResponse::UsersFetched { users, .. } => {
            let mut records = users.clone();
            records.truncate(state.seed_limit);
            state.store.seed(records);
            (true, vec![])
        }
        WorkerResponse::Error { message, .. } => {
            tracing::error!(error = %message, "seed fetch failed, collection stays empty");
            (false, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ThemeMode, SESSION_KEY, THEME_KEY};
    use crate::storage::MemoryStore;
    use crate::store::FixedAnswer;
    use chrono::Duration;

    fn state() -> AppState {
        AppState::new(Box::new(MemoryStore::default()), 5, Duration::days(7))
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event, &mut FixedAnswer(true)).unwrap()
    }

    fn login(state: &mut AppState) -> Vec<Action> {
        send(
            state,
            Event::Login {
                email: "admin@mail.com".to_string(),
                password: "secret".to_string(),
            },
        )
        .1
    }

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: String::new(),
        }
    }

    fn fetched(state: &AppState, users: Vec<User>) -> Event {
        Event::WorkerResponse(WorkerResponse::UsersFetched {
            request_id: state.seed_request,
            users,
        })
    }

    fn logged_in_with(users: Vec<User>) -> AppState {
        let mut state = state();
        login(&mut state);
        let event = fetched(&state, users);
        send(&mut state, event);
        state
    }

    #[test]
    fn logged_out_ignores_everything_but_login() {
        let mut state = state();

        let (render, actions) = send(&mut state, Event::ToggleTheme);
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.storage().get(THEME_KEY).unwrap(), None);

        send(&mut state, Event::SubmitForm(UserDraft::new("A", "a@x", "")));
        assert!(state.store.is_empty());
    }

    #[test]
    fn login_persists_flag_and_requests_seed_once() {
        let mut state = state();

        let actions = login(&mut state);
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            &actions[0],
            Action::PostToWorker(WorkerMessage::FetchUsers { limit: 5, .. })
        ));
        assert_eq!(state.storage().get(SESSION_KEY).unwrap().as_deref(), Some("true"));

        assert!(login(&mut state).is_empty());
    }

    #[test]
    fn incomplete_login_is_silent() {
        let mut state = state();
        let (render, actions) = send(
            &mut state,
            Event::Login {
                email: "admin@mail.com".to_string(),
                password: String::new(),
            },
        );
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.screen(), Screen::Login);
    }

    #[test]
    fn seed_is_truncated_and_applied_once() {
        let users: Vec<User> = (1..=10).map(|i| user(i, &format!("User{i}"))).collect();
        let mut state = logged_in_with(users);
        assert_eq!(state.store.len(), 5);

        let late = fetched(&state, vec![user(99, "Late")]);
        let (render, _) = send(&mut state, late);
        assert!(!render);
        assert_eq!(state.store.len(), 5);
    }

    #[test]
    fn failed_seed_leaves_collection_empty() {
        let mut state = state();
        login(&mut state);

        let (render, actions) = send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Error {
                request_id: 1,
                message: "offline".to_string(),
            }),
        );

        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.store.is_empty());
        assert_eq!(state.seed_state, SeedState::Done);
    }

    #[test]
    fn duplicate_email_notifies_and_changes_nothing() {
        let mut state = logged_in_with(vec![User {
            id: 1,
            name: "Amy".to_string(),
            email: "A@B.com".to_string(),
            phone: String::new(),
        }]);

        let (render, actions) = send(&mut state, Event::SubmitForm(UserDraft::new("X", "a@b.com", "1")));

        assert!(!render);
        assert_eq!(actions, vec![Action::notify(DUPLICATE_EMAIL_NOTICE)]);
        assert_eq!(state.store.len(), 1);
    }

    #[test]
    fn submit_creates_or_updates_depending_on_selection() {
        let mut state = logged_in_with(vec![user(1, "Bob"), user(2, "Amy")]);

        send(&mut state, Event::SubmitForm(UserDraft::new("Cara", "cara@example.com", "9")));
        assert_eq!(state.store.len(), 3);
        assert_eq!(state.store.users()[0].name, "Cara");

        send(&mut state, Event::EditUser { id: 2 });
        send(&mut state, Event::SubmitForm(UserDraft::new("Amelia", "amy@example.com", "7")));

        assert_eq!(state.store.len(), 3);
        assert_eq!(state.store.get(2).unwrap().name, "Amelia");
        assert!(state.store.editing().is_none());
    }

    #[test]
    fn declined_delete_keeps_the_record() {
        let mut state = logged_in_with(vec![user(1, "Bob")]);

        let (render, _) = handle_event(&mut state, &Event::DeleteUser { id: 1 }, &mut FixedAnswer(false)).unwrap();
        assert!(!render);
        assert_eq!(state.store.len(), 1);

        let (render, _) = send(&mut state, Event::DeleteUser { id: 1 });
        assert!(render);
        assert!(state.store.is_empty());
    }

    #[test]
    fn search_and_sort_drive_visible_users() {
        let mut state = logged_in_with(vec![user(1, "Amy"), user(2, "Bob"), user(3, "Pamela")]);

        send(&mut state, Event::SetSearchTerm("am".to_string()));
        send(&mut state, Event::SetSortOrder(SortOrder::Descending));

        let names: Vec<String> = state.visible_users().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Pamela", "Amy"]);

        let (render, _) = send(&mut state, Event::SetSortOrder(SortOrder::Descending));
        assert!(!render);
    }

    #[test]
    fn toggle_theme_persists_and_asks_host_to_apply() {
        let mut state = state();
        login(&mut state);

        let (_, actions) = send(&mut state, Event::ToggleTheme);

        assert_eq!(actions, vec![Action::ApplyTheme(ThemeMode::Dark)]);
        assert_eq!(state.storage().get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn logout_clears_flag_and_dashboard() {
        let mut state = logged_in_with(vec![user(1, "Bob")]);
        send(&mut state, Event::SetSearchTerm("b".to_string()));

        send(&mut state, Event::Logout);

        assert_eq!(state.screen(), Screen::Login);
        assert_eq!(state.storage().get(SESSION_KEY).unwrap(), None);
        assert!(state.store.is_empty());
        assert!(state.search_term.is_empty());
        assert_eq!(login(&mut state).len(), 1);
    }

    #[test]
    fn response_from_before_relogin_is_dropped() {
        let mut state = state();
        let first = login(&mut state);
        assert!(matches!(
            &first[0],
            Action::PostToWorker(WorkerMessage::FetchUsers { request_id: 1, .. })
        ));

        send(&mut state, Event::Logout);
        let second = login(&mut state);
        assert!(matches!(
            &second[0],
            Action::PostToWorker(WorkerMessage::FetchUsers { request_id: 2, .. })
        ));

        let (render, _) = send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::UsersFetched {
                request_id: 1,
                users: vec![user(1, "Stale")],
            }),
        );
        assert!(!render);
        assert!(state.store.is_empty());
        assert_eq!(state.seed_state, SeedState::Requested);

        let fresh = fetched(&state, vec![user(2, "Fresh")]);
        let (render, _) = send(&mut state, fresh);
        assert!(render);
        assert_eq!(state.store.users()[0].name, "Fresh");
        assert_eq!(state.seed_state, SeedState::Done);
    }
}
