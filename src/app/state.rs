//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for one user-management screen.
//! It owns the collection, the two persisted preferences (with the store they
//! persist to), and the transient view parameters. Derived values (the visible
//! list, the statistics) are recomputed on demand from a state snapshot.
//!
//! # State Components
//!
//! - **Store**: the authoritative user collection and edit selection
//! - **Session / Theme**: persisted flags, written through `storage`
//! - **View parameters**: search term and sort order, never persisted
//! - **Seed state**: progress of the one-shot startup fetch

use super::modes::{FormMode, Screen, SeedState};
use crate::domain::error::Result;
use crate::domain::{User, UserDraft};
use crate::session::{SessionState, ThemeState};
use crate::storage::KeyValueStore;
use crate::store::{chart_panels, chart_series, compute_stats_with_window, project, SortOrder, UserStats, UserStore};
use crate::ui::viewmodel::{EmptyState, FormView, SearchBarInfo, StatsView, UIViewModel, UserRow};
use chrono::{DateTime, Duration, Utc};

/// Message shown when the visible list is empty.
const NO_USERS_MESSAGE: &str = "No users found.";

/// Central application state container.
pub struct AppState {
    pub store: UserStore,
    pub session: SessionState,
    pub theme: ThemeState,

    /// Case-insensitive name filter. Empty shows everyone.
    pub search_term: String,
    pub sort_order: SortOrder,

    pub seed_state: SeedState,
    /// Id of the latest seed request. Responses carrying any other id are stale.
    pub seed_request: u64,
    /// Maximum number of records kept from the seed source.
    pub seed_limit: usize,
    /// Width of the "recent users" statistics window.
    pub stats_window: Duration,

    pub(crate) storage: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("session", &self.session)
            .field("theme", &self.theme)
            .field("search_term", &self.search_term)
            .field("sort_order", &self.sort_order)
            .field("seed_state", &self.seed_state)
            .field("seed_request", &self.seed_request)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Creates a logged-out, light-themed state with an empty collection.
    ///
    /// Call [`AppState::restore`] to load the persisted flags.
    #[must_use]
    pub fn new(storage: Box<dyn KeyValueStore>, seed_limit: usize, stats_window: Duration) -> Self {
        Self {
            store: UserStore::new(),
            session: SessionState::default(),
            theme: ThemeState::default(),
            search_term: String::new(),
            sort_order: SortOrder::default(),
            seed_state: SeedState::default(),
            seed_request: 0,
            seed_limit,
            stats_window,
            storage,
        }
    }

    /// Reads the session and theme flags from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(&mut self) -> Result<()> {
        self.session.restore(self.storage.as_ref())?;
        self.theme.restore(self.storage.as_ref())?;
        Ok(())
    }

    /// Preference store the flags persist to.
    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        if self.session.is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::Login
        }
    }

    #[must_use]
    pub fn form_mode(&self) -> FormMode {
        self.store.editing().map_or(FormMode::Create, |u| FormMode::Edit(u.id))
    }

    /// Drops everything that belongs to a mounted dashboard.
    ///
    /// Used on logout: the collection and view parameters do not outlive the
    /// session, and the next login seeds again.
    pub fn reset_dashboard(&mut self) {
        self.store = UserStore::new();
        self.search_term.clear();
        self.sort_order = SortOrder::default();
        self.seed_state = SeedState::Idle;
    }

    /// The filtered and sorted list for the table.
    #[must_use]
    pub fn visible_users(&self) -> Vec<User> {
        project(self.store.users(), &self.search_term, self.sort_order)
    }

    /// Statistics over the whole collection as of `now`.
    #[must_use]
    pub fn stats(&self, now: DateTime<Utc>) -> UserStats {
        compute_stats_with_window(self.store.users(), now, self.stats_window)
    }

    /// Computes a renderable view model as of `now`.
    ///
    /// On the login screen the dashboard parts are empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use userdesk::app::{AppState, Screen};
    /// use userdesk::storage::MemoryStore;
    ///
    /// let state = AppState::new(Box::new(MemoryStore::default()), 5, chrono::Duration::days(7));
    /// let vm = state.compute_viewmodel(chrono::Utc::now());
    /// assert_eq!(vm.screen, Screen::Login);
    /// assert!(vm.rows.is_empty());
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, now: DateTime<Utc>) -> UIViewModel {
        let screen = self.screen();
        let theme = self.theme.mode();

        if screen == Screen::Login {
            return UIViewModel {
                screen,
                theme,
                form: None,
                rows: vec![],
                empty_state: None,
                search_bar: None,
                stats: None,
            };
        }

        let rows: Vec<UserRow> = self
            .visible_users()
            .into_iter()
            .map(|user| UserRow {
                is_editing: self.store.editing().is_some_and(|e| e.id == user.id),
                id: user.id,
                name: user.name,
                email: user.email,
                phone: user.phone,
            })
            .collect();

        let empty_state = rows.is_empty().then(|| EmptyState {
            message: NO_USERS_MESSAGE.to_string(),
        });

        let mode = self.form_mode();
        let form = FormView {
            title: mode.title().to_string(),
            submit_label: mode.submit_label().to_string(),
            values: self.store.editing().map_or_else(UserDraft::default, User::to_draft),
        };

        let stats = self.stats(now);

        UIViewModel {
            screen,
            theme,
            form: Some(form),
            rows,
            empty_state,
            search_bar: Some(SearchBarInfo {
                query: self.search_term.clone(),
                sort_order: self.sort_order,
            }),
            stats: Some(StatsView {
                stats,
                chart: chart_series(&stats),
                panels: chart_panels(),
            }),
        }
    }
}
