//! Userdesk: a view-state engine for a small user-management dashboard.
//!
//! Userdesk keeps everything a dashboard needs between renders:
//! - A persisted login flag gating the dashboard
//! - A persisted light/dark theme preference
//! - An in-memory user collection with create, update, confirmed delete and edit selection
//! - A filtered, locale-aware sorted projection of that collection
//! - Summary statistics with a chart-ready series
//! - A one-shot background seed of the collection from an external source

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (renders view models, executes actions)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Session       │   │ Store         │   │ Worker        │
//! │ (session/)    │   │ (store/)      │   │ (worker/)     │
//! │ - Login flag  │   │ - Collection  │   │ - Seed fetch  │
//! │ - Theme flag  │   │ - Projection  │   │ - Trace ctx   │
//! │               │   │ - Statistics  │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                                        │
//! ┌───────────────┐                       ┌───────────────┐
//! │ Storage       │                       │ Source        │
//! │ - Key/value   │                       │ - JSON seed   │
//! └───────────────┘                       └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Initialization Flow
//!
//! 1. Build a [`Config`] (from a map, a TOML file or defaults).
//! 2. Open a [`storage::JsonKeyValueStore`] at [`Config::storage_file`].
//! 3. [`initialize`] restores the flags and yields the first actions; if the
//!    stored session is already logged in that includes the seed request.
//! 4. Spawn a seed worker, forward `PostToWorker` actions to it and feed its
//!    responses back as [`Event::WorkerResponse`].
//!
//! # Example
//!
//! ```rust
//! use userdesk::app::Screen;
//! use userdesk::storage::MemoryStore;
//! use userdesk::store::FixedAnswer;
//! use userdesk::{handle_event, initialize, Config, Event};
//!
//! let (mut state, actions) = initialize(&Config::default(), Box::new(MemoryStore::default()))?;
//! assert!(actions.is_empty());
//!
//! let login = Event::Login {
//!     email: "admin@mail.com".to_string(),
//!     password: "hunter2".to_string(),
//! };
//! let (_, actions) = handle_event(&mut state, &login, &mut FixedAnswer(true))?;
//!
//! assert_eq!(state.screen(), Screen::Dashboard);
//! assert_eq!(actions.len(), 1); // seed request
//! # Ok::<(), userdesk::UserDeskError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod session;
pub mod source;
pub mod storage;
pub mod store;
pub mod ui;
pub mod worker;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{Result, User, UserDeskError, UserDraft};
pub use session::ThemeMode;
pub use store::{SortOrder, UserStats};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the preference store inside the data directory.
const PREFERENCES_FILE: &str = "preferences.json";

/// Engine configuration.
///
/// Every field has a default, so a partial TOML file or map is enough:
///
/// ```toml
/// storage_path = "~/.config/userdesk/prefs.json"
/// seed_path = "/srv/seed/users.json"
/// seed_limit = 5
/// stats_window_days = 7
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit preference file. Default: `<data dir>/preferences.json`.
    pub storage_path: Option<PathBuf>,

    /// JSON file the startup seed is read from, if the host uses one.
    pub seed_path: Option<PathBuf>,

    /// Records kept from the seed source. Default: 5
    pub seed_limit: usize,

    /// Width of the "users added last week" window in days. Default: 7
    pub stats_window_days: i64,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            seed_path: None,
            seed_limit: source::DEFAULT_SEED_LIMIT,
            stats_window_days: store::DEFAULT_WINDOW_DAYS,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map, falling back to defaults.
    ///
    /// Unparsable or out-of-range numbers keep their default; paths are
    /// tilde-expanded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use userdesk::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("seed_limit".to_string(), "10".to_string());
    /// map.insert("stats_window_days".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.seed_limit, 10);
    /// assert_eq!(config.stats_window_days, 7);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| PathBuf::from(infrastructure::expand_tilde(s)))
        };

        Self {
            storage_path: path("storage_path"),
            seed_path: path("seed_path"),
            seed_limit: config
                .get("seed_limit")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.seed_limit),
            stats_window_days: config
                .get("stats_window_days")
                .and_then(|s| s.trim().parse().ok())
                .filter(valid_window_days)
                .unwrap_or(defaults.stats_window_days),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`UserDeskError::Io`] if the file cannot be read and
    /// [`UserDeskError::Config`] if it is not valid TOML for this shape or
    /// `stats_window_days` is outside `1..=36500`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| UserDeskError::Config(format!("{}: {e}", path.display())))?;

        if !valid_window_days(&config.stats_window_days) {
            return Err(UserDeskError::Config(format!(
                "{}: stats_window_days must be between 1 and {}, got {}",
                path.display(),
                store::MAX_WINDOW_DAYS,
                config.stats_window_days
            )));
        }

        config.storage_path = config.storage_path.map(expand_path);
        config.seed_path = config.seed_path.map(expand_path);
        Ok(config)
    }

    /// The preference file to open.
    #[must_use]
    pub fn storage_file(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| infrastructure::get_data_dir().join(PREFERENCES_FILE))
    }

    /// The statistics window as a duration.
    ///
    /// Falls back to the default window when `stats_window_days` is out of range.
    #[must_use]
    pub fn stats_window(&self) -> chrono::Duration {
        Some(self.stats_window_days)
            .filter(valid_window_days)
            .and_then(chrono::Duration::try_days)
            .unwrap_or_else(|| chrono::Duration::days(store::DEFAULT_WINDOW_DAYS))
    }
}

fn valid_window_days(days: &i64) -> bool {
    (1..=store::MAX_WINDOW_DAYS).contains(days)
}

fn expand_path(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(infrastructure::expand_tilde(s)),
        None => path,
    }
}

/// Builds the application state from configuration and a preference store.
///
/// Restores the login and theme flags and starts with an empty collection.
/// The returned actions hold the seed request when the restored session is
/// already authenticated; otherwise the request follows the first login.
///
/// # Errors
///
/// Returns an error if the preference store cannot be read.
pub fn initialize(config: &Config, storage: Box<dyn storage::KeyValueStore>) -> Result<(AppState, Vec<Action>)> {
    let _span = tracing::debug_span!("initialize", seed_limit = config.seed_limit).entered();

    let mut state = AppState::new(storage, config.seed_limit, config.stats_window());
    state.restore()?;

    let actions = if state.session.is_authenticated() {
        app::handler::request_seed(&mut state)
    } else {
        vec![]
    };

    tracing::debug!(
        authenticated = state.session.is_authenticated(),
        theme = state.theme.mode().as_str(),
        "userdesk initialized"
    );
    Ok((state, actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SESSION_KEY, THEME_KEY};
    use crate::storage::MemoryStore;
    use crate::worker::WorkerMessage;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn from_map_uses_defaults_for_missing_and_bad_values() {
        let mut map = BTreeMap::new();
        map.insert("seed_limit".to_string(), "many".to_string());
        map.insert("stats_window_days".to_string(), "0".to_string());
        map.insert("storage_path".to_string(), "   ".to_string());

        assert_eq!(Config::from_map(&map), Config::default());
    }

    #[test]
    fn from_map_reads_every_field() {
        let map: BTreeMap<String, String> = [
            ("storage_path", "/tmp/prefs.json"),
            ("seed_path", "/tmp/users.json"),
            ("seed_limit", " 3 "),
            ("stats_window_days", "30"),
            ("trace_level", "debug"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);

        assert_eq!(config.storage_file(), PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/users.json")));
        assert_eq!(config.seed_limit, 3);
        assert_eq!(config.stats_window(), chrono::Duration::days(30));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn from_file_accepts_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_limit = 2\ntrace_level = \"warn\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.seed_limit, 2);
        assert_eq!(config.stats_window_days, 7);
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("100000000")]
    #[case("9000000000000000")]
    fn from_map_falls_back_on_out_of_range_window(#[case] days: &str) {
        let mut map = BTreeMap::new();
        map.insert("stats_window_days".to_string(), days.to_string());

        let config = Config::from_map(&map);

        assert_eq!(config.stats_window_days, store::DEFAULT_WINDOW_DAYS);
    }

    #[rstest]
    #[case(-3)]
    #[case(0)]
    #[case(100_000_000)]
    #[case(9_000_000_000_000_000)]
    fn from_file_rejects_out_of_range_window(#[case] days: i64) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stats_window_days = {days}").unwrap();

        assert!(matches!(Config::from_file(file.path()), Err(UserDeskError::Config(_))));
    }

    #[test]
    fn hand_built_config_with_huge_window_still_initializes() {
        let config = Config {
            stats_window_days: 9_000_000_000_000_000,
            ..Config::default()
        };
        assert_eq!(config.stats_window(), chrono::Duration::days(7));

        let (state, _) = initialize(&config, Box::new(MemoryStore::default())).unwrap();
        assert_eq!(state.stats(chrono::Utc::now()).total_users, 0);
    }

    #[test]
    fn from_file_rejects_wrong_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed_limit = \"five\"").unwrap();

        assert!(matches!(Config::from_file(file.path()), Err(UserDeskError::Config(_))));
    }

    #[test]
    fn initialize_logged_out_waits_for_login() {
        let (state, actions) = initialize(&Config::default(), Box::new(MemoryStore::default())).unwrap();

        assert!(!state.session.is_authenticated());
        assert!(state.store.is_empty());
        assert!(actions.is_empty());
    }

    #[test]
    fn initialize_restores_flags_and_requests_seed() {
        let storage = MemoryStore::with_entries([(SESSION_KEY, "true"), (THEME_KEY, "dark")]);
        let config = Config {
            seed_limit: 3,
            ..Config::default()
        };

        let (state, actions) = initialize(&config, Box::new(storage)).unwrap();

        assert!(state.session.is_authenticated());
        assert!(state.theme.is_dark());
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::FetchUsers { limit: 3, .. })]
        ));
    }
}
