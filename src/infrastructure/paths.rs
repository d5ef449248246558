//! Filesystem locations for userdesk data.
//!
//! The data directory holds the preference file and the trace file. It is
//! resolved from the environment in this order:
//!
//! 1. `USERDESK_DATA_DIR`
//! 2. `$XDG_DATA_HOME/userdesk`
//! 3. `$HOME/.local/share/userdesk`
//! 4. `./.userdesk` when no home directory is known

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "USERDESK_DATA_DIR";

/// Returns the data directory for userdesk storage.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(|key| std::env::var(key).ok())
}

/// Resolves the data directory with `lookup` standing in for the environment.
fn resolve_data_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(dir) = non_empty(DATA_DIR_ENV) {
        return PathBuf::from(expand_tilde_with(&dir, non_empty("HOME").as_deref()));
    }
    if let Some(xdg) = non_empty("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("userdesk");
    }
    non_empty("HOME").map_or_else(
        || PathBuf::from(".userdesk"),
        |home| PathBuf::from(home).join(".local").join("share").join("userdesk"),
    )
}

/// Expands a leading `~` to the current user's home directory.
///
/// Paths without a leading tilde, or with no `HOME` set, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path == "~" => home.to_string(),
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        _ => path.to_string(),
    }
}
