//! Light/dark theme preference.
//!
//! Only the preference lives here. Applying it (a document-level class, a
//! palette) is left to the host, which receives an
//! [`Action::ApplyTheme`](crate::app::Action::ApplyTheme) after every change.

use crate::domain::error::Result;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};

/// Storage key holding the theme flag.
pub const THEME_KEY: &str = "theme";

/// Presentation theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Value persisted for this mode; doubles as the presentation class name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Theme preference of the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    mode: ThemeMode,
}

impl ThemeState {
    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Restores the preference from `store`.
    ///
    /// Dark iff the stored value is exactly `"dark"`; anything else is light.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(&mut self, store: &dyn KeyValueStore) -> Result<()> {
        let stored = store.get(THEME_KEY)?;
        self.mode = if stored.as_deref() == Some(ThemeMode::Dark.as_str()) {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        };
        tracing::debug!(theme = self.mode.as_str(), "theme restored");
        Ok(())
    }

    /// Flips between light and dark and persists the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be persisted. The in-memory
    /// mode is left unchanged in that case.
    pub fn toggle(&mut self, store: &mut dyn KeyValueStore) -> Result<ThemeMode> {
        let next = self.mode.toggled();
        store.set(THEME_KEY, next.as_str())?;
        self.mode = next;
        tracing::debug!(theme = next.as_str(), "theme toggled");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rstest::rstest;

    #[rstest]
    #[case(Some("dark"), ThemeMode::Dark)]
    #[case(Some("light"), ThemeMode::Light)]
    #[case(Some("Dark"), ThemeMode::Light)]
    #[case(None, ThemeMode::Light)]
    fn restore_reads_the_flag(#[case] stored: Option<&str>, #[case] expected: ThemeMode) {
        let store = stored.map_or_else(MemoryStore::default, |v| {
            MemoryStore::with_entries([(THEME_KEY, v)])
        });
        let mut theme = ThemeState::default();
        theme.restore(&store).unwrap();
        assert_eq!(theme.mode(), expected);
    }

    #[test]
    fn toggle_persists_each_flip() {
        let mut store = MemoryStore::default();
        let mut theme = ThemeState::default();

        assert_eq!(theme.toggle(&mut store).unwrap(), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert!(theme.is_dark());

        assert_eq!(theme.toggle(&mut store).unwrap(), ThemeMode::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }
}
