// SPDX-License-Identifier: MIT
//
// The persisted state file.
//
// One JSON document holds everything that survives a restart: the
// visited flag, the theme name, and the favorites array. Loading is
// forgiving — a missing file means first run, a corrupt file is logged
// and replaced by defaults. Saving is best-effort: the session logs a
// failure and carries on, it never blocks an interactive operation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gradient::Gradient;
use crate::theme::Theme;

/// Failure writing the state file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O: {0}")]
    Io(#[from] io::Error),

    #[error("state encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything that persists across sessions.
///
/// Field names match the keys earlier iterations stored, so existing
/// state files load unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(rename = "hasVisitedBefore", default)]
    pub has_visited_before: bool,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub favorites: Vec<Gradient>,
}

/// Loads and saves [`PersistedState`] at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// A store at an explicit path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store at the default location: `$XDG_STATE_HOME/lumo/state.json`,
    /// or `~/.local/state/lumo/state.json` when the variable is unset.
    #[must_use]
    pub fn default_location() -> Self {
        let base = std::env::var_os("XDG_STATE_HOME").map_or_else(
            || {
                let home = std::env::var_os("HOME").unwrap_or_default();
                PathBuf::from(home).join(".local").join("state")
            },
            PathBuf::from,
        );
        Self {
            path: base.join("lumo").join("state.json"),
        }
    }

    /// Where this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state.
    ///
    /// A missing file is a first run (defaults, no log). A file that
    /// exists but fails to read or parse is logged at warn level and
    /// replaced by defaults — stale preferences are never worth refusing
    /// to start over.
    #[must_use]
    pub fn load(&self) -> PersistedState {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return PersistedState::default();
            }
            Err(err) => {
                log::warn!("reading {}: {err}", self.path.display());
                return PersistedState::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("parsing {}: {err}", self.path.display());
                PersistedState::default()
            }
        }
    }

    /// Write the persisted state, creating parent directories as needed.
    ///
    /// The document is written to a sibling temp file first and renamed
    /// into place, so a crash mid-write can't leave a truncated file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on I/O or encoding failure. Callers treat
    /// saves as fire-and-forget and log the error.
    pub fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let text = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::GradientFactory;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// A unique scratch path per test, cleaned up on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Self {
            static COUNTER: AtomicU32 = AtomicU32::new(0);
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let dir = std::env::temp_dir().join(format!(
                "lumo-store-test-{}-{n}",
                std::process::id()
            ));
            Self(dir)
        }

        fn file(&self) -> PathBuf {
            self.0.join("state.json")
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn missing_file_is_defaults() {
        let scratch = Scratch::new();
        let store = StateStore::at(scratch.file());
        let state = store.load();
        assert!(!state.has_visited_before);
        assert_eq!(state.theme, Theme::Sunset);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let scratch = Scratch::new();
        let store = StateStore::at(scratch.file());

        let mut factory = GradientFactory::seeded(11);
        let state = PersistedState {
            has_visited_before: true,
            theme: Theme::Neon,
            favorites: factory.generate_set(3),
        };
        store.save(&state).unwrap();

        let loaded = store.load();
        assert!(loaded.has_visited_before);
        assert_eq!(loaded.theme, Theme::Neon);
        assert_eq!(loaded.favorites, state.favorites);
    }

    #[test]
    fn corrupt_file_is_defaults() {
        let scratch = Scratch::new();
        let store = StateStore::at(scratch.file());
        fs::create_dir_all(&scratch.0).unwrap();
        fs::write(scratch.file(), "{ not json").unwrap();
        let state = store.load();
        assert!(!state.has_visited_before);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let scratch = Scratch::new();
        let store = StateStore::at(scratch.file());
        fs::create_dir_all(&scratch.0).unwrap();
        fs::write(scratch.file(), r#"{"theme": "ocean"}"#).unwrap();
        let state = store.load();
        assert_eq!(state.theme, Theme::Ocean);
        assert!(!state.has_visited_before);
    }

    #[test]
    fn save_creates_parent_directories() {
        let scratch = Scratch::new();
        let nested = scratch.0.join("a").join("b").join("state.json");
        let store = StateStore::at(nested);
        store.save(&PersistedState::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn legacy_key_names_on_disk() {
        let scratch = Scratch::new();
        let store = StateStore::at(scratch.file());
        let state = PersistedState {
            has_visited_before: true,
            ..PersistedState::default()
        };
        store.save(&state).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"hasVisitedBefore\""));
        assert!(text.contains("\"favorites\""));
    }
}
