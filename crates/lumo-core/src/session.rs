// SPDX-License-Identifier: MIT
//
// The studio session — one struct owning every store the front end
// touches, passed down by reference. Lifecycle is tied to application
// start/stop; there are no ambient globals.
//
// All operations are synchronous and run to completion before the next
// event is handled. Persistence is fire-and-forget: a failed save is
// logged and the session keeps going.

use crate::factory::GradientFactory;
use crate::favorites::Favorites;
use crate::gradient::Gradient;
use crate::history::{DEFAULT_CAPACITY, History};
use crate::store::{PersistedState, StateStore};
use crate::theme::Theme;

/// Number of gradients in a set unless overridden.
pub const DEFAULT_SET_SIZE: usize = 8;

/// Options for building a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Gradients per set. Fixed for the session lifetime.
    pub set_size: usize,
    /// History snapshot capacity.
    pub capacity: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Theme override; `None` uses the persisted choice.
    pub theme: Option<Theme>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            set_size: DEFAULT_SET_SIZE,
            capacity: DEFAULT_CAPACITY,
            seed: None,
            theme: None,
        }
    }
}

/// The live application state: history, favorites, factory, theme, and
/// the backing state store.
#[derive(Debug)]
pub struct Session {
    history: History,
    favorites: Favorites,
    factory: GradientFactory,
    theme: Theme,
    has_visited_before: bool,
    first_run: bool,
    store: StateStore,
}

impl Session {
    /// Build a session: load persisted state from `store`, seed the
    /// factory, and generate the initial gradient set.
    #[must_use]
    pub fn start(store: StateStore, config: &SessionConfig) -> Self {
        let state = store.load();
        let mut factory = config
            .seed
            .map_or_else(GradientFactory::new, GradientFactory::seeded);

        let set_size = config.set_size.max(1);
        let initial = factory.generate_set(set_size);

        Self {
            history: History::new(initial, config.capacity),
            favorites: Favorites::from_entries(state.favorites),
            factory,
            theme: config.theme.unwrap_or(state.theme),
            has_visited_before: state.has_visited_before,
            first_run: !state.has_visited_before,
            store,
        }
    }

    // ── Views ───────────────────────────────────────────────────────────

    /// The displayed gradient set (read-only view of the history cursor).
    #[must_use]
    pub fn current(&self) -> &[Gradient] {
        self.history.current()
    }

    /// The favorites collection.
    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// The history (for cursor/length display).
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The active theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// True if no prior visit was recorded when the session started.
    /// Drives the onboarding overlay.
    #[must_use]
    pub const fn first_run(&self) -> bool {
        self.first_run
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Regenerate every unlocked gradient in the current set.
    ///
    /// Returns `false` when every slot is locked (valid no-op).
    pub fn regenerate(&mut self) -> bool {
        self.history.regenerate(&mut self.factory)
    }

    /// Move through history by `step`, clamped at both ends.
    pub fn navigate(&mut self, step: isize) -> bool {
        self.history.navigate(step)
    }

    /// Toggle the lock flag on the gradient with `id` in the current set.
    pub fn toggle_lock(&mut self, id: &str) -> Option<bool> {
        self.history.toggle_lock(id)
    }

    /// Toggle the favorite flag on the gradient with `id`, keeping the
    /// favorites collection in sync, and persist.
    ///
    /// If `id` is not in the current set but is a stored favorite (the
    /// favorites view shows entries from older sets), the entry is
    /// removed. Returns the new favorite state, or `None` if the id is
    /// unknown everywhere.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let new_state = if let Some(flag) = self.history.toggle_favorite_flag(id) {
            if flag {
                // Clone carries the flag just set on the snapshot.
                let gradient = self.history.find(id)?.clone();
                self.favorites.add(&gradient);
            } else {
                self.favorites.remove(id);
            }
            flag
        } else if self.favorites.remove(id) {
            false
        } else {
            return None;
        };

        self.persist();
        Some(new_state)
    }

    /// Advance to the next theme and persist the choice.
    pub fn cycle_theme(&mut self) -> Theme {
        self.theme = self.theme.next();
        self.persist();
        self.theme
    }

    /// Record that onboarding has been shown and persist.
    pub fn mark_visited(&mut self) {
        if !self.has_visited_before {
            self.has_visited_before = true;
            self.persist();
        }
    }

    /// Write the persisted slice of the session. Best-effort: failures
    /// are logged, never surfaced.
    pub fn persist(&self) {
        let state = PersistedState {
            has_visited_before: self.has_visited_before,
            theme: self.theme,
            favorites: self.favorites.entries().to_vec(),
        };
        if let Err(err) = self.store.save(&state) {
            log::warn!("saving state to {}: {err}", self.store.path().display());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
