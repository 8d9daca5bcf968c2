// SPDX-License-Identifier: MIT
//
// The favorites collection — deduplicated by gradient id, persisted as
// a plain JSON array, and exempt from history eviction.

use serde::{Deserialize, Serialize};

use crate::gradient::Gradient;

/// Favorited gradients, in insertion order.
///
/// Membership is mirrored with the `favorite` flag on gradients in the
/// live set: the session keeps the two in sync, this collection never
/// decides on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<Gradient>,
}

impl Favorites {
    /// An empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Build from a loaded list, dropping duplicate ids (first wins) and
    /// forcing the favorite flag on every entry.
    #[must_use]
    pub fn from_entries(entries: Vec<Gradient>) -> Self {
        let mut favorites = Self::new();
        for mut g in entries {
            g.favorite = true;
            if !favorites.contains(&g.id) {
                favorites.entries.push(g);
            }
        }
        favorites
    }

    /// Add a copy of `gradient`, marked favorite. Duplicate ids are
    /// ignored. Returns `true` if the gradient was inserted.
    pub fn add(&mut self, gradient: &Gradient) -> bool {
        if self.contains(&gradient.id) {
            return false;
        }
        let mut copy = gradient.clone();
        copy.favorite = true;
        self.entries.push(copy);
        true
    }

    /// Remove the entry with `id`. Returns `true` if something was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|g| g.id != id);
        self.entries.len() != before
    }

    /// Whether an entry with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|g| g.id == id)
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Gradient] {
        &self.entries
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been favorited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
