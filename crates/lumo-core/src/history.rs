// SPDX-License-Identifier: MIT
//
// Bounded, navigable history of gradient-set snapshots.
//
// The history owns every snapshot; the presentation layer only ever
// sees a borrowed view of the entry at the cursor. Navigation moves the
// cursor without touching the list. Regeneration forks: anything beyond
// the cursor (the redo tail) is truncated before the new snapshot is
// appended, and the oldest snapshot is evicted once the capacity is
// reached — ring semantics, with the cursor shifted so the active entry
// is unaffected.

use crate::factory::GradientFactory;
use crate::gradient::Gradient;

/// The displayed collection: an ordered set of gradients. The set size
/// is fixed at session start.
pub type GradientSet = Vec<Gradient>;

/// Default number of snapshots retained for back/forward navigation.
pub const DEFAULT_CAPACITY: usize = 20;

/// Bounded back/forward history over [`GradientSet`] snapshots.
#[derive(Debug)]
pub struct History {
    snapshots: Vec<GradientSet>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// Create a history seeded with the initial set.
    ///
    /// `capacity` is clamped to at least 1 (a history that cannot hold
    /// its own current entry is meaningless).
    #[must_use]
    pub fn new(initial: GradientSet, capacity: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// The gradient set at the cursor — the one currently displayed.
    #[must_use]
    pub fn current(&self) -> &[Gradient] {
        &self.snapshots[self.cursor]
    }

    /// Cursor position (index into the snapshot list).
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of retained snapshots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false — the history is seeded at construction and never
    /// drops below one snapshot.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Maximum number of retained snapshots.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if the cursor can move backward.
    #[inline]
    #[must_use]
    pub const fn can_back(&self) -> bool {
        self.cursor > 0
    }

    /// True if the cursor can move forward.
    #[inline]
    #[must_use]
    pub const fn can_forward(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Replace every unlocked gradient in the current set and append the
    /// result as a new snapshot.
    ///
    /// Locked gradients are carried over unchanged (whole-set-minus-locked
    /// policy). If every gradient is locked this is a no-op: no snapshot,
    /// cursor unchanged, returns `false` — a valid terminal state, not an
    /// error.
    ///
    /// Appending truncates any redo tail beyond the cursor first, then
    /// evicts the oldest snapshot if the capacity would be exceeded.
    pub fn regenerate(&mut self, factory: &mut GradientFactory) -> bool {
        let current = &self.snapshots[self.cursor];
        if current.iter().all(|g| g.locked) {
            log::debug!("regenerate: all {} slots locked, no-op", current.len());
            return false;
        }

        let next: GradientSet = current
            .iter()
            .map(|g| {
                if g.locked {
                    g.clone()
                } else {
                    factory.generate()
                }
            })
            .collect();

        self.push(next);
        true
    }

    /// Move the cursor by `step`, clamped to the snapshot range.
    ///
    /// Out-of-range steps clamp rather than wrap or error. Returns `true`
    /// if the cursor actually moved. Never mutates the snapshots.
    pub fn navigate(&mut self, step: isize) -> bool {
        let last = self.snapshots.len() as isize - 1;
        let target = (self.cursor as isize + step).clamp(0, last);
        let moved = target as usize != self.cursor;
        self.cursor = target as usize;
        moved
    }

    /// Flip the lock flag on the gradient with `id` in the current
    /// snapshot only — earlier history entries are not rewritten.
    ///
    /// Returns the new lock state, or `None` if no gradient matches.
    pub fn toggle_lock(&mut self, id: &str) -> Option<bool> {
        let g = self.find_mut(id)?;
        g.locked = !g.locked;
        Some(g.locked)
    }

    /// Flip the favorite flag on the gradient with `id` in the current
    /// snapshot. Returns the new state, or `None` if no gradient matches.
    ///
    /// The favorites collection is mirrored separately by the session;
    /// this only touches the snapshot's flag.
    pub fn toggle_favorite_flag(&mut self, id: &str) -> Option<bool> {
        let g = self.find_mut(id)?;
        g.favorite = !g.favorite;
        Some(g.favorite)
    }

    /// Borrow the gradient with `id` from the current snapshot.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Gradient> {
        self.current().iter().find(|g| g.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Gradient> {
        self.snapshots[self.cursor].iter_mut().find(|g| g.id == id)
    }

    /// Append a snapshot after the cursor, truncating the redo tail and
    /// evicting the oldest entry on overflow. The cursor lands on the
    /// new snapshot.
    fn push(&mut self, set: GradientSet) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(set);

        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        } else {
            self.cursor += 1;
        }
        debug_assert_eq!(self.cursor, self.snapshots.len() - 1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
