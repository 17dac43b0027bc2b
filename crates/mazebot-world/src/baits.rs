//! Bait registry keyed by packed coordinate.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mazebot_core::Bait;

use crate::{WorldError, WorldResult};

struct Inner {
    baits: HashMap<u64, Bait>,
    /// Largest maze dimensions ever published — the only coordinate bound a
    /// late-arriving bait event is checked against.
    seen_width: i32,
    seen_height: i32,
}

/// Thread-safe bait storage.
///
/// Writers are the appear/vanish event handlers; the decision thread takes a
/// [`snapshot`][Self::snapshot] copy at tick start.  A bait's identity is its
/// coordinate: inserting at an occupied coordinate overwrites.
pub struct BaitBoard {
    inner: RwLock<Inner>,
}

impl Default for BaitBoard {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                baits: HashMap::new(),
                seen_width: 0,
                seen_height: 0,
            }),
        }
    }
}

impl BaitBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record maze dimensions so coordinate validation has a bound.
    ///
    /// The bound only grows: baits for a larger maze seen earlier in the
    /// game stay addressable after a smaller maze arrives.
    pub fn note_maze(&self, width: i32, height: i32) {
        let mut inner = self.write();
        inner.seen_width = inner.seen_width.max(width);
        inner.seen_height = inner.seen_height.max(height);
    }

    /// Add or overwrite a bait entry.
    ///
    /// Fails with [`WorldError::InvalidCoordinate`] only when the coordinate
    /// lies outside every maze ever seen; whether the cell is currently
    /// walkable is irrelevant here.
    pub fn insert(&self, bait: Bait) -> WorldResult<()> {
        let mut inner = self.write();
        let (x, y) = (bait.cell.x, bait.cell.y);
        let out_of_any_maze = x < 0
            || y < 0
            || (inner.seen_width > 0 && x >= inner.seen_width)
            || (inner.seen_height > 0 && y >= inner.seen_height);
        if out_of_any_maze {
            return Err(WorldError::InvalidCoordinate { x, y });
        }
        inner.baits.insert(bait.key(), bait);
        Ok(())
    }

    /// Remove the bait at a coordinate, if any.
    pub fn remove_at(&self, x: i32, y: i32) {
        self.write().baits.remove(&mazebot_core::Cell::new(x, y).key());
    }

    /// The bait at a coordinate, if any.
    pub fn get(&self, x: i32, y: i32) -> Option<Bait> {
        self.read()
            .baits
            .get(&mazebot_core::Cell::new(x, y).key())
            .copied()
    }

    /// Point-in-time copy of all tracked baits.
    ///
    /// Concurrent inserts after the copy do not affect the returned vec.
    /// Order is unspecified — consumers that need determinism sort by key.
    pub fn snapshot(&self) -> Vec<Bait> {
        self.read().baits.values().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.read().baits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.read().baits.len()
    }

    /// Bulk re-sync from an external source (world-provider fallback).
    ///
    /// Entries with invalid coordinates are skipped.
    pub fn refresh_from<I: IntoIterator<Item = Bait>>(&self, baits: I) {
        for bait in baits {
            let _ = self.insert(bait);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
