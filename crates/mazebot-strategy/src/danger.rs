//! TTL-bounded memory of recent conflict cells.
//!
//! When the last-mile check forces an avoidance turn, the contested cell is
//! remembered here and blocked in the planner's occupancy overlay for a
//! while, so consecutive plans route around the conflict site instead of
//! re-proposing the same step every tick.

use std::collections::HashMap;

use mazebot_core::{Cell, Tick};
use mazebot_search::CellOverlay;

/// Remembered conflict cells with their expiry ticks.
pub struct DangerMemory {
    ttl: u64,
    cells: HashMap<u64, (Cell, Tick)>,
}

impl DangerMemory {
    pub fn new(ttl_ticks: u64) -> Self {
        Self {
            ttl: ttl_ticks,
            cells: HashMap::new(),
        }
    }

    /// Remember `cell` as dangerous until `now + ttl`.
    pub fn mark(&mut self, cell: Cell, now: Tick) {
        if self.ttl == 0 {
            return;
        }
        self.cells.insert(cell.key(), (cell, now.offset(self.ttl)));
    }

    /// Drop expired entries and block the live ones in `overlay`.
    pub fn stamp(&mut self, overlay: &mut CellOverlay, now: Tick) {
        self.cells.retain(|_, (_, until)| *until > now);
        for (cell, _) in self.cells.values() {
            overlay.block_cell(*cell);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
