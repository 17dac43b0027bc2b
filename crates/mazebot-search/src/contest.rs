//! Opponent arrival-time prediction.
//!
//! For each tracked opponent this runs the same oriented BFS we use for
//! ourselves, but deliberately *without* any of our biases: no danger
//! memory, no occupancy overlay, and their own cell free.  The prediction
//! answers one question — how many ticks does the fastest opponent need to
//! reach a cell?

use mazebot_core::Cell;
use mazebot_world::{AgentSnapshot, MazeGrid};

use crate::OrientedSearch;

/// Per-opponent oriented distance fields.
#[derive(Default)]
pub struct ContestPredictor {
    fields: Vec<OrientedSearch>,
    active: usize,
}

impl ContestPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute opponent fields for this tick.
    ///
    /// When more than `max_tracked` opponents are present, only the
    /// geometrically nearest (Manhattan distance to `own_cell`, ties by
    /// agent id) are sampled.  Opponents standing on unwalkable or
    /// out-of-bounds cells are skipped.
    pub fn compute(
        &mut self,
        grid: &MazeGrid,
        own_cell: Cell,
        opponents: &[AgentSnapshot],
        max_tracked: usize,
    ) {
        let mut tracked: Vec<&AgentSnapshot> = opponents
            .iter()
            .filter(|o| grid.walkable(o.cell.x, o.cell.y))
            .collect();
        tracked.sort_by_key(|o| (own_cell.manhattan(o.cell), o.id));
        tracked.truncate(max_tracked);

        while self.fields.len() < tracked.len() {
            self.fields.push(OrientedSearch::new());
        }
        self.active = tracked.len();

        for (field, opponent) in self.fields.iter_mut().zip(&tracked) {
            field.compute(grid, opponent.cell, opponent.facing, None);
        }
    }

    /// Fewest ticks any tracked opponent needs to reach `(x, y)`.
    ///
    /// `None` when no tracked opponent can reach the cell at all.
    pub fn min_opponent_ticks_to(&self, x: i32, y: i32) -> Option<u32> {
        self.fields[..self.active]
            .iter()
            .filter_map(|f| f.distance_to(x, y))
            .min()
    }

    /// Number of opponents with a computed field this tick.
    pub fn tracked(&self) -> usize {
        self.active
    }
}
