//! Oriented BFS over (x, y, facing) states.
//!
//! # State layout
//!
//! A state packs into the flat index `(y·W + x)·4 + facing`.  Three parallel
//! arrays of size `W·H·4` hold the minimum action count, the predecessor
//! state, and the first action of *this* shortest path out of the origin.
//! The arrays are reused across searches: they are reset by fill and only
//! reallocated when the grid size changes.
//!
//! # Edges
//!
//! Each state has at most three outgoing edges, all costing one action:
//! turn-left, turn-right, and step-forward (only when the destination cell is
//! admissible).  Admissible = in-bounds ∧ walkable ∧ not overlay-blocked —
//! except that the overlay can never evict the origin cell itself.

use std::collections::VecDeque;

use mazebot_core::{Action, Cell, Facing};
use mazebot_world::MazeGrid;

use crate::CellOverlay;

const UNREACHED: u32 = u32::MAX;
const NO_PREV: u32 = u32::MAX;

/// Reusable oriented shortest-action search.
#[derive(Default)]
pub struct OrientedSearch {
    width: i32,
    height: i32,
    origin: Option<Cell>,
    dist: Vec<u32>,
    prev: Vec<u32>,
    first_action: Vec<Option<Action>>,
    queue: VecDeque<u32>,
}

impl OrientedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the BFS from `(start, facing)` under the given admissibility.
    ///
    /// If the start cell itself is not walkable the result marks everything
    /// unreachable.
    pub fn compute(
        &mut self,
        grid: &MazeGrid,
        start: Cell,
        facing: Facing,
        blocked: Option<&CellOverlay>,
    ) {
        self.width = grid.width();
        self.height = grid.height();
        self.origin = Some(start);
        self.reset(grid.cell_count() * Facing::COUNT);

        if !grid.walkable(start.x, start.y) {
            return;
        }

        let start_state = self.state_index(start.x, start.y, facing.index());
        self.dist[start_state as usize] = 0;
        self.queue.push_back(start_state);

        while let Some(state) = self.queue.pop_front() {
            let (x, y, dir_index) = self.unpack(state);
            let dir = Facing::from_index(dir_index);
            let next_dist = self.dist[state as usize] + 1;
            let at_origin = self.dist[state as usize] == 0;
            let inherited = self.first_action[state as usize];

            // Rotations stay on the cell.
            self.relax_turn(state, x, y, dir.left(), next_dist, at_origin, inherited, Action::TurnLeft);
            self.relax_turn(state, x, y, dir.right(), next_dist, at_origin, inherited, Action::TurnRight);

            // Step, when the forward cell is admissible.
            let nx = x + dir.step_dx();
            let ny = y + dir.step_dy();
            if self.admissible(grid, blocked, nx, ny) {
                let next_state = self.state_index(nx, ny, dir_index);
                if self.dist[next_state as usize] == UNREACHED {
                    self.dist[next_state as usize] = next_dist;
                    self.first_action[next_state as usize] =
                        if at_origin { Some(Action::Step) } else { inherited };
                    self.prev[next_state as usize] = state;
                    self.queue.push_back(next_state);
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Minimum actions to put the agent on `(x, y)` with any facing.
    pub fn distance_to(&self, x: i32, y: i32) -> Option<u32> {
        let base = self.cell_base(x, y)?;
        let best = (0..Facing::COUNT)
            .map(|f| self.dist[base + f])
            .min()
            .unwrap_or(UNREACHED);
        (best != UNREACHED).then_some(best)
    }

    /// First action of a shortest path to `(x, y)`.
    ///
    /// Ties between equally distant arrival facings break toward the lowest
    /// facing index.
    pub fn first_action_to(&self, x: i32, y: i32) -> Option<Action> {
        let state = self.best_arrival_state(x, y)?;
        self.first_action[state as usize]
    }

    /// Cells of a shortest path to `(x, y)`, origin first, rotations
    /// collapsed.  Empty when unreachable.
    pub fn path_to(&self, x: i32, y: i32) -> Vec<Cell> {
        let Some(state) = self.best_arrival_state(x, y) else {
            return Vec::new();
        };

        let mut cells = Vec::new();
        let mut current = state;
        loop {
            let (cx, cy, _) = self.unpack(current);
            let cell = Cell::new(cx, cy);
            if cells.last() != Some(&cell) {
                cells.push(cell);
            }
            let prev = self.prev[current as usize];
            if prev == NO_PREV {
                break;
            }
            current = prev;
        }
        cells.reverse();
        cells
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn reset(&mut self, state_count: usize) {
        if self.dist.len() != state_count {
            self.dist = vec![UNREACHED; state_count];
            self.prev = vec![NO_PREV; state_count];
            self.first_action = vec![None; state_count];
        } else {
            self.dist.fill(UNREACHED);
            self.prev.fill(NO_PREV);
            self.first_action.fill(None);
        }
        self.queue.clear();
    }

    #[allow(clippy::too_many_arguments)]
    fn relax_turn(
        &mut self,
        from_state: u32,
        x: i32,
        y: i32,
        new_dir: Facing,
        next_dist: u32,
        at_origin: bool,
        inherited: Option<Action>,
        turn: Action,
    ) {
        let next_state = self.state_index(x, y, new_dir.index());
        if self.dist[next_state as usize] != UNREACHED {
            return;
        }
        self.dist[next_state as usize] = next_dist;
        self.first_action[next_state as usize] = if at_origin { Some(turn) } else { inherited };
        self.prev[next_state as usize] = from_state;
        self.queue.push_back(next_state);
    }

    fn admissible(&self, grid: &MazeGrid, blocked: Option<&CellOverlay>, x: i32, y: i32) -> bool {
        if !grid.walkable(x, y) {
            return false;
        }
        // The overlay never evicts the origin cell.
        if self.origin == Some(Cell::new(x, y)) {
            return true;
        }
        blocked.is_none_or(|b| !b.is_blocked(x, y))
    }

    /// Arrival state with the minimum distance at a cell; `None` when the
    /// cell is out of bounds or unreachable.
    fn best_arrival_state(&self, x: i32, y: i32) -> Option<u32> {
        let base = self.cell_base(x, y)?;
        let mut best: Option<(u32, usize)> = None;
        for f in 0..Facing::COUNT {
            let d = self.dist[base + f];
            if d != UNREACHED && best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, f));
            }
        }
        best.map(|(_, f)| (base + f) as u32)
    }

    fn cell_base(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.width && y < self.height && !self.dist.is_empty())
            .then(|| ((y * self.width + x) as usize) * Facing::COUNT)
    }

    #[inline]
    fn state_index(&self, x: i32, y: i32, dir_index: usize) -> u32 {
        (((y * self.width + x) as usize) * Facing::COUNT + dir_index) as u32
    }

    #[inline]
    fn unpack(&self, state: u32) -> (i32, i32, usize) {
        let cell_index = state as usize / Facing::COUNT;
        let dir_index = state as usize % Facing::COUNT;
        let x = (cell_index % self.width as usize) as i32;
        let y = (cell_index / self.width as usize) as i32;
        (x, y, dir_index)
    }
}
