//! Boolean blocked-cell overlays.

use mazebot_core::Cell;
use mazebot_world::MazeGrid;

/// A flat blocked-cell mask sized to one grid.
///
/// Composes the caller-side admissibility biases (traps, occupancy, danger
/// memory) that the walkability grid itself knows nothing about.  Queries
/// outside the mask's bounds are unblocked — bounds rejection is the grid's
/// job.
#[derive(Clone, Debug)]
pub struct CellOverlay {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl CellOverlay {
    /// An all-clear overlay sized to `grid`.
    pub fn for_grid(grid: &MazeGrid) -> CellOverlay {
        CellOverlay {
            width: grid.width(),
            height: grid.height(),
            blocked: vec![false; grid.cell_count()],
        }
    }

    #[inline]
    pub fn block(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.blocked[(y * self.width + x) as usize] = true;
        }
    }

    #[inline]
    pub fn block_cell(&mut self, cell: Cell) {
        self.block(cell.x, cell.y);
    }

    #[inline]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && x < self.width
            && y < self.height
            && self.blocked[(y * self.width + x) as usize]
    }
}
