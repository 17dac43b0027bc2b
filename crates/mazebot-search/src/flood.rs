//! Step-only BFS distance field.
//!
//! Ignores facing entirely: every cell-to-cell move costs 1.  This
//! underestimates the true action distance (turns are free here), which is
//! exactly what a cheap reachability-and-ranking filter wants.

use std::collections::VecDeque;

use mazebot_core::Cell;
use mazebot_world::MazeGrid;

const UNREACHED: u32 = u32::MAX;

/// Reusable plain-grid distance field.
#[derive(Default)]
pub struct FloodField {
    width: i32,
    height: i32,
    dist: Vec<u32>,
    queue: VecDeque<(i32, i32)>,
}

impl FloodField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the field with step distances from `start` over walkable cells.
    pub fn compute(&mut self, grid: &MazeGrid, start: Cell) {
        self.width = grid.width();
        self.height = grid.height();
        if self.dist.len() != grid.cell_count() {
            self.dist = vec![UNREACHED; grid.cell_count()];
        } else {
            self.dist.fill(UNREACHED);
        }
        self.queue.clear();

        if !grid.walkable(start.x, start.y) {
            return;
        }

        self.dist[grid.cell_index(start.x, start.y)] = 0;
        self.queue.push_back((start.x, start.y));

        while let Some((x, y)) = self.queue.pop_front() {
            let next = self.dist[(y * self.width + x) as usize] + 1;
            for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
                if grid.walkable(nx, ny) {
                    let idx = (ny * self.width + nx) as usize;
                    if self.dist[idx] == UNREACHED {
                        self.dist[idx] = next;
                        self.queue.push_back((nx, ny));
                    }
                }
            }
        }
    }

    /// Step distance to a cell; `None` when unreachable or out of bounds.
    pub fn distance_to(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height || self.dist.is_empty() {
            return None;
        }
        let d = self.dist[(y * self.width + x) as usize];
        (d != UNREACHED).then_some(d)
    }
}
