//! Maze grid snapshots and their atomic publication.
//!
//! # Snapshot discipline
//!
//! A [`MazeGrid`] is immutable once built.  [`GridHandle`] replaces the
//! current grid wholesale on every maze update; a reader that captured the
//! previous `Arc` keeps a consistent view for the remainder of its tick.
//!
//! # Row encodings
//!
//! Servers encode one cell as one or more characters per row.  The parser
//! detects the per-cell stride from the row length:
//!
//! | Row length        | Stride          |
//! |-------------------|-----------------|
//! | `W`               | 1               |
//! | `2W` or `2W − 1`  | 2               |
//! | multiple of `W`   | `len / W`       |
//! | anything else     | 1, with clamping (missing cells blocked) |

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

/// Characters that always mark a non-walkable cell.
const BLOCK_CHARS: [char; 9] = ['#', 'X', 'W', '?', 'O', 'o', '1', '█', '■'];

/// Immutable walkability snapshot of one maze.
///
/// Cell data is a row-major flat `Vec<bool>` of size `width · height`.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    width: i32,
    height: i32,
    walkable: Vec<bool>,
}

impl MazeGrid {
    /// Parse a grid from raw server rows (one per y, top-down).
    ///
    /// Returns `None` for non-positive dimensions.  Missing rows and missing
    /// characters block the affected cells rather than failing the parse.
    /// In strict mode every character other than `'.'` blocks; otherwise
    /// only the fixed block set does.
    pub fn parse<S: AsRef<str>>(width: i32, height: i32, rows: &[S], strict: bool) -> Option<MazeGrid> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let (w, h) = (width as usize, height as usize);
        let mut walkable = vec![false; w * h];

        for y in 0..h.min(rows.len()) {
            let chars: Vec<char> = rows[y].as_ref().chars().collect();
            let stride = detect_stride(w, chars.len());
            for x in 0..w {
                let c = chars.get(x * stride).copied().unwrap_or('#');
                walkable[y * w + x] = !is_blocked_char(c, strict);
            }
        }

        Some(MazeGrid {
            width,
            height,
            walkable,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// `false` for any out-of-bounds query.
    #[inline]
    pub fn walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.walkable[(y * self.width + x) as usize]
    }

    /// Row-major flat index of an in-bounds cell.
    #[inline]
    pub fn cell_index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Total cell count `width · height`.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.walkable.len()
    }
}

/// Per-cell character stride for a row of `len` characters in a `w`-cell maze.
fn detect_stride(w: usize, len: usize) -> usize {
    if len == w {
        1
    } else if len == 2 * w || len + 1 == 2 * w {
        2
    } else if len >= w && len % w == 0 {
        len / w
    } else {
        1
    }
}

fn is_blocked_char(c: char, strict: bool) -> bool {
    if strict {
        c != '.'
    } else {
        BLOCK_CHARS.contains(&c)
    }
}

// ── GridHandle ────────────────────────────────────────────────────────────────

/// Shared handle publishing [`MazeGrid`] snapshots by pointer swap.
///
/// The event thread calls [`update`][Self::update]; the decision thread calls
/// [`snapshot`][Self::snapshot] once per tick and works on the returned `Arc`.
#[derive(Default)]
pub struct GridHandle {
    strict: bool,
    current: RwLock<Option<Arc<MazeGrid>>>,
}

impl GridHandle {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            current: RwLock::new(None),
        }
    }

    /// Parse and atomically publish a new grid.
    ///
    /// Invalid dimensions are dropped at this boundary (logged at debug);
    /// the previously published grid stays in effect.
    pub fn update<S: AsRef<str>>(&self, width: i32, height: i32, rows: &[S]) {
        match MazeGrid::parse(width, height, rows, self.strict) {
            Some(grid) => {
                // A poisoned lock still holds valid data; recover rather than
                // take the whole bot down with it.
                *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(grid));
            }
            None => {
                debug!(width, height, "dropping maze update with invalid dimensions");
            }
        }
    }

    /// The currently published grid, if any maze has been received yet.
    pub fn snapshot(&self) -> Option<Arc<MazeGrid>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_ready(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
