//! `mazebot-search` — shortest-action searches over the maze grid.
//!
//! # Pluggability
//!
//! Both searches take the grid snapshot plus an optional [`CellOverlay`] of
//! extra blocked cells (traps, occupied cells, danger memory), so callers
//! decide what "admissible" means per invocation without the search knowing
//! why a cell is off-limits.
//!
//! # Cost units
//!
//! Every edge costs exactly **one action** (one tick): a rotation and a step
//! are the same price.  An unweighted BFS therefore finds action-optimal
//! paths; there is no need for a priority queue here.
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`oriented`]| `OrientedSearch` — BFS over (x, y, facing) states        |
//! | [`flood`]   | `FloodField` — step-only BFS used as a cheap filter      |
//! | [`overlay`] | `CellOverlay` — boolean blocked-cell composition         |
//! | [`contest`] | `ContestPredictor` — per-opponent oriented fields        |

pub mod contest;
pub mod flood;
pub mod oriented;
pub mod overlay;


pub use contest::ContestPredictor;
pub use flood::FloodField;
pub use oriented::OrientedSearch;
pub use overlay::CellOverlay;
