//! Visualization data sink.
//!
//! The bot produces the data an overlay renderer needs — target cell, label,
//! planned path — and nothing else.  Rendering itself (colors, zoom,
//! offsets) is someone else's job.

use std::sync::{Mutex, PoisonError};

use mazebot_core::Cell;

/// Output contract toward the overlay renderer.
///
/// Implementations must tolerate being called from the decision thread every
/// tick; keep them cheap.
pub trait VisualSink: Send + Sync {
    /// Highlight `cell` as the current target, with an optional label
    /// (e.g. `"GEM"`).
    fn set_target(&self, cell: Cell, label: Option<&'static str>);

    /// Remove the target highlight.
    fn clear_target(&self);

    /// Replace the drawn path.  The first entry is the bot's own cell, the
    /// last the plan's terminal cell; empty clears the path.
    fn set_planned_path(&self, path: &[Cell]);
}

/// Point-in-time copy of the sink contents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayState {
    pub target: Option<Cell>,
    pub target_label: Option<&'static str>,
    pub path: Vec<Cell>,
}

/// Default sink: holds the latest overlay state behind a lock for a
/// renderer (or a test) to read back.
#[derive(Default)]
pub struct PlanOverlay {
    state: Mutex<OverlayState>,
}

impl PlanOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current overlay contents.
    pub fn snapshot(&self) -> OverlayState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn with<R>(&self, f: impl FnOnce(&mut OverlayState) -> R) -> R {
        f(&mut self.state.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl VisualSink for PlanOverlay {
    fn set_target(&self, cell: Cell, label: Option<&'static str>) {
        self.with(|s| {
            s.target = Some(cell);
            s.target_label = label;
        });
    }

    fn clear_target(&self) {
        self.with(|s| {
            s.target = None;
            s.target_label = None;
        });
    }

    fn set_planned_path(&self, path: &[Cell]) {
        self.with(|s| {
            s.path.clear();
            s.path.extend_from_slice(path);
        });
    }
}

/// A [`VisualSink`] that discards everything.
pub struct NoopSink;

impl VisualSink for NoopSink {
    fn set_target(&self, _cell: Cell, _label: Option<&'static str>) {}
    fn clear_target(&self) {}
    fn set_planned_path(&self, _path: &[Cell]) {}
}
