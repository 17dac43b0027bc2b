//! Pause control state.

use std::sync::atomic::{AtomicBool, Ordering};

/// The state behind the control panel's pause button.
///
/// The UI owns the widget; the bot owns this flag.  While paused, every
/// `next_move` returns `DO_NOTHING` without planning.
#[derive(Default)]
pub struct ControlState {
    paused: AtomicBool,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    /// Flip the flag; returns the new value.
    pub fn toggle(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::AcqRel)
    }
}
