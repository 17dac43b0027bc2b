//! The per-tick action vocabulary.

/// One of the four legal actions the engine accepts each tick.
///
/// `next_move` always returns one of these; there is no "error" output.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    TurnLeft,
    TurnRight,
    Step,
    DoNothing,
}

impl Action {
    /// `true` for the two rotations (they change facing but not cell).
    #[inline]
    pub fn is_rotation(self) -> bool {
        matches!(self, Action::TurnLeft | Action::TurnRight)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::TurnLeft => "TURN_L",
            Action::TurnRight => "TURN_R",
            Action::Step => "STEP",
            Action::DoNothing => "DO_NOTHING",
        };
        f.write_str(name)
    }
}
