//! Cardinal orientation and its action geometry.
//!
//! Facing indices are fixed (North=0, East=1, South=2, West=3) because
//! oriented-search state indices embed them: changing the order would change
//! every flat array layout downstream.

/// The direction an agent is currently oriented toward.
///
/// Rotations change facing without moving; a step moves one cell along the
/// facing.  The y axis grows down-screen, so North is `(0, -1)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    North = 0,
    East  = 1,
    South = 2,
    West  = 3,
}

impl Facing {
    /// Number of distinct facings.  The oriented state space is `W·H·COUNT`.
    pub const COUNT: usize = 4;

    /// All facings in index order.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Fixed index 0..3.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`][Self::index]; the argument is taken mod 4.
    #[inline]
    pub fn from_index(index: usize) -> Facing {
        Self::ALL[index % Self::COUNT]
    }

    /// Facing after a left rotation: `(d + 3) mod 4`.
    #[inline]
    pub fn left(self) -> Facing {
        Self::from_index(self.index() + 3)
    }

    /// Facing after a right rotation: `(d + 1) mod 4`.
    #[inline]
    pub fn right(self) -> Facing {
        Self::from_index(self.index() + 1)
    }

    /// X delta of one step along this facing.
    #[inline]
    pub fn step_dx(self) -> i32 {
        match self {
            Facing::East => 1,
            Facing::West => -1,
            Facing::North | Facing::South => 0,
        }
    }

    /// Y delta of one step along this facing (y grows down-screen).
    #[inline]
    pub fn step_dy(self) -> i32 {
        match self {
            Facing::North => -1,
            Facing::South => 1,
            Facing::East | Facing::West => 0,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Facing::North => "N",
            Facing::East => "E",
            Facing::South => "S",
            Facing::West => "W",
        };
        f.write_str(name)
    }
}
