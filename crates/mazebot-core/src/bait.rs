//! Bait descriptors and the canonical score table.

use crate::Cell;

/// Canonical server score for a gem.
pub const GEM_SCORE: i32 = 314;
/// Canonical server score for a coffee.
pub const COFFEE_SCORE: i32 = 42;
/// Canonical server score for a food item.
pub const FOOD_SCORE: i32 = 13;
/// Canonical server score for a trap.
pub const TRAP_SCORE: i32 = -128;

/// Kind tag of a bait, derived from its score.
///
/// The set is closed over the known server scores; anything else with a
/// positive or zero score (e.g. letters) is `Other`, and *every* negative
/// score counts as a trap.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaitKind {
    Gem,
    Coffee,
    Food,
    Trap,
    Other,
}

impl BaitKind {
    /// Classify a raw score.
    pub fn from_score(score: i32) -> BaitKind {
        match score {
            GEM_SCORE => BaitKind::Gem,
            COFFEE_SCORE => BaitKind::Coffee,
            FOOD_SCORE => BaitKind::Food,
            s if s < 0 => BaitKind::Trap,
            _ => BaitKind::Other,
        }
    }

    /// `true` for traps (negative-score baits).
    #[inline]
    pub fn is_trap(self) -> bool {
        matches!(self, BaitKind::Trap)
    }

    /// Uppercase identifier used verbatim by the visualization sink.
    pub fn label(self) -> &'static str {
        match self {
            BaitKind::Gem => "GEM",
            BaitKind::Coffee => "COFFEE",
            BaitKind::Food => "FOOD",
            BaitKind::Trap => "TRAP",
            BaitKind::Other => "OTHER",
        }
    }
}

/// A collectable item on a cell.
///
/// Immutable: baits are added on appear and removed on vanish, never mutated.
/// Identity is the coordinate — two baits cannot share a cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bait {
    pub cell: Cell,
    pub score: i32,
    pub kind: BaitKind,
}

impl Bait {
    /// Build a bait, deriving the kind tag from the score.
    pub fn new(cell: Cell, score: i32) -> Bait {
        Bait {
            cell,
            score,
            kind: BaitKind::from_score(score),
        }
    }

    #[inline]
    pub fn is_trap(&self) -> bool {
        self.kind.is_trap()
    }

    /// Packed coordinate key — the bait's registry identity.
    #[inline]
    pub fn key(&self) -> u64 {
        self.cell.key()
    }
}
