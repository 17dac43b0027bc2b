//! Unit tests for mazebot-core primitives.

#[cfg(test)]
mod facing {
    use crate::Facing;

    #[test]
    fn indices_are_fixed() {
        assert_eq!(Facing::North.index(), 0);
        assert_eq!(Facing::East.index(), 1);
        assert_eq!(Facing::South.index(), 2);
        assert_eq!(Facing::West.index(), 3);
    }

    #[test]
    fn rotations_wrap() {
        assert_eq!(Facing::North.left(), Facing::West);
        assert_eq!(Facing::North.right(), Facing::East);
        assert_eq!(Facing::West.right(), Facing::North);
        assert_eq!(Facing::West.left(), Facing::South);
        for f in Facing::ALL {
            assert_eq!(f.left().right(), f);
            assert_eq!(f.right().right().right().right(), f);
        }
    }

    #[test]
    fn step_deltas() {
        assert_eq!((Facing::North.step_dx(), Facing::North.step_dy()), (0, -1));
        assert_eq!((Facing::East.step_dx(), Facing::East.step_dy()), (1, 0));
        assert_eq!((Facing::South.step_dx(), Facing::South.step_dy()), (0, 1));
        assert_eq!((Facing::West.step_dx(), Facing::West.step_dy()), (-1, 0));
    }
}

#[cfg(test)]
mod cell {
    use crate::{Cell, Facing};

    #[test]
    fn key_is_injective_for_distinct_cells() {
        let a = Cell::new(1, 2);
        let b = Cell::new(2, 1);
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), Cell::new(1, 2).key());
    }

    #[test]
    fn step_moves_one_cell() {
        let c = Cell::new(3, 3);
        assert_eq!(c.step(Facing::North), Cell::new(3, 2));
        assert_eq!(c.step(Facing::East), Cell::new(4, 3));
        assert_eq!(c.step(Facing::South), Cell::new(3, 4));
        assert_eq!(c.step(Facing::West), Cell::new(2, 3));
    }

    #[test]
    fn manhattan() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(3, 4)), 7);
        assert_eq!(Cell::new(2, 2).manhattan(Cell::new(2, 2)), 0);
    }
}

#[cfg(test)]
mod bait {
    use crate::bait::{COFFEE_SCORE, FOOD_SCORE, GEM_SCORE, TRAP_SCORE};
    use crate::{Bait, BaitKind, Cell};

    #[test]
    fn canonical_scores_map_to_kinds() {
        assert_eq!(BaitKind::from_score(GEM_SCORE), BaitKind::Gem);
        assert_eq!(BaitKind::from_score(COFFEE_SCORE), BaitKind::Coffee);
        assert_eq!(BaitKind::from_score(FOOD_SCORE), BaitKind::Food);
        assert_eq!(BaitKind::from_score(TRAP_SCORE), BaitKind::Trap);
    }

    #[test]
    fn every_negative_score_is_a_trap() {
        assert_eq!(BaitKind::from_score(-1), BaitKind::Trap);
        assert_eq!(BaitKind::from_score(-9_999), BaitKind::Trap);
    }

    #[test]
    fn unknown_positives_are_other() {
        assert_eq!(BaitKind::from_score(0), BaitKind::Other);
        assert_eq!(BaitKind::from_score(7), BaitKind::Other);
    }

    #[test]
    fn labels_are_uppercase_identifiers() {
        assert_eq!(BaitKind::Gem.label(), "GEM");
        assert_eq!(BaitKind::Coffee.label(), "COFFEE");
        assert_eq!(BaitKind::Food.label(), "FOOD");
        assert_eq!(BaitKind::Trap.label(), "TRAP");
        assert_eq!(BaitKind::Other.label(), "OTHER");
    }

    #[test]
    fn bait_identity_is_its_cell() {
        let b = Bait::new(Cell::new(4, 9), GEM_SCORE);
        assert_eq!(b.key(), Cell::new(4, 9).key());
        assert!(!b.is_trap());
        assert!(Bait::new(Cell::new(0, 0), TRAP_SCORE).is_trap());
    }
}

#[cfg(test)]
mod config {
    use crate::config::CANDIDATE_MASK_WIDTH;
    use crate::{BotConfig, ConfigError};

    #[test]
    fn defaults_validate() {
        let cfg = BotConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_depth, 40);
        assert_eq!(cfg.max_expansions, 6_000);
        assert_eq!(cfg.candidate_baits, 24);
        assert_eq!(cfg.switch_factor(), 1.25);
    }

    #[test]
    fn candidate_cap_is_mask_clamped() {
        let cfg = BotConfig {
            candidate_baits: 1_000,
            ..BotConfig::default()
        };
        assert_eq!(cfg.candidate_cap(), CANDIDATE_MASK_WIDTH);
    }

    #[test]
    fn zero_budget_rejected() {
        let cfg = BotConfig {
            planner_budget_ms: 0,
            ..BotConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "planner_budget_ms"
            })
        );
    }

    #[test]
    fn margin_over_100_rejected() {
        let cfg = BotConfig {
            switch_margin_percent: 150,
            ..BotConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MarginOutOfRange(150)));
    }
}
