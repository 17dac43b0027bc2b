//! Unit tests for mazebot-world.
//!
//! All tests use hand-written maze rows; no server traffic is involved.

#[cfg(test)]
mod grid_parsing {
    use crate::MazeGrid;

    #[test]
    fn single_char_stride() {
        let grid = MazeGrid::parse(5, 2, &["..#..", "#...#"], false).unwrap();
        assert!(grid.walkable(0, 0));
        assert!(!grid.walkable(2, 0));
        assert!(!grid.walkable(0, 1));
        assert!(grid.walkable(2, 1));
    }

    #[test]
    fn double_char_stride() {
        // 2W characters: cell char + separator.
        let grid = MazeGrid::parse(3, 1, &[". # . "], false).unwrap();
        assert!(grid.walkable(0, 0));
        assert!(!grid.walkable(1, 0));
        assert!(grid.walkable(2, 0));
    }

    #[test]
    fn double_char_stride_without_trailing_separator() {
        // 2W − 1 characters.
        let grid = MazeGrid::parse(3, 1, &[". # ."], false).unwrap();
        assert!(grid.walkable(0, 0));
        assert!(!grid.walkable(1, 0));
        assert!(grid.walkable(2, 0));
    }

    #[test]
    fn multi_char_stride() {
        // 3 chars per cell.
        let grid = MazeGrid::parse(2, 1, &[".__#__"], false).unwrap();
        assert!(grid.walkable(0, 0));
        assert!(!grid.walkable(1, 0));
    }

    #[test]
    fn ragged_row_clamps_and_blocks_missing_cells() {
        // Row shorter than W with no stride match: stride 1, tail blocked.
        let grid = MazeGrid::parse(4, 1, &[".."], false).unwrap();
        assert!(grid.walkable(0, 0));
        assert!(grid.walkable(1, 0));
        assert!(!grid.walkable(2, 0));
        assert!(!grid.walkable(3, 0));
    }

    #[test]
    fn missing_rows_are_blocked() {
        let grid = MazeGrid::parse(2, 3, &[".."], false).unwrap();
        assert!(grid.walkable(0, 0));
        assert!(!grid.walkable(0, 1));
        assert!(!grid.walkable(0, 2));
    }

    #[test]
    fn block_character_set() {
        for c in ['#', 'X', 'W', '?', 'O', 'o', '1', '█', '■'] {
            let row = format!("{c}.");
            let grid = MazeGrid::parse(2, 1, &[row], false).unwrap();
            assert!(!grid.walkable(0, 0), "{c:?} should block");
            assert!(grid.walkable(1, 0));
        }
    }

    #[test]
    fn strict_mode_blocks_everything_but_dot() {
        let grid = MazeGrid::parse(3, 1, &[".a "], true).unwrap();
        assert!(grid.walkable(0, 0));
        assert!(!grid.walkable(1, 0));
        assert!(!grid.walkable(2, 0));
    }

    #[test]
    fn out_of_bounds_is_never_walkable() {
        let grid = MazeGrid::parse(2, 2, &["..", ".."], false).unwrap();
        assert!(!grid.walkable(-1, 0));
        assert!(!grid.walkable(0, -1));
        assert!(!grid.walkable(2, 0));
        assert!(!grid.walkable(0, 2));
    }

    #[test]
    fn invalid_dimensions_rejected() {
        assert!(MazeGrid::parse(0, 3, &[".."], false).is_none());
        assert!(MazeGrid::parse(3, -1, &[".."], false).is_none());
    }
}

#[cfg(test)]
mod grid_handle {
    use crate::GridHandle;

    #[test]
    fn starts_not_ready() {
        let handle = GridHandle::new(false);
        assert!(!handle.is_ready());
        assert!(handle.snapshot().is_none());
    }

    #[test]
    fn update_publishes_and_old_snapshot_stays_consistent() {
        let handle = GridHandle::new(false);
        handle.update(2, 1, &[".#"]);
        let old = handle.snapshot().unwrap();

        handle.update(2, 1, &[".."]);
        let new = handle.snapshot().unwrap();

        // The reader holding `old` still sees the original walls.
        assert!(!old.walkable(1, 0));
        assert!(new.walkable(1, 0));
    }

    #[test]
    fn invalid_update_keeps_previous_grid() {
        let handle = GridHandle::new(false);
        handle.update(2, 1, &[".."]);
        handle.update(-5, 1, &[".."]);
        assert_eq!(handle.snapshot().unwrap().width(), 2);
    }
}

#[cfg(test)]
mod bait_board {
    use mazebot_core::{Bait, Cell};

    use crate::{BaitBoard, WorldError};

    #[test]
    fn insert_get_remove_roundtrip() {
        let board = BaitBoard::new();
        board.insert(Bait::new(Cell::new(3, 4), 42)).unwrap();
        assert_eq!(board.get(3, 4).unwrap().score, 42);
        board.remove_at(3, 4);
        assert!(board.get(3, 4).is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn same_coordinate_overwrites() {
        let board = BaitBoard::new();
        board.insert(Bait::new(Cell::new(1, 1), 13)).unwrap();
        board.insert(Bait::new(Cell::new(1, 1), 314)).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(1, 1).unwrap().score, 314);
    }

    #[test]
    fn snapshot_is_a_stable_copy() {
        let board = BaitBoard::new();
        board.insert(Bait::new(Cell::new(0, 0), 13)).unwrap();
        let snap = board.snapshot();
        board.insert(Bait::new(Cell::new(1, 0), 13)).unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn coordinates_outside_any_seen_maze_rejected() {
        let board = BaitBoard::new();
        board.note_maze(5, 5);
        assert_eq!(
            board.insert(Bait::new(Cell::new(9, 0), 13)),
            Err(WorldError::InvalidCoordinate { x: 9, y: 0 })
        );
        assert_eq!(
            board.insert(Bait::new(Cell::new(0, -1), 13)),
            Err(WorldError::InvalidCoordinate { x: 0, y: -1 })
        );
    }

    #[test]
    fn maze_bound_only_grows() {
        let board = BaitBoard::new();
        board.note_maze(10, 10);
        board.note_maze(4, 4);
        // Still valid against the larger maze seen earlier.
        assert!(board.insert(Bait::new(Cell::new(8, 8), 13)).is_ok());
    }

    #[test]
    fn storage_ignores_current_walkability() {
        // No maze noted at all: any non-negative coordinate is accepted.
        let board = BaitBoard::new();
        assert!(board.insert(Bait::new(Cell::new(100, 100), 13)).is_ok());
    }
}

#[cfg(test)]
mod agent_board {
    use mazebot_core::{AgentId, Cell, Facing};

    use crate::{AgentBoard, AgentEvent, AgentEventKind, AgentSnapshot};

    fn snap(id: u32, x: i32, y: i32) -> AgentSnapshot {
        AgentSnapshot::new(AgentId(id), Cell::new(x, y), Facing::North)
    }

    #[test]
    fn own_id_latch() {
        let board = AgentBoard::new();
        assert!(board.own().is_none());

        board.set_self(AgentId(7));
        board.update(snap(7, 1, 1));
        assert_eq!(board.own().unwrap().cell, Cell::new(1, 1));

        board.clear_self();
        assert!(board.own().is_none());
        assert!(board.own_id().is_none());
    }

    #[test]
    fn self_is_never_in_others() {
        let board = AgentBoard::new();
        board.set_self(AgentId(7));
        board.update(snap(7, 1, 1));
        board.update(snap(2, 3, 3));
        board.update(snap(9, 4, 4));

        let others = board.others();
        assert_eq!(others.len(), 2);
        assert!(others.iter().all(|a| a.id != AgentId(7)));
    }

    #[test]
    fn others_are_id_ordered() {
        let board = AgentBoard::new();
        board.update(snap(9, 0, 0));
        board.update(snap(2, 0, 0));
        board.update(snap(5, 0, 0));
        let ids: Vec<_> = board.others().iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn vanish_event_removes() {
        let board = AgentBoard::new();
        board.update(snap(3, 2, 2));
        board.apply(AgentEvent {
            kind: AgentEventKind::Vanish,
            old_position: Some(Cell::new(2, 2)),
            snapshot: snap(3, 2, 2),
            teleport_kind: None,
            caused_by: None,
        });
        assert!(board.others().is_empty());
    }

    #[test]
    fn step_event_moves() {
        let board = AgentBoard::new();
        board.update(snap(3, 2, 2));
        board.apply(AgentEvent {
            kind: AgentEventKind::Step,
            old_position: Some(Cell::new(2, 2)),
            snapshot: snap(3, 2, 1),
            teleport_kind: None,
            caused_by: None,
        });
        assert_eq!(board.others()[0].cell, Cell::new(2, 1));
    }
}
