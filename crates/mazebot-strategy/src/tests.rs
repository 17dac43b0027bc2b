//! End-to-end scenario tests for the full strategy.
//!
//! The harness plays the game engine: it feeds maze/bait/agent events, pulls
//! `next_move`, and applies the returned action to its own copy of the bot's
//! position the way the server would.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use mazebot_core::{Action, AgentId, Bait, BotConfig, Cell, Facing};
    use mazebot_world::{AgentEvent, AgentEventKind, AgentSnapshot};

    use crate::{PlanOverlay, RewardStrategy, Strategy};

    /// Default config with a test-proof planner budget.
    pub fn config() -> BotConfig {
        BotConfig {
            planner_budget_ms: 10_000,
            ..BotConfig::default()
        }
    }

    pub struct Harness {
        pub overlay: Arc<PlanOverlay>,
        pub bot: RewardStrategy,
        pub own: AgentSnapshot,
    }

    impl Harness {
        /// Maze published, self logged in at `(x, y)` facing `facing`.
        pub fn new(rows: &[&str], x: i32, y: i32, facing: Facing) -> Harness {
            let overlay = Arc::new(PlanOverlay::new());
            let bot = RewardStrategy::builder(config())
                .visual_sink(overlay.clone())
                .build()
                .unwrap();

            let width = rows[0].len() as i32;
            let height = rows.len() as i32;
            let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
            bot.on_maze(width, height, &rows);

            let own = AgentSnapshot::new(AgentId(1), Cell::new(x, y), facing);
            bot.on_self_login(own.clone());

            Harness { overlay, bot, own }
        }

        pub fn add_bait(&self, x: i32, y: i32, score: i32) {
            self.bot.on_bait_appeared(Bait::new(Cell::new(x, y), score));
        }

        pub fn remove_bait(&self, x: i32, y: i32) {
            self.bot.on_bait_vanished(Bait::new(Cell::new(x, y), 0));
        }

        pub fn add_opponent(&self, id: u32, x: i32, y: i32, facing: Facing) {
            self.bot.on_agent(AgentEvent {
                kind: AgentEventKind::Appear,
                old_position: None,
                snapshot: AgentSnapshot::new(AgentId(id), Cell::new(x, y), facing),
                teleport_kind: None,
                caused_by: None,
            });
        }

        /// Pull a move and apply it to our own position, like the server.
        pub fn tick(&mut self) -> Action {
            let action = self.bot.next_move();
            apply(&mut self.own, action);
            self.bot.on_self_update(self.own.clone());
            action
        }

        /// Pull a move without simulating its effect.
        pub fn tick_in_place(&self) -> Action {
            self.bot.next_move()
        }

        pub fn target(&self) -> Option<Cell> {
            self.overlay.snapshot().target
        }
    }

    pub fn apply(own: &mut AgentSnapshot, action: Action) {
        match action {
            Action::TurnLeft => own.facing = own.facing.left(),
            Action::TurnRight => own.facing = own.facing.right(),
            Action::Step => own.cell = own.cell.step(own.facing),
            Action::DoNothing => {}
        }
    }
}

#[cfg(test)]
mod scenarios {
    use mazebot_core::bait::{COFFEE_SCORE, GEM_SCORE, TRAP_SCORE};
    use mazebot_core::{Action, Cell, Facing};

    use super::helpers::Harness;

    #[test]
    fn s1_corridor_gem_is_four_steps() {
        let mut h = Harness::new(&["....."], 0, 0, Facing::East);
        h.add_bait(4, 0, GEM_SCORE);

        let actions: Vec<Action> = (0..4).map(|_| h.tick()).collect();
        assert_eq!(actions, vec![Action::Step; 4]);
        assert_eq!(h.own.cell, Cell::new(4, 0));
    }

    #[test]
    fn s2_open_room_double_turn_then_step() {
        let mut h = Harness::new(&["...", "...", "..."], 1, 1, Facing::North);
        h.add_bait(1, 2, COFFEE_SCORE);

        let mut actions = Vec::new();
        while h.own.cell != Cell::new(1, 2) {
            actions.push(h.tick());
            assert!(actions.len() <= 5, "took too long: {actions:?}");
        }

        assert_eq!(actions.len(), 3);
        assert!(actions[0].is_rotation());
        assert!(actions[1].is_rotation());
        assert_eq!(actions[2], Action::Step);
        assert_eq!(h.own.cell, Cell::new(1, 2));
    }

    #[test]
    fn s3_trap_is_never_stepped_on() {
        let mut h = Harness::new(
            &[".....", ".....", ".....", ".....", "....."],
            2,
            2,
            Facing::East,
        );
        h.add_bait(4, 2, GEM_SCORE);
        h.add_bait(3, 2, TRAP_SCORE);

        let mut moves = 0;
        while h.own.cell != Cell::new(4, 2) {
            h.tick();
            moves += 1;
            assert_ne!(h.own.cell, Cell::new(3, 2), "stepped onto the trap");
            assert!(moves <= 12, "detour took too long");
        }
        assert_eq!(moves, 7);
    }

    #[test]
    fn s4_contested_gem_is_conceded() {
        let h = Harness::new(&["......."], 0, 0, Facing::East);
        h.add_bait(6, 0, GEM_SCORE);
        // Opponent one step from the gem: the race is lost before it starts.
        h.add_opponent(2, 5, 0, Facing::East);

        let action = h.tick_in_place();
        // Candidate pruned → no plan → fallback steps down the corridor.
        assert_eq!(action, Action::Step);
        assert_eq!(h.target(), None, "conceded bait must not be targeted");
    }

    #[test]
    fn s5_markedly_better_gem_takes_over_the_commit() {
        let h = Harness::new(&[".........."], 4, 0, Facing::West);
        h.add_bait(0, 0, COFFEE_SCORE);

        h.tick_in_place();
        assert_eq!(h.target(), Some(Cell::new(0, 0)));

        // A gem appears the other way; its plan utility dwarfs the committed
        // coffee, so the hysteresis margin is cleared immediately.
        h.add_bait(9, 0, GEM_SCORE);
        h.tick_in_place();
        assert_eq!(h.target(), Some(Cell::new(9, 0)));
    }

    #[test]
    fn s6_vanished_commit_is_not_chased() {
        let h = Harness::new(&["....."], 0, 0, Facing::East);
        h.add_bait(3, 0, COFFEE_SCORE);
        h.add_bait(4, 0, GEM_SCORE);

        h.tick_in_place();
        assert_eq!(h.target(), Some(Cell::new(3, 0)));

        // The committed bait vanishes between decisions.
        h.remove_bait(3, 0);
        h.tick_in_place();
        assert_eq!(h.target(), Some(Cell::new(4, 0)));
    }
}

#[cfg(test)]
mod coordinator {
    use mazebot_core::bait::{GEM_SCORE, TRAP_SCORE};
    use mazebot_core::{Action, Cell, Facing};

    use crate::{OverlayState, Strategy};

    use super::helpers::Harness;

    #[test]
    fn idle_until_maze_and_self_are_known() {
        let bot = crate::RewardStrategy::new(super::helpers::config()).unwrap();
        // No maze, no self.
        assert_eq!(bot.next_move(), Action::DoNothing);

        let rows = vec!["...".to_string()];
        bot.on_maze(3, 1, &rows);
        // Maze but still no self.
        assert_eq!(bot.next_move(), Action::DoNothing);
    }

    #[test]
    fn no_baits_falls_back_to_a_forward_step() {
        let h = Harness::new(&["..."], 0, 0, Facing::East);
        assert_eq!(h.tick_in_place(), Action::Step);
        assert_eq!(h.target(), None);
    }

    #[test]
    fn fallback_turns_left_at_a_wall() {
        let h = Harness::new(&["#.", ".."], 1, 0, Facing::East);
        // Forward is off-grid; fallback rotates instead.
        assert_eq!(h.tick_in_place(), Action::TurnLeft);
    }

    #[test]
    fn only_traps_still_produces_motion() {
        let h = Harness::new(&["..."], 0, 0, Facing::East);
        h.add_bait(2, 0, TRAP_SCORE);
        // Traps are never candidates; phase 2 declines; fallback moves.
        assert_eq!(h.tick_in_place(), Action::Step);
        assert_eq!(h.target(), None);
    }

    #[test]
    fn head_on_conflict_substitutes_a_turn() {
        let h = Harness::new(&["...", "..."], 0, 0, Facing::East);
        h.add_bait(1, 0, GEM_SCORE);
        // Opponent facing us: both forward cells coincide at (1,0).
        h.add_opponent(2, 2, 0, Facing::West);

        // Left of East is North (off-grid); right is South (free).
        assert_eq!(h.tick_in_place(), Action::TurnRight);
    }

    #[test]
    fn pause_suppresses_planning_and_clears_the_overlay() {
        let mut h = Harness::new(&["....."], 0, 0, Facing::East);
        h.add_bait(4, 0, GEM_SCORE);

        assert_eq!(h.tick(), Action::Step);
        assert_ne!(h.overlay.snapshot(), OverlayState::default());

        h.bot.on_pause_toggle(true);
        assert_eq!(h.tick_in_place(), Action::DoNothing);
        assert_eq!(h.overlay.snapshot(), OverlayState::default());

        h.bot.on_pause_toggle(false);
        assert_eq!(h.tick_in_place(), Action::Step);
    }

    #[test]
    fn target_lies_on_the_published_path() {
        let h = Harness::new(&[".....", ".....", "....."], 0, 0, Facing::East);
        h.add_bait(3, 2, GEM_SCORE);

        h.tick_in_place();
        let overlay = h.overlay.snapshot();
        let target = overlay.target.unwrap();
        assert!(overlay.path.contains(&target));
        assert_eq!(overlay.path.first(), Some(&Cell::new(0, 0)));
        for pair in overlay.path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn toggle_flips_the_pause_flag() {
        let h = Harness::new(&["..."], 0, 0, Facing::East);
        let control = h.bot.control();
        assert!(!control.is_paused());
        assert!(control.toggle());
        assert!(control.is_paused());
        assert!(!control.toggle());
        assert!(!control.is_paused());
    }

    #[test]
    fn danger_memory_expires_after_its_ttl() {
        use mazebot_core::Tick;
        use mazebot_search::CellOverlay;
        use mazebot_world::MazeGrid;

        let grid = MazeGrid::parse(3, 1, &["..."], false).unwrap();
        let mut danger = crate::DangerMemory::new(2);
        danger.mark(Cell::new(1, 0), Tick(1));

        let mut overlay = CellOverlay::for_grid(&grid);
        danger.stamp(&mut overlay, Tick(2));
        assert!(overlay.is_blocked(1, 0));

        let mut overlay = CellOverlay::for_grid(&grid);
        danger.stamp(&mut overlay, Tick(3));
        assert!(!overlay.is_blocked(1, 0));
        assert!(danger.is_empty());
    }

    #[test]
    fn identical_inputs_produce_identical_runs() {
        let build = || {
            Harness::new(
                &[".....", ".....", ".....", ".....", "....."],
                2,
                2,
                Facing::East,
            )
        };
        let mut a = build();
        let mut b = build();
        for h in [&a, &b] {
            h.add_bait(4, 2, GEM_SCORE);
            h.add_bait(3, 2, TRAP_SCORE);
            h.add_bait(0, 0, GEM_SCORE);
        }

        let run_a: Vec<_> = (0..10).map(|_| a.tick()).collect();
        let run_b: Vec<_> = (0..10).map(|_| b.tick()).collect();
        assert_eq!(run_a, run_b);
    }
}
