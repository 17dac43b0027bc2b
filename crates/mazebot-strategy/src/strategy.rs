//! The engine-facing strategy surface.

use std::sync::{Arc, Mutex, PoisonError};

use mazebot_core::{Action, Bait, BotConfig, ConfigError};
use mazebot_world::{AgentBoard, AgentEvent, AgentSnapshot, BaitBoard, GridHandle};
use tracing::debug;

use crate::coordinator::{Decision, DecisionCoordinator, DecisionState, WorldView};
use crate::{ControlState, NoopSink, VisualSink, WorldProvider};

// ── Strategy trait ────────────────────────────────────────────────────────────

/// The capability surface the game engine drives.
///
/// One required method: [`next_move`][Self::next_move], pulled once per
/// server tick from the driver thread.  The `on_*` hooks arrive on the I/O
/// thread and default to no-ops so partial implementations stay valid.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: events and decisions come from
/// different threads, and the engine shares one instance between them.
pub trait Strategy: Send + Sync {
    /// Produce this tick's action.
    ///
    /// Infallible by contract: when the maze or our own agent is unknown the
    /// answer is `DO_NOTHING`, never an error.
    fn next_move(&self) -> Action;

    /// A new maze arrived (one row per y, top-down).
    fn on_maze(&self, _width: i32, _height: i32, _rows: &[String]) {}

    fn on_bait_appeared(&self, _bait: Bait) {}
    fn on_bait_vanished(&self, _bait: Bait) {}

    fn on_self_login(&self, _snapshot: AgentSnapshot) {}
    fn on_self_update(&self, _snapshot: AgentSnapshot) {}
    fn on_self_vanish(&self) {}

    /// Another agent appeared, vanished, stepped, turned, or teleported.
    fn on_agent(&self, _event: AgentEvent) {}

    fn on_pause_toggle(&self, _paused: bool) {}
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`RewardStrategy`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                       |
/// |-------------------------|-------------------------------|
/// | `.visual_sink(s)`       | [`NoopSink`]                  |
/// | `.world_provider(p)`    | `()` — provides nothing       |
/// | `.strict_maze_parsing()`| off — fixed block set only    |
pub struct StrategyBuilder {
    config: BotConfig,
    strict_parsing: bool,
    viz: Arc<dyn VisualSink>,
    provider: Box<dyn WorldProvider>,
}

impl StrategyBuilder {
    pub fn new(config: BotConfig) -> Self {
        Self {
            config,
            strict_parsing: false,
            viz: Arc::new(NoopSink),
            provider: Box::new(()),
        }
    }

    /// Treat every non-`'.'` maze character as blocked.
    pub fn strict_maze_parsing(mut self) -> Self {
        self.strict_parsing = true;
        self
    }

    /// Where target and planned-path data is published each tick.
    pub fn visual_sink(mut self, sink: Arc<dyn VisualSink>) -> Self {
        self.viz = sink;
        self
    }

    /// Typed fallback source consulted when the registries are still empty.
    pub fn world_provider(mut self, provider: Box<dyn WorldProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Validate the configuration and assemble the strategy.
    pub fn build(self) -> Result<RewardStrategy, ConfigError> {
        self.config.validate()?;
        Ok(RewardStrategy {
            grid: GridHandle::new(self.strict_parsing),
            baits: BaitBoard::new(),
            agents: AgentBoard::new(),
            control: ControlState::new(),
            viz: self.viz,
            provider: self.provider,
            driver: Mutex::new(DecisionCoordinator::new(self.config)),
        })
    }
}

// ── RewardStrategy ────────────────────────────────────────────────────────────

/// The reward-planning bot: registries + planner + hysteresis wired behind
/// the [`Strategy`] surface.
///
/// Registries are internally synchronized and written by the event hooks;
/// the decision state sits behind one mutex taken only by `next_move`.
pub struct RewardStrategy {
    grid: GridHandle,
    baits: BaitBoard,
    agents: AgentBoard,
    control: ControlState,
    viz: Arc<dyn VisualSink>,
    provider: Box<dyn WorldProvider>,
    driver: Mutex<DecisionCoordinator>,
}

impl RewardStrategy {
    /// Strategy with default sink and provider.
    pub fn new(config: BotConfig) -> Result<Self, ConfigError> {
        StrategyBuilder::new(config).build()
    }

    pub fn builder(config: BotConfig) -> StrategyBuilder {
        StrategyBuilder::new(config)
    }

    /// The pause flag the control panel toggles.
    pub fn control(&self) -> &ControlState {
        &self.control
    }

    /// Full per-tick decision, for hosts that want the classification and
    /// plan data alongside the action.
    pub fn decide(&self) -> Decision {
        if self.control.is_paused() {
            self.clear_viz();
            return Decision::inert(DecisionState::Paused);
        }

        let Some(grid) = self.grid.snapshot() else {
            self.clear_viz();
            return Decision::inert(DecisionState::Idle);
        };

        let own = self.agents.own().or_else(|| {
            // Event plumbing hasn't delivered us yet: ask the provider and
            // latch what it knows.
            let snapshot = self.provider.own_agent()?;
            self.agents.set_self(snapshot.id);
            self.agents.update(snapshot.clone());
            Some(snapshot)
        });
        let Some(own) = own else {
            self.clear_viz();
            return Decision::inert(DecisionState::Idle);
        };

        if self.baits.is_empty() {
            self.baits.refresh_from(self.provider.baits());
        }
        let baits = self.baits.snapshot();

        let mut others = self.agents.others();
        if others.is_empty() {
            others = self.provider.other_agents();
            others.retain(|a| a.id != own.id && a.cell != own.cell);
            others.sort_by_key(|a| a.id);
        }

        let world = WorldView {
            grid,
            baits,
            own,
            others,
        };
        let decision = self
            .driver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .decide(&world);

        match &decision.plan {
            Some(plan) => {
                match plan.target {
                    Some(target) => self.viz.set_target(target, plan.target_label),
                    None => self.viz.clear_target(),
                }
                self.viz.set_planned_path(&plan.path);
            }
            None => self.clear_viz(),
        }
        decision
    }

    fn clear_viz(&self) {
        self.viz.clear_target();
        self.viz.set_planned_path(&[]);
    }
}

impl Strategy for RewardStrategy {
    fn next_move(&self) -> Action {
        self.decide().action
    }

    fn on_maze(&self, width: i32, height: i32, rows: &[String]) {
        self.grid.update(width, height, rows);
        self.baits.note_maze(width, height);
    }

    fn on_bait_appeared(&self, bait: Bait) {
        if let Err(err) = self.baits.insert(bait) {
            debug!(%err, "dropping bait event");
        }
    }

    fn on_bait_vanished(&self, bait: Bait) {
        self.baits.remove_at(bait.cell.x, bait.cell.y);
    }

    fn on_self_login(&self, snapshot: AgentSnapshot) {
        self.agents.set_self(snapshot.id);
        self.agents.update(snapshot);
    }

    fn on_self_update(&self, snapshot: AgentSnapshot) {
        if self.agents.own_id().is_none() {
            self.agents.set_self(snapshot.id);
        }
        self.agents.update(snapshot);
    }

    fn on_self_vanish(&self) {
        self.agents.clear_self();
    }

    fn on_agent(&self, event: AgentEvent) {
        self.agents.apply(event);
    }

    fn on_pause_toggle(&self, paused: bool) {
        self.control.set_paused(paused);
    }
}
