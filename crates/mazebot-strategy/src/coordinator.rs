//! Per-tick decision coordination.
//!
//! The coordinator owns everything the driver thread needs across ticks —
//! planner buffers, target hysteresis, opponent fields, danger memory, the
//! tick counter — and turns one [`WorldView`] snapshot into one legal
//! action.  Classification per tick:
//!
//! - `Executing` — a plan was produced; its first action (possibly replaced
//!   by a last-mile avoidance turn) is emitted.
//! - `Fallback`  — no plan; step forward if possible, else turn left, so the
//!   bot never looks stuck.
//!
//! The `Idle`/`Paused` states are classified by the strategy wrapper before
//! a `WorldView` can even be built.

use std::sync::Arc;

use mazebot_core::{Action, Bait, BotConfig, Cell, Tick};
use mazebot_plan::{Plan, PlanRequest, PlanningResult, RewardPlanner, TargetStabilizer};
use mazebot_search::{CellOverlay, ContestPredictor};
use mazebot_world::{AgentSnapshot, MazeGrid};
use tracing::{debug, trace};

use crate::DangerMemory;

/// Straight-line approach distance within which a target counts as
/// contested for the post-plan re-check.
const CONTEST_APPROACH_STEPS: i32 = 3;

/// Point-in-time world snapshot one decision works on.
pub struct WorldView {
    pub grid: Arc<MazeGrid>,
    pub baits: Vec<Bait>,
    pub own: AgentSnapshot,
    pub others: Vec<AgentSnapshot>,
}

/// Which branch of the per-tick state machine produced the action.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DecisionState {
    Idle,
    Paused,
    Executing,
    Fallback,
}

/// One tick's outcome: the action plus the data the visualization needs.
#[derive(Debug)]
pub struct Decision {
    pub action: Action,
    pub state: DecisionState,
    pub plan: Option<Plan>,
}

impl Decision {
    /// A do-nothing decision for the pre-planning states.
    pub fn inert(state: DecisionState) -> Decision {
        Decision {
            action: Action::DoNothing,
            state,
            plan: None,
        }
    }
}

/// Driver-thread decision state.  One instance per bot; not shared.
pub struct DecisionCoordinator {
    config: BotConfig,
    planner: RewardPlanner,
    stabilizer: TargetStabilizer,
    contest: ContestPredictor,
    danger: DangerMemory,
    tick: Tick,
}

impl DecisionCoordinator {
    pub fn new(config: BotConfig) -> Self {
        Self {
            planner: RewardPlanner::new(config.clone()),
            stabilizer: TargetStabilizer::new(),
            contest: ContestPredictor::new(),
            danger: DangerMemory::new(config.danger_memory_ttl_ticks),
            tick: Tick::ZERO,
            config,
        }
    }

    /// Ticks counted so far (one per [`decide`][Self::decide] call).
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Produce this tick's decision.
    pub fn decide(&mut self, world: &WorldView) -> Decision {
        self.tick.advance();
        let now = self.tick;

        // A bait that vanished during the previous decision must be
        // un-committed before the planner runs.
        self.stabilizer.sync(&world.baits);

        let mut occupied = CellOverlay::for_grid(&world.grid);
        for other in &world.others {
            occupied.block_cell(other.cell);
        }
        self.danger.stamp(&mut occupied, now);

        self.contest.compute(
            &world.grid,
            world.own.cell,
            &world.others,
            self.config.max_tracked_opponents,
        );

        match self.plan_tick(world, &occupied, now) {
            Ok(plan) => {
                let action =
                    self.last_mile(plan.first_action, plan.permits_traps, world, &occupied, now);
                trace!(%now, %action, utility = plan.utility, "executing plan");
                Decision {
                    action,
                    state: DecisionState::Executing,
                    plan: Some(plan),
                }
            }
            Err(err) => {
                debug!(%now, %err, "no plan, falling back");
                let action = self.fallback(world, &occupied, now);
                Decision {
                    action,
                    state: DecisionState::Fallback,
                    plan: None,
                }
            }
        }
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Hysteresis-stabilized plan, with one re-plan when an opponent is
    /// closing on the chosen target in a straight clear corridor — better to
    /// concede early than to lose the race at the bait.
    fn plan_tick(
        &mut self,
        world: &WorldView,
        occupied: &CellOverlay,
        now: Tick,
    ) -> PlanningResult<Plan> {
        let request = PlanRequest {
            grid: &world.grid,
            baits: &world.baits,
            start: world.own.cell,
            facing: world.own.facing,
            occupied: Some(occupied),
            contest: Some(&self.contest),
        };
        let plan = self.stabilizer.select(&mut self.planner, &request, now)?;

        let Some(target) = plan.target else {
            return Ok(plan);
        };
        if !is_target_contested(target, &world.grid, occupied, &world.others) {
            return Ok(plan);
        }

        debug!(%target, "target contested at close range, re-planning without it");
        let filtered: Vec<Bait> = world
            .baits
            .iter()
            .copied()
            .filter(|b| b.cell != target)
            .collect();
        self.stabilizer.clear();
        let alt_request = PlanRequest {
            baits: &filtered,
            ..request
        };
        match self.stabilizer.select(&mut self.planner, &alt_request, now) {
            Ok(alt) => Ok(alt),
            // Nothing else worth going for: stick with the contested plan.
            Err(_) => Ok(plan),
        }
    }

    // ── Last-mile collision avoidance ─────────────────────────────────────

    /// Re-check a planned `Step` against the live world just before emitting
    /// it.  Substitutes a rotation when the forward cell is no longer
    /// admissible under the plan's mode, or when an opponent's forward cell
    /// coincides with ours for the next tick.
    fn last_mile(
        &mut self,
        planned: Action,
        permits_traps: bool,
        world: &WorldView,
        occupied: &CellOverlay,
        now: Tick,
    ) -> Action {
        if planned != Action::Step {
            return planned;
        }

        let own = &world.own;
        let forward = own.cell.step(own.facing);
        let forward_ok = cell_admissible(forward, permits_traps, world, occupied);
        let head_on = world
            .others
            .iter()
            .any(|other| other.cell.step(other.facing) == forward);

        if forward_ok && !head_on {
            return planned;
        }

        // Remember the conflict cell so the next plans route around it.
        if head_on || occupied.is_blocked(forward.x, forward.y) {
            self.danger.mark(forward, now);
        }

        let left_ok = cell_admissible(own.cell.step(own.facing.left()), permits_traps, world, occupied);
        let right_ok =
            cell_admissible(own.cell.step(own.facing.right()), permits_traps, world, occupied);

        match (left_ok, right_ok) {
            // Both clear: left, deterministically.
            (true, _) => Action::TurnLeft,
            (false, true) => Action::TurnRight,
            // Nowhere to turn: emit the planned step and let the engine
            // resolve the collision.
            (false, false) => planned,
        }
    }

    // ── Fallback ──────────────────────────────────────────────────────────

    /// Last-resort policy: step forward when the forward cell is walkable,
    /// otherwise turn left.  Exists purely to avoid the "does nothing"
    /// failure mode.
    fn fallback(&mut self, world: &WorldView, occupied: &CellOverlay, now: Tick) -> Action {
        let forward = world.own.cell.step(world.own.facing);
        if world.grid.walkable(forward.x, forward.y) {
            self.last_mile(Action::Step, true, world, occupied, now)
        } else {
            Action::TurnLeft
        }
    }
}

// ── Admissibility and contest helpers ─────────────────────────────────────────

fn cell_admissible(
    cell: Cell,
    permits_traps: bool,
    world: &WorldView,
    occupied: &CellOverlay,
) -> bool {
    if !world.grid.walkable(cell.x, cell.y) {
        return false;
    }
    if occupied.is_blocked(cell.x, cell.y) {
        return false;
    }
    if !permits_traps
        && world
            .baits
            .iter()
            .any(|b| b.is_trap() && b.cell == cell)
    {
        return false;
    }
    true
}

/// `true` when any opponent is within [`CONTEST_APPROACH_STEPS`] of `target`
/// and approaching it in a straight, clear corridor along its facing.
fn is_target_contested(
    target: Cell,
    grid: &MazeGrid,
    occupied: &CellOverlay,
    others: &[AgentSnapshot],
) -> bool {
    others
        .iter()
        .any(|other| approaches_directly(other, target, grid, occupied))
}

fn approaches_directly(
    agent: &AgentSnapshot,
    target: Cell,
    grid: &MazeGrid,
    occupied: &CellOverlay,
) -> bool {
    let dx = agent.facing.step_dx();
    let dy = agent.facing.step_dy();
    let diff_x = target.x - agent.cell.x;
    let diff_y = target.y - agent.cell.y;

    // The target must lie strictly ahead on the facing axis, close by.
    let ahead = if dx != 0 {
        diff_y == 0 && diff_x * dx > 0 && diff_x.abs() <= CONTEST_APPROACH_STEPS
    } else {
        diff_x == 0 && diff_y * dy > 0 && diff_y.abs() <= CONTEST_APPROACH_STEPS
    };
    if !ahead {
        return false;
    }

    // The corridor up to the target must be walkable and unoccupied.
    let mut cell = agent.cell;
    loop {
        cell = Cell::new(cell.x + dx, cell.y + dy);
        if !grid.walkable(cell.x, cell.y) || occupied.is_blocked(cell.x, cell.y) {
            return false;
        }
        if cell == target {
            return true;
        }
    }
}
