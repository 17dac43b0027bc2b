//! Reward-driven bounded best-first planner.
//!
//! # Search space
//!
//! Nodes are (cell, facing, collected-candidate mask) plus bookkeeping; the
//! open set is a max-heap on `utility + optimistic_remaining`.  A closed map
//! keyed by (cell, facing, mask) admits a node only when its utility strictly
//! improves on the best recorded for that key, so the search is
//! branch-and-bound rather than exhaustive.
//!
//! # Arena
//!
//! Nodes live in a flat `Vec` and refer to their parent by index — no
//! ownership cycles, no per-node allocation, and the whole tree resets with
//! one `clear` at the next plan.
//!
//! # Termination
//!
//! The loop ends when the heap empties, the expansion budget is spent, or
//! the wall-clock deadline passes.  Running out of budget is not a failure:
//! the best accepted node so far becomes the plan.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use mazebot_core::bait::TRAP_SCORE;
use mazebot_core::{Action, Bait, BaitKind, BotConfig, Cell, Facing};
use mazebot_search::{CellOverlay, ContestPredictor, FloodField};
use mazebot_world::MazeGrid;
use tracing::debug;

use crate::candidate::PlanInput;
use crate::error::{PlanError, PlanningResult};

const EPS: f64 = 1e-9;
const NO_PARENT: usize = usize::MAX;

/// Expansion-kind tags: lower pops first at equal priority, so plans prefer
/// progressing over spinning in place.
const TIE_STEP: u8 = 0;
const TIE_ROOT: u8 = 1;
const TIE_TURN: u8 = 2;

// ── Request / result types ────────────────────────────────────────────────────

/// Input for one planning call.  All borrows are tick-local snapshots.
pub struct PlanRequest<'a> {
    pub grid: &'a MazeGrid,
    pub baits: &'a [Bait],
    pub start: Cell,
    pub facing: Facing,
    /// Cells currently occupied (or remembered as dangerous); steps into
    /// them are inadmissible.
    pub occupied: Option<&'a CellOverlay>,
    /// Opponent arrival-time fields for contested-bait pruning.
    pub contest: Option<&'a ContestPredictor>,
}

/// Result of a planning call.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    /// The action to emit this tick.
    pub first_action: Action,
    /// Utility of the accepted terminal node.
    pub utility: f64,
    /// Cells from start to the terminal node, rotations collapsed.
    pub path: Vec<Cell>,
    /// First candidate cell on the path.
    pub target: Option<Cell>,
    /// Uppercase label for the target bait.
    pub target_label: Option<&'static str>,
    /// Which admissibility produced this plan: `true` iff it came from the
    /// trap-permitted phase.
    pub permits_traps: bool,
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// The planner.  Owns its working memory (flood field, node arena, open
/// heap, closed map) and reuses it across ticks; one instance belongs to the
/// decision thread only.
pub struct RewardPlanner {
    config: BotConfig,
    flood: FloodField,
    arena: Vec<Node>,
    open: BinaryHeap<OpenEntry>,
    best_seen: HashMap<StateKey, f64>,
}

impl RewardPlanner {
    pub fn new(config: BotConfig) -> Self {
        Self {
            config,
            flood: FloodField::new(),
            arena: Vec::new(),
            open: BinaryHeap::new(),
            best_seen: HashMap::with_capacity(4096),
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Two-phase plan: trap-forbidden first, accepted iff its utility is
    /// positive; otherwise trap-permitted.
    pub fn plan(&mut self, request: &PlanRequest<'_>) -> PlanningResult<Plan> {
        self.plan_restricted(request, None)
    }

    /// Like [`plan`][Self::plan], but with the candidate set restricted to
    /// the bait at `committed_key` — used to price a committed target under
    /// current conditions.  `Err` means its utility is absent (vanished,
    /// unreachable, or contested), never a sentinel value.
    pub fn plan_committed(
        &mut self,
        request: &PlanRequest<'_>,
        committed_key: u64,
    ) -> PlanningResult<Plan> {
        self.plan_restricted(request, Some(committed_key))
    }

    fn plan_restricted(
        &mut self,
        request: &PlanRequest<'_>,
        restrict_to: Option<u64>,
    ) -> PlanningResult<Plan> {
        let safe = self.plan_phase(request, true, restrict_to);
        if let Ok(plan) = &safe {
            if plan.utility > 0.0 {
                return safe;
            }
        }
        self.plan_phase(request, false, restrict_to)
    }

    /// One bounded best-first search with traps either forbidden or charged.
    fn plan_phase(
        &mut self,
        request: &PlanRequest<'_>,
        forbid_traps: bool,
        restrict_to: Option<u64>,
    ) -> PlanningResult<Plan> {
        let cap = self.config.candidate_cap();
        let input = PlanInput::build(request, &mut self.flood, cap, restrict_to);
        if input.candidates.is_empty() {
            return Err(PlanError::NoCandidates);
        }

        let deadline = Instant::now() + self.config.planner_budget();

        self.arena.clear();
        self.open.clear();
        self.best_seen.clear();

        let mut search = Search {
            config: &self.config,
            input: &input,
            grid: request.grid,
            occupied: request.occupied,
            forbid_traps,
            arena: &mut self.arena,
            open: &mut self.open,
            best_seen: &mut self.best_seen,
            seq: 0,
        };

        match search.run(request.start, request.facing, deadline) {
            Some((best, utility)) => {
                Ok(build_plan(&self.arena, best, utility, &input, !forbid_traps))
            }
            None => Err(PlanError::NoPositivePlan),
        }
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// One planner node.  `parent == NO_PARENT` marks the root; `first_action`
/// is `Some` exactly when `moves > 0`.
#[derive(Copy, Clone, Debug)]
struct Node {
    cell: Cell,
    facing: Facing,
    moves: u32,
    reward: i32,
    trap_steps: u32,
    mask: u64,
    first_action: Option<Action>,
    parent: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
struct StateKey {
    cell_key: u64,
    facing: u8,
    mask: u64,
}

impl StateKey {
    fn of(node: &Node) -> StateKey {
        StateKey {
            cell_key: node.cell.key(),
            facing: node.facing.index() as u8,
            mask: node.mask,
        }
    }
}

/// Open-heap entry.  Ordering: higher bound first, then step-expansions
/// before turn-expansions, then insertion order — every tie-break explicit
/// so two runs on equal inputs pop identically.
struct OpenEntry {
    node: u32,
    bound: f64,
    utility: f64,
    tie: u8,
    seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bound
            .total_cmp(&other.bound)
            .then_with(|| other.tie.cmp(&self.tie))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Borrow bundle for one search phase, so the expansion helpers can hold
/// disjoint `&mut`s into the planner's reusable buffers.
struct Search<'a> {
    config: &'a BotConfig,
    input: &'a PlanInput,
    grid: &'a MazeGrid,
    occupied: Option<&'a CellOverlay>,
    forbid_traps: bool,
    arena: &'a mut Vec<Node>,
    open: &'a mut BinaryHeap<OpenEntry>,
    best_seen: &'a mut HashMap<StateKey, f64>,
    seq: u64,
}

impl Search<'_> {
    fn run(&mut self, start: Cell, facing: Facing, deadline: Instant) -> Option<(usize, f64)> {
        let root = Node {
            cell: start,
            facing,
            moves: 0,
            reward: 0,
            trap_steps: 0,
            mask: 0,
            first_action: None,
            parent: NO_PARENT,
        };
        let root_utility = self.utility(&root);
        let root_bound = root_utility + self.input.optimistic_remaining(0, self.config.max_depth);
        self.arena.push(root);
        self.best_seen.insert(StateKey::of(&root), root_utility);
        self.open.push(OpenEntry {
            node: 0,
            bound: root_bound,
            utility: root_utility,
            tie: TIE_ROOT,
            seq: 0,
        });

        let mut best: Option<(usize, f64)> = None;
        let mut expansions: u32 = 0;

        while expansions < self.config.max_expansions {
            let Some(entry) = self.open.pop() else { break };
            if Instant::now() > deadline {
                debug!(expansions, "planner wall-clock budget exhausted, returning best-so-far");
                break;
            }
            expansions += 1;

            let index = entry.node as usize;
            let node = self.arena[index];
            if node.moves > self.config.max_depth {
                continue;
            }

            if best.is_none_or(|(_, best_utility)| entry.utility > best_utility + EPS)
                && node.reward > 0
                && node.first_action.is_some()
            {
                best = Some((index, entry.utility));
            }

            self.expand(index);
        }

        best
    }

    fn expand(&mut self, index: usize) {
        let cur = self.arena[index];

        // Rotations: same cell, no reward or mask change.
        self.push_child(
            Node {
                facing: cur.facing.right(),
                moves: cur.moves + 1,
                first_action: cur.first_action.or(Some(Action::TurnRight)),
                parent: index,
                ..cur
            },
            TIE_TURN,
        );
        self.push_child(
            Node {
                facing: cur.facing.left(),
                moves: cur.moves + 1,
                first_action: cur.first_action.or(Some(Action::TurnLeft)),
                parent: index,
                ..cur
            },
            TIE_TURN,
        );

        // Step: only into an admissible cell.
        let dest = cur.cell.step(cur.facing);
        if !self.grid.walkable(dest.x, dest.y) {
            return;
        }
        if self.occupied.is_some_and(|o| o.is_blocked(dest.x, dest.y)) {
            return;
        }
        let on_trap = self.input.traps.is_blocked(dest.x, dest.y);
        if self.forbid_traps && on_trap {
            return;
        }

        let mut reward = cur.reward;
        let mut trap_steps = cur.trap_steps;
        let mut mask = cur.mask;

        if on_trap {
            reward += TRAP_SCORE;
            trap_steps += 1;
        }

        // First visit to a candidate cell collects it.
        if let Some((bit, candidate)) = self.input.candidate_at(dest.key()) {
            let bit_mask = 1u64 << bit;
            if mask & bit_mask == 0 {
                mask |= bit_mask;
                reward += candidate.score;
            }
        }

        self.push_child(
            Node {
                cell: dest,
                moves: cur.moves + 1,
                reward,
                trap_steps,
                mask,
                first_action: cur.first_action.or(Some(Action::Step)),
                parent: index,
                ..cur
            },
            TIE_STEP,
        );
    }

    fn push_child(&mut self, node: Node, tie: u8) {
        if node.moves > self.config.max_depth {
            return;
        }

        let utility = self.utility(&node);
        let key = StateKey::of(&node);
        if let Some(&recorded) = self.best_seen.get(&key) {
            if utility <= recorded + EPS {
                return;
            }
        }
        self.best_seen.insert(key, utility);

        let remaining = self.config.max_depth - node.moves;
        let bound = utility + self.input.optimistic_remaining(node.mask, remaining);
        let index = self.arena.len() as u32;
        self.arena.push(node);
        self.seq += 1;
        self.open.push(OpenEntry {
            node: index,
            bound,
            utility,
            tie,
            seq: self.seq,
        });
    }

    fn utility(&self, node: &Node) -> f64 {
        let mut utility = node.reward as f64 - self.config.move_cost * node.moves as f64;
        if !self.forbid_traps {
            utility -= self.config.trap_step_penalty * node.trap_steps as f64;
        }
        utility
    }
}

// ── Output construction ───────────────────────────────────────────────────────

/// Walk backlinks to the root, producing the de-duplicated cell path and the
/// first candidate-coincident cell as the target.
fn build_plan(
    arena: &[Node],
    best: usize,
    utility: f64,
    input: &PlanInput,
    permits_traps: bool,
) -> Plan {
    let mut reversed: Vec<Cell> = Vec::new();
    let mut index = best;
    loop {
        let node = &arena[index];
        if reversed.last() != Some(&node.cell) {
            reversed.push(node.cell);
        }
        if node.parent == NO_PARENT {
            break;
        }
        index = node.parent;
    }
    reversed.reverse();
    let path = reversed;

    let mut target = None;
    let mut target_label = None;
    for cell in &path {
        if let Some((_, candidate)) = input.candidate_at(cell.key()) {
            target = Some(*cell);
            target_label = Some(BaitKind::from_score(candidate.score).label());
            break;
        }
    }

    Plan {
        first_action: arena[best].first_action.unwrap_or(Action::DoNothing),
        utility,
        path,
        target,
        target_label,
        permits_traps,
    }
}
