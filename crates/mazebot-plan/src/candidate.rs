//! Candidate selection: which baits the planner actually reasons about.
//!
//! The candidate set is bounded (≤ the collected-mask width) so the planner's
//! closed-set key stays a single `u64` bitmask.  Traps are never candidates —
//! they become a blocked/penalized overlay instead.

use mazebot_core::{Bait, Cell};
use mazebot_search::{CellOverlay, ContestPredictor, FloodField};

use crate::planner::PlanRequest;

/// One bait admitted to the current plan.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Candidate {
    pub cell: Cell,
    pub key: u64,
    pub score: i32,
}

/// Everything the search phase needs, precomputed once per plan request.
pub(crate) struct PlanInput {
    /// Trap cells flagged as an overlay (phase 1 blocks them, phase 2
    /// charges for them).
    pub traps: CellOverlay,
    /// Candidates in rank order; index = bit position in the collected mask.
    pub candidates: Vec<Candidate>,
    /// Candidate scores sorted descending with their mask bit, for the
    /// optimistic remaining-reward bound.
    pub scores_desc: Vec<(i32, usize)>,
}

impl PlanInput {
    /// Select candidates for `request`.
    ///
    /// Positive-score baits reachable on the plain grid are ranked by
    /// `score / (distance + 2)` descending (ties by coordinate key) and the
    /// top `cap` kept.  A bait that a tracked opponent reaches in strictly
    /// fewer ticks than our own plain distance is contested and dropped.
    /// With `restrict_to` set, only the bait at that key is eligible.
    pub fn build(
        request: &PlanRequest<'_>,
        flood: &mut FloodField,
        cap: usize,
        restrict_to: Option<u64>,
    ) -> PlanInput {
        let grid = request.grid;
        let mut traps = CellOverlay::for_grid(grid);
        flood.compute(grid, request.start);

        let mut ranked: Vec<(f64, Candidate)> = Vec::new();
        for bait in request.baits {
            if !grid.in_bounds(bait.cell.x, bait.cell.y) {
                continue;
            }
            if bait.is_trap() {
                traps.block_cell(bait.cell);
                continue;
            }
            if bait.score <= 0 {
                continue;
            }
            if restrict_to.is_some_and(|key| key != bait.key()) {
                continue;
            }
            let Some(dist) = flood.distance_to(bait.cell.x, bait.cell.y) else {
                continue;
            };
            if is_contested(request.contest, bait, dist) {
                continue;
            }
            let rank = bait.score as f64 / (dist + 2) as f64;
            ranked.push((
                rank,
                Candidate {
                    cell: bait.cell,
                    key: bait.key(),
                    score: bait.score,
                },
            ));
        }

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.key.cmp(&b.1.key)));
        ranked.truncate(cap);

        let candidates: Vec<Candidate> = ranked.into_iter().map(|(_, c)| c).collect();
        let mut scores_desc: Vec<(i32, usize)> =
            candidates.iter().enumerate().map(|(i, c)| (c.score, i)).collect();
        scores_desc.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        PlanInput {
            traps,
            candidates,
            scores_desc,
        }
    }

    /// The candidate occupying `cell_key`, if any.
    pub fn candidate_at(&self, cell_key: u64) -> Option<(usize, &Candidate)> {
        self.candidates
            .iter()
            .enumerate()
            .find(|(_, c)| c.key == cell_key)
    }

    /// Upper bound on reward still collectible in `remaining_moves` moves:
    /// the sum of the best `min(remaining_moves, K)` scores not yet in
    /// `mask`.
    pub fn optimistic_remaining(&self, mask: u64, remaining_moves: u32) -> f64 {
        if remaining_moves == 0 || self.candidates.is_empty() {
            return 0.0;
        }
        let max_picks = (remaining_moves as usize).min(self.candidates.len());
        let mut sum = 0.0;
        let mut picked = 0;
        for &(score, bit) in &self.scores_desc {
            if picked >= max_picks || score <= 0 {
                break;
            }
            if mask & (1u64 << bit) != 0 {
                continue;
            }
            sum += score as f64;
            picked += 1;
        }
        sum
    }
}

/// Contested = some tracked opponent's oriented distance beats our plain
/// distance outright.  A lost race is worth nothing, so the discount is
/// total.
fn is_contested(contest: Option<&ContestPredictor>, bait: &Bait, own_dist: u32) -> bool {
    contest
        .and_then(|c| c.min_opponent_ticks_to(bait.cell.x, bait.cell.y))
        .is_some_and(|opponent_ticks| opponent_ticks < own_dist)
}
