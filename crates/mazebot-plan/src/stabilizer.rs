//! Commit-window target hysteresis.
//!
//! Re-planning every tick is what makes the bot self-correcting, but it also
//! makes it fickle: two baits of similar value can flip the plan every tick
//! and the bot oscillates between them without collecting either.  The
//! stabilizer retains the committed target unless the fresh plan clears a
//! relative improvement margin, the commit window expires, or the committed
//! bait stops being plannable at all.

use mazebot_core::{Bait, Cell, Tick};

use crate::planner::{Plan, PlanRequest, RewardPlanner};
use crate::PlanningResult;

#[derive(Copy, Clone, Debug)]
struct Commitment {
    key: u64,
    until: Tick,
}

/// Per-bot hysteresis state: at most one committed target cell.
#[derive(Default)]
pub struct TargetStabilizer {
    committed: Option<Commitment>,
}

impl TargetStabilizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packed key of the committed target, if any.
    pub fn committed_key(&self) -> Option<u64> {
        self.committed.map(|c| c.key)
    }

    /// Drop the commitment when its bait is no longer in the snapshot.
    ///
    /// Called before planning each tick, so a bait that vanished during the
    /// previous decision can never be re-targeted.
    pub fn sync(&mut self, baits: &[Bait]) {
        if let Some(c) = self.committed {
            if !baits.iter().any(|b| b.key() == c.key) {
                self.committed = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.committed = None;
    }

    /// Plan this tick's move with hysteresis applied.
    ///
    /// Switches away from a committed target iff one of:
    /// - there is no valid committed plan (vanished / unreachable /
    ///   contested — its utility is absent, not a sentinel),
    /// - the fresh plan's utility reaches `committed × (1 + α)`,
    /// - the commit window has expired.
    pub fn select(
        &mut self,
        planner: &mut RewardPlanner,
        request: &PlanRequest<'_>,
        now: Tick,
    ) -> PlanningResult<Plan> {
        let window = planner.config().commit_window_ticks;
        let factor = planner.config().switch_factor();

        let fresh = planner.plan(request);

        let Some(commitment) = self.committed else {
            return self.adopt(fresh, now, window);
        };

        if now >= commitment.until {
            return self.adopt(fresh, now, window);
        }

        // Fresh plan already goes for the committed bait: nothing to decide.
        if let Ok(plan) = &fresh {
            if plan.target.map(Cell::key) == Some(commitment.key) {
                return fresh;
            }
        }

        match (fresh, planner.plan_committed(request, commitment.key)) {
            (Ok(new), Ok(prev)) => {
                if new.utility >= prev.utility * factor {
                    self.commit(new.target, now, window);
                    Ok(new)
                } else {
                    Ok(prev)
                }
            }
            (fresh, Err(_)) => self.adopt(fresh, now, window),
            (Err(_), Ok(prev)) => Ok(prev),
        }
    }

    /// Take the fresh plan as-is and re-anchor the commitment on its target.
    fn adopt(
        &mut self,
        plan: PlanningResult<Plan>,
        now: Tick,
        window: u64,
    ) -> PlanningResult<Plan> {
        match &plan {
            Ok(p) => self.commit(p.target, now, window),
            Err(_) => self.committed = None,
        }
        plan
    }

    fn commit(&mut self, target: Option<Cell>, now: Tick, window: u64) {
        self.committed = target.map(|cell| Commitment {
            key: cell.key(),
            until: now.offset(window),
        });
    }
}
