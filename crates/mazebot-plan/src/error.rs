//! Planner error type.
//!
//! Every variant means "no plan this tick" to the coordinator, which then
//! falls back to its last-resort policy.  A grid that has not arrived yet is
//! handled one level up (the coordinator never constructs a request without a
//! grid snapshot), and an exhausted search budget is *not* an error — the
//! planner returns its best-so-far node instead.

use thiserror::Error;

/// Reasons a planning invocation produced nothing to execute.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("no candidate baits to plan for")]
    NoCandidates,

    #[error("search found no positive-reward node")]
    NoPositivePlan,
}

pub type PlanningResult<T> = Result<T, PlanError>;
