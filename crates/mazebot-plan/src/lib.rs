//! `mazebot-plan` — the reward planner and target hysteresis.
//!
//! # Two-phase planning
//!
//! Every plan request runs up to two bounded best-first searches over
//! (cell, facing, collected-bait mask):
//!
//! 1. **Trap-forbidden** — trap cells are inadmissible.  Accepted when it
//!    yields strictly positive utility.
//! 2. **Trap-permitted** — trap cells cost their score plus a configured
//!    penalty per trap step.
//!
//! Safe plans are preferred even when a riskier plan would score higher; the
//! second phase exists so a legal, useful move still comes out when every
//! path is risky.
//!
//! | Module         | Contents                                          |
//! |----------------|---------------------------------------------------|
//! | [`planner`]    | `RewardPlanner`, `PlanRequest`, `Plan`            |
//! | [`stabilizer`] | `TargetStabilizer` — commit-window hysteresis     |
//! | [`error`]      | `PlanError`, `PlanningResult`                     |
//!
//! Candidate selection (which baits a plan reasons about) is internal to the
//! crate: callers hand over the full bait snapshot and the planner narrows
//! it per request.

mod candidate;
pub mod error;
pub mod planner;
pub mod stabilizer;


pub use error::{PlanError, PlanningResult};
pub use planner::{Plan, PlanRequest, RewardPlanner};
pub use stabilizer::TargetStabilizer;
