//! `mazebot-strategy` — the engine-facing bot.
//!
//! # Per-tick flow
//!
//! ```text
//! next_move():
//!   ① Snapshot  — grid Arc, bait copy, own + other agents (provider
//!                 fallback when event plumbing hasn't delivered yet).
//!   ② Classify  — paused → DO_NOTHING; maze or self unknown → DO_NOTHING.
//!   ③ Predict   — per-opponent arrival fields, occupancy + danger overlay.
//!   ④ Plan      — two-phase reward plan under target hysteresis.
//!   ⑤ Last mile — forward-cell and head-on collision checks; avoidance
//!                 turn when they fail.
//!   ⑥ Publish   — target + planned path to the visualization sink.
//! ```
//!
//! Event callbacks arrive on the I/O thread and only touch the registries;
//! the decision state (planner buffers, hysteresis, danger memory) lives
//! behind one mutex owned by the driver thread.  `next_move` is infallible:
//! every failure mode ends in one of the four legal actions.
//!
//! | Module          | Contents                                          |
//! |-----------------|---------------------------------------------------|
//! | [`strategy`]    | `Strategy` trait, `RewardStrategy`, builder       |
//! | [`coordinator`] | per-tick state machine + collision avoidance      |
//! | [`viz`]         | `VisualSink`, `PlanOverlay`, `NoopSink`           |
//! | [`control`]     | `ControlState` — the pause flag                   |
//! | [`danger`]      | `DangerMemory` — TTL-bounded conflict cells       |
//! | [`provider`]    | `WorldProvider` — typed host-state fallback       |

pub mod control;
pub mod coordinator;
pub mod danger;
pub mod provider;
pub mod strategy;
pub mod viz;

#[cfg(test)]
mod tests;

pub use control::ControlState;
pub use coordinator::{Decision, DecisionCoordinator, DecisionState, WorldView};
pub use danger::DangerMemory;
pub use provider::WorldProvider;
pub use strategy::{RewardStrategy, Strategy, StrategyBuilder};
pub use viz::{NoopSink, OverlayState, PlanOverlay, VisualSink};
