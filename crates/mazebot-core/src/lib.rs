//! `mazebot-core` — foundational types for the mazebot workspace.
//!
//! This crate is a dependency of every other `mazebot-*` crate.  It
//! intentionally has no workspace dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                           |
//! |------------|----------------------------------------------------|
//! | [`action`] | `Action` — the four legal per-tick outputs         |
//! | [`bait`]   | `Bait`, `BaitKind`, the canonical score table      |
//! | [`cell`]   | `Cell`, packed 64-bit map keys                     |
//! | [`config`] | `BotConfig` + validation                           |
//! | [`error`]  | `ConfigError`                                      |
//! | [`facing`] | `Facing` — cardinal orientation + rotations        |
//! | [`ids`]    | `AgentId`                                          |
//! | [`time`]   | `Tick`                                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod action;
pub mod bait;
pub mod cell;
pub mod config;
pub mod error;
pub mod facing;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::Action;
pub use bait::{Bait, BaitKind};
pub use cell::Cell;
pub use config::BotConfig;
pub use error::ConfigError;
pub use facing::Facing;
pub use ids::AgentId;
pub use time::Tick;
