//! Configuration error type.
//!
//! Runtime errors never cross the tick boundary (the coordinator maps them to
//! legal actions locally), so the only fallible surface in this crate is
//! configuration validation.

use thiserror::Error;

/// Rejected [`BotConfig`][crate::BotConfig] values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("switch_margin_percent {0} outside supported range 0..=100")]
    MarginOutOfRange(u32),
}
