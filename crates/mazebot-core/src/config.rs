//! Bot tuning configuration.
//!
//! Defaults reproduce the tuning the planner was balanced around; an
//! application typically loads overrides from a JSON/TOML file and calls
//! [`BotConfig::validate`] once at startup.

use std::time::Duration;

use crate::error::ConfigError;

/// Width of the planner's collected-bait bitmask: the hard upper bound on
/// candidates per plan.
pub const CANDIDATE_MASK_WIDTH: usize = 64;

/// All tuning knobs for one bot instance.
///
/// The struct is plain data: it carries no behavior beyond validation, and
/// identical configs always produce identical decisions (there is no RNG).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BotConfig {
    /// Planner lookahead in ticks.
    pub max_depth: u32,

    /// Planner node-expansion budget per phase.
    pub max_expansions: u32,

    /// Candidate baits considered per plan.  Clamped to
    /// [`CANDIDATE_MASK_WIDTH`] by [`candidate_cap`][Self::candidate_cap].
    pub candidate_baits: usize,

    /// Utility cost of one action.
    pub move_cost: f64,

    /// Additional utility penalty per trap cell entered in the
    /// trap-permitted phase.
    pub trap_step_penalty: f64,

    /// How many ticks a committed target is retained under hysteresis.
    pub commit_window_ticks: u64,

    /// Relative improvement (percent) a new target must clear to replace a
    /// committed one inside the commit window.
    pub switch_margin_percent: u32,

    /// Planner wall-clock budget per phase, in milliseconds.
    pub planner_budget_ms: u64,

    /// Upper bound on opponents the contest predictor runs a search for.
    pub max_tracked_opponents: usize,

    /// How many ticks a conflict cell stays in danger memory.
    pub danger_memory_ttl_ticks: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_depth: 40,
            max_expansions: 6_000,
            candidate_baits: 24,
            move_cost: 6.0,
            trap_step_penalty: 250.0,
            commit_window_ticks: 20,
            switch_margin_percent: 25,
            planner_budget_ms: 8,
            max_tracked_opponents: 4,
            danger_memory_ttl_ticks: 250,
        }
    }
}

impl BotConfig {
    /// Check the configuration for values the planner cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::NonPositive { field: "max_depth" });
        }
        if self.max_expansions == 0 {
            return Err(ConfigError::NonPositive { field: "max_expansions" });
        }
        if self.candidate_baits == 0 {
            return Err(ConfigError::NonPositive { field: "candidate_baits" });
        }
        if self.planner_budget_ms == 0 {
            return Err(ConfigError::NonPositive { field: "planner_budget_ms" });
        }
        if self.switch_margin_percent > 100 {
            return Err(ConfigError::MarginOutOfRange(self.switch_margin_percent));
        }
        Ok(())
    }

    /// Candidate count actually used per plan (mask-width clamped).
    #[inline]
    pub fn candidate_cap(&self) -> usize {
        self.candidate_baits.min(CANDIDATE_MASK_WIDTH)
    }

    /// Planner wall-clock budget as a `Duration`.
    #[inline]
    pub fn planner_budget(&self) -> Duration {
        Duration::from_millis(self.planner_budget_ms)
    }

    /// Switch margin as the multiplier `1 + α`.
    #[inline]
    pub fn switch_factor(&self) -> f64 {
        1.0 + self.switch_margin_percent as f64 / 100.0
    }
}
