//! corridor — smallest end-to-end run of the mazebot strategy.
//!
//! Plays the game engine against the bot in-process: publishes a ring maze,
//! scatters baits (one of them a trap), walks one scripted opponent around,
//! and pulls `next_move` for a fixed number of ticks, printing what the bot
//! does and what it is chasing.
//!
//! Pass a JSON file as the first argument to override [`BotConfig`] fields:
//!
//! ```text
//! cargo run -p corridor -- tuning.json
//! ```

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use mazebot_core::bait::{COFFEE_SCORE, FOOD_SCORE, GEM_SCORE, TRAP_SCORE};
use mazebot_core::{Action, AgentId, Bait, BotConfig, Cell, Facing};
use mazebot_strategy::{PlanOverlay, RewardStrategy, Strategy};
use mazebot_world::{AgentEvent, AgentEventKind, AgentSnapshot};

// ── Scenario ──────────────────────────────────────────────────────────────────

const MAZE: &[&str] = &[
    "#########",
    "#.......#",
    "#.#####.#",
    "#.......#",
    "#########",
];

const TICKS: u64 = 40;

const BAITS: &[(i32, i32, i32)] = &[
    (7, 3, GEM_SCORE),
    (7, 1, COFFEE_SCORE),
    (4, 3, FOOD_SCORE),
    (4, 1, TRAP_SCORE),
];

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = load_config()?;
    let overlay = Arc::new(PlanOverlay::new());
    let bot = RewardStrategy::builder(config)
        .visual_sink(overlay.clone())
        .build()
        .context("invalid bot configuration")?;

    // Publish the world the way the event plumbing would.
    let rows: Vec<String> = MAZE.iter().map(|r| r.to_string()).collect();
    bot.on_maze(rows[0].chars().count() as i32, rows.len() as i32, &rows);

    let mut me = AgentSnapshot::new(AgentId(1), Cell::new(1, 1), Facing::East);
    bot.on_self_login(me.clone());

    let mut live_baits: Vec<Bait> = BAITS
        .iter()
        .map(|&(x, y, score)| Bait::new(Cell::new(x, y), score))
        .collect();
    for bait in &live_baits {
        bot.on_bait_appeared(*bait);
    }

    let mut rival = AgentSnapshot::new(AgentId(2), Cell::new(1, 3), Facing::East);
    bot.on_agent(agent_event(AgentEventKind::Appear, &rival));

    let mut score = 0;
    for tick in 1..=TICKS {
        let action = bot.next_move();
        apply(&mut me, action);
        bot.on_self_update(me.clone());

        // Wall-following rival keeps the contest predictor busy.
        walk_rival(&mut rival, &rows);
        bot.on_agent(agent_event(AgentEventKind::Step, &rival));

        // Collect whatever the bot (or the rival) is standing on.
        for who in [me.cell, rival.cell] {
            if let Some(pos) = live_baits.iter().position(|b| b.cell == who) {
                let bait = live_baits.remove(pos);
                if who == me.cell {
                    score += bait.score;
                }
                bot.on_bait_vanished(bait);
            }
        }

        let chasing = overlay
            .snapshot()
            .target_label
            .unwrap_or("-");
        info!(tick, %action, at = %me.cell, target = chasing, score, "tick");
    }

    info!(score, remaining = live_baits.len(), "run finished");
    Ok(())
}

// ── Engine-side helpers ───────────────────────────────────────────────────────

fn load_config() -> Result<BotConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config overrides from {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))
        }
        None => Ok(BotConfig::default()),
    }
}

fn apply(agent: &mut AgentSnapshot, action: Action) {
    match action {
        Action::TurnLeft => agent.facing = agent.facing.left(),
        Action::TurnRight => agent.facing = agent.facing.right(),
        Action::Step => agent.cell = agent.cell.step(agent.facing),
        Action::DoNothing => {}
    }
}

/// Step forward when possible, otherwise turn right and wait a tick.
fn walk_rival(rival: &mut AgentSnapshot, rows: &[String]) {
    let ahead = rival.cell.step(rival.facing);
    if walkable(rows, ahead) {
        rival.cell = ahead;
    } else {
        rival.facing = rival.facing.right();
    }
}

fn walkable(rows: &[String], cell: Cell) -> bool {
    if cell.x < 0 || cell.y < 0 || cell.y >= rows.len() as i32 {
        return false;
    }
    rows[cell.y as usize]
        .chars()
        .nth(cell.x as usize)
        .is_some_and(|c| c == '.')
}

fn agent_event(kind: AgentEventKind, snapshot: &AgentSnapshot) -> AgentEvent {
    AgentEvent {
        kind,
        old_position: None,
        snapshot: snapshot.clone(),
        teleport_kind: None,
        caused_by: None,
    }
}
