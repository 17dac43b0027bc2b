//! Agent registry: the own-agent latch plus every other agent on the grid.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mazebot_core::{AgentId, Cell, Facing};
use tracing::debug;

/// Immutable view of one agent at one instant.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub cell: Cell,
    pub facing: Facing,
    pub nick: Option<String>,
}

impl AgentSnapshot {
    pub fn new(id: AgentId, cell: Cell, facing: Facing) -> Self {
        Self {
            id,
            cell,
            facing,
            nick: None,
        }
    }

    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = Some(nick.into());
        self
    }
}

/// What happened to an agent, as reported by the server.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AgentEventKind {
    Appear,
    Vanish,
    Step,
    Turn,
    Teleport,
}

/// One agent event from the server stream.
#[derive(Clone, Debug)]
pub struct AgentEvent {
    pub kind: AgentEventKind,
    /// Position before the event, when the server provides one.
    pub old_position: Option<Cell>,
    /// State after the event.
    pub snapshot: AgentSnapshot,
    /// Teleport flavor reported by the server; opaque to the bot.
    pub teleport_kind: Option<String>,
    /// Agent that caused this event (e.g. pushed us through a portal).
    pub caused_by: Option<AgentId>,
}

struct Inner {
    own_id: Option<AgentId>,
    agents: HashMap<AgentId, AgentSnapshot>,
}

/// Thread-safe registry mirroring server agent events.
///
/// The own id is latched on login and cleared on self-vanish.  An agent is
/// never reported as both self and other: [`others`][Self::others] excludes
/// the latched id.
pub struct AgentBoard {
    inner: RwLock<Inner>,
}

impl Default for AgentBoard {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                own_id: None,
                agents: HashMap::new(),
            }),
        }
    }
}

impl AgentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch our own agent id (login).
    pub fn set_self(&self, id: AgentId) {
        self.write().own_id = Some(id);
    }

    /// Invalidate the own-id latch and drop the own snapshot (self vanish).
    pub fn clear_self(&self) {
        let mut inner = self.write();
        if let Some(id) = inner.own_id.take() {
            inner.agents.remove(&id);
        }
    }

    pub fn own_id(&self) -> Option<AgentId> {
        self.read().own_id
    }

    /// Store or replace an agent snapshot.
    pub fn update(&self, snapshot: AgentSnapshot) {
        self.write().agents.insert(snapshot.id, snapshot);
    }

    /// Apply a server event to the registry.
    pub fn apply(&self, event: AgentEvent) {
        if let Some(kind) = &event.teleport_kind {
            debug!(agent = %event.snapshot.id, kind, "teleport event");
        }
        match event.kind {
            AgentEventKind::Vanish => self.remove(event.snapshot.id),
            AgentEventKind::Appear
            | AgentEventKind::Step
            | AgentEventKind::Turn
            | AgentEventKind::Teleport => self.update(event.snapshot),
        }
    }

    /// Drop an agent from the registry.
    pub fn remove(&self, id: AgentId) {
        self.write().agents.remove(&id);
    }

    /// Snapshot of our own agent, if the id is latched and known.
    pub fn own(&self) -> Option<AgentSnapshot> {
        let inner = self.read();
        inner.own_id.and_then(|id| inner.agents.get(&id).cloned())
    }

    /// Snapshots of all agents other than self, in ascending id order.
    pub fn others(&self) -> Vec<AgentSnapshot> {
        let inner = self.read();
        let mut out: Vec<AgentSnapshot> = inner
            .agents
            .values()
            .filter(|a| Some(a.id) != inner.own_id)
            .cloned()
            .collect();
        out.sort_by_key(|a| a.id);
        out
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
