//! Typed fallback source for world state.
//!
//! Event plumbing can lag behind reality: we may be asked for a move before
//! the first bait event or self snapshot has arrived.  A `WorldProvider` is
//! the typed interface a host supplies at construction for exactly that gap
//! — the bot never reaches into host internals for it.

use mazebot_core::Bait;
use mazebot_world::AgentSnapshot;

/// Host-supplied world state, consulted only when the registries are empty.
///
/// All methods default to "nothing available", so `()` is a valid provider
/// for hosts whose event plumbing is complete.
pub trait WorldProvider: Send + Sync {
    /// Our own agent, when the host knows it and the registry does not.
    fn own_agent(&self) -> Option<AgentSnapshot> {
        None
    }

    /// Every other agent currently known to the host.
    fn other_agents(&self) -> Vec<AgentSnapshot> {
        Vec::new()
    }

    /// All live baits, for a one-shot registry resync.
    fn baits(&self) -> Vec<Bait> {
        Vec::new()
    }
}

impl WorldProvider for () {}
