//! `AttackSlotArbiter` — caps how many agents may commit to an attack at
//! once.

use std::collections::BTreeSet;

use hd_core::AgentId;
use tracing::trace;

/// Engaged-agent cap used when none is configured.
pub const DEFAULT_CAPACITY: usize = 3;

/// A bounded set of engaged agents.
///
/// `count() <= capacity()` always holds.  Claiming a slot already held and
/// releasing one not held are both no-ops, so every exit path (normal
/// finish, despawn, behavior swap) may release without checking first.
/// A full arbiter is the expected "back off" signal, not an error.
#[derive(Clone, Debug)]
pub struct AttackSlotArbiter {
    capacity: usize,
    holders:  BTreeSet<AgentId>,
}

impl Default for AttackSlotArbiter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl AttackSlotArbiter {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, holders: BTreeSet::new() }
    }

    /// Claim a slot for `agent`.
    ///
    /// Returns `true` if `agent` already held one or a free slot was taken,
    /// `false` if the arbiter is full.
    pub fn try_claim(&mut self, agent: AgentId) -> bool {
        if self.holders.contains(&agent) {
            return true;
        }
        if self.holders.len() >= self.capacity {
            return false;
        }
        self.holders.insert(agent);
        trace!(%agent, engaged = self.holders.len(), "attack slot claimed");
        true
    }

    /// Give back `agent`'s slot.  Returns whether it held one.
    pub fn release(&mut self, agent: AgentId) -> bool {
        let held = self.holders.remove(&agent);
        if held {
            trace!(%agent, engaged = self.holders.len(), "attack slot released");
        }
        held
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.holders.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.holders.len() >= self.capacity
    }

    #[inline]
    pub fn holds(&self, agent: AgentId) -> bool {
        self.holders.contains(&agent)
    }

    /// Engaged agents in id order.
    pub fn holders(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.holders.iter().copied()
    }
}
