//! `PackRegistry` — owner of every live pack.

use std::collections::BTreeMap;

use hd_core::{AgentId, PackId, SimRng, Vec2};
use tracing::debug;

use crate::{CoordError, CoordResult, PackCoordinator, PackParams};

/// Default member cap for packs formed by the registry.
pub const DEFAULT_MAX_PACK_SIZE: usize = 6;

/// Every live [`PackCoordinator`], keyed by id.
///
/// A coordinator is disbanded the moment its last member leaves; lookups for
/// its id return `None` from then on and the id is never reused.
#[derive(Clone, Debug)]
pub struct PackRegistry {
    packs:         BTreeMap<PackId, PackCoordinator>,
    next_id:       PackId,
    params:        PackParams,
    max_pack_size: usize,
}

impl Default for PackRegistry {
    fn default() -> Self {
        Self::new(PackParams::default(), DEFAULT_MAX_PACK_SIZE)
    }
}

impl PackRegistry {
    pub fn new(params: PackParams, max_pack_size: usize) -> Self {
        Self {
            packs: BTreeMap::new(),
            next_id: PackId(0),
            params,
            max_pack_size: max_pack_size.max(1),
        }
    }

    /// Start an empty pack.
    pub fn create(&mut self) -> PackId {
        let id = self.next_id;
        self.next_id = id.next();
        self.packs.insert(id, PackCoordinator::new(id, self.params.clone()));
        debug!(pack = %id, "pack created");
        id
    }

    /// Add `agent` to `pack` and return its member index.
    ///
    /// # Errors
    ///
    /// [`CoordError::PackNotFound`] for an unknown or disbanded id,
    /// [`CoordError::PackFull`] when the pack is at the size cap.
    pub fn join(&mut self, pack: PackId, agent: AgentId) -> CoordResult<usize> {
        let max = self.max_pack_size;
        let coordinator = self.packs.get_mut(&pack).ok_or(CoordError::PackNotFound(pack))?;
        if let Some(index) = coordinator.index_of(agent) {
            return Ok(index);
        }
        if coordinator.len() >= max {
            return Err(CoordError::PackFull { pack, size: coordinator.len() });
        }
        Ok(coordinator.join(agent))
    }

    /// Put `agent` in the first pack with room, forming a new one if none
    /// has.  Returns the pack id.
    ///
    /// # Errors
    ///
    /// [`CoordError::AlreadyMember`] if `agent` is already in some pack.
    pub fn join_open(&mut self, agent: AgentId) -> CoordResult<PackId> {
        if let Some(existing) = self.pack_of(agent) {
            debug!(%agent, pack = %existing, "agent already packed");
            return Err(CoordError::AlreadyMember(agent));
        }
        let pack = match self.find_open() {
            Some(pack) => pack,
            None       => self.create(),
        };
        self.join(pack, agent)?;
        Ok(pack)
    }

    /// Remove `agent` from `pack`, disbanding the pack if it is now empty.
    /// Returns whether `agent` was a member.  Unknown packs are a no-op.
    pub fn leave(&mut self, pack: PackId, agent: AgentId) -> bool {
        let Some(coordinator) = self.packs.get_mut(&pack) else {
            return false;
        };
        let removed = coordinator.leave(agent);
        if coordinator.is_empty() {
            self.packs.remove(&pack);
            debug!(%pack, "pack disbanded");
        }
        removed
    }

    /// The first pack (lowest id) below the size cap.
    pub fn find_open(&self) -> Option<PackId> {
        self.packs
            .values()
            .find(|c| c.len() < self.max_pack_size)
            .map(PackCoordinator::id)
    }

    /// The pack `agent` belongs to.
    pub fn pack_of(&self, agent: AgentId) -> Option<PackId> {
        self.packs.values().find(|c| c.contains(agent)).map(PackCoordinator::id)
    }

    pub fn get(&self, pack: PackId) -> Option<&PackCoordinator> {
        self.packs.get(&pack)
    }

    pub fn get_mut(&mut self, pack: PackId) -> Option<&mut PackCoordinator> {
        self.packs.get_mut(&pack)
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn max_pack_size(&self) -> usize {
        self.max_pack_size
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackCoordinator> {
        self.packs.values()
    }

    /// Advance every pack by `dt`.  Packs update in id order.
    pub fn update_all<F>(&mut self, dt: f32, target: Vec2, rng: &mut SimRng, position_of: F)
    where
        F: Fn(AgentId) -> Option<Vec2>,
    {
        for coordinator in self.packs.values_mut() {
            coordinator.update(dt, target, rng, &position_of);
        }
    }
}
