//! `AgentRuntime` and its tick loop.

use std::collections::{BTreeMap, BTreeSet};

use hd_agent::{AgentSeed, AnimationSink, NullSink, TargetProvider};
use hd_behavior::{
    Archetype, ArchetypeKind, BehaviorConfig, BehaviorInstance, BehaviorSelector, Intent, Services,
};
use hd_coord::{AttackSlotArbiter, PackRegistry};
use hd_core::{AgentId, PackId, SimClock, SimRng, Tick, Vec2};
use hd_spatial::{AgentIndex, EntityRef};
use tracing::{debug, info, trace, warn};

use crate::{
    AgentSnapshot, DespawnReason, RuntimeConfig, RuntimeError, RuntimeObserver, RuntimeResult,
    TickStats,
};

/// Lend the runtime's shared services out by disjoint field borrows, so an
/// agent in `self.agents` can be borrowed mutably at the same time.
macro_rules! services {
    ($rt:ident) => {
        Services {
            spatial: &$rt.index,
            target:  &mut $rt.target,
            arbiter: &mut $rt.arbiter,
            packs:   &mut $rt.packs,
            intents: &mut $rt.intents,
        }
    };
}

/// A lifecycle change waiting to be reported to an observer.
pub(crate) enum AgentEvent {
    Spawned { agent: AgentId, kind: ArchetypeKind },
    Despawned { agent: AgentId, kind: ArchetypeKind, reason: DespawnReason },
}

// ── AgentRuntime ──────────────────────────────────────────────────────────────

/// Owns one [`BehaviorInstance`] per agent plus every shared service, and
/// drives the tick loop:
///
/// 1. **Index**: rebuild the spatial index from end-of-previous-tick
///    positions; snapshot every agent's frame.
/// 2. **Update**: `update` for every agent in ascending id order.  Agents
///    already dead at this point get one last update (for death
///    reactions) and are despawned in step 5.
/// 3. **Packs**: advance every pack coordinator.
/// 4. **Late update**: the cosmetic pass.
/// 5. **Apply**: apply queued intents in emission order (explosions
///    damage other agents, despawns remove the emitter), then despawn the
///    agents found dead in step 2.  Every removal runs `exit` first.
///
/// Create via [`RuntimeBuilder`][crate::RuntimeBuilder].
pub struct AgentRuntime<T: TargetProvider> {
    pub(crate) config:      RuntimeConfig,
    pub(crate) clock:       SimClock,
    pub(crate) rng:         SimRng,
    pub(crate) target:      T,
    /// Where the target was last seen; used while it cannot be resolved.
    pub(crate) last_target: Vec2,
    pub(crate) index:       AgentIndex,
    pub(crate) arbiter:     AttackSlotArbiter,
    pub(crate) packs:       PackRegistry,
    pub(crate) agents:      BTreeMap<AgentId, BehaviorInstance>,
    pub(crate) next_id:     AgentId,
    pub(crate) intents:     Vec<(AgentId, Intent)>,
    pub(crate) events:      Vec<AgentEvent>,
}

impl<T: TargetProvider> AgentRuntime<T> {
    // ── Spawn / despawn ───────────────────────────────────────────────────

    /// Spawn an agent running `config` at `position`.
    ///
    /// Never fails: an agent whose behavior cannot enter (the target is
    /// unavailable) is kept, inert, so one bad spawn cannot stall the loop.
    pub fn create_agent(&mut self, config: impl Into<BehaviorConfig>, position: Vec2) -> AgentId {
        self.create_agent_with_anim(config, position, Box::new(NullSink))
    }

    /// [`create_agent`](Self::create_agent) with an animation sink.
    pub fn create_agent_with_anim(
        &mut self,
        config:   impl Into<BehaviorConfig>,
        position: Vec2,
        anim:     Box<dyn AnimationSink>,
    ) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();

        let seed = AgentSeed::new(id, position, self.config.sim.seed).with_anim(anim);
        let mut instance = BehaviorInstance::new(config.into());
        let kind = instance.kind();
        if let Err(err) = instance.enter(seed, &mut services!(self)) {
            warn!(agent = %id, %kind, %err, "agent entered inert");
        }
        info!(agent = %id, %kind, at = %position, "agent spawned");
        self.agents.insert(id, instance);
        self.events.push(AgentEvent::Spawned { agent: id, kind });
        id
    }

    /// Choose a config from `selector` with the runtime RNG and spawn it.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::EmptyPool`] if no entry is enabled.
    pub fn spawn_from_pool(&mut self, selector: &BehaviorSelector, position: Vec2) -> RuntimeResult<AgentId> {
        let config = selector.choose(&mut self.rng).ok_or(RuntimeError::EmptyPool)?.clone();
        Ok(self.create_agent(config, position))
    }

    /// Remove an agent, running its `exit` first.  Returns `false` if it
    /// was not present.
    pub fn destroy_agent(&mut self, agent: AgentId) -> bool {
        self.despawn(agent, DespawnReason::Destroyed)
    }

    /// Replace an agent's behavior in place.
    ///
    /// The old behavior exits (releasing its attack slot and pack), then
    /// the new one enters with the same position, health, RNG stream, and
    /// animation sink.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::AgentNotFound`] for an unknown handle.  A new
    /// behavior that cannot enter is kept inert and reported as
    /// [`RuntimeError::Behavior`].
    pub fn swap_behavior(&mut self, agent: AgentId, config: impl Into<BehaviorConfig>) -> RuntimeResult<()> {
        let instance = self.agents.get_mut(&agent).ok_or(RuntimeError::AgentNotFound(agent))?;
        let seed = instance.exit(&mut services!(self)).ok_or(RuntimeError::AgentNotFound(agent))?;

        let old_kind = instance.kind();
        let mut next = BehaviorInstance::new(config.into());
        let result = next.enter(seed, &mut services!(self));
        info!(%agent, from = %old_kind, to = %next.kind(), "behavior swapped");
        *instance = next;
        result.map_err(RuntimeError::from)
    }

    /// Deal `amount` damage to an agent.  Returns whether it landed (the
    /// agent may be unhittable or already dead).
    ///
    /// The behavior sees the damage on its next update.
    pub fn damage_agent(&mut self, agent: AgentId, amount: f32) -> RuntimeResult<bool> {
        let ctx = self
            .agents
            .get_mut(&agent)
            .and_then(BehaviorInstance::context_mut)
            .ok_or(RuntimeError::AgentNotFound(agent))?;
        let landed = ctx.apply_damage(amount);
        debug!(%agent, amount, landed, dead = ctx.is_dead(), "agent damaged");
        Ok(landed)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current tick to `config.sim.end_tick()`.
    pub fn run<O: RuntimeObserver>(&mut self, observer: &mut O) -> RuntimeResult<()> {
        while self.clock.current_tick < self.config.sim.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: RuntimeObserver>(&mut self, n: u64, observer: &mut O) -> RuntimeResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Advance one tick.
    pub fn step<O: RuntimeObserver>(&mut self, observer: &mut O) -> RuntimeResult<TickStats> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.flush_events(now, observer);

        let dt = self.clock.tick_dt_secs;
        self.clock.advance();
        let time = self.clock.elapsed_secs();

        // ── Index and frame ───────────────────────────────────────────────
        let target = match self.target.target_position() {
            Some(p) => {
                self.last_target = p;
                p
            }
            None => {
                trace!(tick = %now, "target unavailable; using last known position");
                self.last_target
            }
        };
        self.rebuild_index()?;

        let mut dead_before = Vec::new();
        for (&id, instance) in &mut self.agents {
            instance.frame(target, dt, time);
            if instance.context().is_some_and(|c| c.is_dead()) {
                dead_before.push(id);
            }
        }

        // ── Update ────────────────────────────────────────────────────────
        for instance in self.agents.values_mut() {
            instance.update(&mut services!(self));
        }

        // ── Packs ─────────────────────────────────────────────────────────
        let agents = &self.agents;
        self.packs.update_all(dt, target, &mut self.rng, |id| {
            agents.get(&id).and_then(BehaviorInstance::context).map(|c| c.position)
        });

        // ── Late update ───────────────────────────────────────────────────
        for instance in self.agents.values_mut() {
            instance.late_update();
        }

        // ── Apply ─────────────────────────────────────────────────────────
        let mut despawned = 0;
        let mut self_destructed = BTreeSet::new();
        for (emitter, intent) in std::mem::take(&mut self.intents) {
            match intent {
                Intent::Explode { center, radius, damage } => self.explode(emitter, center, radius, damage),
                Intent::Despawn => {
                    self_destructed.insert(emitter);
                }
            }
        }
        for id in self_destructed {
            despawned += usize::from(self.despawn(id, DespawnReason::SelfDestructed));
        }
        for id in dead_before {
            despawned += usize::from(self.despawn(id, DespawnReason::Died));
        }
        self.flush_events(now, observer);

        let stats = TickStats {
            tick:          now,
            agents:        self.agents.len(),
            engaged:       self.arbiter.count(),
            packs:         self.packs.len(),
            despawned,
            target_health: self.target.health_fraction(),
        };
        trace!(tick = %now, agents = stats.agents, engaged = stats.engaged, packs = stats.packs, "tick done");
        observer.on_tick_end(&stats);

        let interval = self.config.sim.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.snapshot());
        }
        Ok(stats)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn agent(&self, agent: AgentId) -> Option<&BehaviorInstance> {
        self.agents.get(&agent)
    }

    /// Every live agent in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &BehaviorInstance)> {
        self.agents.iter().map(|(&id, instance)| (id, instance))
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.agents.contains_key(&agent)
    }

    pub fn position_of(&self, agent: AgentId) -> Option<Vec2> {
        self.agents.get(&agent).and_then(BehaviorInstance::context).map(|c| c.position)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn arbiter(&self) -> &AttackSlotArbiter {
        &self.arbiter
    }

    pub fn packs(&self) -> &PackRegistry {
        &self.packs
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The spatial index as of the start of the last tick.
    pub fn index(&self) -> &AgentIndex {
        &self.index
    }

    /// The current state of every agent.
    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.agents
            .iter()
            .filter_map(|(&id, instance)| {
                let ctx = instance.context()?;
                Some(AgentSnapshot {
                    agent:    id,
                    kind:     instance.kind(),
                    position: ctx.position,
                    health:   ctx.health,
                    hittable: ctx.hittable,
                    engaged:  self.arbiter.holds(id),
                    inert:    instance.is_inert(),
                    control:  instance.control(),
                    pack:     pack_of(instance.archetype()),
                    scratch:  ctx.scratch_kind(),
                })
            })
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn rebuild_index(&mut self) -> RuntimeResult<()> {
        let bodies = self.agents.values().filter_map(BehaviorInstance::context).filter_map(|c| {
            if c.position.is_finite() {
                Some(EntityRef { agent: c.id, position: c.position, layer: c.layer })
            } else {
                warn!(agent = %c.id, "non-finite position left out of the index");
                None
            }
        });
        self.index = AgentIndex::build(bodies, self.config.body_radius)?;
        Ok(())
    }

    /// Damage every agent but `emitter` within `radius` of `center`.
    fn explode(&mut self, emitter: AgentId, center: Vec2, radius: f32, damage: f32) {
        let mut hit = 0;
        for (&id, instance) in &mut self.agents {
            if id == emitter {
                continue;
            }
            let Some(ctx) = instance.context_mut() else { continue };
            if ctx.position.distance(center) <= radius && ctx.apply_damage(damage) {
                hit += 1;
            }
        }
        debug!(%emitter, at = %center, radius, damage, hit, "explosion applied");
    }

    fn despawn(&mut self, agent: AgentId, reason: DespawnReason) -> bool {
        let Some(mut instance) = self.agents.remove(&agent) else {
            return false;
        };
        instance.exit(&mut services!(self));
        let kind = instance.kind();
        info!(%agent, %kind, reason = reason.as_str(), "agent despawned");
        self.events.push(AgentEvent::Despawned { agent, kind, reason });
        true
    }

    fn flush_events<O: RuntimeObserver>(&mut self, now: Tick, observer: &mut O) {
        for event in self.events.drain(..) {
            match event {
                AgentEvent::Spawned { agent, kind } => observer.on_agent_spawned(now, agent, kind),
                AgentEvent::Despawned { agent, kind, reason } => {
                    observer.on_agent_despawned(now, agent, kind, reason)
                }
            }
        }
    }
}

fn pack_of(archetype: &Archetype) -> Option<PackId> {
    match archetype {
        Archetype::PackFormation(a) => a.pack(),
        Archetype::PiranhaPack(a)   => a.pack(),
        _                           => None,
    }
}

