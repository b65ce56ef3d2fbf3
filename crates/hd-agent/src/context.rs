//! `AgentContext` — the per-agent blackboard.

use hd_core::{AgentId, AgentRng, FactionLayer, Vec2};
use tracing::trace;

use crate::{AnimFlag, AnimTrigger, AnimationSink, NullSink, Scratch, ScratchSlot, Tuning};

// ── AgentSeed ─────────────────────────────────────────────────────────────────

/// The parts of an agent that outlive any one behavior.
///
/// A spawn builds a seed; `on_enter` turns it into a context; `on_exit`
/// hands it back so a hot-swapped behavior resumes from the same spot, with
/// the same sink and the same wounds.
pub struct AgentSeed {
    pub id:       AgentId,
    pub layer:    FactionLayer,
    pub position: Vec2,
    pub anim:     Box<dyn AnimationSink>,
    pub rng:      AgentRng,
    /// Health carried over from a previous behavior; `None` starts at max.
    pub health:   Option<f32>,
}

impl AgentSeed {
    pub fn new(id: AgentId, position: Vec2, global_seed: u64) -> Self {
        Self {
            id,
            layer:  FactionLayer::Hostile,
            position,
            anim:   Box::new(NullSink),
            rng:    AgentRng::new(global_seed, id),
            health: None,
        }
    }

    pub fn with_anim(mut self, anim: Box<dyn AnimationSink>) -> Self {
        self.anim = anim;
        self
    }

    pub fn with_layer(mut self, layer: FactionLayer) -> Self {
        self.layer = layer;
        self
    }
}

// ── AgentContext ──────────────────────────────────────────────────────────────

/// Everything one agent knows about itself and its target this frame.
///
/// Created by a behavior's `on_enter`, dropped (via [`into_seed`]) by its
/// `on_exit`.  Fields are `pub` for direct access on hot paths; the scratch
/// slot, animation sink, and damage bookkeeping go through methods so their
/// invariants hold.
///
/// [`into_seed`]: AgentContext::into_seed
pub struct AgentContext {
    pub id:                 AgentId,
    pub layer:              FactionLayer,
    pub tuning:             Tuning,

    // ── Frame snapshot (written by `update_frame`) ────────────────────────
    pub position:           Vec2,
    pub target_position:    Vec2,
    pub last_position:      Vec2,
    pub distance_to_target: f32,
    pub dt:                 f32,
    /// Simulated seconds since the run started.
    pub time:               f32,

    // ── Runtime state ─────────────────────────────────────────────────────
    /// Speed applied by the most recent move, in units per second.
    pub velocity:           f32,
    pub hittable:           bool,
    pub health:             f32,
    /// Smoothed orbit angle; `None` until the agent first orbits.
    pub orbit_angle:        Option<f32>,
    pub rng:                AgentRng,

    scratch:        Scratch,
    anim:           Box<dyn AnimationSink>,
    flags:          [bool; AnimFlag::COUNT],
    pending_damage: f32,
    dead:           bool,
}

impl AgentContext {
    /// Build a context from `seed` with the given tunables.
    pub fn new(seed: AgentSeed, tuning: Tuning) -> Self {
        let health = seed.health.unwrap_or(tuning.max_health).min(tuning.max_health);
        Self {
            id:                 seed.id,
            layer:              seed.layer,
            position:           seed.position,
            target_position:    seed.position,
            last_position:      seed.position,
            distance_to_target: 0.0,
            dt:                 0.0,
            time:               0.0,
            velocity:           0.0,
            hittable:           true,
            health,
            orbit_angle:        None,
            rng:                seed.rng,
            scratch:            Scratch::Empty,
            anim:               seed.anim,
            flags:              [false; AnimFlag::COUNT],
            pending_damage:     0.0,
            dead:               health <= 0.0,
            tuning,
        }
    }

    /// Hand back the swap-surviving parts of this agent.
    pub fn into_seed(self) -> AgentSeed {
        AgentSeed {
            id:       self.id,
            layer:    self.layer,
            position: self.position,
            anim:     self.anim,
            rng:      self.rng,
            health:   Some(self.health),
        }
    }

    /// Snapshot the frame: target position, distance, delta time.
    ///
    /// Called once per tick before the agent's behavior runs.
    pub fn update_frame(&mut self, target_position: Vec2, dt: f32, time: f32) {
        self.last_position      = self.position;
        self.target_position    = target_position;
        self.distance_to_target = self.position.distance(target_position);
        self.dt                 = dt;
        self.time               = time;
    }

    /// Unit vector from the agent toward the target (zero if on top of it).
    #[inline]
    pub fn direction_to_target(&self) -> Vec2 {
        (self.target_position - self.position).normalize_or_zero()
    }

    #[inline]
    pub fn in_attack_range(&self) -> bool {
        self.distance_to_target <= self.tuning.attack_range
    }

    #[inline]
    pub fn in_attack_range_max(&self) -> bool {
        self.distance_to_target <= self.tuning.attack_range_max
    }

    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        self.distance_to_target > self.tuning.out_of_range
    }

    // ── Scratch slot ──────────────────────────────────────────────────────

    /// Borrow the scratch memory of primitive `T`, resetting the slot if a
    /// different primitive owned it.
    pub fn scratch<T: ScratchSlot>(&mut self) -> &mut T {
        if T::peek(&self.scratch).is_none() && !self.scratch.is_empty() {
            trace!(agent = %self.id, from = self.scratch.kind(), "scratch slot switched");
        }
        T::claim(&mut self.scratch)
    }

    /// Read the scratch memory of primitive `T` without claiming the slot.
    pub fn peek_scratch<T: ScratchSlot>(&self) -> Option<&T> {
        T::peek(&self.scratch)
    }

    pub fn scratch_kind(&self) -> &'static str {
        self.scratch.kind()
    }

    pub fn clear_scratch(&mut self) {
        self.scratch = Scratch::Empty;
    }

    // ── Animation intents ─────────────────────────────────────────────────

    /// Raise or lower `flag`.  The sink only hears about actual changes.
    pub fn set_flag(&mut self, flag: AnimFlag, on: bool) {
        let slot = &mut self.flags[flag.index()];
        if *slot != on {
            *slot = on;
            self.anim.set_flag(flag, on);
        }
    }

    #[inline]
    pub fn flag(&self, flag: AnimFlag) -> bool {
        self.flags[flag.index()]
    }

    pub fn trigger(&mut self, trigger: AnimTrigger) {
        self.anim.trigger(trigger);
    }

    // ── Damage bookkeeping ────────────────────────────────────────────────

    /// Record incoming damage.  Returns `false` (and changes nothing) when
    /// the agent is not hittable, already dead, or `amount` is not positive.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if !self.hittable || self.dead || !(amount > 0.0) {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.pending_damage += amount;
        if self.health <= 0.0 {
            self.dead = true;
        }
        self.anim.trigger(AnimTrigger::Hurt);
        true
    }

    /// Drain damage recorded since the last call.
    pub fn take_damage(&mut self) -> f32 {
        std::mem::take(&mut self.pending_damage)
    }

    #[inline]
    pub fn pending_damage(&self) -> f32 {
        self.pending_damage
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Own health in `[0, 1]`.
    pub fn health_fraction(&self) -> f32 {
        (self.health / self.tuning.max_health).clamp(0.0, 1.0)
    }
}
