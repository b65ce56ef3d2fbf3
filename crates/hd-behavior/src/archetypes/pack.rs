//! Pack members: local FSMs driven by their pack coordinator's phase.
//!
//! Both agents join the first open pack on enter and leave it on exit.
//! Each tick they read the phase, ring, and slot angle their coordinator
//! left at the end of the previous tick and pick a sub-behavior:
//!
//! | Phase      | `PackFormationAgent`           | `PiranhaPackAgent`                   |
//! |------------|--------------------------------|--------------------------------------|
//! | Circling   | form up on the pack's ring     | school up where the ring meets the pack center |
//! | Closing    | pack-chase the close slot      | weave toward the close slot          |
//! | Swarming   | chase and attack once released | weave in and bite once released      |
//! | Regrouping | form up, report formed         | school up, report formed             |
//!
//! Formation rings are centred on the members' mean position, so the
//! formation travels with the pack.  Close slots stay centred on the target.

use hd_agent::{AgentContext, Tuning, clamp_tunable};
use hd_coord::PackPhase;
use hd_core::{PackId, Vec2};
use hd_steer::{
    attack, chase, form_up, move_towards, pack_chase, slot_position, stop_attack, zigzag,
};
use tracing::{debug, warn};

use crate::common::{Cooldown, clamp_non_negative, respawn_if_far, strike};
use crate::{Behavior, BehaviorResult, Services};

/// What a member reads from its coordinator each tick.
#[derive(Copy, Clone, Debug)]
struct PackView {
    phase:          PackPhase,
    center:         Vec2,
    ring:           f32,
    members:        usize,
    angle:          f32,
    close_distance: f32,
    released:       bool,
}

/// The membership half shared by both pack agents.
#[derive(Clone, Debug, Default)]
struct Membership {
    pack:       Option<PackId>,
    last_phase: Option<PackPhase>,
}

impl Membership {
    fn join(&mut self, ctx: &AgentContext, svc: &mut Services<'_>) {
        match svc.packs.join_open(ctx.id) {
            Ok(pack) => {
                debug!(agent = %ctx.id, %pack, "joined pack");
                self.pack = Some(pack);
            }
            Err(err) => warn!(agent = %ctx.id, %err, "could not join a pack"),
        }
    }

    fn leave(&mut self, ctx: &AgentContext, svc: &mut Services<'_>) {
        if let Some(pack) = self.pack.take() {
            svc.packs.leave(pack, ctx.id);
        }
    }

    /// Read the coordinator; rejoin if the pack has gone.
    fn view(&mut self, ctx: &AgentContext, svc: &mut Services<'_>) -> Option<PackView> {
        let live = self.pack.and_then(|p| svc.packs.get(p)).is_some_and(|c| c.contains(ctx.id));
        if !live {
            self.pack = None;
            self.join(ctx, svc);
        }
        let coordinator = svc.packs.get(self.pack?)?;
        let view = PackView {
            phase:          coordinator.phase(),
            center:         coordinator.center(),
            ring:           coordinator.ring_radius(),
            members:        coordinator.len(),
            angle:          coordinator.formation_angle(ctx.id)?,
            close_distance: coordinator.params().close_distance,
            released:       coordinator.swarm_released(ctx.id),
        };
        if self.last_phase != Some(view.phase) {
            debug!(agent = %ctx.id, phase = %view.phase, "pack member phase");
            self.last_phase = Some(view.phase);
        }
        Some(view)
    }

    fn report_formed(&self, ctx: &AgentContext, svc: &mut Services<'_>, formed: bool) {
        if let Some(coordinator) = self.pack.and_then(|p| svc.packs.get_mut(p)) {
            coordinator.report_formed(ctx.id, formed);
        }
    }
}

// ── PackFormationAgent ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackFormationConfig {
    pub tuning:          Tuning,
    /// Speed scale while forming up.
    pub formation_scale: f32,
    /// Speed scale while swarming.
    pub swarm_scale:     f32,
    pub damage:          f32,
    pub attack_interval: f32,
}

impl Default for PackFormationConfig {
    fn default() -> Self {
        Self {
            tuning:          Tuning::default(),
            formation_scale: 0.6,
            swarm_scale:     1.3,
            damage:          1.0,
            attack_interval: 1.0,
        }
    }
}

impl PackFormationConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        clamp_tunable("formation_scale", &mut self.formation_scale);
        clamp_tunable("swarm_scale", &mut self.swarm_scale);
        clamp_non_negative("damage", &mut self.damage);
        clamp_tunable("attack_interval", &mut self.attack_interval);
    }
}

#[derive(Clone, Debug)]
pub struct PackFormationAgent {
    config:       PackFormationConfig,
    membership:   Membership,
    attack_timer: Cooldown,
}

impl PackFormationAgent {
    pub fn new(config: PackFormationConfig) -> Self {
        Self { config, membership: Membership::default(), attack_timer: Cooldown::ready() }
    }

    pub fn pack(&self) -> Option<PackId> {
        self.membership.pack
    }

    pub fn config(&self) -> &PackFormationConfig {
        &self.config
    }
}

impl Behavior for PackFormationAgent {
    fn on_enter(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) -> BehaviorResult<()> {
        self.membership.join(ctx, svc);
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.attack_timer.tick(ctx.dt);
        ctx.hittable = true;
        if respawn_if_far(ctx) {
            return;
        }
        let Some(view) = self.membership.view(ctx, svc) else {
            chase(ctx, svc.spatial);
            return;
        };

        let target = ctx.target_position;
        // A lone member's center is itself, so it rings the target instead.
        let anchor = if view.members >= 2 { view.center } else { target };
        let ring_slot = slot_position(anchor, view.angle, view.ring);
        let close_slot = slot_position(target, view.angle, view.close_distance);
        match view.phase {
            PackPhase::Circling => {
                stop_attack(ctx);
                form_up(ctx, svc.spatial, ring_slot, self.config.formation_scale);
            }
            PackPhase::Closing => {
                stop_attack(ctx);
                pack_chase(ctx, svc.spatial, close_slot, 1.0);
            }
            PackPhase::Swarming if view.released => {
                if ctx.in_attack_range_max() {
                    attack(ctx);
                    if self.attack_timer.is_ready() {
                        strike(ctx, svc, self.config.damage);
                        self.attack_timer.reset(self.config.attack_interval);
                    }
                } else {
                    stop_attack(ctx);
                    let scale = self.config.swarm_scale;
                    move_towards(ctx, svc.spatial, target, scale);
                }
            }
            PackPhase::Swarming => {
                pack_chase(ctx, svc.spatial, close_slot, 1.0);
            }
            PackPhase::Regrouping => {
                stop_attack(ctx);
                let formed = form_up(ctx, svc.spatial, ring_slot, self.config.formation_scale);
                self.membership.report_formed(ctx, svc, formed);
            }
        }
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.membership.leave(ctx, svc);
        svc.arbiter.release(ctx.id);
        stop_attack(ctx);
    }
}

// ── PiranhaPackAgent ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PiranhaPackConfig {
    pub tuning:           Tuning,
    /// Radius of the school around its anchor point.
    pub school_spread:    f32,
    pub formation_scale:  f32,
    pub zigzag_amplitude: f32,
    pub zigzag_frequency: f32,
    pub bite_damage:      f32,
    pub bite_interval:    f32,
}

impl Default for PiranhaPackConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning {
                max_speed:         6.0,
                speed:             3.0,
                attack_range:      1.0,
                attack_range_max:  1.5,
                separation_radius: 1.0,
                max_health:        2.0,
                ..Tuning::default()
            },
            school_spread:    2.0,
            formation_scale:  0.8,
            zigzag_amplitude: 1.0,
            zigzag_frequency: 6.0,
            bite_damage:      0.5,
            bite_interval:    0.5,
        }
    }
}

impl PiranhaPackConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        clamp_tunable("school_spread", &mut self.school_spread);
        clamp_tunable("formation_scale", &mut self.formation_scale);
        clamp_non_negative("zigzag_amplitude", &mut self.zigzag_amplitude);
        clamp_tunable("zigzag_frequency", &mut self.zigzag_frequency);
        clamp_non_negative("bite_damage", &mut self.bite_damage);
        clamp_tunable("bite_interval", &mut self.bite_interval);
    }
}

#[derive(Clone, Debug)]
pub struct PiranhaPackAgent {
    config:     PiranhaPackConfig,
    membership: Membership,
    bite_timer: Cooldown,
}

impl PiranhaPackAgent {
    pub fn new(config: PiranhaPackConfig) -> Self {
        Self { config, membership: Membership::default(), bite_timer: Cooldown::ready() }
    }

    pub fn pack(&self) -> Option<PackId> {
        self.membership.pack
    }

    pub fn config(&self) -> &PiranhaPackConfig {
        &self.config
    }

    /// A slot in the school, which gathers on the ring at the point nearest
    /// the pack center.
    fn school_slot(&self, target: Vec2, view: &PackView) -> Vec2 {
        let mut out = view.center - target;
        if out.length_squared() == 0.0 {
            out = Vec2::from_angle(view.angle);
        }
        let anchor = target + out.normalize_or_zero() * view.ring;
        slot_position(anchor, view.angle, self.config.school_spread)
    }
}

impl Behavior for PiranhaPackAgent {
    fn on_enter(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) -> BehaviorResult<()> {
        self.membership.join(ctx, svc);
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.bite_timer.tick(ctx.dt);
        ctx.hittable = true;
        if respawn_if_far(ctx) {
            return;
        }
        let Some(view) = self.membership.view(ctx, svc) else {
            chase(ctx, svc.spatial);
            return;
        };

        let target = ctx.target_position;
        let (amp, freq) = (self.config.zigzag_amplitude, self.config.zigzag_frequency);
        let close_slot = slot_position(target, view.angle, view.close_distance);
        match view.phase {
            PackPhase::Circling => {
                stop_attack(ctx);
                let slot = self.school_slot(target, &view);
                form_up(ctx, svc.spatial, slot, self.config.formation_scale);
            }
            PackPhase::Closing => {
                stop_attack(ctx);
                zigzag(ctx, svc.spatial, amp, freq, Some(close_slot), 1.0);
            }
            PackPhase::Swarming if view.released => {
                if ctx.in_attack_range_max() {
                    attack(ctx);
                    if self.bite_timer.is_ready() {
                        strike(ctx, svc, self.config.bite_damage);
                        self.bite_timer.reset(self.config.bite_interval);
                    }
                } else {
                    stop_attack(ctx);
                    zigzag(ctx, svc.spatial, amp, freq, None, 1.0);
                }
            }
            PackPhase::Swarming => {
                zigzag(ctx, svc.spatial, amp, freq, Some(close_slot), 1.0);
            }
            PackPhase::Regrouping => {
                stop_attack(ctx);
                let slot = self.school_slot(target, &view);
                let formed = form_up(ctx, svc.spatial, slot, self.config.formation_scale);
                self.membership.report_formed(ctx, svc, formed);
            }
        }
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.membership.leave(ctx, svc);
        svc.arbiter.release(ctx.id);
        stop_attack(ctx);
    }
}
