//! HammerCharge: orbit out of reach, then commit to a straight-line charge.
//!
//! ```text
//! Positioning ──(timer out, slot claimed)──▶ WindingUp ──(windup done)──▶ Charging
//!      ▲                                                                   │
//!      └──────────────(cooldown done)────── Cooldown ◀──(hit / miss)───────┘
//! ```
//!
//! The attack timer only counts down while the agent is within
//! `orbit_max` of the target and has a clear line to it.  A hit shortens
//! the cooldown; a miss lengthens it.  The agent cannot be hit while
//! positioning.

use hd_agent::{AgentContext, Tuning, clamp_tunable};
use hd_steer::{cooldown, execute_charge, orbit, reset_charge, stop_attack, windup};
use tracing::debug;

use crate::common::{clamp_non_negative, respawn_if_far, strike};
use crate::{Behavior, Services};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HammerChargeConfig {
    pub tuning:              Tuning,
    pub orbit_min:           f32,
    pub orbit_max:           f32,
    pub orbit_direction:     f32,
    /// Seconds of in-range, unobstructed orbiting before a charge.
    pub attack_delay:        f32,
    pub windup_time:         f32,
    /// Charge speed as a multiple of `max_speed`.
    pub charge_speed:        f32,
    pub max_charge_distance: f32,
    pub cooldown_time:       f32,
    /// Cooldown multiplier after a hit.
    pub hit_recovery:        f32,
    /// Cooldown multiplier after a miss.
    pub miss_penalty:        f32,
    pub damage:              f32,
}

impl Default for HammerChargeConfig {
    fn default() -> Self {
        Self {
            tuning:              Tuning::default(),
            orbit_min:           8.0,
            orbit_max:           12.0,
            orbit_direction:     1.0,
            attack_delay:        2.0,
            windup_time:         1.0,
            charge_speed:        2.5,
            max_charge_distance: 25.0,
            cooldown_time:       2.0,
            hit_recovery:        0.5,
            miss_penalty:        1.5,
            damage:              3.0,
        }
    }
}

impl HammerChargeConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        clamp_tunable("orbit_min", &mut self.orbit_min);
        clamp_tunable("orbit_max", &mut self.orbit_max);
        if self.orbit_max < self.orbit_min {
            self.orbit_max = self.orbit_min;
        }
        clamp_non_negative("attack_delay", &mut self.attack_delay);
        clamp_tunable("windup_time", &mut self.windup_time);
        clamp_tunable("charge_speed", &mut self.charge_speed);
        clamp_tunable("max_charge_distance", &mut self.max_charge_distance);
        clamp_tunable("cooldown_time", &mut self.cooldown_time);
        clamp_tunable("hit_recovery", &mut self.hit_recovery);
        clamp_tunable("miss_penalty", &mut self.miss_penalty);
        clamp_non_negative("damage", &mut self.damage);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HammerState {
    Positioning { attack_timer: f32 },
    WindingUp,
    Charging,
    Cooldown { duration: f32 },
}

#[derive(Clone, Debug)]
pub struct HammerCharge {
    config:   HammerChargeConfig,
    state:    HammerState,
    last_hit: Option<bool>,
}

impl HammerCharge {
    pub fn new(config: HammerChargeConfig) -> Self {
        let state = HammerState::Positioning { attack_timer: config.attack_delay };
        Self { config, state, last_hit: None }
    }

    pub fn state(&self) -> HammerState {
        self.state
    }

    /// Outcome of the most recent charge: `Some(true)` for a hit.
    pub fn last_hit(&self) -> Option<bool> {
        self.last_hit
    }

    pub fn config(&self) -> &HammerChargeConfig {
        &self.config
    }

    fn enter(&mut self, ctx: &AgentContext, next: HammerState) {
        debug!(agent = %ctx.id, from = ?self.state, to = ?next, "hammer");
        self.state = next;
    }

    fn finish_charge(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>, hit: bool) {
        svc.arbiter.release(ctx.id);
        self.last_hit = Some(hit);
        let scale = if hit { self.config.hit_recovery } else { self.config.miss_penalty };
        self.enter(ctx, HammerState::Cooldown { duration: self.config.cooldown_time * scale });
    }
}

impl Behavior for HammerCharge {
    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        let cfg = &self.config;
        match self.state {
            HammerState::Positioning { attack_timer } => {
                ctx.hittable = false;
                if respawn_if_far(ctx) {
                    return;
                }

                let mut timer = attack_timer;
                let within = ctx.distance_to_target <= cfg.orbit_max;
                if within
                    && !svc.spatial.raycast_blocked(
                        ctx.position,
                        ctx.target_position,
                        ctx.layer,
                        Some(ctx.id),
                    )
                {
                    timer -= ctx.dt;
                }
                if timer <= 0.0 && svc.arbiter.try_claim(ctx.id) {
                    ctx.hittable = true;
                    self.enter(ctx, HammerState::WindingUp);
                    return;
                }
                self.state = HammerState::Positioning { attack_timer: timer };
                orbit(ctx, svc.spatial, cfg.orbit_min, cfg.orbit_max, cfg.orbit_direction, 1.0);
            }

            HammerState::WindingUp => {
                ctx.hittable = true;
                if windup(ctx, cfg.windup_time) {
                    self.enter(ctx, HammerState::Charging);
                }
            }

            HammerState::Charging => {
                ctx.hittable = true;
                if ctx.in_attack_range() {
                    let damage = cfg.damage;
                    strike(ctx, svc, damage);
                    self.finish_charge(ctx, svc, true);
                } else if execute_charge(ctx, svc.spatial, cfg.charge_speed, cfg.max_charge_distance) {
                    self.finish_charge(ctx, svc, false);
                }
            }

            HammerState::Cooldown { duration } => {
                ctx.hittable = true;
                if cooldown(ctx, svc.spatial, duration, cfg.orbit_min, cfg.orbit_max) {
                    let delay = cfg.attack_delay;
                    self.enter(ctx, HammerState::Positioning { attack_timer: delay });
                }
            }
        }
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        reset_charge(ctx);
        stop_attack(ctx);
    }

    fn interrupt(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        reset_charge(ctx);
        let delay = self.config.attack_delay;
        self.enter(ctx, HammerState::Positioning { attack_timer: delay });
    }

    fn is_committed(&self) -> bool {
        matches!(self.state, HammerState::WindingUp | HammerState::Charging)
    }
}
