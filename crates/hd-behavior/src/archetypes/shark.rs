//! SharkDefault: weave in, circle with a wobble, and lunge when a slot and
//! a clear line are both available.
//!
//! ```text
//! Approaching ──(within orbit_trigger)──▶ Orbiting ──(timer out, slot, clear line)──▶ Lunging
//!      ▲                                   │   ▲                                       │
//!      └───────(contact lost)──────────────┘   └──────(attack over / contact lost)─────┘
//! ```
//!
//! When the attack timer runs out but the arbiter is full or the line is
//! blocked, the shark retries after `retry_secs` instead of every frame.

use hd_agent::{AgentContext, Tuning, clamp_tunable};
use hd_steer::{attack, move_towards, orbit, stop_attack, zigzag, zigzag_wobble};
use tracing::{debug, trace};

use crate::common::{Cooldown, clamp_non_negative, respawn_if_far, strike};
use crate::{Behavior, Services};

/// Orbiting sharks farther than `orbit_trigger` times this lose contact.
const LOST_CONTACT_FACTOR: f32 = 1.5;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharkDefaultConfig {
    pub tuning:           Tuning,
    /// Distance at which the approach weave turns into an orbit.
    pub orbit_trigger:    f32,
    pub orbit_min:        f32,
    pub orbit_max:        f32,
    pub orbit_direction:  f32,
    pub zigzag_amplitude: f32,
    pub zigzag_frequency: f32,
    /// Amplitude of the orbit radius wobble.
    pub orbit_wobble:     f32,
    /// Seconds of orbiting between lunge attempts.
    pub attack_interval:  f32,
    /// Backoff after a refused lunge attempt.
    pub retry_secs:       f32,
    /// Lunge speed as a multiple of `max_speed`.
    pub lunge_speed:      f32,
    /// Seconds a lunge lasts before the shark peels off.
    pub attack_duration:  f32,
    pub damage:           f32,
    pub damage_interval:  f32,
}

impl Default for SharkDefaultConfig {
    fn default() -> Self {
        Self {
            tuning:           Tuning { max_speed: 6.0, ..Tuning::default() },
            orbit_trigger:    15.0,
            orbit_min:        5.0,
            orbit_max:        8.0,
            orbit_direction:  1.0,
            zigzag_amplitude: 2.0,
            zigzag_frequency: 3.0,
            orbit_wobble:     1.0,
            attack_interval:  3.0,
            retry_secs:       0.5,
            lunge_speed:      1.5,
            attack_duration:  2.0,
            damage:           2.0,
            damage_interval:  0.75,
        }
    }
}

impl SharkDefaultConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        clamp_tunable("orbit_trigger", &mut self.orbit_trigger);
        clamp_tunable("orbit_min", &mut self.orbit_min);
        clamp_tunable("orbit_max", &mut self.orbit_max);
        if self.orbit_max < self.orbit_min {
            self.orbit_max = self.orbit_min;
        }
        clamp_non_negative("zigzag_amplitude", &mut self.zigzag_amplitude);
        clamp_tunable("zigzag_frequency", &mut self.zigzag_frequency);
        clamp_non_negative("orbit_wobble", &mut self.orbit_wobble);
        clamp_non_negative("attack_interval", &mut self.attack_interval);
        clamp_tunable("retry_secs", &mut self.retry_secs);
        clamp_tunable("lunge_speed", &mut self.lunge_speed);
        clamp_tunable("attack_duration", &mut self.attack_duration);
        clamp_non_negative("damage", &mut self.damage);
        clamp_tunable("damage_interval", &mut self.damage_interval);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SharkState {
    Approaching,
    Orbiting { attack_timer: f32 },
    Lunging { elapsed: f32 },
}

#[derive(Clone, Debug)]
pub struct SharkDefault {
    config:       SharkDefaultConfig,
    state:        SharkState,
    damage_timer: Cooldown,
}

impl SharkDefault {
    pub fn new(config: SharkDefaultConfig) -> Self {
        Self { config, state: SharkState::Approaching, damage_timer: Cooldown::ready() }
    }

    pub fn state(&self) -> SharkState {
        self.state
    }

    pub fn config(&self) -> &SharkDefaultConfig {
        &self.config
    }

    fn enter(&mut self, ctx: &AgentContext, next: SharkState) {
        debug!(agent = %ctx.id, from = ?self.state, to = ?next, "shark");
        self.state = next;
    }

    fn peel_off(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        stop_attack(ctx);
        let interval = self.config.attack_interval;
        self.enter(ctx, SharkState::Orbiting { attack_timer: interval });
    }

    /// One orbit step on the wobbling ring.
    fn circle(&self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        let cfg = &self.config;
        let wobble = zigzag_wobble(ctx, cfg.orbit_wobble, cfg.zigzag_frequency);
        orbit(
            ctx,
            svc.spatial,
            cfg.orbit_min + wobble,
            cfg.orbit_max + wobble,
            cfg.orbit_direction,
            1.0,
        );
    }
}

impl Behavior for SharkDefault {
    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.damage_timer.tick(ctx.dt);
        ctx.hittable = true;

        match self.state {
            SharkState::Approaching => {
                if respawn_if_far(ctx) {
                    return;
                }
                if ctx.distance_to_target <= self.config.orbit_trigger {
                    let interval = self.config.attack_interval;
                    self.enter(ctx, SharkState::Orbiting { attack_timer: interval });
                }
                let cfg = &self.config;
                zigzag(ctx, svc.spatial, cfg.zigzag_amplitude, cfg.zigzag_frequency, None, 1.0);
            }

            SharkState::Orbiting { attack_timer } => {
                if respawn_if_far(ctx) {
                    self.enter(ctx, SharkState::Approaching);
                    return;
                }
                if ctx.distance_to_target > self.config.orbit_trigger * LOST_CONTACT_FACTOR {
                    self.enter(ctx, SharkState::Approaching);
                    return;
                }

                let mut timer = attack_timer - ctx.dt;
                if timer <= 0.0 {
                    let clear = !svc.spatial.raycast_blocked(
                        ctx.position,
                        ctx.target_position,
                        ctx.layer,
                        Some(ctx.id),
                    );
                    if clear && svc.arbiter.try_claim(ctx.id) {
                        self.enter(ctx, SharkState::Lunging { elapsed: 0.0 });
                        return;
                    }
                    trace!(agent = %ctx.id, clear, "lunge refused");
                    timer = self.config.retry_secs;
                }
                self.state = SharkState::Orbiting { attack_timer: timer };
                self.circle(ctx, svc);
            }

            SharkState::Lunging { elapsed } => {
                let elapsed = elapsed + ctx.dt;
                if elapsed >= self.config.attack_duration
                    || ctx.distance_to_target > self.config.orbit_trigger
                {
                    self.peel_off(ctx, svc);
                    self.circle(ctx, svc);
                    return;
                }
                self.state = SharkState::Lunging { elapsed };

                if ctx.in_attack_range_max() {
                    attack(ctx);
                    if self.damage_timer.is_ready() {
                        strike(ctx, svc, self.config.damage);
                        self.damage_timer.reset(self.config.damage_interval);
                    }
                } else {
                    stop_attack(ctx);
                    let target = ctx.target_position;
                    move_towards(ctx, svc.spatial, target, self.config.lunge_speed);
                }
            }
        }
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        stop_attack(ctx);
    }

    fn interrupt(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        if matches!(self.state, SharkState::Lunging { .. }) {
            self.peel_off(ctx, svc);
        }
    }

    fn is_committed(&self) -> bool {
        matches!(self.state, SharkState::Lunging { .. })
    }
}
