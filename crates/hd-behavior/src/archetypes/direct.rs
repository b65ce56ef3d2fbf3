//! Direct: chase, and attack once inside max attack range.

use hd_agent::{AgentContext, Tuning, clamp_tunable};
use hd_steer::{attack, chase, stop_attack};

use crate::common::{Cooldown, clamp_non_negative, respawn_if_far, strike};
use crate::{Behavior, Services};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectConfig {
    pub tuning:          Tuning,
    pub damage:          f32,
    /// Seconds between hits while in range.
    pub attack_interval: f32,
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self { tuning: Tuning::default(), damage: 1.0, attack_interval: 1.0 }
    }
}

impl DirectConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        clamp_non_negative("damage", &mut self.damage);
        clamp_tunable("attack_interval", &mut self.attack_interval);
    }
}

/// The simplest archetype.
#[derive(Clone, Debug)]
pub struct Direct {
    config:       DirectConfig,
    attack_timer: Cooldown,
}

impl Direct {
    pub fn new(config: DirectConfig) -> Self {
        Self { config, attack_timer: Cooldown::ready() }
    }

    pub fn config(&self) -> &DirectConfig {
        &self.config
    }
}

impl Behavior for Direct {
    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.attack_timer.tick(ctx.dt);
        if respawn_if_far(ctx) {
            return;
        }

        let engaged = ctx.in_attack_range_max();
        ctx.hittable = ctx.tuning.hittable_outside_range || engaged;
        if engaged {
            attack(ctx);
            if self.attack_timer.is_ready() {
                strike(ctx, svc, self.config.damage);
                self.attack_timer.reset(self.config.attack_interval);
            }
        } else {
            stop_attack(ctx);
            chase(ctx, svc.spatial);
        }
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        stop_attack(ctx);
    }
}
