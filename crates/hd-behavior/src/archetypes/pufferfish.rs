//! Pufferfish: sits still until hurt, then explodes and is gone.
//!
//! Damage is polled from the context each tick rather than delivered by a
//! callback.  A pufferfish killed outright still gets its reaction tick.

use hd_agent::{AgentContext, AnimTrigger, Tuning, clamp_tunable};
use hd_steer::hold;
use tracing::info;

use crate::common::clamp_non_negative;
use crate::{Behavior, Intent, Services};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PufferfishConfig {
    pub tuning:           Tuning,
    pub explosion_radius: f32,
    pub explosion_damage: f32,
}

impl Default for PufferfishConfig {
    fn default() -> Self {
        Self {
            tuning:           Tuning { max_health: 3.0, ..Tuning::default() },
            explosion_radius: 4.0,
            explosion_damage: 5.0,
        }
    }
}

impl PufferfishConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        clamp_tunable("explosion_radius", &mut self.explosion_radius);
        clamp_non_negative("explosion_damage", &mut self.explosion_damage);
    }
}

#[derive(Clone, Debug)]
pub struct Pufferfish {
    config:   PufferfishConfig,
    exploded: bool,
}

impl Pufferfish {
    pub fn new(config: PufferfishConfig) -> Self {
        Self { config, exploded: false }
    }

    pub fn has_exploded(&self) -> bool {
        self.exploded
    }

    pub fn config(&self) -> &PufferfishConfig {
        &self.config
    }

    fn explode(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.exploded = true;
        ctx.hittable = false;
        ctx.trigger(AnimTrigger::Explode);

        let (radius, damage) = (self.config.explosion_radius, self.config.explosion_damage);
        let reached_target = ctx.distance_to_target <= radius;
        if reached_target {
            svc.target.damage(damage, ctx.position);
        }
        info!(agent = %ctx.id, at = %ctx.position, radius, reached_target, "pufferfish exploded");
        svc.emit(ctx.id, Intent::Explode { center: ctx.position, radius, damage });
        svc.emit(ctx.id, Intent::Despawn);
    }
}

impl Behavior for Pufferfish {
    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        hold(ctx);
        if self.exploded {
            return;
        }
        let hurt = ctx.take_damage() > 0.0;
        if hurt || ctx.is_dead() {
            self.explode(ctx, svc);
        } else {
            ctx.hittable = true;
        }
    }

    fn on_late_update(&mut self, _ctx: &mut AgentContext) {}

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
    }

    fn reacts_to_death(&self) -> bool {
        true
    }
}
