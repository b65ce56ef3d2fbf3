//! RangedOrbit: circle at a distance and fire whenever the line is clear.

use hd_agent::{AgentContext, Tuning, clamp_tunable};
use hd_steer::{orbit, stop_attack};

use crate::common::{Cooldown, clamp_non_negative, respawn_if_far, strike};
use crate::{Behavior, Services};

/// How far past the outer ring a shot still reaches.
const FIRE_SLACK: f32 = 1.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedOrbitConfig {
    pub tuning:         Tuning,
    /// Inner orbit radius.
    pub orbit_distance: f32,
    /// Ring width: the outer radius is `orbit_distance + orbit_max`.
    pub orbit_max:      f32,
    /// `>= 0` circles counter-clockwise.
    pub direction:      f32,
    pub damage:         f32,
    pub fire_interval:  f32,
}

impl Default for RangedOrbitConfig {
    fn default() -> Self {
        Self {
            tuning:         Tuning::default(),
            orbit_distance: 10.0,
            orbit_max:      4.0,
            direction:      1.0,
            damage:         1.0,
            fire_interval:  2.0,
        }
    }
}

impl RangedOrbitConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        clamp_tunable("orbit_distance", &mut self.orbit_distance);
        clamp_non_negative("orbit_max", &mut self.orbit_max);
        clamp_non_negative("damage", &mut self.damage);
        clamp_tunable("fire_interval", &mut self.fire_interval);
    }
}

#[derive(Clone, Debug)]
pub struct RangedOrbit {
    config:     RangedOrbitConfig,
    fire_timer: Cooldown,
}

impl RangedOrbit {
    pub fn new(config: RangedOrbitConfig) -> Self {
        let fire_timer = Cooldown::secs(config.fire_interval);
        Self { config, fire_timer }
    }

    pub fn config(&self) -> &RangedOrbitConfig {
        &self.config
    }
}

impl Behavior for RangedOrbit {
    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.fire_timer.tick(ctx.dt);
        if respawn_if_far(ctx) {
            return;
        }
        ctx.hittable = true;

        let inner = self.config.orbit_distance;
        let outer = inner + self.config.orbit_max;
        if self.fire_timer.is_ready() && ctx.distance_to_target <= outer + FIRE_SLACK {
            let blocked = svc.spatial.raycast_blocked(
                ctx.position,
                ctx.target_position,
                ctx.layer,
                Some(ctx.id),
            );
            if !blocked {
                strike(ctx, svc, self.config.damage);
                self.fire_timer.reset(self.config.fire_interval);
            }
        }
        orbit(ctx, svc.spatial, inner, outer, self.config.direction, 1.0);
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        stop_attack(ctx);
    }
}
