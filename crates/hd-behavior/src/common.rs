//! Small pieces every archetype reuses.

use hd_agent::{AgentContext, AnimTrigger};
use hd_steer::{respawn, stop_attack};
use tracing::debug;

use crate::Services;

/// A countdown that is ready at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// A cooldown that is ready immediately.
    pub fn ready() -> Self {
        Self { remaining: 0.0 }
    }

    pub fn secs(secs: f32) -> Self {
        Self { remaining: secs.max(0.0) }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn reset(&mut self, secs: f32) {
        self.remaining = secs.max(0.0);
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Respawn near the fight if the agent has wandered past `out_of_range`.
/// Returns `true` if it did.
pub fn respawn_if_far(ctx: &mut AgentContext) -> bool {
    if !ctx.is_out_of_range() {
        return false;
    }
    stop_attack(ctx);
    let range = ctx.tuning.respawn_radius;
    respawn(ctx, range);
    true
}

/// Deal `amount` to the target from the agent's position and fire the
/// attack trigger.
pub fn strike(ctx: &mut AgentContext, svc: &mut Services<'_>, amount: f32) {
    svc.target.damage(amount, ctx.position);
    ctx.trigger(AnimTrigger::Attack);
    debug!(agent = %ctx.id, amount, "strike");
}

/// Clamp a damage-like value up to zero, logging the change.  Returns `true`
/// if the value changed.
pub fn clamp_non_negative(name: &str, value: &mut f32) -> bool {
    if *value >= 0.0 {
        return false;
    }
    tracing::warn!(tunable = name, value = *value, "negative tunable clamped to 0");
    *value = 0.0;
    true
}
