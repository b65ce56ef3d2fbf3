//! Action primitives.  These only flip animation intents and reposition the
//! agent; damage is dealt by the archetypes themselves.

use std::f32::consts::TAU;

use hd_agent::{AgentContext, AnimFlag, AnimTrigger, MIN_TUNABLE};
use hd_core::Vec2;
use tracing::debug;

/// Respawns land this far inside `range`, before jitter.
const RESPAWN_INSET: f32 = 4.0;

/// Half-width of the respawn band.
const RESPAWN_JITTER: f32 = 1.0;

/// Raise `Attacking`, stop moving.
pub fn attack(ctx: &mut AgentContext) {
    ctx.velocity = 0.0;
    ctx.set_flag(AnimFlag::Moving, false);
    ctx.set_flag(AnimFlag::Attacking, true);
}

pub fn stop_attack(ctx: &mut AgentContext) {
    ctx.set_flag(AnimFlag::Attacking, false);
}

pub fn set_moving(ctx: &mut AgentContext, moving: bool) {
    ctx.set_flag(AnimFlag::Moving, moving);
}

/// Teleport to a random point in the band `[range - 5, range - 3]` around
/// the target and start over: scratch cleared, orbit angle forgotten,
/// attack flags lowered.  Returns the new position.
pub fn respawn(ctx: &mut AgentContext, range: f32) -> Vec2 {
    let jitter = ctx.rng.gen_range(-RESPAWN_JITTER..=RESPAWN_JITTER);
    let radius = (range - RESPAWN_INSET + jitter).max(MIN_TUNABLE);
    let angle = ctx.rng.gen_range(0.0..TAU);
    let position = ctx.target_position + Vec2::from_angle(angle) * radius;

    debug!(agent = %ctx.id, from = %ctx.position, to = %position, "respawn");
    ctx.position = position;
    ctx.last_position = position;
    ctx.distance_to_target = radius;
    ctx.velocity = 0.0;
    ctx.orbit_angle = None;
    ctx.clear_scratch();
    for flag in [AnimFlag::Attacking, AnimFlag::WindingUp, AnimFlag::Charging] {
        ctx.set_flag(flag, false);
    }
    ctx.trigger(AnimTrigger::Respawn);
    position
}
