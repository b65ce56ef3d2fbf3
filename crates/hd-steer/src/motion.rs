//! Point-to-point steering.

use hd_agent::{AgentContext, AnimFlag};
use hd_core::Vec2;
use hd_spatial::SpatialQuery;

use crate::separation;

/// Speeds below this count as standing still for the `Moving` flag.
const MOVING_EPSILON: f32 = 1e-3;

/// Steer toward `target` with an eased approach.
///
/// The separation push (scaled by `separation_weight`) is added to `target`
/// first.  Velocity is `distance * speed * speed_scale`, capped at
/// `max_speed * speed_scale`, so the agent slows as it arrives instead of
/// overshooting.  The step never carries the agent past the goal.
pub fn move_towards(
    ctx:         &mut AgentContext,
    spatial:     &dyn SpatialQuery,
    target:      Vec2,
    speed_scale: f32,
) {
    let goal = target + separation(ctx, spatial) * ctx.tuning.separation_weight;
    let offset = goal - ctx.position;
    let dist = offset.length();
    let scale = speed_scale.max(0.0);
    let cap = ctx.tuning.max_speed * scale;
    let velocity = (dist * ctx.tuning.speed * scale).min(cap).max(0.0);

    let step = (velocity * ctx.dt).min(dist);
    ctx.position += offset.normalize_or_zero() * step;
    ctx.velocity = velocity;
    ctx.set_flag(AnimFlag::Moving, velocity > MOVING_EPSILON);
}

/// Direct chase: [`move_towards`] the target at full speed.
pub fn chase(ctx: &mut AgentContext, spatial: &dyn SpatialQuery) {
    let target = ctx.target_position;
    move_towards(ctx, spatial, target, 1.0);
}

/// Constant-speed move along `direction`, ignoring separation.
pub fn dash(ctx: &mut AgentContext, direction: Vec2, speed: f32) {
    let speed = speed.max(0.0);
    ctx.position += direction.normalize_or_zero() * speed * ctx.dt;
    ctx.velocity = speed;
    ctx.set_flag(AnimFlag::Moving, speed > MOVING_EPSILON);
}

/// Stand still.
pub fn hold(ctx: &mut AgentContext) {
    ctx.velocity = 0.0;
    ctx.set_flag(AnimFlag::Moving, false);
}
