//! Circling the target on a ring.

use hd_agent::{AgentContext, MIN_TUNABLE};
use hd_core::{Vec2, lerp_angle};
use hd_spatial::SpatialQuery;

use crate::move_towards;

/// Per-frame inward bias on the orbit radius.  Agents settle at `min_radius`.
const INWARD_BIAS: f32 = 0.1;

/// Angle smoothing rate, per second.
const SMOOTHING_RATE: f32 = 3.0;

/// Reference frame rate the angular step is tuned against.
const REFERENCE_FPS: f32 = 60.0;

/// Circle the target between `min_radius` and `max_radius`.
///
/// The agent keeps a smoothed copy of its angle around the target in
/// `ctx.orbit_angle`, easing toward the true angle at `3·dt` per frame so a
/// separation shove does not make the ring jitter.  The goal point sits on
/// the ring at the smoothed angle plus `(max_speed / radius)·0.5·dt·60`
/// radians in `direction` (`>= 0` is counter-clockwise).
pub fn orbit(
    ctx:         &mut AgentContext,
    spatial:     &dyn SpatialQuery,
    min_radius:  f32,
    max_radius:  f32,
    direction:   f32,
    speed_scale: f32,
) {
    let lo = min_radius.min(max_radius).max(MIN_TUNABLE);
    let hi = min_radius.max(max_radius).max(lo);

    let true_angle = (ctx.position - ctx.target_position).angle();
    let smoothed = match ctx.orbit_angle {
        Some(prev) => lerp_angle(prev, true_angle, (SMOOTHING_RATE * ctx.dt).min(1.0)),
        None       => true_angle,
    };
    ctx.orbit_angle = Some(smoothed);

    let radius = (ctx.distance_to_target.clamp(lo, hi) - INWARD_BIAS).max(lo);
    let sign = if direction < 0.0 { -1.0 } else { 1.0 };
    let step = (ctx.tuning.max_speed / radius) * sign * 0.5 * ctx.dt * REFERENCE_FPS;

    let goal = ctx.target_position + Vec2::from_angle(smoothed + step) * radius;
    move_towards(ctx, spatial, goal, speed_scale);
}
