//! Keeping a distance: lurk on a ring, or back straight off.

use hd_agent::AgentContext;
use hd_core::Vec2;
use hd_spatial::SpatialQuery;

use crate::{move_towards, orbit};

/// Speed scale while lurking.
const LURK_SPEED_SCALE: f32 = 0.25;

/// A retreat counts as done within this distance of its goal.
const RETREAT_TOLERANCE: f32 = 0.5;

/// Circle slowly at the current distance without closing in.
pub fn lurk(ctx: &mut AgentContext, spatial: &dyn SpatialQuery, direction: f32) {
    let ring = ctx.distance_to_target;
    orbit(ctx, spatial, ring, ring, direction, LURK_SPEED_SCALE);
}

/// Move directly away from the target until `distance` from it.
///
/// Returns `true` once the agent is within tolerance of that distance.
pub fn retreat(ctx: &mut AgentContext, spatial: &dyn SpatialQuery, distance: f32) -> bool {
    let mut away = ctx.position - ctx.target_position;
    if away.length_squared() == 0.0 {
        away = Vec2::new(1.0, 0.0);
    }
    let goal = ctx.target_position + away.normalize_or_zero() * distance;
    move_towards(ctx, spatial, goal, 1.0);
    ctx.position.distance(ctx.target_position) + RETREAT_TOLERANCE >= distance
}
