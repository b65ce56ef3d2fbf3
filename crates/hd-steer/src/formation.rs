//! Pack formation movement.
//!
//! Slot angles come from the pack coordinator; these helpers only turn an
//! angle into a point and move the agent there.

use hd_agent::{AgentContext, FormationState};
use hd_core::Vec2;
use hd_spatial::SpatialQuery;

use crate::move_towards;

/// An agent counts as formed within this distance of its slot.
pub const FORMED_TOLERANCE: f32 = 1.0;

/// Share of the pack-chase goal taken from the formation slot.
const SLOT_BLEND: f32 = 0.7;

/// The point `radius` from `center` at `angle`.
#[inline]
pub fn slot_position(center: Vec2, angle: f32, radius: f32) -> Vec2 {
    center + Vec2::from_angle(angle) * radius
}

/// Move toward `slot` at `speed_scale`.  Returns `true` once within
/// [`FORMED_TOLERANCE`].
pub fn form_up(
    ctx:         &mut AgentContext,
    spatial:     &dyn SpatialQuery,
    slot:        Vec2,
    speed_scale: f32,
) -> bool {
    move_towards(ctx, spatial, slot, speed_scale);
    let formed = ctx.position.distance(slot) <= FORMED_TOLERANCE;
    let state = ctx.scratch::<FormationState>();
    state.slot = slot;
    state.formed = formed;
    formed
}

/// Close on the target while holding shape: the goal is 70% `slot`, 30%
/// target.
pub fn pack_chase(
    ctx:         &mut AgentContext,
    spatial:     &dyn SpatialQuery,
    slot:        Vec2,
    speed_scale: f32,
) {
    let goal = slot.lerp(ctx.target_position, 1.0 - SLOT_BLEND);
    ctx.scratch::<FormationState>().slot = slot;
    move_towards(ctx, spatial, goal, speed_scale);
}
