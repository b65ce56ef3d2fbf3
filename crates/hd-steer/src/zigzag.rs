//! Weaving chase.

use hd_agent::{AgentContext, ZigzagState};
use hd_core::Vec2;
use hd_spatial::SpatialQuery;

use crate::move_towards;

/// Advance the zigzag timer by `dt·frequency` and return
/// `sin(timer)·amplitude`.
///
/// Shares its scratch memory with [`zigzag`], so an agent can weave toward
/// the target and then keep the same phase while wobbling an orbit radius.
pub fn zigzag_wobble(ctx: &mut AgentContext, amplitude: f32, frequency: f32) -> f32 {
    let dt = ctx.dt;
    let state = ctx.scratch::<ZigzagState>();
    state.timer += dt * frequency;
    state.timer.sin() * amplitude
}

/// Chase `target` (the defended entity when `None`) while weaving across
/// the chase line by `sin(timer)·amplitude`.
pub fn zigzag(
    ctx:         &mut AgentContext,
    spatial:     &dyn SpatialQuery,
    amplitude:   f32,
    frequency:   f32,
    target:      Option<Vec2>,
    speed_scale: f32,
) {
    let base = target.unwrap_or(ctx.target_position);
    let offset = zigzag_wobble(ctx, amplitude, frequency);
    let across = (base - ctx.position).normalize_or_zero().perp();
    move_towards(ctx, spatial, base + across * offset, speed_scale);
}
