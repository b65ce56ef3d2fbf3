//! Divergence steering: nearby agents on the same layer push each other
//! apart so a crowd never collapses onto one point.

use hd_agent::AgentContext;
use hd_core::Vec2;
use hd_spatial::SpatialQuery;

/// Offsets shorter than this are treated as a perfect overlap.
const OVERLAP_EPSILON: f32 = 1e-4;

/// Golden angle in radians; spreads overlap escape headings by agent id.
const GOLDEN_ANGLE: f32 = 2.399_963;

/// Sum of push vectors from every same-layer neighbour within
/// `tuning.separation_radius`.
///
/// Each neighbour contributes its unit offset weighted by
/// `(1 - dist / radius)³`, so the closest neighbours dominate.  Two agents
/// sitting exactly on top of each other still separate: each pushes along a
/// heading derived from its own id.  The result is *not* scaled by
/// `separation_weight`; [`move_towards`](crate::move_towards) does that.
pub fn separation(ctx: &AgentContext, spatial: &dyn SpatialQuery) -> Vec2 {
    let radius = ctx.tuning.separation_radius;
    if radius <= 0.0 || ctx.tuning.separation_weight <= 0.0 {
        return Vec2::ZERO;
    }

    let mut push = Vec2::ZERO;
    for neighbour in spatial.query_radius(ctx.position, radius, ctx.layer) {
        if neighbour.agent == ctx.id {
            continue;
        }
        let offset = ctx.position - neighbour.position;
        let dist = offset.length();
        if dist >= radius {
            continue;
        }
        let falloff = (1.0 - dist / radius).powi(3);
        let heading = if dist < OVERLAP_EPSILON {
            Vec2::from_angle(ctx.id.0 as f32 * GOLDEN_ANGLE)
        } else {
            offset / dist
        };
        push += heading * falloff;
    }
    push
}
