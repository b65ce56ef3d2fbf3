//! The windup → execute → cooldown commit attack.
//!
//! All three phases share one [`ChargeState`] in the scratch slot.  A caller
//! drives them in order: [`windup`] until it returns `true`, then
//! [`execute_charge`] until it returns `true` (a miss) or the caller sees the
//! target enter attack range (a hit, which wins), then [`cooldown`] until it
//! returns `true`.  `cooldown` clears the slot so the next windup starts
//! fresh.

use hd_agent::{AgentContext, AnimFlag, ChargeState};
use hd_core::Vec2;
use hd_spatial::SpatialQuery;
use tracing::trace;

use crate::{hold, move_towards, orbit};

/// Slack on the windup comparison so a windup of exactly N ticks does not
/// slip to N+1 through float accumulation.
const WINDUP_EPSILON: f32 = 1e-4;

/// How far along the captured direction the execute goal is placed.
const CHARGE_REACH: f32 = 100.0;

/// Speed scale while circling during cooldown.
const COOLDOWN_SPEED_SCALE: f32 = 0.5;

/// Hold position, aim at the target, and count toward `windup_time`.
///
/// Returns `true` on exactly one call: the first one where accumulated
/// windup time reaches `windup_time`.  Later calls return `false` until the
/// charge state is reset.
pub fn windup(ctx: &mut AgentContext, windup_time: f32) -> bool {
    let dt = ctx.dt;
    let aim = ctx.direction_to_target();
    hold(ctx);
    ctx.set_flag(AnimFlag::Charging, false);
    ctx.set_flag(AnimFlag::WindingUp, true);

    let state = ctx.scratch::<ChargeState>();
    if state.released {
        return false;
    }
    if aim != Vec2::ZERO || !state.aimed {
        state.direction = aim;
        state.aimed = true;
    }
    state.windup_elapsed += dt;
    if state.windup_elapsed + WINDUP_EPSILON >= windup_time {
        state.released = true;
        trace!(agent = %ctx.id, "windup released");
        return true;
    }
    false
}

/// Run along the captured direction at `max_speed * multiplier`.
///
/// Returns `true` once the agent has traveled at least `max_distance` from
/// where the charge began.  That is a miss; hit detection belongs to the
/// caller and takes precedence.
pub fn execute_charge(
    ctx:          &mut AgentContext,
    spatial:      &dyn SpatialQuery,
    multiplier:   f32,
    max_distance: f32,
) -> bool {
    let position = ctx.position;
    let aim = ctx.direction_to_target();
    let state = ctx.scratch::<ChargeState>();
    if !state.launched {
        state.launched = true;
        state.start = position;
        if !state.aimed {
            state.direction = aim;
            state.aimed = true;
        }
    }
    let (direction, start) = (state.direction, state.start);

    ctx.set_flag(AnimFlag::WindingUp, false);
    ctx.set_flag(AnimFlag::Charging, true);
    move_towards(ctx, spatial, position + direction * CHARGE_REACH, multiplier);
    ctx.position.distance(start) >= max_distance
}

/// Circle the target at reduced speed for `cooldown_time` seconds.
///
/// Returns `true` once the time is up, and clears the charge state.
pub fn cooldown(
    ctx:           &mut AgentContext,
    spatial:       &dyn SpatialQuery,
    cooldown_time: f32,
    min_radius:    f32,
    max_radius:    f32,
) -> bool {
    let dt = ctx.dt;
    let state = ctx.scratch::<ChargeState>();
    state.cooldown_elapsed += dt;
    let done = state.cooldown_elapsed >= cooldown_time;

    ctx.set_flag(AnimFlag::WindingUp, false);
    ctx.set_flag(AnimFlag::Charging, false);
    orbit(ctx, spatial, min_radius, max_radius, 1.0, COOLDOWN_SPEED_SCALE);
    if done {
        reset_charge(ctx);
    }
    done
}

/// Abandon any charge in progress and lower its animation flags.
pub fn reset_charge(ctx: &mut AgentContext) {
    if ctx.peek_scratch::<ChargeState>().is_some() {
        ctx.clear_scratch();
    }
    ctx.set_flag(AnimFlag::WindingUp, false);
    ctx.set_flag(AnimFlag::Charging, false);
}
