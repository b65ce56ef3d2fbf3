//! Slow biased wandering punctuated by fast pulses toward the target.
//!
//! Library-only: the built-in archetypes never drift, so a host behavior is
//! the caller.

use hd_agent::{AgentContext, DriftState};
use hd_spatial::SpatialQuery;

use crate::{dash, move_towards};

/// Weight of the random component when re-rolling the wander heading.
const RANDOM_WEIGHT: f32 = 0.7;

/// Weight of the toward-target bias when re-rolling the wander heading.
const TARGET_BIAS: f32 = 0.4;

/// A pulse ends once the agent has moved this far from where it started.
const PULSE_DISPLACEMENT: f32 = 0.5;

/// A pulse never lasts longer than this many seconds.
const PULSE_MAX_SECS: f32 = 0.5;

/// Tunables for [`drift`].
#[derive(Clone, Debug, PartialEq)]
pub struct DriftParams {
    /// Speed scale while wandering.
    pub wander_scale:     f32,
    /// How far ahead the wander goal is placed.
    pub wander_distance:  f32,
    /// Seconds between wander heading re-rolls.
    pub reroll_secs:      f32,
    /// Seconds between pulses.
    pub pulse_interval:   f32,
    /// Dash speed during a pulse, in units per second.
    pub pulse_strength:   f32,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            wander_scale:    0.3,
            wander_distance: 3.0,
            reroll_secs:     1.5,
            pulse_interval:  2.5,
            pulse_strength:  8.0,
        }
    }
}

/// Wander, and every `pulse_interval` seconds dash toward the target.
///
/// Returns `true` while a pulse is in progress.
pub fn drift(ctx: &mut AgentContext, spatial: &dyn SpatialQuery, params: &DriftParams) -> bool {
    let dt = ctx.dt;
    let position = ctx.position;
    let toward = ctx.direction_to_target();

    let reroll = ctx.peek_scratch::<DriftState>().is_none_or(|s| s.reroll_in <= 0.0);
    let fresh = reroll.then(|| {
        (ctx.rng.unit_vector() * RANDOM_WEIGHT + toward * TARGET_BIAS).normalize_or_zero()
    });

    let state = ctx.scratch::<DriftState>();
    if let Some(heading) = fresh {
        state.direction = heading;
        state.reroll_in = params.reroll_secs;
    }
    state.reroll_in -= dt;

    if state.pulsing {
        state.pulse_elapsed += dt;
        if position.distance(state.pulse_start) >= PULSE_DISPLACEMENT
            || state.pulse_elapsed >= PULSE_MAX_SECS
        {
            state.pulsing = false;
            state.since_pulse = 0.0;
        }
    } else {
        state.since_pulse += dt;
        if state.since_pulse >= params.pulse_interval {
            state.pulsing = true;
            state.pulse_elapsed = 0.0;
            state.pulse_start = position;
        }
    }

    let pulsing = state.pulsing;
    let heading = state.direction;
    if pulsing {
        dash(ctx, toward, params.pulse_strength);
    } else {
        let goal = position + heading * params.wander_distance;
        move_towards(ctx, spatial, goal, params.wander_scale);
    }
    pulsing
}
