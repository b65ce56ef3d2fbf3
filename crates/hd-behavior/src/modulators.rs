//! Modulators: optional layers that can take an agent's movement away from
//! its archetype for a while.
//!
//! | Modulator    | Takes over when                             | Does                          |
//! |--------------|---------------------------------------------|-------------------------------|
//! | `Tactics`    | own health drops below `retreat_below`      | retreats for `retreat_secs`   |
//! | `Submersion` | every `dive_interval` s, when not committed | dives: unhittable, slow chase |
//! | `Perception` | target unseen for `memory_secs`             | lurks at its current distance |
//!
//! Priority runs top to bottom.  When a takeover starts the archetype is
//! interrupted (committed attacks dropped, attack slot released); when it
//! ends the archetype resumes from its neutral state.

use hd_agent::{AgentContext, AnimFlag, AnimTrigger, clamp_tunable};
use hd_spatial::SpatialQuery;
use hd_steer::{lurk, move_towards, retreat, stop_attack};
use tracing::debug;

use crate::common::respawn_if_far;

// ── Configs ───────────────────────────────────────────────────────────────────

/// Awareness of the target.  An unaware agent lurks instead of engaging.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perception {
    pub detection_radius: f32,
    /// Seconds the agent stays aware after losing sight.
    pub memory_secs:      f32,
}

impl Default for Perception {
    fn default() -> Self {
        Self { detection_radius: 25.0, memory_secs: 4.0 }
    }
}

/// Self-preservation: back off once badly hurt.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tactics {
    /// Own health fraction below which the agent retreats, once.
    pub retreat_below:    f32,
    pub retreat_secs:     f32,
    pub retreat_distance: f32,
}

impl Default for Tactics {
    fn default() -> Self {
        Self { retreat_below: 0.3, retreat_secs: 3.0, retreat_distance: 20.0 }
    }
}

/// Periodic dives below the surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Submersion {
    pub dive_interval: f32,
    pub dive_secs:     f32,
    /// Speed scale while submerged.
    pub speed_scale:   f32,
}

impl Default for Submersion {
    fn default() -> Self {
        Self { dive_interval: 6.0, dive_secs: 2.0, speed_scale: 0.6 }
    }
}

/// The modulators attached to one behavior config.  All off by default.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modulators {
    pub perception: Option<Perception>,
    pub tactics:    Option<Tactics>,
    pub submersion: Option<Submersion>,
}

impl Modulators {
    pub fn with_perception(mut self, perception: Perception) -> Self {
        self.perception = Some(perception);
        self
    }

    pub fn with_tactics(mut self, tactics: Tactics) -> Self {
        self.tactics = Some(tactics);
        self
    }

    pub fn with_submersion(mut self, submersion: Submersion) -> Self {
        self.submersion = Some(submersion);
        self
    }

    pub fn sanitize(&mut self) {
        if let Some(p) = &mut self.perception {
            clamp_tunable("detection_radius", &mut p.detection_radius);
            clamp_tunable("memory_secs", &mut p.memory_secs);
        }
        if let Some(t) = &mut self.tactics {
            t.retreat_below = t.retreat_below.clamp(0.0, 1.0);
            clamp_tunable("retreat_secs", &mut t.retreat_secs);
            clamp_tunable("retreat_distance", &mut t.retreat_distance);
        }
        if let Some(s) = &mut self.submersion {
            clamp_tunable("dive_interval", &mut s.dive_interval);
            clamp_tunable("dive_secs", &mut s.dive_secs);
            clamp_tunable("speed_scale", &mut s.speed_scale);
        }
    }
}

// ── Runtime state ─────────────────────────────────────────────────────────────

/// Which layer has the agent this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Control {
    Archetype,
    Retreating,
    Submerged,
    Lurking,
}

impl Control {
    pub fn as_str(self) -> &'static str {
        match self {
            Control::Archetype  => "archetype",
            Control::Retreating => "retreating",
            Control::Submerged  => "submerged",
            Control::Lurking    => "lurking",
        }
    }
}

/// Per-agent modulator timers.
#[derive(Clone, Debug)]
pub struct ModulatorState {
    aware:          bool,
    unseen_for:     f32,
    retreat_left:   Option<f32>,
    retreat_spent:  bool,
    dive_in:        f32,
    dive_left:      Option<f32>,
    lurk_direction: f32,
    control:        Control,
}

impl ModulatorState {
    pub fn new(modulators: &Modulators, ctx: &mut AgentContext) -> Self {
        Self {
            aware:          modulators.perception.is_none(),
            unseen_for:     0.0,
            retreat_left:   None,
            retreat_spent:  false,
            dive_in:        modulators.submersion.as_ref().map_or(0.0, |s| s.dive_interval),
            dive_left:      None,
            lurk_direction: ctx.rng.sign(),
            control:        Control::Archetype,
        }
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn is_aware(&self) -> bool {
        self.aware
    }

    /// Advance timers and decide who drives the agent this tick.
    ///
    /// Returns the new control and whether it just changed away from the
    /// archetype (the caller interrupts the archetype then).
    pub fn decide(
        &mut self,
        modulators: &Modulators,
        ctx:        &mut AgentContext,
        committed:  bool,
    ) -> (Control, bool) {
        let dt = ctx.dt;

        if let Some(p) = &modulators.perception {
            let seen = ctx.distance_to_target <= p.detection_radius || ctx.pending_damage() > 0.0;
            if seen {
                self.aware = true;
                self.unseen_for = 0.0;
            } else if self.aware {
                self.unseen_for += dt;
                if self.unseen_for >= p.memory_secs {
                    self.aware = false;
                }
            }
        }

        if let Some(t) = &modulators.tactics {
            if let Some(left) = self.retreat_left {
                let left = left - dt;
                self.retreat_left = (left > 0.0).then_some(left);
            } else if !self.retreat_spent && ctx.health_fraction() < t.retreat_below {
                self.retreat_spent = true;
                self.retreat_left = Some(t.retreat_secs);
            }
        }

        if let Some(s) = &modulators.submersion {
            match self.dive_left {
                Some(left) => {
                    let left = left - dt;
                    if left > 0.0 {
                        self.dive_left = Some(left);
                    } else {
                        self.dive_left = None;
                        self.dive_in = s.dive_interval;
                        ctx.set_flag(AnimFlag::Submerged, false);
                        ctx.trigger(AnimTrigger::Surface);
                    }
                }
                None => {
                    self.dive_in -= dt;
                    if self.dive_in <= 0.0 && !committed {
                        self.dive_left = Some(s.dive_secs);
                        ctx.set_flag(AnimFlag::Submerged, true);
                        ctx.trigger(AnimTrigger::Dive);
                    }
                }
            }
        }

        let next = if self.retreat_left.is_some() {
            Control::Retreating
        } else if self.dive_left.is_some() {
            Control::Submerged
        } else if !self.aware {
            Control::Lurking
        } else {
            Control::Archetype
        };

        let took_over = self.control == Control::Archetype && next != Control::Archetype;
        if next != self.control {
            debug!(agent = %ctx.id, from = ?self.control, to = ?next, "modulator control");
            self.control = next;
        }
        (next, took_over)
    }

    /// Drive the agent for a modulator-owned tick.
    pub fn drive(&self, modulators: &Modulators, ctx: &mut AgentContext, spatial: &dyn SpatialQuery) {
        stop_attack(ctx);
        match self.control {
            Control::Archetype => {}
            Control::Retreating => {
                let distance = modulators.tactics.as_ref().map_or(0.0, |t| t.retreat_distance);
                ctx.hittable = true;
                retreat(ctx, spatial, distance);
            }
            Control::Submerged => {
                let scale = modulators.submersion.as_ref().map_or(1.0, |s| s.speed_scale);
                ctx.hittable = false;
                let target = ctx.target_position;
                move_towards(ctx, spatial, target, scale);
            }
            Control::Lurking => {
                ctx.hittable = true;
                if !respawn_if_far(ctx) {
                    lurk(ctx, spatial, self.lurk_direction);
                }
            }
        }
    }
}
