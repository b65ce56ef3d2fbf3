//! Movement and combat tunables shared by every archetype.

use tracing::warn;

/// Smallest value a speed or range tunable may take.  Non-positive inputs are
/// clamped up to this at load time so steering never sees zero, negative, or
/// NaN speeds.
pub const MIN_TUNABLE: f32 = 0.01;

/// The tunable bundle every agent carries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tuning {
    /// Velocity cap in units per second.
    pub max_speed: f32,
    /// Acceleration-scale speed: velocity = distance * speed, capped.
    pub speed: f32,
    /// Distance at which the agent lands hits.
    pub attack_range: f32,
    /// Distance up to which the agent counts as "at the target".
    pub attack_range_max: f32,
    /// Beyond this distance the agent respawns near the fight.
    pub out_of_range: f32,
    /// Ring radius respawns land on.
    pub respawn_radius: f32,
    /// Neighbours closer than this push the agent away.
    pub separation_radius: f32,
    /// Scale applied to the separation push.  Zero disables separation.
    pub separation_weight: f32,
    /// Starting health.
    pub max_health: f32,
    /// When false the agent can only be hit inside `attack_range_max`.
    pub hittable_outside_range: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed:              5.0,
            speed:                  2.0,
            attack_range:           1.5,
            attack_range_max:       2.5,
            out_of_range:           80.0,
            respawn_radius:         30.0,
            separation_radius:      2.0,
            separation_weight:      1.0,
            max_health:             10.0,
            hittable_outside_range: true,
        }
    }
}

impl Tuning {
    /// Clamp invalid values in place and return how many were changed.
    ///
    /// Speeds, ranges, radii, and health below [`MIN_TUNABLE`] (including
    /// NaN) become `MIN_TUNABLE`; a negative separation weight becomes zero;
    /// `attack_range_max` is raised to at least `attack_range`.
    pub fn sanitize(&mut self) -> usize {
        let mut clamped = 0;
        for (name, value) in [
            ("max_speed",         &mut self.max_speed),
            ("speed",             &mut self.speed),
            ("attack_range",      &mut self.attack_range),
            ("attack_range_max",  &mut self.attack_range_max),
            ("out_of_range",      &mut self.out_of_range),
            ("respawn_radius",    &mut self.respawn_radius),
            ("separation_radius", &mut self.separation_radius),
            ("max_health",        &mut self.max_health),
        ] {
            if clamp_tunable(name, value) {
                clamped += 1;
            }
        }

        if !(self.separation_weight >= 0.0) {
            warn!(value = self.separation_weight, "separation_weight must be >= 0; clamping to 0");
            self.separation_weight = 0.0;
            clamped += 1;
        }

        if self.attack_range_max < self.attack_range {
            warn!(
                attack_range     = self.attack_range,
                attack_range_max = self.attack_range_max,
                "attack_range_max below attack_range; raising it",
            );
            self.attack_range_max = self.attack_range;
            clamped += 1;
        }
        clamped
    }

    /// By-value form of [`sanitize`](Self::sanitize).
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}

/// Clamp one tunable up to [`MIN_TUNABLE`], logging the change.
///
/// Archetype configs use this for their own timers and multipliers.  Returns
/// `true` if the value changed.
pub fn clamp_tunable(name: &str, value: &mut f32) -> bool {
    // `!(x >= MIN)` also catches NaN.
    if !(*value >= MIN_TUNABLE) {
        warn!(tunable = name, value = *value, min = MIN_TUNABLE, "non-positive tunable clamped");
        *value = MIN_TUNABLE;
        true
    } else {
        false
    }
}
