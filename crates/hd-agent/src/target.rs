//! The defended entity every agent is hunting.

use hd_core::Vec2;

/// What the engine may ask of the defended entity, and nothing more.
pub trait TargetProvider {
    /// Current position, or `None` if the entity cannot be resolved.
    fn target_position(&self) -> Option<Vec2>;

    /// Remaining health in `[0, 1]`.
    fn health_fraction(&self) -> f32;

    /// Apply `amount` damage dealt from `source`.
    fn damage(&mut self, amount: f32, source: Vec2);

    /// Push the entity by `impulse`.  Defaults to ignoring it.
    fn knockback(&mut self, _impulse: Vec2) {}
}

/// A target that stays where it is put and keeps a log of what hit it.
#[derive(Clone, Debug)]
pub struct StaticTarget {
    pub position:   Option<Vec2>,
    pub health:     f32,
    pub max_health: f32,
    /// Every `(amount, source)` pair received, in order.
    pub hits:       Vec<(f32, Vec2)>,
    /// Sum of all knockback impulses received.
    pub knockback:  Vec2,
}

impl StaticTarget {
    pub fn new(position: Vec2, max_health: f32) -> Self {
        Self {
            position: Some(position),
            health:   max_health,
            max_health,
            hits:     Vec::new(),
            knockback: Vec2::ZERO,
        }
    }

    /// A target whose position cannot be resolved.
    pub fn unavailable() -> Self {
        Self { position: None, ..Self::new(Vec2::ZERO, 1.0) }
    }

    /// Force health to `fraction` of max (clamped to `[0, 1]`).
    pub fn set_health_fraction(&mut self, fraction: f32) {
        self.health = self.max_health * fraction.clamp(0.0, 1.0);
    }

    pub fn total_damage(&self) -> f32 {
        self.hits.iter().map(|(amount, _)| amount).sum()
    }
}

impl TargetProvider for StaticTarget {
    fn target_position(&self) -> Option<Vec2> {
        self.position
    }

    fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    fn damage(&mut self, amount: f32, source: Vec2) {
        self.health = (self.health - amount).max(0.0);
        self.hits.push((amount, source));
    }

    fn knockback(&mut self, impulse: Vec2) {
        self.knockback += impulse;
    }
}
