//! Weighted choice of a behavior config per spawn.

use hd_core::SimRng;
use tracing::trace;

use crate::BehaviorConfig;

/// One entry in a pool.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedConfig {
    pub config:  BehaviorConfig,
    pub weight:  f32,
    pub enabled: bool,
}

impl WeightedConfig {
    pub fn new(config: impl Into<BehaviorConfig>, weight: f32) -> Self {
        Self { config: config.into(), weight, enabled: true }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// An ordered set of weighted configs for one spawner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BehaviorPool {
    entries: Vec<WeightedConfig>,
}

impl BehaviorPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: WeightedConfig) {
        self.entries.push(entry);
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, config: impl Into<BehaviorConfig>, weight: f32) -> Self {
        self.push(WeightedConfig::new(config, weight));
        self
    }

    pub fn entries(&self) -> &[WeightedConfig] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the weights of enabled entries.  Negative weights count as
    /// zero.
    pub fn enabled_weight(&self) -> f32 {
        self.entries.iter().filter(|e| e.enabled).map(|e| e.weight.max(0.0)).sum()
    }
}

/// Picks one enabled config per spawn, proportional to weight.
#[derive(Clone, Debug, Default)]
pub struct BehaviorSelector {
    pool: BehaviorPool,
}

impl BehaviorSelector {
    pub fn new(pool: BehaviorPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &BehaviorPool {
        &self.pool
    }

    /// Choose with a uniform `sample` in `[0, 1)`.
    ///
    /// Enabled weights are normalized to sum to one and the first entry
    /// whose cumulative weight exceeds `sample` wins.  When rounding leaves
    /// nothing selected (or every enabled weight is zero) the first enabled
    /// entry is returned.  `None` only when nothing is enabled.
    pub fn select(&self, sample: f32) -> Option<&BehaviorConfig> {
        let first_enabled = self.pool.entries.iter().find(|e| e.enabled)?;
        let total = self.pool.enabled_weight();
        if total > 0.0 {
            let mut cumulative = 0.0;
            for entry in self.pool.entries.iter().filter(|e| e.enabled) {
                cumulative += entry.weight.max(0.0) / total;
                if cumulative > sample {
                    return Some(&entry.config);
                }
            }
        }
        trace!(sample, "selector fell back to first enabled config");
        Some(&first_enabled.config)
    }

    /// Draw a sample from `rng` and [`select`](Self::select).
    pub fn choose(&self, rng: &mut SimRng) -> Option<&BehaviorConfig> {
        let sample: f32 = rng.random();
        self.select(sample)
    }
}
