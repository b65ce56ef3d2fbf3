//! Runtime configuration and the fluent builder for [`AgentRuntime`].

use std::collections::BTreeMap;

use hd_agent::TargetProvider;
use hd_coord::{AttackSlotArbiter, CoordError, DEFAULT_CAPACITY, DEFAULT_MAX_PACK_SIZE, PackParams, PackRegistry};
use hd_core::{AgentId, SimConfig, SimRng, Vec2};
use hd_spatial::AgentIndex;

use crate::{AgentRuntime, RuntimeError, RuntimeResult};

/// Everything the runtime needs besides the target.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeConfig {
    pub sim:              SimConfig,
    /// How many agents may hold an attack slot at once.
    pub arbiter_capacity: usize,
    /// Radius of every agent body, for line-of-sight checks.
    pub body_radius:      f32,
    pub pack_params:      PackParams,
    pub max_pack_size:    usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sim:              SimConfig::default(),
            arbiter_capacity: DEFAULT_CAPACITY,
            body_radius:      0.5,
            pack_params:      PackParams::default(),
            max_pack_size:    DEFAULT_MAX_PACK_SIZE,
        }
    }
}

/// Fluent builder for [`AgentRuntime<T>`].
///
/// # Example
///
/// ```rust,ignore
/// let mut runtime = RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 100.0))
///     .sim(SimConfig { total_ticks: 600, ..Default::default() })
///     .arbiter_capacity(4)
///     .build()?;
/// let id = runtime.create_agent(DirectConfig::default(), Vec2::new(20.0, 0.0));
/// runtime.run(&mut NoopObserver)?;
/// ```
pub struct RuntimeBuilder<T: TargetProvider> {
    config: RuntimeConfig,
    target: T,
}

impl<T: TargetProvider> RuntimeBuilder<T> {
    pub fn new(target: T) -> Self {
        Self { config: RuntimeConfig::default(), target }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sim(mut self, sim: SimConfig) -> Self {
        self.config.sim = sim;
        self
    }

    pub fn arbiter_capacity(mut self, capacity: usize) -> Self {
        self.config.arbiter_capacity = capacity;
        self
    }

    pub fn body_radius(mut self, radius: f32) -> Self {
        self.config.body_radius = radius;
        self
    }

    pub fn pack_params(mut self, params: PackParams) -> Self {
        self.config.pack_params = params;
        self
    }

    pub fn max_pack_size(mut self, size: usize) -> Self {
        self.config.max_pack_size = size;
        self
    }

    /// Validate the configuration and return a runtime with no agents.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::Coord`] for a zero arbiter capacity,
    /// [`RuntimeError::Config`] for a non-positive frame time, a negative
    /// body radius, or a zero pack size.
    pub fn build(self) -> RuntimeResult<AgentRuntime<T>> {
        let config = self.config;

        if config.arbiter_capacity == 0 {
            return Err(CoordError::InvalidCapacity(config.arbiter_capacity).into());
        }
        config.sim.validate()?;
        if !(config.body_radius >= 0.0) {
            return Err(RuntimeError::Config(format!(
                "body_radius must be >= 0, got {}",
                config.body_radius
            )));
        }
        if config.max_pack_size == 0 {
            return Err(RuntimeError::Config("max_pack_size must be at least 1".into()));
        }

        let last_target = self.target.target_position().unwrap_or(Vec2::ZERO);
        Ok(AgentRuntime {
            clock:       config.sim.make_clock(),
            rng:         SimRng::new(config.sim.seed),
            index:       AgentIndex::empty(config.body_radius),
            arbiter:     AttackSlotArbiter::new(config.arbiter_capacity),
            packs:       PackRegistry::new(config.pack_params.clone(), config.max_pack_size),
            agents:      BTreeMap::new(),
            next_id:     AgentId(0),
            intents:     Vec::new(),
            events:      Vec::new(),
            target:      self.target,
            last_target,
            config,
        })
    }
}
