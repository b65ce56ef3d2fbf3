//! Shared services lent to a behavior for one call, and the intents it can
//! hand back to the runtime.

use hd_agent::TargetProvider;
use hd_coord::{AttackSlotArbiter, PackRegistry};
use hd_core::{AgentId, Vec2};
use hd_spatial::SpatialQuery;

/// A world-level effect a behavior cannot apply itself.
///
/// Collected during the update pass and applied by the runtime afterwards,
/// in emission order.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Remove the emitting agent (its `on_exit` still runs).
    Despawn,

    /// Damage every agent within `radius` of `center`.  The emitter deals
    /// its own damage to the target; this only reaches other agents.
    Explode { center: Vec2, radius: f32, damage: f32 },
}

/// Everything a behavior may touch besides its own context.
///
/// The runtime owns each of these and lends them out for exactly one
/// `on_enter` / `on_update` / `on_exit` call.
pub struct Services<'a> {
    pub spatial: &'a dyn SpatialQuery,
    pub target:  &'a mut dyn TargetProvider,
    pub arbiter: &'a mut AttackSlotArbiter,
    pub packs:   &'a mut PackRegistry,
    pub intents: &'a mut Vec<(AgentId, Intent)>,
}

impl Services<'_> {
    /// Queue `intent` on behalf of `agent`.
    pub fn emit(&mut self, agent: AgentId, intent: Intent) {
        self.intents.push((agent, intent));
    }
}
