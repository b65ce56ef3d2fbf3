//! The `SpatialQuery` trait — what the engine needs to know about the world.

use hd_core::{AgentId, FactionLayer, Vec2};

/// One body returned by a spatial query.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRef {
    pub agent:    AgentId,
    pub position: Vec2,
    pub layer:    FactionLayer,
}

/// Nearest-neighbour and line-of-sight queries against a layered world.
///
/// Implementations answer from whatever state they hold; the runtime
/// rebuilds its own [`AgentIndex`][crate::AgentIndex] once per tick, so
/// answers reflect positions at the end of the previous tick.
pub trait SpatialQuery {
    /// All bodies on `layer` whose centre lies within `radius` of `center`.
    fn query_radius(&self, center: Vec2, radius: f32, layer: FactionLayer) -> Vec<EntityRef>;

    /// `true` if any body on `layer` other than `ignore` sits on the segment
    /// `from..to`.
    ///
    /// The casting agent never blocks its own ray, and a body overlapping
    /// the `to` point (the thing being aimed at) does not count as an
    /// obstruction.
    fn raycast_blocked(
        &self,
        from:   Vec2,
        to:     Vec2,
        layer:  FactionLayer,
        ignore: Option<AgentId>,
    ) -> bool;
}

/// A world with nothing in it.  Every radius query is empty and every ray is
/// clear.  Useful for tests and for hosts that have no crowding to model.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyWorld;

impl SpatialQuery for EmptyWorld {
    fn query_radius(&self, _center: Vec2, _radius: f32, _layer: FactionLayer) -> Vec<EntityRef> {
        Vec::new()
    }

    fn raycast_blocked(
        &self,
        _from:   Vec2,
        _to:     Vec2,
        _layer:  FactionLayer,
        _ignore: Option<AgentId>,
    ) -> bool {
        false
    }
}
