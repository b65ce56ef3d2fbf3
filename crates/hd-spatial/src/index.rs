//! R-tree index over agent bodies.
//!
//! # Data layout
//!
//! Every indexed agent is a point entry `[x, y]` in an `rstar` R-tree, tagged
//! with its `AgentId` and `FactionLayer`.  A side table maps ids back to
//! positions for O(1) `position_of` lookups.  The whole index is rebuilt
//! with `bulk_load` once per tick rather than updated incrementally: a bulk
//! load of a few thousand points is cheaper than tracking per-agent moves,
//! and it gives every agent the same end-of-previous-tick view.
//!
//! Bodies are modelled as circles of a single shared `body_radius`; only the
//! line-of-sight check uses it.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use hd_core::{AgentId, FactionLayer, Vec2};

use crate::{EntityRef, SpatialError, SpatialQuery, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct BodyEntry {
    point: [f32; 2], // [x, y]
    agent: AgentId,
    layer: FactionLayer,
}

impl BodyEntry {
    #[inline]
    fn to_ref(&self) -> EntityRef {
        EntityRef {
            agent:    self.agent,
            position: Vec2::new(self.point[0], self.point[1]),
            layer:    self.layer,
        }
    }
}

impl RTreeObject for BodyEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for BodyEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── AgentIndex ────────────────────────────────────────────────────────────────

/// Spatial index over agent bodies.  Do not mutate; rebuild with
/// [`AgentIndex::build`].
pub struct AgentIndex {
    tree:        RTree<BodyEntry>,
    positions:   FxHashMap<AgentId, (Vec2, FactionLayer)>,
    body_radius: f32,
}

impl AgentIndex {
    /// An index with no bodies.
    pub fn empty(body_radius: f32) -> Self {
        Self {
            tree:        RTree::new(),
            positions:   FxHashMap::default(),
            body_radius: body_radius.max(0.0),
        }
    }

    /// Bulk-load an index from `bodies`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::NonFinitePosition`] if any position is NaN or
    /// infinite, and [`SpatialError::DuplicateAgent`] if an id appears twice.
    pub fn build<I>(bodies: I, body_radius: f32) -> SpatialResult<Self>
    where
        I: IntoIterator<Item = EntityRef>,
    {
        let mut positions = FxHashMap::default();
        let mut entries   = Vec::new();
        for body in bodies {
            if !body.position.is_finite() {
                return Err(SpatialError::NonFinitePosition(body.agent));
            }
            if positions.insert(body.agent, (body.position, body.layer)).is_some() {
                return Err(SpatialError::DuplicateAgent(body.agent));
            }
            entries.push(BodyEntry {
                point: [body.position.x, body.position.y],
                agent: body.agent,
                layer: body.layer,
            });
        }
        Ok(Self {
            tree: RTree::bulk_load(entries),
            positions,
            body_radius: body_radius.max(0.0),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn body_radius(&self) -> f32 {
        self.body_radius
    }

    /// Indexed position of `agent`, if present.
    #[inline]
    pub fn position_of(&self, agent: AgentId) -> Option<Vec2> {
        self.positions.get(&agent).map(|(p, _)| *p)
    }

    /// Nearest body on `layer` to `pos`, skipping `exclude`.
    pub fn nearest(&self, pos: Vec2, layer: FactionLayer, exclude: Option<AgentId>) -> Option<EntityRef> {
        self.tree
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .find(|e| e.layer == layer && Some(e.agent) != exclude)
            .map(BodyEntry::to_ref)
    }
}

impl SpatialQuery for AgentIndex {
    fn query_radius(&self, center: Vec2, radius: f32, layer: FactionLayer) -> Vec<EntityRef> {
        if radius <= 0.0 {
            return Vec::new();
        }
        self.tree
            .locate_within_distance([center.x, center.y], radius * radius)
            .filter(|e| e.layer == layer)
            .map(BodyEntry::to_ref)
            .collect()
    }

    fn raycast_blocked(
        &self,
        from:   Vec2,
        to:     Vec2,
        layer:  FactionLayer,
        ignore: Option<AgentId>,
    ) -> bool {
        // Every body that can touch the segment lies inside the circle around
        // its midpoint, padded by one body radius.
        let mid   = from.lerp(to, 0.5);
        let reach = from.distance(to) * 0.5 + self.body_radius;
        let r     = self.body_radius;

        self.tree
            .locate_within_distance([mid.x, mid.y], reach * reach)
            .filter(|e| e.layer == layer && Some(e.agent) != ignore)
            .any(|e| {
                let p = Vec2::new(e.point[0], e.point[1]);
                p.distance(to) > r && p.distance_to_segment(from, to) <= r
            })
    }
}
