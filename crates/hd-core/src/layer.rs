//! Collision / faction layers used to filter spatial queries.

/// The layer an entity occupies in the spatial world.
///
/// Separation, pack-center, and line-of-sight checks only consider entities
/// on the querying agent's own layer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum FactionLayer {
    /// Hostile agents (the default for everything this engine spawns).
    #[default]
    Hostile,
    /// The defended entity and its allies.
    Defender,
    /// Debris, pickups, and other passive bodies.
    Neutral,
}

impl FactionLayer {
    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            FactionLayer::Hostile  => "hostile",
            FactionLayer::Defender => "defender",
            FactionLayer::Neutral  => "neutral",
        }
    }
}

impl std::fmt::Display for FactionLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
