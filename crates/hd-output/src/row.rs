//! Flat row types handed to [`OutputWriter`][crate::OutputWriter] backends.

/// One agent at one snapshot tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:  u32,
    pub tick:      u64,
    pub archetype: &'static str,
    pub x:         f32,
    pub y:         f32,
    pub health:    f32,
    pub hittable:  bool,
    pub engaged:   bool,
    pub inert:     bool,
    /// Which layer drives the agent: `archetype` or a modulator name.
    pub control:   &'static str,
    /// `PackId::INVALID.0` when the agent is not in a pack.
    pub pack_id:   u32,
    pub scratch:   &'static str,
}

/// Aggregate numbers for one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub elapsed_secs:  f32,
    pub agents:        u64,
    pub engaged:       u64,
    pub packs:         u64,
    pub despawned:     u64,
    pub target_health: f32,
}

/// A spawn or despawn.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentEventRow {
    pub tick:      u64,
    pub agent_id:  u32,
    pub archetype: &'static str,
    /// `spawned`, or the despawn reason.
    pub event:     &'static str,
}
