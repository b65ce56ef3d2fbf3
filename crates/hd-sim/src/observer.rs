//! Runtime observer trait for progress reporting and telemetry.

use hd_behavior::{ArchetypeKind, Control};
use hd_core::{AgentId, PackId, Tick, Vec2};

/// Why an agent left the runtime.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DespawnReason {
    /// `destroy_agent` was called.
    Destroyed,
    /// Its health reached zero.
    Died,
    /// Its behavior emitted `Intent::Despawn`.
    SelfDestructed,
}

impl DespawnReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DespawnReason::Destroyed      => "destroyed",
            DespawnReason::Died           => "died",
            DespawnReason::SelfDestructed => "self_destructed",
        }
    }
}

/// Aggregate numbers for one finished tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickStats {
    pub tick:          Tick,
    /// Live agents after despawns.
    pub agents:        usize,
    /// Attack slots held.
    pub engaged:       usize,
    pub packs:         usize,
    pub despawned:     usize,
    pub target_health: f32,
}

/// One agent's state at a snapshot tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub agent:    AgentId,
    pub kind:     ArchetypeKind,
    pub position: Vec2,
    pub health:   f32,
    pub hittable: bool,
    pub engaged:  bool,
    pub inert:    bool,
    pub control:  Control,
    pub pack:     Option<PackId>,
    /// Active scratch variant, e.g. `"charge"`.
    pub scratch:  &'static str,
}

/// Callbacks invoked by [`AgentRuntime`][crate::AgentRuntime] at key
/// points in the tick loop.
///
/// All methods default to no-ops.  Spawn and despawn notifications that
/// happen between ticks (`create_agent`, `destroy_agent`) are delivered at
/// the start of the next tick, after `on_tick_start`.
pub trait RuntimeObserver {
    fn on_tick_start(&mut self, _tick: Tick) {}

    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called every `output_interval_ticks` ticks, after `on_tick_end`.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[AgentSnapshot]) {}

    fn on_agent_spawned(&mut self, _tick: Tick, _agent: AgentId, _kind: ArchetypeKind) {}

    fn on_agent_despawned(
        &mut self,
        _tick:   Tick,
        _agent:  AgentId,
        _kind:   ArchetypeKind,
        _reason: DespawnReason,
    ) {}

    /// Called once after the final tick of [`run`][crate::AgentRuntime::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`RuntimeObserver`] that does nothing.
pub struct NoopObserver;

impl RuntimeObserver for NoopObserver {}
