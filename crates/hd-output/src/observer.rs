//! `TelemetryObserver<W>` — bridges `RuntimeObserver` to an `OutputWriter`.

use hd_behavior::ArchetypeKind;
use hd_core::{AgentId, PackId, Tick};
use hd_sim::{AgentSnapshot, DespawnReason, RuntimeObserver, TickStats};
use tracing::warn;

use crate::row::{AgentEventRow, AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`RuntimeObserver`] that writes snapshots, tick summaries and
/// lifecycle events to any [`OutputWriter`] backend.
///
/// Observer hooks cannot fail, so writer errors are stored.  After
/// `runtime.run()` returns, check with [`take_error`][Self::take_error].
pub struct TelemetryObserver<W: OutputWriter> {
    writer:       W,
    tick_dt_secs: f32,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> TelemetryObserver<W> {
    /// Create an observer backed by `writer`; `tick_dt_secs` converts ticks
    /// to elapsed seconds in the summary rows.
    pub fn new(writer: W, tick_dt_secs: f32) -> Self {
        Self {
            writer,
            tick_dt_secs,
            last_error: None,
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "telemetry write failed");
                self.last_error = Some(e);
            }
        }
    }

    fn event(&mut self, tick: Tick, agent: AgentId, kind: ArchetypeKind, event: &'static str) {
        let row = AgentEventRow {
            tick:      tick.0,
            agent_id:  agent.0,
            archetype: kind.as_str(),
            event,
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }
}

impl<W: OutputWriter> RuntimeObserver for TelemetryObserver<W> {
    fn on_tick_end(&mut self, stats: &TickStats) {
        let row = TickSummaryRow {
            tick:          stats.tick.0,
            elapsed_secs:  stats.tick.0 as f32 * self.tick_dt_secs,
            agents:        stats.agents as u64,
            engaged:       stats.engaged as u64,
            packs:         stats.packs as u64,
            despawned:     stats.despawned as u64,
            target_health: stats.target_health,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentSnapshot]) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|a| AgentSnapshotRow {
                agent_id:  a.agent.0,
                tick:      tick.0,
                archetype: a.kind.as_str(),
                x:         a.position.x,
                y:         a.position.y,
                health:    a.health,
                hittable:  a.hittable,
                engaged:   a.engaged,
                inert:     a.inert,
                control:   a.control.as_str(),
                pack_id:   a.pack.unwrap_or(PackId::INVALID).0,
                scratch:   a.scratch,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_agent_spawned(&mut self, tick: Tick, agent: AgentId, kind: ArchetypeKind) {
        self.event(tick, agent, kind, "spawned");
    }

    fn on_agent_despawned(
        &mut self,
        tick:   Tick,
        agent:  AgentId,
        kind:   ArchetypeKind,
        reason: DespawnReason,
    ) {
        self.event(tick, agent, kind, reason.as_str());
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
