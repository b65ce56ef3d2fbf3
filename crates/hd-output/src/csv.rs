//! CSV output backend.
//!
//! Creates three files in the output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//! - `agent_events.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentEventRow, AgentSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 12] = [
    "agent_id", "tick", "archetype", "x", "y", "health",
    "hittable", "engaged", "inert", "control", "pack_id", "scratch",
];

pub const SUMMARY_HEADER: [&str; 7] = [
    "tick", "elapsed_secs", "agents", "engaged", "packs", "despawned", "target_health",
];

pub const EVENT_HEADER: [&str; 4] = ["tick", "agent_id", "archetype", "event"];

/// Writes telemetry to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    events:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files in it, and write the
    /// header rows.  Existing files are truncated.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut events = Writer::from_path(dir.join("agent_events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        Ok(Self {
            snapshots,
            summaries,
            events,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.archetype.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.health.to_string(),
                (row.hittable as u8).to_string(),
                (row.engaged as u8).to_string(),
                (row.inert as u8).to_string(),
                row.control.to_owned(),
                row.pack_id.to_string(),
                row.scratch.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.agents.to_string(),
            row.engaged.to_string(),
            row.packs.to_string(),
            row.despawned.to_string(),
            row.target_health.to_string(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &AgentEventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.archetype.to_owned(),
            row.event.to_owned(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
