//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentEventRow, AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Sink for telemetry rows.
///
/// Errors are returned here but swallowed by the observer, which keeps the
/// first one for [`TelemetryObserver::take_error`][crate::TelemetryObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write one lifecycle event.
    fn write_event(&mut self, row: &AgentEventRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
