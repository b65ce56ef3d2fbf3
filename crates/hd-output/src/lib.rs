//! `hd-output` — telemetry writers for the rust_horde agent runtime.
//!
//! | Backend  | Files created                                                   |
//! |----------|-----------------------------------------------------------------|
//! | CSV      | `agent_snapshots.csv`, `tick_summaries.csv`, `agent_events.csv` |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`TelemetryObserver`], which implements `hd_sim::RuntimeObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hd_output::{CsvWriter, TelemetryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TelemetryObserver::new(writer, runtime.config().sim.tick_dt_secs);
//! runtime.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TelemetryObserver;
pub use row::{AgentEventRow, AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
