//! Simulation time model.
//!
//! # Design
//!
//! Time advances in fixed frames.  The canonical counter is an integer
//! `Tick`; the float delta handed to steering code comes from
//! `SimClock::tick_dt_secs`:
//!
//!   elapsed_secs = tick * tick_dt_secs
//!
//! Keeping the counter integral means "how many frames have passed" is exact
//! even though every steering primitive works in float seconds.

use std::fmt;

use crate::{HdError, HdResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps the frame counter to simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds one frame represents.  Default: 1/60.
    pub tick_dt_secs: f32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_dt_secs: f32) -> Self {
        Self { tick_dt_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        (self.current_tick.0 as f64 * self.tick_dt_secs as f64) as f32
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds per frame.  Default: 1/60.
    pub tick_dt_secs: f32,

    /// Total ticks `run` simulates.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_dt_secs:          1.0 / 60.0,
            total_ticks:           60 * 60,
            seed:                  0,
            output_interval_ticks: 60,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject a frame length the clock cannot advance by.
    pub fn validate(&self) -> HdResult<()> {
        if !(self.tick_dt_secs > 0.0) || !self.tick_dt_secs.is_finite() {
            return Err(HdError::Config(format!(
                "tick_dt_secs must be positive and finite, got {}",
                self.tick_dt_secs
            )));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_dt_secs)
    }
}
