//! `PackCoordinator` — one shared phase machine per pack.
//!
//! ```text
//!  Circling ──(member within trigger, or chance after wait)──▶ Closing
//!     ▲                                                          │
//!     │ (≥ n-1 formed, or timeout)     (≥ max(2, n/2) close, or timeout)
//!     │                                                          ▼
//!  Regrouping ◀───────────────(swarm duration elapsed)────── Swarming
//! ```
//!
//! Transitions only ever move one step forward around that cycle.  The
//! coordinator reads member positions through a lookup closure during
//! [`PackCoordinator::update`]; members read the resulting phase, center,
//! and ring on their next update.

use std::collections::BTreeSet;
use std::f32::consts::TAU;
use std::fmt;

use hd_core::{AgentId, PackId, SimRng, Vec2};
use tracing::debug;

// ── PackPhase ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackPhase {
    #[default]
    Circling,
    Closing,
    Swarming,
    Regrouping,
}

impl PackPhase {
    /// The phase that follows `self` around the cycle.
    pub fn next(self) -> PackPhase {
        match self {
            PackPhase::Circling   => PackPhase::Closing,
            PackPhase::Closing    => PackPhase::Swarming,
            PackPhase::Swarming   => PackPhase::Regrouping,
            PackPhase::Regrouping => PackPhase::Circling,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PackPhase::Circling   => "circling",
            PackPhase::Closing    => "closing",
            PackPhase::Swarming   => "swarming",
            PackPhase::Regrouping => "regrouping",
        }
    }
}

impl fmt::Display for PackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PackParams ────────────────────────────────────────────────────────────────

/// Timings and distances shared by every pack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackParams {
    /// Any member this close to the target starts Closing.
    pub trigger_distance: f32,
    /// Members this close count toward the Closing → Swarming quorum.
    pub close_distance:   f32,
    /// Seconds of Circling between chance rolls.
    pub circling_wait:    f32,
    /// Probability each roll starts Closing.
    pub closing_chance:   f64,
    pub closing_timeout:  f32,
    pub swarm_duration:   f32,
    pub regroup_timeout:  f32,
    /// Formation rotation, radians per second.
    pub rotation_rate:    f32,
    pub ring_min:         f32,
    pub ring_max:         f32,
    /// Per-member delay before joining a swarm, in member-index order.
    pub stagger_delay:    f32,
}

impl Default for PackParams {
    fn default() -> Self {
        Self {
            trigger_distance: 6.0,
            close_distance:   4.0,
            circling_wait:    3.0,
            closing_chance:   0.5,
            closing_timeout:  5.0,
            swarm_duration:   4.0,
            regroup_timeout:  6.0,
            rotation_rate:    0.3,
            ring_min:         8.0,
            ring_max:         14.0,
            stagger_delay:    0.15,
        }
    }
}

// ── PackCoordinator ───────────────────────────────────────────────────────────

/// Shared state for one pack.
#[derive(Clone, Debug)]
pub struct PackCoordinator {
    id:            PackId,
    params:        PackParams,
    members:       Vec<AgentId>,
    phase:         PackPhase,
    center:        Vec2,
    ring_radius:   f32,
    /// Seconds in the current phase.
    phase_elapsed: f32,
    /// Seconds since the last Circling chance roll.
    wait_elapsed:  f32,
    /// Seconds since the pack formed; drives formation rotation.
    elapsed:       f32,
    formed:        BTreeSet<AgentId>,
}

impl PackCoordinator {
    pub fn new(id: PackId, params: PackParams) -> Self {
        let ring_radius = params.ring_min;
        Self {
            id,
            params,
            members:       Vec::new(),
            phase:         PackPhase::Circling,
            center:        Vec2::ZERO,
            ring_radius,
            phase_elapsed: 0.0,
            wait_elapsed:  0.0,
            elapsed:       0.0,
            formed:        BTreeSet::new(),
        }
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Append `agent` and return its member index.  Joining twice returns
    /// the existing index.
    pub fn join(&mut self, agent: AgentId) -> usize {
        if let Some(index) = self.index_of(agent) {
            return index;
        }
        self.members.push(agent);
        self.members.len() - 1
    }

    /// Remove `agent`.  Later members shift down one slot.  Returns whether
    /// it was a member.
    pub fn leave(&mut self, agent: AgentId) -> bool {
        self.formed.remove(&agent);
        match self.index_of(agent) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, agent: AgentId) -> Option<usize> {
        self.members.iter().position(|&m| m == agent)
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.index_of(agent).is_some()
    }

    pub fn members(&self) -> &[AgentId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    // ── Read side ─────────────────────────────────────────────────────────

    pub fn id(&self) -> PackId {
        self.id
    }

    pub fn phase(&self) -> PackPhase {
        self.phase
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn ring_radius(&self) -> f32 {
        self.ring_radius
    }

    pub fn phase_elapsed(&self) -> f32 {
        self.phase_elapsed
    }

    pub fn params(&self) -> &PackParams {
        &self.params
    }

    /// Formation angle of the member at `index`:
    /// `index / count · 2π + elapsed · rotation_rate`.
    pub fn slot_angle(&self, index: usize) -> f32 {
        let count = self.members.len().max(1) as f32;
        index as f32 / count * TAU + self.elapsed * self.params.rotation_rate
    }

    /// Formation angle of `agent`, if it is a member.
    pub fn formation_angle(&self, agent: AgentId) -> Option<f32> {
        self.index_of(agent).map(|index| self.slot_angle(index))
    }

    /// Seconds `agent` waits after Swarming starts before it pushes in.
    pub fn stagger(&self, agent: AgentId) -> f32 {
        self.index_of(agent).unwrap_or(0) as f32 * self.params.stagger_delay
    }

    /// `true` once the swarm has run long enough for `agent` to join.
    pub fn swarm_released(&self, agent: AgentId) -> bool {
        self.phase == PackPhase::Swarming && self.phase_elapsed >= self.stagger(agent)
    }

    // ── Write side ────────────────────────────────────────────────────────

    /// Record whether `agent` currently sits in its formation slot.  Only
    /// counted while Regrouping.
    pub fn report_formed(&mut self, agent: AgentId, formed: bool) {
        if !self.contains(agent) {
            return;
        }
        if formed {
            self.formed.insert(agent);
        } else {
            self.formed.remove(&agent);
        }
    }

    pub fn formed_count(&self) -> usize {
        self.formed.len()
    }

    /// Advance the phase machine by `dt`.
    ///
    /// `position_of` resolves member positions; members it cannot resolve
    /// are left out of the center and the distance guards.  Returns the new
    /// phase if a transition happened.
    pub fn update<F>(
        &mut self,
        dt:          f32,
        target:      Vec2,
        rng:         &mut SimRng,
        position_of: F,
    ) -> Option<PackPhase>
    where
        F: Fn(AgentId) -> Option<Vec2>,
    {
        self.elapsed += dt;
        self.phase_elapsed += dt;

        let positions: Vec<Vec2> = self.members.iter().filter_map(|&m| position_of(m)).collect();
        self.center = if positions.is_empty() {
            target
        } else {
            positions.iter().fold(Vec2::ZERO, |acc, &p| acc + p) / positions.len() as f32
        };

        let distances: Vec<f32> = positions.iter().map(|p| p.distance(target)).collect();
        let p = &self.params;
        if !distances.is_empty() {
            let mean = distances.iter().sum::<f32>() / distances.len() as f32;
            self.ring_radius = mean.clamp(p.ring_min.min(p.ring_max), p.ring_max.max(p.ring_min));
        }

        let n = self.members.len();
        let advance = match self.phase {
            PackPhase::Circling => {
                self.wait_elapsed += dt;
                if distances.iter().any(|&d| d <= p.trigger_distance) {
                    true
                } else if self.wait_elapsed >= p.circling_wait {
                    self.wait_elapsed = 0.0;
                    rng.gen_bool(p.closing_chance)
                } else {
                    false
                }
            }
            PackPhase::Closing => {
                let close = distances.iter().filter(|&&d| d <= p.close_distance).count();
                close >= (n / 2).max(2) || self.phase_elapsed >= p.closing_timeout
            }
            PackPhase::Swarming => self.phase_elapsed >= p.swarm_duration,
            PackPhase::Regrouping => {
                self.formed.len() + 1 >= n || self.phase_elapsed >= p.regroup_timeout
            }
        };

        if !advance {
            return None;
        }
        let from = self.phase;
        self.phase = from.next();
        self.phase_elapsed = 0.0;
        self.wait_elapsed = 0.0;
        self.formed.clear();
        debug!(pack = %self.id, %from, to = %self.phase, members = n, "pack phase");
        Some(self.phase)
    }
}
