//! Animation-intent sink.
//!
//! The engine never drives clips directly.  It raises abstract flags
//! ("moving", "attacking", …) and fires one-shot triggers; whatever owns the
//! sprite decides what those mean.  Calls are fire-and-forget.

use std::sync::{Arc, Mutex};

/// A sustained animation state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimFlag {
    Moving,
    Attacking,
    WindingUp,
    Charging,
    Submerged,
}

impl AnimFlag {
    pub const COUNT: usize = 5;

    pub const ALL: [AnimFlag; Self::COUNT] = [
        AnimFlag::Moving,
        AnimFlag::Attacking,
        AnimFlag::WindingUp,
        AnimFlag::Charging,
        AnimFlag::Submerged,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnimFlag::Moving    => "moving",
            AnimFlag::Attacking => "attacking",
            AnimFlag::WindingUp => "winding_up",
            AnimFlag::Charging  => "charging",
            AnimFlag::Submerged => "submerged",
        }
    }
}

/// A one-shot animation event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimTrigger {
    Attack,
    Hurt,
    Respawn,
    Explode,
    Dive,
    Surface,
}

/// Receiver of animation intents for one agent.
pub trait AnimationSink: Send {
    fn set_flag(&mut self, flag: AnimFlag, on: bool);
    fn trigger(&mut self, trigger: AnimTrigger);
}

/// A sink that discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl AnimationSink for NullSink {
    fn set_flag(&mut self, _flag: AnimFlag, _on: bool) {}
    fn trigger(&mut self, _trigger: AnimTrigger) {}
}

/// A sink that records the current flags and every trigger it receives.
#[derive(Clone, Debug, Default)]
pub struct AnimRecorder {
    flags:    [bool; AnimFlag::COUNT],
    triggers: Vec<AnimTrigger>,
}

impl AnimRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_set(&self, flag: AnimFlag) -> bool {
        self.flags[flag.index()]
    }

    pub fn triggers(&self) -> &[AnimTrigger] {
        &self.triggers
    }

    /// Drain recorded triggers.
    pub fn take_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.triggers)
    }
}

impl AnimationSink for AnimRecorder {
    fn set_flag(&mut self, flag: AnimFlag, on: bool) {
        self.flags[flag.index()] = on;
    }

    fn trigger(&mut self, trigger: AnimTrigger) {
        self.triggers.push(trigger);
    }
}

/// A recorder the host can keep a handle to after giving the sink away.
///
/// Clones share the same recorder.
#[derive(Clone, Debug, Default)]
pub struct SharedAnim(Arc<Mutex<AnimRecorder>>);

impl SharedAnim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the shared recorder.  A poisoned lock is recovered.
    pub fn with<R>(&self, f: impl FnOnce(&mut AnimRecorder) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl AnimationSink for SharedAnim {
    fn set_flag(&mut self, flag: AnimFlag, on: bool) {
        self.with(|r| r.set_flag(flag, on));
    }

    fn trigger(&mut self, trigger: AnimTrigger) {
        self.with(|r| r.trigger(trigger));
    }
}
