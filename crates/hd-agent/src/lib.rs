//! `hd-agent` — the per-agent blackboard and the interfaces it talks through.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`context`] | `AgentContext` (blackboard), `AgentSeed` (swap-surviving bits)|
//! | [`tuning`]  | `Tuning` movement/combat tunables, `MIN_TUNABLE` clamping     |
//! | [`scratch`] | `Scratch` tagged union + per-primitive state structs          |
//! | [`anim`]    | `AnimationSink` trait, `AnimFlag`, `AnimTrigger`, recorders   |
//! | [`target`]  | `TargetProvider` trait, `StaticTarget`                        |
//!
//! # Frame protocol
//!
//! Once per tick, before any behavior runs, the runtime calls
//! [`AgentContext::update_frame`].  That call snapshots the target position,
//! distance, and delta time; every primitive reads only from that snapshot so
//! one agent sees a consistent world for the whole of its update.

pub mod anim;
pub mod context;
pub mod scratch;
pub mod target;
pub mod tuning;

#[cfg(test)]
mod tests;

pub use anim::{AnimFlag, AnimRecorder, AnimTrigger, AnimationSink, NullSink, SharedAnim};
pub use context::{AgentContext, AgentSeed};
pub use scratch::{ChargeState, DriftState, FormationState, Scratch, ScratchSlot, ZigzagState};
pub use target::{StaticTarget, TargetProvider};
pub use tuning::{MIN_TUNABLE, Tuning, clamp_tunable};
