//! `hd-steer` — movement and action primitives.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`separation`]  | Cubic-falloff divergence push between same-layer agents    |
//! | [`motion`]      | `move_towards` (eased), `chase`, `dash`, `hold`            |
//! | [`orbit`]       | Smoothed-angle ring orbit                                  |
//! | [`zigzag`]      | Sinusoidal weave around a chase line                       |
//! | [`drift`]       | Biased wander with periodic pulse dashes                   |
//! | [`charge`]      | Windup → execute → cooldown commit attack                  |
//! | [`lurk`]        | Ring-holding lurk and straight-line retreat                |
//! | [`formation`]   | Pack slot geometry, form-up, and pack chase                |
//! | [`actions`]     | `attack`, `stop_attack`, `set_moving`, `respawn`           |
//!
//! Every primitive takes the agent's [`AgentContext`][hd_agent::AgentContext]
//! and reads only its frame snapshot, so calling order inside one agent's
//! update never changes what another agent sees.  Primitives that need
//! memory between frames keep it in the context's scratch slot; no primitive
//! holds state of its own.
//!
//! The primitives are public for hosts that compose their own behaviors.
//! [`drift`] is one of those: no built-in archetype calls it.

pub mod actions;
pub mod charge;
pub mod drift;
pub mod formation;
pub mod lurk;
pub mod motion;
pub mod orbit;
pub mod separation;
pub mod zigzag;

#[cfg(test)]
mod tests;

pub use actions::{attack, respawn, set_moving, stop_attack};
pub use charge::{cooldown, execute_charge, reset_charge, windup};
pub use drift::{DriftParams, drift};
pub use formation::{FORMED_TOLERANCE, form_up, pack_chase, slot_position};
pub use lurk::{lurk, retreat};
pub use motion::{chase, dash, hold, move_towards};
pub use orbit::orbit;
pub use separation::separation;
pub use zigzag::{zigzag, zigzag_wobble};
