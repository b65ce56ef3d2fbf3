//! `hd-coord` — services agents share instead of global trackers.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`arbiter`]  | `AttackSlotArbiter` — bounded set of engaged agents          |
//! | [`pack`]     | `PackCoordinator`, `PackPhase`, `PackParams`                 |
//! | [`registry`] | `PackRegistry` — owns every live coordinator, disbands empties|
//! | [`error`]    | `CoordError`, `CoordResult<T>`                               |
//!
//! Both services are owned by the runtime and lent to behaviors for the
//! length of one call.  Agents hold only their own `AgentId` and, for pack
//! members, a `PackId` used for lookup; neither keeps a coordinator alive.

pub mod arbiter;
pub mod error;
pub mod pack;
pub mod registry;

#[cfg(test)]
mod tests;

pub use arbiter::{AttackSlotArbiter, DEFAULT_CAPACITY};
pub use error::{CoordError, CoordResult};
pub use pack::{PackCoordinator, PackParams, PackPhase};
pub use registry::{DEFAULT_MAX_PACK_SIZE, PackRegistry};
