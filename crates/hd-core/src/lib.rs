//! `hd-core` — foundational types for the `rust_horde` behavior engine.
//!
//! This crate is a dependency of every other `hd-*` crate.  It intentionally
//! has no `hd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `PackId`                                   |
//! | [`geo`]         | `Vec2`, angle helpers                                 |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`layer`]       | `FactionLayer` enum                                   |
//! | [`error`]       | `HdError`, `HdResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod layer;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{HdError, HdResult};
pub use geo::{Vec2, lerp_angle, wrap_angle};
pub use ids::{AgentId, PackId};
pub use layer::FactionLayer;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
