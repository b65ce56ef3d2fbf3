//! `hd-spatial` — the spatial-query seam used for separation, pack centers,
//! and line-of-sight checks.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`query`] | `SpatialQuery` trait, `EntityRef`, `EmptyWorld`               |
//! | [`index`] | `AgentIndex` — R-tree over agent bodies, rebuilt every tick   |
//! | [`error`] | `SpatialError`, `SpatialResult<T>`                            |
//!
//! The engine only ever talks to [`SpatialQuery`]; a host with its own
//! physics world can implement the trait directly and skip [`AgentIndex`].

pub mod error;
pub mod index;
pub mod query;


pub use error::{SpatialError, SpatialResult};
pub use index::AgentIndex;
pub use query::{EmptyWorld, EntityRef, SpatialQuery};
