//! `hd-sim` — the agent runtime for the rust_horde behavior engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.sim.total_ticks:
//!   ① Index   — rebuild the R-tree from last tick's positions; snapshot
//!               each agent's frame (target position, distance, dt).
//!   ② Update  — BehaviorInstance::update per agent, ascending AgentId.
//!               Behaviors read shared services as left by the previous
//!               agent or tick and queue world effects as Intents.
//!   ③ Packs   — PackRegistry::update_all advances every coordinator.
//!   ④ Late    — cosmetic pass (animation flags only).
//!   ⑤ Apply   — Explode → damage agents in radius; Despawn → exit + remove;
//!               agents that were dead before ② are removed last.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hd_agent::StaticTarget;
//! use hd_behavior::HammerChargeConfig;
//! use hd_core::Vec2;
//! use hd_sim::{NoopObserver, RuntimeBuilder};
//!
//! let mut runtime = RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 100.0)).build()?;
//! runtime.create_agent(HammerChargeConfig::default(), Vec2::new(10.0, 0.0));
//! runtime.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod runtime;

#[cfg(test)]
mod tests;

pub use builder::{RuntimeBuilder, RuntimeConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use observer::{AgentSnapshot, DespawnReason, NoopObserver, RuntimeObserver, TickStats};
pub use runtime::AgentRuntime;
