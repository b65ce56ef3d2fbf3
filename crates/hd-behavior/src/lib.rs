//! `hd-behavior` — archetype state machines and everything that picks,
//! configures, and modulates them.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`behavior`]   | `Behavior` trait: enter / update / late-update / exit       |
//! | [`services`]   | `Services` lent per call, `Intent` handed back              |
//! | [`archetypes`] | One FSM per archetype, each with its config                 |
//! | [`config`]     | `ArchetypeKind`, `ArchetypeConfig`, `BehaviorConfig`        |
//! | [`modulators`] | Perception, tactics, and submersion takeovers               |
//! | [`instance`]   | `Archetype` dispatch enum, `BehaviorInstance` lifecycle     |
//! | [`selector`]   | `BehaviorPool`, weighted `BehaviorSelector`                 |
//! | [`loader`]     | CSV pool loader                                             |
//! | [`common`]     | `Cooldown`, respawn check, strike helper                    |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                        |
//!
//! # Tick contract
//!
//! A behavior never sees another agent's context.  It reads its own frame
//! snapshot, the spatial view, and the services it was lent; anything that
//! reaches outside the agent (despawns, area damage) goes back to the
//! runtime as an [`Intent`].

pub mod archetypes;
pub mod behavior;
pub mod common;
pub mod config;
pub mod error;
pub mod instance;
pub mod loader;
pub mod modulators;
pub mod selector;
pub mod services;


pub use archetypes::{
    Boss, BossConfig, BossPhase, BossPhaseStats, BossState, Direct, DirectConfig, HammerCharge,
    HammerChargeConfig, HammerState, PackFormationAgent, PackFormationConfig, PiranhaPackAgent,
    PiranhaPackConfig, Pufferfish, PufferfishConfig, RangedOrbit, RangedOrbitConfig, SharkDefault,
    SharkDefaultConfig, SharkState, Tank, TankConfig, TankState,
};
pub use behavior::Behavior;
pub use config::{ArchetypeConfig, ArchetypeKind, BehaviorConfig};
pub use error::{BehaviorError, BehaviorResult};
pub use instance::{Archetype, BehaviorInstance};
pub use loader::{load_pool_csv, load_pool_reader};
pub use modulators::{Control, ModulatorState, Modulators, Perception, Submersion, Tactics};
pub use selector::{BehaviorPool, BehaviorSelector, WeightedConfig};
pub use services::{Intent, Services};
