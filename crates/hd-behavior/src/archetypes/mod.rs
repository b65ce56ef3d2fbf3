//! One module per archetype: its config, its FSM state, its `Behavior`.

pub mod boss;
pub mod direct;
pub mod hammer;
pub mod pack;
pub mod pufferfish;
pub mod ranged;
pub mod shark;
pub mod tank;

pub use boss::{Boss, BossConfig, BossPhase, BossPhaseStats, BossState};
pub use direct::{Direct, DirectConfig};
pub use hammer::{HammerCharge, HammerChargeConfig, HammerState};
pub use pack::{PackFormationAgent, PackFormationConfig, PiranhaPackAgent, PiranhaPackConfig};
pub use pufferfish::{Pufferfish, PufferfishConfig};
pub use ranged::{RangedOrbit, RangedOrbitConfig};
pub use shark::{SharkDefault, SharkDefaultConfig, SharkState};
pub use tank::{Tank, TankConfig, TankState};
