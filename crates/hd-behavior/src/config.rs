//! Behavior configs: one tunable bundle per archetype, plus modulators.

use std::fmt;
use std::str::FromStr;

use hd_agent::Tuning;

use crate::archetypes::{
    BossConfig, DirectConfig, HammerChargeConfig, PackFormationConfig, PiranhaPackConfig,
    PufferfishConfig, RangedOrbitConfig, SharkDefaultConfig, TankConfig,
};
use crate::{BehaviorError, Modulators};

// ── ArchetypeKind ─────────────────────────────────────────────────────────────

/// The closed set of archetypes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArchetypeKind {
    Direct,
    RangedOrbit,
    HammerCharge,
    SharkDefault,
    Tank,
    Boss,
    PackFormation,
    PiranhaPack,
    Pufferfish,
}

impl ArchetypeKind {
    pub const ALL: [ArchetypeKind; 9] = [
        ArchetypeKind::Direct,
        ArchetypeKind::RangedOrbit,
        ArchetypeKind::HammerCharge,
        ArchetypeKind::SharkDefault,
        ArchetypeKind::Tank,
        ArchetypeKind::Boss,
        ArchetypeKind::PackFormation,
        ArchetypeKind::PiranhaPack,
        ArchetypeKind::Pufferfish,
    ];

    /// The snake-case name used in pool files and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ArchetypeKind::Direct        => "direct",
            ArchetypeKind::RangedOrbit   => "ranged_orbit",
            ArchetypeKind::HammerCharge  => "hammer_charge",
            ArchetypeKind::SharkDefault  => "shark_default",
            ArchetypeKind::Tank          => "tank",
            ArchetypeKind::Boss          => "boss",
            ArchetypeKind::PackFormation => "pack_formation",
            ArchetypeKind::PiranhaPack   => "piranha_pack",
            ArchetypeKind::Pufferfish    => "pufferfish",
        }
    }
}

impl fmt::Display for ArchetypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchetypeKind {
    type Err = BehaviorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ArchetypeKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| BehaviorError::UnknownArchetype(name.to_owned()))
    }
}

// ── ArchetypeConfig ───────────────────────────────────────────────────────────

/// Per-archetype tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArchetypeConfig {
    Direct(DirectConfig),
    RangedOrbit(RangedOrbitConfig),
    HammerCharge(HammerChargeConfig),
    SharkDefault(SharkDefaultConfig),
    Tank(TankConfig),
    Boss(BossConfig),
    PackFormation(PackFormationConfig),
    PiranhaPack(PiranhaPackConfig),
    Pufferfish(PufferfishConfig),
}

/// Apply `$body` to whichever config `$cfg` holds, bound as `$c`.
macro_rules! each_config {
    ($cfg:expr, $c:ident => $body:expr) => {
        match $cfg {
            ArchetypeConfig::Direct($c)        => $body,
            ArchetypeConfig::RangedOrbit($c)   => $body,
            ArchetypeConfig::HammerCharge($c)  => $body,
            ArchetypeConfig::SharkDefault($c)  => $body,
            ArchetypeConfig::Tank($c)          => $body,
            ArchetypeConfig::Boss($c)          => $body,
            ArchetypeConfig::PackFormation($c) => $body,
            ArchetypeConfig::PiranhaPack($c)   => $body,
            ArchetypeConfig::Pufferfish($c)    => $body,
        }
    };
}

impl ArchetypeConfig {
    /// The default config for `kind`.
    pub fn defaults(kind: ArchetypeKind) -> Self {
        match kind {
            ArchetypeKind::Direct        => Self::Direct(DirectConfig::default()),
            ArchetypeKind::RangedOrbit   => Self::RangedOrbit(RangedOrbitConfig::default()),
            ArchetypeKind::HammerCharge  => Self::HammerCharge(HammerChargeConfig::default()),
            ArchetypeKind::SharkDefault  => Self::SharkDefault(SharkDefaultConfig::default()),
            ArchetypeKind::Tank          => Self::Tank(TankConfig::default()),
            ArchetypeKind::Boss          => Self::Boss(BossConfig::default()),
            ArchetypeKind::PackFormation => Self::PackFormation(PackFormationConfig::default()),
            ArchetypeKind::PiranhaPack   => Self::PiranhaPack(PiranhaPackConfig::default()),
            ArchetypeKind::Pufferfish    => Self::Pufferfish(PufferfishConfig::default()),
        }
    }

    pub fn kind(&self) -> ArchetypeKind {
        match self {
            Self::Direct(_)        => ArchetypeKind::Direct,
            Self::RangedOrbit(_)   => ArchetypeKind::RangedOrbit,
            Self::HammerCharge(_)  => ArchetypeKind::HammerCharge,
            Self::SharkDefault(_)  => ArchetypeKind::SharkDefault,
            Self::Tank(_)          => ArchetypeKind::Tank,
            Self::Boss(_)          => ArchetypeKind::Boss,
            Self::PackFormation(_) => ArchetypeKind::PackFormation,
            Self::PiranhaPack(_)   => ArchetypeKind::PiranhaPack,
            Self::Pufferfish(_)    => ArchetypeKind::Pufferfish,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        each_config!(self, c => &c.tuning)
    }

    pub fn tuning_mut(&mut self) -> &mut Tuning {
        each_config!(self, c => &mut c.tuning)
    }

    /// Override the archetype's headline damage number.  For the boss every
    /// phase is scaled so phase 1 deals `damage`.
    pub fn set_damage(&mut self, damage: f32) {
        match self {
            Self::Direct(c)        => c.damage = damage,
            Self::RangedOrbit(c)   => c.damage = damage,
            Self::HammerCharge(c)  => c.damage = damage,
            Self::SharkDefault(c)  => c.damage = damage,
            Self::Tank(c)          => c.melee_damage = damage,
            Self::Boss(c)          => c.scale_damage(damage),
            Self::PackFormation(c) => c.damage = damage,
            Self::PiranhaPack(c)   => c.bite_damage = damage,
            Self::Pufferfish(c)    => c.explosion_damage = damage,
        }
    }

    /// Clamp every invalid tunable in place.
    pub fn sanitize(&mut self) {
        each_config!(self, c => c.sanitize())
    }
}

// ── BehaviorConfig ────────────────────────────────────────────────────────────

/// An archetype config plus the modulators layered over it.  Immutable once
/// handed to the runtime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorConfig {
    pub archetype:  ArchetypeConfig,
    pub modulators: Modulators,
}

impl BehaviorConfig {
    pub fn new(archetype: ArchetypeConfig) -> Self {
        Self { archetype, modulators: Modulators::default() }
    }

    pub fn defaults(kind: ArchetypeKind) -> Self {
        Self::new(ArchetypeConfig::defaults(kind))
    }

    pub fn with_modulators(mut self, modulators: Modulators) -> Self {
        self.modulators = modulators;
        self
    }

    pub fn kind(&self) -> ArchetypeKind {
        self.archetype.kind()
    }

    pub fn tuning(&self) -> &Tuning {
        self.archetype.tuning()
    }

    /// A copy with every invalid tunable clamped.
    pub fn sanitized(mut self) -> Self {
        self.archetype.sanitize();
        self.modulators.sanitize();
        self
    }
}

macro_rules! config_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for BehaviorConfig {
                fn from(config: $ty) -> Self {
                    BehaviorConfig::new(ArchetypeConfig::$variant(config))
                }
            }
        )*
    };
}

config_from! {
    DirectConfig        => Direct,
    RangedOrbitConfig   => RangedOrbit,
    HammerChargeConfig  => HammerCharge,
    SharkDefaultConfig  => SharkDefault,
    TankConfig          => Tank,
    BossConfig          => Boss,
    PackFormationConfig => PackFormation,
    PiranhaPackConfig   => PiranhaPack,
    PufferfishConfig    => Pufferfish,
}
