//! `BehaviorInstance`: one agent's context, archetype FSM, and modulator
//! state, wired through the enter / update / late-update / exit lifecycle.

use hd_agent::{AgentContext, AgentSeed};
use hd_core::Vec2;
use hd_steer::hold;
use tracing::{debug, warn};

use crate::archetypes::{
    Boss, Direct, HammerCharge, PackFormationAgent, PiranhaPackAgent, Pufferfish, RangedOrbit,
    SharkDefault, Tank,
};
use crate::modulators::{Control, ModulatorState};
use crate::{
    ArchetypeConfig, ArchetypeKind, Behavior, BehaviorConfig, BehaviorError, BehaviorResult,
    Services,
};

// ── Archetype ─────────────────────────────────────────────────────────────────

/// The closed set of archetype state machines, dispatched by `match`.
#[derive(Clone, Debug)]
pub enum Archetype {
    Direct(Direct),
    RangedOrbit(RangedOrbit),
    HammerCharge(HammerCharge),
    SharkDefault(SharkDefault),
    Tank(Tank),
    Boss(Boss),
    PackFormation(PackFormationAgent),
    PiranhaPack(PiranhaPackAgent),
    Pufferfish(Pufferfish),
}

macro_rules! each_archetype {
    ($arch:expr, $b:ident => $body:expr) => {
        match $arch {
            Archetype::Direct($b)        => $body,
            Archetype::RangedOrbit($b)   => $body,
            Archetype::HammerCharge($b)  => $body,
            Archetype::SharkDefault($b)  => $body,
            Archetype::Tank($b)          => $body,
            Archetype::Boss($b)          => $body,
            Archetype::PackFormation($b) => $body,
            Archetype::PiranhaPack($b)   => $body,
            Archetype::Pufferfish($b)    => $body,
        }
    };
}

impl Archetype {
    /// A fresh state machine for `config`, in its initial state.
    pub fn from_config(config: &BehaviorConfig) -> Self {
        match &config.archetype {
            ArchetypeConfig::Direct(c)        => Self::Direct(Direct::new(c.clone())),
            ArchetypeConfig::RangedOrbit(c)   => Self::RangedOrbit(RangedOrbit::new(c.clone())),
            ArchetypeConfig::HammerCharge(c)  => Self::HammerCharge(HammerCharge::new(c.clone())),
            ArchetypeConfig::SharkDefault(c)  => Self::SharkDefault(SharkDefault::new(c.clone())),
            ArchetypeConfig::Tank(c)          => Self::Tank(Tank::new(c.clone())),
            ArchetypeConfig::Boss(c)          => Self::Boss(Boss::new(c.clone())),
            ArchetypeConfig::PackFormation(c) => Self::PackFormation(PackFormationAgent::new(c.clone())),
            ArchetypeConfig::PiranhaPack(c)   => Self::PiranhaPack(PiranhaPackAgent::new(c.clone())),
            ArchetypeConfig::Pufferfish(c)    => Self::Pufferfish(Pufferfish::new(c.clone())),
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
}

impl Behavior for Archetype {
    fn on_enter(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) -> BehaviorResult<()> {
        each_archetype!(self, b => b.on_enter(ctx, svc))
    }

    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        each_archetype!(self, b => b.on_update(ctx, svc))
    }

    fn on_late_update(&mut self, ctx: &mut AgentContext) {
        each_archetype!(self, b => b.on_late_update(ctx))
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        each_archetype!(self, b => b.on_exit(ctx, svc))
    }

    fn interrupt(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        each_archetype!(self, b => b.interrupt(ctx, svc))
    }

    fn is_committed(&self) -> bool {
        each_archetype!(self, b => b.is_committed())
    }

    fn reacts_to_death(&self) -> bool {
        each_archetype!(self, b => b.reacts_to_death())
    }
}

// ── BehaviorInstance ──────────────────────────────────────────────────────────

/// A live agent's behavior.
///
/// Lifecycle: [`enter`](Self::enter) once, then per tick
/// [`frame`](Self::frame), [`update`](Self::update),
/// [`late_update`](Self::late_update); finally [`exit`](Self::exit), which
/// hands back the seed for a hot swap.
pub struct BehaviorInstance {
    config:     BehaviorConfig,
    archetype:  Archetype,
    modulators: Option<ModulatorState>,
    ctx:        Option<AgentContext>,
    /// Entered without a target: holds still and never engages.
    inert:      bool,
}

impl BehaviorInstance {
    /// Instantiate `config` (sanitized first).  The agent has no context
    /// until [`enter`](Self::enter).
    pub fn new(config: BehaviorConfig) -> Self {
        let config    = config.sanitized();
        let archetype = Archetype::from_config(&config);
        Self { config, archetype, modulators: None, ctx: None, inert: false }
    }

    /// Build the context from `seed` and run the archetype's `on_enter`.
    ///
    /// # Errors
    ///
    /// [`BehaviorError::TargetUnavailable`] if the target cannot be
    /// resolved.  The instance still owns a context and stays inert: it
    /// holds position and can be exited normally.  Errors from `on_enter`
    /// are passed through.
    pub fn enter(&mut self, seed: AgentSeed, svc: &mut Services<'_>) -> BehaviorResult<()> {
        let mut ctx = AgentContext::new(seed, self.config.tuning().clone());
        self.inert = false;

        let Some(target) = svc.target.target_position() else {
            warn!(agent = %ctx.id, kind = %self.kind(), "target unavailable; agent inert");
            let id = ctx.id;
            self.inert = true;
            self.ctx = Some(ctx);
            return Err(BehaviorError::TargetUnavailable(id));
        };

        ctx.update_frame(target, 0.0, 0.0);
        self.modulators = Some(ModulatorState::new(&self.config.modulators, &mut ctx));
        let result = self.archetype.on_enter(&mut ctx, svc);
        debug!(agent = %ctx.id, kind = %self.kind(), "behavior entered");
        self.ctx = Some(ctx);
        result
    }

    /// Snapshot the frame before this tick's update.
    pub fn frame(&mut self, target: Vec2, dt: f32, time: f32) {
        if let Some(ctx) = &mut self.ctx {
            ctx.update_frame(target, dt, time);
        }
    }

    /// Run one tick: modulators decide who drives, then either they or the
    /// archetype move the agent.  Damage recorded since the last tick is
    /// drained afterwards.
    pub fn update(&mut self, svc: &mut Services<'_>) {
        let Some(ctx) = &mut self.ctx else { return };

        if self.inert || (ctx.is_dead() && !self.archetype.reacts_to_death()) {
            hold(ctx);
            ctx.take_damage();
            return;
        }

        let control = match &mut self.modulators {
            Some(state) => {
                let committed = self.archetype.is_committed();
                let (control, took_over) = state.decide(&self.config.modulators, ctx, committed);
                if took_over {
                    self.archetype.interrupt(ctx, svc);
                }
                control
            }
            None => Control::Archetype,
        };

        match (control, &self.modulators) {
            (Control::Archetype, _) | (_, None) => self.archetype.on_update(ctx, svc),
            (_, Some(state)) => state.drive(&self.config.modulators, ctx, svc.spatial),
        }
        ctx.take_damage();
    }

    /// Cosmetic pass after every agent has updated.
    pub fn late_update(&mut self) {
        if let Some(ctx) = &mut self.ctx {
            self.archetype.on_late_update(ctx);
        }
    }

    /// Release shared resources and hand back the seed.  `None` if the
    /// instance was never entered or has already exited.
    pub fn exit(&mut self, svc: &mut Services<'_>) -> Option<AgentSeed> {
        let mut ctx = self.ctx.take()?;
        self.archetype.on_exit(&mut ctx, svc);
        self.modulators = None;
        debug!(agent = %ctx.id, kind = %self.kind(), "behavior exited");
        Some(ctx.into_seed())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn context(&self) -> Option<&AgentContext> {
        self.ctx.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut AgentContext> {
        self.ctx.as_mut()
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn kind(&self) -> ArchetypeKind {
        self.archetype.kind()
    }

    pub fn archetype(&self) -> &Archetype {
        &self.archetype
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Who drove the agent on its last update.
    pub fn control(&self) -> Control {
        self.modulators.as_ref().map_or(Control::Archetype, ModulatorState::control)
    }
}
