//! Boss: approach, wind up, strike, with stats chosen by the target's
//! remaining health.
//!
//! | Target health | Phase                                             |
//! |---------------|---------------------------------------------------|
//! | `> 0.66`      | `Phase1`                                          |
//! | `> 0.33`      | `Phase2`                                          |
//! | otherwise     | `Phase3`, berserk: rate and damage multipliers on |
//!
//! The phase is re-derived every tick, so it follows the target's health
//! in either direction.

use hd_agent::{AgentContext, AnimFlag, Tuning, clamp_tunable};
use hd_steer::{attack, hold, move_towards, stop_attack};
use tracing::{debug, info};

use crate::common::{Cooldown, clamp_non_negative, respawn_if_far, strike};
use crate::{Behavior, Services};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossPhase {
    Phase1,
    Phase2,
    Phase3,
}

impl BossPhase {
    pub fn from_health(fraction: f32) -> BossPhase {
        if fraction > 0.66 {
            BossPhase::Phase1
        } else if fraction > 0.33 {
            BossPhase::Phase2
        } else {
            BossPhase::Phase3
        }
    }
}

/// Per-phase stats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossPhaseStats {
    pub speed_scale:     f32,
    pub attack_cooldown: f32,
    pub windup:          f32,
    pub damage:          f32,
}

impl BossPhaseStats {
    fn sanitize(&mut self) {
        clamp_tunable("speed_scale", &mut self.speed_scale);
        clamp_tunable("attack_cooldown", &mut self.attack_cooldown);
        clamp_tunable("windup", &mut self.windup);
        clamp_non_negative("damage", &mut self.damage);
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossConfig {
    pub tuning:            Tuning,
    pub phase1:            BossPhaseStats,
    pub phase2:            BossPhaseStats,
    pub phase3:            BossPhaseStats,
    /// Phase 3 attack-rate multiplier (divides the cooldown).
    pub berserk_rate:      f32,
    /// Phase 3 damage multiplier.
    pub berserk_damage:    f32,
    /// Seconds the strike pose is held before approaching again.
    pub attack_recovery:   f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning {
                max_speed:        4.0,
                speed:            1.5,
                attack_range:     3.0,
                attack_range_max: 4.0,
                max_health:       200.0,
                ..Tuning::default()
            },
            phase1: BossPhaseStats { speed_scale: 1.0, attack_cooldown: 3.0, windup: 1.2, damage: 5.0 },
            phase2: BossPhaseStats { speed_scale: 1.2, attack_cooldown: 2.5, windup: 1.0, damage: 7.0 },
            phase3: BossPhaseStats { speed_scale: 1.4, attack_cooldown: 2.0, windup: 0.8, damage: 8.0 },
            berserk_rate:    1.5,
            berserk_damage:  2.0,
            attack_recovery: 0.4,
        }
    }
}

impl BossConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        self.phase1.sanitize();
        self.phase2.sanitize();
        self.phase3.sanitize();
        clamp_tunable("berserk_rate", &mut self.berserk_rate);
        clamp_tunable("berserk_damage", &mut self.berserk_damage);
        clamp_non_negative("attack_recovery", &mut self.attack_recovery);
    }

    /// Effective stats for `phase`, with the berserk multipliers folded into
    /// phase 3.
    pub fn stats(&self, phase: BossPhase) -> BossPhaseStats {
        match phase {
            BossPhase::Phase1 => self.phase1,
            BossPhase::Phase2 => self.phase2,
            BossPhase::Phase3 => BossPhaseStats {
                attack_cooldown: self.phase3.attack_cooldown / self.berserk_rate,
                damage:          self.phase3.damage * self.berserk_damage,
                ..self.phase3
            },
        }
    }

    pub fn scale_damage(&mut self, damage: f32) {
        let base = self.phase1.damage;
        let ratio = if base > 0.0 { damage / base } else { 1.0 };
        for phase in [&mut self.phase1, &mut self.phase2, &mut self.phase3] {
            phase.damage *= ratio;
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BossState {
    Approach,
    Windup { elapsed: f32 },
    Attack { remaining: f32 },
}

#[derive(Clone, Debug)]
pub struct Boss {
    config:       BossConfig,
    state:        BossState,
    phase:        BossPhase,
    attack_timer: Cooldown,
}

impl Boss {
    pub fn new(config: BossConfig) -> Self {
        Self {
            config,
            state:        BossState::Approach,
            phase:        BossPhase::Phase1,
            attack_timer: Cooldown::ready(),
        }
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    /// Stats currently in force.
    pub fn stats(&self) -> BossPhaseStats {
        self.config.stats(self.phase)
    }

    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    fn enter(&mut self, ctx: &AgentContext, next: BossState) {
        debug!(agent = %ctx.id, from = ?self.state, to = ?next, phase = ?self.phase, "boss");
        self.state = next;
    }
}

impl Behavior for Boss {
    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        let phase = BossPhase::from_health(svc.target.health_fraction());
        if phase != self.phase {
            info!(agent = %ctx.id, from = ?self.phase, to = ?phase, "boss phase");
            self.phase = phase;
        }
        let stats = self.stats();
        self.attack_timer.tick(ctx.dt);
        ctx.hittable = true;

        match self.state {
            BossState::Approach => {
                if respawn_if_far(ctx) {
                    return;
                }
                if ctx.in_attack_range_max() {
                    hold(ctx);
                    if self.attack_timer.is_ready() {
                        ctx.set_flag(AnimFlag::WindingUp, true);
                        self.enter(ctx, BossState::Windup { elapsed: 0.0 });
                    }
                } else {
                    let target = ctx.target_position;
                    move_towards(ctx, svc.spatial, target, stats.speed_scale);
                }
            }

            BossState::Windup { elapsed } => {
                hold(ctx);
                let elapsed = elapsed + ctx.dt;
                if elapsed < stats.windup {
                    self.state = BossState::Windup { elapsed };
                    return;
                }
                ctx.set_flag(AnimFlag::WindingUp, false);
                attack(ctx);
                if ctx.in_attack_range_max() {
                    strike(ctx, svc, stats.damage);
                }
                self.attack_timer.reset(stats.attack_cooldown);
                let recovery = self.config.attack_recovery;
                self.enter(ctx, BossState::Attack { remaining: recovery });
            }

            BossState::Attack { remaining } => {
                hold(ctx);
                let remaining = remaining - ctx.dt;
                if remaining <= 0.0 {
                    stop_attack(ctx);
                    self.enter(ctx, BossState::Approach);
                } else {
                    self.state = BossState::Attack { remaining };
                }
            }
        }
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        ctx.set_flag(AnimFlag::WindingUp, false);
        stop_attack(ctx);
    }

    fn interrupt(&mut self, ctx: &mut AgentContext, _svc: &mut Services<'_>) {
        if !matches!(self.state, BossState::Approach) {
            ctx.set_flag(AnimFlag::WindingUp, false);
            stop_attack(ctx);
            self.enter(ctx, BossState::Approach);
        }
    }

    fn is_committed(&self) -> bool {
        matches!(self.state, BossState::Windup { .. })
    }
}
