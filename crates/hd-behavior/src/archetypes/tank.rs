//! Tank: a slow bruiser with contact damage and an occasional charge.
//!
//! `Approach → Windup → Charging → Recover → Approach`.  Contact damage and
//! the charge run on independent cooldowns, so a tank that is eligible to
//! charge does not also spam contact hits.  A charge that connects knocks
//! the target back and deals bonus damage.

use hd_agent::{AgentContext, Tuning, clamp_tunable};
use hd_steer::{attack, chase, execute_charge, hold, reset_charge, stop_attack, windup};
use tracing::debug;

use crate::common::{Cooldown, clamp_non_negative, respawn_if_far, strike};
use crate::{Behavior, Services};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TankConfig {
    pub tuning:              Tuning,
    pub melee_damage:        f32,
    pub melee_cooldown:      f32,
    /// A charge is only started between these distances.
    pub charge_min_distance: f32,
    pub charge_max_distance: f32,
    pub windup_time:         f32,
    pub charge_speed:        f32,
    pub max_charge_distance: f32,
    pub charge_cooldown:     f32,
    pub recover_time:        f32,
    /// Impulse applied to the target on a connecting charge.
    pub knockback:           f32,
    pub bonus_damage:        f32,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning { max_speed: 3.0, speed: 1.5, max_health: 40.0, ..Tuning::default() },
            melee_damage:        2.0,
            melee_cooldown:      1.5,
            charge_min_distance: 6.0,
            charge_max_distance: 14.0,
            windup_time:         1.2,
            charge_speed:        2.0,
            max_charge_distance: 20.0,
            charge_cooldown:     6.0,
            recover_time:        1.5,
            knockback:           4.0,
            bonus_damage:        4.0,
        }
    }
}

impl TankConfig {
    pub fn sanitize(&mut self) {
        self.tuning.sanitize();
        clamp_non_negative("melee_damage", &mut self.melee_damage);
        clamp_tunable("melee_cooldown", &mut self.melee_cooldown);
        clamp_tunable("charge_min_distance", &mut self.charge_min_distance);
        clamp_tunable("charge_max_distance", &mut self.charge_max_distance);
        if self.charge_max_distance < self.charge_min_distance {
            self.charge_max_distance = self.charge_min_distance;
        }
        clamp_tunable("windup_time", &mut self.windup_time);
        clamp_tunable("charge_speed", &mut self.charge_speed);
        clamp_tunable("max_charge_distance", &mut self.max_charge_distance);
        clamp_non_negative("charge_cooldown", &mut self.charge_cooldown);
        clamp_tunable("recover_time", &mut self.recover_time);
        clamp_non_negative("knockback", &mut self.knockback);
        clamp_non_negative("bonus_damage", &mut self.bonus_damage);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TankState {
    Approach,
    Windup,
    Charging,
    Recover { remaining: f32 },
}

#[derive(Clone, Debug)]
pub struct Tank {
    config:       TankConfig,
    state:        TankState,
    melee_timer:  Cooldown,
    charge_timer: Cooldown,
}

impl Tank {
    pub fn new(config: TankConfig) -> Self {
        Self {
            config,
            state:        TankState::Approach,
            melee_timer:  Cooldown::ready(),
            charge_timer: Cooldown::ready(),
        }
    }

    pub fn state(&self) -> TankState {
        self.state
    }

    pub fn config(&self) -> &TankConfig {
        &self.config
    }

    fn enter(&mut self, ctx: &AgentContext, next: TankState) {
        debug!(agent = %ctx.id, from = ?self.state, to = ?next, "tank");
        self.state = next;
    }

    fn end_charge(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        reset_charge(ctx);
        self.charge_timer.reset(self.config.charge_cooldown);
        let recover = self.config.recover_time;
        self.enter(ctx, TankState::Recover { remaining: recover });
    }
}

impl Behavior for Tank {
    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        self.melee_timer.tick(ctx.dt);
        self.charge_timer.tick(ctx.dt);
        ctx.hittable = true;

        match self.state {
            TankState::Approach => {
                if respawn_if_far(ctx) {
                    return;
                }
                let d = ctx.distance_to_target;
                let cfg = &self.config;
                if self.charge_timer.is_ready()
                    && d >= cfg.charge_min_distance
                    && d <= cfg.charge_max_distance
                    && svc.arbiter.try_claim(ctx.id)
                {
                    stop_attack(ctx);
                    self.enter(ctx, TankState::Windup);
                    return;
                }

                if ctx.in_attack_range_max() {
                    attack(ctx);
                    if self.melee_timer.is_ready() {
                        strike(ctx, svc, self.config.melee_damage);
                        self.melee_timer.reset(self.config.melee_cooldown);
                    }
                } else {
                    stop_attack(ctx);
                    chase(ctx, svc.spatial);
                }
            }

            TankState::Windup => {
                if windup(ctx, self.config.windup_time) {
                    self.enter(ctx, TankState::Charging);
                }
            }

            TankState::Charging => {
                if ctx.in_attack_range() {
                    let impulse = ctx.direction_to_target() * self.config.knockback;
                    svc.target.knockback(impulse);
                    strike(ctx, svc, self.config.bonus_damage);
                    self.melee_timer.reset(self.config.melee_cooldown);
                    self.end_charge(ctx, svc);
                } else if execute_charge(
                    ctx,
                    svc.spatial,
                    self.config.charge_speed,
                    self.config.max_charge_distance,
                ) {
                    self.end_charge(ctx, svc);
                }
            }

            TankState::Recover { remaining } => {
                hold(ctx);
                let remaining = remaining - ctx.dt;
                if remaining <= 0.0 {
                    self.enter(ctx, TankState::Approach);
                } else {
                    self.state = TankState::Recover { remaining };
                }
            }
        }
    }

    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        svc.arbiter.release(ctx.id);
        reset_charge(ctx);
        stop_attack(ctx);
    }

    fn interrupt(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>) {
        if matches!(self.state, TankState::Windup | TankState::Charging) {
            svc.arbiter.release(ctx.id);
            reset_charge(ctx);
            self.enter(ctx, TankState::Approach);
        }
    }

    fn is_committed(&self) -> bool {
        matches!(self.state, TankState::Windup | TankState::Charging)
    }
}
