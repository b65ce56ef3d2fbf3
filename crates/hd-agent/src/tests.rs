//! Unit tests for hd-agent.

#[cfg(test)]
mod helpers {
    use hd_core::{AgentId, Vec2};

    use crate::{AgentContext, AgentSeed, Tuning};

    pub fn ctx_at(x: f32, y: f32) -> AgentContext {
        AgentContext::new(AgentSeed::new(AgentId(0), Vec2::new(x, y), 42), Tuning::default())
    }
}

// ── Tuning ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tuning {
    use crate::{MIN_TUNABLE, Tuning};

    #[test]
    fn default_is_clean() {
        let mut t = Tuning::default();
        assert_eq!(t.sanitize(), 0);
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn non_positive_values_are_clamped() {
        let mut t = Tuning {
            max_speed:    0.0,
            speed:        -3.0,
            attack_range: f32::NAN,
            ..Tuning::default()
        };
        let n = t.sanitize();
        assert!(n >= 3);
        assert_eq!(t.max_speed, MIN_TUNABLE);
        assert_eq!(t.speed, MIN_TUNABLE);
        assert_eq!(t.attack_range, MIN_TUNABLE);
    }

    #[test]
    fn sanitized_never_leaves_non_positive_values() {
        let t = Tuning {
            max_speed:         -1.0,
            speed:             0.0,
            attack_range:      -2.0,
            attack_range_max:  -1.0,
            out_of_range:      0.0,
            respawn_radius:    -4.0,
            separation_radius: 0.0,
            separation_weight: -1.0,
            max_health:        0.0,
            ..Tuning::default()
        }
        .sanitized();
        for v in [
            t.max_speed, t.speed, t.attack_range, t.attack_range_max,
            t.out_of_range, t.respawn_radius, t.separation_radius, t.max_health,
        ] {
            assert!(v > 0.0, "value {v} not positive");
        }
        assert_eq!(t.separation_weight, 0.0);
    }

    #[test]
    fn attack_range_max_raised_to_attack_range() {
        let t = Tuning { attack_range: 4.0, attack_range_max: 2.0, ..Tuning::default() }.sanitized();
        assert_eq!(t.attack_range_max, 4.0);
    }
}

// ── Scratch slot ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod scratch {
    use hd_core::Vec2;

    use super::helpers::ctx_at;
    use crate::{ChargeState, DriftState, FormationState, ZigzagState};

    #[test]
    fn starts_empty() {
        let ctx = ctx_at(0.0, 0.0);
        assert_eq!(ctx.scratch_kind(), "empty");
        assert!(ctx.peek_scratch::<ChargeState>().is_none());
    }

    #[test]
    fn claim_keeps_state_for_same_primitive() {
        let mut ctx = ctx_at(0.0, 0.0);
        ctx.scratch::<ZigzagState>().timer = 1.25;
        assert_eq!(ctx.scratch::<ZigzagState>().timer, 1.25);
        assert_eq!(ctx.scratch_kind(), "zigzag");
    }

    #[test]
    fn switching_primitive_clears_memory() {
        let mut ctx = ctx_at(0.0, 0.0);
        ctx.scratch::<ChargeState>().direction = Vec2::new(1.0, 0.0);
        ctx.scratch::<DriftState>();
        assert!(ctx.peek_scratch::<ChargeState>().is_none());
        // Coming back starts from a default charge.
        assert_eq!(*ctx.scratch::<ChargeState>(), ChargeState::default());
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut ctx = ctx_at(0.0, 0.0);
        ctx.scratch::<FormationState>().formed = true;
        ctx.clear_scratch();
        assert_eq!(ctx.scratch_kind(), "empty");
    }
}

// ── Frame snapshot ────────────────────────────────────────────────────────────

#[cfg(test)]
mod frame {
    use hd_core::Vec2;

    use super::helpers::ctx_at;

    #[test]
    fn update_frame_snapshots_distance_and_dt() {
        let mut ctx = ctx_at(3.0, 4.0);
        ctx.update_frame(Vec2::ZERO, 0.02, 1.0);
        assert!((ctx.distance_to_target - 5.0).abs() < 1e-6);
        assert_eq!(ctx.dt, 0.02);
        assert_eq!(ctx.last_position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn range_predicates() {
        let mut ctx = ctx_at(2.0, 0.0);
        ctx.update_frame(Vec2::ZERO, 0.02, 0.0);
        assert!(!ctx.in_attack_range());     // 2.0 > 1.5
        assert!(ctx.in_attack_range_max());  // 2.0 <= 2.5
        assert!(!ctx.is_out_of_range());
    }

    #[test]
    fn direction_to_target_is_unit() {
        let mut ctx = ctx_at(0.0, 10.0);
        ctx.update_frame(Vec2::ZERO, 0.02, 0.0);
        let d = ctx.direction_to_target();
        assert!((d.y + 1.0).abs() < 1e-6);
    }
}

// ── Animation intents ─────────────────────────────────────────────────────────

#[cfg(test)]
mod anim {
    use hd_core::{AgentId, Vec2};

    use crate::{AgentContext, AgentSeed, AnimFlag, AnimTrigger, SharedAnim, Tuning};

    #[test]
    fn flags_forward_only_changes() {
        let shared = SharedAnim::new();
        let seed = AgentSeed::new(AgentId(1), Vec2::ZERO, 0).with_anim(Box::new(shared.clone()));
        let mut ctx = AgentContext::new(seed, Tuning::default());

        ctx.set_flag(AnimFlag::Moving, true);
        ctx.set_flag(AnimFlag::Moving, true);
        assert!(ctx.flag(AnimFlag::Moving));
        assert!(shared.with(|r| r.is_set(AnimFlag::Moving)));

        ctx.set_flag(AnimFlag::Moving, false);
        assert!(!shared.with(|r| r.is_set(AnimFlag::Moving)));
    }

    #[test]
    fn triggers_are_recorded_in_order() {
        let shared = SharedAnim::new();
        let seed = AgentSeed::new(AgentId(1), Vec2::ZERO, 0).with_anim(Box::new(shared.clone()));
        let mut ctx = AgentContext::new(seed, Tuning::default());
        ctx.trigger(AnimTrigger::Attack);
        ctx.trigger(AnimTrigger::Respawn);
        let got = shared.with(|r| r.take_triggers());
        assert_eq!(got, vec![AnimTrigger::Attack, AnimTrigger::Respawn]);
    }
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod damage {
    use super::helpers::ctx_at;

    #[test]
    fn unhittable_agents_ignore_damage() {
        let mut ctx = ctx_at(0.0, 0.0);
        ctx.hittable = false;
        assert!(!ctx.apply_damage(5.0));
        assert_eq!(ctx.health, ctx.tuning.max_health);
        assert_eq!(ctx.take_damage(), 0.0);
    }

    #[test]
    fn damage_accumulates_until_drained() {
        let mut ctx = ctx_at(0.0, 0.0);
        assert!(ctx.apply_damage(2.0));
        assert!(ctx.apply_damage(1.0));
        assert_eq!(ctx.take_damage(), 3.0);
        assert_eq!(ctx.take_damage(), 0.0);
        assert_eq!(ctx.health, 7.0);
    }

    #[test]
    fn lethal_damage_marks_dead() {
        let mut ctx = ctx_at(0.0, 0.0);
        assert!(ctx.apply_damage(50.0));
        assert!(ctx.is_dead());
        assert_eq!(ctx.health, 0.0);
        // Dead agents take no further damage.
        assert!(!ctx.apply_damage(1.0));
    }

    #[test]
    fn seed_round_trip_keeps_health_and_position() {
        let mut ctx = ctx_at(4.0, -2.0);
        ctx.apply_damage(3.0);
        let seed = ctx.into_seed();
        assert_eq!(seed.health, Some(7.0));
        assert_eq!(seed.position.x, 4.0);
    }

    #[test]
    fn seed_layer_reaches_the_context() {
        use hd_core::{AgentId, FactionLayer, Vec2};

        use crate::{AgentContext, AgentSeed, Tuning};

        let seed = AgentSeed::new(AgentId(3), Vec2::ZERO, 1).with_layer(FactionLayer::Neutral);
        let ctx = AgentContext::new(seed, Tuning::default());
        assert_eq!(ctx.layer, FactionLayer::Neutral);
        assert_eq!(ctx.into_seed().layer, FactionLayer::Neutral);
    }
}

// ── StaticTarget ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod target {
    use hd_core::Vec2;

    use crate::{StaticTarget, TargetProvider};

    #[test]
    fn damage_reduces_health_fraction() {
        let mut t = StaticTarget::new(Vec2::ZERO, 100.0);
        t.damage(25.0, Vec2::new(1.0, 0.0));
        assert!((t.health_fraction() - 0.75).abs() < 1e-6);
        assert_eq!(t.hits.len(), 1);
        assert_eq!(t.total_damage(), 25.0);
    }

    #[test]
    fn unavailable_has_no_position() {
        assert!(StaticTarget::unavailable().target_position().is_none());
    }

    #[test]
    fn knockback_accumulates() {
        let mut t = StaticTarget::new(Vec2::ZERO, 10.0);
        t.knockback(Vec2::new(1.0, 0.0));
        t.knockback(Vec2::new(0.0, 2.0));
        assert_eq!(t.knockback, Vec2::new(1.0, 2.0));
    }
}
