//! Unit tests for hd-steer.

#[cfg(test)]
mod helpers {
    use hd_agent::{AgentContext, AgentSeed, Tuning};
    use hd_core::{AgentId, Vec2};

    pub const DT: f32 = 1.0 / 60.0;

    pub fn ctx_at(x: f32, y: f32) -> AgentContext {
        AgentContext::new(AgentSeed::new(AgentId(0), Vec2::new(x, y), 7), Tuning::default())
    }

    /// Snapshot a frame against a target at the origin.
    pub fn frame(ctx: &mut AgentContext, tick: u32) {
        ctx.update_frame(Vec2::ZERO, DT, tick as f32 * DT);
    }
}

// ── Separation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod separation {
    use hd_core::{AgentId, FactionLayer, Vec2};
    use hd_spatial::{AgentIndex, EmptyWorld, EntityRef};

    use super::helpers::ctx_at;
    use crate::separation;

    fn body(id: u32, x: f32, y: f32, layer: FactionLayer) -> EntityRef {
        EntityRef { agent: AgentId(id), position: Vec2::new(x, y), layer }
    }

    #[test]
    fn empty_world_has_no_push() {
        let ctx = ctx_at(0.0, 0.0);
        assert_eq!(separation(&ctx, &EmptyWorld), Vec2::ZERO);
    }

    #[test]
    fn neighbour_pushes_away_and_self_is_ignored() {
        let ctx = ctx_at(0.0, 0.0);
        let idx = AgentIndex::build(
            vec![body(0, 0.0, 0.0, FactionLayer::Hostile), body(1, 1.0, 0.0, FactionLayer::Hostile)],
            0.5,
        )
        .unwrap();
        let push = separation(&ctx, &idx);
        // radius 2, dist 1: (1 - 0.5)^3 = 0.125
        assert!((push.x + 0.125).abs() < 1e-5, "push = {push}");
        assert!(push.y.abs() < 1e-6);
    }

    #[test]
    fn nearer_neighbours_dominate() {
        let ctx = ctx_at(0.0, 0.0);
        let idx = AgentIndex::build(
            vec![body(1, 0.2, 0.0, FactionLayer::Hostile), body(2, 0.0, -1.8, FactionLayer::Hostile)],
            0.5,
        )
        .unwrap();
        let push = separation(&ctx, &idx);
        assert!(push.x < 0.0);
        assert!(push.x.abs() > push.y.abs() * 10.0);
    }

    #[test]
    fn other_layers_are_ignored() {
        let ctx = ctx_at(0.0, 0.0);
        let idx = AgentIndex::build(vec![body(1, 0.5, 0.0, FactionLayer::Neutral)], 0.5).unwrap();
        assert_eq!(separation(&ctx, &idx), Vec2::ZERO);
    }

    #[test]
    fn perfect_overlap_still_separates() {
        let ctx = ctx_at(3.0, 3.0);
        let idx = AgentIndex::build(vec![body(4, 3.0, 3.0, FactionLayer::Hostile)], 0.5).unwrap();
        let push = separation(&ctx, &idx);
        assert!((push.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zero_weight_disables() {
        let mut ctx = ctx_at(0.0, 0.0);
        ctx.tuning.separation_weight = 0.0;
        let idx = AgentIndex::build(vec![body(1, 0.5, 0.0, FactionLayer::Hostile)], 0.5).unwrap();
        assert_eq!(separation(&ctx, &idx), Vec2::ZERO);
    }
}

// ── MoveTowards ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod motion {
    use hd_agent::AnimFlag;
    use hd_core::Vec2;
    use hd_spatial::EmptyWorld;

    use super::helpers::{DT, ctx_at, frame};
    use crate::{hold, move_towards};

    #[test]
    fn far_targets_are_speed_capped() {
        let mut ctx = ctx_at(10.0, 0.0);
        frame(&mut ctx, 0);
        move_towards(&mut ctx, &EmptyWorld, Vec2::ZERO, 1.0);
        assert_eq!(ctx.velocity, 5.0);
        assert!((ctx.position.x - (10.0 - 5.0 * DT)).abs() < 1e-5);
        assert!(ctx.flag(AnimFlag::Moving));
    }

    #[test]
    fn approach_eases_in() {
        let mut ctx = ctx_at(0.5, 0.0);
        frame(&mut ctx, 0);
        move_towards(&mut ctx, &EmptyWorld, Vec2::ZERO, 1.0);
        // 0.5 * speed(2) = 1.0, below the cap.
        assert!((ctx.velocity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn speed_scale_scales_the_cap() {
        let mut ctx = ctx_at(50.0, 0.0);
        frame(&mut ctx, 0);
        move_towards(&mut ctx, &EmptyWorld, Vec2::ZERO, 2.5);
        assert_eq!(ctx.velocity, 12.5);
    }

    #[test]
    fn never_overshoots() {
        let mut ctx = ctx_at(1.0, 0.0);
        ctx.tuning.speed = 1000.0;
        ctx.tuning.max_speed = 1000.0;
        for tick in 0..10 {
            frame(&mut ctx, tick);
            move_towards(&mut ctx, &EmptyWorld, Vec2::ZERO, 1.0);
            assert!(ctx.position.x >= 0.0);
        }
    }

    #[test]
    fn hold_lowers_moving() {
        let mut ctx = ctx_at(5.0, 0.0);
        frame(&mut ctx, 0);
        move_towards(&mut ctx, &EmptyWorld, Vec2::ZERO, 1.0);
        hold(&mut ctx);
        assert!(!ctx.flag(AnimFlag::Moving));
        assert_eq!(ctx.velocity, 0.0);
    }
}

// ── Orbit ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod orbit {
    use hd_spatial::EmptyWorld;

    use super::helpers::{ctx_at, frame};
    use crate::orbit;

    fn run_orbit(x: f32, y: f32, min: f32, max: f32, dir: f32, ticks: u32) -> f32 {
        let mut ctx = ctx_at(x, y);
        for tick in 0..ticks {
            frame(&mut ctx, tick);
            orbit(&mut ctx, &EmptyWorld, min, max, dir, 1.0);
        }
        ctx.position.length()
    }

    #[test]
    fn converges_from_outside() {
        let d = run_orbit(20.0, 0.0, 8.0, 12.0, 1.0, 1200);
        assert!(d >= 7.5 && d <= 12.5, "distance {d}");
    }

    #[test]
    fn converges_from_inside() {
        let d = run_orbit(3.0, 1.0, 8.0, 12.0, -1.0, 1200);
        assert!(d >= 7.5 && d <= 12.5, "distance {d}");
    }

    #[test]
    fn actually_circles() {
        let mut ctx = ctx_at(10.0, 0.0);
        for tick in 0..120 {
            frame(&mut ctx, tick);
            orbit(&mut ctx, &EmptyWorld, 8.0, 12.0, 1.0, 1.0);
        }
        // Counter-clockwise from +x: y has gone positive.
        assert!(ctx.position.y > 1.0, "position {}", ctx.position);
        assert!(ctx.orbit_angle.is_some());
    }

    #[test]
    fn swapped_bounds_do_not_panic() {
        let d = run_orbit(10.0, 0.0, 12.0, 8.0, 1.0, 600);
        assert!(d.is_finite());
    }
}

// ── Zigzag ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod zigzag {
    use hd_core::Vec2;
    use hd_spatial::EmptyWorld;

    use super::helpers::{ctx_at, frame};
    use crate::zigzag;

    #[test]
    fn weaves_across_the_chase_line() {
        let mut ctx = ctx_at(30.0, 0.0);
        let mut max_lateral: f32 = 0.0;
        for tick in 0..120 {
            frame(&mut ctx, tick);
            zigzag(&mut ctx, &EmptyWorld, 3.0, 4.0, None, 1.0);
            max_lateral = max_lateral.max(ctx.position.y.abs());
        }
        assert!(max_lateral > 0.1);
        assert!(ctx.position.x < 30.0);
        assert_eq!(ctx.scratch_kind(), "zigzag");
    }

    #[test]
    fn explicit_target_overrides_the_defended_entity() {
        let mut ctx = ctx_at(0.0, 0.0);
        frame(&mut ctx, 0);
        zigzag(&mut ctx, &EmptyWorld, 0.0, 1.0, Some(Vec2::new(0.0, 10.0)), 1.0);
        assert!(ctx.position.y > 0.0);
    }
}

// ── Drift ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod drift {
    use hd_spatial::EmptyWorld;

    use super::helpers::{DT, ctx_at, frame};
    use crate::{DriftParams, drift};

    #[test]
    fn pulses_on_interval_and_ends_quickly() {
        let params = DriftParams { pulse_interval: 1.0, ..DriftParams::default() };
        let mut ctx = ctx_at(20.0, 0.0);
        let mut first_pulse = None;
        let mut pulse_frames = 0;
        for tick in 0..180 {
            frame(&mut ctx, tick);
            if drift(&mut ctx, &EmptyWorld, &params) {
                first_pulse.get_or_insert(tick);
                pulse_frames += 1;
            }
        }
        let first = first_pulse.expect("no pulse within 3 s");
        assert!(first as f32 * DT >= 0.95);
        // Two pulses at most in 3 s, each capped at 0.5 s.
        assert!(pulse_frames as f32 * DT <= 1.05);
    }

    #[test]
    fn pulse_dashes_toward_target() {
        let params = DriftParams { pulse_interval: 0.0, ..DriftParams::default() };
        let mut ctx = ctx_at(20.0, 0.0);
        frame(&mut ctx, 0);
        assert!(drift(&mut ctx, &EmptyWorld, &params));
        assert!(ctx.position.x < 20.0);
        assert_eq!(ctx.velocity, params.pulse_strength);
    }
}

// ── Charge ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod charge {
    use hd_agent::{AnimFlag, ChargeState};
    use hd_spatial::EmptyWorld;

    use super::helpers::{ctx_at, frame};
    use crate::{cooldown, execute_charge, reset_charge, windup};

    #[test]
    fn windup_fires_exactly_once_at_duration() {
        let mut ctx = ctx_at(10.0, 0.0);
        let mut fired = Vec::new();
        for tick in 0..120 {
            frame(&mut ctx, tick);
            if windup(&mut ctx, 1.0) {
                fired.push(tick + 1);
            }
        }
        assert_eq!(fired, vec![60]);
        assert!(ctx.flag(AnimFlag::WindingUp));
        assert_eq!(ctx.position.x, 10.0);
    }

    #[test]
    fn windup_captures_direction() {
        let mut ctx = ctx_at(0.0, 5.0);
        frame(&mut ctx, 0);
        windup(&mut ctx, 1.0);
        let state = ctx.peek_scratch::<ChargeState>().unwrap();
        assert!(state.aimed);
        assert!((state.direction.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn execute_reports_miss_after_max_distance() {
        let mut ctx = ctx_at(0.0, 5.0);
        ctx.update_frame(hd_core::Vec2::new(0.0, 0.0), 1.0 / 60.0, 0.0);
        windup(&mut ctx, 0.0);
        let mut done_at = None;
        for tick in 1..600 {
            frame(&mut ctx, tick);
            if execute_charge(&mut ctx, &EmptyWorld, 2.0, 15.0) {
                done_at = Some(tick);
                break;
            }
        }
        assert!(done_at.is_some());
        assert!(ctx.flag(AnimFlag::Charging));
        // Charged straight down through the target.
        assert!(ctx.position.y <= -9.9);
        assert!(ctx.position.x.abs() < 1e-4);
    }

    #[test]
    fn cooldown_completes_and_clears() {
        let mut ctx = ctx_at(10.0, 0.0);
        frame(&mut ctx, 0);
        windup(&mut ctx, 0.0);
        let mut ticks = 0;
        loop {
            ticks += 1;
            frame(&mut ctx, ticks);
            if cooldown(&mut ctx, &EmptyWorld, 0.5, 8.0, 12.0) {
                break;
            }
            assert!(ticks < 100);
        }
        // 0.5 s at 60 Hz, give or take float accumulation.
        assert!((30..=31).contains(&ticks), "ticks = {ticks}");
        assert_eq!(ctx.scratch_kind(), "empty");
        assert!(!ctx.flag(AnimFlag::Charging));
    }

    #[test]
    fn reset_lowers_flags() {
        let mut ctx = ctx_at(10.0, 0.0);
        frame(&mut ctx, 0);
        windup(&mut ctx, 1.0);
        reset_charge(&mut ctx);
        assert!(!ctx.flag(AnimFlag::WindingUp));
        assert_eq!(ctx.scratch_kind(), "empty");
    }
}

// ── Lurk / retreat ────────────────────────────────────────────────────────────

#[cfg(test)]
mod lurk {
    use hd_spatial::EmptyWorld;

    use super::helpers::{ctx_at, frame};
    use crate::{lurk, retreat};

    #[test]
    fn lurk_holds_distance() {
        let mut ctx = ctx_at(15.0, 0.0);
        for tick in 0..300 {
            frame(&mut ctx, tick);
            lurk(&mut ctx, &EmptyWorld, 1.0);
        }
        let d = ctx.position.length();
        assert!(d > 13.0 && d < 15.5, "distance {d}");
    }

    #[test]
    fn retreat_reaches_distance() {
        let mut ctx = ctx_at(3.0, 0.0);
        let mut done = false;
        for tick in 0..600 {
            frame(&mut ctx, tick);
            if retreat(&mut ctx, &EmptyWorld, 12.0) {
                done = true;
                break;
            }
        }
        assert!(done);
        assert!(ctx.position.x > 11.0);
        assert!(ctx.position.y.abs() < 1e-4);
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod formation {
    use std::f32::consts::FRAC_PI_2;

    use hd_agent::FormationState;
    use hd_core::Vec2;
    use hd_spatial::EmptyWorld;

    use super::helpers::{ctx_at, frame};
    use crate::{form_up, pack_chase, slot_position};

    #[test]
    fn slot_geometry() {
        let p = slot_position(Vec2::new(1.0, 1.0), FRAC_PI_2, 4.0);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn form_up_reports_formed_within_tolerance() {
        let mut ctx = ctx_at(10.0, 0.0);
        let slot = Vec2::new(6.0, 0.0);
        let mut formed = false;
        for tick in 0..600 {
            frame(&mut ctx, tick);
            if form_up(&mut ctx, &EmptyWorld, slot, 0.6) {
                formed = true;
                break;
            }
        }
        assert!(formed);
        assert!(ctx.peek_scratch::<FormationState>().unwrap().formed);
    }

    #[test]
    fn pack_chase_blends_slot_and_target() {
        let mut ctx = ctx_at(10.0, 10.0);
        ctx.tuning.speed = 1000.0;
        ctx.tuning.max_speed = 1000.0;
        frame(&mut ctx, 0);
        pack_chase(&mut ctx, &EmptyWorld, Vec2::new(10.0, 0.0), 1.0);
        // 0.7 * (10, 0) + 0.3 * (0, 0)
        assert!((ctx.position.x - 7.0).abs() < 1e-4);
        assert!(ctx.position.y.abs() < 1e-4);
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod actions {
    use hd_agent::{AgentContext, AgentSeed, AnimFlag, AnimTrigger, SharedAnim, Tuning};
    use hd_core::{AgentId, Vec2};

    use super::helpers::{ctx_at, frame};
    use crate::{attack, respawn, stop_attack};

    #[test]
    fn attack_toggles_flags() {
        let mut ctx = ctx_at(1.0, 0.0);
        ctx.set_flag(AnimFlag::Moving, true);
        attack(&mut ctx);
        assert!(ctx.flag(AnimFlag::Attacking));
        assert!(!ctx.flag(AnimFlag::Moving));
        stop_attack(&mut ctx);
        assert!(!ctx.flag(AnimFlag::Attacking));
    }

    #[test]
    fn respawn_lands_in_outer_band() {
        let mut ctx = ctx_at(100.0, 0.0);
        frame(&mut ctx, 0);
        for _ in 0..500 {
            let p = respawn(&mut ctx, 30.0);
            let d = p.length();
            assert!(d >= 25.0 - 1e-3 && d <= 27.0 + 1e-3, "respawned at distance {d}");
            assert_eq!(ctx.position, p);
        }
    }

    #[test]
    fn respawn_resets_state_and_triggers() {
        let shared = SharedAnim::new();
        let seed = AgentSeed::new(AgentId(3), Vec2::new(90.0, 0.0), 1).with_anim(Box::new(shared.clone()));
        let mut ctx = AgentContext::new(seed, Tuning::default());
        frame(&mut ctx, 0);
        ctx.orbit_angle = Some(1.0);
        ctx.scratch::<hd_agent::ZigzagState>().timer = 3.0;
        ctx.set_flag(AnimFlag::Attacking, true);

        respawn(&mut ctx, 30.0);
        assert!(ctx.orbit_angle.is_none());
        assert_eq!(ctx.scratch_kind(), "empty");
        assert!(!ctx.flag(AnimFlag::Attacking));
        assert!(shared.with(|r| r.triggers().contains(&AnimTrigger::Respawn)));
    }
}
