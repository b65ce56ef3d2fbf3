//! Unit tests for hd-coord.

// ── AttackSlotArbiter ─────────────────────────────────────────────────────────

#[cfg(test)]
mod arbiter {
    use hd_core::AgentId;

    use crate::{AttackSlotArbiter, DEFAULT_CAPACITY};

    #[test]
    fn default_capacity() {
        assert_eq!(AttackSlotArbiter::default().capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn five_claimants_three_slots() {
        let mut arb = AttackSlotArbiter::new(3);
        let results: Vec<bool> = (0..5).map(|i| arb.try_claim(AgentId(i))).collect();
        assert_eq!(results, vec![true, true, true, false, false]);
        assert!(arb.is_full());

        assert!(arb.release(AgentId(1)));
        assert!(arb.try_claim(AgentId(3)));
        assert!(!arb.try_claim(AgentId(4)));
        assert_eq!(arb.count(), 3);
    }

    #[test]
    fn claim_is_idempotent() {
        let mut arb = AttackSlotArbiter::new(3);
        assert!(arb.try_claim(AgentId(7)));
        assert!(arb.try_claim(AgentId(7)));
        assert_eq!(arb.count(), 1);
    }

    #[test]
    fn held_claim_succeeds_even_when_full() {
        let mut arb = AttackSlotArbiter::new(2);
        arb.try_claim(AgentId(0));
        arb.try_claim(AgentId(1));
        assert!(arb.try_claim(AgentId(0)));
        assert_eq!(arb.count(), 2);
    }

    #[test]
    fn releasing_a_non_member_is_a_no_op() {
        let mut arb = AttackSlotArbiter::new(3);
        arb.try_claim(AgentId(0));
        assert!(!arb.release(AgentId(5)));
        assert!(!arb.release(AgentId(5)));
        assert_eq!(arb.count(), 1);
        assert!(arb.holds(AgentId(0)));
    }

    #[test]
    fn count_never_exceeds_capacity() {
        // Pseudo-random claim / release sequence.
        let mut arb = AttackSlotArbiter::new(4);
        let mut x: u32 = 12345;
        for _ in 0..2000 {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = AgentId((x >> 16) % 10);
            if x & 1 == 0 {
                arb.try_claim(id);
            } else {
                arb.release(id);
            }
            assert!(arb.count() <= arb.capacity());
        }
    }

    #[test]
    fn zero_capacity_never_grants() {
        let mut arb = AttackSlotArbiter::new(0);
        assert!(!arb.try_claim(AgentId(0)));
        assert!(arb.is_full());
    }
}

// ── PackCoordinator ───────────────────────────────────────────────────────────

#[cfg(test)]
mod pack {
    use std::collections::HashMap;
    use std::f32::consts::PI;

    use hd_core::{AgentId, PackId, SimRng, Vec2};

    use crate::{PackCoordinator, PackParams, PackPhase};

    const DT: f32 = 0.1;

    fn pack_of(n: u32) -> PackCoordinator {
        let mut c = PackCoordinator::new(PackId(0), PackParams::default());
        for i in 0..n {
            c.join(AgentId(i));
        }
        c
    }

    fn at(points: &[(u32, f32)]) -> HashMap<AgentId, Vec2> {
        points.iter().map(|&(id, x)| (AgentId(id), Vec2::new(x, 0.0))).collect()
    }

    #[test]
    fn center_is_member_mean_or_target() {
        let mut c = pack_of(2);
        let mut rng = SimRng::new(0);
        let pos = at(&[(0, 10.0), (1, 20.0)]);
        c.update(DT, Vec2::ZERO, &mut rng, |a| pos.get(&a).copied());
        assert_eq!(c.center(), Vec2::new(15.0, 0.0));

        let target = Vec2::new(-3.0, 4.0);
        c.update(DT, target, &mut rng, |_| None);
        assert_eq!(c.center(), target);
    }

    #[test]
    fn formation_angles_spread_evenly() {
        let c = pack_of(4);
        let a0 = c.formation_angle(AgentId(0)).unwrap();
        let a2 = c.formation_angle(AgentId(2)).unwrap();
        assert!((a2 - a0 - PI).abs() < 1e-5);
        assert!(c.formation_angle(AgentId(9)).is_none());
    }

    #[test]
    fn formation_rotates_over_time() {
        let mut c = pack_of(3);
        let mut rng = SimRng::new(0);
        let before = c.slot_angle(0);
        c.update(1.0, Vec2::ZERO, &mut rng, |_| Some(Vec2::new(30.0, 0.0)));
        assert!((c.slot_angle(0) - before - 0.3).abs() < 1e-5);
    }

    #[test]
    fn member_within_trigger_starts_closing() {
        let mut c = pack_of(3);
        let mut rng = SimRng::new(0);
        let pos = at(&[(0, 30.0), (1, 30.0), (2, 5.0)]);
        let next = c.update(DT, Vec2::ZERO, &mut rng, |a| pos.get(&a).copied());
        assert_eq!(next, Some(PackPhase::Closing));
    }

    #[test]
    fn certain_chance_closes_after_wait() {
        let params = PackParams { closing_chance: 1.0, circling_wait: 1.0, ..PackParams::default() };
        let mut c = PackCoordinator::new(PackId(0), params);
        c.join(AgentId(0));
        let mut rng = SimRng::new(0);
        let far = |_| Some(Vec2::new(30.0, 0.0));
        for _ in 0..9 {
            assert_eq!(c.update(DT, Vec2::ZERO, &mut rng, far), None);
        }
        // 1.0 s reached somewhere around the tenth or eleventh step.
        let mut closed = false;
        for _ in 0..3 {
            if c.update(DT, Vec2::ZERO, &mut rng, far).is_some() {
                closed = true;
                break;
            }
        }
        assert!(closed);
        assert_eq!(c.phase(), PackPhase::Closing);
    }

    #[test]
    fn zero_chance_keeps_circling() {
        let params = PackParams { closing_chance: 0.0, circling_wait: 0.5, ..PackParams::default() };
        let mut c = PackCoordinator::new(PackId(0), params);
        c.join(AgentId(0));
        let mut rng = SimRng::new(0);
        for _ in 0..200 {
            c.update(DT, Vec2::ZERO, &mut rng, |_| Some(Vec2::new(30.0, 0.0)));
        }
        assert_eq!(c.phase(), PackPhase::Circling);
    }

    /// Drive a 4-member pack into Closing.
    fn closing_pack() -> (PackCoordinator, SimRng) {
        let mut c = pack_of(4);
        let mut rng = SimRng::new(0);
        c.update(DT, Vec2::ZERO, &mut rng, |_| Some(Vec2::new(5.0, 0.0)));
        assert_eq!(c.phase(), PackPhase::Closing);
        (c, rng)
    }

    #[test]
    fn closing_needs_quorum() {
        let (mut c, mut rng) = closing_pack();
        // One close member of four: below max(2, 2).
        let pos = at(&[(0, 2.0), (1, 10.0), (2, 10.0), (3, 10.0)]);
        assert_eq!(c.update(DT, Vec2::ZERO, &mut rng, |a| pos.get(&a).copied()), None);

        let pos = at(&[(0, 2.0), (1, 3.0), (2, 10.0), (3, 10.0)]);
        assert_eq!(
            c.update(DT, Vec2::ZERO, &mut rng, |a| pos.get(&a).copied()),
            Some(PackPhase::Swarming),
        );
    }

    #[test]
    fn closing_times_out() {
        let (mut c, mut rng) = closing_pack();
        let far = |_| Some(Vec2::new(10.0, 0.0));
        let mut steps = 0;
        while c.phase() == PackPhase::Closing {
            c.update(DT, Vec2::ZERO, &mut rng, far);
            steps += 1;
            assert!(steps <= 60);
        }
        assert_eq!(c.phase(), PackPhase::Swarming);
    }

    #[test]
    fn full_cycle_is_monotonic() {
        let (mut c, mut rng) = closing_pack();
        let close = |_| Some(Vec2::new(1.0, 0.0));
        let mut seen = vec![c.phase()];
        for _ in 0..400 {
            if let Some(p) = c.update(DT, Vec2::ZERO, &mut rng, close) {
                seen.push(p);
            }
            // Everyone reports formed while regrouping.
            if c.phase() == PackPhase::Regrouping {
                for i in 0..4 {
                    c.report_formed(AgentId(i), true);
                }
            }
        }
        for pair in seen.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }
        assert!(seen.contains(&PackPhase::Regrouping));
        assert!(seen.len() > 4);
    }

    #[test]
    fn regroup_needs_all_but_one_formed() {
        let (mut c, mut rng) = closing_pack();
        let close = |_| Some(Vec2::new(1.0, 0.0));
        while c.phase() != PackPhase::Regrouping {
            c.update(DT, Vec2::ZERO, &mut rng, close);
        }
        c.report_formed(AgentId(0), true);
        c.report_formed(AgentId(1), true);
        assert_eq!(c.formed_count(), 2);
        assert_eq!(c.update(DT, Vec2::ZERO, &mut rng, close), None);
        c.report_formed(AgentId(2), true);
        assert_eq!(c.update(DT, Vec2::ZERO, &mut rng, close), Some(PackPhase::Circling));
    }

    #[test]
    fn stagger_orders_swarm_entry() {
        let (mut c, mut rng) = closing_pack();
        let close = |_| Some(Vec2::new(1.0, 0.0));
        c.update(DT, Vec2::ZERO, &mut rng, close);
        assert_eq!(c.phase(), PackPhase::Swarming);
        assert!(c.swarm_released(AgentId(0)));
        assert!(!c.swarm_released(AgentId(3)));
        c.update(0.5, Vec2::ZERO, &mut rng, close);
        assert!(c.swarm_released(AgentId(3)));
    }

    #[test]
    fn leaving_shifts_indices() {
        let mut c = pack_of(3);
        assert!(c.leave(AgentId(0)));
        assert!(!c.leave(AgentId(0)));
        assert_eq!(c.index_of(AgentId(2)), Some(1));
    }

    #[test]
    fn ring_tracks_mean_distance_within_bounds() {
        let mut c = pack_of(2);
        let mut rng = SimRng::new(0);
        let pos = at(&[(0, 10.0), (1, 12.0)]);
        c.update(DT, Vec2::ZERO, &mut rng, |a| pos.get(&a).copied());
        assert!((c.ring_radius() - 11.0).abs() < 1e-5);
        c.update(DT, Vec2::ZERO, &mut rng, |_| Some(Vec2::new(100.0, 0.0)));
        assert_eq!(c.ring_radius(), c.params().ring_max);
    }
}

// ── PackRegistry ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use hd_core::{AgentId, PackId, SimRng, Vec2};

    use crate::{CoordError, PackParams, PackRegistry};

    #[test]
    fn last_leave_disbands() {
        let mut reg = PackRegistry::default();
        let pack = reg.create();
        reg.join(pack, AgentId(0)).unwrap();
        reg.join(pack, AgentId(1)).unwrap();

        assert!(reg.leave(pack, AgentId(0)));
        assert!(reg.get(pack).is_some());
        assert!(reg.leave(pack, AgentId(1)));
        assert!(reg.get(pack).is_none());
        assert!(reg.is_empty());
        // Later leaves against the dead id are no-ops.
        assert!(!reg.leave(pack, AgentId(1)));
    }

    #[test]
    fn join_open_fills_then_forms_new_pack() {
        let mut reg = PackRegistry::new(PackParams::default(), 2);
        let a = reg.join_open(AgentId(0)).unwrap();
        let b = reg.join_open(AgentId(1)).unwrap();
        let c = reg.join_open(AgentId(2)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.pack_of(AgentId(2)), Some(c));
    }

    #[test]
    fn join_open_rejects_double_membership() {
        let mut reg = PackRegistry::default();
        reg.join_open(AgentId(0)).unwrap();
        assert!(matches!(reg.join_open(AgentId(0)), Err(CoordError::AlreadyMember(_))));
    }

    #[test]
    fn join_errors() {
        let mut reg = PackRegistry::new(PackParams::default(), 1);
        assert!(matches!(reg.join(PackId(9), AgentId(0)), Err(CoordError::PackNotFound(_))));
        let pack = reg.create();
        reg.join(pack, AgentId(0)).unwrap();
        assert!(matches!(reg.join(pack, AgentId(1)), Err(CoordError::PackFull { .. })));
        // Re-joining is not "full".
        assert_eq!(reg.join(pack, AgentId(0)).unwrap(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_disband() {
        let mut reg = PackRegistry::default();
        let first = reg.join_open(AgentId(0)).unwrap();
        reg.leave(first, AgentId(0));
        let second = reg.join_open(AgentId(1)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn update_all_advances_every_pack() {
        let mut reg = PackRegistry::new(PackParams::default(), 1);
        reg.join_open(AgentId(0)).unwrap();
        reg.join_open(AgentId(1)).unwrap();
        let mut rng = SimRng::new(3);
        reg.update_all(0.1, Vec2::ZERO, &mut rng, |_| Some(Vec2::new(2.0, 0.0)));
        assert!(reg.iter().all(|c| c.phase() == crate::PackPhase::Closing));
    }
}
