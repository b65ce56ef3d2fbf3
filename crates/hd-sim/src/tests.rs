//! Integration tests for hd-sim.

#[cfg(test)]
mod helpers {
    use hd_agent::StaticTarget;
    use hd_behavior::ArchetypeKind;
    use hd_core::{AgentId, SimConfig, Tick, Vec2};

    use crate::{AgentRuntime, AgentSnapshot, DespawnReason, RuntimeBuilder, RuntimeObserver, TickStats};

    pub fn sim_config(total_ticks: u64) -> SimConfig {
        SimConfig { tick_dt_secs: 1.0 / 60.0, total_ticks, seed: 42, output_interval_ticks: 60 }
    }

    pub fn runtime() -> AgentRuntime<StaticTarget> {
        RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 100.0))
            .sim(sim_config(600))
            .build()
            .unwrap()
    }

    /// Records every observer callback.
    #[derive(Default)]
    pub struct Recorder {
        pub starts:     Vec<Tick>,
        pub ticks:      Vec<TickStats>,
        pub snapshots:  Vec<(Tick, Vec<AgentSnapshot>)>,
        pub spawned:    Vec<(AgentId, ArchetypeKind)>,
        pub despawned:  Vec<(AgentId, DespawnReason)>,
        pub ended:      Option<Tick>,
    }

    impl RuntimeObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }

        fn on_tick_end(&mut self, stats: &TickStats) {
            self.ticks.push(*stats);
        }

        fn on_snapshot(&mut self, tick: Tick, agents: &[AgentSnapshot]) {
            self.snapshots.push((tick, agents.to_vec()));
        }

        fn on_agent_spawned(&mut self, _tick: Tick, agent: AgentId, kind: ArchetypeKind) {
            self.spawned.push((agent, kind));
        }

        fn on_agent_despawned(&mut self, _tick: Tick, agent: AgentId, _kind: ArchetypeKind, reason: DespawnReason) {
            self.despawned.push((agent, reason));
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.ended = Some(final_tick);
        }
    }
}

// ── RuntimeBuilder validation ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use hd_agent::StaticTarget;
    use hd_coord::CoordError;
    use hd_core::{HdError, SimConfig, Vec2};

    use crate::{RuntimeBuilder, RuntimeError};

    #[test]
    fn defaults_build_an_empty_runtime() {
        let rt = RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 10.0)).build().unwrap();
        assert!(rt.is_empty());
        assert_eq!(rt.arbiter().capacity(), 3);
        assert!(rt.packs().is_empty());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let result = RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 10.0)).arbiter_capacity(0).build();
        assert!(matches!(result, Err(RuntimeError::Coord(CoordError::InvalidCapacity(0)))));
    }

    #[test]
    fn non_positive_frame_time_is_rejected() {
        let sim = SimConfig { tick_dt_secs: 0.0, ..SimConfig::default() };
        let result = RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 10.0)).sim(sim).build();
        assert!(matches!(result, Err(RuntimeError::Core(HdError::Config(_)))));
    }

    #[test]
    fn negative_body_radius_is_rejected() {
        let result = RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 10.0)).body_radius(-1.0).build();
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }
}

// ── Spawn, despawn, swap ──────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use hd_agent::StaticTarget;
    use hd_behavior::{
        ArchetypeKind, BehaviorPool, BehaviorSelector, DirectConfig, HammerChargeConfig,
        PackFormationConfig,
    };
    use hd_core::{AgentId, Vec2};

    use super::helpers::{Recorder, runtime};
    use crate::{DespawnReason, NoopObserver, RuntimeBuilder, RuntimeError};

    #[test]
    fn lost_target_falls_back_to_last_known_position() {
        let mut rt = runtime();
        let a = rt.create_agent(DirectConfig::default(), Vec2::new(10.0, 0.0));
        rt.run_ticks(1, &mut NoopObserver).unwrap();

        rt.target_mut().position = None;
        let before = rt.position_of(a).unwrap().length();
        rt.run_ticks(10, &mut NoopObserver).unwrap();
        let after = rt.position_of(a).unwrap().length();
        assert!(after < before, "agent stopped chasing: {before} -> {after}");
        assert!(!rt.agent(a).unwrap().is_inert());
    }

    #[test]
    fn handles_are_never_reused() {
        let mut rt = runtime();
        let a = rt.create_agent(DirectConfig::default(), Vec2::new(10.0, 0.0));
        let b = rt.create_agent(DirectConfig::default(), Vec2::new(0.0, 10.0));
        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        assert!(rt.destroy_agent(a));
        assert!(!rt.destroy_agent(a));
        assert_eq!(rt.create_agent(DirectConfig::default(), Vec2::ZERO), AgentId(2));
        assert_eq!(rt.len(), 2);
    }

    #[test]
    fn destroying_an_engaged_agent_frees_its_slot() {
        let mut rt = runtime();
        let config = HammerChargeConfig { attack_delay: 0.0, ..Default::default() };
        let id = rt.create_agent(config, Vec2::new(10.0, 0.0));
        rt.step(&mut NoopObserver).unwrap();
        assert!(rt.arbiter().holds(id));

        rt.destroy_agent(id);
        assert_eq!(rt.arbiter().count(), 0);
    }

    #[test]
    fn destroying_last_pack_member_disbands_pack() {
        let mut rt = runtime();
        let a = rt.create_agent(PackFormationConfig::default(), Vec2::new(20.0, 0.0));
        let b = rt.create_agent(PackFormationConfig::default(), Vec2::new(-20.0, 0.0));
        rt.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(rt.packs().len(), 1);

        rt.destroy_agent(a);
        assert_eq!(rt.packs().len(), 1);
        rt.destroy_agent(b);
        assert!(rt.packs().is_empty());
    }

    #[test]
    fn swap_mid_windup_releases_slot() {
        let mut rt = runtime();
        let config = HammerChargeConfig { attack_delay: 0.0, ..Default::default() };
        let id = rt.create_agent(config, Vec2::new(10.0, 0.0));
        rt.run_ticks(10, &mut NoopObserver).unwrap();
        assert!(rt.arbiter().holds(id));
        let before = rt.position_of(id).unwrap();

        rt.swap_behavior(id, DirectConfig::default()).unwrap();
        assert!(!rt.arbiter().holds(id));
        assert_eq!(rt.agent(id).unwrap().kind(), ArchetypeKind::Direct);
        assert_eq!(rt.position_of(id), Some(before));
    }

    #[test]
    fn unknown_handles_are_errors() {
        let mut rt = runtime();
        assert!(matches!(rt.damage_agent(AgentId(9), 1.0), Err(RuntimeError::AgentNotFound(AgentId(9)))));
        assert!(matches!(
            rt.swap_behavior(AgentId(9), DirectConfig::default()),
            Err(RuntimeError::AgentNotFound(_))
        ));
    }

    #[test]
    fn dead_agents_are_removed_after_the_tick() {
        let mut rt = runtime();
        let id = rt.create_agent(DirectConfig::default(), Vec2::new(20.0, 0.0));
        assert!(rt.damage_agent(id, 100.0).unwrap());
        assert!(rt.contains(id));

        let mut rec = Recorder::default();
        rt.step(&mut rec).unwrap();
        assert!(!rt.contains(id));
        assert_eq!(rec.spawned, vec![(id, ArchetypeKind::Direct)]);
        assert_eq!(rec.despawned, vec![(id, DespawnReason::Died)]);
        assert_eq!(rec.ticks[0].despawned, 1);
    }

    #[test]
    fn spawn_from_pool() {
        let mut rt = runtime();
        let empty = BehaviorSelector::default();
        assert!(matches!(rt.spawn_from_pool(&empty, Vec2::ZERO), Err(RuntimeError::EmptyPool)));

        let selector = BehaviorSelector::new(BehaviorPool::new().with(DirectConfig::default(), 1.0));
        let id = rt.spawn_from_pool(&selector, Vec2::new(5.0, 5.0)).unwrap();
        assert_eq!(rt.agent(id).unwrap().kind(), ArchetypeKind::Direct);
    }

    #[test]
    fn unavailable_target_spawns_inert_agents() {
        let mut rt = RuntimeBuilder::new(StaticTarget::unavailable()).build().unwrap();
        let id = rt.create_agent(DirectConfig::default(), Vec2::new(5.0, 0.0));
        assert!(rt.agent(id).unwrap().is_inert());
        rt.run_ticks(30, &mut NoopObserver).unwrap();
        assert_eq!(rt.position_of(id), Some(Vec2::new(5.0, 0.0)));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick {
    use hd_behavior::{
        BehaviorPool, BehaviorSelector, DirectConfig, HammerChargeConfig, PiranhaPackConfig,
        PufferfishConfig, SharkDefaultConfig,
    };
    use hd_agent::StaticTarget;
    use hd_core::{AgentId, Tick, Vec2};

    use super::helpers::{Recorder, runtime, sim_config};
    use crate::{DespawnReason, NoopObserver, RuntimeBuilder};

    #[test]
    fn engaged_agents_never_exceed_capacity() {
        let mut rt = runtime();
        let config = HammerChargeConfig { attack_delay: 0.0, ..Default::default() };
        for i in 0..6 {
            let angle = i as f32 * std::f32::consts::TAU / 6.0;
            rt.create_agent(config.clone(), Vec2::from_angle(angle) * 10.0);
        }
        let stats = rt.step(&mut NoopObserver).unwrap();
        assert_eq!(stats.engaged, 3);
        assert_eq!(rt.arbiter().holders().collect::<Vec<_>>(), vec![AgentId(0), AgentId(1), AgentId(2)]);

        let mut rec = Recorder::default();
        rt.run_ticks(600, &mut rec).unwrap();
        assert!(rec.ticks.iter().all(|t| t.engaged <= 3));
    }

    #[test]
    fn pufferfish_explosions_chain() {
        let mut rt = runtime();
        let first = rt.create_agent(PufferfishConfig::default(), Vec2::new(2.0, 0.0));
        let second = rt.create_agent(PufferfishConfig::default(), Vec2::new(4.0, 0.0));
        let bystander = rt.create_agent(DirectConfig::default(), Vec2::new(40.0, 0.0));
        assert!(rt.damage_agent(first, 1.0).unwrap());

        let mut rec = Recorder::default();
        rt.step(&mut rec).unwrap();
        assert!(!rt.contains(first));
        assert!(rt.agent(second).unwrap().context().unwrap().is_dead());

        rt.step(&mut rec).unwrap();
        assert!(!rt.contains(second));
        assert_eq!(
            rec.despawned,
            vec![(first, DespawnReason::SelfDestructed), (second, DespawnReason::SelfDestructed)]
        );
        assert_eq!(rt.target().total_damage(), 10.0);
        let health = rt.agent(bystander).unwrap().context().unwrap().health;
        assert_eq!(health, 10.0);
    }

    #[test]
    fn run_reaches_end_tick_with_snapshots() {
        let mut rt = RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 100.0))
            .sim(sim_config(120))
            .build()
            .unwrap();
        let id = rt.create_agent(SharkDefaultConfig::default(), Vec2::new(25.0, 0.0));

        let mut rec = Recorder::default();
        rt.run(&mut rec).unwrap();
        assert_eq!(rec.ended, Some(Tick(120)));
        assert_eq!(rec.ticks.len(), 120);
        assert_eq!(rec.starts.first(), Some(&Tick(0)));
        let snapshot_ticks: Vec<Tick> = rec.snapshots.iter().map(|(t, _)| *t).collect();
        assert_eq!(snapshot_ticks, vec![Tick(0), Tick(60)]);
        assert_eq!(rec.snapshots[1].1[0].agent, id);
        assert!(rt.position_of(id).unwrap().length() < 25.0);
    }

    #[test]
    fn snapshot_reports_engagement() {
        let mut rt = runtime();
        let config = HammerChargeConfig { attack_delay: 0.0, ..Default::default() };
        let id = rt.create_agent(config, Vec2::new(10.0, 0.0));
        rt.run_ticks(2, &mut NoopObserver).unwrap();
        let snap = rt.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].agent, id);
        assert!(snap[0].engaged);
        assert_eq!(snap[0].scratch, "charge");
    }

    #[test]
    fn same_seed_same_run() {
        fn positions() -> Vec<Vec2> {
            let mut rt = RuntimeBuilder::new(StaticTarget::new(Vec2::ZERO, 1_000.0))
                .sim(sim_config(300))
                .build()
                .unwrap();
            let selector = BehaviorSelector::new(
                BehaviorPool::new()
                    .with(DirectConfig::default(), 1.0)
                    .with(SharkDefaultConfig::default(), 1.0)
                    .with(PiranhaPackConfig::default(), 2.0),
            );
            for i in 0..8 {
                let angle = i as f32 * 0.8;
                rt.spawn_from_pool(&selector, Vec2::from_angle(angle) * 20.0).unwrap();
            }
            rt.run(&mut NoopObserver).unwrap();
            rt.snapshot().into_iter().map(|s| s.position).collect()
        }
        assert_eq!(positions(), positions());
    }
}
