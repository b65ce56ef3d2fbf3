//! raft_defense — a stationary raft besieged by a mixed horde.
//!
//! Agents spawn on a ring around the raft, drawn from a weighted behavior
//! pool (embedded below, or a CSV path given as the first argument).  The
//! raft fights back with a slow turret that hits the nearest hostile body.
//! A boss and a diving shark are spawned by hand to show modulators and
//! phase changes.
//!
//! ```text
//! RUST_LOG=debug cargo run -p raft_defense -- pool.csv
//! ```

use std::env;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use hd_agent::StaticTarget;
use hd_behavior::{
    BehaviorConfig, BehaviorSelector, BossConfig, Modulators, SharkDefaultConfig, Submersion,
    Tactics, load_pool_csv, load_pool_reader,
};
use hd_core::{FactionLayer, SimConfig, Vec2};
use hd_output::{CsvWriter, TelemetryObserver};
use hd_sim::{AgentRuntime, RuntimeBuilder, RuntimeObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:           usize = 24;
const SEED:                  u64   = 42;
const TICK_DT_SECS:          f32   = 1.0 / 60.0;
const SIM_SECS:              u64   = 90;
const OUTPUT_INTERVAL_TICKS: u64   = 30;
const SPAWN_RADIUS:          f32   = 28.0;
const RAFT_HEALTH:           f32   = 400.0;
const TURRET_INTERVAL_TICKS: u64   = 20;
const TURRET_DAMAGE:         f32   = 2.5;
const OUTPUT_DIR:            &str  = "output/raft_defense";

// ── Behavior pool ─────────────────────────────────────────────────────────────

// Empty cells keep archetype defaults.
const POOL_CSV: &str = "\
archetype,weight,enabled,max_speed,speed,attack_range,attack_range_max,out_of_range,respawn_radius,separation_radius,separation_weight,damage\n\
direct,4,,,,,,,,,,\n\
ranged_orbit,2,,,,,,,,,,\n\
hammer_charge,2,,,,,,,,,,3\n\
tank,1,,,,,,,,,,\n\
pack_formation,3,,,,,,,,,,\n\
piranha_pack,3,,,,,,,,,,\n\
pufferfish,1,,,,,,,,,,\n\
boss,1,false,,,,,,,,,\n\
";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn load_selector() -> Result<BehaviorSelector> {
    let pool = match env::args().nth(1) {
        Some(path) => load_pool_csv(Path::new(&path))
            .with_context(|| format!("loading behavior pool from {path}"))?,
        None => load_pool_reader(Cursor::new(POOL_CSV)).context("parsing embedded behavior pool")?,
    };
    info!(entries = pool.len(), weight = pool.enabled_weight(), "behavior pool loaded");
    Ok(BehaviorSelector::new(pool))
}

/// Evenly spaced point `i` of `n` on the spawn ring.
fn ring_point(i: usize, n: usize) -> Vec2 {
    let angle = std::f32::consts::TAU * i as f32 / n.max(1) as f32;
    Vec2::new(angle.cos(), angle.sin()) * SPAWN_RADIUS
}

/// Hit the hostile body nearest the raft.
fn fire_turret(runtime: &mut AgentRuntime<StaticTarget>) -> Result<()> {
    let Some(raft) = runtime.target().position else {
        return Ok(());
    };
    let Some(nearest) = runtime.index().nearest(raft, FactionLayer::Hostile, None) else {
        return Ok(());
    };
    if !runtime.contains(nearest.agent) {
        return Ok(());
    }
    let landed = runtime.damage_agent(nearest.agent, TURRET_DAMAGE)?;
    if !landed {
        debug!(agent = %nearest.agent, "turret shot missed an unhittable agent");
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let config = SimConfig {
        tick_dt_secs:          TICK_DT_SECS,
        total_ticks:           SIM_SECS * 60,
        seed:                  SEED,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
    };
    info!(agents = AGENT_COUNT, ticks = config.total_ticks, seed = SEED, "raft_defense starting");

    // 1. Runtime around a stationary raft.
    let raft = StaticTarget::new(Vec2::ZERO, RAFT_HEALTH);
    let mut runtime = RuntimeBuilder::new(raft)
        .sim(config.clone())
        .arbiter_capacity(3)
        .build()?;

    // 2. Horde from the weighted pool.
    let selector = load_selector()?;
    for i in 0..AGENT_COUNT {
        runtime.spawn_from_pool(&selector, ring_point(i, AGENT_COUNT))?;
    }

    // 3. Hand-placed specials.
    let boss = BehaviorConfig::from(BossConfig::default()).with_modulators(
        Modulators::default().with_tactics(Tactics::default()),
    );
    runtime.create_agent(boss, Vec2::new(0.0, SPAWN_RADIUS + 10.0));

    let shark = BehaviorConfig::from(SharkDefaultConfig::default()).with_modulators(
        Modulators::default().with_submersion(Submersion::default()),
    );
    runtime.create_agent(shark, Vec2::new(-SPAWN_RADIUS - 5.0, 0.0));

    // 4. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))
        .with_context(|| format!("opening output directory {OUTPUT_DIR}"))?;
    let mut obs = TelemetryObserver::new(writer, config.tick_dt_secs);

    // 5. Run in turret-sized slices.
    let t0 = Instant::now();
    let end = config.end_tick();
    while runtime.current_tick() < end {
        let slice = TURRET_INTERVAL_TICKS.min(end.0 - runtime.current_tick().0);
        runtime.run_ticks(slice, &mut obs)?;
        fire_turret(&mut runtime)?;
        if runtime.target().health <= 0.0 {
            warn!(tick = %runtime.current_tick().0, "raft destroyed");
            break;
        }
    }
    obs.on_sim_end(runtime.current_tick());
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "output error");
    }

    // 6. Summary.
    let raft = runtime.target();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks          : {}", runtime.current_tick().0);
    println!("  agents alive   : {}", runtime.len());
    println!("  packs          : {}", runtime.packs().len());
    println!("  raft health    : {:.1} / {:.1}", raft.health, raft.max_health);
    println!("  hits on raft   : {} ({:.1} damage)", raft.hits.len(), raft.total_damage());
    println!("  output         : {OUTPUT_DIR}/");
    println!();

    println!("{:<8} {:<16} {:>8} {:>8} {:<10}", "Agent", "Archetype", "Dist", "Health", "Control");
    println!("{}", "-".repeat(54));
    for (id, instance) in runtime.agents() {
        let Some(ctx) = instance.context() else { continue };
        println!(
            "{:<8} {:<16} {:>8.2} {:>8.1} {:<10}",
            id.0,
            instance.kind().as_str(),
            ctx.distance_to_target,
            ctx.health,
            instance.control().as_str(),
        );
    }

    Ok(())
}
