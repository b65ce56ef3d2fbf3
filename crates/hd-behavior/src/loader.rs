//! CSV behavior-pool loader.
//!
//! # CSV format
//!
//! One row per pool entry.  Every column after `weight` is optional; an
//! empty cell keeps the archetype's default.
//!
//! ```csv
//! archetype,weight,enabled,max_speed,speed,attack_range,attack_range_max,out_of_range,respawn_radius,separation_radius,separation_weight,damage
//! direct,3,true,,,,,,,,,
//! hammer_charge,1,,6.0,,,,,,,,4.0
//! shark_default,2,false,,,,,,,,,
//! ```
//!
//! `archetype` is one of the snake-case names from
//! [`ArchetypeKind::as_str`].  Numeric tunables go through the usual
//! clamping; only unknown archetypes, negative weights, and malformed rows
//! are errors.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{
    ArchetypeConfig, ArchetypeKind, BehaviorConfig, BehaviorError, BehaviorPool, BehaviorResult,
    WeightedConfig,
};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PoolRecord {
    archetype:         String,
    weight:            f32,
    enabled:           Option<bool>,
    max_speed:         Option<f32>,
    speed:             Option<f32>,
    attack_range:      Option<f32>,
    attack_range_max:  Option<f32>,
    out_of_range:      Option<f32>,
    respawn_radius:    Option<f32>,
    separation_radius: Option<f32>,
    separation_weight: Option<f32>,
    damage:            Option<f32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a behavior pool from a CSV file.
pub fn load_pool_csv(path: &Path) -> BehaviorResult<BehaviorPool> {
    let file = std::fs::File::open(path).map_err(BehaviorError::Io)?;
    load_pool_reader(file)
}

/// Like [`load_pool_csv`] but accepts any `Read` source.
pub fn load_pool_reader<R: Read>(reader: R) -> BehaviorResult<BehaviorPool> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut pool = BehaviorPool::new();

    for (row, result) in csv_reader.deserialize::<PoolRecord>().enumerate() {
        let record = result.map_err(|e| BehaviorError::Parse(e.to_string()))?;
        pool.push(build_entry(record, row + 1)?);
    }
    Ok(pool)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_entry(r: PoolRecord, row: usize) -> BehaviorResult<WeightedConfig> {
    let kind: ArchetypeKind = r.archetype.parse()?;
    if !(r.weight >= 0.0) {
        return Err(BehaviorError::InvalidConfig(format!(
            "row {row}: weight must be >= 0, got {}",
            r.weight
        )));
    }

    let mut archetype = ArchetypeConfig::defaults(kind);
    let tuning = archetype.tuning_mut();
    for (slot, value) in [
        (&mut tuning.max_speed,         r.max_speed),
        (&mut tuning.speed,             r.speed),
        (&mut tuning.attack_range,      r.attack_range),
        (&mut tuning.attack_range_max,  r.attack_range_max),
        (&mut tuning.out_of_range,      r.out_of_range),
        (&mut tuning.respawn_radius,    r.respawn_radius),
        (&mut tuning.separation_radius, r.separation_radius),
        (&mut tuning.separation_weight, r.separation_weight),
    ] {
        if let Some(v) = value {
            *slot = v;
        }
    }
    if let Some(damage) = r.damage {
        archetype.set_damage(damage);
    }

    Ok(WeightedConfig {
        config:  BehaviorConfig::new(archetype).sanitized(),
        weight:  r.weight,
        enabled: r.enabled.unwrap_or(true),
    })
}
