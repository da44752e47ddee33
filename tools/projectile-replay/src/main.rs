//! projectile-replay: run a projectile scenario headless and print a digest.
//!
//! Usage:
//!   projectile-replay run --configs projectiles.json --level level.json --ticks 600 --seed 7
//!
//! Two runs with the same inputs print the same digest, which makes this a
//! quick lockstep check across builds and machines.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use ricochet_core::components::Collider;
use ricochet_core::registry::ConfigRegistry;
use ricochet_core::FixedVec2;
use ricochet_sim::terrain::LevelDef;
use ricochet_sim::world_setup::ShotParams;
use ricochet_sim::{SimConfig, SimulationEngine};

const DEFAULT_TICKS: u64 = 600;
const DEFAULT_SEED: u64 = 42;

/// Level file: geometry plus the scripted shots and targets to place.
#[derive(Debug, Deserialize)]
struct ReplayLevel {
    #[serde(flatten)]
    level: LevelDef,
    #[serde(default)]
    spawns: Vec<SpawnDef>,
    #[serde(default)]
    targets: Vec<TargetDef>,
    #[serde(default)]
    volley_origin: FixedVec2,
}

#[derive(Debug, Deserialize)]
struct SpawnDef {
    config: String,
    position: FixedVec2,
    #[serde(default = "default_facing")]
    facing_right: bool,
    #[serde(default)]
    shooter_velocity: FixedVec2,
}

fn default_facing() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct TargetDef {
    position: FixedVec2,
    extents: FixedVec2,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "projectile-replay: deterministic projectile scenario runner\n\
         \n\
         Commands:\n\
         \n\
         run       Run a scenario and print survivors, destroyed count and digest\n\
         \n\
           --configs <path>   Projectile config registry (JSON, name -> config)\n\
           --level <path>     Level file (JSON: tile_size, rows, stage, spawns, targets)\n\
           --ticks <N>        Ticks to simulate (default: 600)\n\
           --seed <S>         RNG seed for random volleys (default: 42)\n\
           --volley <N>       Extra random shots fired from volley_origin (default: 0)\n\
         \n\
         Examples:\n\
         \n\
           projectile-replay run --configs content/projectiles.json --level content/arena.json\n\
           RUST_LOG=ricochet_sim=debug projectile-replay run --configs p.json --level l.json --ticks 120\n"
    );
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn parse_number(args: &[String], flag: &str, default: u64) -> u64 {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            match args[i + 1].parse::<u64>() {
                Ok(n) => return n,
                Err(_) => {
                    eprintln!("Error: {flag} expects a non-negative integer, got {}", args[i + 1]);
                    process::exit(1);
                }
            }
        }
    }
    default
}

fn load_level(path: &Path) -> Result<ReplayLevel, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let configs_path = match parse_path(args, "--configs") {
        Some(p) => p,
        None => {
            eprintln!("Error: --configs <path> is required");
            process::exit(1);
        }
    };
    let level_path = match parse_path(args, "--level") {
        Some(p) => p,
        None => {
            eprintln!("Error: --level <path> is required");
            process::exit(1);
        }
    };
    let ticks = parse_number(args, "--ticks", DEFAULT_TICKS);
    let seed = parse_number(args, "--seed", DEFAULT_SEED);
    let volley = parse_number(args, "--volley", 0) as usize;

    let registry = match ConfigRegistry::load(&configs_path) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            eprintln!("Error loading {}: {e}", configs_path.display());
            process::exit(1);
        }
    };
    let replay = match load_level(&level_path) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error loading {}: {e}", level_path.display());
            process::exit(1);
        }
    };
    let terrain = match replay.level.tile_map() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error building level: {e}");
            process::exit(1);
        }
    };

    eprintln!(
        "Loaded {} projectile config(s), {} tile(s), {} scripted shot(s)",
        registry.len(),
        terrain.len(),
        replay.spawns.len(),
    );

    let config = SimConfig {
        seed,
        stage: replay.level.stage,
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(config, Arc::clone(&registry), terrain);
    tracing::info!(seed, ticks, volley, "starting replay");

    for target in &replay.targets {
        engine.spawn_target(target.position, Collider::centered(target.extents));
    }
    for spawn in &replay.spawns {
        let Some(id) = registry.id_of(&spawn.config) else {
            eprintln!("Error: unknown projectile config '{}'", spawn.config);
            process::exit(1);
        };
        let mut params = ShotParams::new(id, spawn.position, spawn.facing_right);
        params.shooter_velocity = spawn.shooter_velocity;
        if let Err(e) = engine.spawn_projectile(params) {
            eprintln!("Error spawning '{}': {e}", spawn.config);
            process::exit(1);
        }
    }
    if let Err(e) = engine.spawn_volley(replay.volley_origin, volley) {
        eprintln!("Error spawning volley: {e}");
        process::exit(1);
    }

    let mut digest = Fnv1a::new();
    let mut destroyed = 0usize;
    let mut survivors = 0usize;
    let mut last_len = 0usize;
    for _ in 0..ticks {
        let snapshot = match engine.tick() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error at tick {}: {e}", engine.time().tick + 1);
                process::exit(1);
            }
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing snapshot: {e}");
                process::exit(1);
            }
        };
        digest.write(json.as_bytes());
        destroyed += snapshot.destroyed().count();
        survivors = snapshot.projectiles.len();
        last_len = json.len();
    }

    println!("ticks:      {}", engine.time().tick);
    println!("survivors:  {survivors}");
    println!("destroyed:  {destroyed}");
    println!("final_len:  {last_len}");
    println!("digest:     {:016x}", digest.finish());
}

/// 64-bit FNV-1a over every snapshot's JSON.
struct Fnv1a(u64);

impl Fnv1a {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self(Self::OFFSET)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= u64::from(byte);
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_matches_reference_vectors() {
        let mut empty = Fnv1a::new();
        empty.write(b"");
        assert_eq!(empty.finish(), 0xcbf2_9ce4_8422_2325);

        let mut a = Fnv1a::new();
        a.write(b"a");
        assert_eq!(a.finish(), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn level_file_parses_spawns_and_defaults() {
        let json = r######"{
            "rows": ["#####"],
            "spawns": [
                { "config": "fireball", "position": { "x": "1", "y": "2" } }
            ],
            "targets": [
                { "position": { "x": "3", "y": "2" }, "extents": { "x": "0.5", "y": "0.5" } }
            ]
        }"######;
        let replay: ReplayLevel = serde_json::from_str(json).unwrap();
        assert_eq!(replay.level.rows.len(), 1);
        assert_eq!(replay.spawns.len(), 1);
        assert!(replay.spawns[0].facing_right);
        assert_eq!(replay.spawns[0].shooter_velocity, FixedVec2::ZERO);
        assert_eq!(replay.targets.len(), 1);
        assert_eq!(replay.volley_origin, FixedVec2::ZERO);
    }

    #[test]
    fn number_flags_fall_back_to_defaults() {
        let args: Vec<String> = ["--ticks", "30"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_number(&args, "--ticks", DEFAULT_TICKS), 30);
        assert_eq!(parse_number(&args, "--seed", DEFAULT_SEED), DEFAULT_SEED);
        assert_eq!(parse_path(&args, "--level"), None);
    }
}
