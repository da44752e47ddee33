use std::sync::Arc;

use ricochet_core::config::{ParticleEffect, ProjectileConfig};
use ricochet_core::registry::ConfigRegistry;
use ricochet_core::{fx, Fixed, FixedVec2};
use ricochet_sim::terrain::TileMap;
use ricochet_sim::{SimConfig, SimulationEngine};

const ARENA: [&str; 8] = [
    "####################",
    "#                  #",
    "#                  #",
    "#      ###         #",
    "#                 /#",
    "#                //#",
    "#\\              ///#",
    "####################",
];

fn registry() -> Arc<ConfigRegistry> {
    let mut registry = ConfigRegistry::new();
    registry
        .insert(
            "fireball",
            ProjectileConfig {
                speed: fx(6),
                bounce_strength: fx(7),
                gravity: FixedVec2::from_ints(0, -40),
                lifetime_ticks: 240,
                destroy_particle: ParticleEffect::FireballWall,
                ..Default::default()
            },
        )
        .unwrap();
    registry
        .insert(
            "shell",
            ProjectileConfig {
                ricochet: true,
                lock_to_45: false,
                speed: fx(9),
                gravity: FixedVec2::from_ints(0, -20),
                bounce_strength: fx(5),
                destroy_on_hit: false,
                ..Default::default()
            },
        )
        .unwrap();
    registry
        .insert(
            "diamond",
            ProjectileConfig {
                strict_45: true,
                speed: fx(5),
                lifetime_ticks: 200,
                destroy_particle: ParticleEffect::Sparkle,
                ..Default::default()
            },
        )
        .unwrap();
    Arc::new(registry)
}

fn run_scenario(seed: u64, ticks: u64) -> Vec<String> {
    let config = SimConfig {
        seed,
        ..Default::default()
    };
    let terrain = TileMap::from_rows(fx(1), &ARENA).unwrap();
    let mut engine = SimulationEngine::new(config, registry(), terrain);
    engine
        .spawn_volley(FixedVec2::new(fx(10), Fixed::from_num(4.5)), 20)
        .unwrap();
    engine.spawn_target(
        FixedVec2::from_ints(14, 2),
        ricochet_core::components::Collider::centered(FixedVec2::from_ints(1, 1)),
    );

    (0..ticks)
        .map(|_| serde_json::to_string(&engine.tick().unwrap()).unwrap())
        .collect()
}

#[test]
fn identical_seeds_produce_identical_snapshots() {
    let run1 = run_scenario(7, 300);
    let run2 = run_scenario(7, 300);

    assert_eq!(run1.len(), run2.len());
    for (tick, (a, b)) in run1.iter().zip(&run2).enumerate() {
        assert_eq!(a, b, "snapshots diverged at tick {}", tick + 1);
    }
}

#[test]
fn different_seeds_diverge() {
    let run1 = run_scenario(7, 30);
    let run2 = run_scenario(8, 30);

    assert_ne!(run1, run2, "different seeds should produce different volleys");
}

#[test]
fn volley_size_is_respected() {
    let terrain = TileMap::from_rows(fx(1), &ARENA).unwrap();
    let mut engine = SimulationEngine::new(SimConfig::default(), registry(), terrain);
    let spawned = engine.spawn_volley(FixedVec2::from_ints(10, 4), 12).unwrap();
    assert_eq!(spawned.len(), 12);

    let first = engine.tick().unwrap();
    assert_eq!(first.projectiles.len() + first.destroyed().count(), 12);
}

#[test]
fn empty_registry_spawns_nothing() {
    let mut engine = SimulationEngine::new(
        SimConfig::default(),
        Arc::new(ConfigRegistry::new()),
        TileMap::default(),
    );
    assert!(engine.spawn_volley(FixedVec2::ZERO, 5).unwrap().is_empty());
    // Nothing is reserved up front for an oversized request.
    assert!(engine
        .spawn_volley(FixedVec2::ZERO, usize::MAX)
        .unwrap()
        .is_empty());
}
