//! Tests for fixed-point math, config defaults and registry validation.

use crate::config::*;
use crate::constants::*;
use crate::error::ConfigError;
use crate::events::SimEvent;
use crate::fixed::{fx, sin_deg, Fixed, FixedVec2};
use crate::registry::{ConfigId, ConfigRegistry};
use crate::types::EntityId;

fn approx(value: Fixed, expected: f64, tolerance: f64) -> bool {
    (value.to_num::<f64>() - expected).abs() <= tolerance
}

// ---- Fixed-point ----

#[test]
fn test_sin_deg_known_angles() {
    let cases = [
        (0, 0.0),
        (30, 0.5),
        (45, std::f64::consts::FRAC_1_SQRT_2),
        (90, 1.0),
        (150, 0.5),
        (180, 0.0),
        (210, -0.5),
        (270, -1.0),
        (-30, -0.5),
        (-90, -1.0),
        (405, std::f64::consts::FRAC_1_SQRT_2),
    ];
    for (degrees, expected) in cases {
        let value = sin_deg(fx(degrees));
        assert!(
            approx(value, expected, 1e-3),
            "sin({degrees}) = {value}, expected {expected}"
        );
    }
}

#[test]
fn test_sin_deg_is_odd() {
    for degrees in (0..360).step_by(7) {
        assert_eq!(sin_deg(fx(degrees)), -sin_deg(fx(-degrees)), "angle {degrees}");
    }
}

#[test]
fn test_constants_bit_exact() {
    assert!(approx(HIT_DAMPING, 0.85, 1e-4));
    assert_eq!(SLOPE_BOOST, Fixed::from_num(1.25));
    assert!(approx(DT * fx(60), 1.0, 1e-3));
    assert_eq!(KICK_DESTROY_SPEED, Fixed::ONE);
}

#[test]
fn test_fixed_vec2_ops() {
    let a = FixedVec2::from_ints(3, -2);
    let b = FixedVec2::from_ints(1, 5);
    assert_eq!(a + b, FixedVec2::from_ints(4, 3));
    assert_eq!(a - b, FixedVec2::from_ints(2, -7));
    assert_eq!(-a, FixedVec2::from_ints(-3, 2));
    assert_eq!(a * fx(2), FixedVec2::from_ints(6, -4));
}

// ---- Config defaults ----

#[test]
fn test_config_defaults_match_asset_defaults() {
    let config = ProjectileConfig::default();
    assert!(config.bounce);
    assert!(!config.ricochet);
    assert!(!config.strict_45);
    assert!(config.destroy_on_hit);
    assert!(config.lock_to_45);
    assert!(config.has_collision);
    assert!(config.ignores_special_shield);
    assert_eq!(config.ricochet_damping, DEFAULT_RICOCHET_DAMPING);
    assert_eq!(config.lifetime_ticks, 0);
    assert_eq!(config.destroy_particle, ParticleEffect::None);
}

// ---- Registry ----

#[test]
fn test_registry_assigns_sequential_ids() {
    let mut registry = ConfigRegistry::new();
    let a = registry.insert("fireball", ProjectileConfig::default()).unwrap();
    let b = registry.insert("iceball", ProjectileConfig::default()).unwrap();
    assert_eq!(a, ConfigId(0));
    assert_eq!(b, ConfigId(1));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.id_of("iceball"), Some(b));
    assert_eq!(registry.name_of(a), Some("fireball"));
}

#[test]
fn test_registry_rejects_duplicate_names() {
    let mut registry = ConfigRegistry::new();
    registry.insert("fireball", ProjectileConfig::default()).unwrap();
    let err = registry
        .insert("fireball", ProjectileConfig::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateName(name) if name == "fireball"));
}

#[test]
fn test_registry_unknown_id() {
    let registry = ConfigRegistry::new();
    assert!(matches!(
        registry.get(ConfigId(3)),
        Err(ConfigError::UnknownConfig(ConfigId(3)))
    ));
}

#[test]
fn test_registry_damping_range() {
    let mut registry = ConfigRegistry::new();

    for (name, damping, ok) in [
        ("zero", Fixed::ZERO, false),
        ("negative", fx(-1), false),
        ("above_one", Fixed::from_num(1.5), false),
        ("one", Fixed::ONE, true),
        ("half", Fixed::from_num(0.5), true),
    ] {
        let config = ProjectileConfig {
            ricochet_damping: damping,
            ..Default::default()
        };
        let result = registry.insert(name, config);
        assert_eq!(result.is_ok(), ok, "damping {damping} for {name}");
        if !ok {
            assert!(matches!(result, Err(ConfigError::InvalidDamping { .. })));
        }
    }
}

#[test]
fn test_registry_rejects_negative_speed() {
    let mut registry = ConfigRegistry::new();
    let config = ProjectileConfig {
        speed: fx(-3),
        ..Default::default()
    };
    let err = registry.insert("backwards", config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NegativeValue { field: "speed", .. }
    ));
}

#[test]
fn test_registry_from_json_sorted_ids_and_defaults() {
    let json = r#"{
        "superball": { "ricochet": true, "speed": "10", "lifetime_ticks": 200 },
        "fireball": {
            "speed": "4.5",
            "bounce_strength": "3",
            "gravity": { "x": "0", "y": "-20" },
            "destroy_particle": "FireballWall"
        }
    }"#;
    let registry = ConfigRegistry::from_json_str(json).unwrap();

    let fireball = registry.id_of("fireball").unwrap();
    let superball = registry.id_of("superball").unwrap();
    assert_eq!(fireball, ConfigId(0));
    assert_eq!(superball, ConfigId(1));

    let config = registry.get(fireball).unwrap();
    assert_eq!(config.speed, Fixed::from_num(4.5));
    assert_eq!(config.gravity, FixedVec2::from_ints(0, -20));
    assert_eq!(config.destroy_particle, ParticleEffect::FireballWall);
    assert!(config.bounce);
    assert!(config.destroy_on_hit);

    let config = registry.get(superball).unwrap();
    assert!(config.ricochet);
    assert_eq!(config.lifetime_ticks, 200);
    assert_eq!(config.ricochet_damping, DEFAULT_RICOCHET_DAMPING);
}

#[test]
fn test_registry_from_json_propagates_validation() {
    let json = r#"{ "bad": { "ricochet_damping": "0" } }"#;
    assert!(matches!(
        ConfigRegistry::from_json_str(json),
        Err(ConfigError::InvalidDamping { .. })
    ));
    assert!(matches!(
        ConfigRegistry::from_json_str("not json"),
        Err(ConfigError::Parse(_))
    ));
}

// ---- Serde ----

#[test]
fn test_event_serde() {
    let event = SimEvent::ProjectileDestroyed {
        entity: EntityId(7),
        particle: ParticleEffect::Puff,
        position: FixedVec2::from_ints(2, -1),
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"ProjectileDestroyed\""));
    let back: SimEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);
}
