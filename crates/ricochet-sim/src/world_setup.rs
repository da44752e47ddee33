//! Entity spawn factories.
//!
//! Creates projectiles and damageable targets with the component bundles the
//! systems expect.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ricochet_core::components::{Collider, Damageable, PhysicsBody, Projectile, Transform};
use ricochet_core::config::ProjectileConfig;
use ricochet_core::registry::{ConfigId, ConfigRegistry};
use ricochet_core::{Fixed, FixedVec2};

/// Half-size of a projectile's box unless the shooter overrides it.
pub const DEFAULT_PROJECTILE_EXTENTS: FixedVec2 =
    FixedVec2::new(Fixed::from_bits(1 << 14), Fixed::from_bits(1 << 14)); // 0.25

/// Everything a shooter decides about one shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotParams {
    pub config: ConfigId,
    pub position: FixedVec2,
    pub facing_right: bool,
    /// Shooter's velocity at the moment of firing.
    pub shooter_velocity: FixedVec2,
    pub collider: Collider,
}

impl ShotParams {
    pub fn new(config: ConfigId, position: FixedVec2, facing_right: bool) -> Self {
        Self {
            config,
            position,
            facing_right,
            shooter_velocity: FixedVec2::ZERO,
            collider: Collider::centered(DEFAULT_PROJECTILE_EXTENTS),
        }
    }
}

/// Spawn a projectile entity.
///
/// Projectiles locked to 45 degrees start moving diagonally downward with
/// their fall speed capped at their horizontal speed. Others start level
/// and fall up to `terminal_velocity`.
pub fn spawn_projectile(
    world: &mut World,
    config: &ProjectileConfig,
    params: ShotParams,
    terminal_velocity: Fixed,
) -> Entity {
    let mut projectile = Projectile::new(params.config, config.speed, params.facing_right);

    if config.inherit_shooter_velocity {
        let along = params.shooter_velocity.x * projectile.facing_sign();
        if along > Fixed::ZERO {
            projectile.speed += along;
        }
    }

    let speed = projectile.speed;
    let body = PhysicsBody {
        velocity: FixedVec2::new(
            speed * projectile.facing_sign(),
            if config.lock_to_45 { -speed } else { Fixed::ZERO },
        ),
        gravity: config.gravity,
        terminal_velocity: if config.lock_to_45 {
            -speed
        } else {
            terminal_velocity
        },
        disable_collision: !config.has_collision,
        ..Default::default()
    };

    world.spawn((
        Transform {
            position: params.position,
        },
        params.collider,
        projectile,
        body,
    ))
}

/// Spawn a damageable target.
pub fn spawn_target(world: &mut World, position: FixedVec2, collider: Collider) -> Entity {
    world.spawn((Damageable, Transform { position }, collider))
}

/// Roll a random shot near `origin`: random config, facing, and a sub-tile
/// offset. Returns `None` if the registry is empty.
pub fn random_shot(
    rng: &mut ChaCha8Rng,
    registry: &ConfigRegistry,
    origin: FixedVec2,
) -> Option<ShotParams> {
    if registry.is_empty() {
        return None;
    }

    let one = Fixed::ONE.to_bits();
    let config = ConfigId(rng.gen_range(0..registry.len() as u32) as u16);
    let facing_right = rng.gen_bool(0.5);
    let offset = FixedVec2::new(
        Fixed::from_bits(rng.gen_range(-one..one)),
        Fixed::from_bits(rng.gen_range(0..one)),
    );

    Some(ShotParams::new(config, origin + offset, facing_right))
}
