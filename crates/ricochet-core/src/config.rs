//! Projectile type definitions.
//!
//! A `ProjectileConfig` describes one projectile *type*. Configs are loaded
//! once, stored in a [`ConfigRegistry`](crate::registry::ConfigRegistry), and
//! referenced by id from every live projectile. They are never mutated at
//! runtime.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RICOCHET_DAMPING;
use crate::fixed::{Fixed, FixedVec2};

/// Gameplay tag carried by a projectile. Opaque to the collision logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileEffect {
    #[default]
    Fire,
    Freeze,
    KillAndSoftKnockback,
}

/// Particle effect played where a projectile is destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleEffect {
    #[default]
    None,
    Puff,
    FireballWall,
    IceballShatter,
    Sparkle,
}

/// Sound played when a projectile is shot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    #[default]
    ProjectileShoot,
    IceShoot,
    HammerThrow,
    BallShoot,
}

/// Immutable description of a projectile type.
///
/// Collision policy precedence is `strict_45` > `ricochet` > plain
/// bounce-or-destroy. `lock_to_45` is independent of `strict_45`: it only caps
/// the fall speed at the projectile's horizontal speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub effect: ProjectileEffect,
    pub bounce: bool,
    pub ricochet: bool,
    pub strict_45: bool,
    pub speed: Fixed,
    pub bounce_strength: Fixed,
    /// Speed multiplier per wall/ceiling ricochet, in (0, 1].
    pub ricochet_damping: Fixed,
    pub gravity: FixedVec2,
    /// Lifetime in ticks; 0 = lives until something else destroys it.
    pub lifetime_ticks: u8,
    pub destroy_on_second_bounce: bool,
    pub destroy_on_hit: bool,
    pub lock_to_45: bool,
    pub inherit_shooter_velocity: bool,
    pub has_collision: bool,
    pub ignores_special_shield: bool,
    pub destroy_particle: ParticleEffect,
    pub shoot_sound: SoundEffect,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            effect: ProjectileEffect::default(),
            bounce: true,
            ricochet: false,
            strict_45: false,
            speed: Fixed::ZERO,
            bounce_strength: Fixed::ZERO,
            ricochet_damping: DEFAULT_RICOCHET_DAMPING,
            gravity: FixedVec2::ZERO,
            lifetime_ticks: 0,
            destroy_on_second_bounce: false,
            destroy_on_hit: true,
            lock_to_45: true,
            inherit_shooter_velocity: false,
            has_collision: true,
            ignores_special_shield: true,
            destroy_particle: ParticleEffect::None,
            shoot_sound: SoundEffect::default(),
        }
    }
}
