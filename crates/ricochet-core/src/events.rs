//! Events emitted by the simulation for presentation and gameplay observers.

use serde::{Deserialize, Serialize};

use crate::config::{ParticleEffect, SoundEffect};
use crate::fixed::FixedVec2;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A projectile was spawned by a shooter.
    ProjectileShot { entity: EntityId, sound: SoundEffect },
    /// A projectile is about to be removed from the world.
    /// `position` is its last position, captured before removal.
    ProjectileDestroyed {
        entity: EntityId,
        particle: ParticleEffect,
        position: FixedVec2,
    },
    /// A projectile kicked a damageable entity.
    EntityKicked { entity: EntityId, lethal: bool },
}
