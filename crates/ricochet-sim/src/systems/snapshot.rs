//! Snapshot system: builds a serializable view of every live projectile.
//!
//! This system is read-only. Two peers running the same inputs must produce
//! byte-identical snapshot JSON.

use hecs::World;
use serde::{Deserialize, Serialize};

use ricochet_core::components::{PhysicsBody, Projectile, Transform};
use ricochet_core::events::SimEvent;
use ricochet_core::registry::ConfigId;
use ricochet_core::types::{EntityId, SimTime};
use ricochet_core::{Fixed, FixedVec2};

use super::entity_id;

/// State of the world after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub time: SimTime,
    /// Live projectiles, sorted by entity id.
    pub projectiles: Vec<ProjectileRecord>,
    /// Events emitted since the previous snapshot, in emission order.
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileRecord {
    pub entity: EntityId,
    pub config: ConfigId,
    pub position: FixedVec2,
    pub velocity: FixedVec2,
    pub speed: Fixed,
    pub age: u8,
    pub facing_right: bool,
    pub has_bounced: bool,
}

impl TickSnapshot {
    /// Ids of projectiles destroyed during this tick.
    pub fn destroyed(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.events.iter().filter_map(|event| match event {
            SimEvent::ProjectileDestroyed { entity, .. } => Some(*entity),
            _ => None,
        })
    }
}

pub fn build_snapshot(world: &World, time: &SimTime, events: Vec<SimEvent>) -> TickSnapshot {
    let mut query = world.query::<(&Projectile, &Transform, &PhysicsBody)>();
    let mut projectiles: Vec<ProjectileRecord> = query
        .iter()
        .map(|(entity, (projectile, transform, body))| ProjectileRecord {
            entity: entity_id(entity),
            config: projectile.config,
            position: transform.position,
            velocity: body.velocity,
            speed: projectile.speed,
            age: projectile.age,
            facing_right: projectile.facing_right,
            has_bounced: projectile.has_bounced,
        })
        .collect();
    projectiles.sort_unstable_by_key(|record| record.entity);

    TickSnapshot {
        time: *time,
        projectiles,
        events,
    }
}
