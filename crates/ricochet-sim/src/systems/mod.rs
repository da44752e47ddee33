//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or a `TickContext`).
//! Entities are always visited in ascending entity-id order so every peer
//! performs the same mutations in the same sequence.

use hecs::{Component, Entity, World};

use ricochet_core::types::EntityId;

pub mod contact;
pub mod motion;
pub mod projectile;
pub mod snapshot;

/// Fill `buffer` with every entity that has `C`, sorted by entity id.
/// Reuses the buffer to avoid per-tick allocation.
pub fn collect_sorted<C: Component>(world: &World, buffer: &mut Vec<Entity>) {
    buffer.clear();
    let mut query = world.query::<&C>();
    buffer.extend(query.iter().map(|(entity, _)| entity));
    buffer.sort_unstable_by_key(|entity| entity.id());
}

/// Serializable id for an entity handle.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}
