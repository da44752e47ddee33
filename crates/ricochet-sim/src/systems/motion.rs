//! Motion integration against the tile map.
//!
//! Applies gravity, caps fall speed at the body's terminal velocity, and
//! moves each axis separately. A move that would embed the box in solid
//! tiles is blocked and raises the matching contact flag. Velocity is left
//! untouched so the projectile resolver sees what direction it was moving.

use hecs::{Entity, World};

use ricochet_core::components::{Collider, PhysicsBody, Transform};
use ricochet_core::constants::DT;
use ricochet_core::{Fixed, FixedVec2};

use crate::terrain::{SolidQuery, TileMap};

use super::collect_sorted;

/// Integrate every body with a transform and collider.
pub fn run(world: &mut World, terrain: &TileMap, order: &mut Vec<Entity>) {
    collect_sorted::<PhysicsBody>(world, order);

    for &entity in order.iter() {
        let Ok((transform, collider, body)) =
            world.query_one_mut::<(&mut Transform, &Collider, &mut PhysicsBody)>(entity)
        else {
            continue;
        };
        step(transform, collider, body, terrain);
    }
}

/// Advance one body by one tick.
pub fn step(transform: &mut Transform, collider: &Collider, body: &mut PhysicsBody, terrain: &TileMap) {
    body.clear_contacts();

    body.velocity += body.gravity * DT;
    if body.velocity.y < body.terminal_velocity {
        body.velocity.y = body.terminal_velocity;
    }

    let delta = body.velocity * DT;
    if body.disable_collision {
        transform.position += delta;
        return;
    }

    if delta.x != Fixed::ZERO {
        let moved = transform.position + FixedVec2::new(delta.x, Fixed::ZERO);
        if terrain.is_box_in_solid(moved, collider) {
            if delta.x.is_negative() {
                body.touching_left_wall = true;
            } else {
                body.touching_right_wall = true;
            }
        } else {
            transform.position = moved;
        }
    }

    if delta.y != Fixed::ZERO {
        let moved = transform.position + FixedVec2::new(Fixed::ZERO, delta.y);
        match terrain.first_overlapping_tile(moved, collider) {
            Some(tile) if delta.y.is_negative() => {
                body.touching_ground = true;
                body.floor_angle = tile.floor_angle;
            }
            Some(_) => body.touching_ceiling = true,
            None => transform.position = moved,
        }
    }
}
