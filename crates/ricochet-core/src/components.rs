//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TERMINAL_VELOCITY;
use crate::fixed::{Fixed, FixedVec2};
use crate::registry::ConfigId;

/// World placement of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub position: FixedVec2,
}

/// Axis-aligned box collider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collider {
    /// Box centroid relative to the entity position.
    pub offset: FixedVec2,
    /// Half-size of the box on each axis.
    pub extents: FixedVec2,
}

impl Collider {
    pub fn new(offset: FixedVec2, extents: FixedVec2) -> Self {
        Self { offset, extents }
    }

    /// Centered box with the given half-size.
    pub fn centered(extents: FixedVec2) -> Self {
        Self {
            offset: FixedVec2::ZERO,
            extents,
        }
    }

    /// Lower-left corner of the box when the entity sits at `position`.
    pub fn min(&self, position: FixedVec2) -> FixedVec2 {
        position + self.offset - self.extents
    }

    /// Upper-right corner of the box when the entity sits at `position`.
    pub fn max(&self, position: FixedVec2) -> FixedVec2 {
        position + self.offset + self.extents
    }

    /// Y of the box's lower edge.
    pub fn bottom(&self, position: FixedVec2) -> Fixed {
        self.min(position).y
    }

    /// Whether two placed boxes overlap (touching edges do not count).
    pub fn overlaps(&self, position: FixedVec2, other: &Collider, other_position: FixedVec2) -> bool {
        let a_min = self.min(position);
        let a_max = self.max(position);
        let b_min = other.min(other_position);
        let b_max = other.max(other_position);
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Kinematic state and contact flags maintained by the motion system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Velocity in units per second.
    pub velocity: FixedVec2,
    /// Acceleration applied every tick.
    pub gravity: FixedVec2,
    /// Lowest vertical velocity the body may reach (negative = falling).
    pub terminal_velocity: Fixed,
    pub disable_collision: bool,
    pub touching_left_wall: bool,
    pub touching_right_wall: bool,
    pub touching_ceiling: bool,
    pub touching_ground: bool,
    /// Angle of the floor under the body in degrees (positive = rising to the right).
    pub floor_angle: Fixed,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: FixedVec2::ZERO,
            gravity: FixedVec2::ZERO,
            terminal_velocity: DEFAULT_TERMINAL_VELOCITY,
            disable_collision: false,
            touching_left_wall: false,
            touching_right_wall: false,
            touching_ceiling: false,
            touching_ground: false,
            floor_angle: Fixed::ZERO,
        }
    }
}

impl PhysicsBody {
    /// Reset all four contact flags.
    pub fn clear_contacts(&mut self) {
        self.touching_left_wall = false;
        self.touching_right_wall = false;
        self.touching_ceiling = false;
        self.touching_ground = false;
    }
}

/// Per-entity projectile runtime state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    /// Shared, read-only config for this projectile type.
    pub config: ConfigId,
    /// Current horizontal speed magnitude.
    pub speed: Fixed,
    pub facing_right: bool,
    /// Ticks lived, saturating at `AGE_MAX`.
    pub age: u8,
    /// Set by a ground bounce, cleared by a strict-45 ceiling bounce.
    pub has_bounced: bool,
    /// Latched after the one-shot "spawned inside solid" check.
    pub checked_spawn_embedding: bool,
}

impl Projectile {
    pub fn new(config: ConfigId, speed: Fixed, facing_right: bool) -> Self {
        Self {
            config,
            speed,
            facing_right,
            age: 0,
            has_bounced: false,
            checked_spawn_embedding: false,
        }
    }

    /// +1 when facing right, -1 otherwise.
    pub fn facing_sign(&self) -> Fixed {
        if self.facing_right {
            Fixed::ONE
        } else {
            -Fixed::ONE
        }
    }
}

/// Marks an entity that projectiles can hit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Damageable;
