//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STAGE_MIN_Y;
use crate::fixed::{fx, FixedVec2};

/// Serializable form of an ECS entity handle.
///
/// The simulation converts its entity handles into this when emitting events
/// or snapshots, so observers never hold live references into the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// Lower world bound of the current stage. Projectiles whose box falls below
/// `world_min.y` are culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageBounds {
    pub world_min: FixedVec2,
}

impl Default for StageBounds {
    fn default() -> Self {
        Self {
            world_min: FixedVec2::new(fx(-64), DEFAULT_STAGE_MIN_Y),
        }
    }
}
