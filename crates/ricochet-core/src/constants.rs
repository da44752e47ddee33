//! Simulation constants and tuning parameters.

use crate::fixed::{fx, Fixed};

/// Seconds per tick (1/60, rounded to the nearest Q48.16 value).
pub const DT: Fixed = Fixed::from_bits(1092);

// --- Projectile lifetime ---

/// Saturation point of the per-projectile age counter.
pub const AGE_MAX: u8 = u8::MAX;

// --- Collision response ---

/// Damping applied to speed and gravity each time a projectile kicks an entity.
pub const HIT_DAMPING: Fixed = Fixed::from_bits(55_706); // 0.85

/// Default wall/ceiling damping for ricochet projectiles.
pub const DEFAULT_RICOCHET_DAMPING: Fixed = Fixed::from_bits(55_706); // 0.85

/// Multiplier on the slope component of a ground bounce.
pub const SLOPE_BOOST: Fixed = Fixed::from_bits(81_920); // 1.25

/// Below this speed a kicking projectile is spent and destroyed.
pub const KICK_DESTROY_SPEED: Fixed = fx(1);

// --- Physics defaults ---

/// Fall speed cap for bodies that do not lock to 45 degrees (units/s, negative = down).
pub const DEFAULT_TERMINAL_VELOCITY: Fixed = fx(-8);

/// Edge length of one level tile in world units.
pub const DEFAULT_TILE_SIZE: Fixed = fx(1);

/// Default minimum world Y below which projectiles are culled.
pub const DEFAULT_STAGE_MIN_Y: Fixed = fx(-64);
