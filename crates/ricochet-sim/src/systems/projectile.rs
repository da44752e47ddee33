//! Projectile system: per-tick lifetime, collision response, and destruction.
//!
//! Each tick, every live projectile is resolved in ascending entity order:
//!
//! 1. cull below the stage floor,
//! 2. age and expire,
//! 3. one-shot check for having spawned inside solid ground,
//! 4. tile-collision response (strict-45, ricochet, or bounce-or-destroy),
//! 5. re-assert horizontal velocity from `speed` and facing.
//!
//! The resolver never touches the world directly. It returns an [`Outcome`]
//! and the caller performs the destruction, so every path destroys at most
//! once and never updates a projectile after destroying it.

use hecs::{Entity, World};

use ricochet_core::components::{Collider, PhysicsBody, Projectile, Transform};
use ricochet_core::config::{ParticleEffect, ProjectileConfig};
use ricochet_core::constants::{AGE_MAX, HIT_DAMPING, KICK_DESTROY_SPEED, SLOPE_BOOST};
use ricochet_core::events::SimEvent;
use ricochet_core::fixed::sin_deg;
use ricochet_core::types::StageBounds;
use ricochet_core::{Fixed, FixedVec2};

use crate::error::SimError;
use crate::signals::{ProjectileHitSignal, TickContext};
use crate::terrain::SolidQuery;

use super::{collect_sorted, entity_id};

/// Result of resolving one projectile for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Alive,
    Destroyed(ParticleEffect),
}

/// Read/write view of one projectile's components for the duration of an update.
pub struct ProjectileView<'a> {
    pub transform: &'a Transform,
    pub collider: &'a Collider,
    pub projectile: &'a mut Projectile,
    pub body: &'a mut PhysicsBody,
}

/// Resolve every live projectile for this tick.
pub fn run(
    ctx: &mut TickContext<'_>,
    terrain: &dyn SolidQuery,
    stage: &StageBounds,
    order: &mut Vec<Entity>,
) -> Result<(), SimError> {
    collect_sorted::<Projectile>(ctx.world, order);

    for &entity in order.iter() {
        let outcome = {
            let Ok((transform, collider, projectile, body)) = ctx
                .world
                .query_one_mut::<(&Transform, &Collider, &mut Projectile, &mut PhysicsBody)>(entity)
            else {
                continue;
            };
            let config = ctx.registry.get(projectile.config).inspect_err(|err| {
                tracing::error!(entity = ?entity_id(entity), %err, "projectile config lookup failed");
            })?;
            let view = ProjectileView {
                transform,
                collider,
                projectile,
                body,
            };
            update(view, config, terrain, stage)
        };

        if let Outcome::Destroyed(particle) = outcome {
            destroy(ctx.world, ctx.events, entity, particle);
        }
    }

    Ok(())
}

/// Advance one projectile by one tick.
pub fn update(
    view: ProjectileView<'_>,
    config: &ProjectileConfig,
    terrain: &dyn SolidQuery,
    stage: &StageBounds,
) -> Outcome {
    let ProjectileView {
        transform,
        collider,
        projectile,
        body,
    } = view;
    let position = transform.position;

    if collider.bottom(position) < stage.world_min.y {
        return Outcome::Destroyed(ParticleEffect::None);
    }

    if config.lifetime_ticks > 0 {
        if projectile.age < AGE_MAX {
            projectile.age += 1;
        }
        if projectile.age >= config.lifetime_ticks {
            return Outcome::Destroyed(config.destroy_particle);
        }
    }

    if !body.disable_collision && !projectile.checked_spawn_embedding {
        if terrain.is_box_in_solid(position, collider) {
            return Outcome::Destroyed(config.destroy_particle);
        }
        projectile.checked_spawn_embedding = true;
    }

    let outcome = resolve_tile_collision(position, collider, projectile, body, config, terrain);
    if outcome != Outcome::Alive {
        return outcome;
    }

    // Overrides any horizontal velocity left by collision response.
    body.velocity.x = projectile.speed * projectile.facing_sign();
    if config.lock_to_45 {
        body.terminal_velocity = -projectile.speed;
    }

    Outcome::Alive
}

/// Apply the config's collision policy to this tick's contact flags.
pub fn resolve_tile_collision(
    position: FixedVec2,
    collider: &Collider,
    projectile: &mut Projectile,
    body: &mut PhysicsBody,
    config: &ProjectileConfig,
    terrain: &dyn SolidQuery,
) -> Outcome {
    if body.disable_collision {
        return Outcome::Alive;
    }

    let touching_left = body.touching_left_wall;
    let touching_right = body.touching_right_wall;
    let touching_ceiling = body.touching_ceiling;
    let touching_ground = body.touching_ground;

    if config.strict_45 {
        return strict_45_bounce(position, collider, projectile, body, config, terrain);
    }

    if config.ricochet {
        if touching_left && body.velocity.x.is_negative() {
            projectile.facing_right = true;
            projectile.speed *= config.ricochet_damping;
        } else if touching_right && body.velocity.x > Fixed::ZERO {
            projectile.facing_right = false;
            projectile.speed *= config.ricochet_damping;
        }

        if touching_ceiling && body.velocity.y > Fixed::ZERO {
            body.velocity.y = -body.velocity.y.abs() * config.ricochet_damping;
        }
    }

    let hit_wall = (touching_left || touching_right || touching_ceiling) && !config.ricochet;
    let bad_landing = touching_ground
        && (!config.bounce || (projectile.has_bounced && config.destroy_on_second_bounce));
    if hit_wall || bad_landing || terrain.is_box_in_solid(position, collider) {
        return Outcome::Destroyed(config.destroy_particle);
    }

    if touching_ground && config.bounce {
        let mut boost = config.bounce_strength * sin_deg(body.floor_angle).abs() * SLOPE_BOOST;
        if (body.floor_angle > Fixed::ZERO) == projectile.facing_right {
            boost = Fixed::ZERO;
        }

        body.velocity.y = config.bounce_strength + boost;
        body.touching_ground = false;
        projectile.has_bounced = true;
    }

    Outcome::Alive
}

/// Rigid diagonal bounce: vertical speed always equals horizontal speed.
fn strict_45_bounce(
    position: FixedVec2,
    collider: &Collider,
    projectile: &mut Projectile,
    body: &mut PhysicsBody,
    config: &ProjectileConfig,
    terrain: &dyn SolidQuery,
) -> Outcome {
    // Unlike the spawn check, this runs every tick.
    if terrain.is_box_in_solid(position, collider) {
        return Outcome::Destroyed(config.destroy_particle);
    }

    let mut flipped = false;
    if (body.touching_left_wall && !projectile.facing_right)
        || (body.touching_right_wall && projectile.facing_right)
    {
        projectile.facing_right = !projectile.facing_right;
        flipped = true;
    }

    let vertical_speed = projectile.speed.abs();
    if body.touching_ground {
        projectile.has_bounced = true;
        body.velocity.y = vertical_speed;
        body.touching_ground = false;
    } else if body.touching_ceiling {
        projectile.has_bounced = false;
        body.velocity.y = -vertical_speed;
    } else if flipped {
        body.velocity.y = if projectile.has_bounced {
            vertical_speed
        } else {
            -vertical_speed
        };
    }

    Outcome::Alive
}

/// Emit the destroyed event at the projectile's last position, then remove it.
///
/// Does nothing if the entity is already gone.
pub fn destroy(world: &mut World, events: &mut Vec<SimEvent>, entity: Entity, particle: ParticleEffect) {
    let position = match world.get::<&Transform>(entity) {
        Ok(transform) => transform.position,
        Err(_) => {
            tracing::warn!(entity = ?entity_id(entity), "destroy called on a missing projectile");
            return;
        }
    };

    tracing::debug!(entity = ?entity_id(entity), ?particle, "projectile destroyed");
    events.push(SimEvent::ProjectileDestroyed {
        entity: entity_id(entity),
        particle,
        position,
    });
    let _ = world.despawn(entity);
}

/// How a projectile responds to touching a damageable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitReaction {
    /// Non-bouncing, non-destroying projectile: nothing happens.
    Ignored,
    Destroyed(ParticleEffect),
    /// The target was kicked. `spent` is set when the kick drained the
    /// projectile below the survival speed.
    Kicked { spent: Option<ParticleEffect> },
}

/// Apply the hit response to a projectile's state.
pub fn react_to_hit(
    projectile: &mut Projectile,
    body: &mut PhysicsBody,
    config: &ProjectileConfig,
) -> HitReaction {
    if config.destroy_on_hit {
        return HitReaction::Destroyed(config.destroy_particle);
    }
    if !config.bounce {
        return HitReaction::Ignored;
    }

    projectile.speed *= HIT_DAMPING;
    body.gravity *= HIT_DAMPING;
    body.velocity.y = projectile.speed;

    let spent = (projectile.speed < KICK_DESTROY_SPEED).then_some(config.destroy_particle);
    HitReaction::Kicked { spent }
}

/// Hit-signal listener for projectiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectileSystem;

impl ProjectileHitSignal for ProjectileSystem {
    fn on_projectile_hit_entity(
        &self,
        ctx: &mut TickContext<'_>,
        projectile: Entity,
        hit: Entity,
    ) -> Result<(), SimError> {
        let reaction = {
            // Already destroyed earlier this tick.
            let Ok((state, body)) = ctx
                .world
                .query_one_mut::<(&mut Projectile, &mut PhysicsBody)>(projectile)
            else {
                return Ok(());
            };
            let config = ctx.registry.get(state.config)?;
            react_to_hit(state, body, config)
        };

        match reaction {
            HitReaction::Ignored => {}
            HitReaction::Destroyed(particle) => destroy(ctx.world, ctx.events, projectile, particle),
            HitReaction::Kicked { spent } => {
                tracing::debug!(
                    projectile = ?entity_id(projectile),
                    hit = ?entity_id(hit),
                    "projectile kicked entity"
                );
                ctx.events.push(SimEvent::EntityKicked {
                    entity: entity_id(hit),
                    lethal: false,
                });
                if let Some(particle) = spent {
                    destroy(ctx.world, ctx.events, projectile, particle);
                }
            }
        }

        Ok(())
    }
}
