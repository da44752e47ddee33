//! Simulation engine: the lockstep tick loop.
//!
//! `SimulationEngine` owns the hecs ECS world, the level, and the shared
//! config registry. Each `tick()` runs motion, the projectile resolver, and
//! contact detection in a fixed order and returns a `TickSnapshot`.
//! Completely headless, so two engines fed the same inputs can be compared
//! snapshot by snapshot.

use std::sync::Arc;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ricochet_core::components::{Collider, Projectile};
use ricochet_core::constants::DEFAULT_TERMINAL_VELOCITY;
use ricochet_core::events::SimEvent;
use ricochet_core::registry::ConfigRegistry;
use ricochet_core::types::{SimTime, StageBounds};
use ricochet_core::{Fixed, FixedVec2};

use crate::error::SimError;
use crate::signals::{HitDispatcher, ProjectileHitSignal, TickContext};
use crate::systems;
use crate::systems::projectile::ProjectileSystem;
use crate::systems::snapshot::TickSnapshot;
use crate::terrain::TileMap;
use crate::world_setup::{self, ShotParams};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub stage: StageBounds,
    /// Fall speed cap for projectiles that are not locked to 45 degrees.
    pub terminal_velocity: Fixed,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            stage: StageBounds::default(),
            terminal_velocity: DEFAULT_TERMINAL_VELOCITY,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    registry: Arc<ConfigRegistry>,
    terrain: TileMap,
    stage: StageBounds,
    terminal_velocity: Fixed,
    time: SimTime,
    rng: ChaCha8Rng,
    dispatcher: HitDispatcher,
    events: Vec<SimEvent>,
    order_buffer: Vec<Entity>,
    target_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create a new engine. The projectile system is registered as a hit
    /// listener before anything else.
    pub fn new(config: SimConfig, registry: Arc<ConfigRegistry>, terrain: TileMap) -> Self {
        let mut dispatcher = HitDispatcher::new();
        dispatcher.register(ProjectileSystem);

        Self {
            world: World::new(),
            registry,
            terrain,
            stage: config.stage,
            terminal_velocity: config.terminal_velocity,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            dispatcher,
            events: Vec::new(),
            order_buffer: Vec::new(),
            target_buffer: Vec::new(),
        }
    }

    /// Add another hit listener. Listeners run in registration order.
    pub fn register_hit_listener(&mut self, listener: impl ProjectileHitSignal + 'static) {
        self.dispatcher.register(listener);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> Result<TickSnapshot, SimError> {
        let _span = tracing::debug_span!("tick", tick = self.time.tick).entered();

        // 1. Motion integration and contact flags
        systems::motion::run(&mut self.world, &self.terrain, &mut self.order_buffer);

        let mut ctx = TickContext {
            world: &mut self.world,
            registry: self.registry.as_ref(),
            events: &mut self.events,
        };
        // 2. Projectile resolver
        systems::projectile::run(&mut ctx, &self.terrain, &self.stage, &mut self.order_buffer)?;
        // 3. Projectile vs damageable contacts
        systems::contact::run(
            &mut ctx,
            &self.dispatcher,
            &mut self.order_buffer,
            &mut self.target_buffer,
        )?;

        self.time.advance();

        let events = std::mem::take(&mut self.events);
        Ok(systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            events,
        ))
    }

    /// Spawn a projectile and emit its shot event.
    pub fn spawn_projectile(&mut self, params: ShotParams) -> Result<Entity, SimError> {
        let config = self.registry.get(params.config)?;
        let entity =
            world_setup::spawn_projectile(&mut self.world, config, params, self.terminal_velocity);

        self.events.push(SimEvent::ProjectileShot {
            entity: systems::entity_id(entity),
            sound: config.shoot_sound,
        });
        Ok(entity)
    }

    /// Spawn `count` random projectiles around `origin` using the seeded RNG.
    pub fn spawn_volley(&mut self, origin: FixedVec2, count: usize) -> Result<Vec<Entity>, SimError> {
        let mut spawned = Vec::new();
        for _ in 0..count {
            let Some(params) = world_setup::random_shot(&mut self.rng, &self.registry, origin) else {
                break;
            };
            spawned.push(self.spawn_projectile(params)?);
        }
        Ok(spawned)
    }

    /// Spawn a damageable target.
    pub fn spawn_target(&mut self, position: FixedVec2, collider: Collider) -> Entity {
        world_setup::spawn_target(&mut self.world, position, collider)
    }

    /// Hit-signal entry point for external collision collaborators.
    ///
    /// Must be called between ticks or from within the owning tick; events
    /// it emits appear in the next snapshot.
    pub fn signal_projectile_hit(&mut self, projectile: Entity, hit: Entity) -> Result<(), SimError> {
        let mut ctx = TickContext {
            world: &mut self.world,
            registry: self.registry.as_ref(),
            events: &mut self.events,
        };
        self.dispatcher.dispatch(&mut ctx, projectile, hit)
    }

    /// Whether `entity` is a live projectile.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world.get::<&Projectile>(entity).is_ok()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn stage(&self) -> &StageBounds {
        &self.stage
    }

    pub fn registry(&self) -> &Arc<ConfigRegistry> {
        &self.registry
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for collaborators that place or edit entities.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
