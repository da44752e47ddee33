//! Hit signal: synchronous notification that a projectile touched a
//! damageable entity.
//!
//! Listeners register with a [`HitDispatcher`]. The contact system (or any
//! external collision collaborator) dispatches within the owning tick, and
//! every listener runs to completion in registration order.

use hecs::{Entity, World};

use ricochet_core::events::SimEvent;
use ricochet_core::registry::ConfigRegistry;

use crate::error::SimError;

/// Mutable view of the simulation handed to systems and signal listeners.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub registry: &'a ConfigRegistry,
    pub events: &'a mut Vec<SimEvent>,
}

pub trait ProjectileHitSignal {
    fn on_projectile_hit_entity(
        &self,
        ctx: &mut TickContext<'_>,
        projectile: Entity,
        hit: Entity,
    ) -> Result<(), SimError>;
}

#[derive(Default)]
pub struct HitDispatcher {
    listeners: Vec<Box<dyn ProjectileHitSignal>>,
}

impl HitDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: impl ProjectileHitSignal + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Notify every listener, stopping at the first error.
    pub fn dispatch(
        &self,
        ctx: &mut TickContext<'_>,
        projectile: Entity,
        hit: Entity,
    ) -> Result<(), SimError> {
        for listener in &self.listeners {
            listener.on_projectile_hit_entity(ctx, projectile, hit)?;
        }
        Ok(())
    }
}
