//! Simulation engine for RICOCHET.
//!
//! Owns the hecs ECS world, runs the projectile systems once per lockstep
//! tick in a fixed order, and produces `TickSnapshot`s for observers.

pub mod engine;
pub mod error;
pub mod signals;
pub mod systems;
pub mod terrain;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use error::SimError;
pub use ricochet_core as core;
