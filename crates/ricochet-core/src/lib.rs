//! Core types and definitions for the RICOCHET projectile simulation.
//!
//! This crate defines the vocabulary shared by the simulation and its tools:
//! fixed-point math, components, projectile configs, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod fixed;
pub mod registry;
pub mod types;

pub use crate::fixed::{fx, Fixed, FixedVec2};

#[cfg(test)]
mod tests;
