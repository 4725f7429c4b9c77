//! Rippling water with floating bodies.
//!
//! The core ([`water`], [`buoyancy`], [`physics`]) is plain Rust driven by
//! explicit time and step arguments. [`water::WaterPlugin`] and
//! [`physics::rapier::FloatingPhysicsPlugin`] wire it into a Bevy app.

pub mod buoyancy;
pub mod config;
pub mod constants;
pub mod physics;
pub mod sets;
pub mod spawning;
pub mod water;

pub use constants::*;

pub use buoyancy::{BuoyancyBody, BuoyancyConfig, FloatState, FloatStep, WaterSurface};
pub use config::{load_water_config, save_water_config, SpawnSettings, WaterConfig};
pub use physics::{KinematicBody, PhysicsBody};
pub use water::WaterSimulation;
