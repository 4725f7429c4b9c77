//! Floating bodies.
//!
//! A [`BuoyancyBody`] falls under gravity until its bottom reaches the base
//! water level, spawns a ripple scaled by its impact speed, then floats on a
//! damped spring that tracks the interpolated surface height. The body never
//! leaves the floating state once it has entered it.

mod body;
mod config;

pub use body::{splash_amplitude, BuoyancyBody, FloatState, FloatStep};
pub use config::BuoyancyConfig;

use bevy::math::Vec2;

use crate::water::WaveParams;

/// What a floating body needs from the water it sits on. Positions are world
/// space on the XZ plane.
pub trait WaterSurface {
    /// Undeformed water level, used for impact detection.
    fn base_height(&self) -> f32;

    /// Precise surface height under `point`, `None` when off the surface.
    fn interpolated_height(&self, point: Vec2) -> Option<f32>;

    /// Parameters used for ripples spawned by impacts.
    fn wave_defaults(&self) -> WaveParams;

    /// Starts a ripple at `point`. Returns `false` when it was rejected.
    fn add_wave(&mut self, point: Vec2, params: WaveParams, now: f32) -> bool;
}
