use serde::{Deserialize, Serialize};

/// Tuning for floating bodies. Every field falls back to its default when
/// missing from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuoyancyConfig {
    /// Downward acceleration in m/s²
    pub gravity: f32,
    /// Fraction of the diameter that sits below the surface at rest, in [0, 1]
    pub resting_submergence: f32,
    /// Restoring force per metre of displacement from the rest height
    pub spring_strength: f32,
    /// Linear drag coefficient while floating
    pub linear_drag: f32,
    /// Below this vertical speed a body near rest is considered settled
    pub settling_velocity_threshold: f32,
    /// Below this distance from rest height a slow body is snapped in place
    pub settling_position_threshold: f32,
    /// Minimum impact speed that spawns a ripple
    pub impact_velocity_threshold: f32,
}

impl Default for BuoyancyConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            resting_submergence: 0.5,
            spring_strength: 40.0,
            linear_drag: 1.5,
            settling_velocity_threshold: 0.05,
            settling_position_threshold: 0.02,
            impact_velocity_threshold: 0.1,
        }
    }
}

impl BuoyancyConfig {
    /// Copy with `resting_submergence` clamped into [0, 1].
    pub fn normalized(mut self) -> Self {
        self.resting_submergence = if self.resting_submergence.is_nan() {
            0.5
        } else {
            self.resting_submergence.clamp(0.0, 1.0)
        };
        self
    }
}
