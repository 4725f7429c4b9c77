//! Tunable wave parameters shared by the wave field and everything that splashes into it.

use serde::{Deserialize, Serialize};

/// Maximum number of live wave sources before the oldest is evicted.
pub const DEFAULT_MAX_SOURCES: usize = 64;

/// Parameters of one circular ripple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    /// Starting amplitude in world units
    pub amplitude: f32,
    /// Spatial frequency in cycles per world unit
    pub frequency: f32,
    /// Propagation speed of the wavefront in world units per second
    pub speed: f32,
    /// Seconds after which the source is discarded
    pub lifetime: f32,
}

impl WaveParams {
    pub const fn new(amplitude: f32, frequency: f32, speed: f32, lifetime: f32) -> Self {
        Self {
            amplitude,
            frequency,
            speed,
            lifetime,
        }
    }

    /// Same ripple shape with a different starting amplitude.
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// True when frequency, speed and lifetime are finite and strictly positive.
    /// Amplitude is checked separately against the negligible threshold.
    pub fn has_valid_shape(&self) -> bool {
        [self.frequency, self.speed, self.lifetime]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

impl Default for WaveParams {
    fn default() -> Self {
        Self::new(0.1, 1.0, 1.0, 5.0)
    }
}

/// Wave field configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    /// Ripple used for impacts and other external stimuli
    pub defaults: WaveParams,
    /// Fraction of amplitude lost per second (0 = no decay, 1 = instant)
    pub damping_factor: f32,
    /// Cap on simultaneously active sources
    pub max_sources: usize,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            defaults: WaveParams::default(),
            damping_factor: 0.5,
            max_sources: DEFAULT_MAX_SOURCES,
        }
    }
}
