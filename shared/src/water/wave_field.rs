//! Superposition of decaying circular ripples.
//!
//! Every [`WaveSource`] emits a sinusoid that travels outward from its origin.
//! A point only feels a source once the leading edge has reached it
//! (`elapsed * speed >= distance`), so a fresh splash grows as an expanding ring
//! instead of appearing everywhere at once. Amplitude decays exponentially with
//! `(1 - damping_factor)^elapsed` and the source is dropped after its lifetime.
//!
//! ```rust
//! use bevy::math::Vec2;
//! use ripple_shared::water::{WaveField, WaveParams};
//!
//! let mut field = WaveField::new(0.5, 64);
//! field.add_source(Vec2::ZERO, WaveParams::default(), 0.0);
//! let h = field.displacement_at(Vec2::new(0.25, 0.0), 1.0);
//! assert!(h.abs() <= 0.1);
//! ```

use bevy::math::Vec2;
use bevy_log::{debug, warn};

use super::config::{WaveParams, WaveSettings};
use crate::constants::NEGLIGIBLE_AMPLITUDE;

/// Decay multiplier after `elapsed` seconds.
///
/// The base is clamped to `[0, 1]`: a zero or negative damping factor never
/// decays, a factor of one or more drops to zero as soon as `elapsed > 0`.
#[inline]
pub fn decay_factor(damping_factor: f32, elapsed: f32) -> f32 {
    let base = (1.0 - damping_factor).clamp(0.0, 1.0);
    base.powf(elapsed.max(0.0))
}

/// A single point emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSource {
    /// Emitter position in the surface's local XZ plane
    pub origin: Vec2,
    pub start_time: f32,
    pub initial_amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
    pub lifetime: f32,
}

impl WaveSource {
    pub fn new(origin: Vec2, params: WaveParams, start_time: f32) -> Self {
        Self {
            origin,
            start_time,
            initial_amplitude: params.amplitude,
            frequency: params.frequency,
            speed: params.speed,
            lifetime: params.lifetime,
        }
    }

    #[inline]
    pub fn elapsed(&self, time: f32) -> f32 {
        time - self.start_time
    }

    /// Decayed amplitude, never negative.
    #[inline]
    pub fn amplitude_at(&self, elapsed: f32, damping_factor: f32) -> f32 {
        (self.initial_amplitude * decay_factor(damping_factor, elapsed)).max(0.0)
    }

    /// Radius reached by the leading edge.
    #[inline]
    pub fn wavefront_radius(&self, elapsed: f32) -> f32 {
        elapsed * self.speed
    }

    /// Past its lifetime or decayed below the negligible threshold.
    pub fn is_spent(&self, time: f32, damping_factor: f32) -> bool {
        let elapsed = self.elapsed(time);
        elapsed > self.lifetime || self.amplitude_at(elapsed, damping_factor) < NEGLIGIBLE_AMPLITUDE
    }

    /// Height contributed at `point`.
    pub fn contribution(&self, point: Vec2, time: f32, damping_factor: f32) -> f32 {
        let elapsed = self.elapsed(time);
        if !(0.0..=self.lifetime).contains(&elapsed) {
            return 0.0;
        }

        let amplitude = self.amplitude_at(elapsed, damping_factor);
        if amplitude < NEGLIGIBLE_AMPLITUDE {
            return 0.0;
        }

        let distance = point.distance(self.origin);
        if self.wavefront_radius(elapsed) < distance {
            return 0.0;
        }

        let k = std::f32::consts::TAU * self.frequency;
        let omega = k * self.speed;
        amplitude * (k * distance - omega * elapsed).sin()
    }
}

/// The set of live wave sources.
#[derive(Debug, Clone)]
pub struct WaveField {
    sources: Vec<WaveSource>,
    damping_factor: f32,
    max_sources: usize,
}

impl Default for WaveField {
    fn default() -> Self {
        Self::from_settings(&WaveSettings::default())
    }
}

impl WaveField {
    pub fn new(damping_factor: f32, max_sources: usize) -> Self {
        Self {
            sources: Vec::new(),
            damping_factor,
            max_sources: max_sources.max(1),
        }
    }

    pub fn from_settings(settings: &WaveSettings) -> Self {
        Self::new(settings.damping_factor, settings.max_sources)
    }

    /// Starts a new ripple at `origin` (local XZ) at time `now`.
    ///
    /// Returns `false` without touching the field when the amplitude is
    /// negligible or the ripple shape is degenerate. When the field is full the
    /// oldest source makes room.
    pub fn add_source(&mut self, origin: Vec2, params: WaveParams, now: f32) -> bool {
        if params.amplitude.is_nan() || params.amplitude <= NEGLIGIBLE_AMPLITUDE {
            debug!(
                "Ignoring wave with negligible amplitude {:.4} at {:?}",
                params.amplitude, origin
            );
            return false;
        }
        if !params.has_valid_shape() || !origin.is_finite() || !now.is_finite() {
            warn!("Rejecting degenerate wave {:?} at {:?}", params, origin);
            return false;
        }

        if self.sources.len() >= self.max_sources {
            if let Some(oldest) = self.oldest_index() {
                let evicted = self.sources.remove(oldest);
                debug!("Wave field full, evicting source started at {:.2}", evicted.start_time);
            }
        }

        self.sources.push(WaveSource::new(origin, params, now));
        debug!(
            "Added wave at {:?} (amplitude {:.3}), {} active",
            origin,
            params.amplitude,
            self.sources.len()
        );
        true
    }

    /// Index of the source with the earliest start time, first on ties.
    fn oldest_index(&self) -> Option<usize> {
        self.sources
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.start_time.total_cmp(&b.start_time))
            .map(|(index, _)| index)
    }

    /// Summed displacement of all sources at `point` (local XZ).
    pub fn displacement_at(&self, point: Vec2, time: f32) -> f32 {
        self.sources
            .iter()
            .map(|source| source.contribution(point, time, self.damping_factor))
            .sum()
    }

    /// Drops expired and negligible sources. Returns how many were removed.
    pub fn tick(&mut self, time: f32) -> usize {
        let before = self.sources.len();
        let damping_factor = self.damping_factor;
        self.sources
            .retain(|source| !source.is_spent(time, damping_factor));

        let purged = before - self.sources.len();
        if purged > 0 {
            debug!("Purged {} spent waves, {} active", purged, self.sources.len());
        }
        purged
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> &[WaveSource] {
        &self.sources
    }

    pub fn damping_factor(&self) -> f32 {
        self.damping_factor
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }
}
