use bevy::math::{Vec2, Vec3};
use bevy_ecs::component::Component;
use bevy_log::debug;

use super::{BuoyancyConfig, WaterSurface};
use crate::constants::{
    DEFAULT_BODY_RADIUS, HORIZONTAL_DRAG_FACTOR, IMPACT_REBOUND, MAX_SPLASH_SCALE,
    MIN_BODY_RADIUS, MIN_SPLASH_SCALE, REFERENCE_IMPACT_SPEED,
};
use crate::physics::PhysicsBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatState {
    #[default]
    Falling,
    Floating,
}

/// Outcome of a single [`BuoyancyBody::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatStep {
    /// Still above the water, gravity applied to velocity
    Airborne,
    /// Reached the water this step and switched to floating
    Impact { splashed: bool },
    /// Spring and drag forces applied
    Bobbing,
    /// Close enough to rest height that the body was snapped onto it
    Settled,
    /// Floating but off the surface, only gravity applied
    NoSurface,
}

/// Ripple amplitude for an impact at `impact_speed`.
pub fn splash_amplitude(default_amplitude: f32, impact_speed: f32) -> f32 {
    default_amplitude * (impact_speed / REFERENCE_IMPACT_SPEED).clamp(MIN_SPLASH_SCALE, MAX_SPLASH_SCALE)
}

#[derive(Component, Debug, Clone)]
pub struct BuoyancyBody {
    state: FloatState,
    radius: f32,
    config: BuoyancyConfig,
}

impl Default for BuoyancyBody {
    fn default() -> Self {
        Self::new(DEFAULT_BODY_RADIUS, BuoyancyConfig::default())
    }
}

impl BuoyancyBody {
    /// New falling body. A radius at or below [`MIN_BODY_RADIUS`] falls back
    /// to [`DEFAULT_BODY_RADIUS`].
    pub fn new(radius: f32, config: BuoyancyConfig) -> Self {
        let radius = if radius.is_finite() && radius > MIN_BODY_RADIUS {
            radius
        } else {
            DEFAULT_BODY_RADIUS
        };
        Self {
            state: FloatState::Falling,
            radius,
            config: config.normalized(),
        }
    }

    /// Body that starts already resting on the water.
    pub fn floating(radius: f32, config: BuoyancyConfig) -> Self {
        Self {
            state: FloatState::Floating,
            ..Self::new(radius, config)
        }
    }

    #[inline]
    pub fn state(&self) -> FloatState {
        self.state
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn config(&self) -> &BuoyancyConfig {
        &self.config
    }

    /// Offset of the body centre above the water surface when at rest.
    pub fn rest_offset(&self) -> f32 {
        self.radius * (1.0 - 2.0 * self.config.resting_submergence)
    }

    /// Advances the body by one fixed step of `delta` seconds at time `now`.
    ///
    /// The caller integrates the body afterwards; this only adjusts velocity,
    /// snaps position and accumulates forces.
    pub fn step(
        &mut self,
        body: &mut impl PhysicsBody,
        water: &mut impl WaterSurface,
        now: f32,
        delta: f32,
    ) -> FloatStep {
        match self.state {
            FloatState::Falling => self.fall(body, water, now, delta),
            FloatState::Floating => self.float(body, &*water),
        }
    }

    fn fall(
        &mut self,
        body: &mut impl PhysicsBody,
        water: &mut impl WaterSurface,
        now: f32,
        delta: f32,
    ) -> FloatStep {
        let mut velocity = body.velocity();
        velocity.y -= self.config.gravity * delta;
        body.set_velocity(velocity);

        let position = body.position();
        let base = water.base_height();
        if position.y - self.radius > base {
            return FloatStep::Airborne;
        }

        let impact_speed = velocity.y.abs();
        let splashed = if impact_speed >= self.config.impact_velocity_threshold {
            let defaults = water.wave_defaults();
            let params = defaults.with_amplitude(splash_amplitude(defaults.amplitude, impact_speed));
            water.add_wave(Vec2::new(position.x, position.z), params, now)
        } else {
            false
        };

        body.set_velocity(velocity.with_y(velocity.y * IMPACT_REBOUND));
        body.set_position(position.with_y(base + self.rest_offset()));
        self.state = FloatState::Floating;

        debug!(
            "Body hit the water at ({:.2}, {:.2}) with speed {:.2}, splashed: {}",
            position.x, position.z, impact_speed, splashed
        );
        FloatStep::Impact { splashed }
    }

    fn float(&mut self, body: &mut impl PhysicsBody, water: &impl WaterSurface) -> FloatStep {
        let position = body.position();
        let velocity = body.velocity();
        let gravity = Vec3::new(0.0, -self.config.gravity * body.mass(), 0.0);

        let Some(height) = water.interpolated_height(Vec2::new(position.x, position.z)) else {
            body.apply_force(gravity);
            return FloatStep::NoSurface;
        };

        let target = height + self.rest_offset();
        let displacement = target - position.y;

        if displacement.abs() < self.config.settling_position_threshold
            && velocity.y.abs() < self.config.settling_velocity_threshold
        {
            body.set_position(position.with_y(target));
            body.set_velocity(velocity.with_y(0.0));
            return FloatStep::Settled;
        }

        let drag = -velocity
            * self.config.linear_drag
            * Vec3::new(HORIZONTAL_DRAG_FACTOR, 1.0, HORIZONTAL_DRAG_FACTOR);
        let spring = Vec3::new(0.0, displacement * self.config.spring_strength, 0.0);
        body.apply_force(gravity + spring + drag);
        FloatStep::Bobbing
    }
}
