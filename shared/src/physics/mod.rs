pub mod rapier;

use bevy::math::Vec3;
use bevy_ecs::component::Component;

/// What the buoyancy code needs from a rigid body. The body itself lives in
/// whatever physics backend hosts it.
pub trait PhysicsBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn mass(&self) -> f32;
    /// Continuous force for the current step, accumulated until integration.
    fn apply_force(&mut self, force: Vec3);
}

/// Minimal point-mass body integrated with semi-implicit Euler.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct KinematicBody {
    pub position: Vec3,
    pub velocity: Vec3,
    mass: f32,
    force: Vec3,
}

impl KinematicBody {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mass: if mass.is_finite() && mass > 0.0 { mass } else { 1.0 },
            force: Vec3::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Force accumulated since the last integration.
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    pub fn integrate(&mut self, delta: f32) {
        self.velocity += self.force / self.mass * delta;
        self.position += self.velocity * delta;
        self.force = Vec3::ZERO;
    }
}

impl PhysicsBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }
}
