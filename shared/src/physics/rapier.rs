//! Rapier integration for floating bodies.
//!
//! Rapier integrates the bodies and resolves contacts between them; the water
//! is not a Rapier collider. Gravity and buoyancy come from [`BuoyancyBody`],
//! so floating bodies run with a zero gravity scale and receive their forces
//! through [`ExternalForce`], which is overwritten every fixed step.

use bevy::prelude::*;
use bevy_log::warn;
use bevy_rapier3d::prelude::*;

use super::PhysicsBody;
use crate::buoyancy::{BuoyancyBody, BuoyancyConfig};
use crate::constants::FIXED_DELTA;
use crate::sets::WaterFixedSet;
use crate::water::WaterSimulation;

/// Bundle for a sphere that falls onto and floats on the water.
#[derive(Bundle)]
pub struct FloatingBodyBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub mass: ColliderMassProperties,
    pub velocity: Velocity,
    pub gravity_scale: GravityScale,
    pub force: ExternalForce,
    pub ccd: Ccd,
    pub float: BuoyancyBody,
}

impl FloatingBodyBundle {
    pub fn new(radius: f32, mass: f32, config: BuoyancyConfig) -> Self {
        let float = BuoyancyBody::new(radius, config);
        Self {
            body: RigidBody::Dynamic,
            collider: Collider::ball(float.radius()),
            mass: ColliderMassProperties::Mass(if mass > 0.0 { mass } else { 1.0 }),
            velocity: Velocity::zero(),
            // Gravity is applied by the buoyancy step
            gravity_scale: GravityScale(0.0),
            force: ExternalForce::default(),
            ccd: Ccd::enabled(),
            float,
        }
    }
}

/// [`PhysicsBody`] view over the Rapier components of one entity.
pub struct RapierBody<'w> {
    transform: Mut<'w, Transform>,
    velocity: Mut<'w, Velocity>,
    force: Mut<'w, ExternalForce>,
    mass: f32,
}

impl<'w> RapierBody<'w> {
    pub fn new(
        transform: Mut<'w, Transform>,
        velocity: Mut<'w, Velocity>,
        force: Mut<'w, ExternalForce>,
        mass: f32,
    ) -> Self {
        Self {
            transform,
            velocity,
            force,
            mass,
        }
    }
}

impl PhysicsBody for RapierBody<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity.linvel
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity.linvel = velocity;
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn apply_force(&mut self, force: Vec3) {
        self.force.force += force;
    }
}

/// Mass declared on the collider, one when it is given as a density.
pub fn declared_mass(properties: &ColliderMassProperties) -> f32 {
    match properties {
        ColliderMassProperties::Mass(mass) if *mass > 0.0 => *mass,
        ColliderMassProperties::MassProperties(props) if props.mass > 0.0 => props.mass,
        _ => 1.0,
    }
}

/// Adds Rapier on the fixed schedule and steps every [`BuoyancyBody`] against
/// the [`WaterSimulation`] in [`WaterFixedSet::Buoyancy`].
///
/// Buoyancy runs before Rapier syncs its bodies, and Rapier advances by
/// exactly one fixed tick per step.
pub struct FloatingPhysicsPlugin;

impl Plugin for FloatingPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            .insert_resource(TimestepMode::Fixed {
                dt: FIXED_DELTA,
                substeps: 1,
            })
            .configure_sets(
                FixedUpdate,
                WaterFixedSet::Buoyancy.before(PhysicsSet::SyncBackend),
            )
            .add_systems(Startup, configure_rapier_context)
            .add_systems(
                FixedUpdate,
                step_floating_bodies.in_set(WaterFixedSet::Buoyancy),
            );
    }
}

fn configure_rapier_context(mut query: Query<&mut RapierConfiguration>) {
    for mut config in query.iter_mut() {
        config.gravity = Vec3::ZERO;
        config.physics_pipeline_active = true;
    }
}

type FloatingBodyItem = (
    &'static mut BuoyancyBody,
    &'static mut Transform,
    &'static mut Velocity,
    &'static mut ExternalForce,
    &'static ColliderMassProperties,
);

fn step_floating_bodies(
    water: Option<ResMut<WaterSimulation>>,
    time: Res<Time<Fixed>>,
    mut warned: Local<bool>,
    mut bodies: Query<FloatingBodyItem>,
) {
    let Some(mut water) = water else {
        if !*warned {
            warn!("No water simulation present, floating bodies are not stepped");
            *warned = true;
        }
        return;
    };

    let now = time.elapsed_secs();
    let delta = time.delta_secs();
    for (mut float, transform, velocity, mut force, mass) in bodies.iter_mut() {
        force.force = Vec3::ZERO;
        let mut body = RapierBody::new(transform, velocity, force, declared_mass(mass));
        float.step(&mut body, &mut *water, now, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buoyancy::FloatState;
    use crate::water::WaterPlugin;
    use bevy::asset::AssetPlugin;
    use bevy::scene::ScenePlugin;
    use bevy::time::TimeUpdateStrategy;
    use bevy::transform::TransformPlugin;
    use std::time::Duration;

    fn floating_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            TransformPlugin,
            AssetPlugin::default(),
            ScenePlugin,
            WaterPlugin::default(),
            FloatingPhysicsPlugin,
        ))
        .init_asset::<Mesh>()
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            FIXED_DELTA,
        )));
        app.update();
        app
    }

    fn fixed_elapsed(app: &App) -> f32 {
        app.world().resource::<Time<Fixed>>().elapsed_secs()
    }

    #[test]
    fn test_floating_body_bundle_creation() {
        let bundle = FloatingBodyBundle::new(0.5, 2.0, BuoyancyConfig::default());
        assert!(matches!(bundle.body, RigidBody::Dynamic));
        assert_eq!(bundle.gravity_scale.0, 0.0);
        assert_eq!(declared_mass(&bundle.mass), 2.0);
        assert_eq!(bundle.float.state(), FloatState::Falling);
    }

    #[test]
    fn test_declared_mass_fallback() {
        assert_eq!(declared_mass(&ColliderMassProperties::Density(3.0)), 1.0);
        assert_eq!(declared_mass(&ColliderMassProperties::Mass(-1.0)), 1.0);
    }

    #[test]
    fn test_rapier_body_adapter() {
        let mut world = World::new();
        world.spawn((
            Transform::from_xyz(1.0, 2.0, 3.0),
            Velocity::linear(Vec3::new(0.0, -1.0, 0.0)),
            ExternalForce::default(),
        ));

        let mut query = world.query::<(&mut Transform, &mut Velocity, &mut ExternalForce)>();
        let (transform, velocity, force) = query.single_mut(&mut world).unwrap();
        let mut body = RapierBody::new(transform, velocity, force, 4.0);

        assert_eq!(body.position(), Vec3::new(1.0, 2.0, 3.0));
        body.set_position(Vec3::new(1.0, 0.0, 3.0));
        body.set_velocity(Vec3::new(0.5, 0.0, 0.0));
        body.apply_force(Vec3::Y);
        body.apply_force(Vec3::X);
        assert_eq!(body.mass(), 4.0);

        let (transform, velocity, force) = query.single(&world).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 0.0, 3.0));
        assert_eq!(velocity.linvel, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(force.force, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_rapier_falls_by_one_fixed_tick_per_step() {
        let mut app = floating_app();
        let config = BuoyancyConfig::default();
        let body = app
            .world_mut()
            .spawn((
                FloatingBodyBundle::new(0.5, 1.0, config),
                Transform::from_xyz(0.0, 3.0, 0.0),
            ))
            .id();
        let start = fixed_elapsed(&app);

        for _ in 0..10 {
            app.update();
        }

        let steps = ((fixed_elapsed(&app) - start) / FIXED_DELTA).round();
        assert!(steps > 0.0);
        let expected_velocity = -config.gravity * FIXED_DELTA * steps;
        let expected_drop = config.gravity * FIXED_DELTA * FIXED_DELTA * steps * (steps + 1.0) / 2.0;

        let velocity = app.world().get::<Velocity>(body).unwrap().linvel;
        let y = app.world().get::<Transform>(body).unwrap().translation.y;
        assert!((velocity.y - expected_velocity).abs() < 1e-3);
        assert!((3.0 - y - expected_drop).abs() < 1e-2);
        assert_eq!(
            app.world().get::<BuoyancyBody>(body).unwrap().state(),
            FloatState::Falling
        );
    }

    #[test]
    fn test_rapier_body_lands_and_floats() {
        let mut app = floating_app();
        let body = app
            .world_mut()
            .spawn((
                FloatingBodyBundle::new(0.5, 1.0, BuoyancyConfig::default()),
                Transform::from_xyz(0.0, 3.0, 0.0),
            ))
            .id();

        for _ in 0..300 {
            app.update();
        }

        assert_eq!(
            app.world().get::<BuoyancyBody>(body).unwrap().state(),
            FloatState::Floating
        );
        let y = app.world().get::<Transform>(body).unwrap().translation.y;
        assert!(y > -1.0 && y < 0.5, "body should rest near the surface, got y = {y}");
    }
}
