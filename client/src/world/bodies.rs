use bevy::prelude::*;
use rand::thread_rng;
use ripple_shared::physics::rapier::FloatingBodyBundle;
use ripple_shared::spawning::drop_position;
use ripple_shared::{BuoyancyBody, WaterConfig, WaterSimulation};

use crate::input::{keyboard::is_action_just_pressed, GameAction};
use crate::KeyMap;

/// Shared render assets for every dropped sphere.
#[derive(Resource)]
pub struct BodyAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn setup_body_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<WaterConfig>,
) {
    commands.insert_resource(BodyAssets {
        mesh: meshes.add(Sphere::new(config.spawn.body_radius.max(0.01)).mesh().uv(32, 18)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.45, 0.2),
            perceptual_roughness: 0.6,
            ..default()
        }),
    });
}

#[allow(clippy::too_many_arguments)]
pub fn handle_body_actions(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    config: Res<WaterConfig>,
    assets: Option<Res<BodyAssets>>,
    mut water: ResMut<WaterSimulation>,
    bodies: Query<Entity, With<BuoyancyBody>>,
    mut exit: EventWriter<AppExit>,
) {
    if is_action_just_pressed(GameAction::SpawnBody, &keys, &key_map) {
        if let Some(assets) = assets {
            let center = water.placement().with_y(water.base_height());
            let position = drop_position(&mut thread_rng(), center, &config.spawn);
            commands.spawn((
                FloatingBodyBundle::new(
                    config.spawn.body_radius,
                    config.spawn.body_mass,
                    config.buoyancy,
                ),
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                Transform::from_translation(position),
            ));
            info!("Dropped a body at {:.2?}", position);
        }
    }

    if is_action_just_pressed(GameAction::ClearBodies, &keys, &key_map) {
        let mut count = 0;
        for entity in bodies.iter() {
            commands.entity(entity).despawn();
            count += 1;
        }
        info!("Removed {} bodies", count);
    }

    if is_action_just_pressed(GameAction::ClearWaves, &keys, &key_map) {
        let active = water.waves().active_count();
        water.waves_mut().clear();
        info!("Cleared {} waves", active);
    }

    if is_action_just_pressed(GameAction::Escape, &keys, &key_map) {
        exit.write(AppExit::Success);
    }
}
