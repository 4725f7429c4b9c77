use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::constants::{
    CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_RESET_DISTANCE, CAMERA_RESET_PITCH,
    CAMERA_RESET_YAW, CAMERA_ROTATE_SPEED, CAMERA_ZOOM_SPEED,
};
use crate::input::{keyboard::is_action_just_pressed, GameAction};
use crate::KeyMap;

/// Camera circling a focus point. Angles are in degrees.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitCamera {
    pub fn looking_at(focus: Vec3) -> Self {
        Self {
            focus,
            yaw: CAMERA_RESET_YAW,
            pitch: CAMERA_RESET_PITCH,
            distance: CAMERA_RESET_DISTANCE,
        }
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * CAMERA_ROTATE_SPEED;
        self.pitch = (self.pitch - delta.y * CAMERA_ROTATE_SPEED).clamp(-89.0, 89.0);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * CAMERA_ZOOM_SPEED)
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn reset(&mut self) {
        *self = Self::looking_at(self.focus);
    }

    pub fn transform(&self) -> Transform {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        );
        Transform::from_translation(self.focus + rotation * Vec3::Z * self.distance)
            .looking_at(self.focus, Vec3::Y)
    }
}

pub fn spawn_camera(mut commands: Commands, water: Res<ripple_shared::WaterSimulation>) {
    let orbit = OrbitCamera::looking_at(water.placement());
    commands.spawn((Camera3d::default(), orbit.transform(), orbit));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Right-drag rotates, scroll zooms, the reset binding restores the default view.
pub fn control_orbit_camera(
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
    mut mouse_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
) {
    let Ok((mut cam, mut transform)) = query.single_mut() else {
        return;
    };

    if buttons.pressed(MouseButton::Right) {
        for ev in mouse_evr.read() {
            cam.rotate(ev.delta);
        }
    } else {
        mouse_evr.clear();
    }

    for ev in scroll_evr.read() {
        cam.zoom(ev.y);
    }

    if is_action_just_pressed(GameAction::ResetCamera, &keys, &key_map) {
        cam.reset();
    }

    *transform = cam.transform();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_and_distance_are_clamped() {
        let mut cam = OrbitCamera::looking_at(Vec3::ZERO);
        cam.rotate(Vec2::new(0.0, -10_000.0));
        assert_eq!(cam.pitch, 89.0);
        cam.zoom(1_000.0);
        assert_eq!(cam.distance, CAMERA_MIN_DISTANCE);
        cam.zoom(-1_000.0);
        assert_eq!(cam.distance, CAMERA_MAX_DISTANCE);
    }

    #[test]
    fn test_transform_keeps_distance_and_faces_focus() {
        let focus = Vec3::new(2.0, 1.0, -3.0);
        let cam = OrbitCamera::looking_at(focus);
        let transform = cam.transform();

        assert!((transform.translation.distance(focus) - cam.distance).abs() < 1e-4);
        let to_focus = (focus - transform.translation).normalize();
        assert!(transform.forward().dot(to_focus) > 0.999);
    }

    #[test]
    fn test_reset_keeps_focus() {
        let mut cam = OrbitCamera::looking_at(Vec3::X);
        cam.rotate(Vec2::new(40.0, 12.0));
        cam.zoom(2.0);
        cam.reset();
        assert_eq!(cam, OrbitCamera::looking_at(Vec3::X));
    }
}
