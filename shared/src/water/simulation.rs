use bevy::math::{Vec2, Vec3};
use bevy_ecs::resource::Resource;
use bevy_log::{debug, info};

use super::collider::SurfaceCollider;
use super::config::{WaveParams, WaveSettings};
use super::plane::PlaneMesh;
use super::query::HeightQuery;
use super::surface::SurfaceMesh;
use super::wave_field::WaveField;
use crate::buoyancy::WaterSurface;
use crate::config::WaterConfig;

/// Owns one body of water: its ripples, the deformed mesh and the collider
/// used for height queries.
///
/// Each [`tick`](Self::tick) runs in a fixed order: spent ripples are purged,
/// the mesh is deformed, then the collider is rebuilt from the new mesh. Height
/// queries between ticks therefore always see a consistent surface.
#[derive(Resource, Debug, Clone)]
pub struct WaterSimulation {
    waves: WaveField,
    surface: SurfaceMesh,
    collider: SurfaceCollider,
    defaults: WaveParams,
    /// World position of the surface's local origin
    placement: Vec3,
}

impl WaterSimulation {
    pub fn new(settings: &WaveSettings, surface: SurfaceMesh, placement: Vec3) -> Self {
        let mut collider = SurfaceCollider::new();
        collider.refresh(&surface, placement);

        Self {
            waves: WaveField::from_settings(settings),
            surface,
            collider,
            defaults: settings.defaults,
            placement,
        }
    }

    /// Builds a flat plane from `config` and places it at `config.placement`.
    pub fn from_config(config: &WaterConfig) -> Self {
        let plane = PlaneMesh::generate(&config.plane);
        info!(
            "Water plane with {} vertices and {} triangles at {:?}",
            plane.vertex_count(),
            plane.triangle_count(),
            config.placement
        );
        Self::new(&config.waves, plane.to_surface(), config.placement)
    }

    /// Advances the surface to `time`. Returns `false` when the surface is
    /// disabled and nothing changed.
    pub fn tick(&mut self, time: f32) -> bool {
        self.waves.tick(time);
        if !self.surface.tick(&self.waves, time) {
            return false;
        }
        self.collider.refresh(&self.surface, self.placement);
        true
    }

    /// Starts a ripple at a world-space XZ position.
    pub fn spawn_wave(&mut self, point: Vec2, params: WaveParams, now: f32) -> bool {
        if !self.surface.is_enabled() {
            debug!("Ignoring wave at {:?}, water surface is disabled", point);
            return false;
        }
        self.waves.add_source(point - self.placement_xz(), params, now)
    }

    pub fn query(&self) -> HeightQuery<'_> {
        HeightQuery::new(&self.surface, &self.collider, self.placement)
    }

    /// Height from the wave equation itself, without going through the mesh.
    pub fn analytic_height(&self, point: Vec2, time: f32) -> f32 {
        self.base_height() + self.waves.displacement_at(point - self.placement_xz(), time)
    }

    pub fn base_height(&self) -> f32 {
        self.placement.y + self.surface.base_level()
    }

    #[inline]
    fn placement_xz(&self) -> Vec2 {
        Vec2::new(self.placement.x, self.placement.z)
    }

    pub fn waves(&self) -> &WaveField {
        &self.waves
    }

    pub fn waves_mut(&mut self) -> &mut WaveField {
        &mut self.waves
    }

    pub fn surface(&self) -> &SurfaceMesh {
        &self.surface
    }

    pub fn collider(&self) -> &SurfaceCollider {
        &self.collider
    }

    pub fn defaults(&self) -> WaveParams {
        self.defaults
    }

    pub fn placement(&self) -> Vec3 {
        self.placement
    }
}

impl WaterSurface for WaterSimulation {
    fn base_height(&self) -> f32 {
        WaterSimulation::base_height(self)
    }

    fn interpolated_height(&self, point: Vec2) -> Option<f32> {
        self.query().interpolated_height(point)
    }

    fn wave_defaults(&self) -> WaveParams {
        self.defaults
    }

    fn add_wave(&mut self, point: Vec2, params: WaveParams, now: f32) -> bool {
        self.spawn_wave(point, params, now)
    }
}
