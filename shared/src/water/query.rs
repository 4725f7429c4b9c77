//! Water height lookups for external bodies.
//!
//! Two strategies over the same surface:
//! - [`HeightQuery::nearest_vertex_height`]: O(n) scan for the closest deformed
//!   vertex. Cheap to set up, coarse, and it scales badly when many bodies
//!   query a dense mesh every step.
//! - [`HeightQuery::interpolated_height`]: downward ray through the collider,
//!   blending the hit triangle's corner heights by barycentric weight.
//!
//! All coordinates are world space; the surface's placement offset is applied
//! on the way in and out.

use bevy::math::{Vec2, Vec3};
use bevy_log::debug;

use super::collider::{SurfaceCollider, SurfaceRay};
use super::surface::SurfaceMesh;
use crate::constants::RAY_CLEARANCE;

/// Read-only view over a surface and its collider.
#[derive(Clone, Copy)]
pub struct HeightQuery<'a> {
    surface: &'a SurfaceMesh,
    collider: &'a SurfaceCollider,
    offset: Vec3,
}

impl<'a> HeightQuery<'a> {
    pub fn new(surface: &'a SurfaceMesh, collider: &'a SurfaceCollider, offset: Vec3) -> Self {
        Self {
            surface,
            collider,
            offset,
        }
    }

    /// Height of the deformed vertex closest to `point` on the XZ plane.
    pub fn nearest_vertex_height(&self, point: Vec2) -> Option<f32> {
        if !self.surface.is_enabled() {
            return None;
        }

        let local = point - Vec2::new(self.offset.x, self.offset.z);
        let mut closest: Option<(f32, f32)> = None;
        for vertex in self.surface.working_vertices() {
            let sq_dist = Vec2::new(vertex.x, vertex.z).distance_squared(local);
            if closest.map_or(true, |(best, _)| sq_dist < best) {
                closest = Some((sq_dist, vertex.y));
            }
        }

        closest.map(|(_, height)| height + self.offset.y)
    }

    /// Exact surface height under `point`, or `None` when the point is off the
    /// surface or the collider has not been refreshed for the current tick.
    pub fn interpolated_height(&self, point: Vec2) -> Option<f32> {
        if !self.collider.is_current(self.surface) {
            debug!("Water collider is stale, skipping precise height query");
            return None;
        }

        let bounds = self.collider.bounds()?;
        let top = bounds.max.y.max(self.offset.y) + RAY_CLEARANCE;
        let bottom = bounds.min.y.min(self.offset.y) - RAY_CLEARANCE;

        let hit = self
            .collider
            .cast_ray(SurfaceRay::downward(point, top), top - bottom)?;
        let [a, b, c] = self.surface.triangle(hit.triangle)?;

        let local = a.y * hit.barycentric.x + b.y * hit.barycentric.y + c.y * hit.barycentric.z;
        Some(local + self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::config::WaveParams;
    use crate::water::plane::{PlaneMesh, PlaneSettings};
    use crate::water::wave_field::WaveField;

    fn plane() -> SurfaceMesh {
        PlaneMesh::generate(&PlaneSettings {
            x_segments: 20,
            z_segments: 20,
            width: 10.0,
            length: 10.0,
        })
        .to_surface()
    }

    fn ripples() -> WaveField {
        let mut waves = WaveField::new(0.0, 4);
        waves.add_source(Vec2::new(-1.0, 0.5), WaveParams::new(0.3, 0.4, 2.0, 10.0), 0.0);
        waves
    }

    #[test]
    fn test_interpolated_height_on_flat_surface() {
        let surface = plane();
        let mut collider = SurfaceCollider::new();
        let offset = Vec3::new(3.0, 1.5, -2.0);
        collider.refresh(&surface, offset);

        let query = HeightQuery::new(&surface, &collider, offset);
        let height = query.interpolated_height(Vec2::new(4.2, -1.1)).unwrap();
        assert!((height - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_interpolated_height_at_vertex_matches_vertex() {
        let mut surface = plane();
        surface.tick(&ripples(), 2.0);
        let mut collider = SurfaceCollider::new();
        collider.refresh(&surface, Vec3::ZERO);
        let query = HeightQuery::new(&surface, &collider, Vec3::ZERO);

        let vertex = surface.working_vertices()[220];
        let height = query
            .interpolated_height(Vec2::new(vertex.x, vertex.z))
            .unwrap();
        assert!((height - vertex.y).abs() < 1e-4);
    }

    #[test]
    fn test_interpolated_height_lies_within_triangle_heights() {
        let mut surface = plane();
        surface.tick(&ripples(), 1.7);
        let mut collider = SurfaceCollider::new();
        collider.refresh(&surface, Vec3::ZERO);
        let query = HeightQuery::new(&surface, &collider, Vec3::ZERO);

        let point = Vec2::new(0.13, 0.61);
        let height = query.interpolated_height(point).unwrap();
        let hit = collider
            .cast_ray(SurfaceRay::downward(point, 10.0), 20.0)
            .unwrap();
        let corners = surface.triangle(hit.triangle).unwrap();
        let lo = corners.iter().map(|v| v.y).fold(f32::INFINITY, f32::min);
        let hi = corners.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max);
        assert!(height >= lo - 1e-5 && height <= hi + 1e-5);
    }

    #[test]
    fn test_interpolated_height_outside_surface_is_none() {
        let surface = plane();
        let mut collider = SurfaceCollider::new();
        collider.refresh(&surface, Vec3::ZERO);
        let query = HeightQuery::new(&surface, &collider, Vec3::ZERO);
        assert!(query.interpolated_height(Vec2::new(20.0, 0.0)).is_none());
    }

    #[test]
    fn test_stale_collider_is_none() {
        let mut surface = plane();
        let mut collider = SurfaceCollider::new();
        collider.refresh(&surface, Vec3::ZERO);
        surface.tick(&ripples(), 1.0);

        let query = HeightQuery::new(&surface, &collider, Vec3::ZERO);
        assert!(query.interpolated_height(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_nearest_vertex_height() {
        let mut surface = plane();
        surface.tick(&ripples(), 2.0);
        let collider = SurfaceCollider::new();
        let offset = Vec3::new(0.0, -1.0, 0.0);
        let query = HeightQuery::new(&surface, &collider, offset);

        // Vertex spacing is 0.5, so (0.1, 0.1) snaps to the vertex at the origin.
        let origin_vertex = surface
            .working_vertices()
            .iter()
            .find(|v| v.x == 0.0 && v.z == 0.0)
            .copied()
            .unwrap();
        let height = query.nearest_vertex_height(Vec2::new(0.1, 0.1)).unwrap();
        assert_eq!(height, origin_vertex.y - 1.0);
    }

    #[test]
    fn test_nearest_vertex_on_disabled_surface_is_none() {
        let surface = SurfaceMesh::new(Vec::new(), &[]);
        let collider = SurfaceCollider::new();
        let query = HeightQuery::new(&surface, &collider, Vec3::ZERO);
        assert!(query.nearest_vertex_height(Vec2::ZERO).is_none());
        assert!(query.interpolated_height(Vec2::ZERO).is_none());
    }
}
