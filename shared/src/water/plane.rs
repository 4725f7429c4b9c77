//! Flat subdivided plane used as the undeformed water surface.
//!
//! ## Mesh Structure
//! - `(x_segments + 1) * (z_segments + 1)` vertices, centered on the origin at y = 0
//! - Row-major vertex order: index = z * (x_segments + 1) + x
//! - Two triangles per cell wound so their normals face +Y
//! - UVs span [0, 1] across the whole plane

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::surface::SurfaceMesh;

/// Upper bound on cells per axis, keeping index arithmetic inside `u32`.
pub const MAX_PLANE_SEGMENTS: u32 = 1024;

/// Dimensions of the generated plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneSettings {
    /// Number of cells along X
    pub x_segments: u32,
    /// Number of cells along Z
    pub z_segments: u32,
    /// Total extent along X in world units
    pub width: f32,
    /// Total extent along Z in world units
    pub length: f32,
}

impl Default for PlaneSettings {
    fn default() -> Self {
        Self {
            x_segments: 50,
            z_segments: 50,
            width: 10.0,
            length: 10.0,
        }
    }
}

/// Generated plane geometry, ready to become a [`SurfaceMesh`] or a render mesh.
#[derive(Debug, Default, Clone)]
pub struct PlaneMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    /// Builds the grid. Segment counts are clamped to `1..=MAX_PLANE_SEGMENTS`
    /// and non-positive sizes fall back to one unit.
    pub fn generate(settings: &PlaneSettings) -> Self {
        let x_segments = settings.x_segments.clamp(1, MAX_PLANE_SEGMENTS);
        let z_segments = settings.z_segments.clamp(1, MAX_PLANE_SEGMENTS);
        let width = positive_or_one(settings.width);
        let length = positive_or_one(settings.length);

        let x_vertices = x_segments + 1;
        let z_vertices = z_segments + 1;
        let vertex_count = (x_vertices * z_vertices) as usize;

        let x_step = width / x_segments as f32;
        let z_step = length / z_segments as f32;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        for z in 0..z_vertices {
            for x in 0..x_vertices {
                positions.push(Vec3::new(
                    x as f32 * x_step - width / 2.0,
                    0.0,
                    z as f32 * z_step - length / 2.0,
                ));
                uvs.push(Vec2::new(
                    x as f32 / x_segments as f32,
                    z as f32 / z_segments as f32,
                ));
            }
        }

        let mut indices = Vec::with_capacity((x_segments * z_segments * 6) as usize);
        for z in 0..z_segments {
            for x in 0..x_segments {
                let bottom_left = z * x_vertices + x;
                let bottom_right = bottom_left + 1;
                let top_left = (z + 1) * x_vertices + x;
                let top_right = top_left + 1;

                indices.extend_from_slice(&[bottom_left, top_left, bottom_right]);
                indices.extend_from_slice(&[bottom_right, top_left, top_right]);
            }
        }

        Self {
            positions,
            uvs,
            indices,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Hands a copy of the geometry to a new simulated surface.
    pub fn to_surface(&self) -> SurfaceMesh {
        SurfaceMesh::new(self.positions.clone(), &self.indices)
    }
}

fn positive_or_one(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_counts() {
        let plane = PlaneMesh::generate(&PlaneSettings {
            x_segments: 4,
            z_segments: 3,
            width: 8.0,
            length: 6.0,
        });
        assert_eq!(plane.vertex_count(), 5 * 4);
        assert_eq!(plane.triangle_count(), 4 * 3 * 2);
        assert_eq!(plane.uvs.len(), plane.vertex_count());
    }

    #[test]
    fn test_plane_is_centered() {
        let plane = PlaneMesh::generate(&PlaneSettings {
            x_segments: 2,
            z_segments: 2,
            width: 4.0,
            length: 2.0,
        });
        assert_eq!(plane.positions[0], Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(plane.positions[8], Vec3::new(2.0, 0.0, 1.0));
        assert_eq!(plane.uvs[8], Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_triangles_face_up() {
        let plane = PlaneMesh::generate(&PlaneSettings::default());
        for tri in plane.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| plane.positions[i as usize]);
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }

    #[test]
    fn test_degenerate_settings_are_normalized() {
        let plane = PlaneMesh::generate(&PlaneSettings {
            x_segments: 0,
            z_segments: 0,
            width: -3.0,
            length: f32::NAN,
        });
        assert_eq!(plane.vertex_count(), 4);
        assert_eq!(plane.triangle_count(), 2);
        assert_eq!(plane.positions[3], Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_oversized_segments_are_clamped() {
        let plane = PlaneMesh::generate(&PlaneSettings {
            x_segments: u32::MAX,
            z_segments: 1,
            width: 2.0,
            length: 2.0,
        });
        let x_vertices = MAX_PLANE_SEGMENTS as usize + 1;
        assert_eq!(plane.vertex_count(), x_vertices * 2);
        assert_eq!(plane.triangle_count(), MAX_PLANE_SEGMENTS as usize * 2);
        assert_eq!(plane.positions[x_vertices - 1], Vec3::new(1.0, 0.0, -1.0));
        assert!(plane
            .indices
            .iter()
            .all(|&i| (i as usize) < plane.vertex_count()));
    }
}
