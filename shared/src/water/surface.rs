//! Deformable water surface mesh.
//!
//! The surface keeps an untouched copy of the authored vertices and a working
//! buffer that is rebuilt every tick from the base heights plus the wave field
//! displacement. Only heights change: X and Z of every working vertex always
//! equal the base vertex, which is what lets the collider keep its XZ grid
//! between ticks.

use bevy::math::{Vec2, Vec3};
use bevy_log::warn;

use super::wave_field::WaveField;

#[inline]
pub(crate) fn xz(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Axis-aligned bounds of the deformed surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SurfaceBounds {
    pub fn from_point(pos: Vec3) -> Self {
        Self { min: pos, max: pos }
    }

    pub fn expand(&mut self, pos: Vec3) {
        self.min = self.min.min(pos);
        self.max = self.max.max(pos);
    }

    /// Width and depth on the XZ plane.
    pub fn xz_extent(&self) -> Vec2 {
        Vec2::new(self.max.x - self.min.x, self.max.z - self.min.z)
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    base_vertices: Vec<Vec3>,
    working_vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    bounds: Option<SurfaceBounds>,
    /// Bumped on every successful tick, used to detect a stale collider
    generation: u64,
    enabled: bool,
}

impl SurfaceMesh {
    /// Takes ownership of the base vertices and a flat triangle index list.
    ///
    /// Triangles referencing missing vertices are dropped. A mesh without
    /// vertices is created disabled and all of its ticks are no-ops.
    pub fn new(vertices: Vec<Vec3>, indices: &[u32]) -> Self {
        if vertices.is_empty() {
            warn!("Water surface has no base vertices, surface disabled");
            return Self::default();
        }

        if indices.len() % 3 != 0 {
            warn!(
                "Water surface index count {} is not a multiple of 3, ignoring trailing indices",
                indices.len()
            );
        }

        let vertex_count = vertices.len();
        let triangles: Vec<[u32; 3]> = indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .filter(|tri| tri.iter().all(|&i| (i as usize) < vertex_count))
            .collect();

        let dropped = indices.len() / 3 - triangles.len();
        if dropped > 0 {
            warn!("Dropped {} water triangles with out-of-range indices", dropped);
        }

        let mut surface = Self {
            working_vertices: vertices.clone(),
            normals: vec![Vec3::Y; vertex_count],
            base_vertices: vertices,
            triangles,
            bounds: None,
            generation: 0,
            enabled: true,
        };
        surface.recompute_normals();
        surface.recompute_bounds();
        surface
    }

    /// Re-evaluates every vertex height for `time`.
    ///
    /// Returns `false` when the surface is disabled.
    pub fn tick(&mut self, waves: &WaveField, time: f32) -> bool {
        if !self.enabled {
            return false;
        }

        for (working, base) in self.working_vertices.iter_mut().zip(&self.base_vertices) {
            working.y = base.y + waves.displacement_at(xz(*base), time);
        }

        self.recompute_normals();
        self.recompute_bounds();
        self.generation = self.generation.wrapping_add(1);
        true
    }

    fn recompute_normals(&mut self) {
        self.normals.iter_mut().for_each(|n| *n = Vec3::ZERO);

        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| self.working_vertices[i as usize]);
            // Area weighted: the cross product is left unnormalized.
            let face = (b - a).cross(c - a);
            for &i in tri {
                self.normals[i as usize] += face;
            }
        }

        for normal in &mut self.normals {
            *normal = normal.normalize_or(Vec3::Y);
        }
    }

    fn recompute_bounds(&mut self) {
        let mut vertices = self.working_vertices.iter();
        self.bounds = vertices.next().map(|first| {
            let mut bounds = SurfaceBounds::from_point(*first);
            for v in vertices {
                bounds.expand(*v);
            }
            bounds
        });
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.base_vertices.len()
    }

    pub fn base_vertices(&self) -> &[Vec3] {
        &self.base_vertices
    }

    pub fn working_vertices(&self) -> &[Vec3] {
        &self.working_vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Deformed corners of triangle `index`.
    pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        self.triangles
            .get(index)
            .map(|tri| tri.map(|i| self.working_vertices[i as usize]))
    }

    pub fn bounds(&self) -> Option<SurfaceBounds> {
        self.bounds
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Undeformed height of the surface, taken from the first base vertex.
    pub fn base_level(&self) -> f32 {
        self.base_vertices.first().map_or(0.0, |v| v.y)
    }
}
