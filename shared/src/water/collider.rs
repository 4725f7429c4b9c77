//! Ray casting against the live deformed water surface.
//!
//! The collider holds a world-space copy of the working vertices and a uniform
//! grid that buckets triangles by their XZ footprint. Because the surface only
//! ever moves vertically, the buckets stay valid across ticks and a refresh is a
//! plain vertex copy. Near-vertical rays walk a single bucket; any other ray
//! falls back to testing every triangle.

use bevy::math::{Vec2, Vec3};

use super::surface::{xz, SurfaceBounds, SurfaceMesh};

/// Determinant magnitude below which a ray is parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-8;
/// Slack on the barycentric range so rays through shared edges never slip
/// between neighbouring triangles.
const EDGE_TOLERANCE: f32 = 1e-5;
/// Horizontal direction component below which a ray is treated as vertical.
const VERTICAL_EPSILON: f32 = 1e-6;
const MAX_GRID_RESOLUTION: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl SurfaceRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray pointing straight down from `height` above the given XZ point.
    pub fn downward(point: Vec2, height: f32) -> Self {
        Self::new(Vec3::new(point.x, height, point.y), Vec3::NEG_Y)
    }
}

/// Result of a successful ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Index into the surface triangle list
    pub triangle: usize,
    /// Weights of the triangle's three corners, in index order
    pub barycentric: Vec3,
    /// Distance along the normalized ray direction
    pub distance: f32,
    /// World-space hit position
    pub point: Vec3,
}

/// Uniform XZ grid of triangle indices.
#[derive(Debug, Clone)]
struct TriangleGrid {
    origin: Vec2,
    cell_size: Vec2,
    columns: usize,
    rows: usize,
    cells: Vec<Vec<u32>>,
}

impl TriangleGrid {
    fn build(vertices: &[Vec3], triangles: &[[u32; 3]]) -> Option<Self> {
        let first = xz(*vertices.first()?);
        let (min, max) = vertices
            .iter()
            .fold((first, first), |(min, max), v| (min.min(xz(*v)), max.max(xz(*v))));

        let resolution = ((triangles.len() as f32).sqrt().ceil() as usize).clamp(1, MAX_GRID_RESOLUTION);
        let extent = max - min;
        let cell_size = Vec2::new(
            if extent.x > 0.0 { extent.x / resolution as f32 } else { 1.0 },
            if extent.y > 0.0 { extent.y / resolution as f32 } else { 1.0 },
        );

        let mut grid = Self {
            origin: min,
            cell_size,
            columns: resolution,
            rows: resolution,
            cells: vec![Vec::new(); resolution * resolution],
        };

        for (index, tri) in triangles.iter().enumerate() {
            let corners = tri.map(|i| xz(vertices[i as usize]));
            let lo = corners[0].min(corners[1]).min(corners[2]);
            let hi = corners[0].max(corners[1]).max(corners[2]);
            let (c0, r0) = grid.clamped_cell(lo);
            let (c1, r1) = grid.clamped_cell(hi);
            for row in r0..=r1 {
                for column in c0..=c1 {
                    grid.cells[row * grid.columns + column].push(index as u32);
                }
            }
        }

        Some(grid)
    }

    fn clamped_cell(&self, point: Vec2) -> (usize, usize) {
        let local = ((point - self.origin) / self.cell_size).max(Vec2::ZERO);
        (
            (local.x as usize).min(self.columns - 1),
            (local.y as usize).min(self.rows - 1),
        )
    }

    /// Triangles whose footprint may contain `point`; empty outside the grid.
    fn candidates(&self, point: Vec2) -> &[u32] {
        let local = (point - self.origin) / self.cell_size;
        let limit = Vec2::new(self.columns as f32, self.rows as f32);
        let slack = Vec2::splat(EDGE_TOLERANCE);
        if local.cmplt(-slack).any() || local.cmpgt(limit + slack).any() {
            return &[];
        }
        let (column, row) = self.clamped_cell(point);
        &self.cells[row * self.columns + column]
    }
}

/// Collision copy of a [`SurfaceMesh`], placed in world space.
#[derive(Debug, Clone, Default)]
pub struct SurfaceCollider {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    offset: Vec3,
    grid: Option<TriangleGrid>,
    bounds: Option<SurfaceBounds>,
    /// Surface generation the vertices were copied from
    generation: Option<u64>,
}

impl SurfaceCollider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current working vertices, translated by `offset`.
    ///
    /// The triangle grid is only rebuilt when the topology or placement
    /// changed; a disabled surface clears the collider.
    pub fn refresh(&mut self, surface: &SurfaceMesh, offset: Vec3) {
        if !surface.is_enabled() {
            *self = Self::default();
            return;
        }

        let topology_changed = self.grid.is_none()
            || self.offset != offset
            || self.vertices.len() != surface.vertex_count()
            || self.triangles.len() != surface.triangles().len();

        self.vertices.clear();
        self.vertices
            .extend(surface.working_vertices().iter().map(|v| *v + offset));

        if topology_changed {
            self.triangles = surface.triangles().to_vec();
            self.offset = offset;
            self.grid = TriangleGrid::build(&self.vertices, &self.triangles);
        }

        self.bounds = surface.bounds().map(|b| b.translated(offset));
        self.generation = Some(surface.generation());
    }

    /// Closest hit within `max_distance` of the ray origin.
    pub fn cast_ray(&self, ray: SurfaceRay, max_distance: f32) -> Option<SurfaceHit> {
        let direction = ray.direction.normalize_or_zero();
        if direction == Vec3::ZERO || self.triangles.is_empty() {
            return None;
        }

        let mut best: Option<SurfaceHit> = None;
        let mut consider = |index: usize| {
            if let Some(hit) = self.intersect(index, ray.origin, direction) {
                if hit.distance <= max_distance && best.map_or(true, |b| hit.distance < b.distance) {
                    best = Some(hit);
                }
            }
        };

        let vertical = direction.x.abs() < VERTICAL_EPSILON && direction.z.abs() < VERTICAL_EPSILON;
        match (&self.grid, vertical) {
            (Some(grid), true) => {
                for &index in grid.candidates(xz(ray.origin)) {
                    consider(index as usize);
                }
            }
            _ => {
                for index in 0..self.triangles.len() {
                    consider(index);
                }
            }
        }

        best
    }

    /// Möller-Trumbore, two-sided.
    fn intersect(&self, index: usize, origin: Vec3, direction: Vec3) -> Option<SurfaceHit> {
        let [p0, p1, p2] = self.triangles[index].map(|i| self.vertices[i as usize]);
        let edge1 = p1 - p0;
        let edge2 = p2 - p0;

        let p = direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = origin - p0;
        let u = s.dot(p) * inv_det;
        if !(-EDGE_TOLERANCE..=1.0 + EDGE_TOLERANCE).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = direction.dot(q) * inv_det;
        if v < -EDGE_TOLERANCE || u + v > 1.0 + EDGE_TOLERANCE {
            return None;
        }

        let distance = edge2.dot(q) * inv_det;
        if distance < 0.0 {
            return None;
        }

        Some(SurfaceHit {
            triangle: index,
            barycentric: Vec3::new(1.0 - u - v, u, v),
            distance,
            point: origin + direction * distance,
        })
    }

    /// Generation of the surface this collider was last refreshed from.
    #[inline]
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// True when the collider reflects exactly this surface state.
    #[inline]
    pub fn is_current(&self, surface: &SurfaceMesh) -> bool {
        self.generation == Some(surface.generation()) && surface.is_enabled()
    }

    /// World-space bounds at the last refresh.
    pub fn bounds(&self) -> Option<SurfaceBounds> {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}
