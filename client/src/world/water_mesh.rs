//! Render mesh for the simulated water surface.
//!
//! The Bevy mesh mirrors the simulation's working vertices. Positions and
//! normals are re-uploaded only when the surface generation moves on, so a
//! paused or disabled surface costs nothing per frame.

use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::{
        mesh::{Indices, Mesh, PrimitiveTopology},
        view::NoFrustumCulling,
    },
};
use ripple_shared::water::{PlaneMesh, SurfaceMesh};
use ripple_shared::{WaterConfig, WaterSimulation};

/// Marks the entity rendering the water and remembers which surface
/// generation its mesh currently shows.
#[derive(Component, Debug)]
pub struct WaterMeshSync {
    pub generation: Option<u64>,
}

/// Generated water mesh data ready for GPU upload.
#[derive(Debug, Default, Clone)]
pub struct WaterMeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl WaterMeshData {
    /// Takes geometry from the current surface and UVs from the authored plane.
    pub fn from_surface(surface: &SurfaceMesh, plane: &PlaneMesh) -> Self {
        let mut uvs: Vec<[f32; 2]> = plane.uvs.iter().map(|uv| uv.to_array()).collect();
        uvs.resize(surface.vertex_count(), [0.0, 0.0]);

        Self {
            positions: surface.working_vertices().iter().map(|v| v.to_array()).collect(),
            normals: surface.normals().iter().map(|n| n.to_array()).collect(),
            uvs,
            indices: surface.triangles().iter().flatten().copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Converts this data into a Bevy mesh that stays editable on the CPU.
    pub fn into_mesh(self) -> Option<Mesh> {
        if self.is_empty() {
            return None;
        }

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs);
        mesh.insert_indices(Indices::U32(self.indices));
        Some(mesh)
    }
}

pub fn spawn_water_mesh(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    water: Res<WaterSimulation>,
    config: Res<WaterConfig>,
) {
    let plane = PlaneMesh::generate(&config.plane);
    let Some(mesh) = WaterMeshData::from_surface(water.surface(), &plane).into_mesh() else {
        warn!("Water surface is empty, nothing to render");
        return;
    };

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.1, 0.35, 0.6, 0.85),
            perceptual_roughness: 0.1,
            reflectance: 0.6,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_translation(water.placement()),
        // The bounding box changes with every ripple
        NoFrustumCulling,
        WaterMeshSync {
            generation: Some(water.surface().generation()),
        },
    ));
}

/// Copies deformed positions and normals into the render mesh.
pub fn sync_water_mesh(
    water: Res<WaterSimulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut query: Query<(&Mesh3d, &mut WaterMeshSync, &mut Transform)>,
) {
    let surface = water.surface();
    for (mesh3d, mut sync, mut transform) in query.iter_mut() {
        if sync.generation == Some(surface.generation()) {
            continue;
        }
        let Some(mesh) = meshes.get_mut(&mesh3d.0) else {
            continue;
        };

        let positions: Vec<[f32; 3]> =
            surface.working_vertices().iter().map(|v| v.to_array()).collect();
        let normals: Vec<[f32; 3]> = surface.normals().iter().map(|n| n.to_array()).collect();
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);

        if transform.translation != water.placement() {
            transform.translation = water.placement();
        }
        sync.generation = Some(surface.generation());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;
    use ripple_shared::water::{PlaneSettings, WaveField, WaveParams};

    fn plane() -> PlaneMesh {
        PlaneMesh::generate(&PlaneSettings {
            x_segments: 4,
            z_segments: 4,
            width: 2.0,
            length: 2.0,
        })
    }

    #[test]
    fn test_mesh_data_mirrors_surface() {
        let plane = plane();
        let mut surface = plane.to_surface();
        let mut waves = WaveField::new(0.0, 4);
        waves.add_source(Vec2::ZERO, WaveParams::new(0.3, 1.0, 1.0, 10.0), 0.0);
        surface.tick(&waves, 0.6);

        let data = WaterMeshData::from_surface(&surface, &plane);
        assert_eq!(data.positions.len(), 25);
        assert_eq!(data.uvs.len(), 25);
        assert_eq!(data.indices, plane.indices);
        assert_eq!(data.positions[12], surface.working_vertices()[12].to_array());
        assert_eq!(data.normals[7], surface.normals()[7].to_array());
    }

    #[test]
    fn test_into_mesh() {
        let plane = plane();
        let mesh = WaterMeshData::from_surface(&plane.to_surface(), &plane)
            .into_mesh()
            .unwrap();
        assert_eq!(mesh.count_vertices(), 25);
        assert!(matches!(
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL),
            Some(VertexAttributeValues::Float32x3(_))
        ));
        assert_eq!(mesh.indices().map(|i| i.len()), Some(4 * 4 * 6));
    }

    #[test]
    fn test_empty_surface_has_no_mesh() {
        let surface = SurfaceMesh::new(Vec::new(), &[]);
        assert!(WaterMeshData::from_surface(&surface, &PlaneMesh::default())
            .into_mesh()
            .is_none());
    }
}
