//! Procedural mesh generation for particle fields
//!
//! A whole particle set is baked into one mesh: every point becomes a tiny
//! octahedron, so the field is drawn and moved as a single entity.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::asset::RenderAssetUsages;

use crate::particle_field::ParticleSet;

// ============================================================================
// PARTICLE CLOUD MESH
// ============================================================================

/// Octahedron corners: +x, -x, +y, -y, +z, -z
const OCTAHEDRON_DIRECTIONS: [Vec3; 6] = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];

/// Eight outward-facing triangles (counter-clockwise winding)
const OCTAHEDRON_FACES: [[u32; 3]; 8] = [
    [0, 2, 4], [2, 1, 4], [1, 3, 4], [3, 0, 4],
    [2, 0, 5], [1, 2, 5], [3, 1, 5], [0, 3, 5],
];

pub fn create_particle_cloud_mesh(particles: &ParticleSet, particle_size: f32) -> Mesh {
    let count = particles.len();
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(count * 6);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(count * 6);
    let mut indices: Vec<u32> = Vec::with_capacity(count * 24);

    let half = particle_size.abs() * 0.5;
    for point in particles.points() {
        let base = positions.len() as u32;
        for direction in OCTAHEDRON_DIRECTIONS {
            positions.push((*point + direction * half).to_array());
            normals.push(direction.to_array());
        }
        for face in OCTAHEDRON_FACES {
            indices.extend(face.iter().map(|i| base + i));
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle_field::{sample_particles, DepthBand, FieldAxis, ParticleFieldConfig};

    #[test]
    fn cloud_mesh_has_one_octahedron_per_particle() {
        let particles = sample_particles(&ParticleFieldConfig {
            count: 64,
            min_radius: 1.0,
            max_radius: 2.0,
            axis: FieldAxis::Vertical,
            depth: DepthBand::Symmetric { half_extent: 0.5 },
            color: Color::WHITE,
            seed: Some(1),
        });
        let mesh = create_particle_cloud_mesh(&particles, 0.04);
        assert_eq!(mesh.count_vertices(), 64 * 6);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(64 * 24));
    }
}
