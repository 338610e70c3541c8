//! Flat grid mesh the surface shader displaces.

use bytemuck::{Pod, Zeroable};

/// Vertex data for the surface mesh (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Square XZ plane split into `quads × quads` cells, two triangles each
pub struct PlaneMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    /// Grid spanning [-half_extent, half_extent] on X and Z at y = 0
    pub fn new(quads: u32, half_extent: f32) -> Self {
        let quads = quads.max(1);
        let verts_per_side = quads + 1;
        let step = 2.0 * half_extent / quads as f32;

        let mut vertices = Vec::with_capacity((verts_per_side * verts_per_side) as usize);
        let mut indices = Vec::with_capacity((quads * quads * 6) as usize);

        for z in 0..=quads {
            for x in 0..=quads {
                vertices.push(Vertex {
                    position: [
                        x as f32 * step - half_extent,
                        0.0,
                        z as f32 * step - half_extent,
                    ],
                    uv: [x as f32 / quads as f32, z as f32 / quads as f32],
                });
            }
        }

        // Counter-clockwise seen from +Y
        for z in 0..quads {
            for x in 0..quads {
                let top_left = z * verts_per_side + x;
                let top_right = top_left + 1;
                let bottom_left = (z + 1) * verts_per_side + x;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_plane_mesh_creation() {
        let quads = 16;
        let mesh = PlaneMesh::new(quads, 1.0);

        // Check vertex count: (quads + 1)^2
        assert_eq!(mesh.vertices.len(), ((quads + 1) * (quads + 1)) as usize);

        // Check triangle count: quads^2 * 2 triangles * 3 indices
        assert_eq!(mesh.indices.len(), (quads * quads * 6) as usize);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_plane_mesh_extent() {
        let mesh = PlaneMesh::new(4, 2.5);
        let first = mesh.vertices[0].position;
        let last = mesh.vertices[mesh.vertices.len() - 1].position;

        assert_eq!(first, [-2.5, 0.0, -2.5]);
        assert!((last[0] - 2.5).abs() < 1e-6);
        assert!((last[2] - 2.5).abs() < 1e-6);
        assert_eq!(mesh.vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_triangles_face_up() {
        let mesh = PlaneMesh::new(2, 1.0);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }
}
