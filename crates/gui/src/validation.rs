//! Mesh validation utilities.
//!
//! `MeshValidator` provides methods to check mesh data integrity:
//! correct stride, in-range indices, normalized normals, AABB dimensions,
//! floor contact. Integration tests lean on it to verify generated
//! furniture without poking at raw vertex buffers.

use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    /// Number of vertices (vertices buffer length / 9).
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len() / 9
    }

    /// Number of triangles (indices buffer length / 3).
    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }

    /// Check that the vertex buffer length is a multiple of 9 (the stride).
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % 9 == 0
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        let count = self.vertex_count();
        for i in 0..count {
            let base = i * 9;
            let nx = self.mesh.vertices[base + 3];
            let ny = self.mesh.vertices[base + 4];
            let nz = self.mesh.vertices[base + 5];
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            if (len - 1.0).abs() > epsilon {
                return false;
            }
        }
        true
    }

    /// Compute the axis-aligned bounding box of the mesh.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Compute the dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> [f32; 3] {
        let aabb = self.aabb();
        [
            aabb.max.x - aabb.min.x,
            aabb.max.y - aabb.min.y,
            aabb.max.z - aabb.min.z,
        ]
    }

    /// Check that the AABB dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        (dims[0] - expected[0]).abs() < tolerance
            && (dims[1] - expected[1]).abs() < tolerance
            && (dims[2] - expected[2]).abs() < tolerance
    }

    /// Check that the lowest vertex lies on the y = 0 floor plane.
    /// Placement-local furniture meshes must satisfy this before any world
    /// transform is applied.
    pub fn rests_on_floor(&self, epsilon: f32) -> bool {
        if self.vertex_count() == 0 {
            return false;
        }
        self.aabb().min.y.abs() <= epsilon
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of 9",
                self.mesh.vertices.len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }

        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_triangle() -> MeshData {
        MeshData {
            vertices: vec![
                // vertex 0: pos(0,0,0) normal(0,0,1) color(0.5,0.5,0.5)
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
                // vertex 1: pos(1,0,0) normal(0,0,1) color(0.5,0.5,0.5)
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
                // vertex 2: pos(0,1,0) normal(0,0,1) color(0.5,0.5,0.5)
                0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_counts_and_stride() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.vertex_count(), 3);
        assert_eq!(v.triangle_count(), 1);
        assert!(v.is_stride_valid());
    }

    #[test]
    fn test_stride_invalid() {
        let bad = MeshData {
            vertices: vec![0.0; 10], // not multiple of 9
            indices: vec![],
        };
        let v = MeshValidator::new(&bad);
        assert!(!v.is_stride_valid());
    }

    #[test]
    fn test_indices_out_of_range() {
        let bad = MeshData {
            vertices: vec![0.0; 9], // 1 vertex
            indices: vec![0, 1, 2], // indices 1,2 are out of range
        };
        let v = MeshValidator::new(&bad);
        assert!(!v.are_indices_in_range());
    }

    #[test]
    fn test_normals_not_normalized() {
        let bad = MeshData {
            vertices: vec![
                0.0, 0.0, 0.0, 0.0, 0.0, 5.0, 0.5, 0.5, 0.5, // normal length = 5
            ],
            indices: vec![0],
        };
        let v = MeshValidator::new(&bad);
        assert!(!v.are_normals_normalized(0.01));
    }

    #[test]
    fn test_dimensions() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        let dims = v.dimensions();
        assert!((dims[0] - 1.0).abs() < 0.001);
        assert!((dims[1] - 1.0).abs() < 0.001);
        assert!((dims[2] - 0.0).abs() < 0.001);
        assert!(v.assert_dimensions_approx([1.0, 1.0, 0.0], 0.01));
        assert!(!v.assert_dimensions_approx([2.0, 1.0, 0.0], 0.01));
    }

    #[test]
    fn test_rests_on_floor() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert!(v.rests_on_floor(1e-5));

        let raised = mesh.clone().translated(glam::Vec3::new(0.0, 0.2, 0.0));
        assert!(!MeshValidator::new(&raised).rests_on_floor(1e-5));

        let empty = MeshData::default();
        assert!(!MeshValidator::new(&empty).rests_on_floor(1e-5));
    }

    #[test]
    fn test_validate_all_ok() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        let errors = v.validate_all();
        assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
    }

    #[test]
    fn test_validate_all_catches_bad_indices() {
        let bad = MeshData {
            vertices: vec![0.0; 9],
            indices: vec![0, 5, 2],
        };
        let v = MeshValidator::new(&bad);
        let errors = v.validate_all();
        assert!(errors.iter().any(|e| e.contains("out of range")));
    }
}
