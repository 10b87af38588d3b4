use glam::{Mat4, Vec3};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append another mesh, re-basing its indices.
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Shift all positions by `offset`. Normals are unaffected.
    pub fn translated(mut self, offset: Vec3) -> MeshData {
        for v in self.vertices.chunks_exact_mut(9) {
            v[0] += offset.x;
            v[1] += offset.y;
            v[2] += offset.z;
        }
        self
    }

    /// Bake a transform into the vertex buffer. Normals are rotated and
    /// re-normalized, which is exact for the rotate/uniform-scale/translate
    /// transforms placements use.
    pub fn transformed(&self, transform: Mat4) -> MeshData {
        let normal_mat = glam::Mat3::from_mat4(transform);
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for v in self.vertices.chunks_exact(9) {
            let p = transform.transform_point3(Vec3::new(v[0], v[1], v[2]));
            let n = (normal_mat * Vec3::new(v[3], v[4], v[5])).normalize_or_zero();
            vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, v[6], v[7], v[8]]);
        }
        MeshData { vertices, indices: self.indices.clone() }
    }
}

// ── Primitive generation ─────────────────────────────────────

pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut mesh = MeshData::default();
    for (corners, normal) in &faces {
        push_quad(&mut mesh, *corners, *normal, color);
    }
    mesh
}

pub fn cylinder(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let hh = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side faces
    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;

        let c0 = a0.cos();
        let s0 = a0.sin();
        let c1 = a1.cos();
        let s1 = a1.sin();

        let n0 = Vec3::new(c0, 0.0, s0);
        let n1 = Vec3::new(c1, 0.0, s1);

        let base = (vertices.len() / 9) as u32;

        push_vert(&mut vertices, radius * c0, -hh, radius * s0, n0, color);
        push_vert(&mut vertices, radius * c1, -hh, radius * s1, n1, color);
        push_vert(&mut vertices, radius * c1, hh, radius * s1, n1, color);
        push_vert(&mut vertices, radius * c0, hh, radius * s0, n0, color);

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    // Top cap
    add_cap(&mut vertices, &mut indices, radius, hh, segments, Vec3::Y, color);
    // Bottom cap
    add_cap_reversed(&mut vertices, &mut indices, radius, -hh, segments, Vec3::NEG_Y, color);

    MeshData { vertices, indices }
}

/// A single quad with a uniform normal, as its own mesh. Room shell surfaces
/// are assembled from these.
pub fn quad(corners: [Vec3; 4], normal: Vec3, color: [f32; 3]) -> MeshData {
    let mut mesh = MeshData::default();
    push_quad(&mut mesh, corners, normal, color);
    mesh
}

// ── Helpers ──────────────────────────────────────────────────

fn push_quad(mesh: &mut MeshData, corners: [Vec3; 4], normal: Vec3, color: [f32; 3]) {
    let base = mesh.vertex_count() as u32;
    for v in &corners {
        push_vert(&mut mesh.vertices, v.x, v.y, v.z, normal, color);
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

fn push_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[px, py, pz, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn add_cap(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vec3,
    color: [f32; 3],
) {
    let center_idx = (vertices.len() / 9) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);

    for i in 0..segments {
        let angle = (i as f32) * std::f32::consts::TAU / segments as f32;
        push_vert(vertices, radius * angle.cos(), y, radius * angle.sin(), normal, color);
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[center_idx, center_idx + 1 + i, center_idx + 1 + next]);
    }
}

fn add_cap_reversed(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vec3,
    color: [f32; 3],
) {
    let center_idx = (vertices.len() / 9) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);

    for i in 0..segments {
        let angle = (i as f32) * std::f32::consts::TAU / segments as f32;
        push_vert(vertices, radius * angle.cos(), y, radius * angle.sin(), normal, color);
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[center_idx, center_idx + 1 + next, center_idx + 1 + i]);
    }
}
