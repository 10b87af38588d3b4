use std::collections::HashMap;

use glam::Vec3;

use super::mesh::MeshData;

/// A ray in world space
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        let verts = &data.vertices;
        let stride = 9;
        let count = verts.len() / stride;

        for i in 0..count {
            let base = i * stride;
            let x = verts[base];
            let y = verts[base + 1];
            let z = verts[base + 2];
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        }

        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the nearest placement whose AABB is intersected by the ray. The room
/// shell never enters `aabbs`, so walls and floor cannot be picked.
pub fn pick_nearest(ray: &Ray, aabbs: &HashMap<String, Aabb>) -> Option<String> {
    let mut best: Option<(String, f32)> = None;

    for (id, aabb) in aabbs {
        if let Some(dist) = ray_aabb(ray, aabb) {
            if best.as_ref().is_none_or(|(_, d)| dist < *d) {
                best = Some((id.clone(), dist));
            }
        }
    }

    best.map(|(id, _)| id)
}

/// Intersect the ray with the floor plane (y = 0). Returns the world-space
/// point, or None when the ray is parallel to it or points away.
pub fn ray_ground(ray: &Ray) -> Option<Vec3> {
    let denom = ray.direction.y;
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = -ray.origin.y / denom;
    if t < 0.0 {
        return None;
    }

    Some(ray.origin + ray.direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh::cube;

    fn down_ray(x: f32, z: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, 10.0, z),
            direction: Vec3::NEG_Y,
        }
    }

    #[test]
    fn test_aabb_from_mesh() {
        let aabb = Aabb::from_mesh(&cube(2.0, 4.0, 6.0, [1.0, 1.0, 1.0]));
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.center(), Vec3::ZERO);
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let aabb = Aabb { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) };
        let hit = ray_aabb(&down_ray(0.0, 0.0), &aabb);
        assert!((hit.unwrap() - 9.0).abs() < 1e-5);
        assert!(ray_aabb(&down_ray(5.0, 0.0), &aabb).is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let aabb = Aabb { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) };
        let ray = Ray { origin: Vec3::new(0.0, 10.0, 0.0), direction: Vec3::Y };
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_pick_nearest_prefers_closer() {
        let mut aabbs = HashMap::new();
        aabbs.insert(
            "far".to_string(),
            Aabb { min: Vec3::new(-1.0, 0.0, -1.0), max: Vec3::new(1.0, 1.0, 1.0) },
        );
        aabbs.insert(
            "near".to_string(),
            Aabb { min: Vec3::new(-1.0, 4.0, -1.0), max: Vec3::new(1.0, 5.0, 1.0) },
        );
        assert_eq!(pick_nearest(&down_ray(0.0, 0.0), &aabbs), Some("near".to_string()));
    }

    #[test]
    fn test_pick_miss_returns_none() {
        let mut aabbs = HashMap::new();
        aabbs.insert(
            "a".to_string(),
            Aabb { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) },
        );
        assert!(pick_nearest(&down_ray(50.0, 50.0), &aabbs).is_none());
    }

    #[test]
    fn test_ray_ground_straight_down() {
        let p = ray_ground(&down_ray(2.5, -3.5)).unwrap();
        assert!((p - Vec3::new(2.5, 0.0, -3.5)).length() < 1e-5);
    }

    #[test]
    fn test_ray_ground_parallel_and_away() {
        let parallel = Ray { origin: Vec3::new(0.0, 1.0, 0.0), direction: Vec3::X };
        assert!(ray_ground(&parallel).is_none());
        let away = Ray { origin: Vec3::new(0.0, 1.0, 0.0), direction: Vec3::Y };
        assert!(ray_ground(&away).is_none());
    }
}
