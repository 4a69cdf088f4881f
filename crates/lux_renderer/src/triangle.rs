//! Triangle primitive for the reference scene.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lux_math::{Aabb, Interval, Ray, Vec3};

/// A triangle with per-vertex normals and a material index into its scene.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub material: u32,
}

impl Triangle {
    /// Triangle with explicit vertex normals (smooth shading).
    pub fn new(positions: [Vec3; 3], normals: [Vec3; 3], material: u32) -> Self {
        Self {
            positions,
            normals,
            material,
        }
    }

    /// Triangle whose vertex normals all equal the geometric normal.
    ///
    /// Winding is counter-clockwise around the normal.
    pub fn flat(positions: [Vec3; 3], material: u32) -> Self {
        let [v0, v1, v2] = positions;
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self::new(positions, [normal; 3], material)
    }

    /// Twice the triangle's area; zero for degenerate triangles.
    pub fn doubled_area(&self) -> f32 {
        let [v0, v1, v2] = self.positions;
        (v1 - v0).cross(v2 - v0).length()
    }

    pub fn bounding_box(&self) -> Aabb {
        let [v0, v1, v2] = self.positions;
        Aabb::from_triangle(v0, v1, v2)
    }

    /// Möller-Trumbore intersection. Returns the ray parameter of the hit.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let [v0, v1, v2] = self.positions;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        ray_t.contains(t).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_camera() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::flat(
            [
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(0.0, 1.0, -1.0),
            ],
            0,
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = facing_camera();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let t = tri.intersect(&ray, Interval::from_epsilon(0.001)).unwrap();
        assert!((t - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = facing_camera();

        let away = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(tri.intersect(&away, Interval::from_epsilon(0.001)).is_none());

        let beside = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(tri.intersect(&beside, Interval::from_epsilon(0.001)).is_none());
    }

    #[test]
    fn test_triangle_hit_outside_interval() {
        let tri = facing_camera();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(tri.intersect(&ray, Interval::new(0.001, 0.5)).is_none());
    }

    #[test]
    fn test_flat_normal_follows_winding() {
        let tri = facing_camera();
        assert!((tri.normals[0] - Vec3::Z).length() < 1e-6);
        assert!((tri.doubled_area() - 4.0).abs() < 1e-6);
    }
}
