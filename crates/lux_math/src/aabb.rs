use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box stored as two corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// A box containing nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create an AABB from two corner points in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing a triangle, padded so flat triangles still
    /// have volume.
    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let pad = Vec3::splat(1e-4);
        Self {
            min: a.min(b).min(c) - pad,
            max: a.max(b).max(c) + pad,
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    #[inline]
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Grow the box to include a point.
    #[inline]
    pub fn include_point(&self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Slab test against all three axes at once.
    ///
    /// `inv_dir` is the reciprocal ray direction, passed in so traversal can
    /// compute it once per ray.
    #[inline]
    pub fn hit(&self, ray: &Ray, inv_dir: Vec3, ray_t: Interval) -> bool {
        let t0 = (self.min - ray.origin) * inv_dir;
        let t1 = (self.max - ray.origin) * inv_dir;

        let t_near = t0.min(t1).max_element().max(ray_t.min);
        let t_far = t0.max(t1).min_element().min(ray_t.max);

        t_near <= t_far
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let extent = self.max - self.min;
        if extent.x > extent.y && extent.x > extent.z {
            0
        } else if extent.y > extent.z {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    #[inline]
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(5.0, -1.0, 2.0), Vec3::new(0.0, 3.0, -2.0));

        assert_eq!(aabb.min, Vec3::new(0.0, -1.0, -2.0));
        assert_eq!(aabb.max, Vec3::new(5.0, 3.0, 2.0));
    }

    #[test]
    fn test_flat_triangle_is_padded() {
        let aabb = Aabb::from_triangle(Vec3::ZERO, Vec3::X, Vec3::Z);
        assert!(aabb.max.y > aabb.min.y);
    }

    #[test]
    fn test_surrounding_with_empty() {
        let b = unit_box();
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &b), b);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();
        let range = Interval::new(0.0, 100.0);

        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.hit(&ray, ray.inv_direction(), range));

        let away = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!aabb.hit(&away, away.inv_direction(), range));

        let beside = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(!aabb.hit(&beside, beside.inv_direction(), range));
    }

    #[test]
    fn test_aabb_hit_respects_interval() {
        let aabb = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        // Box spans t in [4, 6]
        assert!(!aabb.hit(&ray, ray.inv_direction(), Interval::new(0.0, 3.0)));
        assert!(aabb.hit(&ray, ray.inv_direction(), Interval::new(5.0, 100.0)));
    }

    #[test]
    fn test_aabb_longest_axis_and_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 2.0));

        assert_eq!(aabb.longest_axis(), 1);
        assert_eq!(aabb.centroid(), Vec3::new(0.5, 5.0, 1.0));
    }
}
