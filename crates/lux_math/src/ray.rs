use crate::Vec3;

/// A ray in 3D space.
///
/// Rays are parameterized as `origin + t * direction`. The direction is
/// normalized by every producer in the integrator, but nothing here relies
/// on that.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Component-wise reciprocal of the direction, used by slab tests.
    ///
    /// Zero components become infinities, which the slab test handles.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.direction.recip()
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}
