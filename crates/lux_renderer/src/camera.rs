//! Pinhole camera basis for primary ray generation.

use lux_math::{Ray, Vec2, Vec3};

/// Precomputed camera frame.
///
/// `right` and `up` span half the image plane at unit distance along
/// `forward`, so their lengths carry the field of view and aspect ratio.
/// The integrator consumes these vectors as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub origin: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl CameraBasis {
    pub fn new(origin: Vec3, right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Self {
            origin,
            right,
            up,
            forward,
        }
    }

    /// Camera at `look_from` aimed at `look_at`.
    ///
    /// `vfov` is the vertical field of view in degrees; `aspect` is
    /// width / height.
    pub fn look_at(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect: f32) -> Self {
        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = half_height * aspect;

        let forward = (look_at - look_from).normalize();
        let right = forward.cross(vup).normalize();
        let up = right.cross(forward);

        Self {
            origin: look_from,
            right: right * half_width,
            up: up * half_height,
            forward,
        }
    }

    /// Unit direction through normalized device coordinates in `[-1, 1]^2`
    /// (+x right, +y up).
    #[inline]
    pub fn direction(&self, ndc: Vec2) -> Vec3 {
        (ndc.x * self.right + ndc.y * self.up + self.forward).normalize()
    }

    #[inline]
    pub fn primary_ray(&self, ndc: Vec2) -> Ray {
        Ray::new(self.origin, self.direction(ndc))
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 1.0)
    }
}
