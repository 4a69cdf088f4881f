//! Surface description consumed by the integrator.

use lux_math::Vec3;

/// Color type alias (linear RGB)
pub type Color = Vec3;

/// A Lambertian surface, optionally emissive.
///
/// Emitters terminate paths: a ray that lands on one picks up
/// `emission_color` and stops. Non-emitters reflect diffusely with
/// `diffuse_color` as albedo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse_color: Color,
    pub emission_color: Color,
    pub emit: bool,
}

impl Material {
    /// Diffuse reflector with the given albedo.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            diffuse_color: albedo,
            emission_color: Color::ZERO,
            emit: false,
        }
    }

    /// Light source with the given emitted radiance.
    pub fn emitter(emission: Color) -> Self {
        Self {
            diffuse_color: Color::ZERO,
            emission_color: emission,
            emit: true,
        }
    }

    /// Radiance leaving the surface on its own.
    #[inline]
    pub fn emitted(&self) -> Color {
        if self.emit {
            self.emission_color
        } else {
            Color::ZERO
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::ZERO)
    }
}
