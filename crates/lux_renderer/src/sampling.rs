//! Direction and sub-pixel sampling.

use crate::Seed;
use lux_math::{geometry::face_forward, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Random direction in the hemisphere around `normal`.
///
/// Draws a point in the `[-1, 1]^3` cube, projects it to the unit sphere and
/// flips it to the side of `normal`. Not exactly uniform over the sphere
/// (the cube's corners are slightly favored), which the rest of the
/// integrator does not correct for.
pub fn sample_hemisphere(normal: Vec3, seed: &mut Seed) -> Vec3 {
    let x = seed.next_signed();
    let y = seed.next_signed();
    let z = seed.next_signed();
    face_forward(Vec3::new(x, y, z).normalize(), normal)
}

/// Sub-pixel offset distribution.
///
/// Offsets are in `[-1, 1]` per axis, where `±1` reaches the pixel's edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jitter {
    /// Always sample the pixel center (aliased)
    None,
    /// Uniform over the pixel footprint
    #[default]
    Uniform,
    /// Tent distribution, denser near the pixel center
    Tent,
}

impl Jitter {
    /// Draw a sub-pixel offset. `None` consumes no random numbers.
    pub fn sample(self, seed: &mut Seed) -> Vec2 {
        match self {
            Jitter::None => Vec2::ZERO,
            Jitter::Uniform => {
                let x = seed.next_signed();
                let y = seed.next_signed();
                Vec2::new(x, y)
            }
            Jitter::Tent => {
                let x = sample_tent(seed.next_f32());
                let y = sample_tent(seed.next_f32());
                Vec2::new(x, y)
            }
        }
    }
}

/// Map a uniform `u` in `[0, 1)` to the tent distribution on `[-1, 1]`.
fn sample_tent(u: f32) -> f32 {
    if u < 0.5 {
        (2.0 * u).sqrt() - 1.0
    } else {
        1.0 - (2.0 - 2.0 * u).sqrt()
    }
}
