//! Bounce loop for a single camera sample.

use crate::{sample_direct_light, sample_hemisphere, Color, PathState, RenderConfig, SceneQuery, Seed};
use lux_math::{Interval, Ray};

/// Result of tracing one camera sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Radiance carried back to the camera
    pub radiance: Color,
    /// Diffuse surfaces shaded before the path ended
    pub bounces: u32,
}

/// Trace one path from `ray` until it misses, lands on an emitter, or uses up
/// `config.max_bounces` diffuse bounces.
///
/// At every diffuse hit the albedo is folded into the path mask, direct
/// light is gathered with [`sample_direct_light`], and the path continues
/// in a random hemisphere direction. A path cut off by the bounce budget
/// gains nothing further (no Russian roulette).
///
/// `seed` is the pixel's running stream: it seeds the path and receives the
/// advanced state afterwards, so consecutive samples stay uncorrelated.
pub fn trace_path(scene: &dyn SceneQuery, ray: Ray, seed: &mut Seed, config: &RenderConfig) -> PathSample {
    let ray_t = Interval::from_epsilon(config.ray_epsilon);
    let mut state = PathState::new(*seed);
    let mut ray = ray;
    let mut bounces = 0;

    while bounces < config.max_bounces {
        scene.query_radiance(&ray, ray_t, &mut state);
        if state.done {
            break;
        }
        bounces += 1;

        state.mask_color *= state.material.diffuse_color;

        let direct = sample_direct_light(scene, &mut state, config.shadow_samples, config.ray_epsilon);
        state.accum_color += direct * state.mask_color;

        let direction = sample_hemisphere(state.normal, &mut state.seed);
        ray = Ray::new(state.position, direction);
    }

    *seed = state.seed;
    PathSample {
        radiance: state.accum_color,
        bounces,
    }
}
