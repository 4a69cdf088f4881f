//! Next-event estimation: direct light at a shading point via shadow rays.

use crate::{sample_hemisphere, Color, PathState, SceneQuery};
use lux_math::{Interval, Ray};

/// Estimate direct light arriving at `state`'s shading point.
///
/// Tries up to `shadow_samples` random hemisphere directions and returns
/// `max(n . d, 0) * emission` for the first one that reaches an emitter. A
/// NaN shading normal (zero-area triangle) yields a NaN estimate whenever a
/// probe finds a light.
/// This is a one-sample estimator with no pdf weighting: cheap and noisy,
/// relying on temporal accumulation to converge.
///
/// Each probe runs on a temporary [`PathState`]; its advanced seed is copied
/// back so the sample stream stays deterministic.
pub fn sample_direct_light(
    scene: &dyn SceneQuery,
    state: &mut PathState,
    shadow_samples: u32,
    ray_epsilon: f32,
) -> Color {
    let ray_t = Interval::from_epsilon(ray_epsilon);

    for _ in 0..shadow_samples {
        let direction = sample_hemisphere(state.normal, &mut state.seed);

        let mut probe = PathState::probe(state.seed);
        scene.query_occlusion(&Ray::new(state.position, direction), ray_t, &mut probe);
        state.seed = probe.seed;

        if probe.hit {
            // NaN from a degenerate shading normal is passed through
            let cos_theta = state.normal.dot(direction);
            if cos_theta < 0.0 {
                return Color::ZERO;
            }
            return cos_theta * probe.material.emitted();
        }
    }

    Color::ZERO
}
