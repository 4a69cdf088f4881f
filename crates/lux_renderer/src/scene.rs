//! Scene query interface.
//!
//! The integrator never sees geometry directly. It casts rays through
//! [`SceneQuery`] and reads the outcome back from the [`PathState`] it lent
//! to the query.

use crate::{Material, PathState};
use lux_math::{Interval, Ray, Vec3};

/// Shading inputs for the triangle a radiance query landed on.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceRecord<'a> {
    /// Triangle vertex positions (world space)
    pub positions: [Vec3; 3],
    /// Per-vertex normals
    pub normals: [Vec3; 3],
    /// Material of the triangle
    pub material: &'a Material,
}

/// Ray casting capability backing the integrator.
///
/// Implementations report results by calling the `record_*` methods on the
/// state they are handed rather than returning values, so the emit/shade/miss
/// classification stays in one place.
pub trait SceneQuery: Send + Sync {
    /// Closest-hit query for a path segment.
    ///
    /// A miss must call [`PathState::record_miss`]; a hit must call
    /// [`PathState::record_surface`] with the hit triangle and position.
    fn query_radiance(&self, ray: &Ray, ray_t: Interval, state: &mut PathState);

    /// Shadow-ray query for next-event estimation.
    ///
    /// Must call [`PathState::record_occluder`] with the material of the
    /// surface that decides visibility, or
    /// [`PathState::record_occlusion_miss`] when nothing was hit.
    fn query_occlusion(&self, ray: &Ray, ray_t: Interval, state: &mut PathState);
}
