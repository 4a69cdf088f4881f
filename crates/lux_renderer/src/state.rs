//! Per-sample path state.

use crate::{Color, Material, Seed, SurfaceRecord};
use lux_math::{geometry, Vec3};

/// Mutable record threaded through one sample's bounces and the shadow
/// probes spawned from them.
///
/// Owned by exactly one in-flight sample. `mask_color` starts at one and is
/// multiplied by each diffuse albedo; `accum_color` starts at zero and only
/// ever grows.
#[derive(Debug, Clone, Copy)]
pub struct PathState {
    /// Material at the last shading point
    pub material: Material,
    /// Shading normal at the last shading point
    pub normal: Vec3,
    /// Position of the last shading point
    pub position: Vec3,
    /// Product of albedos along the path so far
    pub mask_color: Color,
    /// Radiance gathered by this sample
    pub accum_color: Color,
    /// Set by occlusion queries when the probe reached an emitter
    pub hit: bool,
    /// Set when the bounce loop must stop (miss or emitter)
    pub done: bool,
    /// Random stream for this sample
    pub seed: Seed,
}

impl PathState {
    /// Fresh state for a camera sample.
    pub fn new(seed: Seed) -> Self {
        Self {
            material: Material::default(),
            normal: Vec3::ZERO,
            position: Vec3::ZERO,
            mask_color: Color::ONE,
            accum_color: Color::ZERO,
            hit: false,
            done: false,
            seed,
        }
    }

    /// Throwaway state for one shadow probe. Only `hit`, `material` and
    /// `seed` are read back.
    pub fn probe(seed: Seed) -> Self {
        Self::new(seed)
    }

    /// The radiance ray escaped the scene.
    pub fn record_miss(&mut self, background: Color) {
        self.accum_color += background * self.mask_color;
        self.done = true;
    }

    /// The radiance ray hit `surface` at `position`.
    ///
    /// Emitters fold their emission into the estimate and end the path.
    /// Diffuse hits become the new shading point with an interpolated normal.
    pub fn record_surface(&mut self, surface: &SurfaceRecord<'_>, position: Vec3) {
        let material = surface.material;
        if material.emit {
            self.accum_color += material.emitted() * self.mask_color;
            self.done = true;
            return;
        }

        self.material = *material;
        self.position = position;
        self.normal = geometry::interpolate_normal(position, &surface.positions, &surface.normals);
    }

    /// The shadow probe stopped on a surface with `material`.
    ///
    /// Only emitters count as a hit; any other surface yields no light.
    pub fn record_occluder(&mut self, material: &Material) {
        self.hit = material.emit;
        if self.hit {
            self.material = *material;
        }
    }

    /// The shadow probe escaped without touching anything.
    pub fn record_occlusion_miss(&mut self) {
        self.hit = false;
    }
}
