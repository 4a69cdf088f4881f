//! BVH-backed triangle scene implementing [`SceneQuery`].

use crate::bvh::{BvhHit, BvhNode};
use crate::{Color, Material, PathState, RenderError, RenderResult, SceneQuery, SurfaceRecord, Triangle};
use lux_math::{Aabb, Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// How shadow probes decide which surface they stopped on.
///
/// Either way, only an emitter counts as a light hit; anything else yields
/// no direct light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowPolicy {
    /// Stop at the first triangle found in traversal order. Cheapest, but a
    /// light behind an occluder can be found before the occluder.
    #[default]
    FirstHit,
    /// Use the nearest triangle, so opaque surfaces always block lights
    /// behind them.
    Nearest,
}

/// Index of a material registered with a [`SceneBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Collects materials and triangles, then builds a [`TriangleScene`].
#[derive(Default)]
pub struct SceneBuilder {
    materials: Vec<Material>,
    triangles: Vec<Triangle>,
    background: Color,
    shadow_policy: ShadowPolicy,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Radiance returned by rays that leave the scene.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_shadow_policy(mut self, policy: ShadowPolicy) -> Self {
        self.shadow_policy = policy;
        self
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() as u32 - 1)
    }

    /// Add a flat-shaded triangle (counter-clockwise winding faces the
    /// normal).
    pub fn add_triangle(&mut self, positions: [Vec3; 3], material: MaterialId) {
        self.triangles.push(Triangle::flat(positions, material.0));
    }

    /// Add a triangle with explicit vertex normals.
    pub fn add_smooth_triangle(&mut self, positions: [Vec3; 3], normals: [Vec3; 3], material: MaterialId) {
        self.triangles.push(Triangle::new(positions, normals, material.0));
    }

    /// Add a flat quad `a b c d` (counter-clockwise) as two triangles.
    pub fn add_quad(&mut self, corners: [Vec3; 4], material: MaterialId) {
        let [a, b, c, d] = corners;
        self.add_triangle([a, b, c], material);
        self.add_triangle([a, c, d], material);
    }

    /// Validate material references and build the BVH.
    pub fn build(self) -> RenderResult<TriangleScene> {
        for (index, tri) in self.triangles.iter().enumerate() {
            if tri.material as usize >= self.materials.len() {
                return Err(RenderError::UnknownMaterial {
                    triangle: index,
                    material: tri.material,
                });
            }
        }

        let degenerate = self
            .triangles
            .iter()
            .filter(|t| t.doubled_area() <= f32::EPSILON)
            .count();
        if degenerate > 0 {
            log::warn!("Scene has {} zero-area triangles; their normals will be NaN", degenerate);
        }

        let bvh = BvhNode::new(&self.triangles);
        let emitters = self
            .triangles
            .iter()
            .filter(|t| self.materials[t.material as usize].emit)
            .count();

        log::info!(
            "Built triangle scene: {} triangles ({} emissive), {} materials, BVH depth {}",
            self.triangles.len(),
            emitters,
            self.materials.len(),
            bvh.depth()
        );

        Ok(TriangleScene {
            materials: self.materials,
            triangles: self.triangles,
            bvh,
            background: self.background,
            shadow_policy: self.shadow_policy,
        })
    }
}

/// Immutable triangle soup with a BVH, ready to be shared across render
/// threads.
pub struct TriangleScene {
    materials: Vec<Material>,
    triangles: Vec<Triangle>,
    bvh: BvhNode,
    background: Color,
    shadow_policy: ShadowPolicy,
}

impl TriangleScene {
    /// A scene with no geometry; every ray sees `background`.
    pub fn empty(background: Color) -> Self {
        Self {
            materials: Vec::new(),
            triangles: Vec::new(),
            bvh: BvhNode::Empty,
            background,
            shadow_policy: ShadowPolicy::default(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn shadow_policy(&self) -> ShadowPolicy {
        self.shadow_policy
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bvh.bounding_box()
    }

    fn surface(&self, id: u32) -> SurfaceRecord<'_> {
        let tri = &self.triangles[id as usize];
        SurfaceRecord {
            positions: tri.positions,
            normals: tri.normals,
            material: &self.materials[tri.material as usize],
        }
    }
}

impl SceneQuery for TriangleScene {
    fn query_radiance(&self, ray: &Ray, ray_t: Interval, state: &mut PathState) {
        match self
            .bvh
            .closest_hit(&self.triangles, ray, ray.inv_direction(), ray_t)
        {
            Some((id, t)) => state.record_surface(&self.surface(id), ray.at(t)),
            None => state.record_miss(self.background),
        }
    }

    fn query_occlusion(&self, ray: &Ray, ray_t: Interval, state: &mut PathState) {
        let inv_dir = ray.inv_direction();
        let hit: Option<BvhHit> = match self.shadow_policy {
            ShadowPolicy::FirstHit => self.bvh.any_hit(&self.triangles, ray, inv_dir, ray_t),
            ShadowPolicy::Nearest => self.bvh.closest_hit(&self.triangles, ray, inv_dir, ray_t),
        };

        match hit {
            Some((id, _)) => {
                let tri = &self.triangles[id as usize];
                state.record_occluder(&self.materials[tri.material as usize]);
            }
            None => state.record_occlusion_miss(),
        }
    }
}
