//! Bounding Volume Hierarchy over the triangles of a [`TriangleScene`].
//!
//! Nodes store triangle indices; the triangles themselves stay in the
//! scene's flat array.
//!
//! [`TriangleScene`]: crate::TriangleScene

use crate::Triangle;
use lux_math::{Aabb, Interval, Ray, Vec3};

/// Maximum triangles per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

pub(crate) enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of triangles.
    Leaf { triangles: Vec<u32>, bbox: Aabb },
    /// No geometry at all.
    Empty,
}

/// A triangle index and the ray parameter where it was hit.
pub(crate) type BvhHit = (u32, f32);

impl BvhNode {
    /// Build a hierarchy over every triangle in `triangles`.
    pub fn new(triangles: &[Triangle]) -> Self {
        if triangles.is_empty() {
            return BvhNode::Empty;
        }
        let boxes: Vec<Aabb> = triangles.iter().map(Triangle::bounding_box).collect();
        let indices = (0..triangles.len() as u32).collect();
        Self::build(indices, &boxes)
    }

    /// Median split on the longest axis of the centroid bounds.
    fn build(mut indices: Vec<u32>, boxes: &[Aabb]) -> Self {
        let bbox = indices
            .iter()
            .fold(Aabb::EMPTY, |acc, &i| Aabb::surrounding(&acc, &boxes[i as usize]));

        if indices.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                triangles: indices,
                bbox,
            };
        }

        let centroid_bounds = indices.iter().fold(Aabb::EMPTY, |acc, &i| {
            acc.include_point(boxes[i as usize].centroid())
        });
        let axis = centroid_bounds.longest_axis();

        indices.sort_unstable_by(|&a, &b| {
            let ca = boxes[a as usize].centroid()[axis];
            let cb = boxes[b as usize].centroid()[axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let right = indices.split_off(indices.len() / 2);

        BvhNode::Branch {
            left: Box::new(Self::build(indices, boxes)),
            right: Box::new(Self::build(right, boxes)),
            bbox,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    /// Number of levels, counting leaves; zero when empty.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Nearest hit within `ray_t`.
    pub fn closest_hit(
        &self,
        triangles: &[Triangle],
        ray: &Ray,
        inv_dir: Vec3,
        ray_t: Interval,
    ) -> Option<BvhHit> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { triangles: ids, bbox } => {
                if !bbox.hit(ray, inv_dir, ray_t) {
                    return None;
                }

                let mut closest: Option<BvhHit> = None;
                let mut range = ray_t;
                for &id in ids {
                    if let Some(t) = triangles[id as usize].intersect(ray, range) {
                        closest = Some((id, t));
                        range = range.clip_max(t);
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, inv_dir, ray_t) {
                    return None;
                }

                let hit_left = left.closest_hit(triangles, ray, inv_dir, ray_t);

                // Only check right up to closest hit
                let right_t = match hit_left {
                    Some((_, t)) => ray_t.clip_max(t),
                    None => ray_t,
                };
                right
                    .closest_hit(triangles, ray, inv_dir, right_t)
                    .or(hit_left)
            }
        }
    }

    /// First hit found within `ray_t`, in traversal order. Not necessarily
    /// the nearest.
    pub fn any_hit(
        &self,
        triangles: &[Triangle],
        ray: &Ray,
        inv_dir: Vec3,
        ray_t: Interval,
    ) -> Option<BvhHit> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { triangles: ids, bbox } => {
                if !bbox.hit(ray, inv_dir, ray_t) {
                    return None;
                }
                ids.iter().find_map(|&id| {
                    triangles[id as usize]
                        .intersect(ray, ray_t)
                        .map(|t| (id, t))
                })
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, inv_dir, ray_t) {
                    return None;
                }
                left.any_hit(triangles, ray, inv_dir, ray_t)
                    .or_else(|| right.any_hit(triangles, ray, inv_dir, ray_t))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit quads facing +Z, one per x offset, all at depth z.
    fn wall(count: usize, z: f32) -> Vec<Triangle> {
        (0..count)
            .map(|i| {
                let x = i as f32;
                Triangle::flat(
                    [
                        Vec3::new(x - 0.5, -0.5, z),
                        Vec3::new(x + 0.5, -0.5, z),
                        Vec3::new(x, 0.5, z),
                    ],
                    0,
                )
            })
            .collect()
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::new(&[]);
        assert!(matches!(bvh, BvhNode::Empty));
        assert_eq!(bvh.depth(), 0);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(bvh
            .closest_hit(&[], &ray, ray.inv_direction(), Interval::from_epsilon(1e-3))
            .is_none());
    }

    #[test]
    fn test_bvh_single_leaf() {
        let tris = wall(3, -1.0);
        let bvh = BvhNode::new(&tris);
        assert!(matches!(bvh, BvhNode::Leaf { .. }));
    }

    #[test]
    fn test_bvh_closest_hit_picks_target() {
        let tris = wall(20, -5.0);
        let bvh = BvhNode::new(&tris);
        assert!(bvh.depth() > 1);

        let ray = Ray::new(Vec3::new(7.0, 0.0, 0.0), Vec3::NEG_Z);
        let (id, t) = bvh
            .closest_hit(&tris, &ray, ray.inv_direction(), Interval::from_epsilon(1e-3))
            .unwrap();

        assert_eq!(id, 7);
        assert!((t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_bvh_closest_hit_prefers_nearer_layer() {
        let mut tris = wall(8, -10.0);
        tris.extend(wall(8, -2.0));
        let bvh = BvhNode::new(&tris);

        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Z);
        let (id, t) = bvh
            .closest_hit(&tris, &ray, ray.inv_direction(), Interval::from_epsilon(1e-3))
            .unwrap();

        assert_eq!(id, 8 + 3);
        assert!((t - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_bvh_any_hit() {
        let tris = wall(20, -5.0);
        let bvh = BvhNode::new(&tris);
        let range = Interval::from_epsilon(1e-3);

        let ray = Ray::new(Vec3::new(12.0, 0.0, 0.0), Vec3::NEG_Z);
        assert_eq!(
            bvh.any_hit(&tris, &ray, ray.inv_direction(), range).map(|h| h.0),
            Some(12)
        );

        let up = Ray::new(Vec3::new(12.0, 0.0, 0.0), Vec3::Y);
        assert!(bvh.any_hit(&tris, &up, up.inv_direction(), range).is_none());
    }
}
