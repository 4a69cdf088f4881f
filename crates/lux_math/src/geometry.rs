//! Small geometric helpers shared by shading and sampling.

use crate::Vec3;

/// Barycentric weights `(u, v, w)` of `p` with respect to triangle `abc`,
/// so that `p = u*a + v*b + w*c` when `p` lies in the triangle's plane.
///
/// Solves the 2x2 system built from edge dot products. A zero-area triangle
/// makes the determinant zero and the weights come back as NaN/Inf.
pub fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let e0 = b - a;
    let e1 = c - a;
    let ep = p - a;

    let d00 = e0.dot(e0);
    let d01 = e0.dot(e1);
    let d11 = e1.dot(e1);
    let d20 = ep.dot(e0);
    let d21 = ep.dot(e1);

    let denom = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Vec3::new(1.0 - v - w, v, w)
}

/// Shading normal at `p`, interpolated from the triangle's vertex normals.
pub fn interpolate_normal(p: Vec3, positions: &[Vec3; 3], normals: &[Vec3; 3]) -> Vec3 {
    let bary = barycentric(p, positions[0], positions[1], positions[2]);
    (bary.x * normals[0] + bary.y * normals[1] + bary.z * normals[2]).normalize()
}

/// Flip `v` into the hemisphere around `n`.
#[inline]
pub fn face_forward(v: Vec3, n: Vec3) -> Vec3 {
    if v.dot(n) < 0.0 {
        -v
    } else {
        v
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `eta`
/// (incident over transmitted).
///
/// Returns `None` on total internal reflection.
pub fn refract(uv: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta * (uv + cos_theta * n);
    let k = 1.0 - r_out_perp.length_squared();
    if k < 0.0 {
        return None;
    }
    Some(r_out_perp - k.sqrt() * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn tri() -> [Vec3; 3] {
        [Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    #[test]
    fn test_barycentric_vertices_and_centroid() {
        let [a, b, c] = tri();

        assert!((barycentric(a, a, b, c) - Vec3::X).length() < EPS);
        assert!((barycentric(b, a, b, c) - Vec3::Y).length() < EPS);
        assert!((barycentric(c, a, b, c) - Vec3::Z).length() < EPS);

        let centroid = (a + b + c) / 3.0;
        assert!((barycentric(centroid, a, b, c) - Vec3::splat(1.0 / 3.0)).length() < EPS);
    }

    #[test]
    fn test_barycentric_degenerate_is_not_finite() {
        let a = Vec3::ZERO;
        let bary = barycentric(Vec3::new(0.5, 0.0, 0.0), a, Vec3::X, Vec3::X * 2.0);
        assert!(!bary.is_finite());
    }

    #[test]
    fn test_interpolate_normal_blends_vertices() {
        let positions = tri();
        let normals = [Vec3::Z, Vec3::Z, Vec3::X];

        // At vertex c only the third normal contributes
        let at_c = interpolate_normal(positions[2], &positions, &normals);
        assert!((at_c - Vec3::X).length() < EPS);

        // Halfway along a-c the normal is the normalized average
        let mid = interpolate_normal(Vec3::new(0.0, 0.5, 0.0), &positions, &normals);
        assert!((mid - (Vec3::Z + Vec3::X).normalize()).length() < EPS);
        assert!((mid.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_face_forward() {
        assert_eq!(face_forward(Vec3::NEG_Y, Vec3::Y), Vec3::Y);
        assert_eq!(face_forward(Vec3::X, Vec3::Y), Vec3::X);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        let out = refract(Vec3::NEG_Y, Vec3::Y, 1.0 / 1.5).unwrap();
        assert!((out - Vec3::NEG_Y).length() < EPS);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        let grazing = Vec3::new(1.0, -0.1, 0.0).normalize();
        assert!(refract(grazing, Vec3::Y, 1.5).is_none());
    }
}
