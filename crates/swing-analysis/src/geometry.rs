//! Pure vector math for joint angles.
//!
//! All angles are returned in degrees. Inputs are normalized image-plane
//! coordinates where y grows downward, so "vertical up" is `(0, -1)`.

use swing_models::Point2D;

/// Included angle at vertex `b` between rays `b->a` and `b->c`.
///
/// Returns `None` when either ray has zero length (adjacent point
/// coincides with the vertex). The cosine argument is clamped to
/// `[-1, 1]` because float error can push it marginally out of the
/// `acos` domain.
pub fn angle_abc(a: Point2D, b: Point2D, c: Point2D) -> Option<f64> {
    let u = (a.x - b.x, a.y - b.y);
    let v = (c.x - b.x, c.y - b.y);

    let nu = (u.0 * u.0 + u.1 * u.1).sqrt();
    let nv = (v.0 * v.0 + v.1 * v.1).sqrt();
    if nu == 0.0 || nv == 0.0 {
        return None;
    }

    let cos = ((u.0 * v.0 + u.1 * v.1) / (nu * nv)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Trunk lean: angle between the hip->shoulder vector and vertical up.
///
/// 0 degrees is a perfectly upright trunk; larger values mean more
/// lean. Returns `None` when shoulder and hip midpoints coincide.
pub fn trunk_lean_deg(shoulder_mid: Point2D, hip_mid: Point2D) -> Option<f64> {
    let u = (shoulder_mid.x - hip_mid.x, shoulder_mid.y - hip_mid.y);
    let nu = (u.0 * u.0 + u.1 * u.1).sqrt();
    if nu == 0.0 {
        return None;
    }

    // Vertical up in image space is (0, -1), so dot(u, up) = -u.y.
    let cos = (-u.1 / nu).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_abc(p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0)).unwrap();
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_straight_line_is_180() {
        let angle = angle_abc(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0)).unwrap();
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_angle() {
        let angle = angle_abc(p(1.0, 1.0), p(0.0, 0.0), p(0.5, 0.5)).unwrap();
        assert!(angle.abs() < 1e-6);
    }

    #[test]
    fn test_symmetry() {
        let a = p(0.3, 0.1);
        let b = p(0.5, 0.5);
        let c = p(0.8, 0.9);
        let lhs = angle_abc(a, b, c).unwrap();
        let rhs = angle_abc(c, b, a).unwrap();
        assert!((lhs - rhs).abs() < 1e-12);
    }

    #[test]
    fn test_range_for_non_degenerate_inputs() {
        let samples = [
            (p(0.1, 0.9), p(0.5, 0.5), p(0.9, 0.1)),
            (p(0.0, 0.0), p(0.5, 0.1), p(1.0, 0.0)),
            (p(0.2, 0.2), p(0.4, 0.9), p(0.6, 0.2)),
        ];
        for (a, b, c) in samples {
            let angle = angle_abc(a, b, c).unwrap();
            assert!((0.0..=180.0).contains(&angle), "angle out of range: {angle}");
        }
    }

    #[test]
    fn test_degenerate_ray_is_none() {
        let b = p(0.5, 0.5);
        assert!(angle_abc(b, b, p(0.7, 0.7)).is_none());
        assert!(angle_abc(p(0.7, 0.7), b, b).is_none());
    }

    #[test]
    fn test_trunk_lean_vertical_up_is_zero() {
        // Shoulder directly above hip (smaller y is higher).
        let lean = trunk_lean_deg(p(0.5, 0.2), p(0.5, 0.6)).unwrap();
        assert!(lean.abs() < 1e-9);
    }

    #[test]
    fn test_trunk_lean_vertical_down_is_180() {
        let lean = trunk_lean_deg(p(0.5, 0.8), p(0.5, 0.2)).unwrap();
        assert!((lean - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_trunk_lean_horizontal_is_90() {
        let lean = trunk_lean_deg(p(0.9, 0.5), p(0.3, 0.5)).unwrap();
        assert!((lean - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_trunk_lean_degenerate_is_none() {
        let mid = p(0.5, 0.5);
        assert!(trunk_lean_deg(mid, mid).is_none());
    }
}
