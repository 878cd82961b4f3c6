use nalgebra::Vector3;

use crate::cfg::UP;

/// Pre: `primary` and `secondary` are not parallel (otherwise the axis is zero).
/// Post: returns `-1.0`, `0.0` or `1.0`, the sign of the projection of `point`
/// onto `primary × secondary`. Exact zero is returned as `0.0`; callers choose
/// the tie policy.
pub fn sign_of_point_on_axis(
    point: Vector3<f64>,
    primary: Vector3<f64>,
    secondary: Vector3<f64>,
) -> f64 {
    let d = primary.cross(&secondary).dot(&point);
    if d > 0.0 {
        1.0
    } else if d < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Pre: none (a zero-length segment collapses to `start`).
/// Post: the point of segment `[start, end]` closest to `point`.
pub fn closest_point_on_segment(
    point: Vector3<f64>,
    start: Vector3<f64>,
    end: Vector3<f64>,
) -> Vector3<f64> {
    let dir = end - start;
    let len2 = dir.norm_squared();
    if len2 <= 0.0 {
        return start;
    }
    let t = (point - start).dot(&dir) / len2;
    if t <= 0.0 {
        start
    } else if t >= 1.0 {
        end
    } else {
        start + dir * t
    }
}

/// Signed turn angle from `incoming` to `outgoing`, seen from above (`UP`).
///
/// Positive values turn clockwise (to the right), negative values turn
/// counter-clockwise. A straight continuation is `0`, a full reversal `±π`.
pub fn clockwise_turn(incoming: Vector3<f64>, outgoing: Vector3<f64>) -> f64 {
    let s = outgoing.cross(&incoming).dot(&UP);
    let c = incoming.dot(&outgoing);
    s.atan2(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn sign_marks_right_hand_side_positive() {
        // Heading east: south is to the right, north to the left.
        let east = vector![1.0, 0.0, 0.0];
        assert_eq!(sign_of_point_on_axis(vector![0.5, -1.0, 0.0], east, UP), 1.0);
        assert_eq!(sign_of_point_on_axis(vector![0.5, 1.0, 0.0], east, UP), -1.0);
        assert_eq!(sign_of_point_on_axis(vector![3.0, 0.0, 0.0], east, UP), 0.0);
    }

    #[test]
    fn sign_ignores_height() {
        let north = vector![0.0, 1.0, 0.0];
        assert_eq!(sign_of_point_on_axis(vector![2.0, 0.3, 9.0], north, UP), 1.0);
        assert_eq!(sign_of_point_on_axis(vector![-2.0, 0.3, -9.0], north, UP), -1.0);
    }

    #[test]
    fn closest_point_clamps_to_endpoints() {
        let a = vector![0.0, 0.0, 0.0];
        let b = vector![2.0, 0.0, 0.0];
        assert_eq!(closest_point_on_segment(vector![-1.0, 1.0, 0.0], a, b), a);
        assert_eq!(closest_point_on_segment(vector![5.0, -1.0, 0.0], a, b), b);
        let mid = closest_point_on_segment(vector![0.5, 3.0, 0.0], a, b);
        assert!((mid - vector![0.5, 0.0, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn closest_point_on_degenerate_segment_is_start() {
        let a = vector![1.0, 1.0, 0.0];
        assert_eq!(closest_point_on_segment(vector![4.0, 0.0, 0.0], a, a), a);
    }

    #[test]
    fn closest_point_randomized_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let a = vector![rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), 0.0];
            let b = vector![rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), 0.0];
            let p = vector![rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), 0.0];
            let q = closest_point_on_segment(p, a, b);
            let d = (p - q).norm();
            // No sampled point of the segment is closer than the projection.
            for k in 0..=20 {
                let s = a + (b - a) * (k as f64 / 20.0);
                assert!(d <= (p - s).norm() + 1e-9);
            }
        }
    }

    #[test]
    fn turn_signs() {
        let east = vector![1.0, 0.0, 0.0];
        let th = std::f64::consts::FRAC_PI_2;
        assert!((clockwise_turn(east, vector![0.0, -1.0, 0.0]) - th).abs() < 1e-12);
        assert!((clockwise_turn(east, vector![0.0, 1.0, 0.0]) + th).abs() < 1e-12);
        assert!(clockwise_turn(east, east).abs() < 1e-12);
        let back = clockwise_turn(east, -east);
        assert!((back.abs() - std::f64::consts::PI).abs() < 1e-12);
    }
}
