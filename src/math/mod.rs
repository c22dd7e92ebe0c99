pub mod bezier;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Rotates `v` by -90°: `(x, y) -> (y, -x)`.
///
/// Applied to a tangent this yields the path normal. In y-down screen
/// space that is the left-hand side of the walking direction.
#[must_use]
pub fn perpendicular(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// Returns `v / |v|`, or the zero vector if `v` is (near) zero-length.
#[must_use]
pub fn normalize_or_zero(v: Vector2) -> Vector2 {
    let len = v.norm();
    if len < TOLERANCE {
        Vector2::zeros()
    } else {
        v / len
    }
}

/// Unsigned angle between two vectors in radians, in `[0, π]`.
///
/// Returns `0.0` when either vector is zero-length.
#[must_use]
pub fn angle_between(a: Vector2, b: Vector2) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < TOLERANCE {
        return 0.0;
    }
    (a.dot(&b) / denom).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn perpendicular_rotates_clockwise_in_math_space() {
        let n = perpendicular(Vector2::new(1.0, 0.0));
        assert_relative_eq!(n.x, 0.0);
        assert_relative_eq!(n.y, -1.0);
    }

    #[test]
    fn angle_between_right_angle() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 3.0);
        assert_relative_eq!(angle_between(a, b), FRAC_PI_2);
    }

    #[test]
    fn angle_between_opposite() {
        let a = Vector2::new(2.0, 0.0);
        let b = Vector2::new(-1.0, 0.0);
        assert_relative_eq!(angle_between(a, b), PI);
    }

    #[test]
    fn angle_between_zero_vector() {
        assert!(angle_between(Vector2::zeros(), Vector2::new(1.0, 0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_or_zero_handles_zero() {
        assert_eq!(normalize_or_zero(Vector2::zeros()), Vector2::zeros());
        let n = normalize_or_zero(Vector2::new(3.0, 4.0));
        assert_relative_eq!(n.norm(), 1.0);
    }
}
