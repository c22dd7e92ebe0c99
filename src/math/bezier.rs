//! Cubic Bézier utilities.
//!
//! Control points are passed as `[p0, c1, c2, p3]` with absolute handle
//! positions. Arc lengths are computed by Gauss-Legendre quadrature of
//! `|B'(t)|`, and inverted by bisection on that length.
use std::sync::OnceLock;

use gauss_quad::GaussLegendre;

use super::{Point2, Vector2};

/// Absolute control points of a cubic Bézier.
pub type CubicPoints = [Point2; 4];

/// Quadrature degree used for arc-length integration.
const QUADRATURE_DEGREE: usize = 16;

/// Upper bound on bisection steps when inverting arc length.
const MAX_BISECTION_STEPS: usize = 64;

/// Relative length tolerance for the arc-length inversion.
const LENGTH_TOLERANCE: f64 = 1e-9;

/// Chords summed when no quadrature rule is available.
const CHORD_STEPS: usize = 256;

/// The shared Gauss-Legendre rule, or `None` if it could not be built.
fn quadrature() -> Option<&'static GaussLegendre> {
    static GAUSS: OnceLock<Option<GaussLegendre>> = OnceLock::new();
    GAUSS
        .get_or_init(|| GaussLegendre::new(QUADRATURE_DEGREE).ok())
        .as_ref()
}

/// Arc length over `[0, t]` as a sum of chords.
fn chord_length_to(c: &CubicPoints, t: f64) -> f64 {
    let mut prev = c[0];
    let mut total = 0.0;
    for i in 1..=CHORD_STEPS {
        #[allow(clippy::cast_precision_loss)]
        let next = point_at(c, t * i as f64 / CHORD_STEPS as f64);
        total += (next - prev).norm();
        prev = next;
    }
    total
}

/// Evaluates the curve position at parameter `t`.
#[must_use]
pub fn point_at(c: &CubicPoints, t: f64) -> Point2 {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let d = 3.0 * mt * t * t;
    let e = t * t * t;
    Point2::from(c[0].coords * a + c[1].coords * b + c[2].coords * d + c[3].coords * e)
}

/// Evaluates the first derivative `B'(t)`.
#[must_use]
pub fn derivative_at(c: &CubicPoints, t: f64) -> Vector2 {
    let mt = 1.0 - t;
    (c[1] - c[0]) * (3.0 * mt * mt) + (c[2] - c[1]) * (6.0 * mt * t) + (c[3] - c[2]) * (3.0 * t * t)
}

/// Arc length of the curve over `[0, t]`.
///
/// Falls back to a chord sum if the quadrature rule is unavailable.
#[must_use]
pub fn length_to(c: &CubicPoints, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let t = t.min(1.0);
    match quadrature() {
        Some(gauss) => gauss.integrate(0.0, t, |x| derivative_at(c, x).norm()),
        None => chord_length_to(c, t),
    }
}

/// Total arc length of the curve.
#[must_use]
pub fn length(c: &CubicPoints) -> f64 {
    length_to(c, 1.0)
}

/// Finds the parameter at which the arc length from the start equals `target`.
///
/// `total` must be the full length of the curve. Targets outside
/// `[0, total]` clamp to the curve ends.
#[must_use]
pub fn time_at_length(c: &CubicPoints, target: f64, total: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    if target >= total {
        return 1.0;
    }

    let tolerance = LENGTH_TOLERANCE * total.max(1.0);
    let mut start = (0.0, 0.0);
    let mut end = (1.0, total);

    for _ in 0..MAX_BISECTION_STEPS {
        if end.1 - start.1 <= tolerance {
            break;
        }
        let middle = (start.0 + end.0) * 0.5;
        let mid = (middle, length_to(c, middle));
        if mid.1 > target {
            end = mid;
        } else {
            start = mid;
        }
    }

    // Linear interpolation inside the final bracket.
    let span = end.1 - start.1;
    if span <= f64::EPSILON {
        (start.0 + end.0) * 0.5
    } else {
        start.0 + (end.0 - start.0) * (target - start.1) / span
    }
}

/// Splits the curve at `t` by de Casteljau subdivision.
#[must_use]
pub fn split(c: &CubicPoints, t: f64) -> (CubicPoints, CubicPoints) {
    let lerp = |a: &Point2, b: &Point2| Point2::from(a.coords + (b - a) * t);
    let p01 = lerp(&c[0], &c[1]);
    let p12 = lerp(&c[1], &c[2]);
    let p23 = lerp(&c[2], &c[3]);
    let p012 = lerp(&p01, &p12);
    let p123 = lerp(&p12, &p23);
    let mid = lerp(&p012, &p123);
    ([c[0], p01, p012, mid], [mid, p123, p23, c[3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Quarter of a unit circle from (1, 0) to (0, 1).
    fn quarter_circle() -> CubicPoints {
        let k = 0.552_284_749_830_793_4;
        [
            Point2::new(1.0, 0.0),
            Point2::new(1.0, k),
            Point2::new(k, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn endpoints_are_interpolated() {
        let c = quarter_circle();
        assert_relative_eq!(point_at(&c, 0.0), c[0]);
        assert_relative_eq!(point_at(&c, 1.0), c[3]);
    }

    #[test]
    fn quarter_circle_length() {
        let len = length(&quarter_circle());
        assert_relative_eq!(len, std::f64::consts::FRAC_PI_2, epsilon = 1e-3);
    }

    #[test]
    fn quadrature_rule_is_available() {
        assert!(quadrature().is_some());
    }

    #[test]
    fn chord_sum_agrees_with_quadrature() {
        let c = quarter_circle();
        assert_relative_eq!(chord_length_to(&c, 1.0), length(&c), epsilon = 1e-4);
        assert_relative_eq!(chord_length_to(&c, 0.4), length_to(&c, 0.4), epsilon = 1e-4);
    }

    #[test]
    fn straight_cubic_length_matches_chord() {
        let c = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ];
        assert_relative_eq!(length(&c), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn time_at_length_inverts_length() {
        let c = quarter_circle();
        let total = length(&c);
        for target in [0.1, 0.5, 1.0, 1.5] {
            let t = time_at_length(&c, target, total);
            assert_relative_eq!(length_to(&c, t), target, epsilon = 1e-6);
        }
    }

    #[test]
    fn time_at_length_clamps() {
        let c = quarter_circle();
        let total = length(&c);
        assert!(time_at_length(&c, -1.0, total).abs() < f64::EPSILON);
        assert!((time_at_length(&c, total + 1.0, total) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn split_preserves_geometry() {
        let c = quarter_circle();
        let (left, right) = split(&c, 0.3);
        assert_relative_eq!(left[3], point_at(&c, 0.3), epsilon = 1e-12);
        assert_relative_eq!(point_at(&left, 0.5), point_at(&c, 0.15), epsilon = 1e-12);
        assert_relative_eq!(point_at(&right, 0.5), point_at(&c, 0.65), epsilon = 1e-12);
    }
}
