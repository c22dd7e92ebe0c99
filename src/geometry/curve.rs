use crate::error::{GeometryError, Result};
use crate::math::bezier::{self, CubicPoints};
use crate::math::{perpendicular, Point2, Vector2, TOLERANCE};

use super::Segment;

/// A position on a path, expressed per curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveLocation {
    /// Index of the curve within its path.
    pub curve_index: usize,
    /// Curve parameter in `[0, 1]`.
    pub time: f64,
    /// Arc length from the start of the curve.
    pub offset: f64,
}

/// One cubic segment of a path, between `segment1` and `segment2`.
///
/// Curves are value snapshots: the arc length is computed once on
/// construction. A curve whose facing handles are both zero is straight and
/// is parameterized linearly, so `time` and arc length agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    segment1: Segment,
    segment2: Segment,
    length: f64,
}

impl Curve {
    /// Creates the curve running from `segment1` to `segment2`.
    #[must_use]
    pub fn new(segment1: Segment, segment2: Segment) -> Self {
        let mut curve = Self {
            segment1,
            segment2,
            length: 0.0,
        };
        curve.length = if curve.is_straight() {
            (segment2.point - segment1.point).norm()
        } else {
            bezier::length(&curve.points())
        };
        curve
    }

    /// Returns the start vertex.
    #[must_use]
    pub fn segment1(&self) -> &Segment {
        &self.segment1
    }

    /// Returns the end vertex.
    #[must_use]
    pub fn segment2(&self) -> &Segment {
        &self.segment2
    }

    /// Returns the arc length of the curve.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the absolute control points `[p0, c1, c2, p3]`.
    #[must_use]
    pub fn points(&self) -> CubicPoints {
        [
            self.segment1.point,
            self.segment1.point + self.segment1.handle_out,
            self.segment2.point + self.segment2.handle_in,
            self.segment2.point,
        ]
    }

    /// Returns `true` if both facing handles are zero.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        self.segment1.handle_out.norm() < TOLERANCE && self.segment2.handle_in.norm() < TOLERANCE
    }

    /// Converts an arc-length offset from the curve start into a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OffsetOutOfRange`] if `offset` is not finite
    /// or lies outside `[0, length]` (beyond [`TOLERANCE`]).
    pub fn time_at(&self, offset: f64) -> Result<f64> {
        if !offset.is_finite() || offset < -TOLERANCE || offset > self.length + TOLERANCE {
            return Err(GeometryError::OffsetOutOfRange {
                offset,
                length: self.length,
            }
            .into());
        }
        if self.length < TOLERANCE {
            return Ok(0.0);
        }
        if self.is_straight() {
            return Ok((offset / self.length).clamp(0.0, 1.0));
        }
        Ok(bezier::time_at_length(&self.points(), offset, self.length))
    }

    /// Evaluates the position at parameter `t`.
    #[must_use]
    pub fn point_at_time(&self, t: f64) -> Point2 {
        if self.is_straight() {
            let p0 = self.segment1.point;
            return p0 + (self.segment2.point - p0) * t;
        }
        bezier::point_at(&self.points(), t)
    }

    /// Evaluates the derivative with respect to `t`.
    #[must_use]
    pub fn derivative_at_time(&self, t: f64) -> Vector2 {
        if self.is_straight() {
            return self.segment2.point - self.segment1.point;
        }
        bezier::derivative_at(&self.points(), t)
    }

    /// Unit tangent at parameter `t`.
    ///
    /// Where the derivative vanishes (a zero handle at an end point) the
    /// direction towards the next distinct control point is used instead.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if all control points coincide.
    pub fn tangent_at_time(&self, t: f64) -> Result<Vector2> {
        let d = self.derivative_at_time(t);
        if d.norm() > TOLERANCE {
            return Ok(d.normalize());
        }
        let c = self.points();
        let fallbacks = if t < 0.5 {
            [c[2] - c[0], c[3] - c[0]]
        } else {
            [c[3] - c[1], c[3] - c[0]]
        };
        fallbacks
            .into_iter()
            .find(|v| v.norm() > TOLERANCE)
            .map(|v| v.normalize())
            .ok_or_else(|| GeometryError::Degenerate("zero-length curve has no tangent".into()).into())
    }

    /// Unit normal at parameter `t` (the tangent rotated by -90°).
    ///
    /// # Errors
    ///
    /// Returns an error if the tangent is degenerate.
    pub fn normal_at_time(&self, t: f64) -> Result<Vector2> {
        Ok(perpendicular(self.tangent_at_time(t)?))
    }

    /// Position at an arc-length offset from the curve start.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is out of range.
    pub fn point_at(&self, offset: f64) -> Result<Point2> {
        Ok(self.point_at_time(self.time_at(offset)?))
    }

    /// Unit tangent at an arc-length offset from the curve start.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is out of range or the tangent is degenerate.
    pub fn tangent_at(&self, offset: f64) -> Result<Vector2> {
        self.tangent_at_time(self.time_at(offset)?)
    }

    /// Unit normal at an arc-length offset from the curve start.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is out of range or the tangent is degenerate.
    pub fn normal_at(&self, offset: f64) -> Result<Vector2> {
        self.normal_at_time(self.time_at(offset)?)
    }

    /// Handles of the sub-curve between `t0` and `t1`.
    ///
    /// Returns `(handle_out at t0, handle_in at t1)`, relative to the points
    /// at those parameters. Straight curves yield zero handles.
    #[must_use]
    pub fn sub_curve_handles(&self, t0: f64, t1: f64) -> (Vector2, Vector2) {
        if self.is_straight() {
            return (Vector2::zeros(), Vector2::zeros());
        }
        let scale = (t1 - t0) / 3.0;
        (
            self.derivative_at_time(t0) * scale,
            -self.derivative_at_time(t1) * scale,
        )
    }

    /// Splits the curve at parameter `t`.
    ///
    /// Returns the shortened `handle_out` for `segment1`, the new middle
    /// segment, and the shortened `handle_in` for `segment2`.
    #[must_use]
    pub fn split_at_time(&self, t: f64) -> (Vector2, Segment, Vector2) {
        if self.is_straight() {
            return (
                Vector2::zeros(),
                Segment::corner(self.point_at_time(t)),
                Vector2::zeros(),
            );
        }
        let (left, right) = bezier::split(&self.points(), t);
        let mid = left[3];
        (
            left[1] - left[0],
            Segment::new(mid, left[2] - mid, right[1] - mid),
            right[2] - right[3],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve {
        Curve::new(
            Segment::corner(Point2::new(x0, y0)),
            Segment::corner(Point2::new(x1, y1)),
        )
    }

    fn quarter_arc() -> Curve {
        // Unit quarter circle from (1, 0) to (0, 1).
        let k = 0.552_284_749_830_793_4;
        Curve::new(
            Segment::new(Point2::new(1.0, 0.0), Vector2::zeros(), Vector2::new(0.0, k)),
            Segment::new(Point2::new(0.0, 1.0), Vector2::new(k, 0.0), Vector2::zeros()),
        )
    }

    #[test]
    fn straight_line_length_3_4_5() {
        let c = line(0.0, 0.0, 3.0, 4.0);
        assert!(c.is_straight());
        assert_relative_eq!(c.length(), 5.0);
    }

    #[test]
    fn straight_line_is_arc_length_parameterized() {
        let c = line(0.0, 0.0, 10.0, 0.0);
        let p = c.point_at(2.5).unwrap();
        assert_relative_eq!(p, Point2::new(2.5, 0.0));
    }

    #[test]
    fn line_normal_is_clockwise_perpendicular() {
        let c = line(0.0, 0.0, 10.0, 0.0);
        let n = c.normal_at(5.0).unwrap();
        assert_relative_eq!(n, Vector2::new(0.0, -1.0));
    }

    #[test]
    fn offset_out_of_range_fails() {
        let c = line(0.0, 0.0, 1.0, 0.0);
        assert!(c.time_at(2.0).is_err());
        assert!(c.time_at(-0.5).is_err());
        assert!(c.time_at(f64::NAN).is_err());
    }

    #[test]
    fn zero_length_curve_has_no_normal() {
        let c = line(1.0, 1.0, 1.0, 1.0);
        assert!(c.length().abs() < f64::EPSILON);
        assert!(c.normal_at(0.0).is_err());
    }

    #[test]
    fn quarter_arc_midpoint() {
        let c = quarter_arc();
        let p = c.point_at(c.length() * 0.5).unwrap();
        let expected = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(p.x, expected, epsilon = 1e-3);
        assert_relative_eq!(p.y, expected, epsilon = 1e-3);
    }

    #[test]
    fn zero_handle_tangent_falls_back_to_control_polygon() {
        // Handle only on the far end: B'(0) vanishes.
        let c = Curve::new(
            Segment::corner(Point2::new(0.0, 0.0)),
            Segment::new(Point2::new(10.0, 0.0), Vector2::new(0.0, 5.0), Vector2::zeros()),
        );
        let t = c.tangent_at_time(0.0).unwrap();
        let expected = Vector2::new(10.0, 5.0).normalize();
        assert_relative_eq!(t, expected);
    }

    #[test]
    fn split_keeps_midpoint_on_curve() {
        let c = quarter_arc();
        let (out1, mid, in2) = c.split_at_time(0.5);
        assert_relative_eq!(mid.point, c.point_at_time(0.5), epsilon = 1e-12);
        let left = Curve::new(
            Segment::new(c.segment1().point, Vector2::zeros(), out1),
            mid,
        );
        let right = Curve::new(
            mid,
            Segment::new(c.segment2().point, in2, Vector2::zeros()),
        );
        assert_relative_eq!(left.length() + right.length(), c.length(), epsilon = 1e-9);
    }

    #[test]
    fn sub_curve_handles_reproduce_split() {
        let c = quarter_arc();
        let (out, _) = c.sub_curve_handles(0.0, 0.5);
        let (split_out, _, _) = c.split_at_time(0.5);
        assert_relative_eq!(out, split_out, epsilon = 1e-12);
    }
}
