use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::Result;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveLocation, PathMeasure, Segment};

/// Handle length ratio for approximating a quarter circle with a cubic.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Curve-local arc length below which a split location counts as an
/// existing vertex.
const VERTEX_TOLERANCE: f64 = 1e-7;

/// An ordered sequence of segments joined by cubic curves.
///
/// An open path with `n` segments has `n - 1` curves; a closed path has `n`,
/// the last one running from the final segment back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Path {
    /// Creates a path from segments.
    #[must_use]
    pub fn new(segments: Vec<Segment>, closed: bool) -> Self {
        Self { segments, closed }
    }

    /// Creates a polygonal path (all handles zero).
    #[must_use]
    pub fn from_points(points: &[Point2], closed: bool) -> Self {
        let segments = points.iter().copied().map(Segment::corner).collect();
        Self { segments, closed }
    }

    /// Creates a closed circle from four cubic segments.
    ///
    /// Starts at the leftmost point and proceeds through the top (smaller
    /// y), right and bottom vertices, so normals point outwards.
    #[must_use]
    pub fn circle(center: Point2, radius: f64) -> Self {
        let k = KAPPA * radius;
        let segments = vec![
            Segment::new(
                center + Vector2::new(-radius, 0.0),
                Vector2::new(0.0, k),
                Vector2::new(0.0, -k),
            ),
            Segment::new(
                center + Vector2::new(0.0, -radius),
                Vector2::new(-k, 0.0),
                Vector2::new(k, 0.0),
            ),
            Segment::new(
                center + Vector2::new(radius, 0.0),
                Vector2::new(0.0, -k),
                Vector2::new(0.0, k),
            ),
            Segment::new(
                center + Vector2::new(0.0, radius),
                Vector2::new(k, 0.0),
                Vector2::new(-k, 0.0),
            ),
        ];
        Self::new(segments, true)
    }

    /// Creates a closed axis-aligned rectangle.
    ///
    /// Vertex order is bottom-left, top-left, top-right, bottom-right (with
    /// y growing downwards), matching the winding of [`Path::circle`].
    #[must_use]
    pub fn rectangle(min: Point2, max: Point2) -> Self {
        Self::from_points(
            &[
                Point2::new(min.x, max.y),
                Point2::new(min.x, min.y),
                Point2::new(max.x, min.y),
                Point2::new(max.x, max.y),
            ],
            true,
        )
    }

    /// Creates an open circular arc from `from` through `through` to `to`.
    ///
    /// The arc is split into pieces of at most 90°, each approximated by one
    /// cubic. Collinear input degenerates to a straight polyline through the
    /// three points.
    #[must_use]
    pub fn arc_through(from: Point2, through: Point2, to: Point2) -> Self {
        let a = through - from;
        let b = to - through;
        let cross = a.x * b.y - a.y * b.x;
        let Some(center) = circumcenter(from, through, to) else {
            return Self::from_points(&[from, through, to], false);
        };

        let radius = (from - center).norm();
        let angle_of = |p: Point2| (p.y - center.y).atan2(p.x - center.x);
        let start = angle_of(from);
        let mut sweep = angle_of(to) - start;
        if cross > 0.0 {
            if sweep <= 0.0 {
                sweep += TAU;
            }
        } else if sweep >= 0.0 {
            sweep -= TAU;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pieces = ((sweep.abs() / FRAC_PI_2).ceil() as usize).max(1);
        #[allow(clippy::cast_precision_loss)]
        let step = sweep / pieces as f64;
        let handle_len = radius * 4.0 / 3.0 * (step / 4.0).tan();

        let mut segments = Vec::with_capacity(pieces + 1);
        for i in 0..=pieces {
            #[allow(clippy::cast_precision_loss)]
            let angle = start + step * i as f64;
            let dir = Vector2::new(angle.cos(), angle.sin());
            let tangent = Vector2::new(-angle.sin(), angle.cos()) * handle_len;
            let point = if i == 0 {
                from
            } else if i == pieces {
                to
            } else {
                center + dir * radius
            };
            let handle_in = if i == 0 { Vector2::zeros() } else { -tangent };
            let handle_out = if i == pieces {
                Vector2::zeros()
            } else {
                tangent
            };
            segments.push(Segment::new(point, handle_in, handle_out));
        }
        Self::new(segments, false)
    }

    /// Number of curves between the segments.
    #[must_use]
    pub fn curve_count(&self) -> usize {
        let n = self.segments.len();
        if n == 0 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Returns curve `index`, if it exists.
    #[must_use]
    pub fn curve(&self, index: usize) -> Option<Curve> {
        if index >= self.curve_count() {
            return None;
        }
        let n = self.segments.len();
        Some(Curve::new(
            self.segments[index],
            self.segments[(index + 1) % n],
        ))
    }

    /// Returns all curves in path order.
    #[must_use]
    pub fn curves(&self) -> Vec<Curve> {
        (0..self.curve_count()).filter_map(|i| self.curve(i)).collect()
    }

    /// Total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.curves().iter().map(Curve::length).sum()
    }

    /// Builds an arc-length view for repeated lookups.
    #[must_use]
    pub fn measure(&self) -> PathMeasure {
        PathMeasure::new(self)
    }

    /// Arc length from the path start to segment `index`.
    #[must_use]
    pub fn segment_offset(&self, index: usize) -> f64 {
        self.curves().iter().take(index).map(Curve::length).sum()
    }

    /// Arc length from the path start to the segment located at `point`.
    ///
    /// Returns `None` if no segment lies within [`TOLERANCE`] of `point`.
    #[must_use]
    pub fn offset_of(&self, point: &Point2) -> Option<f64> {
        self.segments
            .iter()
            .position(|s| (s.point - point).norm() < TOLERANCE)
            .map(|index| self.segment_offset(index))
    }

    /// Resolves a path offset into a curve index and parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is out of range.
    pub fn location_at(&self, offset: f64) -> Result<CurveLocation> {
        self.measure().location_at(offset)
    }

    /// Unit normal at a path offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is out of range or the curve there is
    /// degenerate.
    pub fn normal_at(&self, offset: f64) -> Result<Vector2> {
        self.measure().normal_at(offset)
    }

    /// Position at a path offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is out of range.
    pub fn point_at(&self, offset: f64) -> Result<Point2> {
        self.measure().point_at(offset)
    }

    /// Inserts a new segment at `offset`, splitting the curve there.
    ///
    /// The path geometry is unchanged: the neighbouring handles are shortened
    /// to describe the two halves of the split curve. Returns the index of the
    /// new segment, or `None` if `offset` already coincides with a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is out of range.
    pub fn divide_at(&mut self, offset: f64) -> Result<Option<usize>> {
        let measure = self.measure();
        let loc = measure.location_at(offset)?;
        let curve = measure.curves()[loc.curve_index];

        if loc.offset < VERTEX_TOLERANCE || curve.length() - loc.offset < VERTEX_TOLERANCE {
            return Ok(None);
        }

        let (handle_out, middle, handle_in) = curve.split_at_time(loc.time);
        let n = self.segments.len();
        self.segments[loc.curve_index].handle_out = handle_out;
        self.segments[(loc.curve_index + 1) % n].handle_in = handle_in;

        let index = loc.curve_index + 1;
        self.segments.insert(index, middle);
        Ok(Some(index))
    }

    /// Moves every segment by `offset`.
    pub fn translate(&mut self, offset: Vector2) {
        for segment in &mut self.segments {
            segment.point += offset;
        }
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        let mut path = self.clone();
        path.translate(offset);
        path
    }

    /// Returns the path walked backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
            closed: self.closed,
        }
    }

    /// Resets every handle to zero, turning all curves into straight lines.
    pub fn clear_handles(&mut self) {
        for segment in &mut self.segments {
            segment.clear_handles();
        }
    }

    /// Returns `true` if no segment carries a handle.
    #[must_use]
    pub fn is_polygon(&self) -> bool {
        self.segments.iter().all(|s| !s.has_handles())
    }

    /// Segment positions, with the first one repeated at the end if the path is
    /// closed.
    #[must_use]
    pub fn ring_points(&self) -> Vec<Point2> {
        let mut points: Vec<Point2> = self.segments.iter().map(|s| s.point).collect();
        if self.closed {
            if let Some(first) = points.first().copied() {
                points.push(first);
            }
        }
        points
    }

    /// Approximates the path with a polyline of `steps_per_curve` chords per
    /// curve. Straight curves always contribute a single chord.
    #[must_use]
    pub fn flatten(&self, steps_per_curve: usize) -> Vec<Point2> {
        let steps = steps_per_curve.max(1);
        let mut points = Vec::new();
        if let Some(first) = self.segments.first() {
            points.push(first.point);
        }
        for curve in self.curves() {
            if curve.is_straight() {
                points.push(curve.segment2().point);
                continue;
            }
            for i in 1..=steps {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / steps as f64;
                points.push(curve.point_at_time(t));
            }
        }
        points
    }
}

/// Center of the circle through three points, or `None` if they are collinear.
fn circumcenter(a: Point2, b: Point2, c: Point2) -> Option<Point2> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < TOLERANCE {
        return None;
    }
    let a2 = a.coords.norm_squared();
    let b2 = b.coords.norm_squared();
    let c2 = c.coords.norm_squared();
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    Some(Point2::new(ux, uy))
}
