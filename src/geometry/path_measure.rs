use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveLocation, Path};

/// Read-only arc-length view of a [`Path`].
///
/// Measures every curve once and keeps the cumulative start offsets, so
/// repeated lookups by offset do not re-integrate the curves.
#[derive(Debug, Clone)]
pub struct PathMeasure {
    curves: Vec<Curve>,
    offsets: Vec<f64>,
    length: f64,
    closed: bool,
}

impl PathMeasure {
    /// Measures `path`.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        let curves = path.curves();
        let mut offsets = Vec::with_capacity(curves.len());
        let mut length = 0.0;
        for curve in &curves {
            offsets.push(length);
            length += curve.length();
        }
        Self {
            curves,
            offsets,
            length,
            closed: path.closed,
        }
    }

    /// Returns the measured curves in path order.
    #[must_use]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Returns the total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns whether the measured path is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Arc length from the path start to the start of curve `index`.
    ///
    /// Equals the total length for `index == curves().len()`.
    #[must_use]
    pub fn curve_offset(&self, index: usize) -> f64 {
        self.offsets.get(index).copied().unwrap_or(self.length)
    }

    /// Resolves a path offset into a curve location.
    ///
    /// On closed paths offsets wrap around the total length. An offset that
    /// falls exactly on a vertex resolves to the end of the earlier curve.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OffsetOutOfRange`] for non-finite offsets, for
    /// offsets outside `[0, length]` on open paths, and for paths without
    /// curves.
    pub fn location_at(&self, offset: f64) -> Result<CurveLocation> {
        let out_of_range = || GeometryError::OffsetOutOfRange {
            offset,
            length: self.length,
        };
        if !offset.is_finite() || self.curves.is_empty() {
            return Err(out_of_range().into());
        }

        let offset = if self.closed && self.length > TOLERANCE {
            let wrapped = offset.rem_euclid(self.length);
            // rem_euclid maps `length` itself onto the start.
            if (wrapped - self.length).abs() < TOLERANCE {
                0.0
            } else {
                wrapped
            }
        } else {
            offset
        };

        if offset < -TOLERANCE || offset > self.length + TOLERANCE {
            return Err(out_of_range().into());
        }

        let last = self.curves.len() - 1;
        for (index, curve) in self.curves.iter().enumerate() {
            let start = self.offsets[index];
            if offset <= start + curve.length() + TOLERANCE || index == last {
                let local = (offset - start).clamp(0.0, curve.length());
                return Ok(CurveLocation {
                    curve_index: index,
                    time: curve.time_at(local)?,
                    offset: local,
                });
            }
        }
        Err(out_of_range().into())
    }

    /// Position at a path offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset cannot be located.
    pub fn point_at(&self, offset: f64) -> Result<Point2> {
        let loc = self.location_at(offset)?;
        Ok(self.curves[loc.curve_index].point_at_time(loc.time))
    }

    /// Unit normal at a path offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset cannot be located or the curve there is
    /// degenerate.
    pub fn normal_at(&self, offset: f64) -> Result<Vector2> {
        let loc = self.location_at(offset)?;
        self.curves[loc.curve_index].normal_at_time(loc.time)
    }

    /// Average of the normals a small `epsilon` before and after `offset`.
    ///
    /// Smooths over the normal discontinuity at a vertex where the incoming
    /// and outgoing curves disagree. Only meaningful on closed paths, where
    /// both sides of every vertex exist. Returns `None` if the averaged
    /// normal vanishes (a cusp).
    ///
    /// # Errors
    ///
    /// Returns an error if either side cannot be evaluated.
    pub fn averaged_normal_at(&self, offset: f64, epsilon: f64) -> Result<Option<Vector2>> {
        let mut left_offset = offset - epsilon;
        if left_offset < 0.0 {
            left_offset += self.length;
        }
        let left = self.normal_at(left_offset)?;
        let right = self.normal_at(offset + epsilon)?;
        let sum = left + right;
        if sum.norm() < TOLERANCE {
            Ok(None)
        } else {
            Ok(Some(sum.normalize()))
        }
    }
}
