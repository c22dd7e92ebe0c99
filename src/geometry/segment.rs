use crate::math::{Point2, Vector2, TOLERANCE};

/// A path vertex with Bézier handles.
///
/// Handles are stored relative to `point`. A zero handle means the adjacent
/// curve leaves (or enters) the vertex without curvature on that side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub point: Point2,
    pub handle_in: Vector2,
    pub handle_out: Vector2,
}

impl Segment {
    /// Creates a new segment with the given relative handles.
    #[must_use]
    pub fn new(point: Point2, handle_in: Vector2, handle_out: Vector2) -> Self {
        Self {
            point,
            handle_in,
            handle_out,
        }
    }

    /// Creates a sharp vertex (both handles zero).
    #[must_use]
    pub fn corner(point: Point2) -> Self {
        Self::new(point, Vector2::zeros(), Vector2::zeros())
    }

    /// Returns `true` if either handle is non-zero.
    #[must_use]
    pub fn has_handles(&self) -> bool {
        self.handle_in.norm() > TOLERANCE || self.handle_out.norm() > TOLERANCE
    }

    /// Resets both handles to zero.
    pub fn clear_handles(&mut self) {
        self.handle_in = Vector2::zeros();
        self.handle_out = Vector2::zeros();
    }

    /// Returns a copy moved by `offset`. Handles are relative, so they are unchanged.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self {
            point: self.point + offset,
            ..*self
        }
    }

    /// Returns a copy with `handle_in` and `handle_out` swapped, for walking
    /// the owning path backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.point, self.handle_out, self.handle_in)
    }
}

impl From<Point2> for Segment {
    fn from(point: Point2) -> Self {
        Self::corner(point)
    }
}
