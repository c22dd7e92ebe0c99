use tracing::{debug, warn};

use crate::error::{Result, SamplingError};
use crate::geometry::{CompoundPath, FillRule, Group, Item, Path, Segment};
use crate::math::{angle_between, normalize_or_zero, TOLERANCE};
use crate::sampling::Sample;

use super::StrokeOptions;

/// Builds fixed-width stroke outlines from paths.
///
/// Every path leaf of the input is resampled, and each sample is copied
/// twice: once verbatim into the *inner* contour, once translated along its
/// normal by the stroke thickness into the *outer* contour. At the original
/// vertices of closed paths the thickness is scaled by `1 / cos(θ / 2)`,
/// where `θ` is the angle between the neighbouring sample normals, so that
/// sharp corners keep their width.
///
/// - Closed paths become an even-odd [`CompoundPath`] of the outer and inner
///   contours (a ring).
/// - Open paths become a single closed, handle-free polygon: the outer
///   contour followed by the inner contour reversed.
#[derive(Debug, Clone)]
pub struct FixedWidthStroke {
    options: StrokeOptions,
}

impl FixedWidthStroke {
    /// Creates a new stroke operation.
    #[must_use]
    pub fn new(options: StrokeOptions) -> Self {
        Self { options }
    }

    /// Returns the stroke options.
    #[must_use]
    pub fn options(&self) -> &StrokeOptions {
        &self.options
    }

    /// Strokes every path in `item`, returning one shape per path.
    ///
    /// Paths that cannot be sampled (no curves, or every sample failed) are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn execute(&self, item: &Item) -> Result<Group> {
        self.options.validate()?;

        let mut children = Vec::new();
        for (index, path) in item.paths().into_iter().enumerate() {
            match self.build(path) {
                Ok(shape) => children.push(shape),
                Err(err) => warn!(path = index, error = %err, "skipping path"),
            }
        }
        Ok(Group::new(children))
    }

    /// Strokes a single path.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the path yields no
    /// samples.
    pub fn stroke_path(&self, path: &Path) -> Result<Item> {
        self.options.validate()?;
        self.build(path)
    }

    fn build(&self, path: &Path) -> Result<Item> {
        let samples = self
            .options
            .strategy
            .sample(path, self.options.split_count)?;
        if samples.is_empty() {
            return Err(SamplingError::EmptyPath.into());
        }

        let (outer, inner) = self.contours(&samples, path.closed);
        debug!(
            samples = samples.len(),
            closed = path.closed,
            "built stroke contours"
        );

        Ok(if path.closed {
            assemble_ring(outer, inner)
        } else {
            assemble_polygon(outer, inner)
        })
    }

    /// Returns `(outer, inner)` contour segments, index-aligned with `samples`.
    fn contours(&self, samples: &[Sample], closed: bool) -> (Vec<Segment>, Vec<Segment>) {
        let n = samples.len();
        let mut outer = Vec::with_capacity(n);
        let mut inner = Vec::with_capacity(n);

        for (i, curr) in samples.iter().enumerate() {
            let prev = &samples[(i + n - 1) % n];
            let next = &samples[(i + 1) % n];

            inner.push(curr.segment());

            let mut thickness = self.options.signed_thickness();
            if closed && curr.is_original {
                thickness *= self.corner_factor(prev, next);
            }

            let translation = normalize_or_zero(curr.normal) * thickness;
            outer.push(curr.segment().translated(translation));
        }

        (outer, inner)
    }

    /// Miter-style compensation `1 / cos(θ / 2)` for a vertex sample.
    fn corner_factor(&self, prev: &Sample, next: &Sample) -> f64 {
        let half_angle = angle_between(prev.normal, next.normal) * 0.5;
        let cos = half_angle.cos();
        if cos <= TOLERANCE {
            debug!(half_angle, "full reversal, corner left uncompensated");
            return 1.0;
        }
        let factor = 1.0 / cos;
        match self.options.miter_limit {
            Some(limit) => factor.min(limit),
            None => factor,
        }
    }
}

/// Closed input: outer and inner contours as an even-odd ring.
fn assemble_ring(outer: Vec<Segment>, inner: Vec<Segment>) -> Item {
    Item::Compound(CompoundPath::new(
        vec![Path::new(outer, true), Path::new(inner, true)],
        FillRule::EvenOdd,
    ))
}

/// Open input: outer forward, inner backward, as one straight-edged polygon.
fn assemble_polygon(outer: Vec<Segment>, inner: Vec<Segment>) -> Item {
    let mut segments = outer;
    segments.extend(inner.iter().rev().map(Segment::reversed));
    let mut polygon = Path::new(segments, true);
    polygon.clear_handles();
    Item::Path(polygon)
}
