use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{Path, PathMeasure, Segment};
use crate::math::{Vector2, TOLERANCE};

use super::{validate, Sample, SampleLocation};

/// Fraction of the per-split distance probed on either side of a vertex when
/// averaging normals.
const VERTEX_EPSILON: f64 = 1e-3;

/// Lower bound on the vertex probe distance, as a fraction of the path
/// length. Keeps the probes off zero-length edges.
const PATH_EPSILON: f64 = 1e-4;

/// Splits a path into samples spaced by roughly `path.length / count`.
///
/// Each edge (the stretch between two consecutive vertices, including the
/// closing edge of a closed path) gets `round(edge_length / spacing)`
/// evenly spaced samples, at least one. The first sample of an edge is the
/// edge's start vertex. Every later sample carries the handles a split at
/// that point would produce after the earlier splits on the same edge:
/// `handle_in` spans back to the previous sample, `handle_out` forward to the
/// edge end. The caller's path is never touched.
#[derive(Debug)]
pub struct SplitPathEvenly<'a> {
    path: &'a Path,
    count: usize,
}

/// Per-edge split plan.
struct EdgeSplit {
    edge: usize,
    start: f64,
    splits: usize,
    distance_per_split: f64,
}

impl<'a> SplitPathEvenly<'a> {
    /// Creates a new split operation.
    #[must_use]
    pub fn new(path: &'a Path, count: usize) -> Self {
        Self { path, count }
    }

    /// Executes the split.
    ///
    /// Samples whose split fails are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero or the path has no curves.
    pub fn execute(&self) -> Result<Vec<Sample>> {
        validate(self.path, self.count)?;

        let measure = self.path.measure();
        #[allow(clippy::cast_precision_loss)]
        let split_len = measure.length() / self.count as f64;
        let edge_count = measure.curves().len();
        let mut samples = Vec::with_capacity(self.count + edge_count + 1);

        for edge in 0..edge_count {
            let plan = self.plan_edge(&measure, edge, split_len);
            for split in 0..plan.splits {
                match self.split_sample(&measure, &plan, split) {
                    Ok(sample) => samples.push(sample),
                    Err(err) => warn!(edge, split, error = %err, "skipping sample"),
                }
            }
        }

        if !measure.is_closed() {
            match self.terminal_sample(&measure) {
                Ok(sample) => samples.push(sample),
                Err(err) => warn!(error = %err, "skipping terminal sample"),
            }
        }

        debug!(
            edges = edge_count,
            samples = samples.len(),
            closed = measure.is_closed(),
            "split path evenly"
        );
        Ok(samples)
    }

    fn plan_edge(&self, measure: &PathMeasure, edge: usize, split_len: f64) -> EdgeSplit {
        let start = measure.curve_offset(edge);
        let span = measure.curve_offset(edge + 1) - start;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let splits = if split_len > TOLERANCE {
            (span / split_len).round() as usize
        } else {
            1
        }
        .max(1);
        #[allow(clippy::cast_precision_loss)]
        let distance_per_split = span / splits as f64;
        EdgeSplit {
            edge,
            start,
            splits,
            distance_per_split,
        }
    }

    fn split_sample(&self, measure: &PathMeasure, plan: &EdgeSplit, split: usize) -> Result<Sample> {
        #[allow(clippy::cast_precision_loss)]
        let local = split as f64 * plan.distance_per_split;
        let offset = plan.start + local;
        let curve = &measure.curves()[plan.edge];
        let time = curve.time_at(local)?;

        let is_original = split == 0;
        // The first split of an edge lands on its vertex: use the vertex.
        let segment = if is_original {
            self.path.segments[plan.edge]
        } else {
            let prev_time = curve.time_at(local - plan.distance_per_split)?;
            let (_, handle_in) = curve.sub_curve_handles(prev_time, time);
            let (handle_out, _) = curve.sub_curve_handles(time, 1.0);
            Segment::new(curve.point_at_time(time), handle_in, handle_out)
        };

        let normal = if is_original && measure.is_closed() {
            let epsilon = (VERTEX_EPSILON * plan.distance_per_split)
                .max(PATH_EPSILON * measure.length());
            match measure.averaged_normal_at(offset, epsilon)? {
                Some(normal) => normal,
                None => curve.normal_at_time(time)?,
            }
        } else {
            curve.normal_at_time(time)?
        };

        Ok(to_sample(
            &segment,
            normal,
            is_original,
            SampleLocation {
                curve_index: plan.edge,
                time,
                offset,
            },
        ))
    }

    fn terminal_sample(&self, measure: &PathMeasure) -> Result<Sample> {
        let curves = measure.curves();
        let curve_index = curves.len() - 1;
        let normal = curves[curve_index].normal_at_time(1.0)?;
        let last = self.path.segments[self.path.segments.len() - 1];
        Ok(to_sample(
            &Segment::new(last.point, last.handle_in, Vector2::zeros()),
            normal,
            false,
            SampleLocation {
                curve_index,
                time: 1.0,
                offset: measure.length(),
            },
        ))
    }
}

fn to_sample(segment: &Segment, normal: Vector2, is_original: bool, location: SampleLocation) -> Sample {
    Sample {
        point: segment.point,
        normal,
        handle_in: segment.handle_in,
        handle_out: segment.handle_out,
        is_original,
        location,
    }
}
