use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{Curve, Path, PathMeasure};
use crate::math::Vector2;

use super::{validate, Sample, SampleLocation};

/// Fraction of the path length probed on either side of a vertex when
/// averaging normals.
const VERTEX_EPSILON: f64 = 1e-4;

/// Divides every curve of a path into `count` pieces of equal arc length.
///
/// Each curve yields exactly `count` samples regardless of its length, the
/// first one sitting on the curve's start vertex. On closed paths the
/// vertex samples get a normal averaged across the vertex, and the final
/// vertex is not repeated. On open paths the last vertex is appended as a
/// terminal sample.
///
/// Sample handles describe the exact cubic sub-curves between neighbouring
/// samples, so the samples re-assembled as a path trace the input curve.
#[derive(Debug)]
pub struct DividePath<'a> {
    path: &'a Path,
    count: usize,
}

impl<'a> DividePath<'a> {
    /// Creates a new divide operation.
    #[must_use]
    pub fn new(path: &'a Path, count: usize) -> Self {
        Self { path, count }
    }

    /// Executes the division.
    ///
    /// Samples that cannot be evaluated (for instance on a zero-length
    /// curve) are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero or the path has no curves.
    pub fn execute(&self) -> Result<Vec<Sample>> {
        validate(self.path, self.count)?;

        let measure = self.path.measure();
        let curve_count = measure.curves().len();
        let epsilon = VERTEX_EPSILON * measure.length();
        let mut samples = Vec::with_capacity(curve_count * self.count + 1);

        for curve_index in 0..curve_count {
            for step in 0..self.count {
                match self.sample_step(&measure, curve_index, step, epsilon) {
                    Ok(sample) => samples.push(sample),
                    Err(err) => warn!(curve = curve_index, step, error = %err, "skipping sample"),
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
            curves = curve_count,
            samples = samples.len(),
            closed = measure.is_closed(),
            "divided path"
        );
        Ok(samples)
    }

    /// Arc length from the curve start to sample `step`.
    fn local_offset(&self, curve: &Curve, step: usize) -> f64 {
        if step >= self.count {
            return curve.length();
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = step as f64 / self.count as f64;
        fraction * curve.length()
    }

    fn time_of(&self, curve: &Curve, step: usize) -> Result<f64> {
        if step >= self.count {
            return Ok(1.0);
        }
        curve.time_at(self.local_offset(curve, step))
    }

    fn sample_step(
        &self,
        measure: &PathMeasure,
        curve_index: usize,
        step: usize,
        epsilon: f64,
    ) -> Result<Sample> {
        let curve = &measure.curves()[curve_index];
        let time = self.time_of(curve, step)?;
        let next_time = self.time_of(curve, step + 1)?;
        let offset = measure.curve_offset(curve_index) + self.local_offset(curve, step);

        let (handle_out, _) = curve.sub_curve_handles(time, next_time);
        let handle_in = if step > 0 {
            let prev_time = self.time_of(curve, step - 1)?;
            curve.sub_curve_handles(prev_time, time).1
        } else {
            self.incoming_handle(measure, curve_index)?
        };

        let is_original = step == 0;
        let normal = if is_original && measure.is_closed() {
            match measure.averaged_normal_at(offset, epsilon)? {
                Some(normal) => normal,
                None => curve.normal_at_time(time)?,
            }
        } else {
            curve.normal_at_time(time)?
        };

        let point = if is_original {
            curve.segment1().point
        } else {
            curve.point_at_time(time)
        };

        Ok(Sample {
            point,
            normal,
            handle_in,
            handle_out,
            is_original,
            location: SampleLocation {
                curve_index,
                time,
                offset,
            },
        })
    }

    /// Handle entering the start vertex of `curve_index`, taken from the last
    /// sub-curve of the preceding curve.
    fn incoming_handle(&self, measure: &PathMeasure, curve_index: usize) -> Result<Vector2> {
        let curves = measure.curves();
        let prev_index = match curve_index {
            0 if measure.is_closed() => curves.len() - 1,
            0 => return Ok(Vector2::zeros()),
            i => i - 1,
        };
        let prev = &curves[prev_index];
        let last_time = self.time_of(prev, self.count - 1)?;
        Ok(prev.sub_curve_handles(last_time, 1.0).1)
    }

    /// The final vertex of an open path, appended verbatim.
    fn terminal_sample(&self, measure: &PathMeasure) -> Result<Sample> {
        let curves = measure.curves();
        let curve_index = curves.len() - 1;
        let curve = &curves[curve_index];
        let last_time = self.time_of(curve, self.count - 1)?;
        Ok(Sample {
            point: curve.segment2().point,
            normal: curve.normal_at_time(1.0)?,
            handle_in: curve.sub_curve_handles(last_time, 1.0).1,
            handle_out: Vector2::zeros(),
            is_original: false,
            location: SampleLocation {
                curve_index,
                time: 1.0,
                offset: measure.length(),
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn arc() -> Path {
        Path::arc_through(
            Point2::new(200.0, 200.0),
            Point2::new(600.0, 600.0),
            Point2::new(1000.0, 200.0),
        )
    }

    #[test]
    fn closed_path_has_count_samples_per_curve() {
        let circle = Path::circle(Point2::new(0.0, 0.0), 50.0);
        let samples = DividePath::new(&circle, 10).execute().unwrap();
        assert_eq!(samples.len(), 40);

        // No duplicate sample at the wrap-around point.
        let first = samples.first().unwrap().point;
        let last = samples.last().unwrap().point;
        assert!((first - last).norm() > 1.0);
    }

    #[test]
    fn originals_mark_each_vertex_once() {
        let circle = Path::circle(Point2::new(0.0, 0.0), 50.0);
        let samples = DividePath::new(&circle, 10).execute().unwrap();
        let originals: Vec<usize> = samples
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_original)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(originals, vec![0, 10, 20, 30]);
        for (i, segment) in circle.segments.iter().enumerate() {
            assert_eq!(samples[i * 10].point, segment.point);
        }
    }

    #[test]
    fn open_path_ends_with_terminal_vertex() {
        let arc = arc();
        let samples = DividePath::new(&arc, 50).execute().unwrap();
        assert_eq!(samples.len(), 2 * 50 + 1);

        let last = samples.last().unwrap();
        assert!(!last.is_original);
        assert_eq!(last.point, arc.segments.last().unwrap().point);
        assert_eq!(samples.iter().filter(|s| s.is_original).count(), 2);
    }

    #[test]
    fn circle_vertex_normal_matches_curve_normal() {
        let center = Point2::new(500.0, 500.0);
        let circle = Path::circle(center, 100.0);
        let samples = DividePath::new(&circle, 50).execute().unwrap();
        let curves = circle.curves();
        for (i, curve) in curves.iter().enumerate() {
            let sample = &samples[i * 50];
            let expected = curve.normal_at_time(0.0).unwrap();
            assert_relative_eq!(sample.normal, expected, epsilon = 1e-6);
            let radial = (sample.point - center).normalize();
            assert_relative_eq!(sample.normal, radial, epsilon = 1e-6);
        }
    }

    #[test]
    fn square_vertex_normals_are_averaged() {
        let square = Path::from_points(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
            ],
            true,
        );
        let samples = DividePath::new(&square, 4).execute().unwrap();
        let d = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(samples[4].normal, Vector2::new(d, -d), epsilon = 1e-12);
        // Interior samples keep the edge normal.
        assert_relative_eq!(samples[5].normal, Vector2::new(1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn open_path_vertex_normals_are_not_averaged() {
        let path = Path::from_points(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
            ],
            false,
        );
        let samples = DividePath::new(&path, 2).execute().unwrap();
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[0].normal, Vector2::new(0.0, -1.0));
        assert_relative_eq!(samples[2].normal, Vector2::new(1.0, 0.0));
        assert_relative_eq!(samples[4].normal, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn straight_edge_samples_are_evenly_spaced() {
        let line = Path::from_points(&[Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)], false);
        let samples = DividePath::new(&line, 5).execute().unwrap();
        let xs: Vec<f64> = samples.iter().map(|s| s.point.x).collect();
        for (x, expected) in xs.iter().zip([0.0, 2.0, 4.0, 6.0, 8.0, 10.0]) {
            assert_relative_eq!(*x, expected, epsilon = 1e-12);
        }
        assert!(samples.iter().all(|s| !s.segment().has_handles()));
    }

    #[test]
    fn sample_handles_reproduce_the_curve() {
        let circle = Path::circle(Point2::new(0.0, 0.0), 100.0);
        let samples = DividePath::new(&circle, 3).execute().unwrap();
        let rebuilt = Path::new(samples.iter().map(Sample::segment).collect::<Vec<Segment>>(), true);
        assert_relative_eq!(rebuilt.length(), circle.length(), max_relative = 1e-6);
    }

    #[test]
    fn zero_length_curve_samples_are_skipped() {
        let path = Path::from_points(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
            ],
            false,
        );
        let samples = DividePath::new(&path, 2).execute().unwrap();
        // Both samples on the degenerate first curve fail; the second curve
        // and the terminal vertex survive.
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|s| s.location.curve_index == 1));
    }
}
