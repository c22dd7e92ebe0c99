mod divide_path;
mod split_evenly;

pub use divide_path::DividePath;
pub use split_evenly::SplitPathEvenly;

use crate::error::{Result, SamplingError};
use crate::geometry::{Path, Segment};
use crate::math::{Point2, Vector2};

/// Where on the source path a sample came from.
///
/// A back-reference only: samples never mutate the path they were taken from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleLocation {
    /// Index of the source curve.
    pub curve_index: usize,
    /// Parameter on the source curve.
    pub time: f64,
    /// Arc length from the path start.
    pub offset: f64,
}

/// A resampled path point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub point: Point2,
    /// Unit normal of the path at `point`.
    pub normal: Vector2,
    pub handle_in: Vector2,
    pub handle_out: Vector2,
    /// `true` for the first sample taken on a source vertex's outgoing curve.
    pub is_original: bool,
    pub location: SampleLocation,
}

impl Sample {
    /// The sample as a path segment (position and handles).
    #[must_use]
    pub fn segment(&self) -> Segment {
        Segment::new(self.point, self.handle_in, self.handle_out)
    }
}

/// How a path is subdivided into samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// `count` samples per curve at equal arc-length fractions of that curve.
    #[default]
    Parametric,
    /// Samples spaced by `path.length / count`, rounded per edge.
    ArcLength,
}

impl SamplingStrategy {
    /// Samples `path` with this strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero or the path has no curves.
    pub fn sample(self, path: &Path, count: usize) -> Result<Vec<Sample>> {
        match self {
            SamplingStrategy::Parametric => DividePath::new(path, count).execute(),
            SamplingStrategy::ArcLength => SplitPathEvenly::new(path, count).execute(),
        }
    }
}

/// Samples `path` with the given strategy.
///
/// # Errors
///
/// Returns an error if `count` is zero or the path has no curves.
pub fn sample(path: &Path, count: usize, strategy: SamplingStrategy) -> Result<Vec<Sample>> {
    strategy.sample(path, count)
}

/// Shared argument checks for both samplers.
fn validate(path: &Path, count: usize) -> Result<()> {
    if count == 0 {
        return Err(SamplingError::InvalidParameters("sample count must be at least 1".to_owned()).into());
    }
    if path.curve_count() == 0 {
        return Err(SamplingError::EmptyPath.into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FixstrokeError;

    #[test]
    fn zero_count_is_rejected_by_both_strategies() {
        let path = Path::circle(Point2::new(0.0, 0.0), 10.0);
        for strategy in [SamplingStrategy::Parametric, SamplingStrategy::ArcLength] {
            let err = sample(&path, 0, strategy).unwrap_err();
            assert!(matches!(
                err,
                FixstrokeError::Sampling(SamplingError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn path_without_curves_is_empty() {
        let path = Path::from_points(&[Point2::new(1.0, 1.0)], false);
        for strategy in [SamplingStrategy::Parametric, SamplingStrategy::ArcLength] {
            let err = sample(&path, 4, strategy).unwrap_err();
            assert!(matches!(err, FixstrokeError::Sampling(SamplingError::EmptyPath)));
        }
    }

    #[test]
    fn default_strategy_is_parametric() {
        assert_eq!(SamplingStrategy::default(), SamplingStrategy::Parametric);
    }

    #[test]
    fn sample_segment_carries_handles() {
        let path = Path::circle(Point2::new(0.0, 0.0), 10.0);
        let samples = sample(&path, 4, SamplingStrategy::Parametric).unwrap();
        let segment = samples[1].segment();
        assert_eq!(segment.point, samples[1].point);
        assert_eq!(segment.handle_out, samples[1].handle_out);
        assert!(segment.has_handles());
    }
}
