use thiserror::Error;

/// Top-level error type for fixstroke.
#[derive(Debug, Error)]
pub enum FixstrokeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Stroke(#[from] StrokeError),
}

/// Errors raised by the path/curve kernel.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("offset {offset} is outside the curve length [0, {length}]")]
    OffsetOutOfRange { offset: f64, length: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors that prevent a path from being sampled at all.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("invalid sampling parameters: {0}")]
    InvalidParameters(String),

    #[error("path has no curves to sample")]
    EmptyPath,
}

/// Errors related to stroke construction.
#[derive(Debug, Error)]
pub enum StrokeError {
    #[error("invalid stroke options: {0}")]
    InvalidOptions(String),
}

/// Convenience type alias for results using [`FixstrokeError`].
pub type Result<T> = std::result::Result<T, FixstrokeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_errors_convert_transparently() {
        let err: FixstrokeError = GeometryError::Degenerate("zero-length curve".into()).into();
        assert!(matches!(err, FixstrokeError::Geometry(GeometryError::Degenerate(_))));
        assert_eq!(err.to_string(), "degenerate geometry: zero-length curve");
    }

    #[test]
    fn offset_error_reports_range() {
        let err: FixstrokeError = GeometryError::OffsetOutOfRange {
            offset: 12.0,
            length: 10.0,
        }
        .into();
        assert_eq!(err.to_string(), "offset 12 is outside the curve length [0, 10]");
    }
}
