use std::fmt;
use std::str::FromStr;

use crate::error::{FixstrokeError, Result, StrokeError};
use crate::sampling::SamplingStrategy;

/// Side of the path the stroke is offset to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Along the path normal.
    #[default]
    Outer,
    /// Against the path normal.
    Inner,
}

impl Direction {
    /// `1.0` for [`Direction::Outer`], `-1.0` for [`Direction::Inner`].
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Outer => 1.0,
            Direction::Inner => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outer => f.write_str("outer"),
            Direction::Inner => f.write_str("inner"),
        }
    }
}

impl FromStr for Direction {
    type Err = FixstrokeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "outer" => Ok(Direction::Outer),
            "inner" => Ok(Direction::Inner),
            other => Err(StrokeError::InvalidOptions(format!(
                "unknown direction {other:?}, expected \"outer\" or \"inner\""
            ))
            .into()),
        }
    }
}

/// Parameters for fixed-width stroke construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeOptions {
    /// Perpendicular offset distance.
    pub thickness: f64,
    /// Samples per curve (parametric) or per path length (arc length).
    pub split_count: usize,
    pub direction: Direction,
    pub strategy: SamplingStrategy,
    /// Upper bound on the corner compensation factor `1 / cos(θ / 2)`.
    /// `None` leaves it unbounded.
    pub miter_limit: Option<f64>,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            thickness: 20.0,
            split_count: 50,
            direction: Direction::Outer,
            strategy: SamplingStrategy::Parametric,
            miter_limit: None,
        }
    }
}

impl StrokeOptions {
    /// Creates default options with the given thickness.
    ///
    /// # Errors
    ///
    /// Returns an error if `thickness` is not finite.
    pub fn new(thickness: f64) -> Result<Self> {
        let options = Self {
            thickness,
            ..Self::default()
        };
        options.validate()?;
        Ok(options)
    }

    /// Sets the sample density.
    #[must_use]
    pub fn with_split_count(mut self, split_count: usize) -> Self {
        self.split_count = split_count;
        self
    }

    /// Sets the offset side.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the sampling strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the corner compensation factor.
    #[must_use]
    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = Some(miter_limit);
        self
    }

    /// Checks that the options describe a buildable stroke.
    ///
    /// # Errors
    ///
    /// Returns an error if the thickness is not finite, the split count is
    /// zero, or the miter limit is below `1.0` or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.thickness.is_finite() {
            return Err(StrokeError::InvalidOptions("thickness must be finite".to_owned()).into());
        }
        if self.split_count == 0 {
            return Err(
                StrokeError::InvalidOptions("split count must be at least 1".to_owned()).into(),
            );
        }
        if let Some(limit) = self.miter_limit {
            if !limit.is_finite() || limit < 1.0 {
                return Err(StrokeError::InvalidOptions(
                    "miter limit must be finite and at least 1".to_owned(),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Thickness with the direction sign applied.
    #[must_use]
    pub fn signed_thickness(&self) -> f64 {
        self.thickness * self.direction.sign()
    }
}
