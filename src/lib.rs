pub mod error;
pub mod geometry;
pub mod math;
pub mod sampling;
pub mod stroke;

pub use error::{FixstrokeError, Result};
pub use geometry::{CompoundPath, FillRule, Group, Item, Path, Segment};
pub use sampling::{Sample, SamplingStrategy};
pub use stroke::{build_stroke, Direction, FixedWidthStroke, StrokeOptions};
