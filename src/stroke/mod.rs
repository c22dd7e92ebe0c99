mod fixed_width_stroke;
mod stroke_options;

pub use fixed_width_stroke::FixedWidthStroke;
pub use stroke_options::{Direction, StrokeOptions};

use crate::error::Result;
use crate::geometry::{Group, Item};

/// Strokes every path in `item` with the given options.
///
/// # Errors
///
/// Returns an error if the options are invalid.
pub fn build_stroke(item: &Item, options: StrokeOptions) -> Result<Group> {
    FixedWidthStroke::new(options).execute(item)
}
