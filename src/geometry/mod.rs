mod compound_path;
mod curve;
mod item;
mod path;
mod path_measure;
mod segment;

pub use compound_path::{CompoundPath, FillRule};
pub use curve::{Curve, CurveLocation};
pub use item::{Group, Item};
pub use path::Path;
pub use path_measure::PathMeasure;
pub use segment::Segment;
