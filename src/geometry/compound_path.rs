use super::Path;

/// Rule deciding which regions of overlapping contours are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillRule {
    /// A point is inside if the winding number around it is non-zero.
    #[default]
    NonZero,
    /// A point is inside if a ray from it crosses the boundary an odd number
    /// of times. Two nested contours form a ring.
    EvenOdd,
}

/// Several closed contours filled together as one shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundPath {
    pub children: Vec<Path>,
    pub fill_rule: FillRule,
}

impl CompoundPath {
    /// Creates a compound path from its contours.
    #[must_use]
    pub fn new(children: Vec<Path>, fill_rule: FillRule) -> Self {
        Self {
            children,
            fill_rule,
        }
    }
}
