use super::{CompoundPath, Path};

/// A drawable item: a single path, a compound path, or a group of items.
///
/// Stroke input and output are both expressed as items, so a stroke result
/// can be fed back in.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Path(Path),
    Compound(CompoundPath),
    Group(Group),
}

/// An ordered collection of items with no further semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub children: Vec<Item>,
}

impl Group {
    /// Creates a group from its children.
    #[must_use]
    pub fn new(children: Vec<Item>) -> Self {
        Self { children }
    }

    /// Returns `true` if the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }
}

impl Item {
    /// Collects every [`Path`] leaf, depth first, in child order.
    ///
    /// The contours of a compound path count as individual leaves.
    #[must_use]
    pub fn paths(&self) -> Vec<&Path> {
        let mut out = Vec::new();
        self.collect_paths(&mut out);
        out
    }

    fn collect_paths<'a>(&'a self, out: &mut Vec<&'a Path>) {
        match self {
            Item::Path(path) => out.push(path),
            Item::Compound(compound) => out.extend(compound.children.iter()),
            Item::Group(group) => {
                for child in &group.children {
                    child.collect_paths(out);
                }
            }
        }
    }
}

impl From<Path> for Item {
    fn from(path: Path) -> Self {
        Item::Path(path)
    }
}

impl From<CompoundPath> for Item {
    fn from(compound: CompoundPath) -> Self {
        Item::Compound(compound)
    }
}

impl From<Group> for Item {
    fn from(group: Group) -> Self {
        Item::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FillRule;
    use crate::math::Point2;

    fn unit_circle(x: f64) -> Path {
        Path::circle(Point2::new(x, 0.0), 1.0)
    }

    #[test]
    fn single_path_is_its_own_leaf() {
        let item = Item::from(unit_circle(0.0));
        assert_eq!(item.paths().len(), 1);
    }

    #[test]
    fn nested_groups_flatten_in_order() {
        let item = Item::from(Group::new(vec![
            unit_circle(0.0).into(),
            Group::new(vec![
                unit_circle(1.0).into(),
                CompoundPath::new(vec![unit_circle(2.0), unit_circle(3.0)], FillRule::EvenOdd)
                    .into(),
            ])
            .into(),
        ]));
        let paths = item.paths();
        assert_eq!(paths.len(), 4);
        for (i, path) in paths.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let expected_x = i as f64 - 1.0;
            assert!((path.segments[0].point.x - expected_x).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_group_has_no_leaves() {
        let item = Item::from(Group::default());
        assert!(item.paths().is_empty());
    }
}
