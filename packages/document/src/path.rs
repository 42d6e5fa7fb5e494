//! Locations inside a document tree.
//!
//! A [`Path`] is the list of child indexes from the document root down to a
//! node. A [`Point`] is a path to a text run plus a character offset inside
//! it, and a [`Range`] is an anchor/focus pair of points. Offsets count
//! Unicode scalar values, not bytes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Child-index path from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(pub Vec<usize>);

impl Path {
    pub fn new(indexes: impl Into<Vec<usize>>) -> Self {
        Self(indexes.into())
    }

    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indexes(&self) -> &[usize] {
        &self.0
    }

    /// Index of the node within its parent
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            Some(Path(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn child(&self, index: usize) -> Path {
        let mut indexes = self.0.clone();
        indexes.push(index);
        Path(indexes)
    }

    /// Path of the following sibling
    pub fn next(&self) -> Option<Path> {
        let (last, prefix) = self.0.split_last()?;
        let mut indexes = prefix.to_vec();
        indexes.push(last + 1);
        Some(Path(indexes))
    }

    /// Path of the preceding sibling
    pub fn previous(&self) -> Option<Path> {
        let (last, prefix) = self.0.split_last()?;
        let index = last.checked_sub(1)?;
        let mut indexes = prefix.to_vec();
        indexes.push(index);
        Some(Path(indexes))
    }

    /// Strict ancestor test
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    pub fn is_sibling_of(&self, other: &Path) -> bool {
        !self.0.is_empty() && self.parent() == other.parent() && self != other
    }

    /// Every strict ancestor path, root first
    pub fn ancestors(&self) -> Vec<Path> {
        (0..self.0.len()).map(|n| Path(self.0[..n].to_vec())).collect()
    }

    pub fn common_ancestor(&self, other: &Path) -> Path {
        let shared = self
            .0
            .iter()
            .zip(other.0.iter())
            .take_while(|(a, b)| a == b)
            .count();
        Path(self.0[..shared].to_vec())
    }

    /// True when `self` comes after `other` in document order and is not one
    /// of its ancestors or descendants.
    pub fn is_after(&self, other: &Path) -> bool {
        !self.is_ancestor_of(other) && !other.is_ancestor_of(self) && self > other
    }

    pub fn is_before(&self, other: &Path) -> bool {
        other.is_after(self)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "[{}]", parts.join("."))
    }
}

impl From<Vec<usize>> for Path {
    fn from(indexes: Vec<usize>) -> Self {
        Path(indexes)
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indexes: [usize; N]) -> Self {
        Path(indexes.to_vec())
    }
}

/// A caret position: text run path plus character offset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then(self.offset.cmp(&other.offset))
    }
}

/// Anchor/focus range. The anchor is where the selection started, so it may
/// come after the focus for a backward selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub anchor: Point,
    pub focus: Point,
}

impl Range {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    /// Shorthand for a caret at `offset` inside the run at `path`
    pub fn caret(path: impl Into<Path>, offset: usize) -> Self {
        Self::collapsed(Point::new(path, offset))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_backward(&self) -> bool {
        self.anchor > self.focus
    }

    /// `(start, end)` in document order
    pub fn edges(&self) -> (Point, Point) {
        if self.is_backward() {
            (self.focus.clone(), self.anchor.clone())
        } else {
            (self.anchor.clone(), self.focus.clone())
        }
    }

    pub fn start(&self) -> Point {
        self.edges().0
    }

    pub fn end(&self) -> Point {
        self.edges().1
    }

    /// Rebuild a range with the same direction as `self`
    pub fn with_edges(&self, start: Point, end: Point) -> Range {
        if self.is_backward() {
            Range::new(end, start)
        } else {
            Range::new(start, end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_relations() {
        let parent = Path::from([0, 1]);
        let child = Path::from([0, 1, 2]);

        assert!(parent.is_ancestor_of(&child));
        assert!(!child.is_ancestor_of(&parent));
        assert!(!parent.is_ancestor_of(&parent));
        assert_eq!(child.parent(), Some(parent.clone()));
        assert_eq!(parent.next(), Some(Path::from([0, 2])));
        assert_eq!(Path::from([0, 0]).previous(), None);
        assert_eq!(child.common_ancestor(&Path::from([0, 3])), Path::from([0]));
    }

    #[test]
    fn test_document_order() {
        assert!(Path::from([1]).is_after(&Path::from([0, 5])));
        assert!(!Path::from([0]).is_after(&Path::from([0, 5])));
        assert!(Path::from([0, 2]).is_before(&Path::from([1, 0])));
    }

    #[test]
    fn test_backward_range_edges() {
        let range = Range::new(Point::new([1, 0], 2), Point::new([0, 0], 4));
        assert!(range.is_backward());

        let (start, end) = range.edges();
        assert_eq!(start, Point::new([0, 0], 4));
        assert_eq!(end, Point::new([1, 0], 2));

        let rebuilt = range.with_edges(start.clone(), end.clone());
        assert_eq!(rebuilt.anchor, end);
        assert_eq!(rebuilt.focus, start);
    }

    #[test]
    fn test_path_display() {
        assert_eq!(Path::from([0, 2, 1]).to_string(), "[0.2.1]");
        assert_eq!(Path::root().to_string(), "[]");
    }
}
