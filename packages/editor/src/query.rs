//! Selection queries behind toolbar highlighting.
//!
//! Every function here is total: an absent selection or one that no longer
//! fits the document answers "nothing active" instead of failing.

use crate::transforms::lean_backward;
use folio_document::{BlockFormat, Document, MarkSet, Path, Point, Range};

fn is_valid_range(doc: &Document, range: &Range) -> bool {
    doc.is_valid_point(&range.anchor) && doc.is_valid_point(&range.focus)
}

/// Characters of the run at `leaf` covered by `start..end`
fn covered_chars(doc: &Document, leaf: &Path, start: &Point, end: &Point) -> usize {
    let len = doc.text(leaf).map(|run| run.char_len()).unwrap_or(0);
    let from = if *leaf == start.path { start.offset } else { 0 };
    let to = if *leaf == end.path { end.offset } else { len };
    to.saturating_sub(from)
}

/// Marks set at the caret, or set uniformly across every run the range
/// covers by at least one character
pub fn active_marks(doc: &Document, selection: Option<&Range>) -> MarkSet {
    let Some(range) = selection else {
        return MarkSet::empty();
    };
    if !is_valid_range(doc, range) {
        return MarkSet::empty();
    }

    if range.is_collapsed() {
        let point = lean_backward(doc, &range.anchor);
        return doc
            .text(&point.path)
            .map(|run| run.marks())
            .unwrap_or_default();
    }

    let (start, end) = range.edges();
    let leaves = doc.leaf_paths_between(&start.path, &end.path);
    let covered: Vec<&Path> = leaves
        .iter()
        .filter(|leaf| covered_chars(doc, leaf, &start, &end) > 0)
        .collect();
    let considered: Vec<&Path> = if covered.is_empty() {
        leaves.iter().collect()
    } else {
        covered
    };
    if considered.is_empty() {
        return MarkSet::empty();
    }

    considered
        .into_iter()
        .filter_map(|leaf| doc.text(leaf).ok())
        .fold(MarkSet::all(), |marks, run| marks.intersection(&run.marks()))
}

/// Format of the block nearest the selection's anchor
pub fn active_block_type(doc: &Document, selection: Option<&Range>) -> Option<BlockFormat> {
    let range = selection?;
    if !is_valid_range(doc, range) {
        return None;
    }
    doc.ancestors(&range.anchor.path)
        .into_iter()
        .find_map(|(_, element)| element.format())
}

/// True when any element on the selected paths has `format`
pub fn is_block_active(doc: &Document, selection: Option<&Range>, format: BlockFormat) -> bool {
    let Some(range) = selection else {
        return false;
    };
    if !is_valid_range(doc, range) {
        return false;
    }
    let (start, end) = range.edges();
    doc.leaf_paths_between(&start.path, &end.path)
        .iter()
        .any(|leaf| {
            doc.ancestors(leaf)
                .into_iter()
                .any(|(_, element)| element.format() == Some(format))
        })
}

/// Nearest enclosing block of every run the range touches, in document order
pub fn selected_blocks(doc: &Document, range: &Range) -> Vec<Path> {
    if !is_valid_range(doc, range) {
        return Vec::new();
    }
    let (start, end) = range.edges();
    let mut blocks: Vec<Path> = Vec::new();
    for leaf in doc.leaf_paths_between(&start.path, &end.path) {
        if let Some(block) = doc.enclosing_block(&leaf) {
            if !blocks.contains(&block) {
                blocks.push(block);
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_document::{Element, ElementKind, Mark, Node, TextRun};

    fn mixed() -> Document {
        Document::from_nodes(vec![Element::new(
            ElementKind::paragraph(),
            vec![
                TextRun::new("bold ").with_mark(Mark::Bold).into(),
                TextRun::new("both")
                    .with_mark(Mark::Bold)
                    .with_mark(Mark::Italic)
                    .into(),
                Node::text(" plain"),
            ],
        )
        .into()])
    }

    #[test]
    fn test_no_selection_is_inactive() {
        let doc = mixed();
        assert!(active_marks(&doc, None).is_empty());
        assert_eq!(active_block_type(&doc, None), None);
        assert!(!is_block_active(&doc, None, BlockFormat::Paragraph));
    }

    #[test]
    fn test_stale_selection_is_inactive() {
        let doc = mixed();
        let stale = Range::caret([4, 0], 0);
        assert!(active_marks(&doc, Some(&stale)).is_empty());
        assert_eq!(active_block_type(&doc, Some(&stale)), None);

        let past_end = Range::caret([0, 0], 99);
        assert!(active_marks(&doc, Some(&past_end)).is_empty());
    }

    #[test]
    fn test_caret_marks() {
        let doc = mixed();
        let inside = Range::caret([0, 1], 2);
        let marks = active_marks(&doc, Some(&inside));
        assert!(marks.contains(Mark::Bold));
        assert!(marks.contains(Mark::Italic));

        // At the start of a run the previous run's marks apply
        let start_of_plain = Range::caret([0, 2], 0);
        assert_eq!(
            active_marks(&doc, Some(&start_of_plain)),
            MarkSet::empty().with(Mark::Bold).with(Mark::Italic)
        );
    }

    #[test]
    fn test_range_marks_are_uniform() {
        let doc = mixed();
        let bold_runs = Range::new(Point::new([0, 0], 0), Point::new([0, 1], 4));
        assert_eq!(
            active_marks(&doc, Some(&bold_runs)),
            MarkSet::empty().with(Mark::Bold)
        );

        // Touching the next run at offset 0 does not count as covering it
        let edge = Range::new(Point::new([0, 1], 0), Point::new([0, 2], 0));
        assert_eq!(
            active_marks(&doc, Some(&edge)),
            MarkSet::empty().with(Mark::Bold).with(Mark::Italic)
        );

        let everything = Range::new(Point::new([0, 0], 0), Point::new([0, 2], 6));
        assert!(active_marks(&doc, Some(&everything)).is_empty());
    }

    #[test]
    fn test_block_queries() {
        let doc = Document::from_nodes(vec![
            Element::heading(1, "Title").into(),
            Element::new(
                ElementKind::BulletedList,
                vec![Element::with_text(ElementKind::ListItem, "item").into()],
            )
            .into(),
        ]);

        let in_item = Range::caret([1, 0, 0], 1);
        assert_eq!(active_block_type(&doc, Some(&in_item)), Some(BlockFormat::ListItem));
        assert!(is_block_active(&doc, Some(&in_item), BlockFormat::BulletedList));
        assert!(!is_block_active(&doc, Some(&in_item), BlockFormat::HeadingOne));

        let across = Range::new(Point::new([0, 0], 0), Point::new([1, 0, 0], 2));
        assert!(is_block_active(&doc, Some(&across), BlockFormat::HeadingOne));
        assert_eq!(
            selected_blocks(&doc, &across),
            vec![Path::from([0]), Path::from([1, 0])]
        );
    }
}
