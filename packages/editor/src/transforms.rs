//! # Tree Transforms
//!
//! Low-level edits on a [`Document`] addressed by points and ranges.
//! Mutations compose these; nothing here knows about selection state or
//! history.
//!
//! All offsets are character offsets (Unicode scalar values), converted to
//! byte indexes only at the moment a string is sliced.

use folio_document::{
    Document, DocumentError, DocumentResult, Element, ElementKind, Mark, MarkSet, Node, Path,
    Point, Range, TextRun,
};

/// Error unless `point` addresses a text run and an offset within it
pub fn check_point(doc: &Document, point: &Point) -> DocumentResult<()> {
    let run = doc.text(&point.path)?;
    if point.offset > run.char_len() {
        return Err(DocumentError::offset_out_of_range(&point.path, point.offset));
    }
    Ok(())
}

pub(crate) fn parent_and_index(path: &Path) -> DocumentResult<(Path, usize)> {
    match (path.parent(), path.last()) {
        (Some(parent), Some(index)) => Ok((parent, index)),
        _ => Err(DocumentError::InvalidPath(path.clone())),
    }
}

/// Where `path` ends up after a node is inserted at `inserted`
pub fn shift_after_insert(path: &Path, inserted: &Path) -> Path {
    let Some(depth) = inserted.len().checked_sub(1) else {
        return path.clone();
    };
    let (ours, theirs) = (path.indexes(), inserted.indexes());
    if ours.len() > depth && ours[..depth] == theirs[..depth] && ours[depth] >= theirs[depth] {
        let mut indexes = ours.to_vec();
        indexes[depth] += 1;
        Path::new(indexes)
    } else {
        path.clone()
    }
}

/// Where `path` ends up after the node at `removed` is deleted, or `None`
/// if it was deleted along with it
pub fn shift_after_remove(path: &Path, removed: &Path) -> Option<Path> {
    if path == removed || removed.is_ancestor_of(path) {
        return None;
    }
    let Some(depth) = removed.len().checked_sub(1) else {
        return Some(path.clone());
    };
    let (ours, theirs) = (path.indexes(), removed.indexes());
    if ours.len() > depth && ours[..depth] == theirs[..depth] && ours[depth] > theirs[depth] {
        let mut indexes = ours.to_vec();
        indexes[depth] -= 1;
        Some(Path::new(indexes))
    } else {
        Some(path.clone())
    }
}

/// A caret at the very start of a run reads its formatting from the run
/// before it in the same block, the way a user expects typing to continue.
pub fn lean_backward(doc: &Document, point: &Point) -> Point {
    if point.offset == 0 {
        if let Some(previous) = point.path.previous() {
            if let Ok(run) = doc.text(&previous) {
                return Point::new(previous, run.char_len());
            }
        }
    }
    point.clone()
}

/// Split the run at `point` in two. Returns false when the point is at an
/// edge of the run and nothing had to be split.
pub fn split_text(doc: &mut Document, point: &Point) -> DocumentResult<bool> {
    check_point(doc, point)?;
    let run = doc.text_mut(&point.path)?;
    if point.offset == 0 || point.offset == run.char_len() {
        return Ok(false);
    }

    let byte = run.byte_index(point.offset);
    let tail_text = run.text.split_off(byte);
    let tail = run.with_text(tail_text);

    let (parent, index) = parent_and_index(&point.path)?;
    doc.insert_node(&parent, index + 1, tail.into())?;
    Ok(true)
}

/// Insert a whole run at `point`, splitting the run there if needed.
/// Returns the caret at the end of the inserted run.
pub fn insert_run(doc: &mut Document, point: &Point, run: TextRun) -> DocumentResult<Point> {
    split_text(doc, point)?;
    let (parent, index) = parent_and_index(&point.path)?;
    let at = if point.offset == 0 { index } else { index + 1 };
    let len = run.char_len();
    doc.insert_node(&parent, at, run.into())?;
    Ok(Point::new(parent.child(at), len))
}

/// Type `text` at `point`. With `marks` that differ from the run's own, the
/// text becomes a new run carrying those marks.
pub fn insert_text(
    doc: &mut Document,
    point: &Point,
    text: &str,
    marks: Option<MarkSet>,
) -> DocumentResult<Point> {
    check_point(doc, point)?;
    let point = lean_backward(doc, point);
    let run = doc.text(&point.path)?;

    match marks {
        Some(marks) if marks != run.marks() => {
            let mut fresh = run.with_text(text);
            fresh.set_marks(marks);
            insert_run(doc, &point, fresh)
        }
        _ => {
            let run = doc.text_mut(&point.path)?;
            let byte = run.byte_index(point.offset);
            run.text.insert_str(byte, text);
            Ok(Point::new(point.path, point.offset + text.chars().count()))
        }
    }
}

/// Turn `mark` on or off over `range`. Runs are split at the range edges so
/// formatting stops exactly there. Returns the range remapped onto the new
/// runs, keeping its direction.
pub fn set_mark_in_range(
    doc: &mut Document,
    range: &Range,
    mark: Mark,
    on: bool,
) -> DocumentResult<Range> {
    let (start, end) = range.edges();
    check_point(doc, &start)?;
    check_point(doc, &end)?;

    // End first: splitting there never moves the start.
    split_text(doc, &end)?;
    let mut new_start = start.clone();
    let mut new_end = end.clone();

    if split_text(doc, &start)? {
        let tail = start.path.next().unwrap_or_else(|| start.path.clone());
        new_start = Point::new(tail.clone(), 0);
        new_end = if end.path == start.path {
            Point::new(tail, end.offset - start.offset)
        } else {
            Point::new(shift_after_insert(&end.path, &tail), end.offset)
        };
    }

    for leaf in doc.leaf_paths_between(&new_start.path, &new_end.path) {
        let run = doc.text_mut(&leaf)?;
        let touches_start_edge = leaf == new_start.path && new_start.offset == run.char_len();
        let touches_end_edge = leaf == new_end.path && new_end.offset == 0;
        if leaf != new_start.path || leaf != new_end.path {
            if touches_start_edge || touches_end_edge {
                continue;
            }
        }
        run.set_mark(mark, on);
    }

    Ok(range.with_edges(new_start, new_end))
}

/// Remove every node strictly between `start` and `end`, using the paths
/// the nodes had before anything was removed.
fn prune_between(children: &mut Vec<Node>, parent: &Path, start: &Path, end: &Path) {
    let mut index = 0;
    children.retain_mut(|child| {
        let path = parent.child(index);
        index += 1;

        if path == *start || path == *end {
            return true;
        }
        if path.is_ancestor_of(start) || path.is_ancestor_of(end) {
            if let Some(grandchildren) = child.children_mut() {
                prune_between(grandchildren, &path, start, end);
            }
            return true;
        }
        !(path.is_after(start) && path.is_before(end))
    });
}

/// Path of the end leaf once everything between it and `start` is gone
fn collapsed_end_path(start: &Path, end: &Path) -> Path {
    let shared = start.common_ancestor(end).len();
    if shared >= start.len() || shared >= end.len() {
        return end.clone();
    }
    let mut indexes = start.indexes()[..shared].to_vec();
    indexes.push(start.indexes()[shared] + 1);
    indexes.extend(std::iter::repeat(0).take(end.len() - shared - 1));
    Path::new(indexes)
}

/// Join the run at `path` with the following run when they share formatting
fn merge_with_next_run(doc: &mut Document, path: &Path) -> DocumentResult<()> {
    let Some(next) = path.next() else {
        return Ok(());
    };
    let joinable = match (doc.text(path), doc.text(&next)) {
        (Ok(run), Ok(following)) => run.same_format(following),
        _ => false,
    };
    if joinable {
        if let Node::Text(following) = doc.remove_node(&next)? {
            doc.text_mut(path)?.text.push_str(&following.text);
        }
    }
    Ok(())
}

/// Remove elements left empty after a merge, walking up from `path`
fn prune_empty_ancestors(doc: &mut Document, mut path: Option<Path>, keep: &Path) -> DocumentResult<()> {
    while let Some(current) = path {
        if current.is_root() || current.is_ancestor_of(keep) {
            break;
        }
        let empty = doc
            .children_of(&current)
            .map(|children| children.is_empty())
            .unwrap_or(false);
        if !empty {
            break;
        }
        doc.remove_node(&current)?;
        path = current.parent();
    }
    Ok(())
}

/// Move the children of the block holding `end_leaf` into the block holding
/// `start_leaf`
fn merge_blocks(doc: &mut Document, start_leaf: &Path, end_leaf: &Path) -> DocumentResult<()> {
    let (Some(start_block), Some(end_block)) = (start_leaf.parent(), end_leaf.parent()) else {
        return Ok(());
    };

    if start_block != end_block
        && !start_block.is_root()
        && !end_block.is_root()
        && !end_block.is_ancestor_of(start_leaf)
    {
        let moved = match doc.remove_node(&end_block)? {
            Node::Element(element) => element.children,
            Node::Text(run) => vec![Node::Text(run)],
        };
        doc.children_of_mut(&start_block)
            .ok_or_else(|| DocumentError::NotElement(start_block.clone()))?
            .extend(moved);
        prune_empty_ancestors(doc, end_block.parent(), start_leaf)?;
    }

    merge_with_next_run(doc, start_leaf)
}

/// Delete everything inside `range`, merging the blocks at its two edges.
/// Returns the collapsed caret where the range started.
pub fn delete_range(doc: &mut Document, range: &Range) -> DocumentResult<Point> {
    let (start, end) = range.edges();
    check_point(doc, &start)?;
    check_point(doc, &end)?;

    if start == end {
        return Ok(start);
    }

    if start.path == end.path {
        let run = doc.text_mut(&start.path)?;
        let from = run.byte_index(start.offset);
        let to = run.byte_index(end.offset);
        run.text.replace_range(from..to, "");
        return Ok(start);
    }

    {
        let run = doc.text_mut(&start.path)?;
        let byte = run.byte_index(start.offset);
        run.text.truncate(byte);
    }
    {
        let run = doc.text_mut(&end.path)?;
        let byte = run.byte_index(end.offset);
        run.text.replace_range(..byte, "");
    }

    prune_between(&mut doc.children, &Path::root(), &start.path, &end.path);
    let end_path = collapsed_end_path(&start.path, &end.path);
    merge_blocks(doc, &start.path, &end_path)?;

    Ok(start)
}

/// Backspace at a collapsed caret: remove one character, or join with the
/// previous block when the caret is at the start of its block.
pub fn delete_backward(doc: &mut Document, point: &Point) -> DocumentResult<Point> {
    check_point(doc, point)?;
    if point.offset > 0 {
        let from = Point::new(point.path.clone(), point.offset - 1);
        return delete_range(doc, &Range::new(from, point.clone()));
    }

    let block = doc.enclosing_block(&point.path);
    let mut cursor = point.path.clone();
    while let Some(previous) = doc.previous_leaf(&cursor) {
        let len = doc.text(&previous)?.char_len();
        if doc.enclosing_block(&previous) != block {
            // Start of the block: join with the one before it
            return delete_range(doc, &Range::new(Point::new(previous, len), point.clone()));
        }
        if len > 0 {
            let from = Point::new(previous.clone(), len - 1);
            return delete_range(doc, &Range::new(from, Point::new(previous, len)));
        }
        cursor = previous;
    }
    Ok(point.clone())
}

fn empty_run_like(node: Option<&Node>) -> Node {
    node.and_then(Node::as_text)
        .map(|run| run.with_text(""))
        .unwrap_or_default()
        .into()
}

/// Split the block holding `point` in two (Enter). The second half keeps the
/// block's type; a checked list item starts unchecked. Returns the caret at
/// the start of the new block.
pub fn split_block(doc: &mut Document, point: &Point) -> DocumentResult<Point> {
    check_point(doc, point)?;
    let block_path = point
        .path
        .parent()
        .filter(|parent| !parent.is_root())
        .ok_or_else(|| DocumentError::NotElement(point.path.clone()))?;

    split_text(doc, point)?;
    let (_, index) = parent_and_index(&point.path)?;
    let at = if point.offset == 0 { index } else { index + 1 };

    let block = doc.element_mut(&block_path)?;
    let mut tail = block.children.split_off(at.min(block.children.len()));
    if tail.is_empty() {
        tail.push(empty_run_like(block.children.last()));
    }
    if block.children.is_empty() {
        block.children.push(empty_run_like(tail.first()));
    }
    let kind = match &block.kind {
        ElementKind::CheckListItem { .. } => ElementKind::CheckListItem { checked: false },
        other => other.clone(),
    };

    let (parent, block_index) = parent_and_index(&block_path)?;
    doc.insert_node(&parent, block_index + 1, Element::new(kind, tail).into())?;

    let new_block = parent.child(block_index + 1);
    Ok(doc
        .start_point(&new_block)
        .unwrap_or_else(|| Point::new(new_block.child(0), 0)))
}

/// Insert a block element near `point`: before the block when the point is
/// at its start, after it when the point is at its end or the block is
/// empty, otherwise between the two halves of the split block. Returns the
/// path of the inserted element.
pub fn insert_block(doc: &mut Document, point: &Point, element: Element) -> DocumentResult<Path> {
    check_point(doc, point)?;

    let Some(block_path) = point.path.parent().filter(|parent| !parent.is_root()) else {
        // A run sitting directly under the root
        let (parent, index) = parent_and_index(&point.path)?;
        doc.insert_node(&parent, index + 1, element.into())?;
        return Ok(parent.child(index + 1));
    };

    let block = doc.element(&block_path)?;
    let empty = block.is_text_empty();
    let at_start = doc.start_point(&block_path).as_ref() == Some(point);
    let at_end = doc.end_point(&block_path).as_ref() == Some(point);

    let (parent, index) = parent_and_index(&block_path)?;
    let at = if empty || at_end {
        index + 1
    } else if at_start {
        index
    } else {
        split_block(doc, point)?;
        index + 1
    };

    doc.insert_node(&parent, at, element.into())?;
    Ok(parent.child(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(children: Vec<Node>) -> Document {
        Document::from_nodes(children)
    }

    fn two_paragraphs() -> Document {
        doc_with(vec![
            Element::paragraph("Hello world").into(),
            Element::paragraph("Second line").into(),
        ])
    }

    #[test]
    fn test_split_text_in_middle() {
        let mut doc = doc_with(vec![Element::paragraph("abcdef").into()]);
        assert!(split_text(&mut doc, &Point::new([0, 0], 2)).unwrap());
        let block = doc.element(&Path::from([0])).unwrap();
        assert_eq!(block.children.len(), 2);
        assert_eq!(doc.text(&Path::from([0, 1])).unwrap().text, "cdef");

        assert!(!split_text(&mut doc, &Point::new([0, 0], 0)).unwrap());
        assert!(!split_text(&mut doc, &Point::new([0, 0], 2)).unwrap());
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        let mut doc = doc_with(vec![Element::paragraph("héllo").into()]);
        split_text(&mut doc, &Point::new([0, 0], 2)).unwrap();
        assert_eq!(doc.text(&Path::from([0, 0])).unwrap().text, "hé");
        assert_eq!(doc.text(&Path::from([0, 1])).unwrap().text, "llo");
    }

    #[test]
    fn test_insert_text_with_pending_marks() {
        let mut doc = doc_with(vec![Element::paragraph("ab").into()]);
        let caret = insert_text(
            &mut doc,
            &Point::new([0, 0], 1),
            "X",
            Some(MarkSet::empty().with(Mark::Bold)),
        )
        .unwrap();

        assert_eq!(caret, Point::new([0, 1], 1));
        assert!(doc.text(&Path::from([0, 1])).unwrap().bold);
        assert_eq!(doc.plain_text(), "aXb");
    }

    #[test]
    fn test_set_mark_in_range_splits_edges() {
        let mut doc = doc_with(vec![Element::paragraph("Hello world").into()]);
        let range = Range::new(Point::new([0, 0], 6), Point::new([0, 0], 11));
        let remapped = set_mark_in_range(&mut doc, &range, Mark::Bold, true).unwrap();

        assert_eq!(remapped, Range::new(Point::new([0, 1], 0), Point::new([0, 1], 5)));
        assert!(!doc.text(&Path::from([0, 0])).unwrap().bold);
        assert!(doc.text(&Path::from([0, 1])).unwrap().bold);
        assert_eq!(doc.text(&Path::from([0, 1])).unwrap().text, "world");
    }

    #[test]
    fn test_set_mark_across_blocks_keeps_direction() {
        let mut doc = two_paragraphs();
        let backward = Range::new(Point::new([1, 0], 6), Point::new([0, 0], 6));
        let remapped = set_mark_in_range(&mut doc, &backward, Mark::Italic, true).unwrap();

        assert!(remapped.is_backward());
        assert_eq!(doc.text(&Path::from([0, 1])).unwrap().text, "world");
        assert!(doc.text(&Path::from([0, 1])).unwrap().italic);
        assert_eq!(doc.text(&Path::from([1, 0])).unwrap().text, "Second");
        assert!(doc.text(&Path::from([1, 0])).unwrap().italic);
        assert!(!doc.text(&Path::from([1, 1])).unwrap().italic);
    }

    #[test]
    fn test_delete_range_within_run() {
        let mut doc = two_paragraphs();
        let caret = delete_range(
            &mut doc,
            &Range::new(Point::new([0, 0], 5), Point::new([0, 0], 11)),
        )
        .unwrap();
        assert_eq!(caret, Point::new([0, 0], 5));
        assert_eq!(doc.plain_text(), "Hello\nSecond line");
    }

    #[test]
    fn test_delete_range_merges_blocks() {
        let mut doc = doc_with(vec![
            Element::paragraph("Hello world").into(),
            Element::paragraph("middle").into(),
            Element::paragraph("Second line").into(),
        ]);
        let caret = delete_range(
            &mut doc,
            &Range::new(Point::new([0, 0], 5), Point::new([2, 0], 6)),
        )
        .unwrap();

        assert_eq!(caret, Point::new([0, 0], 5));
        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.plain_text(), "Hello line");
        assert_eq!(doc.element(&Path::from([0])).unwrap().children.len(), 1);
    }

    #[test]
    fn test_delete_range_out_of_list_prunes_empty_list() {
        let list = Element::new(
            ElementKind::BulletedList,
            vec![Element::with_text(ElementKind::ListItem, "item").into()],
        );
        let mut doc = doc_with(vec![Element::paragraph("intro").into(), list.into()]);

        delete_range(
            &mut doc,
            &Range::new(Point::new([0, 0], 5), Point::new([1, 0, 0], 0)),
        )
        .unwrap();

        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.plain_text(), "introitem");
    }

    #[test]
    fn test_delete_backward_joins_blocks() {
        let mut doc = two_paragraphs();
        let caret = delete_backward(&mut doc, &Point::new([1, 0], 0)).unwrap();
        assert_eq!(caret, Point::new([0, 0], 11));
        assert_eq!(doc.plain_text(), "Hello worldSecond line");

        let mut doc = two_paragraphs();
        delete_backward(&mut doc, &Point::new([0, 0], 0)).unwrap();
        assert_eq!(doc, two_paragraphs());
    }

    #[test]
    fn test_delete_backward_across_runs_in_block() {
        let block = Element::new(
            ElementKind::Paragraph { align: None },
            vec![
                TextRun::new("ab").into(),
                TextRun::new("").into(),
                TextRun::new("cd").with_mark(Mark::Bold).into(),
            ],
        );
        let mut doc = doc_with(vec![Element::paragraph("first").into(), block.into()]);

        let caret = delete_backward(&mut doc, &Point::new([1, 2], 0)).unwrap();
        assert_eq!(caret, Point::new([1, 0], 1));
        assert_eq!(doc.plain_text(), "first\nacd");
        assert_eq!(doc.children.len(), 2);
    }

    #[test]
    fn test_delete_backward_after_empty_leading_runs_joins_blocks() {
        let block = Element::new(
            ElementKind::Paragraph { align: None },
            vec![TextRun::new("").into(), TextRun::new("xy").into()],
        );
        let mut doc = doc_with(vec![Element::paragraph("first").into(), block.into()]);

        let caret = delete_backward(&mut doc, &Point::new([1, 1], 0)).unwrap();
        assert_eq!(caret, Point::new([0, 0], 5));
        assert_eq!(doc.plain_text(), "firstxy");
    }

    #[test]
    fn test_split_block_keeps_type() {
        let mut doc = doc_with(vec![Element::with_text(
            ElementKind::CheckListItem { checked: true },
            "buy milk",
        )
        .into()]);
        let caret = split_block(&mut doc, &Point::new([0, 0], 4)).unwrap();

        assert_eq!(caret, Point::new([1, 0], 0));
        assert_eq!(doc.children.len(), 2);
        let second = doc.element(&Path::from([1])).unwrap();
        assert_eq!(second.kind, ElementKind::CheckListItem { checked: false });
        assert_eq!(second.plain_text(), "milk");
    }

    #[test]
    fn test_split_block_at_end_adds_empty_block() {
        let mut doc = doc_with(vec![Element::heading(1, "Title").into()]);
        split_block(&mut doc, &Point::new([0, 0], 5)).unwrap();
        let second = doc.element(&Path::from([1])).unwrap();
        assert!(second.is_text_empty());
        assert_eq!(second.kind.heading_level(), Some(1));
    }

    #[test]
    fn test_insert_block_placement() {
        let code = || Element::with_text(ElementKind::CodeBlock { language: None }, "");

        let mut doc = two_paragraphs();
        let at = insert_block(&mut doc, &Point::new([0, 0], 0), code()).unwrap();
        assert_eq!(at, Path::from([0]));

        let mut doc = two_paragraphs();
        let at = insert_block(&mut doc, &Point::new([0, 0], 11), code()).unwrap();
        assert_eq!(at, Path::from([1]));

        let mut doc = two_paragraphs();
        let at = insert_block(&mut doc, &Point::new([0, 0], 5), code()).unwrap();
        assert_eq!(at, Path::from([1]));
        assert_eq!(doc.children.len(), 4);
        assert_eq!(doc.element(&Path::from([2])).unwrap().plain_text(), " world");

        let mut doc = doc_with(vec![Element::paragraph("").into()]);
        let at = insert_block(&mut doc, &Point::new([0, 0], 0), code()).unwrap();
        assert_eq!(at, Path::from([1]));
    }

    #[test]
    fn test_path_shifts() {
        let inserted = Path::from([0, 1]);
        assert_eq!(shift_after_insert(&Path::from([0, 1, 3]), &inserted), Path::from([0, 2, 3]));
        assert_eq!(shift_after_insert(&Path::from([0, 0]), &inserted), Path::from([0, 0]));
        assert_eq!(shift_after_insert(&Path::from([1]), &inserted), Path::from([1]));

        let removed = Path::from([1]);
        assert_eq!(shift_after_remove(&Path::from([1, 0]), &removed), None);
        assert_eq!(shift_after_remove(&Path::from([2, 0]), &removed), Some(Path::from([1, 0])));
        assert_eq!(shift_after_remove(&Path::from([0, 4]), &removed), Some(Path::from([0, 4])));
    }
}
