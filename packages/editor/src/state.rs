//! # Editor State
//!
//! The document being edited plus everything the editor tracks about the
//! user's position in it. Owned by exactly one session.

use crate::mutations::{Mutation, MutationError, MutationResult};
use crate::query;
use folio_document::{BlockFormat, Document, Mark, MarkSet, Range};

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub document: Document,

    /// Current selection, if the editor has focus
    pub selection: Option<Range>,

    /// Marks for the next typed text at a collapsed caret
    pub pending_marks: Option<MarkSet>,

    /// Current version number (increments on each mutation)
    pub version: u64,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
            pending_marks: None,
            version: 0,
        }
    }

    /// Apply a mutation and bump the version
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        mutation.apply(self)?;
        self.version += 1;
        Ok(MutationResult {
            version: self.version,
        })
    }

    /// Marks shown as active. Pending marks win at a collapsed caret.
    pub fn active_marks(&self) -> MarkSet {
        if let (Some(range), Some(pending)) = (&self.selection, self.pending_marks) {
            if range.is_collapsed() && self.document.is_valid_point(&range.anchor) {
                return pending;
            }
        }
        query::active_marks(&self.document, self.selection.as_ref())
    }

    pub fn is_mark_active(&self, mark: Mark) -> bool {
        self.active_marks().contains(mark)
    }

    pub fn active_block_type(&self) -> Option<BlockFormat> {
        query::active_block_type(&self.document, self.selection.as_ref())
    }

    pub fn is_block_active(&self, format: BlockFormat) -> bool {
        query::is_block_active(&self.document, self.selection.as_ref(), format)
    }

    /// Replace the tree and selection wholesale (undo/redo)
    pub(crate) fn restore(&mut self, document: Document, selection: Option<Range>) {
        self.document = document;
        self.selection = selection;
        self.pending_marks = None;
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_document::{Element, Point};

    #[test]
    fn test_version_increments_on_success_only() {
        let mut state = EditorState::new(Document::from_nodes(vec![
            Element::paragraph("text").into(),
        ]));

        let result = state
            .apply(&Mutation::Select {
                selection: Some(Range::caret([0, 0], 2)),
            })
            .unwrap();
        assert_eq!(result.version, 1);

        let failed = state.apply(&Mutation::DeleteRange {
            range: Range::new(Point::new([0, 0], 0), Point::new([3, 0], 0)),
        });
        assert!(failed.is_err());
        assert_eq!(state.version, 1);
    }

    #[test]
    fn test_pending_marks_ignored_for_ranges() {
        let mut state = EditorState::new(Document::from_nodes(vec![
            Element::paragraph("text").into(),
        ]));
        state.pending_marks = Some(MarkSet::empty().with(Mark::Bold));

        state.selection = Some(Range::caret([0, 0], 1));
        assert!(state.is_mark_active(Mark::Bold));

        state.selection = Some(Range::new(Point::new([0, 0], 0), Point::new([0, 0], 4)));
        assert!(!state.is_mark_active(Mark::Bold));
    }
}
