//! # Editing Mutations
//!
//! High-level editing commands applied to an [`EditorState`].
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation is one user action (a toolbar
//!    click, a keystroke, a slash command)
//! 2. **Validated**: preconditions are checked before the tree is touched
//! 3. **Selection-aware**: every mutation leaves a selection that points
//!    into the new tree
//!
//! ## Mutation Semantics
//!
//! ### ToggleMark
//! - Ranged selection: sets the mark on every covered run, or clears it when
//!   it is already active across the range
//! - Collapsed caret: flips the mark in the pending marks used by the next
//!   typed text
//!
//! ### SetBlockType
//! - Retypes the nearest block of every selected run
//! - Reverts to paragraph when the format is already active (a toggle)
//!
//! ### InsertNode
//! - Deletes the target range, then inserts the node where it collapsed
//! - A missing target is an error the session turns into a no-op

use crate::query;
use crate::state::EditorState;
use crate::transforms;
use folio_document::{
    BlockFormat, Document, DocumentError, ElementKind, Mark, Node, Path, Point, Range,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Editing commands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Flip a mark over the selection
    ToggleMark { mark: Mark },

    /// Retype the selected blocks, or revert them to paragraphs
    SetBlockType { format: BlockFormat },

    /// Replace `at` with `node`
    InsertNode { at: Option<Range>, node: Node },

    /// Remove the content of a range
    DeleteRange { range: Range },

    /// Type text at the selection, replacing it if expanded
    InsertText { text: String },

    /// Split the current block in two (Enter)
    SplitBlock,

    /// Delete one character backward, or the expanded selection (Backspace)
    DeleteBackward,

    /// Remove a node and everything below it
    RemoveNode { path: Path },

    /// Tick or untick a check-list item
    SetChecked { path: Path, checked: bool },

    /// Move or clear the selection
    Select { selection: Option<Range> },

    /// Rename the document
    SetTitle { title: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("No selection")]
    NoSelection,

    #[error("No target range")]
    NoTarget,

    #[error("Node not found: {0}")]
    NodeNotFound(Path),

    #[error("Node at {0} is not a check-list item")]
    NotCheckListItem(Path),

    #[error("{0} is not a text block format")]
    UnsupportedFormat(BlockFormat),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after mutation
    pub version: u64,
}

fn check_range(doc: &Document, range: &Range) -> Result<(), MutationError> {
    transforms::check_point(doc, &range.anchor)?;
    transforms::check_point(doc, &range.focus)?;
    Ok(())
}

fn require_selection(state: &EditorState) -> Result<Range, MutationError> {
    let range = state.selection.clone().ok_or(MutationError::NoSelection)?;
    check_range(&state.document, &range)?;
    Ok(range)
}

/// Caret for a node at `path`: its first position, or the nearest text
/// around it when it holds none
fn caret_near(doc: &Document, path: &Path) -> Option<Point> {
    if let Some(point) = doc.start_point(path) {
        return Some(point);
    }
    let leaves = doc.leaf_paths();
    if let Some(after) = leaves.iter().find(|leaf| *leaf > path) {
        return Some(Point::new(after.clone(), 0));
    }
    let before = leaves.into_iter().filter(|leaf| leaf < path).last()?;
    doc.end_point(&before)
}

fn remap_after_remove(point: &Point, removed: &Path) -> Option<Point> {
    let path = transforms::shift_after_remove(&point.path, removed)?;
    Some(Point::new(path, point.offset))
}

impl Mutation {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::ToggleMark { .. } => "toggle-mark",
            Mutation::SetBlockType { .. } => "set-block-type",
            Mutation::InsertNode { .. } => "insert-node",
            Mutation::DeleteRange { .. } => "delete-range",
            Mutation::InsertText { .. } => "insert-text",
            Mutation::SplitBlock => "split-block",
            Mutation::DeleteBackward => "delete-backward",
            Mutation::RemoveNode { .. } => "remove-node",
            Mutation::SetChecked { .. } => "set-checked",
            Mutation::Select { .. } => "select",
            Mutation::SetTitle { .. } => "set-title",
        }
    }

    /// Formatting controls disabled while someone else holds the edit lock
    pub fn is_toolbar_control(&self) -> bool {
        matches!(
            self,
            Mutation::ToggleMark { .. } | Mutation::SetBlockType { .. }
        )
    }

    /// Check preconditions without touching the state
    pub fn validate(&self, state: &EditorState) -> Result<(), MutationError> {
        let doc = &state.document;
        match self {
            Mutation::ToggleMark { .. }
            | Mutation::InsertText { .. }
            | Mutation::SplitBlock
            | Mutation::DeleteBackward => require_selection(state).map(|_| ()),

            Mutation::SetBlockType { format } => {
                if !format.is_text_block() {
                    return Err(MutationError::UnsupportedFormat(*format));
                }
                require_selection(state).map(|_| ())
            }

            Mutation::InsertNode { at, node } => {
                let range = at.as_ref().ok_or(MutationError::NoTarget)?;
                check_range(doc, range)?;
                if let Some(format) = node.as_element().and_then(|element| element.format()) {
                    if let Some(parent) = format.required_parent() {
                        return Err(MutationError::InvalidStructure(format!(
                            "{} must be inside {}",
                            format, parent
                        )));
                    }
                }
                Ok(())
            }

            Mutation::DeleteRange { range } => check_range(doc, range),

            Mutation::RemoveNode { path } => match doc.node(path) {
                Some(_) => Ok(()),
                None => Err(MutationError::NodeNotFound(path.clone())),
            },

            Mutation::SetChecked { path, .. } => match &doc.element(path)?.kind {
                ElementKind::CheckListItem { .. } => Ok(()),
                _ => Err(MutationError::NotCheckListItem(path.clone())),
            },

            Mutation::Select { selection } => match selection {
                Some(range) => check_range(doc, range),
                None => Ok(()),
            },

            Mutation::SetTitle { .. } => Ok(()),
        }
    }

    /// Apply mutation with validation
    pub fn apply(&self, state: &mut EditorState) -> Result<(), MutationError> {
        self.validate(state)?;

        match self {
            Mutation::ToggleMark { mark } => Self::apply_toggle_mark(state, *mark),
            Mutation::SetBlockType { format } => Self::apply_set_block_type(state, *format),
            Mutation::InsertNode { at, node } => Self::apply_insert_node(state, at, node),
            Mutation::DeleteRange { range } => {
                let caret = transforms::delete_range(&mut state.document, range)?;
                state.selection = Some(Range::collapsed(caret));
                state.pending_marks = None;
                Ok(())
            }
            Mutation::InsertText { text } => Self::apply_insert_text(state, text),
            Mutation::SplitBlock => Self::apply_split_block(state),
            Mutation::DeleteBackward => Self::apply_delete_backward(state),
            Mutation::RemoveNode { path } => Self::apply_remove_node(state, path),
            Mutation::SetChecked { path, checked } => {
                if let ElementKind::CheckListItem { checked: value } =
                    &mut state.document.element_mut(path)?.kind
                {
                    *value = *checked;
                }
                Ok(())
            }
            Mutation::Select { selection } => {
                state.selection = selection.clone();
                state.pending_marks = None;
                Ok(())
            }
            Mutation::SetTitle { title } => {
                state.document.title = title.clone();
                Ok(())
            }
        }
    }

    fn apply_toggle_mark(state: &mut EditorState, mark: Mark) -> Result<(), MutationError> {
        let range = require_selection(state)?;
        let active = state.is_mark_active(mark);

        if range.is_collapsed() {
            let mut marks = state.active_marks();
            marks.set(mark, !active);
            state.pending_marks = Some(marks);
        } else {
            let remapped =
                transforms::set_mark_in_range(&mut state.document, &range, mark, !active)?;
            state.selection = Some(remapped);
            state.pending_marks = None;
        }
        Ok(())
    }

    fn apply_set_block_type(
        state: &mut EditorState,
        format: BlockFormat,
    ) -> Result<(), MutationError> {
        let range = require_selection(state)?;
        let target = if query::is_block_active(&state.document, Some(&range), format) {
            BlockFormat::Paragraph
        } else {
            format
        };

        for block in query::selected_blocks(&state.document, &range) {
            let element = state.document.element_mut(&block)?;
            element.kind = ElementKind::from_format(target, &element.kind);
        }
        Ok(())
    }

    fn apply_insert_node(
        state: &mut EditorState,
        at: &Option<Range>,
        node: &Node,
    ) -> Result<(), MutationError> {
        let range = at.as_ref().ok_or(MutationError::NoTarget)?;
        let doc = &mut state.document;
        let point = transforms::delete_range(doc, range)?;

        let caret = match node.clone() {
            Node::Text(run) => {
                let end = transforms::insert_run(doc, &point, run)?;
                Some(Point::new(end.path, 0))
            }
            Node::Element(element) => {
                let path = transforms::insert_block(doc, &point, element)?;
                caret_near(doc, &path)
            }
        };

        state.selection = caret.map(Range::collapsed);
        state.pending_marks = None;
        Ok(())
    }

    fn apply_insert_text(state: &mut EditorState, text: &str) -> Result<(), MutationError> {
        if text.is_empty() {
            return Ok(());
        }
        let range = require_selection(state)?;
        let point = transforms::delete_range(&mut state.document, &range)?;
        let caret =
            transforms::insert_text(&mut state.document, &point, text, state.pending_marks)?;

        state.selection = Some(Range::collapsed(caret));
        state.pending_marks = None;
        Ok(())
    }

    fn apply_split_block(state: &mut EditorState) -> Result<(), MutationError> {
        let range = require_selection(state)?;
        let point = transforms::delete_range(&mut state.document, &range)?;
        let caret = transforms::split_block(&mut state.document, &point)?;

        state.selection = Some(Range::collapsed(caret));
        state.pending_marks = None;
        Ok(())
    }

    fn apply_delete_backward(state: &mut EditorState) -> Result<(), MutationError> {
        let range = require_selection(state)?;
        let caret = if range.is_collapsed() {
            transforms::delete_backward(&mut state.document, &range.anchor)?
        } else {
            transforms::delete_range(&mut state.document, &range)?
        };

        state.selection = Some(Range::collapsed(caret));
        state.pending_marks = None;
        Ok(())
    }

    fn apply_remove_node(state: &mut EditorState, path: &Path) -> Result<(), MutationError> {
        state.document.remove_node(path)?;

        if let Some(range) = state.selection.take() {
            let remapped = match (
                remap_after_remove(&range.anchor, path),
                remap_after_remove(&range.focus, path),
            ) {
                (Some(anchor), Some(focus)) => Some(Range::new(anchor, focus)),
                _ => caret_near(&state.document, path).map(Range::collapsed),
            };
            state.selection = remapped;
        }
        state.pending_marks = None;
        Ok(())
    }
}
