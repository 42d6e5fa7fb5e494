//! # Undo/Redo Stack
//!
//! Tracks editing history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each recorded step keeps a snapshot of the tree and selection from
//!   before and after it was applied
//! - Undo restores the "before" snapshot and moves the step to redo
//! - Redo restores the "after" snapshot
//! - New steps clear the redo stack
//! - Mutations that leave the tree unchanged (selection moves, pending
//!   marks) are not recorded
//! - Supports batched operations (group multiple mutations as one undo step)

use crate::mutations::{Mutation, MutationError, MutationResult};
use crate::state::EditorState;
use folio_document::{Document, Range};

/// Tree and selection at one point in history
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub document: Document,
    pub selection: Option<Range>,
}

impl Snapshot {
    fn of(state: &EditorState) -> Self {
        Self {
            document: state.document.clone(),
            selection: state.selection.clone(),
        }
    }
}

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// State before the first mutation
    pub before: Snapshot,

    /// State after the last mutation
    pub after: Snapshot,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    fn starting_at(state: &EditorState) -> Self {
        let snapshot = Snapshot::of(state);
        Self {
            mutations: Vec::new(),
            before: snapshot.clone(),
            after: snapshot,
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied batches (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone batches (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        state: &mut EditorState,
    ) -> Result<MutationResult, MutationError> {
        let before = Snapshot::of(state);
        let result = state.apply(mutation)?;

        if state.document == before.document {
            return Ok(result);
        }

        let after = Snapshot::of(state);
        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation.clone());
            batch.after = after;
        } else {
            self.push_batch(MutationBatch {
                mutations: vec![mutation.clone()],
                before,
                after,
                description: None,
            });
        }

        Ok(result)
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self, state: &EditorState) {
        self.current_batch = Some(MutationBatch::starting_at(state));
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = self.current_batch.take() {
            self.current_batch = Some(batch.with_description(description));
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // A new step invalidates anything undone
        self.redo_stack.clear();
    }

    /// Undo the most recent batch. Returns false when there is nothing to undo.
    pub fn undo(&mut self, state: &mut EditorState) -> bool {
        let Some(batch) = self.undo_stack.pop() else {
            return false;
        };
        state.restore(batch.before.document.clone(), batch.before.selection.clone());
        self.redo_stack.push(batch);
        true
    }

    /// Redo the most recently undone batch
    pub fn redo(&mut self, state: &mut EditorState) -> bool {
        let Some(batch) = self.redo_stack.pop() else {
            return false;
        };
        state.restore(batch.after.document.clone(), batch.after.selection.clone());
        self.undo_stack.push(batch);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_document::Element;

    fn typing_state() -> EditorState {
        let mut state = EditorState::new(Document::from_nodes(vec![
            Element::paragraph("Hello").into(),
        ]));
        state.selection = Some(Range::caret([0, 0], 5));
        state
    }

    fn type_text(text: &str) -> Mutation {
        Mutation::InsertText {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_undo_redo() {
        let mut state = typing_state();
        let mut stack = UndoStack::new();

        stack.apply(&type_text(" world"), &mut state).unwrap();
        assert_eq!(state.document.plain_text(), "Hello world");
        assert_eq!(stack.undo_levels(), 1);

        assert!(stack.undo(&mut state));
        assert_eq!(state.document.plain_text(), "Hello");
        assert_eq!(state.selection, Some(Range::caret([0, 0], 5)));
        assert!(stack.can_redo());

        assert!(stack.redo(&mut state));
        assert_eq!(state.document.plain_text(), "Hello world");
        assert_eq!(state.selection, Some(Range::caret([0, 0], 11)));
        assert!(!stack.redo(&mut state));
    }

    #[test]
    fn test_selection_changes_are_not_recorded() {
        let mut state = typing_state();
        let mut stack = UndoStack::new();

        stack
            .apply(&Mutation::Select { selection: None }, &mut state)
            .unwrap();
        assert_eq!(stack.undo_levels(), 0);
    }

    #[test]
    fn test_batched_mutations() {
        let mut state = typing_state();
        let mut stack = UndoStack::new();

        stack.begin_batch(&state);
        stack.set_batch_description("Type greeting");
        stack.apply(&type_text(","), &mut state).unwrap();
        stack.apply(&type_text(" there"), &mut state).unwrap();
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Type greeting"));

        stack.undo(&mut state);
        assert_eq!(state.document.plain_text(), "Hello");
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut state = typing_state();
        let mut stack = UndoStack::new();

        stack.apply(&type_text("!"), &mut state).unwrap();
        stack.undo(&mut state);
        assert_eq!(stack.redo_levels(), 1);

        stack.apply(&type_text("?"), &mut state).unwrap();
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut state = typing_state();
        let mut stack = UndoStack::with_max_levels(2);

        for i in 0..3 {
            stack.apply(&type_text(&i.to_string()), &mut state).unwrap();
        }
        assert_eq!(stack.undo_levels(), 2);
    }
}
