//! # Folio Editor
//!
//! Editing engine for Folio documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: block tree, paths, points, JSON   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Apply mutations with validation          │
//! │  - Snapshot undo/redo                       │
//! │  - Toolbar and slash-menu state             │
//! │  - Presence roster and editing lock         │
//! │  - Table and kanban collections             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: session → VNode → HTML              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: toolbar, roster and HTML are derived
//! 2. **Mutations are values**: serializable, validated before applying
//! 3. **Failed actions are no-ops**: the document never changes partially
//! 4. **Views share nothing**: table and kanban data live beside the document
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{Document, EditSession, Mark, Range};
//!
//! let mut session = EditSession::new("client-1", Document::starter());
//!
//! session.select(Some(Range::caret([0, 0], 0)));
//! session.toggle_mark(Mark::Bold);
//! session.insert_text("Hello");
//!
//! assert!(session.is_mark_active(Mark::Bold));
//! session.undo();
//! ```

mod errors;
mod mutations;
mod presence;
mod query;
mod session;
mod slash;
mod state;
mod toolbar;
mod undo_stack;

pub mod transforms;
pub mod views;

pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use presence::{
    hand_lock_to, is_locked_for, Collaborator, LocalUser, PresenceProvider, StaticPresence,
    ADJECTIVES, NOUNS, USER_COLORS,
};
pub use query::{active_block_type, active_marks, is_block_active, selected_blocks};
pub use session::{EditSession, Key, SessionOptions};
pub use slash::{SlashCommand, SlashMenu};
pub use state::EditorState;
pub use toolbar::{ToolbarButton, ToolbarControl, ToolbarState, TOOLBAR_CONTROLS};
pub use undo_stack::{MutationBatch, Snapshot, UndoStack};
pub use views::ViewMode;

// Re-export document types for convenience
pub use folio_document::{
    Align, BlockFormat, CalloutVariant, Document, DocumentError, Element, ElementKind, Mark,
    MarkSet, Node, Path, Point, Range, TextRun, PLACEHOLDER_TEXT,
};
