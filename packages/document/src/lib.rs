//! # Folio Document
//!
//! The structured document model behind the Folio editor.
//!
//! ## Shape
//!
//! ```text
//! Document
//!  └─ Node::Element (paragraph, heading, lists, callout, table, kanban, ...)
//!      ├─ Node::Element ...
//!      └─ Node::Text (TextRun: text + bold/italic/underline/code + colors)
//! ```
//!
//! Element types form a closed set ([`ElementKind`]); anything else decoded
//! from JSON is kept as [`ElementKind::Unknown`] so that every consumer
//! still has an exhaustive match and rendering never fails.

mod builders;
mod codec;
mod document;
mod error;
mod format;
mod node;
mod path;
mod validate;
pub mod visitor;

pub use builders::{Kanban, KanbanCard, KanbanColumn, Table, TableCell, TableRow};
pub use document::{Document, DEFAULT_TITLE, PLACEHOLDER_TEXT};
pub use error::{DocumentError, DocumentResult};
pub use format::{BlockFormat, UnknownFormat};
pub use node::{
    Align, CalloutVariant, Element, ElementKind, Mark, MarkSet, Node, TextRun,
    FALLBACK_HEADING_LEVEL,
};
pub use path::{Path, Point, Range};
pub use validate::{validate_nesting, NestingViolation};
