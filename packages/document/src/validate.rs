//! Structural nesting checks for decoded trees.

use crate::document::Document;
use crate::format::BlockFormat;
use crate::node::{Element, ElementKind, Node, TextRun};
use crate::path::Path;
use crate::visitor::{walk_element, Visitor};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "problem", rename_all = "kebab-case")]
pub enum NestingViolation {
    /// A structural block outside its required parent
    MisplacedChild {
        path: Path,
        format: BlockFormat,
        expected_parent: BlockFormat,
    },

    /// A structural container holding something other than its child type
    UnexpectedChild {
        path: Path,
        parent: BlockFormat,
        found: String,
    },

    /// A kanban card whose status differs from its column
    StatusMismatch {
        path: Path,
        card_status: String,
        column_status: String,
    },
}

impl fmt::Display for NestingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestingViolation::MisplacedChild {
                path,
                format,
                expected_parent,
            } => write!(f, "{} at {} must be inside {}", format, path, expected_parent),
            NestingViolation::UnexpectedChild {
                path,
                parent,
                found,
            } => write!(f, "{} at {} cannot hold {}", parent, path, found),
            NestingViolation::StatusMismatch {
                path,
                card_status,
                column_status,
            } => write!(
                f,
                "card at {} has status {} inside column {}",
                path, card_status, column_status
            ),
        }
    }
}

/// Child format a structural container accepts
fn required_child(parent: BlockFormat) -> Option<BlockFormat> {
    match parent {
        BlockFormat::Table => Some(BlockFormat::TableRow),
        BlockFormat::TableRow => Some(BlockFormat::TableCell),
        BlockFormat::Kanban => Some(BlockFormat::KanbanColumn),
        BlockFormat::KanbanColumn => Some(BlockFormat::KanbanCard),
        _ => None,
    }
}

#[derive(Default)]
struct NestingChecker {
    parents: Vec<Option<BlockFormat>>,
    violations: Vec<NestingViolation>,
}

impl NestingChecker {
    fn current_parent(&self) -> Option<BlockFormat> {
        self.parents.last().copied().flatten()
    }

    fn check_child(&mut self, path: &Path, found: Option<BlockFormat>, label: &str) {
        let Some(parent) = self.current_parent() else {
            return;
        };
        if let Some(expected) = required_child(parent) {
            if found != Some(expected) {
                let parent_path = path.parent().unwrap_or_default();
                self.violations.push(NestingViolation::UnexpectedChild {
                    path: parent_path,
                    parent,
                    found: label.to_string(),
                });
            }
        }
    }
}

impl Visitor for NestingChecker {
    fn visit_element(&mut self, path: &Path, element: &Element) {
        let format = element.format();
        self.check_child(path, format, element.kind.tag());

        if let Some(format) = format {
            if let Some(expected_parent) = format.required_parent() {
                if self.current_parent() != Some(expected_parent) {
                    self.violations.push(NestingViolation::MisplacedChild {
                        path: path.clone(),
                        format,
                        expected_parent,
                    });
                }
            }
        }

        if let ElementKind::KanbanColumn { status: column_status } = &element.kind {
            for (index, child) in element.children.iter().enumerate() {
                if let Node::Element(Element {
                    kind: ElementKind::KanbanCard { status, .. },
                    ..
                }) = child
                {
                    if status != column_status {
                        self.violations.push(NestingViolation::StatusMismatch {
                            path: path.child(index),
                            card_status: status.clone(),
                            column_status: column_status.clone(),
                        });
                    }
                }
            }
        }

        self.parents.push(format);
        walk_element(self, path, element);
        self.parents.pop();
    }

    fn visit_text(&mut self, path: &Path, _run: &TextRun) {
        self.check_child(path, None, "text");
    }
}

/// Report every table/kanban nesting problem in `doc`
pub fn validate_nesting(doc: &Document) -> Vec<NestingViolation> {
    let mut checker = NestingChecker::default();
    checker.visit_document(doc);
    checker.violations
}
