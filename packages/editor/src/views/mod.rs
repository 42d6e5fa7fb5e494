//! View Mode Controller.
//!
//! Three mutually exclusive surfaces. Table and kanban own their own record
//! collections, so switching views never loses or resets anything.

mod kanban;
mod table;

pub use kanban::{DragPayload, KanbanBoard, KanbanCardData, KanbanColumnData};
pub use table::{
    display_date, CellEdit, StatusCategory, TableEvent, TableField, TableRowData, TableView,
    STATUS_OPTIONS,
};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Document,
    Table,
    Kanban,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown view mode: {0}")]
pub struct UnknownViewMode(pub String);

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Document, ViewMode::Table, ViewMode::Kanban];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Document => "document",
            ViewMode::Table => "table",
            ViewMode::Kanban => "kanban",
        }
    }

    /// Button label in the view switch
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Document => "Doc",
            ViewMode::Table => "Table",
            ViewMode::Kanban => "Kanban",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownViewMode(s.to_string()))
    }
}

/// One more than the largest numeric id in `ids`. Past `u64::MAX` this
/// falls back to the smallest number not already taken.
pub(crate) fn next_numeric_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = ids.into_iter().collect();
    let max = taken.iter().filter_map(|id| id.parse::<u64>().ok()).max();

    match max.unwrap_or(0).checked_add(1) {
        Some(next) => next.to_string(),
        None => (1..=u64::MAX)
            .map(|n| n.to_string())
            .find(|id| !taken.contains(id.as_str()))
            .unwrap_or_else(|| "0".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("kanban".parse::<ViewMode>(), Ok(ViewMode::Kanban));
        assert_eq!(ViewMode::default(), ViewMode::Document);
        assert!("grid".parse::<ViewMode>().is_err());
        assert_eq!(serde_json::to_string(&ViewMode::Table).unwrap(), "\"table\"");
    }

    #[test]
    fn test_next_numeric_id() {
        assert_eq!(next_numeric_id(Vec::<&str>::new()), "1");
        assert_eq!(next_numeric_id(["3", "draft", "10"]), "11");

        let max = u64::MAX.to_string();
        assert_eq!(next_numeric_id([max.as_str(), "1", "2", "4"]), "3");
    }
}
