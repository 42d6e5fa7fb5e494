//! Kanban board: cards grouped into status columns.
//!
//! Drag and drop moves a card between columns. Dropping on the column it
//! came from does nothing; there is no reordering inside a column.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanCardData {
    pub id: String,
    pub title: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanColumnData {
    pub id: String,
    pub title: String,
    pub cards: Vec<KanbanCardData>,
}

impl KanbanColumnData {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cards: Vec::new(),
        }
    }

    /// Add a card that takes this column's id as its status
    pub fn with_card(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        let status = self.id.clone();
        self.cards.push(KanbanCardData {
            id: id.into(),
            title: title.into(),
            status,
        });
        self
    }
}

/// What a drag start attaches to the drag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub card_id: String,
    pub source_column_id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KanbanBoard {
    columns: Vec<KanbanColumnData>,

    /// Column showing the "new card" form
    adding_to: Option<String>,
    draft_title: String,
}

impl KanbanBoard {
    pub fn new(columns: Vec<KanbanColumnData>) -> Self {
        Self {
            columns,
            adding_to: None,
            draft_title: String::new(),
        }
    }

    /// The three status columns, without cards
    pub fn empty_columns() -> Self {
        Self::new(vec![
            KanbanColumnData::new("todo", "To Do"),
            KanbanColumnData::new("inprogress", "In Progress"),
            KanbanColumnData::new("done", "Done"),
        ])
    }

    /// Status columns with sample cards
    pub fn demo() -> Self {
        Self::new(vec![
            KanbanColumnData::new("todo", "To Do")
                .with_card("1", "Project Overview")
                .with_card("2", "Research Phase")
                .with_card("3", "Content Outline"),
            KanbanColumnData::new("inprogress", "In Progress")
                .with_card("4", "Design Mockups")
                .with_card("5", "Frontend Development"),
            KanbanColumnData::new("done", "Done")
                .with_card("6", "Project Planning")
                .with_card("7", "Requirements Gathering"),
        ])
    }

    pub fn columns(&self) -> &[KanbanColumnData] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&KanbanColumnData> {
        self.columns.iter().find(|column| column.id == id)
    }

    fn column_mut(&mut self, id: &str) -> Option<&mut KanbanColumnData> {
        self.columns.iter_mut().find(|column| column.id == id)
    }

    pub fn drag_start(&self, card_id: &str, source_column_id: &str) -> DragPayload {
        DragPayload {
            card_id: card_id.to_string(),
            source_column_id: source_column_id.to_string(),
        }
    }

    /// Move the dragged card to the end of `target_column_id`, rewriting its
    /// status. Returns false when nothing moved.
    pub fn drop_card(&mut self, payload: &DragPayload, target_column_id: &str) -> bool {
        if payload.source_column_id == target_column_id {
            return false;
        }
        if self.column(target_column_id).is_none() {
            debug!(target = %target_column_id, "Drop onto unknown column ignored");
            return false;
        }

        let Some(source) = self.column_mut(&payload.source_column_id) else {
            return false;
        };
        let Some(index) = source.cards.iter().position(|card| card.id == payload.card_id) else {
            return false;
        };
        let mut card = source.cards.remove(index);
        card.status = target_column_id.to_string();

        debug!(
            card = %card.id,
            from = %payload.source_column_id,
            to = %target_column_id,
            "Moving kanban card"
        );
        if let Some(target) = self.column_mut(target_column_id) {
            target.cards.push(card);
        }
        true
    }

    /// One more than the largest numeric card id on the board
    pub fn next_card_id(&self) -> String {
        super::next_numeric_id(
            self.columns
                .iter()
                .flat_map(|column| column.cards.iter())
                .map(|card| card.id.as_str()),
        )
    }

    /// Append a card to a column. Blank titles are refused.
    pub fn add_card(&mut self, column_id: &str, title: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = self.next_card_id();
        let column = self.column_mut(column_id)?;
        column.cards.push(KanbanCardData {
            id: id.clone(),
            title: title.to_string(),
            status: column.id.clone(),
        });
        Some(id)
    }

    pub fn delete_card(&mut self, card_id: &str, column_id: &str) -> bool {
        let Some(column) = self.column_mut(column_id) else {
            return false;
        };
        let before = column.cards.len();
        column.cards.retain(|card| card.id != card_id);
        column.cards.len() != before
    }

    /// Show the new-card form on a column
    pub fn start_adding(&mut self, column_id: &str) -> bool {
        if self.column(column_id).is_none() {
            return false;
        }
        self.adding_to = Some(column_id.to_string());
        true
    }

    pub fn adding_to(&self) -> Option<&str> {
        self.adding_to.as_deref()
    }

    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft_title = title.into();
    }

    /// Hide the form. The draft text survives for the next open.
    pub fn cancel_adding(&mut self) {
        self.adding_to = None;
    }

    /// Add the drafted card to the open column and reset the form
    pub fn submit_draft(&mut self) -> Option<String> {
        let column_id = self.adding_to.clone()?;
        let draft = self.draft_title.clone();
        let id = self.add_card(&column_id, &draft)?;
        self.draft_title.clear();
        self.adding_to = None;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(board: &KanbanBoard, column: &str) -> Vec<String> {
        board
            .column(column)
            .unwrap()
            .cards
            .iter()
            .map(|card| card.title.clone())
            .collect()
    }

    #[test]
    fn test_drop_moves_card_and_rewrites_status() {
        let mut board = KanbanBoard::demo();
        let payload = board.drag_start("2", "todo");

        assert!(board.drop_card(&payload, "done"));
        assert_eq!(titles(&board, "todo"), vec!["Project Overview", "Content Outline"]);
        assert_eq!(
            titles(&board, "done"),
            vec!["Project Planning", "Requirements Gathering", "Research Phase"]
        );

        let moved = board.column("done").unwrap().cards.last().unwrap();
        assert_eq!(moved.status, "done");
    }

    #[test]
    fn test_drop_on_source_column_is_noop() {
        let mut board = KanbanBoard::demo();
        let before = board.clone();
        let payload = board.drag_start("1", "todo");

        assert!(!board.drop_card(&payload, "todo"));
        assert_eq!(board, before);
    }

    #[test]
    fn test_drop_on_missing_column_keeps_card() {
        let mut board = KanbanBoard::demo();
        let before = board.clone();
        let payload = board.drag_start("1", "todo");

        assert!(!board.drop_card(&payload, "archive"));
        assert_eq!(board, before);
    }

    #[test]
    fn test_add_card_requires_title() {
        let mut board = KanbanBoard::demo();
        assert_eq!(board.add_card("todo", "   "), None);

        let id = board.add_card("inprogress", "  Write docs ").unwrap();
        assert_eq!(id, "8");
        let card = board.column("inprogress").unwrap().cards.last().unwrap();
        assert_eq!(card.title, "Write docs");
        assert_eq!(card.status, "inprogress");
    }

    #[test]
    fn test_add_card_after_largest_id() {
        let mut board = KanbanBoard::new(vec![
            KanbanColumnData::new("todo", "To Do").with_card(u64::MAX.to_string(), "Edge"),
            KanbanColumnData::new("done", "Done").with_card("1", "Plan"),
        ]);

        assert_eq!(board.add_card("todo", "Next").as_deref(), Some("2"));
        assert_eq!(board.column("todo").unwrap().cards.len(), 2);
    }

    #[test]
    fn test_draft_form() {
        let mut board = KanbanBoard::demo();
        assert!(board.start_adding("done"));
        board.set_draft_title("Ship it");
        assert_eq!(board.submit_draft(), Some("8".to_string()));
        assert_eq!(board.adding_to(), None);
        assert_eq!(board.draft_title(), "");
        assert_eq!(titles(&board, "done").last().unwrap(), "Ship it");
    }

    #[test]
    fn test_delete_last_card_leaves_empty_column() {
        let mut board = KanbanBoard::demo();
        assert!(board.delete_card("4", "inprogress"));
        assert!(board.delete_card("5", "inprogress"));
        assert!(board.column("inprogress").unwrap().cards.is_empty());
        assert!(!board.delete_card("5", "inprogress"));
    }
}
