//! Table view: an editable grid of task rows.
//!
//! Rows are plain records, independent of the document tree. A cell is
//! edited by clicking it, changing a pending value and committing: Enter
//! or blur for the name, blur for the date, picking an option for the
//! status.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const STATUS_OPTIONS: [&str; 3] = ["To Do", "In Progress", "Done"];

const NEW_ROW_NAME: &str = "New Item";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRowData {
    pub id: String,
    pub name: String,
    pub status: String,
    pub date: String,
}

impl TableRowData {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: status.into(),
            date: date.into(),
        }
    }

    pub fn field(&self, field: TableField) -> &str {
        match field {
            TableField::Name => &self.name,
            TableField::Status => &self.status,
            TableField::Date => &self.date,
        }
    }

    fn set_field(&mut self, field: TableField, value: String) {
        match field {
            TableField::Name => self.name = value,
            TableField::Status => self.status = value,
            TableField::Date => self.date = value,
        }
    }

    pub fn status_category(&self) -> StatusCategory {
        StatusCategory::of(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableField {
    Name,
    Status,
    Date,
}

/// Visual bucket of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusCategory {
    Done,
    InProgress,
    Other,
}

impl StatusCategory {
    pub fn of(status: &str) -> Self {
        match status {
            "Done" => StatusCategory::Done,
            "In Progress" => StatusCategory::InProgress,
            _ => StatusCategory::Other,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            StatusCategory::Done => {
                "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-200"
            }
            StatusCategory::InProgress => {
                "bg-blue-100 text-blue-800 dark:bg-blue-900 dark:text-blue-200"
            }
            StatusCategory::Other => {
                "bg-gray-100 text-gray-800 dark:bg-gray-800 dark:text-gray-200"
            }
        }
    }
}

/// Cell currently in edit mode and its uncommitted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellEdit {
    pub row_id: String,
    pub field: TableField,
    pub value: String,
}

/// Host events the grid reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TableEvent {
    Click { row_id: String, field: TableField },
    Input { value: String },
    Enter,
    Blur,
    SelectStatus { value: String },
}

/// Display form of a stored date: month/day/year, or "Invalid Date"
pub fn display_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw.trim())
                .ok()
                .map(|dt| dt.date_naive())
        });
    match date {
        Some(date) => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        None => "Invalid Date".to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    rows: Vec<TableRowData>,
    editing: Option<CellEdit>,
}

impl TableView {
    pub fn new(rows: Vec<TableRowData>) -> Self {
        Self {
            rows,
            editing: None,
        }
    }

    /// Sample task rows
    pub fn demo() -> Self {
        Self::new(vec![
            TableRowData::new("1", "Project Overview", "To Do", "2023-04-15"),
            TableRowData::new("2", "Research Phase", "In Progress", "2023-04-16"),
            TableRowData::new("3", "Design Mockups", "In Progress", "2023-04-17"),
            TableRowData::new("4", "Content Writing", "To Do", "2023-04-18"),
            TableRowData::new("5", "Initial Testing", "Done", "2023-04-19"),
        ])
    }

    pub fn rows(&self) -> &[TableRowData] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&TableRowData> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn editing(&self) -> Option<&CellEdit> {
        self.editing.as_ref()
    }

    /// Enter edit mode on a cell, seeding the pending value from the row
    pub fn start_editing(&mut self, row_id: &str, field: TableField) -> bool {
        let Some(row) = self.row(row_id) else {
            return false;
        };
        self.editing = Some(CellEdit {
            row_id: row.id.clone(),
            field,
            value: row.field(field).to_string(),
        });
        true
    }

    pub fn set_edit_value(&mut self, value: impl Into<String>) -> bool {
        match &mut self.editing {
            Some(edit) => {
                edit.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Write the pending value into its row and leave edit mode. Values are
    /// stored as typed; only the date display parses them.
    pub fn commit_edit(&mut self) -> bool {
        let Some(edit) = self.editing.take() else {
            return false;
        };
        match self.rows.iter_mut().find(|row| row.id == edit.row_id) {
            Some(row) => {
                debug!(row = %edit.row_id, field = ?edit.field, "Committing table edit");
                row.set_field(edit.field, edit.value);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Route a host event. Returns true when table state changed.
    pub fn handle(&mut self, event: TableEvent) -> bool {
        let field = self.editing.as_ref().map(|edit| edit.field);
        match event {
            TableEvent::Click { row_id, field } => self.start_editing(&row_id, field),
            TableEvent::Input { value } => self.set_edit_value(value),
            TableEvent::Enter if field == Some(TableField::Name) => self.commit_edit(),
            TableEvent::Blur if matches!(field, Some(TableField::Name | TableField::Date)) => {
                self.commit_edit()
            }
            TableEvent::SelectStatus { value } if field == Some(TableField::Status) => {
                self.set_edit_value(value);
                self.commit_edit()
            }
            TableEvent::Enter | TableEvent::Blur | TableEvent::SelectStatus { .. } => false,
        }
    }

    /// One more than the largest numeric id; ids that are not numbers are
    /// skipped
    pub fn next_id(&self) -> String {
        super::next_numeric_id(self.rows.iter().map(|row| row.id.as_str()))
    }

    /// Append a "New Item" row dated `today`
    pub fn add_row_on(&mut self, today: NaiveDate) -> &TableRowData {
        let row = TableRowData::new(
            self.next_id(),
            NEW_ROW_NAME,
            STATUS_OPTIONS[0],
            today.format(DATE_FORMAT).to_string(),
        );
        debug!(id = %row.id, "Adding table row");
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    pub fn add_row(&mut self) -> &TableRowData {
        self.add_row_on(Local::now().date_naive())
    }

    /// Remove a row; removing the last one leaves an empty table
    pub fn delete_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        if self.editing.as_ref().map(|e| e.row_id.as_str()) == Some(id) {
            self.editing = None;
        }
        self.rows.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2023-04-15"), "4/15/2023");
        assert_eq!(display_date("2023-12-01T10:00:00Z"), "12/1/2023");
        assert_eq!(display_date("next tuesday"), "Invalid Date");
    }

    #[test]
    fn test_status_edit_switches_category() {
        let mut table = TableView::demo();
        let untouched: Vec<_> = table.rows().iter().filter(|r| r.id != "3").cloned().collect();

        assert!(table.handle(TableEvent::Click {
            row_id: "3".to_string(),
            field: TableField::Status,
        }));
        assert!(table.handle(TableEvent::SelectStatus {
            value: "Done".to_string(),
        }));

        let row = table.row("3").unwrap();
        assert_eq!(row.status, "Done");
        assert_eq!(row.status_category(), StatusCategory::Done);
        assert!(table.editing().is_none());

        let others: Vec<_> = table.rows().iter().filter(|r| r.id != "3").cloned().collect();
        assert_eq!(others, untouched);
    }

    #[test]
    fn test_enter_commits_name_only() {
        let mut table = TableView::demo();
        table.start_editing("1", TableField::Date);
        table.set_edit_value("2024-01-01");
        assert!(!table.handle(TableEvent::Enter));
        assert!(table.editing().is_some());
        assert!(table.handle(TableEvent::Blur));
        assert_eq!(table.row("1").unwrap().date, "2024-01-01");

        table.start_editing("1", TableField::Name);
        table.handle(TableEvent::Input {
            value: "Kickoff".to_string(),
        });
        assert!(table.handle(TableEvent::Enter));
        assert_eq!(table.row("1").unwrap().name, "Kickoff");
    }

    #[test]
    fn test_unvalidated_date_is_stored() {
        let mut table = TableView::demo();
        table.start_editing("2", TableField::Date);
        table.set_edit_value("soon");
        table.commit_edit();
        assert_eq!(table.row("2").unwrap().date, "soon");
        assert_eq!(display_date(&table.row("2").unwrap().date), "Invalid Date");
    }

    #[test]
    fn test_add_and_delete_rows() {
        let mut table = TableView::demo();
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let row = table.add_row_on(today).clone();
        assert_eq!(row, TableRowData::new("6", "New Item", "To Do", "2024-03-09"));

        for id in ["1", "2", "3", "4", "5", "6"] {
            assert!(table.delete_row(id));
        }
        assert!(table.rows().is_empty());
        assert!(!table.delete_row("1"));
        assert_eq!(table.next_id(), "1");
    }

    #[test]
    fn test_add_row_after_largest_id() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let mut table = TableView::new(vec![
            TableRowData::new(u64::MAX.to_string(), "Last", "Done", "2024-01-01"),
            TableRowData::new("1", "First", "To Do", "2024-01-02"),
        ]);

        assert_eq!(table.add_row_on(today).id, "2");
        assert_eq!(table.add_row_on(today).id, "3");
    }
}
