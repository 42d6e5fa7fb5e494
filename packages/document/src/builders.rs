//! Constructive builders for structural blocks.
//!
//! Tables and kanban boards have a fixed parent/child order
//! (table → row → cell, kanban → column → card). These builders only accept
//! the legal child type at each level, so a tree assembled through them
//! cannot be malformed. Trees decoded from JSON are checked separately with
//! [`crate::validate_nesting`].

use crate::node::{Element, ElementKind, Node};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    children: Vec<Node>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Add a row of plain-text cells
    pub fn text_row<I, S>(self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row = cells
            .into_iter()
            .fold(TableRow::new(), |row, text| row.cell(TableCell::text(text)));
        self.row(row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(mut self, cell: TableCell) -> Self {
        self.cells.push(cell);
        self
    }
}

impl TableCell {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Node::text(text)])
    }
}

impl From<TableCell> for Element {
    fn from(cell: TableCell) -> Self {
        Element::new(ElementKind::TableCell, cell.children)
    }
}

impl From<TableRow> for Element {
    fn from(row: TableRow) -> Self {
        Element::new(
            ElementKind::TableRow,
            row.cells.into_iter().map(|c| Element::from(c).into()).collect(),
        )
    }
}

impl From<Table> for Element {
    fn from(table: Table) -> Self {
        Element::new(
            ElementKind::Table,
            table.rows.into_iter().map(|r| Element::from(r).into()).collect(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kanban {
    columns: Vec<KanbanColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KanbanColumn {
    status: String,
    cards: Vec<KanbanCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KanbanCard {
    id: String,
    title: String,
    children: Vec<Node>,
}

impl Kanban {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: KanbanColumn) -> Self {
        self.columns.push(column);
        self
    }
}

impl KanbanColumn {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            cards: Vec::new(),
        }
    }

    pub fn card(mut self, card: KanbanCard) -> Self {
        self.cards.push(card);
        self
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl KanbanCard {
    /// A card's label doubles as its only text child
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            children: vec![Node::text(title.clone())],
            title,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

impl From<KanbanColumn> for Element {
    fn from(column: KanbanColumn) -> Self {
        let status = column.status;
        let cards = column
            .cards
            .into_iter()
            .map(|card| {
                // A card always carries the status of the column holding it
                Element::new(
                    ElementKind::KanbanCard {
                        id: card.id,
                        title: card.title,
                        status: status.clone(),
                    },
                    card.children,
                )
                .into()
            })
            .collect();
        Element::new(ElementKind::KanbanColumn { status }, cards)
    }
}

impl From<Kanban> for Element {
    fn from(kanban: Kanban) -> Self {
        Element::new(
            ElementKind::Kanban,
            kanban.columns.into_iter().map(|c| Element::from(c).into()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockFormat;

    #[test]
    fn test_table_builder_nests_rows_and_cells() {
        let table: Element = Table::new()
            .text_row(["Name", "Status"])
            .text_row(["Draft", "Done"])
            .into();

        assert_eq!(table.format(), Some(BlockFormat::Table));
        assert_eq!(table.children.len(), 2);

        let row = table.children[1].as_element().unwrap();
        assert_eq!(row.format(), Some(BlockFormat::TableRow));
        let cell = row.children[1].as_element().unwrap();
        assert_eq!(cell.format(), Some(BlockFormat::TableCell));
        assert_eq!(cell.plain_text(), "Done");
    }

    #[test]
    fn test_kanban_cards_take_column_status() {
        let board: Element = Kanban::new()
            .column(KanbanColumn::new("todo").card(KanbanCard::new("1", "Write")))
            .column(KanbanColumn::new("done").card(KanbanCard::new("2", "Plan")))
            .into();

        let done = board.children[1].as_element().unwrap();
        let card = done.children[0].as_element().unwrap();
        assert_eq!(
            card.kind,
            ElementKind::KanbanCard {
                id: "2".to_string(),
                title: "Plan".to_string(),
                status: "done".to_string(),
            }
        );
        assert_eq!(card.plain_text(), "Plan");
    }
}
