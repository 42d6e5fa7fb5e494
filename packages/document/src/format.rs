//! Block formats: the type tags the toolbar, slash menu and queries speak.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Type tag of a block element. Headings are split per level so that a
/// single tag identifies "heading level N" the way toolbar buttons do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockFormat {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    HeadingFour,
    HeadingFive,
    HeadingSix,
    BulletedList,
    NumberedList,
    ListItem,
    CheckListItem,
    BlockQuote,
    CodeBlock,
    Callout,
    Image,
    Table,
    TableRow,
    TableCell,
    Kanban,
    KanbanColumn,
    KanbanCard,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown block format: {0}")]
pub struct UnknownFormat(pub String);

impl BlockFormat {
    pub const ALL: [BlockFormat; 21] = [
        BlockFormat::Paragraph,
        BlockFormat::HeadingOne,
        BlockFormat::HeadingTwo,
        BlockFormat::HeadingThree,
        BlockFormat::HeadingFour,
        BlockFormat::HeadingFive,
        BlockFormat::HeadingSix,
        BlockFormat::BulletedList,
        BlockFormat::NumberedList,
        BlockFormat::ListItem,
        BlockFormat::CheckListItem,
        BlockFormat::BlockQuote,
        BlockFormat::CodeBlock,
        BlockFormat::Callout,
        BlockFormat::Image,
        BlockFormat::Table,
        BlockFormat::TableRow,
        BlockFormat::TableCell,
        BlockFormat::Kanban,
        BlockFormat::KanbanColumn,
        BlockFormat::KanbanCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockFormat::Paragraph => "paragraph",
            BlockFormat::HeadingOne => "heading-one",
            BlockFormat::HeadingTwo => "heading-two",
            BlockFormat::HeadingThree => "heading-three",
            BlockFormat::HeadingFour => "heading-four",
            BlockFormat::HeadingFive => "heading-five",
            BlockFormat::HeadingSix => "heading-six",
            BlockFormat::BulletedList => "bulleted-list",
            BlockFormat::NumberedList => "numbered-list",
            BlockFormat::ListItem => "list-item",
            BlockFormat::CheckListItem => "check-list-item",
            BlockFormat::BlockQuote => "block-quote",
            BlockFormat::CodeBlock => "code-block",
            BlockFormat::Callout => "callout",
            BlockFormat::Image => "image",
            BlockFormat::Table => "table",
            BlockFormat::TableRow => "table-row",
            BlockFormat::TableCell => "table-cell",
            BlockFormat::Kanban => "kanban",
            BlockFormat::KanbanColumn => "kanban-column",
            BlockFormat::KanbanCard => "kanban-card",
        }
    }

    /// Heading format for a level in 1..=6
    pub fn heading(level: u8) -> Option<BlockFormat> {
        match level {
            1 => Some(BlockFormat::HeadingOne),
            2 => Some(BlockFormat::HeadingTwo),
            3 => Some(BlockFormat::HeadingThree),
            4 => Some(BlockFormat::HeadingFour),
            5 => Some(BlockFormat::HeadingFive),
            6 => Some(BlockFormat::HeadingSix),
            _ => None,
        }
    }

    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockFormat::HeadingOne => Some(1),
            BlockFormat::HeadingTwo => Some(2),
            BlockFormat::HeadingThree => Some(3),
            BlockFormat::HeadingFour => Some(4),
            BlockFormat::HeadingFive => Some(5),
            BlockFormat::HeadingSix => Some(6),
            _ => None,
        }
    }

    /// Formats a text block can be switched to with a block-type toggle.
    /// Structural formats (tables, kanban, images) are built, not toggled.
    pub fn is_text_block(&self) -> bool {
        !matches!(
            self,
            BlockFormat::Image
                | BlockFormat::Table
                | BlockFormat::TableRow
                | BlockFormat::TableCell
                | BlockFormat::Kanban
                | BlockFormat::KanbanColumn
                | BlockFormat::KanbanCard
        )
    }

    /// Formats that are only legal directly under a specific parent
    pub fn required_parent(&self) -> Option<BlockFormat> {
        match self {
            BlockFormat::TableRow => Some(BlockFormat::Table),
            BlockFormat::TableCell => Some(BlockFormat::TableRow),
            BlockFormat::KanbanColumn => Some(BlockFormat::Kanban),
            BlockFormat::KanbanCard => Some(BlockFormat::KanbanColumn),
            _ => None,
        }
    }
}

impl fmt::Display for BlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
