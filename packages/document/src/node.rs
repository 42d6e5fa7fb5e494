//! Node model: block elements and inline text runs.

use crate::format::BlockFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A child of the document root or of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Leaf text run
    Text(TextRun),

    /// Block element with children
    Element(Element),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextRun::new(text))
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Node::Text(run) => Some(run),
            Node::Element(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextRun> {
        match self {
            Node::Text(run) => Some(run),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element(element) => Some(&mut element.children),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of every run under this node
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(run) => run.text.clone(),
            Node::Element(element) => element.plain_text(),
        }
    }
}

impl From<TextRun> for Node {
    fn from(run: TextRun) -> Self {
        Node::Text(run)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Boolean text-run attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Bold, Mark::Italic, Mark::Underline, Mark::Code];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Code => "code",
        }
    }

    pub fn parse(name: &str) -> Option<Mark> {
        Mark::ALL.into_iter().find(|mark| mark.as_str() == name)
    }

    fn bit(&self) -> u8 {
        match self {
            Mark::Bold => 1,
            Mark::Italic => 1 << 1,
            Mark::Underline => 1 << 2,
            Mark::Code => 1 << 3,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of marks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkSet(u8);

impl MarkSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Mark::ALL.into_iter().collect()
    }

    pub fn contains(&self, mark: Mark) -> bool {
        self.0 & mark.bit() != 0
    }

    pub fn insert(&mut self, mark: Mark) {
        self.0 |= mark.bit();
    }

    pub fn remove(&mut self, mark: Mark) {
        self.0 &= !mark.bit();
    }

    pub fn set(&mut self, mark: Mark, on: bool) {
        if on {
            self.insert(mark);
        } else {
            self.remove(mark);
        }
    }

    pub fn with(mut self, mark: Mark) -> Self {
        self.insert(mark);
        self
    }

    pub fn intersection(&self, other: &MarkSet) -> MarkSet {
        MarkSet(self.0 & other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Mark> + '_ {
        Mark::ALL.into_iter().filter(move |mark| self.contains(*mark))
    }
}

impl FromIterator<Mark> for MarkSet {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        let mut set = MarkSet::empty();
        for mark in iter {
            set.insert(mark);
        }
        set
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Leaf span of characters with independent style flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(
        default,
        rename = "backgroundColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<String>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.set_mark(mark, true);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Code => self.code,
        }
    }

    pub fn set_mark(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Bold => self.bold = on,
            Mark::Italic => self.italic = on,
            Mark::Underline => self.underline = on,
            Mark::Code => self.code = on,
        }
    }

    pub fn marks(&self) -> MarkSet {
        Mark::ALL
            .into_iter()
            .filter(|mark| self.has_mark(*mark))
            .collect()
    }

    /// Replace every boolean mark with the contents of `marks`
    pub fn set_marks(&mut self, marks: MarkSet) {
        for mark in Mark::ALL {
            self.set_mark(mark, marks.contains(mark));
        }
    }

    /// Same marks and styling, ignoring the text itself
    pub fn same_format(&self, other: &TextRun) -> bool {
        self.marks() == other.marks()
            && self.color == other.color
            && self.background_color == other.background_color
    }

    /// A run with this run's formatting and different text
    pub fn with_text(&self, text: impl Into<String>) -> TextRun {
        TextRun {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte index of a character offset, clamped to the end of the text
    pub fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }
}

/// Text alignment for paragraphs and headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }

    pub fn parse(value: &str) -> Option<Align> {
        match value {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            "justify" => Some(Align::Justify),
            _ => None,
        }
    }
}

/// Callout colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl CalloutVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalloutVariant::Info => "info",
            CalloutVariant::Warning => "warning",
            CalloutVariant::Error => "error",
            CalloutVariant::Success => "success",
        }
    }

    pub fn parse(value: &str) -> Option<CalloutVariant> {
        match value {
            "info" => Some(CalloutVariant::Info),
            "warning" => Some(CalloutVariant::Warning),
            "error" => Some(CalloutVariant::Error),
            "success" => Some(CalloutVariant::Success),
            _ => None,
        }
    }
}

/// Heading level used when a stored level is outside 1..=6
pub const FALLBACK_HEADING_LEVEL: u8 = 3;

/// Type tag and per-type payload of an element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Paragraph { align: Option<Align> },
    /// `level` is kept as stored; use [`ElementKind::heading_level`] for the
    /// effective level.
    Heading { level: i64, align: Option<Align> },
    BulletedList,
    NumberedList,
    ListItem,
    CheckListItem { checked: bool },
    BlockQuote,
    CodeBlock { language: Option<String> },
    Callout { variant: CalloutVariant },
    Image { url: String },
    Table,
    TableRow,
    TableCell,
    Kanban,
    KanbanColumn { status: String },
    KanbanCard { id: String, title: String, status: String },
    /// A type tag this model does not know. Kept so it survives a re-encode.
    Unknown { tag: String },
}

impl ElementKind {
    pub fn paragraph() -> Self {
        ElementKind::Paragraph { align: None }
    }

    /// The serialized `type` tag
    pub fn tag(&self) -> &str {
        match self {
            ElementKind::Paragraph { .. } => "paragraph",
            ElementKind::Heading { .. } => "heading",
            ElementKind::BulletedList => "bulleted-list",
            ElementKind::NumberedList => "numbered-list",
            ElementKind::ListItem => "list-item",
            ElementKind::CheckListItem { .. } => "check-list-item",
            ElementKind::BlockQuote => "block-quote",
            ElementKind::CodeBlock { .. } => "code-block",
            ElementKind::Callout { .. } => "callout",
            ElementKind::Image { .. } => "image",
            ElementKind::Table => "table",
            ElementKind::TableRow => "table-row",
            ElementKind::TableCell => "table-cell",
            ElementKind::Kanban => "kanban",
            ElementKind::KanbanColumn { .. } => "kanban-column",
            ElementKind::KanbanCard { .. } => "kanban-card",
            ElementKind::Unknown { tag } => tag,
        }
    }

    /// Effective heading level, falling back for out-of-range values
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ElementKind::Heading { level, .. } if (1..=6).contains(level) => {
                u8::try_from(*level).ok()
            }
            ElementKind::Heading { .. } => Some(FALLBACK_HEADING_LEVEL),
            _ => None,
        }
    }

    pub fn align(&self) -> Option<Align> {
        match self {
            ElementKind::Paragraph { align } | ElementKind::Heading { align, .. } => *align,
            _ => None,
        }
    }

    /// Block format of this kind; `None` for unknown tags
    pub fn format(&self) -> Option<BlockFormat> {
        let format = match self {
            ElementKind::Paragraph { .. } => BlockFormat::Paragraph,
            ElementKind::Heading { .. } => {
                return self.heading_level().and_then(BlockFormat::heading)
            }
            ElementKind::BulletedList => BlockFormat::BulletedList,
            ElementKind::NumberedList => BlockFormat::NumberedList,
            ElementKind::ListItem => BlockFormat::ListItem,
            ElementKind::CheckListItem { .. } => BlockFormat::CheckListItem,
            ElementKind::BlockQuote => BlockFormat::BlockQuote,
            ElementKind::CodeBlock { .. } => BlockFormat::CodeBlock,
            ElementKind::Callout { .. } => BlockFormat::Callout,
            ElementKind::Image { .. } => BlockFormat::Image,
            ElementKind::Table => BlockFormat::Table,
            ElementKind::TableRow => BlockFormat::TableRow,
            ElementKind::TableCell => BlockFormat::TableCell,
            ElementKind::Kanban => BlockFormat::Kanban,
            ElementKind::KanbanColumn { .. } => BlockFormat::KanbanColumn,
            ElementKind::KanbanCard { .. } => BlockFormat::KanbanCard,
            ElementKind::Unknown { .. } => return None,
        };
        Some(format)
    }

    /// Kind for `format` with default payload. Alignment carries over
    /// between paragraphs and headings.
    pub fn from_format(format: BlockFormat, previous: &ElementKind) -> ElementKind {
        let align = previous.align();
        let heading = |level: i64| ElementKind::Heading { level, align };

        match format {
            BlockFormat::HeadingOne => heading(1),
            BlockFormat::HeadingTwo => heading(2),
            BlockFormat::HeadingThree => heading(3),
            BlockFormat::HeadingFour => heading(4),
            BlockFormat::HeadingFive => heading(5),
            BlockFormat::HeadingSix => heading(6),
            BlockFormat::Paragraph => ElementKind::Paragraph { align },
            BlockFormat::BulletedList => ElementKind::BulletedList,
            BlockFormat::NumberedList => ElementKind::NumberedList,
            BlockFormat::ListItem => ElementKind::ListItem,
            BlockFormat::CheckListItem => ElementKind::CheckListItem { checked: false },
            BlockFormat::BlockQuote => ElementKind::BlockQuote,
            BlockFormat::CodeBlock => ElementKind::CodeBlock { language: None },
            BlockFormat::Callout => ElementKind::Callout {
                variant: CalloutVariant::default(),
            },
            BlockFormat::Image => ElementKind::Image { url: String::new() },
            BlockFormat::Table => ElementKind::Table,
            BlockFormat::TableRow => ElementKind::TableRow,
            BlockFormat::TableCell => ElementKind::TableCell,
            BlockFormat::Kanban => ElementKind::Kanban,
            BlockFormat::KanbanColumn => ElementKind::KanbanColumn {
                status: String::new(),
            },
            BlockFormat::KanbanCard => ElementKind::KanbanCard {
                id: String::new(),
                title: String::new(),
                status: String::new(),
            },
        }
    }
}

/// Block element: a kind plus ordered children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "crate::codec::RawElement", into = "crate::codec::RawElement")]
pub struct Element {
    pub kind: ElementKind,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    /// Element holding a single unformatted run
    pub fn with_text(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            children: vec![Node::text(text)],
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::with_text(ElementKind::paragraph(), text)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::with_text(
            ElementKind::Heading {
                level: i64::from(level),
                align: None,
            },
            text,
        )
    }

    pub fn format(&self) -> Option<BlockFormat> {
        self.kind.format()
    }

    pub fn plain_text(&self) -> String {
        self.children.iter().map(Node::plain_text).collect()
    }

    /// True when the element holds no characters at all
    pub fn is_text_empty(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Text(run) => run.text.is_empty(),
            Node::Element(element) => element.is_text_empty(),
        })
    }
}
