//! # Document
//!
//! The root of an editing session: a title plus an ordered list of nodes.
//! A document is owned by exactly one session and is never shared; every
//! accessor here takes a [`Path`] from the root.
//!
//! ## JSON
//!
//! Documents decode from either a bare array of nodes or an object with
//! `title` and `children`:
//!
//! ```text
//! [{ "type": "paragraph", "children": [{ "text": "Hello" }] }]
//! { "title": "Notes", "children": [ ... ] }
//! ```

use crate::error::{DocumentError, DocumentResult};
use crate::node::{Element, Node, TextRun};
use crate::path::{Path, Point};
use crate::visitor::{LeafCollector, Visitor};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled Document";
pub const PLACEHOLDER_TEXT: &str = "Start writing...";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// Editable document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentJson {
    Nodes(Vec<Node>),
    Full(Document),
}

impl Default for Document {
    fn default() -> Self {
        Self::starter()
    }
}

impl Document {
    pub fn new(title: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            children,
        }
    }

    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self::new(DEFAULT_TITLE, children)
    }

    /// New-session document: one placeholder paragraph
    pub fn starter() -> Self {
        Self::from_nodes(vec![Element::paragraph(PLACEHOLDER_TEXT).into()])
    }

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let parsed: DocumentJson = serde_json::from_str(json)?;
        Ok(match parsed {
            DocumentJson::Nodes(children) => Self::from_nodes(children),
            DocumentJson::Full(doc) => doc,
        })
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Node at `path`; the root itself is not a node
    pub fn node(&self, path: &Path) -> Option<&Node> {
        let (first, rest) = path.indexes().split_first()?;
        let mut node = self.children.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }

    pub fn node_mut(&mut self, path: &Path) -> Option<&mut Node> {
        let (first, rest) = path.indexes().split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for index in rest {
            node = node.children_mut()?.get_mut(*index)?;
        }
        Some(node)
    }

    /// Child list of the root (empty path) or of the element at `path`
    pub fn children_of(&self, path: &Path) -> Option<&Vec<Node>> {
        if path.is_root() {
            return Some(&self.children);
        }
        match self.node(path)? {
            Node::Element(element) => Some(&element.children),
            Node::Text(_) => None,
        }
    }

    pub fn children_of_mut(&mut self, path: &Path) -> Option<&mut Vec<Node>> {
        if path.is_root() {
            return Some(&mut self.children);
        }
        self.node_mut(path)?.children_mut()
    }

    pub fn element(&self, path: &Path) -> DocumentResult<&Element> {
        match self.node(path) {
            Some(Node::Element(element)) => Ok(element),
            Some(Node::Text(_)) => Err(DocumentError::NotElement(path.clone())),
            None => Err(DocumentError::InvalidPath(path.clone())),
        }
    }

    pub fn element_mut(&mut self, path: &Path) -> DocumentResult<&mut Element> {
        match self.node_mut(path) {
            Some(Node::Element(element)) => Ok(element),
            Some(Node::Text(_)) => Err(DocumentError::NotElement(path.clone())),
            None => Err(DocumentError::InvalidPath(path.clone())),
        }
    }

    pub fn text(&self, path: &Path) -> DocumentResult<&TextRun> {
        match self.node(path) {
            Some(Node::Text(run)) => Ok(run),
            Some(Node::Element(_)) => Err(DocumentError::NotText(path.clone())),
            None => Err(DocumentError::InvalidPath(path.clone())),
        }
    }

    pub fn text_mut(&mut self, path: &Path) -> DocumentResult<&mut TextRun> {
        match self.node_mut(path) {
            Some(Node::Text(run)) => Ok(run),
            Some(Node::Element(_)) => Err(DocumentError::NotText(path.clone())),
            None => Err(DocumentError::InvalidPath(path.clone())),
        }
    }

    /// Paths of every text run, in document order
    pub fn leaf_paths(&self) -> Vec<Path> {
        let mut collector = LeafCollector::default();
        collector.visit_document(self);
        collector.paths
    }

    /// Text run paths from `start` to `end`, both inclusive
    pub fn leaf_paths_between(&self, start: &Path, end: &Path) -> Vec<Path> {
        self.leaf_paths()
            .into_iter()
            .filter(|path| path >= start && path <= end)
            .collect()
    }

    /// Text run paths under `path` (or `path` itself if it is a run)
    pub fn leaf_paths_under(&self, path: &Path) -> Vec<Path> {
        self.leaf_paths()
            .into_iter()
            .filter(|leaf| leaf == path || path.is_ancestor_of(leaf))
            .collect()
    }

    pub fn is_valid_point(&self, point: &Point) -> bool {
        self.text(&point.path)
            .map(|run| point.offset <= run.char_len())
            .unwrap_or(false)
    }

    /// First caret position inside the node at `path`
    pub fn start_point(&self, path: &Path) -> Option<Point> {
        let first = self.leaf_paths_under(path).into_iter().next()?;
        Some(Point::new(first, 0))
    }

    /// Last caret position inside the node at `path`
    pub fn end_point(&self, path: &Path) -> Option<Point> {
        let last = self.leaf_paths_under(path).into_iter().last()?;
        let offset = self.text(&last).ok()?.char_len();
        Some(Point::new(last, offset))
    }

    pub fn previous_leaf(&self, path: &Path) -> Option<Path> {
        self.leaf_paths().into_iter().filter(|leaf| leaf < path).last()
    }

    pub fn next_leaf(&self, path: &Path) -> Option<Path> {
        self.leaf_paths().into_iter().find(|leaf| leaf > path)
    }

    /// Elements enclosing `path`, nearest first. The node at `path` itself
    /// is not included.
    pub fn ancestors(&self, path: &Path) -> Vec<(Path, &Element)> {
        let mut found: Vec<(Path, &Element)> = path
            .ancestors()
            .into_iter()
            .filter_map(|ancestor| {
                let element = self.node(&ancestor)?.as_element()?;
                Some((ancestor, element))
            })
            .collect();
        found.reverse();
        found
    }

    /// Nearest enclosing element of the node at `path`
    pub fn enclosing_block(&self, path: &Path) -> Option<Path> {
        self.ancestors(path).into_iter().next().map(|(path, _)| path)
    }

    pub fn insert_node(&mut self, parent: &Path, index: usize, node: Node) -> DocumentResult<()> {
        let children = self
            .children_of_mut(parent)
            .ok_or_else(|| DocumentError::NotElement(parent.clone()))?;
        let index = index.min(children.len());
        children.insert(index, node);
        Ok(())
    }

    pub fn remove_node(&mut self, path: &Path) -> DocumentResult<Node> {
        let (parent, index) = match (path.parent(), path.last()) {
            (Some(parent), Some(index)) => (parent, index),
            _ => return Err(DocumentError::InvalidPath(path.clone())),
        };
        let children = self
            .children_of_mut(&parent)
            .ok_or_else(|| DocumentError::InvalidPath(path.clone()))?;
        if index >= children.len() {
            return Err(DocumentError::InvalidPath(path.clone()));
        }
        Ok(children.remove(index))
    }

    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(Node::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
