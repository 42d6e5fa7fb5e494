//! # Element Rendering
//!
//! Maps document nodes to [`VNode`]s by type tag. Rendering is total: every
//! tree renders, whatever it contains.
//!
//! - unknown tags render exactly like a paragraph without alignment
//! - heading levels outside 1..=6 render as `h3`
//! - structural blocks render whatever children they hold, so malformed
//!   nesting shows up as odd markup rather than an error
//!
//! Every element carries `data-path` so a host can map DOM events back to
//! document positions.

use crate::leaf::render_leaf;
use crate::theme::Theme;
use crate::vnode::VNode;
use folio_document::{
    Align, CalloutVariant, Document, Element, ElementKind, Node, Path, FALLBACK_HEADING_LEVEL,
};

pub const EDITOR_PLACEHOLDER: &str = "Type / for commands...";

const CHECK_LIST_CLASS: &str = "flex items-start gap-2 my-2";
const CODE_BLOCK_CLASS: &str = "bg-muted/50 p-4 rounded-lg my-2 overflow-x-auto";
const CODE_CLASS: &str = "text-sm font-mono";
const IMAGE_CLASS: &str = "max-w-full h-auto object-contain my-4";
const KANBAN_CLASS: &str = "grid grid-cols-1 md:grid-cols-3 gap-6";
const KANBAN_COLUMN_CLASS: &str = "bg-muted/40 rounded-lg p-4";
const KANBAN_CARD_CLASS: &str = "rounded-lg border bg-card shadow-sm cursor-grab py-3 px-4";

/// Tailwind classes for a callout's colour scheme
pub fn callout_class(variant: CalloutVariant) -> &'static str {
    match variant {
        CalloutVariant::Info => {
            "bg-blue-50 border-blue-200 text-blue-800 dark:bg-blue-950 dark:border-blue-900 dark:text-blue-200"
        }
        CalloutVariant::Warning => {
            "bg-yellow-50 border-yellow-200 text-yellow-800 dark:bg-yellow-950 dark:border-yellow-900 dark:text-yellow-200"
        }
        CalloutVariant::Error => {
            "bg-red-50 border-red-200 text-red-800 dark:bg-red-950 dark:border-red-900 dark:text-red-200"
        }
        CalloutVariant::Success => {
            "bg-green-50 border-green-200 text-green-800 dark:bg-green-950 dark:border-green-900 dark:text-green-200"
        }
    }
}

/// The editable document surface
pub fn render_document(doc: &Document, theme: Theme) -> VNode {
    VNode::element("div")
        .with_class(theme.editor_class())
        .with_attr("contenteditable", "true")
        .with_attr("spellcheck", "true")
        .with_attr("data-placeholder", EDITOR_PLACEHOLDER)
        .with_children(render_children(&doc.children, &Path::root()))
}

pub fn render_children(children: &[Node], parent: &Path) -> Vec<VNode> {
    children
        .iter()
        .enumerate()
        .map(|(index, child)| render_node(child, &parent.child(index)))
        .collect()
}

pub fn render_node(node: &Node, path: &Path) -> VNode {
    match node {
        Node::Text(run) => render_leaf(run),
        Node::Element(element) => render_element(element, path),
    }
}

fn aligned(node: VNode, align: Option<Align>) -> VNode {
    match align {
        Some(align) => node.with_style("text-align", align.as_str()),
        None => node,
    }
}

pub fn render_element(element: &Element, path: &Path) -> VNode {
    let children = render_children(&element.children, path);
    let block = |tag: &str, children: Vec<VNode>| {
        VNode::element(tag)
            .with_attr("data-path", path.to_string())
            .with_children(children)
    };

    match &element.kind {
        ElementKind::Paragraph { align } => aligned(block("p", children), *align),

        ElementKind::Heading { align, .. } => {
            let level = element.kind.heading_level().unwrap_or(FALLBACK_HEADING_LEVEL);
            aligned(block(&format!("h{}", level), children), *align)
        }

        ElementKind::BulletedList => block("ul", children),
        ElementKind::NumberedList => block("ol", children),
        ElementKind::ListItem => block("li", children),

        ElementKind::CheckListItem { checked } => {
            let mut checkbox = VNode::element("input")
                .with_attr("type", "checkbox")
                .with_class("mt-1");
            if *checked {
                checkbox = checkbox.with_flag("checked");
            }
            VNode::element("div")
                .with_class(CHECK_LIST_CLASS)
                .with_attr("data-path", path.to_string())
                .with_child(
                    VNode::element("span")
                        .with_attr("contenteditable", "false")
                        .with_child(checkbox),
                )
                .with_child(VNode::element("span").with_children(children))
        }

        ElementKind::BlockQuote => block("blockquote", children),

        ElementKind::CodeBlock { language } => {
            let mut code = VNode::element("code")
                .with_class(CODE_CLASS)
                .with_attr("data-path", path.to_string());
            if let Some(language) = language {
                code = code.with_attr("data-language", language.clone());
            }
            VNode::element("pre")
                .with_class(CODE_BLOCK_CLASS)
                .with_child(code.with_children(children))
        }

        ElementKind::Callout { variant } => block("div", children).with_class(format!(
            "p-4 my-4 border-l-4 rounded {}",
            callout_class(*variant)
        )),

        ElementKind::Image { url } => VNode::element("div")
            .with_attr("data-path", path.to_string())
            .with_child(
                VNode::element("div")
                    .with_attr("contenteditable", "false")
                    .with_child(
                        VNode::element("img")
                            .with_attr("src", url.clone())
                            .with_attr("alt", "")
                            .with_class(IMAGE_CLASS),
                    ),
            )
            .with_children(children),

        ElementKind::Table => VNode::element("table")
            .with_class("w-full caption-bottom text-sm")
            .with_attr("data-path", path.to_string())
            .with_child(VNode::element("tbody").with_children(children)),
        ElementKind::TableRow => block("tr", children).with_class("border-b"),
        ElementKind::TableCell => block("td", children).with_class("p-4 align-middle"),

        ElementKind::Kanban => block("div", children).with_class(KANBAN_CLASS),
        ElementKind::KanbanColumn { status } => block("div", children)
            .with_class(KANBAN_COLUMN_CLASS)
            .with_attr("data-status", status.clone()),
        // The card's children are its label; `title` mirrors them
        ElementKind::KanbanCard { id, status, .. } => VNode::element("div")
            .with_class(KANBAN_CARD_CLASS)
            .with_attr("data-path", path.to_string())
            .with_attr("data-card-id", id.clone())
            .with_attr("data-status", status.clone())
            .with_flag("draggable")
            .with_key(id.clone())
            .with_child(
                VNode::element("div")
                    .with_class("text-sm font-medium")
                    .with_children(children),
            ),

        ElementKind::Unknown { .. } => block("p", children),
    }
}
