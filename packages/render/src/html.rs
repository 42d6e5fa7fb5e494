//! # HTML Serialization
//!
//! Writes a [`VNode`] tree as HTML. Output is escaped and deterministic
//! (attributes and styles are sorted by name).
//!
//! Pretty-printing only breaks lines between block-level elements. An element
//! holding nothing but text and inline elements (`span`, `strong`, ...) is
//! written on one line, so formatting never adds whitespace inside text.

use crate::vnode::VNode;
use std::collections::BTreeMap;

/// Options for HTML output
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    /// Single-line output
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize one node tree
pub fn to_html(node: &VNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    write_node(node, &mut ctx);
    ctx.get_output()
}

/// Serialize `body` inside a complete HTML page
pub fn to_html_document(title: &str, body: &VNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    write_node(body, &mut ctx);
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add_line(&escape_html(content)),
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            if !ctx.options.pretty || !has_block_children(children) {
                if ctx.options.pretty {
                    ctx.add_indent();
                }
                write_inline(node, ctx);
                if ctx.options.pretty {
                    ctx.add("\n");
                }
                return;
            }

            ctx.add_indent();
            write_open_tag(tag, attributes, styles, ctx);
            ctx.add("\n");
            ctx.indent();
            for child in children {
                write_node(child, ctx);
            }
            ctx.dedent();
            ctx.add_indent();
            ctx.add(&format!("</{}>", tag));
            ctx.add("\n");
        }
    }
}

/// Write a subtree with no added whitespace
fn write_inline(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add(&escape_html(content)),
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            write_open_tag(tag, attributes, styles, ctx);
            if is_void(tag) {
                return;
            }
            for child in children {
                write_inline(child, ctx);
            }
            ctx.add(&format!("</{}>", tag));
        }
    }
}

fn write_open_tag(
    tag: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    ctx: &mut Context,
) {
    ctx.add(&format!("<{}", tag));

    for (name, value) in attributes {
        ctx.add(" ");
        ctx.add(name);
        if !value.is_empty() {
            ctx.add("=\"");
            ctx.add(&escape_html(value));
            ctx.add("\"");
        }
    }

    if !styles.is_empty() {
        let declarations: Vec<String> = styles
            .iter()
            .map(|(key, value)| format!("{}: {};", key, value))
            .collect();
        ctx.add(" style=\"");
        ctx.add(&escape_html(&declarations.join(" ")));
        ctx.add("\"");
    }

    if is_void(tag) {
        ctx.add(" />");
    } else {
        ctx.add(">");
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "input" | "br" | "hr")
}

fn is_inline(tag: &str) -> bool {
    matches!(
        tag,
        "span" | "strong" | "em" | "u" | "code" | "a" | "br" | "img" | "input"
    )
}

fn has_block_children(children: &[VNode]) -> bool {
    children.iter().any(|child| match child {
        VNode::Element { tag, .. } => !is_inline(tag),
        VNode::Text { .. } => false,
    })
}
