//! # Folio Render
//!
//! Turns an edit session into a virtual DOM and HTML.
//!
//! ## Architecture
//!
//! ```text
//! EditSession ─┬─ document ──→ element / leaf rules ─┐
//!              ├─ toolbar, slash menu, roster ───────┼─→ VNode ──→ HTML
//!              └─ table, kanban ─────────────────────┘
//! ```
//!
//! Rendering is a pure function of the session and the [`Theme`]; the theme
//! only picks class names. [`RenderPipeline`] caches the last frame and
//! re-renders after each change.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_render::{HtmlOptions, RenderPipeline, Theme};
//!
//! let mut pipeline = RenderPipeline::new(session, Theme::Dark);
//! let html = pipeline.html(&HtmlOptions::default());
//! ```

mod element;
mod html;
mod leaf;
mod pipeline;
mod theme;
mod views;
mod vnode;

pub use element::{
    callout_class, render_children, render_document, render_element, render_node,
    EDITOR_PLACEHOLDER,
};
pub use html::{escape_html, to_html, to_html_document, HtmlOptions};
pub use leaf::{render_leaf, INLINE_CODE_CLASS};
pub use pipeline::{Frame, RenderPipeline};
pub use theme::{Theme, UnknownTheme};
pub use views::{
    render_collaborators, render_header, render_kanban, render_session, render_slash_menu,
    render_table, render_toolbar, render_view_switch,
};
pub use vnode::VNode;
