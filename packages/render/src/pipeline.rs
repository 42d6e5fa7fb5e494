//! # Render Pipeline
//!
//! Coordinates the edit → render cycle: Dispatch → Render → Cache
//!
//! The pipeline owns the session and the theme. After every change it
//! re-renders the active view and keeps the result as the current
//! [`Frame`]; reading the frame without changes does no work.

use crate::html::{to_html, to_html_document, HtmlOptions};
use crate::theme::Theme;
use crate::views::render_session;
use crate::vnode::VNode;
use folio_editor::views::ViewMode;
use folio_editor::{EditSession, EditorError, Key, Mutation};
use serde::Serialize;
use tracing::debug;

/// One rendered state of the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Document version the frame was rendered from
    pub version: u64,
    pub view_mode: ViewMode,
    pub root: VNode,
}

/// Manages the full edit → render pipeline
pub struct RenderPipeline {
    session: EditSession,
    theme: Theme,
    last_frame: Option<Frame>,
    frames_rendered: usize,
}

impl RenderPipeline {
    pub fn new(session: EditSession, theme: Theme) -> Self {
        Self {
            session,
            theme,
            last_frame: None,
            frames_rendered: 0,
        }
    }

    /// Apply a mutation and re-render
    pub fn dispatch(&mut self, mutation: Mutation) -> Result<&Frame, EditorError> {
        self.session.dispatch(mutation)?;
        self.last_frame = None;
        Ok(self.frame())
    }

    /// Route a key press; re-renders when the key was consumed
    pub fn handle_key(&mut self, key: Key) -> bool {
        let consumed = self.session.handle_key(key);
        if consumed {
            self.last_frame = None;
        }
        consumed
    }

    /// Run `f` against the session and re-render afterwards. Use this for
    /// table and kanban edits, which do not go through `dispatch`.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut EditSession) -> R) -> R {
        let result = f(&mut self.session);
        self.last_frame = None;
        result
    }

    /// Current frame, rendering it if anything changed since the last one
    pub fn frame(&mut self) -> &Frame {
        let frame = match self.last_frame.take() {
            Some(frame) => frame,
            None => {
                self.frames_rendered += 1;
                debug!(
                    version = self.session.version(),
                    view = %self.session.view_mode(),
                    "Rendering frame"
                );
                Frame {
                    version: self.session.version(),
                    view_mode: self.session.view_mode(),
                    root: render_session(&self.session, self.theme),
                }
            }
        };
        self.last_frame.insert(frame)
    }

    /// Current frame as an HTML fragment
    pub fn html(&mut self, options: &HtmlOptions) -> String {
        to_html(&self.frame().root, options)
    }

    /// Current frame as a complete page titled after the document
    pub fn html_page(&mut self, options: &HtmlOptions) -> String {
        let title = self.session.document().title.clone();
        to_html_document(&title, &self.frame().root, options)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            self.theme = theme;
            self.last_frame = None;
        }
    }

    /// Number of frames actually rendered so far
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    /// Drop the cached frame (force a full re-render on next read)
    pub fn clear_cache(&mut self) {
        self.last_frame = None;
    }

    pub fn into_session(self) -> EditSession {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_editor::{Document, Element, Mark, Range};

    fn pipeline() -> RenderPipeline {
        let doc = Document::from_nodes(vec![Element::paragraph("Hello").into()]);
        RenderPipeline::new(EditSession::new("test", doc), Theme::Light)
    }

    #[test]
    fn test_frame_is_cached() {
        let mut pipeline = pipeline();
        let first = pipeline.frame().clone();
        let second = pipeline.frame().clone();
        assert_eq!(first, second);
        assert_eq!(pipeline.frames_rendered(), 1);
    }

    #[test]
    fn test_dispatch_rerenders() {
        let mut pipeline = pipeline();
        pipeline.frame();

        pipeline
            .dispatch(Mutation::Select {
                selection: Some(Range::caret([0, 0], 5)),
            })
            .unwrap();
        let frame = pipeline
            .dispatch(Mutation::InsertText {
                text: " world".to_string(),
            })
            .unwrap();
        assert_eq!(frame.version, 2);
        assert!(frame.root.text_content().contains("Hello world"));
        assert_eq!(pipeline.frames_rendered(), 3);
    }

    #[test]
    fn test_failed_dispatch_keeps_frame() {
        let mut pipeline = pipeline();
        pipeline.frame();
        assert!(pipeline
            .dispatch(Mutation::ToggleMark { mark: Mark::Bold })
            .is_err());
        pipeline.frame();
        assert_eq!(pipeline.frames_rendered(), 1);
    }

    #[test]
    fn test_theme_and_view_changes() {
        let mut pipeline = pipeline();
        assert!(pipeline.html(&HtmlOptions::compact()).contains("prose-stone"));

        pipeline.set_theme(Theme::Dark);
        assert!(pipeline.html(&HtmlOptions::compact()).contains("prose-invert"));

        pipeline.update(|session| session.set_view_mode(ViewMode::Table));
        let frame = pipeline.frame();
        assert_eq!(frame.view_mode, ViewMode::Table);
        assert!(frame.root.text_content().contains("Table View"));
    }

    #[test]
    fn test_html_page_uses_title() {
        let mut pipeline = pipeline();
        pipeline.update(|session| session.set_title("Weekly <Plan>"));
        let page = pipeline.html_page(&HtmlOptions::default());
        assert!(page.contains("<title>Weekly &lt;Plan&gt;</title>"));
    }
}
