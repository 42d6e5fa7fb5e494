use folio_document::{BlockFormat, Document, Mark, Path, Range};
use folio_editor::views::{DragPayload, TableEvent, ViewMode};
use folio_editor::{EditSession, Key, Mutation, SlashCommand};
use folio_render::{HtmlOptions, RenderPipeline, Theme};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, error: impl Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, error))
}

fn from_json<T: DeserializeOwned>(json: &str, context: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_error(context, e))
}

/// Map a DOM `KeyboardEvent.key` to an editor key
fn dom_key(key: &str) -> Option<Key> {
    match key {
        "Enter" => Some(Key::Enter),
        "Escape" => Some(Key::Escape),
        "Backspace" => Some(Key::Backspace),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
    }
}

/// Editing session driven by a browser page
#[wasm_bindgen]
pub struct WasmSession {
    pipeline: RenderPipeline,
}

#[wasm_bindgen]
impl WasmSession {
    /// Open a session over a JSON document; an empty string starts a new one
    #[wasm_bindgen(constructor)]
    pub fn new(document_json: &str) -> Result<WasmSession, JsValue> {
        let document = if document_json.trim().is_empty() {
            Document::starter()
        } else {
            Document::from_json(document_json).map_err(|e| js_error("Document error", e))?
        };
        Ok(Self {
            pipeline: RenderPipeline::new(EditSession::new("browser", document), Theme::Light),
        })
    }

    // Output

    /// Current view as HTML
    pub fn html(&mut self, pretty: bool) -> String {
        let options = if pretty {
            HtmlOptions::default()
        } else {
            HtmlOptions::compact()
        };
        self.pipeline.html(&options)
    }

    /// Current frame (virtual tree) as JSON
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(self.pipeline.frame()).map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = documentJson)]
    pub fn document_json(&self) -> Result<String, JsValue> {
        self.pipeline
            .session()
            .document()
            .to_json()
            .map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = toolbarJson)]
    pub fn toolbar_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.pipeline.session().toolbar())
            .map_err(|e| js_error("Serialization error", e))
    }

    pub fn version(&self) -> f64 {
        self.pipeline.session().version() as f64
    }

    // Document editing

    /// Apply a JSON-encoded mutation
    pub fn dispatch(&mut self, mutation_json: &str) -> Result<(), JsValue> {
        let mutation: Mutation = from_json(mutation_json, "Invalid mutation")?;
        self.pipeline
            .dispatch(mutation)
            .map(|_| ())
            .map_err(|e| js_error("Mutation failed", e))
    }

    /// Set the selection from a JSON range, or clear it with `null`
    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, range_json: &str) -> Result<bool, JsValue> {
        let range: Option<Range> = from_json(range_json, "Invalid range")?;
        Ok(self.pipeline.update(|session| session.select(range)))
    }

    /// Handle a DOM key press; returns true when the editor consumed it
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        match dom_key(key) {
            Some(key) => self.pipeline.handle_key(key),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&mut self, text: &str) -> bool {
        self.pipeline.update(|session| session.insert_text(text))
    }

    #[wasm_bindgen(js_name = toggleMark)]
    pub fn toggle_mark(&mut self, mark: &str) -> bool {
        match Mark::parse(mark) {
            Some(mark) => self.pipeline.update(|session| session.toggle_mark(mark)),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = toggleBlock)]
    pub fn toggle_block(&mut self, format: &str) -> bool {
        match format.parse::<BlockFormat>() {
            Ok(format) => self.pipeline.update(|session| session.set_block_type(format)),
            Err(_) => false,
        }
    }

    #[wasm_bindgen(js_name = setChecked)]
    pub fn set_checked(&mut self, path_json: &str, checked: bool) -> Result<bool, JsValue> {
        let path: Path = from_json(path_json, "Invalid path")?;
        Ok(self.pipeline.update(|session| session.set_checked(path, checked)))
    }

    #[wasm_bindgen(js_name = setTitle)]
    pub fn set_title(&mut self, title: &str) -> bool {
        self.pipeline.update(|session| session.set_title(title))
    }

    #[wasm_bindgen(js_name = runSlashCommand)]
    pub fn run_slash_command(&mut self, command: &str) -> bool {
        let command: Option<SlashCommand> =
            serde_json::from_value(serde_json::Value::String(command.to_string())).ok();
        match command {
            Some(command) => self.pipeline.update(|session| session.run_slash_command(command)),
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        self.pipeline.update(|session| session.undo())
    }

    pub fn redo(&mut self) -> bool {
        self.pipeline.update(|session| session.redo())
    }

    // Views and theme

    #[wasm_bindgen(js_name = setViewMode)]
    pub fn set_view_mode(&mut self, mode: &str) -> Result<bool, JsValue> {
        let mode: ViewMode = mode.parse().map_err(|e| js_error("View error", e))?;
        Ok(self.pipeline.update(|session| session.set_view_mode(mode)))
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        let theme: Theme = theme.parse().map_err(|e| js_error("Theme error", e))?;
        self.pipeline.set_theme(theme);
        Ok(())
    }

    // Presence

    #[wasm_bindgen(js_name = setCurrentEditor)]
    pub fn set_current_editor(&mut self, username: Option<String>) {
        self.pipeline.update(|session| session.set_current_editor(username));
    }

    #[wasm_bindgen(js_name = claimEditing)]
    pub fn claim_editing(&mut self) {
        self.pipeline.update(|session| session.claim_editing());
    }

    #[wasm_bindgen(js_name = releaseEditing)]
    pub fn release_editing(&mut self) {
        self.pipeline.update(|session| session.release_editing());
    }

    // Table view

    /// Route a JSON-encoded grid event (click, input, enter, blur, select-status)
    #[wasm_bindgen(js_name = tableEvent)]
    pub fn table_event(&mut self, event_json: &str) -> Result<bool, JsValue> {
        let event: TableEvent = from_json(event_json, "Invalid table event")?;
        Ok(self.pipeline.update(|session| session.table_mut().handle(event)))
    }

    /// Add a row; returns its id
    #[wasm_bindgen(js_name = addTableRow)]
    pub fn add_table_row(&mut self) -> String {
        self.pipeline
            .update(|session| session.table_mut().add_row().id.clone())
    }

    #[wasm_bindgen(js_name = deleteTableRow)]
    pub fn delete_table_row(&mut self, id: &str) -> bool {
        self.pipeline.update(|session| session.table_mut().delete_row(id))
    }

    // Kanban view

    #[wasm_bindgen(js_name = dropCard)]
    pub fn drop_card(&mut self, card_id: &str, source_column_id: &str, target_column_id: &str) -> bool {
        let payload = DragPayload {
            card_id: card_id.to_string(),
            source_column_id: source_column_id.to_string(),
        };
        self.pipeline
            .update(|session| session.kanban_mut().drop_card(&payload, target_column_id))
    }

    #[wasm_bindgen(js_name = startAddingCard)]
    pub fn start_adding_card(&mut self, column_id: &str) -> bool {
        self.pipeline
            .update(|session| session.kanban_mut().start_adding(column_id))
    }

    #[wasm_bindgen(js_name = setCardDraft)]
    pub fn set_card_draft(&mut self, title: &str) {
        self.pipeline
            .update(|session| session.kanban_mut().set_draft_title(title));
    }

    /// Add the drafted card; returns its id, or nothing for a blank title
    #[wasm_bindgen(js_name = submitCard)]
    pub fn submit_card(&mut self) -> Option<String> {
        self.pipeline.update(|session| session.kanban_mut().submit_draft())
    }

    #[wasm_bindgen(js_name = cancelAddingCard)]
    pub fn cancel_adding_card(&mut self) {
        self.pipeline.update(|session| session.kanban_mut().cancel_adding());
    }

    #[wasm_bindgen(js_name = deleteCard)]
    pub fn delete_card(&mut self, card_id: &str, column_id: &str) -> bool {
        self.pipeline
            .update(|session| session.kanban_mut().delete_card(card_id, column_id))
    }
}

/// Render a JSON document straight to HTML, without a session surface
#[wasm_bindgen(js_name = renderDocument)]
pub fn render_document_js(document_json: &str, dark: bool) -> Result<String, JsValue> {
    let document = Document::from_json(document_json).map_err(|e| js_error("Document error", e))?;
    let theme = if dark { Theme::Dark } else { Theme::Light };
    Ok(folio_render::to_html(
        &folio_render::render_document(&document, theme),
        &HtmlOptions::compact(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_keys() {
        assert_eq!(dom_key("Enter"), Some(Key::Enter));
        assert_eq!(dom_key("a"), Some(Key::Char('a')));
        assert_eq!(dom_key("/"), Some(Key::Char('/')));
        assert_eq!(dom_key("Shift"), None);
        assert_eq!(dom_key(""), None);
    }

    #[test]
    fn test_typing_session() {
        let mut session = WasmSession::new("").unwrap();
        assert!(session
            .set_selection(r#"{ "anchor": { "path": [0, 0], "offset": 16 }, "focus": { "path": [0, 0], "offset": 16 } }"#)
            .unwrap());
        for key in ["!", "Enter", "h", "i"] {
            assert!(session.key_down(key));
        }
        assert!(!session.key_down("Shift"));

        let json = session.document_json().unwrap();
        let doc = Document::from_json(&json).unwrap();
        assert_eq!(doc.plain_text(), "Start writing...!\nhi");
        assert!(session.html(false).contains(">hi</span>"));
    }

    #[test]
    fn test_formatting_and_toolbar() {
        let mut session = WasmSession::new(
            r#"[{ "type": "paragraph", "children": [{ "text": "Hello" }] }]"#,
        )
        .unwrap();
        session
            .set_selection(r#"{ "anchor": { "path": [0, 0], "offset": 0 }, "focus": { "path": [0, 0], "offset": 5 } }"#)
            .unwrap();

        assert!(session.toggle_mark("bold"));
        assert!(!session.toggle_mark("strikethrough"));
        assert!(session.toggle_block("heading-one"));
        assert!(!session.toggle_block("heading-nine"));

        let html = session.html(false);
        assert!(html.contains("<h1 data-path=\"[0]\">"));
        assert!(html.contains("<strong>Hello</strong>"));
        assert!(session.toolbar_json().unwrap().contains("\"active\":true"));

        assert!(session.undo());
        assert!(session.redo());
    }

    #[test]
    fn test_views_and_collections() {
        let mut session = WasmSession::new("").unwrap();
        assert!(session.set_view_mode("kanban").unwrap());
        assert!(session.drop_card("1", "todo", "done"));
        assert!(session.start_adding_card("todo"));
        session.set_card_draft("  Review  ");
        let id = session.submit_card().unwrap();
        assert!(session.html(false).contains(&format!("data-card-id=\"{}\"", id)));

        assert!(session.set_view_mode("table").unwrap());
        let id = session.add_table_row();
        assert!(session.html(false).contains("New Item"));
        assert!(session.delete_table_row(&id));
        assert!(session
            .table_event(r#"{ "event": "click", "row_id": "1", "field": "name" }"#)
            .unwrap());

        session.set_theme("dark").unwrap();
        assert!(session.frame_json().unwrap().contains("\"view_mode\":\"table\""));
    }

    #[test]
    fn test_lock_blocks_formatting() {
        let mut session = WasmSession::new("").unwrap();
        session
            .set_selection(r#"{ "anchor": { "path": [0, 0], "offset": 0 }, "focus": { "path": [0, 0], "offset": 5 } }"#)
            .unwrap();
        session.set_current_editor(Some("Alice Writer".to_string()));
        assert!(!session.toggle_mark("bold"));
        assert!(session.html(false).contains("Alice Writer is editing..."));

        session.claim_editing();
        assert!(session.toggle_mark("bold"));
    }

    #[test]
    fn test_render_document() {
        let html =
            render_document_js(r#"[{ "type": "mermaid", "children": [{ "text": "x" }] }]"#, true)
                .unwrap();
        assert!(html.contains("<p data-path=\"[0]\"><span data-leaf=\"true\">x</span></p>"));
        assert!(html.contains("prose-invert"));
    }
}
