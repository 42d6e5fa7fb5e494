//! # Edit Session Management
//!
//! One user's editing session: the document, selection, history, presence,
//! the slash menu and the table/kanban collections behind the other views.
//!
//! `dispatch` returns typed errors. The helpers named after user actions
//! (`toggle_mark`, `insert_text`, ...) never fail: a rejected action is
//! logged and reported as `false`, leaving everything untouched.

use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationResult};
use crate::presence::{hand_lock_to, is_locked_for, Collaborator, LocalUser, PresenceProvider, StaticPresence};
use crate::slash::{SlashCommand, SlashMenu};
use crate::state::EditorState;
use crate::toolbar::{ToolbarControl, ToolbarState};
use crate::undo_stack::UndoStack;
use crate::views::{KanbanBoard, TableView, ViewMode};
use folio_document::{BlockFormat, Document, Mark, MarkSet, Node, Path, Range};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Key presses the document surface reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "char", rename_all = "lowercase")]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub id: String,
    pub user: LocalUser,
    pub document: Document,

    /// Undo depth (0 = unlimited)
    pub history_levels: usize,

    pub view_mode: ViewMode,

    /// Seed the roster, table and kanban with sample data
    pub demo_data: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            id: "local".to_string(),
            user: LocalUser::generate(),
            document: Document::starter(),
            history_levels: 100,
            view_mode: ViewMode::Document,
            demo_data: true,
        }
    }
}

/// Single edit session
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    user: LocalUser,
    state: EditorState,
    history: UndoStack,
    presence: Box<dyn PresenceProvider>,
    view_mode: ViewMode,
    table: TableView,
    kanban: KanbanBoard,
    slash: SlashMenu,
}

impl EditSession {
    /// Session with default options around `document`
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self::with_options(SessionOptions {
            id: id.into(),
            document,
            ..SessionOptions::default()
        })
    }

    pub fn with_options(options: SessionOptions) -> Self {
        let (presence, table, kanban) = if options.demo_data {
            (
                StaticPresence::demo(&options.user),
                TableView::demo(),
                KanbanBoard::demo(),
            )
        } else {
            (
                StaticPresence::solo(&options.user),
                TableView::default(),
                KanbanBoard::empty_columns(),
            )
        };

        info!(session = %options.id, user = %options.user.username, "Starting edit session");

        Self {
            id: options.id,
            user: options.user,
            state: EditorState::new(options.document),
            history: UndoStack::with_max_levels(options.history_levels),
            presence: Box::new(presence),
            view_mode: options.view_mode,
            table,
            kanban,
            slash: SlashMenu::default(),
        }
    }

    /// Swap in another presence source
    pub fn with_presence(mut self, presence: impl PresenceProvider + 'static) -> Self {
        self.presence = Box::new(presence);
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn selection(&self) -> Option<&Range> {
        self.state.selection.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.state.version
    }

    pub fn user(&self) -> &LocalUser {
        &self.user
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    // Dispatch

    /// Apply a mutation through history. Toolbar controls are refused while
    /// another collaborator holds the editing lock.
    pub fn dispatch(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        if mutation.is_toolbar_control() {
            if let Some(holder) = self.lock_holder() {
                return Err(EditorError::Locked(holder));
            }
        }

        let result = self.history.apply(&mutation, &mut self.state)?;
        debug!(mutation = mutation.name(), version = result.version, "Applied mutation");
        Ok(result)
    }

    fn try_dispatch(&mut self, mutation: Mutation) -> bool {
        let name = mutation.name();
        match self.dispatch(mutation) {
            Ok(_) => true,
            Err(error) => {
                debug!(mutation = name, %error, "Mutation ignored");
                false
            }
        }
    }

    pub fn toggle_mark(&mut self, mark: Mark) -> bool {
        self.try_dispatch(Mutation::ToggleMark { mark })
    }

    pub fn set_block_type(&mut self, format: BlockFormat) -> bool {
        self.try_dispatch(Mutation::SetBlockType { format })
    }

    /// Replace `range` with `node`; a missing range does nothing
    pub fn insert_node_at(&mut self, range: Option<Range>, node: Node) -> bool {
        self.try_dispatch(Mutation::InsertNode { at: range, node })
    }

    pub fn delete_range(&mut self, range: Range) -> bool {
        self.try_dispatch(Mutation::DeleteRange { range })
    }

    pub fn insert_text(&mut self, text: &str) -> bool {
        self.try_dispatch(Mutation::InsertText {
            text: text.to_string(),
        })
    }

    pub fn split_block(&mut self) -> bool {
        self.try_dispatch(Mutation::SplitBlock)
    }

    pub fn delete_backward(&mut self) -> bool {
        self.try_dispatch(Mutation::DeleteBackward)
    }

    pub fn remove_node(&mut self, path: Path) -> bool {
        self.try_dispatch(Mutation::RemoveNode { path })
    }

    pub fn set_checked(&mut self, path: Path, checked: bool) -> bool {
        self.try_dispatch(Mutation::SetChecked { path, checked })
    }

    pub fn select(&mut self, selection: Option<Range>) -> bool {
        self.try_dispatch(Mutation::Select { selection })
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        self.try_dispatch(Mutation::SetTitle {
            title: title.into(),
        })
    }

    // Queries

    pub fn active_marks(&self) -> MarkSet {
        self.state.active_marks()
    }

    pub fn is_mark_active(&self, mark: Mark) -> bool {
        self.state.is_mark_active(mark)
    }

    pub fn active_block_type(&self) -> Option<BlockFormat> {
        self.state.active_block_type()
    }

    pub fn is_block_active(&self, format: BlockFormat) -> bool {
        self.state.is_block_active(format)
    }

    // Toolbar

    pub fn toolbar(&self) -> ToolbarState {
        ToolbarState::compute(&self.state, self.lock_holder().as_deref())
    }

    /// Click a toolbar button
    pub fn invoke(&mut self, control: ToolbarControl) -> bool {
        self.try_dispatch(control.mutation())
    }

    // Keyboard and slash menu

    /// React to a key on the document surface. Returns true when the key
    /// was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.view_mode != ViewMode::Document {
            return false;
        }

        if self.slash.is_open() {
            return match key {
                Key::Escape => {
                    self.slash.close();
                    true
                }
                Key::Enter => match self.slash.commands().first().copied() {
                    Some(command) => self.run_slash_command(command),
                    None => false,
                },
                Key::Backspace => {
                    if !self.slash.pop_query() {
                        self.slash.close();
                    }
                    true
                }
                Key::Char(c) => {
                    self.slash.push_query(c);
                    true
                }
            };
        }

        match key {
            Key::Char('/') => self.open_slash_menu(),
            Key::Char(c) => {
                let mut buffer = [0; 4];
                self.insert_text(c.encode_utf8(&mut buffer))
            }
            Key::Enter => self.split_block(),
            Key::Backspace => self.delete_backward(),
            Key::Escape => false,
        }
    }

    pub fn slash_menu(&self) -> &SlashMenu {
        &self.slash
    }

    /// Open the menu targeting the current selection
    pub fn open_slash_menu(&mut self) -> bool {
        match self.state.selection.clone() {
            Some(target) => {
                self.slash.open(target);
                true
            }
            None => false,
        }
    }

    pub fn close_slash_menu(&mut self) {
        self.slash.close();
    }

    /// Replace the menu's target with the command's block and close the menu
    pub fn run_slash_command(&mut self, command: SlashCommand) -> bool {
        let target = self.slash.target().cloned();
        self.slash.close();
        debug!(command = command.label(), "Running slash command");
        self.insert_node_at(target, command.node())
    }

    // History

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.state)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.state)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Group the following dispatches into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch(&self.state);
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    // Presence

    pub fn roster(&self) -> Vec<Collaborator> {
        self.presence.roster()
    }

    pub fn current_editor(&self) -> Option<String> {
        self.presence.current_editor()
    }

    /// The other collaborator holding the lock, if any
    pub fn lock_holder(&self) -> Option<String> {
        if is_locked_for(self.presence.as_ref(), &self.user) {
            self.presence.current_editor()
        } else {
            None
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_holder().is_some()
    }

    pub fn set_current_editor(&mut self, username: Option<String>) {
        hand_lock_to(self.presence.as_mut(), &self.user, username);
    }

    pub fn claim_editing(&mut self) {
        let username = self.user.username.clone();
        self.set_current_editor(Some(username));
    }

    /// Drop the lock if this user holds it
    pub fn release_editing(&mut self) {
        if self.current_editor().as_deref() == Some(self.user.username.as_str()) {
            self.set_current_editor(None);
        }
    }

    // Views

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch surfaces. Every view keeps its state across switches.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if mode == self.view_mode {
            return false;
        }
        debug!(from = %self.view_mode, to = %mode, "Switching view");
        self.slash.close();
        self.view_mode = mode;
        true
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableView {
        &mut self.table
    }

    pub fn kanban(&self) -> &KanbanBoard {
        &self.kanban
    }

    pub fn kanban_mut(&mut self) -> &mut KanbanBoard {
        &mut self.kanban
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_document::{Element, Point};

    fn session() -> EditSession {
        EditSession::with_options(SessionOptions {
            id: "client-1".to_string(),
            user: LocalUser::new("Calm Artist", "#FFD166"),
            document: Document::from_nodes(vec![Element::paragraph("Hello").into()]),
            ..SessionOptions::default()
        })
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "client-1");
        assert_eq!(session.version(), 0);
        assert!(session.selection().is_none());
        assert_eq!(session.roster().len(), 3);
        assert_eq!(session.view_mode(), ViewMode::Document);
    }

    #[test]
    fn test_typing_through_keys() {
        let mut session = session();
        session.select(Some(Range::caret([0, 0], 5)));

        for c in "!?".chars() {
            assert!(session.handle_key(Key::Char(c)));
        }
        assert!(session.handle_key(Key::Backspace));
        assert!(session.handle_key(Key::Enter));

        assert_eq!(session.document().plain_text(), "Hello!\n");
        assert_eq!(session.selection(), Some(&Range::caret([1, 0], 0)));
    }

    #[test]
    fn test_slash_menu_inserts_code_block() {
        let mut session = session();
        session.select(Some(Range::caret([0, 0], 5)));

        assert!(session.handle_key(Key::Char('/')));
        assert!(session.slash_menu().is_open());
        assert_eq!(session.document().plain_text(), "Hello");

        for c in "code".chars() {
            session.handle_key(Key::Char(c));
        }
        assert_eq!(session.slash_menu().commands(), vec![SlashCommand::CodeBlock]);
        assert!(session.handle_key(Key::Enter));

        assert!(!session.slash_menu().is_open());
        assert_eq!(session.active_block_type(), Some(BlockFormat::CodeBlock));
        assert_eq!(session.document().children.len(), 2);
    }

    #[test]
    fn test_escape_closes_slash_menu() {
        let mut session = session();
        session.select(Some(Range::caret([0, 0], 0)));
        session.handle_key(Key::Char('/'));
        assert!(session.handle_key(Key::Escape));
        assert!(!session.slash_menu().is_open());
        assert!(!session.handle_key(Key::Escape));
    }

    #[test]
    fn test_slash_without_selection_does_nothing() {
        let mut session = session();
        assert!(!session.handle_key(Key::Char('/')));
        assert!(!session.slash_menu().is_open());
    }

    #[test]
    fn test_lock_gates_toolbar_only() {
        let mut session = session();
        session.select(Some(Range::new(Point::new([0, 0], 0), Point::new([0, 0], 5))));
        session.set_current_editor(Some("Bob Editor".to_string()));

        let before = session.document().clone();
        assert!(!session.toggle_mark(Mark::Bold));
        assert!(!session.set_block_type(BlockFormat::HeadingTwo));
        assert_eq!(session.document(), &before);
        assert!(matches!(
            session.dispatch(Mutation::ToggleMark { mark: Mark::Bold }),
            Err(EditorError::Locked(holder)) if holder == "Bob Editor"
        ));

        let toolbar = session.toolbar();
        assert!(toolbar.buttons.iter().all(|b| b.disabled));
        assert_eq!(toolbar.notice.as_deref(), Some("Bob Editor is editing..."));

        assert!(session.insert_text("Hi"));

        session.claim_editing();
        assert!(!session.is_locked());
        session.release_editing();
        assert_eq!(session.current_editor(), None);
    }

    #[test]
    fn test_undo_redo() {
        let mut session = session();
        session.select(Some(Range::caret([0, 0], 5)));
        session.insert_text(" world");
        assert!(session.can_undo());

        assert!(session.undo());
        assert_eq!(session.document().plain_text(), "Hello");
        assert!(session.redo());
        assert_eq!(session.document().plain_text(), "Hello world");
    }

    #[test]
    fn test_view_switch_keeps_collections() {
        let mut session = session();
        session.table_mut().add_row();
        let payload = session.kanban().drag_start("1", "todo");
        session.kanban_mut().drop_card(&payload, "done");

        assert!(session.set_view_mode(ViewMode::Table));
        assert!(!session.set_view_mode(ViewMode::Table));
        assert!(session.set_view_mode(ViewMode::Kanban));
        assert!(session.set_view_mode(ViewMode::Document));

        assert_eq!(session.table().rows().len(), 6);
        assert_eq!(session.kanban().column("done").unwrap().cards.len(), 3);
        assert_eq!(session.document().plain_text(), "Hello");
    }

    #[test]
    fn test_keys_ignored_outside_document_view() {
        let mut session = session();
        session.select(Some(Range::caret([0, 0], 5)));
        session.set_view_mode(ViewMode::Kanban);
        assert!(!session.handle_key(Key::Char('x')));
        assert_eq!(session.document().plain_text(), "Hello");
    }
}
