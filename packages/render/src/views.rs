//! # View Surfaces
//!
//! Renders everything around the document body: the header (title,
//! collaborators, view switch), the toolbar and slash menu, and the table
//! and kanban surfaces. Interactive elements carry `data-action` (and the
//! ids the action needs) for the host to route events back to the session.

use crate::element::render_document;
use crate::theme::Theme;
use crate::vnode::VNode;
use folio_editor::views::{
    display_date, KanbanBoard, KanbanColumnData, TableField, TableRowData, TableView, ViewMode,
    STATUS_OPTIONS,
};
use folio_editor::{Collaborator, EditSession, SlashMenu, ToolbarState};

const ACTIVE_BUTTON_CLASS: &str = "bg-secondary text-secondary-foreground";

fn button(action: &str, label: &str) -> VNode {
    VNode::element("button")
        .with_attr("type", "button")
        .with_attr("data-action", action)
        .with_child(VNode::text(label))
}

/// Whole editor frame for the session's active view
pub fn render_session(session: &EditSession, theme: Theme) -> VNode {
    let body = match session.view_mode() {
        ViewMode::Document => {
            let mut surface = VNode::element("div")
                .with_class("space-y-4")
                .with_child(render_toolbar(&session.toolbar()))
                .with_child(render_document(session.document(), theme));
            if session.slash_menu().is_open() {
                surface = surface.with_child(render_slash_menu(session.slash_menu()));
            }
            surface
        }
        ViewMode::Table => render_table(session.table()),
        ViewMode::Kanban => render_kanban(session.kanban()),
    };

    VNode::element("div")
        .with_class(theme.root_class())
        .with_attr("data-view", session.view_mode().as_str())
        .with_child(render_header(
            &session.document().title,
            &session.roster(),
            session.view_mode(),
        ))
        .with_child(
            VNode::element("main")
                .with_class("max-w-[1200px] mx-auto px-6 py-4")
                .with_child(body),
        )
}

pub fn render_header(title: &str, roster: &[Collaborator], mode: ViewMode) -> VNode {
    VNode::element("header")
        .with_class("flex items-center justify-between px-6 py-3")
        .with_child(
            button("edit-title", title).with_class("text-xl font-semibold px-0"),
        )
        .with_child(
            VNode::element("div")
                .with_class("flex items-center gap-4")
                .with_child(render_collaborators(roster))
                .with_child(render_view_switch(mode)),
        )
}

/// Avatar stack with a tooltip per collaborator
pub fn render_collaborators(roster: &[Collaborator]) -> VNode {
    VNode::element("div")
        .with_class("flex -space-x-2")
        .with_children(
            roster
                .iter()
                .map(|user| {
                    let mut avatar = VNode::element("span")
                        .with_class("avatar h-8 w-8 border-2 border-background")
                        .with_attr("title", user.username.clone())
                        .with_style("background-color", user.color.clone())
                        .with_style("color", "#ffffff")
                        .with_key(user.id.clone())
                        .with_child(VNode::text(user.initials()));
                    if user.is_editing {
                        avatar = avatar.with_attr("data-editing", "true");
                    }
                    avatar
                })
                .collect(),
        )
}

pub fn render_view_switch(active: ViewMode) -> VNode {
    VNode::element("div")
        .with_class("flex items-center space-x-1 bg-muted rounded-md p-1")
        .with_children(
            ViewMode::ALL
                .iter()
                .map(|mode| {
                    let variant = if *mode == active { "default" } else { "ghost" };
                    button("set-view", mode.label())
                        .with_attr("data-view", mode.as_str())
                        .with_attr("data-variant", variant)
                        .with_class("h-8")
                })
                .collect(),
        )
}

pub fn render_toolbar(toolbar: &ToolbarState) -> VNode {
    let mut bar = VNode::element("div")
        .with_class("border bg-background/80 rounded-lg p-2 flex items-center gap-1")
        .with_attr("role", "toolbar");

    for state in &toolbar.buttons {
        if state.control.starts_group() {
            bar = bar.with_child(
                VNode::element("div")
                    .with_class("separator mx-2 h-6")
                    .with_attr("role", "separator"),
            );
        }

        let mut control = VNode::element("button")
            .with_attr("type", "button")
            .with_attr("data-action", "toolbar")
            .with_attr("data-control", state.control.name())
            .with_attr("title", state.control.name());
        if state.active {
            control = control.with_class(ACTIVE_BUTTON_CLASS);
        }
        if state.disabled {
            control = control.with_flag("disabled");
        }
        bar = bar.with_child(control);
    }

    if let Some(notice) = &toolbar.notice {
        bar = bar.with_child(
            VNode::element("span")
                .with_class("text-sm text-muted-foreground ml-2")
                .with_child(VNode::text(notice.clone())),
        );
    }
    bar
}

pub fn render_slash_menu(menu: &SlashMenu) -> VNode {
    let commands = menu.commands();
    let list = if commands.is_empty() {
        VNode::element("div")
            .with_class("command-empty")
            .with_child(VNode::text("No results found."))
    } else {
        VNode::element("div")
            .with_class("command-group")
            .with_attr("data-heading", "Blocks")
            .with_children(
                commands
                    .iter()
                    .map(|command| {
                        VNode::element("div")
                            .with_class("command-item")
                            .with_attr("data-action", "slash-command")
                            .with_attr("data-command", serde_command_name(command))
                            .with_child(VNode::text(command.label()))
                    })
                    .collect(),
            )
    };

    VNode::element("div")
        .with_class("absolute z-50 min-w-[200px] border shadow-md")
        .with_attr("role", "menu")
        .with_child(
            VNode::element("input")
                .with_attr("placeholder", "Type a command...")
                .with_attr("value", menu.query()),
        )
        .with_child(list)
}

fn serde_command_name(command: &folio_editor::SlashCommand) -> String {
    serde_json::to_value(command)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

pub fn render_table(table: &TableView) -> VNode {
    let header = VNode::element("tr").with_children(
        ["Name", "Status", "Date", "Actions"]
            .iter()
            .map(|label| VNode::element("th").with_child(VNode::text(*label)))
            .collect(),
    );

    let rows = table
        .rows()
        .iter()
        .map(|row| render_table_row(table, row))
        .collect();

    VNode::element("div")
        .with_class("p-4")
        .with_child(
            VNode::element("div")
                .with_class("flex justify-between items-center mb-4")
                .with_child(
                    VNode::element("h2")
                        .with_class("text-xl font-semibold")
                        .with_child(VNode::text("Table View")),
                )
                .with_child(button("add-row", "Add Row")),
        )
        .with_child(
            VNode::element("table")
                .with_class("rounded-md border w-full")
                .with_child(VNode::element("thead").with_child(header))
                .with_child(VNode::element("tbody").with_children(rows)),
        )
}

fn render_table_row(table: &TableView, row: &TableRowData) -> VNode {
    let editing = table
        .editing()
        .filter(|edit| edit.row_id == row.id)
        .map(|edit| (edit.field, edit.value.as_str()));

    let cell = |field: TableField| {
        let content = match editing {
            Some((edit_field, value)) if edit_field == field => render_cell_editor(field, value),
            _ => render_cell_value(row, field),
        };
        VNode::element("td")
            .with_class("cursor-pointer")
            .with_attr("data-action", "edit-cell")
            .with_attr("data-row-id", row.id.clone())
            .with_attr("data-field", field_name(field))
            .with_child(content)
    };

    VNode::element("tr")
        .with_key(row.id.clone())
        .with_child(cell(TableField::Name))
        .with_child(cell(TableField::Status))
        .with_child(cell(TableField::Date))
        .with_child(
            VNode::element("td").with_child(
                button("delete-row", "Delete").with_attr("data-row-id", row.id.clone()),
            ),
        )
}

fn field_name(field: TableField) -> &'static str {
    match field {
        TableField::Name => "name",
        TableField::Status => "status",
        TableField::Date => "date",
    }
}

fn render_cell_value(row: &TableRowData, field: TableField) -> VNode {
    match field {
        TableField::Name => VNode::text(row.name.clone()),
        TableField::Status => VNode::element("span")
            .with_class(format!(
                "px-2 py-1 rounded text-xs {}",
                row.status_category().badge_class()
            ))
            .with_child(VNode::text(row.status.clone())),
        TableField::Date => VNode::text(display_date(&row.date)),
    }
}

fn render_cell_editor(field: TableField, value: &str) -> VNode {
    match field {
        TableField::Name => VNode::element("input").with_attr("value", value),
        TableField::Date => VNode::element("input")
            .with_attr("type", "date")
            .with_attr("value", value),
        TableField::Status => VNode::element("select").with_children(
            STATUS_OPTIONS
                .iter()
                .map(|option| {
                    let mut node = VNode::element("option")
                        .with_attr("value", *option)
                        .with_child(VNode::text(*option));
                    if *option == value {
                        node = node.with_flag("selected");
                    }
                    node
                })
                .collect(),
        ),
    }
}

pub fn render_kanban(board: &KanbanBoard) -> VNode {
    VNode::element("div")
        .with_class("p-4")
        .with_child(
            VNode::element("h2")
                .with_class("text-xl font-semibold mb-4")
                .with_child(VNode::text("Kanban Board")),
        )
        .with_child(
            VNode::element("div")
                .with_class("grid grid-cols-1 md:grid-cols-3 gap-6")
                .with_children(
                    board
                        .columns()
                        .iter()
                        .map(|column| render_kanban_column(board, column))
                        .collect(),
                ),
        )
}

fn render_kanban_column(board: &KanbanBoard, column: &KanbanColumnData) -> VNode {
    let cards = column.cards.iter().map(|card| {
        VNode::element("div")
            .with_class("rounded-lg border bg-card cursor-grab py-3 px-4")
            .with_key(card.id.clone())
            .with_flag("draggable")
            .with_attr("data-card-id", card.id.clone())
            .with_attr("data-column-id", column.id.clone())
            .with_child(
                VNode::element("div")
                    .with_class("flex justify-between items-start")
                    .with_child(
                        VNode::element("h4")
                            .with_class("text-sm font-medium")
                            .with_child(VNode::text(card.title.clone())),
                    )
                    .with_child(
                        button("delete-card", "×")
                            .with_attr("data-card-id", card.id.clone())
                            .with_attr("data-column-id", column.id.clone()),
                    ),
            )
    });

    let mut list = VNode::element("div")
        .with_class("space-y-3")
        .with_children(cards.collect());

    if board.adding_to() == Some(column.id.as_str()) {
        list = list.with_child(
            VNode::element("div")
                .with_class("rounded-lg border bg-card p-3")
                .with_child(
                    VNode::element("input")
                        .with_attr("placeholder", "Card title")
                        .with_attr("value", board.draft_title()),
                )
                .with_child(button("cancel-card", "Cancel"))
                .with_child(button("submit-card", "Add").with_attr("data-column-id", column.id.clone())),
        );
    }

    VNode::element("div")
        .with_class("bg-muted/40 rounded-lg p-4")
        .with_key(column.id.clone())
        .with_attr("data-action", "drop-card")
        .with_attr("data-column-id", column.id.clone())
        .with_child(
            VNode::element("div")
                .with_class("flex justify-between items-center mb-4")
                .with_child(
                    VNode::element("h3")
                        .with_class("font-medium text-lg")
                        .with_child(VNode::text(column.title.clone())),
                )
                .with_child(
                    button("start-card", "+").with_attr("data-column-id", column.id.clone()),
                ),
        )
        .with_child(list)
}
