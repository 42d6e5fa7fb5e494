//! Formatting toolbar state.

use crate::mutations::Mutation;
use crate::state::EditorState;
use folio_document::{BlockFormat, Mark};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "format", rename_all = "lowercase")]
pub enum ToolbarControl {
    Mark(Mark),
    Block(BlockFormat),
}

/// Buttons in display order; marks first, then block formats
pub const TOOLBAR_CONTROLS: [ToolbarControl; 10] = [
    ToolbarControl::Mark(Mark::Bold),
    ToolbarControl::Mark(Mark::Italic),
    ToolbarControl::Mark(Mark::Underline),
    ToolbarControl::Mark(Mark::Code),
    ToolbarControl::Block(BlockFormat::HeadingOne),
    ToolbarControl::Block(BlockFormat::HeadingTwo),
    ToolbarControl::Block(BlockFormat::BlockQuote),
    ToolbarControl::Block(BlockFormat::NumberedList),
    ToolbarControl::Block(BlockFormat::BulletedList),
    ToolbarControl::Block(BlockFormat::CheckListItem),
];

impl ToolbarControl {
    pub fn mutation(&self) -> Mutation {
        match *self {
            ToolbarControl::Mark(mark) => Mutation::ToggleMark { mark },
            ToolbarControl::Block(format) => Mutation::SetBlockType { format },
        }
    }

    /// Name used for the button's data attribute and tooltip
    pub fn name(&self) -> &'static str {
        match self {
            ToolbarControl::Mark(mark) => mark.as_str(),
            ToolbarControl::Block(format) => format.as_str(),
        }
    }

    /// True for the separator position: the first block button
    pub fn starts_group(&self) -> bool {
        *self == ToolbarControl::Block(BlockFormat::HeadingOne)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolbarButton {
    pub control: ToolbarControl,
    pub active: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolbarState {
    pub buttons: Vec<ToolbarButton>,

    /// Shown while another collaborator holds the editing lock
    pub notice: Option<String>,
}

impl ToolbarState {
    /// `lock_holder` is the other user holding the lock, if any
    pub fn compute(state: &EditorState, lock_holder: Option<&str>) -> Self {
        let marks = state.active_marks();
        let disabled = lock_holder.is_some();

        let buttons = TOOLBAR_CONTROLS
            .iter()
            .map(|control| ToolbarButton {
                control: *control,
                active: match control {
                    ToolbarControl::Mark(mark) => marks.contains(*mark),
                    ToolbarControl::Block(format) => state.is_block_active(*format),
                },
                disabled,
            })
            .collect();

        Self {
            buttons,
            notice: lock_holder.map(|name| format!("{} is editing...", name)),
        }
    }

    pub fn button(&self, control: ToolbarControl) -> Option<&ToolbarButton> {
        self.buttons.iter().find(|button| button.control == control)
    }

    pub fn is_active(&self, control: ToolbarControl) -> bool {
        self.button(control).map(|b| b.active).unwrap_or(false)
    }
}
