//! Slash-command menu.
//!
//! Typing `/` with a selection opens the menu and remembers that selection
//! as the target. Picking a command replaces the target with a fresh block.

use folio_document::{CalloutVariant, Element, ElementKind, Node, Range};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlashCommand {
    CodeBlock,
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    BulletedList,
    NumberedList,
    CheckList,
    Quote,
    Callout,
}

impl SlashCommand {
    pub const ALL: [SlashCommand; 9] = [
        SlashCommand::CodeBlock,
        SlashCommand::HeadingOne,
        SlashCommand::HeadingTwo,
        SlashCommand::HeadingThree,
        SlashCommand::BulletedList,
        SlashCommand::NumberedList,
        SlashCommand::CheckList,
        SlashCommand::Quote,
        SlashCommand::Callout,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SlashCommand::CodeBlock => "Code Block",
            SlashCommand::HeadingOne => "Heading 1",
            SlashCommand::HeadingTwo => "Heading 2",
            SlashCommand::HeadingThree => "Heading 3",
            SlashCommand::BulletedList => "Bulleted List",
            SlashCommand::NumberedList => "Numbered List",
            SlashCommand::CheckList => "Check List",
            SlashCommand::Quote => "Quote",
            SlashCommand::Callout => "Callout",
        }
    }

    /// Empty block this command inserts
    pub fn node(&self) -> Node {
        let empty = |kind: ElementKind| Element::with_text(kind, "");
        let list = |kind: ElementKind| {
            Element::new(kind, vec![empty(ElementKind::ListItem).into()])
        };

        let element = match self {
            SlashCommand::CodeBlock => empty(ElementKind::CodeBlock { language: None }),
            SlashCommand::HeadingOne => Element::heading(1, ""),
            SlashCommand::HeadingTwo => Element::heading(2, ""),
            SlashCommand::HeadingThree => Element::heading(3, ""),
            SlashCommand::BulletedList => list(ElementKind::BulletedList),
            SlashCommand::NumberedList => list(ElementKind::NumberedList),
            SlashCommand::CheckList => empty(ElementKind::CheckListItem { checked: false }),
            SlashCommand::Quote => empty(ElementKind::BlockQuote),
            SlashCommand::Callout => empty(ElementKind::Callout {
                variant: CalloutVariant::Info,
            }),
        };
        element.into()
    }

    /// Case-insensitive substring match on the label
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.label().to_lowercase().contains(&query)
    }
}

/// Open menu state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlashMenu {
    target: Option<Range>,
    query: String,
}

impl SlashMenu {
    pub fn open(&mut self, target: Range) {
        self.target = Some(target);
        self.query.clear();
    }

    pub fn close(&mut self) {
        self.target = None;
        self.query.clear();
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Range> {
        self.target.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
    }

    /// Drop the last query character; false if the query was already empty
    pub fn pop_query(&mut self) -> bool {
        self.query.pop().is_some()
    }

    /// Commands matching the current query, in menu order
    pub fn commands(&self) -> Vec<SlashCommand> {
        SlashCommand::ALL
            .into_iter()
            .filter(|command| command.matches(&self.query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_document::BlockFormat;

    #[test]
    fn test_filtering() {
        let mut menu = SlashMenu::default();
        menu.open(Range::caret([0, 0], 0));
        assert_eq!(menu.commands().len(), SlashCommand::ALL.len());

        for c in "head".chars() {
            menu.push_query(c);
        }
        assert_eq!(
            menu.commands(),
            vec![
                SlashCommand::HeadingOne,
                SlashCommand::HeadingTwo,
                SlashCommand::HeadingThree
            ]
        );

        menu.close();
        assert!(!menu.is_open());
        assert_eq!(menu.query(), "");
    }

    #[test]
    fn test_code_block_node_is_empty() {
        let node = SlashCommand::CodeBlock.node();
        let element = node.as_element().unwrap();
        assert_eq!(element.format(), Some(BlockFormat::CodeBlock));
        assert_eq!(element.children, vec![Node::text("")]);
    }

    #[test]
    fn test_list_commands_wrap_an_item() {
        let node = SlashCommand::NumberedList.node();
        let list = node.as_element().unwrap();
        assert_eq!(list.format(), Some(BlockFormat::NumberedList));
        assert_eq!(
            list.children[0].as_element().unwrap().format(),
            Some(BlockFormat::ListItem)
        );
    }
}
