//! JSON shape of elements.
//!
//! Elements are stored as flat objects with a `type` tag and per-type
//! fields. Decoding never fails on content: unknown tags, out-of-range
//! heading levels and bad enum values all degrade to something renderable.

use crate::node::{Align, CalloutVariant, Element, ElementKind, Node};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RawElement {
    #[serde(rename = "type")]
    tag: String,

    #[serde(default)]
    children: Vec<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    align: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    checked: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    variant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

/// Legacy tags written by toolbars that stored the format name as the type
fn legacy_heading_level(tag: &str) -> Option<u8> {
    match tag {
        "heading-one" => Some(1),
        "heading-two" => Some(2),
        "heading-three" => Some(3),
        "heading-four" => Some(4),
        "heading-five" => Some(5),
        "heading-six" => Some(6),
        _ => None,
    }
}

impl From<RawElement> for Element {
    fn from(raw: RawElement) -> Self {
        let align = raw.align.as_deref().and_then(Align::parse);

        let kind = match raw.tag.as_str() {
            "paragraph" => ElementKind::Paragraph { align },
            "heading" => ElementKind::Heading {
                // Stored as written, out-of-range included; rendering falls back.
                level: raw.level.unwrap_or(0),
                align,
            },
            "bulleted-list" => ElementKind::BulletedList,
            "numbered-list" => ElementKind::NumberedList,
            "list-item" => ElementKind::ListItem,
            "check-list-item" => ElementKind::CheckListItem {
                checked: raw.checked.unwrap_or(false),
            },
            "block-quote" => ElementKind::BlockQuote,
            "code-block" => ElementKind::CodeBlock {
                language: raw.language,
            },
            "callout" => {
                let variant = match raw.variant.as_deref() {
                    None => CalloutVariant::default(),
                    Some(value) => CalloutVariant::parse(value).unwrap_or_else(|| {
                        warn!(variant = %value, "Unknown callout variant, using info");
                        CalloutVariant::default()
                    }),
                };
                ElementKind::Callout { variant }
            }
            "image" => ElementKind::Image {
                url: raw.url.unwrap_or_default(),
            },
            "table" => ElementKind::Table,
            "table-row" => ElementKind::TableRow,
            "table-cell" => ElementKind::TableCell,
            "kanban" => ElementKind::Kanban,
            "kanban-column" => ElementKind::KanbanColumn {
                status: raw.status.unwrap_or_default(),
            },
            "kanban-card" => ElementKind::KanbanCard {
                id: raw.id.unwrap_or_default(),
                title: raw.title.unwrap_or_default(),
                status: raw.status.unwrap_or_default(),
            },
            other => match legacy_heading_level(other) {
                Some(level) => ElementKind::Heading {
                    level: i64::from(level),
                    align,
                },
                None => ElementKind::Unknown {
                    tag: other.to_string(),
                },
            },
        };

        Element {
            kind,
            children: raw.children,
        }
    }
}

impl From<Element> for RawElement {
    fn from(element: Element) -> Self {
        let mut raw = RawElement {
            tag: element.kind.tag().to_string(),
            children: element.children,
            ..Default::default()
        };

        match element.kind {
            ElementKind::Paragraph { align } => {
                raw.align = align.map(|a| a.as_str().to_string());
            }
            ElementKind::Heading { level, align } => {
                raw.level = Some(level);
                raw.align = align.map(|a| a.as_str().to_string());
            }
            ElementKind::CheckListItem { checked } => raw.checked = Some(checked),
            ElementKind::CodeBlock { language } => raw.language = language,
            ElementKind::Callout { variant } => raw.variant = Some(variant.as_str().to_string()),
            ElementKind::Image { url } => raw.url = Some(url),
            ElementKind::KanbanColumn { status } => raw.status = Some(status),
            ElementKind::KanbanCard { id, title, status } => {
                raw.id = Some(id);
                raw.title = Some(title);
                raw.status = Some(status);
            }
            ElementKind::BulletedList
            | ElementKind::NumberedList
            | ElementKind::ListItem
            | ElementKind::BlockQuote
            | ElementKind::Table
            | ElementKind::TableRow
            | ElementKind::TableCell
            | ElementKind::Kanban
            | ElementKind::Unknown { .. } => {}
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{TextRun, FALLBACK_HEADING_LEVEL};

    #[test]
    fn test_decode_heading_and_marks() {
        let json = r##"{
            "type": "heading",
            "level": 2,
            "align": "center",
            "children": [{ "text": "Title", "bold": true, "backgroundColor": "#ff0" }]
        }"##;

        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(
            element.kind,
            ElementKind::Heading {
                level: 2,
                align: Some(Align::Center)
            }
        );

        let run = element.children[0].as_text().unwrap();
        assert!(run.bold);
        assert_eq!(run.background_color.as_deref(), Some("#ff0"));
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let json = r#"{ "type": "mermaid-diagram", "children": [{ "text": "graph" }] }"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(
            element.kind,
            ElementKind::Unknown {
                tag: "mermaid-diagram".to_string()
            }
        );

        let encoded = serde_json::to_value(&element).unwrap();
        assert_eq!(encoded["type"], "mermaid-diagram");
    }

    #[test]
    fn test_lenient_payload_defaults() {
        let check: Element =
            serde_json::from_str(r#"{ "type": "check-list-item", "children": [] }"#).unwrap();
        assert_eq!(check.kind, ElementKind::CheckListItem { checked: false });

        let callout: Element =
            serde_json::from_str(r#"{ "type": "callout", "variant": "purple", "children": [] }"#)
                .unwrap();
        assert_eq!(
            callout.kind,
            ElementKind::Callout {
                variant: CalloutVariant::Info
            }
        );

        let paragraph: Element =
            serde_json::from_str(r#"{ "type": "paragraph", "align": "diagonal", "children": [] }"#)
                .unwrap();
        assert_eq!(paragraph.kind, ElementKind::Paragraph { align: None });

        let heading: Element =
            serde_json::from_str(r#"{ "type": "heading", "level": 42, "children": [] }"#).unwrap();
        assert_eq!(heading.kind, ElementKind::Heading { level: 42, align: None });
    }

    #[test]
    fn test_out_of_range_heading_level_round_trips() {
        for level in [-1i64, 0, 300] {
            let json = format!(r#"{{"type":"heading","level":{},"children":[]}}"#, level);
            let element: Element = serde_json::from_str(&json).unwrap();
            assert_eq!(element.kind, ElementKind::Heading { level, align: None });
            assert_eq!(element.kind.heading_level(), Some(FALLBACK_HEADING_LEVEL));

            let encoded = serde_json::to_value(&element).unwrap();
            assert_eq!(encoded["level"], serde_json::json!(level));
        }
    }

    #[test]
    fn test_legacy_heading_tag() {
        let element: Element =
            serde_json::from_str(r#"{ "type": "heading-one", "children": [{ "text": "A" }] }"#)
                .unwrap();
        assert_eq!(element.kind, ElementKind::Heading { level: 1, align: None });
    }

    #[test]
    fn test_text_runs_omit_false_flags() {
        let node = Node::Text(TextRun::new("plain"));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"text":"plain"}"#);
    }
}
