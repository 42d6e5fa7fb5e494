//! End-to-end rendering: JSON document → session → HTML

use folio_document::{Document, Path};
use folio_editor::{EditSession, LocalUser, Mark, Range, SessionOptions};
use folio_render::{
    render_document, render_node, to_html, HtmlOptions, RenderPipeline, Theme, VNode,
};

const SAMPLE: &str = r##"[
    { "type": "heading", "level": 1, "children": [{ "text": "Plan" }] },
    { "type": "paragraph", "align": "right", "children": [
        { "text": "Ship " },
        { "text": "today", "bold": true, "italic": true, "color": "#e11d48" }
    ] },
    { "type": "check-list-item", "checked": true, "children": [{ "text": "Write tests" }] },
    { "type": "callout", "variant": "sparkly", "children": [{ "text": "Heads up" }] },
    { "type": "heading", "level": 9, "children": [{ "text": "Deep" }] },
    { "type": "timeline", "children": [{ "text": "Q3" }] }
]"##;

fn sample() -> Document {
    Document::from_json(SAMPLE).unwrap()
}

#[test]
fn test_sample_document_html() {
    let html = to_html(&render_document(&sample(), Theme::Light), &HtmlOptions::compact());

    assert!(html.contains("<h1 data-path=\"[0]\"><span data-leaf=\"true\">Plan</span></h1>"));
    assert!(html.contains("style=\"text-align: right;\""));
    assert!(html.contains(
        "<span data-leaf=\"true\" style=\"color: #e11d48;\"><em><strong>today</strong></em></span>"
    ));
    assert!(html.contains("<input checked class=\"mt-1\" type=\"checkbox\" />"));
    assert!(html.contains("bg-blue-50"));
    assert!(html.contains("<h3 data-path=\"[4]\">"));
    assert!(html.contains("<p data-path=\"[5]\"><span data-leaf=\"true\">Q3</span></p>"));
}

#[test]
fn test_unknown_tag_matches_paragraph_rendering() {
    let doc = sample();
    let path = Path::from([5]);
    let unknown = render_node(&doc.children[5], &path);

    let paragraph = Document::from_json(
        r#"[{ "type": "paragraph", "children": [{ "text": "Q3" }] }]"#,
    )
    .unwrap();
    assert_eq!(unknown, render_node(&paragraph.children[0], &path));
}

#[test]
fn test_every_block_renders_something() {
    let vnode = render_document(&sample(), Theme::Dark);
    assert_eq!(vnode.children().len(), 6);
    for child in vnode.children() {
        assert!(matches!(child, VNode::Element { .. }));
        assert!(!child.text_content().is_empty());
    }
}

#[test]
fn test_toolbar_tracks_marks_through_pipeline() {
    let session = EditSession::with_options(SessionOptions {
        user: LocalUser::new("Brilliant Designer", "#EFC050"),
        document: sample(),
        ..SessionOptions::default()
    });
    let mut pipeline = RenderPipeline::new(session, Theme::Light);

    pipeline.update(|session| session.select(Some(Range::caret([1, 1], 2))));
    let active = |pipeline: &mut RenderPipeline| -> Vec<String> {
        pipeline
            .frame()
            .root
            .find_all_by_tag("button")
            .into_iter()
            .filter(|b| b.attr("data-action") == Some("toolbar"))
            .filter(|b| b.attr("class").is_some())
            .filter_map(|b| b.attr("data-control").map(str::to_string))
            .collect()
    };
    assert_eq!(active(&mut pipeline), vec!["bold", "italic"]);

    pipeline.update(|session| session.toggle_mark(Mark::Bold));
    assert_eq!(active(&mut pipeline), vec!["italic"]);
}

#[test]
fn test_pretty_page_is_well_formed() {
    let session = EditSession::new("page", sample());
    let mut pipeline = RenderPipeline::new(session, Theme::Light);
    let page = pipeline.html_page(&HtmlOptions::default());

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Untitled Document</title>"));
    assert_eq!(page.matches("<table").count(), 0);
    assert_eq!(
        page.matches("<div").count(),
        page.matches("</div>").count()
    );
}
