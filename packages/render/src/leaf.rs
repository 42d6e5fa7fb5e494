use crate::vnode::VNode;
use folio_document::TextRun;

pub const INLINE_CODE_CLASS: &str = "bg-gray-100 dark:bg-gray-800 px-1 py-0.5 rounded text-sm";

/// Render a text run. Marks wrap the text in a fixed order, bold innermost:
/// strong, then em, u and code. Colors become styles on the outer span.
pub fn render_leaf(run: &TextRun) -> VNode {
    let mut content = VNode::text(run.text.clone());

    if run.bold {
        content = VNode::element("strong").with_child(content);
    }
    if run.italic {
        content = VNode::element("em").with_child(content);
    }
    if run.underline {
        content = VNode::element("u").with_child(content);
    }
    if run.code {
        content = VNode::element("code")
            .with_class(INLINE_CODE_CLASS)
            .with_child(content);
    }

    let mut span = VNode::element("span").with_attr("data-leaf", "true");
    if let Some(color) = &run.color {
        span = span.with_style("color", color.clone());
    }
    if let Some(background) = &run.background_color {
        span = span.with_style("background-color", background.clone());
    }
    span.with_child(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_document::Mark;

    #[test]
    fn test_plain_run() {
        let leaf = render_leaf(&TextRun::new("hi"));
        assert_eq!(leaf.tag(), Some("span"));
        assert_eq!(leaf.children(), &[VNode::text("hi")]);
    }

    #[test]
    fn test_mark_nesting_order() {
        let run = TextRun::new("x")
            .with_mark(Mark::Code)
            .with_mark(Mark::Bold)
            .with_mark(Mark::Underline)
            .with_mark(Mark::Italic);
        let leaf = render_leaf(&run);

        let code = &leaf.children()[0];
        assert_eq!(code.tag(), Some("code"));
        let u = &code.children()[0];
        assert_eq!(u.tag(), Some("u"));
        let em = &u.children()[0];
        assert_eq!(em.tag(), Some("em"));
        let strong = &em.children()[0];
        assert_eq!(strong.tag(), Some("strong"));
        assert_eq!(strong.children(), &[VNode::text("x")]);
    }

    #[test]
    fn test_colors_are_styles() {
        let run = TextRun::new("c").with_color("#f00").with_background("#ff0");
        let leaf = render_leaf(&run);
        assert_eq!(leaf.style("color"), Some("#f00"));
        assert_eq!(leaf.style("background-color"), Some("#ff0"));
        assert_eq!(leaf.children(), &[VNode::text("c")]);
    }
}
