use crate::document::Document;
use crate::node::{Element, Node, TextRun};
use crate::path::Path;

/// Visitor pattern for traversing a document tree immutably
///
/// Default implementations walk the entire tree in document order.
/// Override specific visit_* methods to act on particular nodes; call the
/// matching `walk_*` function to keep descending.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_element(&mut self, path: &Path, element: &Element) {
        walk_element(self, path, element);
    }

    fn visit_text(&mut self, _path: &Path, _run: &TextRun) {
        // Leaf node, no children to walk
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    walk_children(visitor, &Path::root(), &doc.children);
}

pub fn walk_element<V: Visitor>(visitor: &mut V, path: &Path, element: &Element) {
    walk_children(visitor, path, &element.children);
}

fn walk_children<V: Visitor>(visitor: &mut V, parent: &Path, children: &[Node]) {
    for (index, child) in children.iter().enumerate() {
        let path = parent.child(index);
        match child {
            Node::Text(run) => visitor.visit_text(&path, run),
            Node::Element(element) => visitor.visit_element(&path, element),
        }
    }
}

/// Collects every text run path in document order
#[derive(Default)]
pub(crate) struct LeafCollector {
    pub paths: Vec<Path>,
}

impl Visitor for LeafCollector {
    fn visit_text(&mut self, path: &Path, _run: &TextRun) {
        self.paths.push(path.clone());
    }
}
