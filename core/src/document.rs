//! Where rendered views land.
//!
//! [`Surface`] is the one stateful boundary: applying a view detaches every
//! node whose id is in [`VIEW_ROOT_IDS`] and appends the new heading and
//! container. [`Document`] is an in-memory body used by tests and by hosts
//! without a real DOM.

use std::cell::{Cell, RefCell};

use crate::view::{Element, Node, RenderedView, VIEW_ROOT_IDS};

/// A document a rendered view can be applied to.
///
/// Takes `&self`: hosts are single-threaded and the DOM itself is shared.
pub trait Surface {
    fn apply(&self, view: &RenderedView);
}

/// In-memory document body.
#[derive(Debug, Default)]
pub struct Document {
    body: RefCell<Vec<Node>>,
    applied: Cell<usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from page-shell content that views must leave alone.
    pub fn with_body(body: Vec<Node>) -> Self {
        Self {
            body: RefCell::new(body),
            applied: Cell::new(0),
        }
    }

    pub fn body(&self) -> Vec<Node> {
        self.body.borrow().clone()
    }

    /// Number of views applied so far.
    pub fn applied(&self) -> usize {
        self.applied.get()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.body
            .borrow()
            .iter()
            .filter_map(Node::as_element)
            .find_map(|el| el.find_by_id(id).cloned())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get_element_by_id(id).is_some()
    }
}

impl Surface for Document {
    fn apply(&self, view: &RenderedView) {
        let mut body = self.body.borrow_mut();
        body.retain(|node| match node {
            Node::Element(el) => !el.id().is_some_and(|id| VIEW_ROOT_IDS.contains(&id)),
            Node::Text(_) => true,
        });
        for root in view.roots() {
            body.push(Node::Element(root.clone()));
        }
        self.applied.set(self.applied.get() + 1);
    }
}
