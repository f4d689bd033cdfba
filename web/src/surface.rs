//! DOM surface: materializes rendered views into `document.body`.

use tasklist_core::view::VIEW_ROOT_IDS;
use tasklist_core::{Element, Node, RenderedView, Surface};
use tracing::error;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

pub struct DomSurface {
    document: Document,
    body: HtmlElement,
}

impl DomSurface {
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        Ok(Self { document, body })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn build(&self, element: &Element) -> Result<web_sys::Element, JsValue> {
        let el = self.document.create_element(element.tag)?;
        for (name, value) in &element.attrs {
            el.set_attribute(name, value)?;
        }
        for child in &element.children {
            match child {
                Node::Element(child) => {
                    el.append_child(&self.build(child)?)?;
                }
                Node::Text(text) => {
                    el.append_child(&self.document.create_text_node(text))?;
                }
            }
        }
        Ok(el)
    }
}

impl Surface for DomSurface {
    fn apply(&self, view: &RenderedView) {
        for id in VIEW_ROOT_IDS {
            // Stale duplicates from out-of-order refreshes go too.
            while let Some(stale) = self.document.get_element_by_id(id) {
                stale.remove();
            }
        }
        for root in view.roots() {
            let appended = self
                .build(root)
                .and_then(|el| self.body.append_child(&el).map(|_| ()));
            if let Err(err) = appended {
                error!(error = ?err, "failed to attach view");
            }
        }
    }
}
