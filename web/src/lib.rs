//! Browser host for `tasklist-core`.
//!
//! # Overview
//! Supplies the two things the core leaves to its host: a [`Transport`]
//! built on `fetch` and a [`Surface`] that writes rendered views into
//! `document.body`. On start it reads the page config, installs the
//! delegated event listeners and loads the lists.
//!
//! Everything touching the DOM only exists on `wasm32`.
//!
//! [`Transport`]: tasklist_core::Transport
//! [`Surface`]: tasklist_core::Surface

pub mod settings;

#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod surface;
#[cfg(target_arch = "wasm32")]
mod transport;

#[cfg(target_arch = "wasm32")]
pub use surface::DomSurface;
#[cfg(target_arch = "wasm32")]
pub use transport::FetchTransport;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    use std::rc::Rc;

    use tasklist_core::{Intent, Session};
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let surface = DomSurface::new()?;
    let meta = surface
        .document()
        .query_selector(&format!("meta[name=\"{}\"]", settings::CONFIG_META_NAME))?
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content());
    let config = settings::resolve(meta.as_deref());

    let body = surface
        .document()
        .body()
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("document has no body"))?;
    let session = Rc::new(Session::new(&config, FetchTransport, surface));
    events::install(&body, session.clone())?;
    events::spawn(session, Intent::LoadLists);
    Ok(())
}
