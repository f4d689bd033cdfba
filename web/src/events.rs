//! One delegated listener per event type, on `document.body`.
//!
//! Rendered elements carry `data-action` and the ids they act on, so rows
//! need no closures of their own: the listener finds the nearest
//! `[data-action]` ancestor of the event target, reads its attributes into a
//! `UiEvent`, and hands the resulting intent to the session.

use std::rc::Rc;

use tasklist_core::{dispatch, Action, Intent, Outcome, Session, Surface, Transport, UiEvent};
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlElement, HtmlInputElement};

pub fn install<T, S>(body: &HtmlElement, session: Rc<Session<T, S>>) -> Result<(), JsValue>
where
    T: Transport + 'static,
    S: Surface + 'static,
{
    let clicks = session.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = action_target(&event) else {
            return;
        };
        let Some(ui) = read_event(&target, None) else {
            return;
        };
        let action = ui.action.parse::<Action>().ok();
        if action.is_some_and(Action::is_submit) {
            return;
        }
        // A ticked checkbox stays as drawn until the refreshed view replaces it.
        if action.is_some_and(Action::cancels_default) {
            event.prevent_default();
        }
        run(clicks.clone(), &ui);
    });
    body.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(form) = action_target(&event) else {
            return;
        };
        event.prevent_default();
        let value = form
            .query_selector("input[type=text]")
            .ok()
            .flatten()
            .and_then(|input| input.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value());
        if let Some(ui) = read_event(&form, value) {
            run(session.clone(), &ui);
        }
    });
    body.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}

fn action_target(event: &Event) -> Option<web_sys::Element> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    target.closest("[data-action]").ok().flatten()
}

fn read_event(element: &web_sys::Element, value: Option<String>) -> Option<UiEvent> {
    let event = UiEvent::from_lookup(|name| element.get_attribute(name))?;
    Some(match value {
        Some(value) => event.with_value(value),
        None => event,
    })
}

fn run<T, S>(session: Rc<Session<T, S>>, ui: &UiEvent)
where
    T: Transport + 'static,
    S: Surface + 'static,
{
    let Some(intent) = dispatch(ui) else {
        debug!(action = %ui.action, "event did not resolve to an intent");
        return;
    };
    spawn(session, intent);
}

/// Failures were already reported by the session; the view stays as it is.
/// A mutation the session did not redraw is followed by a reload here.
pub fn spawn<T, S>(session: Rc<Session<T, S>>, intent: Intent)
where
    T: Transport + 'static,
    S: Surface + 'static,
{
    spawn_local(async move {
        let reload = intent.reload();
        if let Ok(Outcome::Mutated) = session.handle(intent).await {
            debug!(?reload, "reloading after mutation");
            let _ = session.handle(reload).await;
        }
    });
}
