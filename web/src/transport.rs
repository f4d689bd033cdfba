//! `fetch`-backed transport.

use tasklist_core::{ApiError, HttpRequest, HttpResponse, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Runs requests through `window.fetch`.
///
/// Every HTTP status comes back as `Ok`; a rejected fetch promise (network
/// error, CORS refusal) is `ApiError::Transport`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_mode(RequestMode::Cors);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &init).map_err(js_error)?;
        for (name, value) in &request.headers {
            js_request.headers().set(name, value).map_err(js_error)?;
        }

        let window =
            web_sys::window().ok_or_else(|| ApiError::Transport("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;

        let status = response.status();
        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;

        Ok(HttpResponse::new(status, text.as_string().unwrap_or_default()))
    }
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Transport(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}
