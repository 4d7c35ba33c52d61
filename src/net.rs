//! Outgoing Requests
//!
//! The layer issues exactly one kind of network call: a fire-and-forget
//! JSON POST. No response body is consumed and failures are only logged;
//! the server-rendered state wins on the next full page load.

use gloo_console::error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Request, RequestInit};

use crate::csrf;

/// POST `body` to `url`, attaching the CSRF header when the cookie is set.
///
/// Spawned in the background; the caller never observes the outcome.
pub fn post_json(document: &Document, url: &str, body: String) {
    let token = csrf::token(document);
    let url = url.to_string();
    spawn_local(async move {
        if let Err(err) = send(&url, &body, token.as_deref()).await {
            error!("request failed:", url, err);
        }
    });
}

async fn send(url: &str, body: &str, token: Option<&str>) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(body));
    let request = Request::new_with_str_and_init(url, &init).map_err(describe)?;
    let headers = request.headers();
    headers
        .set("Content-Type", "application/json")
        .map_err(describe)?;
    if let Some(token) = token {
        headers.set(csrf::HEADER_NAME, token).map_err(describe)?;
    }
    JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(describe)?;
    Ok(())
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
