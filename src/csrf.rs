//! Cross-Site Request Forgery Plumbing
//!
//! Reads the token cookie the server issues and copies it onto outgoing
//! state-changing requests. An absent cookie omits the header; the server
//! decides whether to reject.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Document, HtmlDocument};

/// Cookie the server issues the token under.
pub const COOKIE_NAME: &str = "csrf_token";
/// Header the server checks state-changing requests for.
pub const HEADER_NAME: &str = "X-CSRF-Token";

/// Current token, when the cookie is present and non-empty.
pub fn token(document: &Document) -> Option<String> {
    let cookies = document.dyn_ref::<HtmlDocument>()?.cookie().ok()?;
    cookie_value(&cookies, COOKIE_NAME)
}

/// Value of the named cookie inside a `document.cookie` string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

/// Copy the token into the header map of a request being configured.
pub fn inject_header(document: &Document, event: &CustomEvent) {
    let Some(token) = token(document) else {
        return;
    };
    let detail = event.detail();
    let Ok(headers) = Reflect::get(&detail, &JsValue::from_str("headers")) else {
        return;
    };
    let _ = Reflect::set(
        &headers,
        &JsValue::from_str(HEADER_NAME),
        &JsValue::from_str(&token),
    );
}
