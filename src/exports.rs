//! Markup-Facing Exports
//!
//! The server-rendered pages call these through the generated bindings,
//! in place of ad-hoc globals.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit};

use crate::{app, panels};

#[derive(Serialize)]
struct ToastDetail<'a> {
    value: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
}

/// Queue a toast. Routed through the same event the server-triggered
/// toasts use, so ordering rules apply to both alike.
#[wasm_bindgen]
pub fn show_toast(message: &str, severity: Option<String>) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let detail = serde_wasm_bindgen::to_value(&ToastDetail {
        value: message,
        kind: severity.as_deref(),
    })
    .unwrap_or(JsValue::NULL);
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    init.set_bubbles(true);
    let Ok(event) = CustomEvent::new_with_event_init_dict(app::TOAST_EVENT, &init) else {
        return;
    };
    let _ = body.dispatch_event(&event);
}

/// Recount the active-column chips after markup changed them.
#[wasm_bindgen]
pub fn update_active_columns() {
    if let Some(document) = web_sys::window().and_then(|window| window.document()) {
        panels::update_active_columns(&document);
    }
}

/// Fill a container with loading skeletons while its partial is fetched.
#[wasm_bindgen]
pub fn show_skeleton(container_id: &str, count: Option<u32>) {
    let Some(container) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(container_id))
    else {
        return;
    };
    panels::show_skeleton(&container, count.unwrap_or(3) as usize);
}
