#![cfg(target_arch = "wasm32")]

//! In-browser checks for the DOM-facing behavior the unit tests cannot
//! reach: toast anchors, id collection and theme persistence.

use gloo_timers::future::TimeoutFuture;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::{Document, Storage, Window};

use deck_ui::reorder::collect_ids;
use deck_ui::theme::{Theme, ThemeManager, STORAGE_KEY};
use deck_ui::toast::{request_from_detail, Severity, ToastQueue};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn document() -> Document {
    window().document().unwrap()
}

fn storage() -> Storage {
    window().local_storage().unwrap().unwrap()
}

/// Let spawned display cycles run up to their first timer.
async fn yield_to_tasks() {
    TimeoutFuture::new(0).await;
}

#[wasm_bindgen_test]
async fn enqueue_without_anchor_drains_queue() {
    let queue = ToastQueue::new(document());

    queue.enqueue("first", Severity::Success);
    queue.enqueue("second", Severity::Error);
    yield_to_tasks().await;

    assert!(queue.is_idle());
}

#[wasm_bindgen_test]
async fn toast_renders_message_and_severity_into_anchor() {
    let document = document();
    let body = document.body().unwrap();

    let root = document.create_element("div").unwrap();
    root.set_id("toast");
    root.set_inner_html("<svg></svg>");
    let message = document.create_element("span").unwrap();
    message.set_id("toast-message");
    body.append_child(&root).unwrap();
    body.append_child(&message).unwrap();

    let queue = ToastQueue::new(document.clone());
    queue.enqueue("column removed", Severity::Error);
    yield_to_tasks().await;

    assert_eq!(message.text_content().unwrap(), "column removed");
    assert!(root.class_list().contains("toast--error"));
    assert!(root.class_list().contains("toast--visible"));

    queue.invalidate();
    root.remove();
    message.remove();
}

#[wasm_bindgen_test]
fn collect_ids_skips_children_without_identifier() {
    let document = document();
    let container = document.create_element("ul").unwrap();
    for id in ["b", "a"] {
        let item = document.create_element("li").unwrap();
        item.set_attribute("data-id", id).unwrap();
        container.append_child(&item).unwrap();
    }
    let unmarked = document.create_element("li").unwrap();
    container.append_child(&unmarked).unwrap();
    let last = document.create_element("li").unwrap();
    last.set_attribute("data-id", "c").unwrap();
    container.append_child(&last).unwrap();

    assert_eq!(collect_ids(&container), ["b", "a", "c"]);
}

#[wasm_bindgen_test]
fn toggling_persists_under_the_fixed_key() {
    let storage = storage();
    storage.remove_item(STORAGE_KEY).unwrap();

    let manager = ThemeManager::new(&window(), document());
    manager.apply(Theme::Dark, false);
    manager.toggle();

    assert_eq!(manager.current(), Theme::Light);
    assert_eq!(
        storage.get_item(STORAGE_KEY).unwrap(),
        Some("light".to_string())
    );
    storage.remove_item(STORAGE_KEY).unwrap();
}

#[wasm_bindgen_test]
fn system_change_without_stored_preference_restyles_without_writing() {
    let storage = storage();
    storage.remove_item(STORAGE_KEY).unwrap();

    let manager = ThemeManager::new(&window(), document());
    manager.apply(Theme::Dark, false);
    manager.follow_system(false);

    assert_eq!(manager.current(), Theme::Light);
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);

    // A stored explicit choice pins the theme against system changes.
    storage.set_item(STORAGE_KEY, "light").unwrap();
    manager.follow_system(true);
    assert_eq!(manager.current(), Theme::Light);
    storage.remove_item(STORAGE_KEY).unwrap();
}

#[wasm_bindgen_test]
fn toast_signal_accepts_object_and_bare_string_details() {
    let detail = js_sys::Object::new();
    Reflect::set(
        &detail,
        &JsValue::from_str("value"),
        &JsValue::from_str("subscribed"),
    )
    .unwrap();
    Reflect::set(
        &detail,
        &JsValue::from_str("type"),
        &JsValue::from_str("warning"),
    )
    .unwrap();
    let request = request_from_detail(&detail.into()).unwrap();
    assert_eq!(request.message, "subscribed");
    assert_eq!(request.severity, Severity::Warning);

    let request = request_from_detail(&JsValue::from_str("plain message")).unwrap();
    assert_eq!(request.message, "plain message");
    assert_eq!(request.severity, Severity::Success);
}
