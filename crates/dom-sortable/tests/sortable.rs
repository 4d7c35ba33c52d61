#![cfg(target_arch = "wasm32")]

//! In-browser checks for attach idempotence and gesture handling.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_test::*;
use web_sys::{Document, Element, MouseEvent, MouseEventInit};

use dom_sortable::{attach, SortableOptions, ATTACHED_MARKER};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn list_with_items(document: &Document, count: usize) -> Element {
    let container = document.create_element("ul").unwrap();
    for index in 0..count {
        let item = document.create_element("li").unwrap();
        item.set_attribute("data-id", &format!("item-{index}")).unwrap();
        container.append_child(&item).unwrap();
    }
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn mouse_event(kind: &str, x: i32, y: i32) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(x);
    init.set_client_y(y);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

#[wasm_bindgen_test]
fn attach_stamps_marker_and_is_idempotent() {
    let document = document();
    let container = list_with_items(&document, 3);

    assert!(attach(&container, SortableOptions::default(), |_| {}));
    assert!(container.has_attribute(ATTACHED_MARKER));
    assert!(!attach(&container, SortableOptions::default(), |_| {}));

    container.remove();
}

#[wasm_bindgen_test]
fn drag_gesture_fires_end_callback_once() {
    let document = document();
    let container = list_with_items(&document, 3);
    let ends = Rc::new(Cell::new(0u32));

    let counter = Rc::clone(&ends);
    attach(&container, SortableOptions::default(), move |_| {
        counter.set(counter.get() + 1);
    });
    // A second attach attempt must not add a second set of listeners.
    let counter = Rc::clone(&ends);
    attach(&container, SortableOptions::default(), move |_| {
        counter.set(counter.get() + 1);
    });

    let first = container.first_element_child().unwrap();
    first.dispatch_event(&mouse_event("mousedown", 10, 10)).unwrap();
    document.dispatch_event(&mouse_event("mousemove", 10, 40)).unwrap();
    document.dispatch_event(&mouse_event("mouseup", 10, 40)).unwrap();

    assert_eq!(ends.get(), 1);
    container.remove();
}

#[wasm_bindgen_test]
fn click_without_movement_is_not_a_drag() {
    let document = document();
    let container = list_with_items(&document, 2);
    let ends = Rc::new(Cell::new(0u32));

    let counter = Rc::clone(&ends);
    attach(&container, SortableOptions::default(), move |_| {
        counter.set(counter.get() + 1);
    });

    let first = container.first_element_child().unwrap();
    first.dispatch_event(&mouse_event("mousedown", 10, 10)).unwrap();
    document.dispatch_event(&mouse_event("mousemove", 11, 12)).unwrap();
    document.dispatch_event(&mouse_event("mouseup", 11, 12)).unwrap();

    assert_eq!(ends.get(), 0);
    container.remove();
}
