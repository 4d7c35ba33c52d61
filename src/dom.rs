//! DOM Helpers
//!
//! Thin wrappers over web-sys lookups shared by the subsystems.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, NodeList};

/// Elements of a static node list, skipping anything that is not one.
pub fn elements(list: &NodeList) -> impl Iterator<Item = Element> + '_ {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
}

/// All elements matching `selector`, or nothing on a bad selector.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => elements(&list).collect(),
        Err(_) => Vec::new(),
    }
}

/// The element an event fired on, if it fired on one.
pub fn event_target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}
