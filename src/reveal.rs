//! Scroll-Triggered Reveal
//!
//! One-shot entrance animation: elements tagged for it get the reveal
//! class the first time they become visible, then stop being observed.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom;

const TAG_SELECTOR: &str = ".animate-on-scroll";
const REVEAL_CLASS: &str = "animate-fade-in-up";
const THRESHOLD: f64 = 0.1;

pub struct RevealObserver {
    /// None when the runtime has no IntersectionObserver; the feature is
    /// simply off then.
    observer: Option<IntersectionObserver>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn new() -> Self {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let target = entry.target();
                        let _ = target.class_list().add_1(REVEAL_CLASS);
                        observer.unobserve(&target);
                    }
                }
            },
        );
        let options = IntersectionObserverInit::new();
        options.set_root_margin("0px");
        options.set_threshold(&JsValue::from_f64(THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .ok();
        Self {
            observer,
            _callback: callback,
        }
    }

    /// Observe every tagged element currently in the document. Rerun after
    /// partial swaps bring in new content.
    pub fn observe(&self, document: &Document) {
        let Some(observer) = self.observer.as_ref() else {
            return;
        };
        for element in dom::query_all(document, TAG_SELECTOR) {
            observer.observe(&element);
        }
    }
}
