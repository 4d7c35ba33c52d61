//! Lazy Image Loading
//!
//! Images arrive with their real source parked in a deferred attribute.
//! When the runtime lazy-loads natively the swap happens immediately;
//! otherwise each image waits for its first visibility, one-shot.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry};

use crate::dom;

const DEFERRED_ATTR: &str = "data-src";
const TAG_SELECTOR: &str = "img[data-src]";

pub struct LazyImages {
    native: bool,
    observer: Option<IntersectionObserver>,
    _callback: Option<Closure<dyn FnMut(Array, IntersectionObserver)>>,
}

impl LazyImages {
    pub fn new(document: &Document) -> Self {
        if supports_native_lazy(document) {
            return Self {
                native: true,
                observer: None,
                _callback: None,
            };
        }
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let image = entry.target();
                    if let Some(src) = image.get_attribute(DEFERRED_ATTR) {
                        let _ = image.set_attribute("src", &src);
                        let _ = image.remove_attribute(DEFERRED_ATTR);
                    }
                    observer.unobserve(&image);
                }
            },
        );
        let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref()).ok();
        Self {
            native: false,
            observer,
            _callback: Some(callback),
        }
    }

    /// Load (or start watching) every deferred image in the document.
    /// Rerun after partial swaps bring in new images.
    pub fn scan(&self, document: &Document) {
        if self.native {
            for image in dom::query_all(document, TAG_SELECTOR) {
                if let Some(src) = image.get_attribute(DEFERRED_ATTR) {
                    let _ = image.set_attribute("src", &src);
                }
            }
            return;
        }
        let Some(observer) = self.observer.as_ref() else {
            return;
        };
        for image in dom::query_all(document, TAG_SELECTOR) {
            observer.observe(&image);
        }
    }
}

/// A `loading` property on image elements means the browser defers
/// off-screen fetches on its own.
fn supports_native_lazy(document: &Document) -> bool {
    document
        .create_element("img")
        .ok()
        .map(|img| {
            js_sys::Reflect::has(img.as_ref(), &JsValue::from_str("loading")).unwrap_or(false)
        })
        .unwrap_or(false)
}
