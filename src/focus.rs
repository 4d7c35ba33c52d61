//! Focus Containment
//!
//! Keeps keyboard-tab cycling confined to an open overlay, wrapping from
//! last to first and back. Dropping the returned [`FocusTrap`] removes the
//! listener, so the trap doubles as its own disposer.

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement, KeyboardEvent};

use crate::dom;

const FOCUSABLE_SELECTOR: &str =
    r#"button, [href], input, select, textarea, [tabindex]:not([tabindex="-1"])"#;

/// Active containment for one overlay. Drop to release.
pub struct FocusTrap {
    _listener: EventListener,
}

/// Confine Tab cycling to `container`'s focusable elements and focus the
/// first one. Returns `None` when the container has nothing focusable.
pub fn trap(container: &Element) -> Option<FocusTrap> {
    let focusable: Vec<HtmlElement> = match container.query_selector_all(FOCUSABLE_SELECTOR) {
        Ok(nodes) => dom::elements(&nodes)
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect(),
        Err(_) => return None,
    };
    let first = focusable.first()?.clone();
    let last = focusable.last()?.clone();
    let _ = first.focus();

    let document = container.owner_document()?;
    let target: &EventTarget = container.as_ref();
    let listener = EventListener::new(target, "keydown", move |event| {
        let Some(ev) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if ev.key() != "Tab" {
            return;
        }
        let active = document.active_element();
        let at_first = active.as_ref() == Some(first.as_ref());
        let at_last = active.as_ref() == Some(last.as_ref());
        match wrap_target(ev.shift_key(), at_first, at_last) {
            Some(Wrap::ToLast) => {
                ev.prevent_default();
                let _ = last.focus();
            }
            Some(Wrap::ToFirst) => {
                ev.prevent_default();
                let _ = first.focus();
            }
            None => {}
        }
    });
    Some(FocusTrap {
        _listener: listener,
    })
}

#[derive(Debug, PartialEq, Eq)]
enum Wrap {
    ToFirst,
    ToLast,
}

/// Where Tab should land when it would otherwise leave the overlay.
fn wrap_target(shift: bool, at_first: bool, at_last: bool) -> Option<Wrap> {
    if shift {
        at_first.then_some(Wrap::ToLast)
    } else {
        at_last.then_some(Wrap::ToFirst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_on_last_wraps_to_first() {
        assert_eq!(wrap_target(false, false, true), Some(Wrap::ToFirst));
    }

    #[test]
    fn shift_tab_on_first_wraps_to_last() {
        assert_eq!(wrap_target(true, true, false), Some(Wrap::ToLast));
    }

    #[test]
    fn interior_elements_tab_normally() {
        assert_eq!(wrap_target(false, false, false), None);
        assert_eq!(wrap_target(true, false, false), None);
    }

    #[test]
    fn sole_element_wraps_onto_itself() {
        assert_eq!(wrap_target(false, true, true), Some(Wrap::ToFirst));
        assert_eq!(wrap_target(true, true, true), Some(Wrap::ToLast));
    }
}
