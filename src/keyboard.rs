//! Keyboard Shortcuts
//!
//! One global keydown listener: Escape closes the open overlay, the
//! platform modifier + K opens search, arrow keys move focus inside
//! role-annotated lists.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::focus::FocusTrap;

const MODAL_ID: &str = "modal";
const SEARCH_SELECTOR: &str = r#"[hx-get="/search"]"#;
const LIST_SELECTOR: &str = r#"[role="listbox"], [role="list"]"#;
const ITEM_SELECTOR: &str = r#"[role="option"], [role="listitem"]"#;

pub struct KeyboardNav {
    document: Document,
    /// Trap to drop when Escape closes the overlay.
    active_trap: Rc<RefCell<Option<FocusTrap>>>,
}

impl KeyboardNav {
    pub fn new(document: Document, active_trap: Rc<RefCell<Option<FocusTrap>>>) -> Self {
        Self {
            document,
            active_trap,
        }
    }

    pub fn bind(self: Rc<Self>) {
        let nav = Rc::clone(&self);
        let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
            nav.handle(&ev);
        });
        let _ = self
            .document
            .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        on_keydown.forget();
    }

    fn handle(&self, ev: &KeyboardEvent) {
        match ev.key().as_str() {
            "Escape" => self.close_modal(),
            "k" if ev.meta_key() || ev.ctrl_key() => {
                ev.prevent_default();
                self.open_search();
            }
            "ArrowDown" => self.navigate_list(ev, true),
            "ArrowUp" => self.navigate_list(ev, false),
            _ => {}
        }
    }

    /// Empty the modal container and release the focus trap with it.
    fn close_modal(&self) {
        let Some(modal) = self.document.get_element_by_id(MODAL_ID) else {
            return;
        };
        if modal.inner_html().trim().is_empty() {
            return;
        }
        modal.set_inner_html("");
        self.active_trap.borrow_mut().take();
    }

    fn open_search(&self) {
        let Ok(Some(button)) = self.document.query_selector(SEARCH_SELECTOR) else {
            return;
        };
        if let Some(button) = button.dyn_ref::<HtmlElement>() {
            button.click();
        }
    }

    /// Move focus within the list the focused element belongs to, if any.
    fn navigate_list(&self, ev: &KeyboardEvent, forward: bool) {
        let Some(active) = self.document.active_element() else {
            return;
        };
        let Ok(Some(list)) = active.closest(LIST_SELECTOR) else {
            return;
        };
        let items: Vec<Element> = match list.query_selector_all(ITEM_SELECTOR) {
            Ok(nodes) => dom::elements(&nodes).collect(),
            Err(_) => return,
        };
        let Some(current) = items.iter().position(|item| item == &active) else {
            return;
        };
        ev.prevent_default();
        let next = step_index(current, items.len(), forward);
        if let Some(target) = items.get(next).and_then(|item| item.dyn_ref::<HtmlElement>()) {
            let _ = target.focus();
        }
    }
}

/// Next focus position, clamped at both ends.
fn step_index(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1).min(len.saturating_sub(1))
    } else {
        current.saturating_sub(1)
    }
}
