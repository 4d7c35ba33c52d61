//! Application Wiring
//!
//! Constructs each subsystem once and binds the global event table:
//! custom UI signals, partial-swap notifications and the CSRF hook. Each
//! handler declares its inputs (the event payload) and delegates to one
//! subsystem; nothing here holds state of its own beyond the active
//! focus trap.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Document, Element, Event, Window};

use crate::focus::{self, FocusTrap};
use crate::keyboard::KeyboardNav;
use crate::lazy::LazyImages;
use crate::reorder::ReorderSync;
use crate::reveal::RevealObserver;
use crate::theme::ThemeManager;
use crate::toast::ToastQueue;
use crate::{csrf, toast};

/// Custom event the server raises to request a toast.
pub const TOAST_EVENT: &str = "showToast";
const CONFIG_REQUEST_EVENT: &str = "htmx:configRequest";
const AFTER_SWAP_EVENT: &str = "htmx:afterSwap";
const AFTER_SETTLE_EVENT: &str = "htmx:afterSettle";
const MODAL_ID: &str = "modal";
const MODAL_SELECTOR: &str = ".modal, #search-modal";

/// Build the layer against the live document, deferring until the parser
/// is done when the script ran early.
pub fn boot() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::once(move || start(&window, &document));
        let _ = target
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
        on_ready.forget();
    } else {
        start(&window, &document);
    }
}

fn start(window: &Window, document: &Document) {
    let theme = Rc::new(ThemeManager::new(window, document.clone()));
    theme.init();
    theme.bind(window);

    let active_trap: Rc<RefCell<Option<FocusTrap>>> = Rc::new(RefCell::new(None));
    let keyboard = Rc::new(KeyboardNav::new(document.clone(), Rc::clone(&active_trap)));
    keyboard.bind();

    let toasts = Rc::new(ToastQueue::new(document.clone()));

    let reveal = Rc::new(RevealObserver::new());
    reveal.observe(document);

    let lazy = Rc::new(LazyImages::new(document));
    lazy.scan(document);

    let reorder = Rc::new(ReorderSync::new(document.clone()));
    reorder.attach_all();

    bind_body_events(document, toasts, reveal, lazy, reorder, active_trap);
}

fn bind_body_events(
    document: &Document,
    toasts: Rc<ToastQueue>,
    reveal: Rc<RevealObserver>,
    lazy: Rc<LazyImages>,
    reorder: Rc<ReorderSync>,
    active_trap: Rc<RefCell<Option<FocusTrap>>>,
) {
    let Some(body) = document.body() else {
        return;
    };

    // Inbound toast signal.
    {
        let toasts = Rc::clone(&toasts);
        let on_toast = Closure::<dyn FnMut(CustomEvent)>::new(move |ev: CustomEvent| {
            if let Some(request) = toast::request_from_detail(&ev.detail()) {
                toasts.enqueue(request.message, request.severity);
            }
        });
        let _ =
            body.add_event_listener_with_callback(TOAST_EVENT, on_toast.as_ref().unchecked_ref());
        on_toast.forget();
    }

    // Token header on every outgoing state-changing request.
    {
        let document = document.clone();
        let on_config = Closure::<dyn FnMut(CustomEvent)>::new(move |ev: CustomEvent| {
            csrf::inject_header(&document, &ev);
        });
        let _ = body.add_event_listener_with_callback(
            CONFIG_REQUEST_EVENT,
            on_config.as_ref().unchecked_ref(),
        );
        on_config.forget();
    }

    // A swap can bring in a modal (trap focus) or replace a reorderable
    // container (re-attach behavior).
    {
        let document = document.clone();
        let reorder = Rc::clone(&reorder);
        let active_trap = Rc::clone(&active_trap);
        let on_swap = Closure::<dyn FnMut(CustomEvent)>::new(move |ev: CustomEvent| {
            let Some(target_id) = swap_target_id(&ev) else {
                return;
            };
            if target_id == MODAL_ID {
                if let Ok(Some(modal)) = document.query_selector(MODAL_SELECTOR) {
                    *active_trap.borrow_mut() = focus::trap(&modal);
                }
            } else if ReorderSync::owns_target(&target_id) {
                defer_attach(&reorder);
            }
        });
        let _ = body
            .add_event_listener_with_callback(AFTER_SWAP_EVENT, on_swap.as_ref().unchecked_ref());
        on_swap.forget();
    }

    // Settle fires after navigation too: re-attach and rescan everything.
    {
        let document = document.clone();
        let reorder = Rc::clone(&reorder);
        let on_settle = Closure::<dyn FnMut(Event)>::new(move |_ev: Event| {
            defer_attach(&reorder);
            reveal.observe(&document);
            lazy.scan(&document);
        });
        let _ = body.add_event_listener_with_callback(
            AFTER_SETTLE_EVENT,
            on_settle.as_ref().unchecked_ref(),
        );
        on_settle.forget();
    }
}

/// id of the element a partial-page swap replaced.
fn swap_target_id(event: &CustomEvent) -> Option<String> {
    let detail = event.detail();
    let target = Reflect::get(&detail, &JsValue::from_str("target")).ok()?;
    let target: Element = target.dyn_into().ok()?;
    let id = target.id();
    (!id.is_empty()).then_some(id)
}

/// Swapped-in containers settle at the end of the current tick; attach on
/// the next one.
fn defer_attach(reorder: &Rc<ReorderSync>) {
    let reorder = Rc::clone(reorder);
    Timeout::new(0, move || reorder.attach_all()).forget();
}
