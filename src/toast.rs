//! Toast Notifications
//!
//! A FIFO queue that shows transient messages one at a time: each request
//! is rendered into the toast anchor, kept visible for a fixed window,
//! hidden, and followed by a transition gap before the next one appears.
//! Requests submitted while a toast is visible wait their turn; a missing
//! anchor drops the request and the queue keeps draining.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

/// How long a toast stays visible.
const VISIBLE_MS: u32 = 4_000;
/// Transition-out gap before the next toast may appear.
const TRANSITION_MS: u32 = 300;

const ANCHOR_ID: &str = "toast";
const MESSAGE_ID: &str = "toast-message";
const VISIBLE_CLASS: &str = "toast--visible";
/// Utility classes that keep a hidden toast translated off-screen.
const HIDDEN_CLASSES: [&str; 2] = ["translate-y-20", "opacity-0"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Success,
    Error,
    Warning,
}

impl Severity {
    /// Lenient parse: anything unrecognized reads as success.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("error") => Self::Error,
            Some("warning") => Self::Warning,
            _ => Self::Success,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
            Self::Warning => "toast--warning",
        }
    }

    fn icon_path(self) -> &'static str {
        match self {
            Self::Success => {
                r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7"/>"#
            }
            Self::Error => {
                r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>"#
            }
            Self::Warning => {
                r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z"/>"#
            }
        }
    }

    fn icon_color(self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#ef4444",
            Self::Warning => "#f59e0b",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastRequest {
    pub message: String,
    pub severity: Severity,
}

/// Queue bookkeeping: arrival order plus the single-display flag.
#[derive(Default)]
struct QueueState {
    pending: VecDeque<ToastRequest>,
    showing: bool,
}

impl QueueState {
    /// Append a request; true when the caller must start a display cycle.
    fn push(&mut self, request: ToastRequest) -> bool {
        self.pending.push_back(request);
        if self.showing {
            false
        } else {
            self.showing = true;
            true
        }
    }

    /// Pop the oldest request; clears the showing flag once drained.
    fn take_next(&mut self) -> Option<ToastRequest> {
        let next = self.pending.pop_front();
        if next.is_none() {
            self.showing = false;
        }
        next
    }
}

pub struct ToastQueue {
    document: Document,
    state: Rc<RefCell<QueueState>>,
    /// Bumped on teardown; in-flight cycles compare and no-op.
    generation: Rc<Cell<u64>>,
}

impl ToastQueue {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            state: Rc::new(RefCell::new(QueueState::default())),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Queue a message; starts a display cycle iff none is running.
    /// Duplicates are not coalesced.
    pub fn enqueue(&self, message: impl Into<String>, severity: Severity) {
        let start = self.state.borrow_mut().push(ToastRequest {
            message: message.into(),
            severity,
        });
        if start {
            self.run_cycle();
        }
    }

    /// Invalidate scheduled hide/advance steps and drop queued requests,
    /// for tearing down a toast region without dangling callbacks.
    pub fn invalidate(&self) {
        self.generation.set(self.generation.get() + 1);
        let mut state = self.state.borrow_mut();
        state.pending.clear();
        state.showing = false;
    }

    /// True when no display cycle is in progress.
    pub fn is_idle(&self) -> bool {
        !self.state.borrow().showing
    }

    fn run_cycle(&self) {
        let document = self.document.clone();
        let state = Rc::clone(&self.state);
        let generation = Rc::clone(&self.generation);
        let token = generation.get();
        spawn_local(async move {
            loop {
                let Some(request) = state.borrow_mut().take_next() else {
                    break;
                };
                // Anchor gone: drop this request, keep draining.
                let Some(anchor) = ToastAnchor::locate(&document) else {
                    continue;
                };
                anchor.render(&request);
                anchor.reveal();
                TimeoutFuture::new(VISIBLE_MS).await;
                if generation.get() != token {
                    return;
                }
                anchor.conceal();
                TimeoutFuture::new(TRANSITION_MS).await;
                if generation.get() != token {
                    return;
                }
            }
        });
    }
}

struct ToastAnchor {
    root: Element,
    message: Element,
}

impl ToastAnchor {
    /// Looked up per cycle: partial swaps may replace the anchor between
    /// toasts.
    fn locate(document: &Document) -> Option<Self> {
        Some(Self {
            root: document.get_element_by_id(ANCHOR_ID)?,
            message: document.get_element_by_id(MESSAGE_ID)?,
        })
    }

    fn render(&self, request: &ToastRequest) {
        self.message.set_text_content(Some(&request.message));
        let classes = self.root.class_list();
        let _ = classes.remove_3(
            Severity::Success.class(),
            Severity::Error.class(),
            Severity::Warning.class(),
        );
        let _ = classes.add_1(request.severity.class());
        if let Ok(Some(icon)) = self.root.query_selector("svg") {
            icon.set_inner_html(request.severity.icon_path());
            if let Some(svg) = icon.dyn_ref::<web_sys::SvgElement>() {
                let _ = svg
                    .style()
                    .set_property("color", request.severity.icon_color());
            }
        }
    }

    fn reveal(&self) {
        let classes = self.root.class_list();
        let _ = classes.remove_2(HIDDEN_CLASSES[0], HIDDEN_CLASSES[1]);
        let _ = classes.add_1(VISIBLE_CLASS);
    }

    fn conceal(&self) {
        let classes = self.root.class_list();
        let _ = classes.add_2(HIDDEN_CLASSES[0], HIDDEN_CLASSES[1]);
        let _ = classes.remove_1(VISIBLE_CLASS);
    }
}

/// `showToast` event payload: `{ value, type }`, or a bare message string
/// when the server triggers the event without a body.
#[derive(Deserialize)]
struct ToastDetail {
    value: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Decode the detail of an inbound toast event.
pub fn request_from_detail(detail: &JsValue) -> Option<ToastRequest> {
    if let Some(message) = detail.as_string() {
        return Some(ToastRequest {
            message,
            severity: Severity::Success,
        });
    }
    let detail: ToastDetail = serde_wasm_bindgen::from_value(detail.clone()).ok()?;
    Some(ToastRequest {
        message: detail.value,
        severity: Severity::parse(detail.kind.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str) -> ToastRequest {
        ToastRequest {
            message: message.to_string(),
            severity: Severity::Success,
        }
    }

    #[test]
    fn requests_drain_in_arrival_order() {
        let mut state = QueueState::default();
        assert!(state.push(request("first")));
        assert!(!state.push(request("second")));
        assert!(!state.push(request("third")));

        let drained: Vec<String> = std::iter::from_fn(|| state.take_next())
            .map(|req| req.message)
            .collect();
        assert_eq!(drained, ["first", "second", "third"]);
    }

    #[test]
    fn showing_flag_tracks_cycle_lifetime() {
        let mut state = QueueState::default();
        assert!(!state.showing);
        state.push(request("only"));
        assert!(state.showing);
        assert!(state.take_next().is_some());
        // Still mid-cycle until the queue reports empty.
        assert!(state.showing);
        assert!(state.take_next().is_none());
        assert!(!state.showing);
    }

    #[test]
    fn only_the_first_push_starts_a_cycle() {
        let mut state = QueueState::default();
        assert!(state.push(request("a")));
        assert!(!state.push(request("b")));
        assert!(state.take_next().is_some());
        // A push during an active cycle never starts a second one.
        assert!(!state.push(request("c")));
    }

    #[test]
    fn duplicates_are_not_coalesced() {
        let mut state = QueueState::default();
        state.push(request("saved"));
        state.push(request("saved"));
        assert_eq!(state.take_next(), Some(request("saved")));
        assert_eq!(state.take_next(), Some(request("saved")));
    }

    #[test]
    fn unknown_severity_reads_as_success() {
        assert_eq!(Severity::parse(Some("error")), Severity::Error);
        assert_eq!(Severity::parse(Some("warning")), Severity::Warning);
        assert_eq!(Severity::parse(Some("fatal")), Severity::Success);
        assert_eq!(Severity::parse(None), Severity::Success);
    }
}
