//! Drag-Reorder Synchronization
//!
//! Captures the order a drag gesture produced and best-effort persists it.
//! The visual reorder has already happened by the time the end callback
//! runs; a failed write leaves the UI in the new order until the server
//! re-renders the list. Repeating a payload is safe (full-replace
//! semantics server-side), so the sync is plain last-write-wins.

use serde::Serialize;
use web_sys::{Document, Element};

use dom_sortable::SortableOptions;

use crate::net;

const REORDER_URL: &str = "/subscriptions/reorder";
const SIDEBAR_ID: &str = "sidebar-list";
const DECK_ID: &str = "deck-columns";
const DECK_HANDLE: &str = ".column-handle";
const ID_ATTR: &str = "data-id";

/// Which list the gesture moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderContext {
    Sidebar,
    Columns,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ReorderPayload {
    pub ids: Vec<String>,
    pub context: ReorderContext,
}

pub struct ReorderSync {
    document: Document,
}

impl ReorderSync {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Attach both sortables. Safe to call after every partial swap:
    /// containers already carrying behavior are left alone, absent
    /// containers leave the feature off for that page variant.
    pub fn attach_all(&self) {
        self.attach(SIDEBAR_ID, ReorderContext::Sidebar, None);
        self.attach(DECK_ID, ReorderContext::Columns, Some(DECK_HANDLE));
    }

    fn attach(&self, container_id: &str, context: ReorderContext, handle: Option<&str>) {
        let Some(container) = self.document.get_element_by_id(container_id) else {
            return;
        };
        let document = self.document.clone();
        let options = SortableOptions {
            handle: handle.map(str::to_string),
            ..SortableOptions::default()
        };
        dom_sortable::attach(&container, options, move |container| {
            submit(&document, container, context);
        });
    }

    /// Does a swap of this element require re-attachment?
    pub fn owns_target(target_id: &str) -> bool {
        target_id == SIDEBAR_ID || target_id == DECK_ID
    }
}

/// Build the payload from current DOM order and fire the write.
fn submit(document: &Document, container: &Element, context: ReorderContext) {
    let payload = ReorderPayload {
        ids: collect_ids(container),
        context,
    };
    match serde_json::to_string(&payload) {
        Ok(body) => net::post_json(document, REORDER_URL, body),
        Err(err) => gloo_console::error!("reorder payload failed:", err.to_string()),
    }
}

/// Identifiers of the container's children in current DOM order.
/// Children without the id attribute are skipped, not an error.
pub fn collect_ids(container: &Element) -> Vec<String> {
    let children = container.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .filter_map(|child| child.get_attribute(ID_ATTR))
        .filter(|id| !id.is_empty())
        .collect()
}
