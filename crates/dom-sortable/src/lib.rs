//! DOM Sortable Utilities
//!
//! Simple drag-to-reorder for server-rendered lists using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! The dragged element is moved live between its siblings while the
//! pointer travels, so the drop order is just the container's child order
//! when the gesture ends. Containers replaced wholesale by partial-page
//! swaps leave their document-level handlers behind; those handlers check
//! connectivity and no-op once their container is gone.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

/// Attribute stamped on containers that already carry sortable behavior.
pub const ATTACHED_MARKER: &str = "data-sortable";

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Visual classes and drag constraints for one sortable container.
#[derive(Clone, Debug)]
pub struct SortableOptions {
    /// Restrict drag starts to presses inside a descendant matching this
    /// selector (None = anywhere on the item).
    pub handle: Option<String>,
    /// Class on the element occupying the drop slot while dragging.
    pub ghost_class: String,
    /// Class on the item from the moment the drag starts until drop.
    pub chosen_class: String,
    /// Class on the item while the pointer is moving it.
    pub drag_class: String,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            handle: None,
            ghost_class: "sortable-ghost".to_string(),
            chosen_class: "sortable-chosen".to_string(),
            drag_class: "sortable-drag".to_string(),
        }
    }
}

#[derive(Default)]
struct DragState {
    /// Item under a mousedown that has not crossed the threshold yet.
    pending: Option<PendingDrag>,
    /// Item currently being dragged.
    dragging: Option<Element>,
}

struct PendingDrag {
    item: Element,
    start_x: i32,
    start_y: i32,
}

/// Attach sortable behavior to `container`.
///
/// Returns `false` without touching the element when it already carries
/// [`ATTACHED_MARKER`], so repeated attachment after partial-page swaps is
/// a no-op. `on_end` fires once per completed drag, never for a plain
/// click, with the container as argument.
pub fn attach<F>(container: &Element, options: SortableOptions, on_end: F) -> bool
where
    F: Fn(&Element) + 'static,
{
    if container.has_attribute(ATTACHED_MARKER) {
        return false;
    }
    let Some(document) = container.owner_document() else {
        return false;
    };
    let _ = container.set_attribute(ATTACHED_MARKER, "true");

    let state = Rc::new(RefCell::new(DragState::default()));
    bind_mousedown(container, &options, &state);
    bind_document_mousemove(&document, container, &options, &state);
    bind_document_mouseup(&document, container, &options, &state, on_end);
    true
}

/// Record a pending drag when a primary-button press lands on an item.
fn bind_mousedown(container: &Element, options: &SortableOptions, state: &Rc<RefCell<DragState>>) {
    let state = Rc::clone(state);
    let container_ref = container.clone();
    let handle = options.handle.clone();
    let on_mousedown = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        // Ignore if target is input or button
        if target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
        {
            return;
        }
        if let Some(selector) = handle.as_deref() {
            if target.closest(selector).ok().flatten().is_none() {
                return;
            }
        }
        let Some(item) = direct_child_of(&container_ref, &target) else {
            return;
        };
        state.borrow_mut().pending = Some(PendingDrag {
            item,
            start_x: ev.client_x(),
            start_y: ev.client_y(),
        });
    });
    let _ = container
        .add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref());
    on_mousedown.forget();
}

/// Promote a pending drag once the threshold is crossed, then keep the
/// dragged item positioned under the pointer.
fn bind_document_mousemove(
    document: &Document,
    container: &Element,
    options: &SortableOptions,
    state: &Rc<RefCell<DragState>>,
) {
    let state = Rc::clone(state);
    let container = container.clone();
    let chosen = options.chosen_class.clone();
    let ghost = options.ghost_class.clone();
    let drag = options.drag_class.clone();
    let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        if !container.is_connected() {
            return;
        }
        let item = {
            let mut st = state.borrow_mut();
            if st.dragging.is_none() {
                let promote = match st.pending.as_ref() {
                    Some(p) => crossed_threshold(
                        ev.client_x() - p.start_x,
                        ev.client_y() - p.start_y,
                    ),
                    None => false,
                };
                if promote {
                    let item = st.pending.take().map(|p| p.item);
                    if let Some(item) = item.as_ref() {
                        let _ = item.class_list().add_3(&chosen, &ghost, &drag);
                    }
                    st.dragging = item;
                }
            }
            st.dragging.clone()
        };
        if let Some(item) = item {
            reorder_toward_pointer(&container, &item, f64::from(ev.client_y()));
        }
    });
    let _ = document
        .add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    on_mousemove.forget();
}

/// End the gesture: restore classes and report the drop, if any.
fn bind_document_mouseup<F>(
    document: &Document,
    container: &Element,
    options: &SortableOptions,
    state: &Rc<RefCell<DragState>>,
    on_end: F,
) where
    F: Fn(&Element) + 'static,
{
    let state = Rc::clone(state);
    let container = container.clone();
    let chosen = options.chosen_class.clone();
    let ghost = options.ghost_class.clone();
    let drag = options.drag_class.clone();
    let on_mouseup = Closure::<dyn FnMut(MouseEvent)>::new(move |_ev: MouseEvent| {
        let dragged = {
            let mut st = state.borrow_mut();
            st.pending = None;
            st.dragging.take()
        };
        let Some(item) = dragged else {
            return;
        };
        let _ = item.class_list().remove_3(&chosen, &ghost, &drag);
        if container.is_connected() {
            on_end(&container);
        }
    });
    let _ = document
        .add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    on_mouseup.forget();
}

/// Walk up from `target` to the direct child of `container` containing it.
fn direct_child_of(container: &Element, target: &Element) -> Option<Element> {
    let mut el = target.clone();
    loop {
        let parent = el.parent_element()?;
        if parent == *container {
            return Some(el);
        }
        el = parent;
    }
}

/// Move `item` in front of the first sibling whose vertical midpoint lies
/// below the pointer, or to the end when the pointer is past them all.
fn reorder_toward_pointer(container: &Element, item: &Element, pointer_y: f64) {
    let children = container.children();
    let mut siblings = Vec::with_capacity(children.length() as usize);
    for index in 0..children.length() {
        let Some(child) = children.item(index) else {
            continue;
        };
        if &child != item {
            siblings.push(child);
        }
    }
    let midpoints: Vec<f64> = siblings
        .iter()
        .map(|child| {
            let rect = child.get_bounding_client_rect();
            rect.top() + rect.height() / 2.0
        })
        .collect();
    let before = insertion_index(&midpoints, pointer_y).map(|index| siblings[index].clone());
    let _ = container.insert_before(item, before.as_ref().map(|el| el.as_ref()));
}

/// Index of the first midpoint below the pointer; `None` appends.
fn insertion_index(midpoints: &[f64], pointer_y: f64) -> Option<usize> {
    midpoints.iter().position(|midpoint| pointer_y < *midpoint)
}

fn crossed_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_requires_real_movement() {
        assert!(!crossed_threshold(0, 0));
        assert!(!crossed_threshold(5, -5));
        assert!(crossed_threshold(6, 0));
        assert!(crossed_threshold(0, -6));
    }

    #[test]
    fn insertion_index_picks_first_midpoint_below_pointer() {
        let midpoints = [10.0, 30.0, 50.0];
        assert_eq!(insertion_index(&midpoints, 0.0), Some(0));
        assert_eq!(insertion_index(&midpoints, 20.0), Some(1));
        assert_eq!(insertion_index(&midpoints, 49.0), Some(2));
        assert_eq!(insertion_index(&midpoints, 60.0), None);
    }

    #[test]
    fn insertion_index_on_empty_list_appends() {
        assert_eq!(insertion_index(&[], 25.0), None);
    }
}
