//! Theme Persistence
//!
//! Applies the dark/light flag to the document element, persists explicit
//! choices under a fixed storage key, and follows the system preference
//! while no explicit choice is stored.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MediaQueryListEvent, MouseEvent, Storage, Window};

use crate::dom;

/// localStorage key for the explicit preference.
pub const STORAGE_KEY: &str = "youtube-deck-theme";

const DATA_ATTR: &str = "data-theme";
const TOGGLE_SELECTOR: &str = ".theme-toggle";
const SUN_SELECTOR: &str = ".theme-toggle__icon--sun";
const MOON_SELECTOR: &str = ".theme-toggle__icon--moon";
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

pub struct ThemeManager {
    document: Document,
    storage: Option<Storage>,
}

impl ThemeManager {
    pub fn new(window: &Window, document: Document) -> Self {
        Self {
            document,
            storage: window.local_storage().ok().flatten(),
        }
    }

    /// Apply the stored preference, defaulting to dark.
    pub fn init(&self) {
        self.apply(self.stored().unwrap_or(Theme::Dark), false);
    }

    /// The explicit user choice, if one was persisted.
    pub fn stored(&self) -> Option<Theme> {
        let value = self.storage.as_ref()?.get_item(STORAGE_KEY).ok()??;
        Theme::parse(&value)
    }

    /// Theme the document currently displays (absent attribute reads dark).
    pub fn current(&self) -> Theme {
        self.document
            .document_element()
            .and_then(|root| root.get_attribute(DATA_ATTR))
            .and_then(|value| Theme::parse(&value))
            .unwrap_or(Theme::Dark)
    }

    /// Stamp the document and refresh every toggle affordance; write the
    /// storage key iff `persist`.
    pub fn apply(&self, theme: Theme, persist: bool) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(DATA_ATTR, theme.as_str());
        }
        if persist {
            if let Some(storage) = self.storage.as_ref() {
                let _ = storage.set_item(STORAGE_KEY, theme.as_str());
            }
        }
        self.refresh_toggles(theme);
    }

    /// Flip the displayed theme and persist the result.
    pub fn toggle(&self) {
        self.apply(self.current().flipped(), true);
    }

    /// React to a system preference change. Only restyles while no
    /// explicit choice is stored, and never writes storage.
    pub fn follow_system(&self, prefers_dark: bool) {
        if self.stored().is_none() {
            self.apply(Theme::from_system(prefers_dark), false);
        }
    }

    fn refresh_toggles(&self, theme: Theme) {
        for toggle in dom::query_all(&self.document, TOGGLE_SELECTOR) {
            set_icon_display(&toggle, SUN_SELECTOR, theme == Theme::Dark);
            set_icon_display(&toggle, MOON_SELECTOR, theme == Theme::Light);
        }
    }

    /// Wire the system-preference listener and the delegated toggle clicks.
    pub fn bind(self: Rc<Self>, window: &Window) {
        if let Ok(Some(query)) = window.match_media(DARK_QUERY) {
            let manager = Rc::clone(&self);
            let on_change =
                Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |ev: MediaQueryListEvent| {
                    manager.follow_system(ev.matches());
                });
            let _ = query
                .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
            on_change.forget();
        }

        let manager = Rc::clone(&self);
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            let Some(target) = dom::event_target_element(&ev) else {
                return;
            };
            if target.closest(TOGGLE_SELECTOR).ok().flatten().is_some() {
                manager.toggle();
            }
        });
        let _ = self
            .document
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
}

/// Toggle buttons carry a sun and a moon icon; exactly one is shown.
fn set_icon_display(toggle: &Element, selector: &str, visible: bool) {
    let Ok(Some(icon)) = toggle.query_selector(selector) else {
        return;
    };
    let value = if visible { "block" } else { "none" };
    if let Some(html) = icon.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().set_property("display", value);
    } else if let Some(svg) = icon.dyn_ref::<web_sys::SvgElement>() {
        let _ = svg.style().set_property("display", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_between_dark_and_light() {
        assert_eq!(Theme::Dark.flipped(), Theme::Light);
        assert_eq!(Theme::Light.flipped(), Theme::Dark);
    }

    #[test]
    fn parse_round_trips_stored_values() {
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn system_preference_maps_to_theme() {
        assert_eq!(Theme::from_system(true), Theme::Dark);
        assert_eq!(Theme::from_system(false), Theme::Light);
    }
}
