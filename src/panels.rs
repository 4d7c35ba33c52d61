//! Deck Panel Affordances
//!
//! Visibility of the active-columns section and placeholder skeletons for
//! partials that are still loading. Both are driven from the
//! server-rendered markup through the exports module.

use web_sys::{Document, Element};

const SECTION_ID: &str = "active-columns-section";
const LIST_ID: &str = "active-columns-list";
const COUNT_ID: &str = "active-columns-count";
const CHIP_SELECTOR: &str = r#"[id^="active-chip-"]"#;

/// Recount the active-column chips and show or hide the section.
pub fn update_active_columns(document: &Document) {
    let Some(section) = document.get_element_by_id(SECTION_ID) else {
        return;
    };
    let Some(list) = document.get_element_by_id(LIST_ID) else {
        return;
    };
    let chips = list
        .query_selector_all(CHIP_SELECTOR)
        .map(|nodes| nodes.length())
        .unwrap_or(0);

    let classes = section.class_list();
    if chips == 0 {
        let _ = classes.add_1("hidden");
        let _ = classes.remove_2("border-b", "border-zinc-800");
    } else {
        let _ = classes.remove_1("hidden");
        let _ = classes.add_2("border-b", "border-zinc-800");
        if let Some(count) = document.get_element_by_id(COUNT_ID) {
            count.set_text_content(Some(&chips.to_string()));
        }
    }
}

/// Pulse-animated placeholder cards shown while a partial loads.
pub fn skeleton_markup(count: usize) -> String {
    let card = concat!(
        r#"<div class="skeleton-card animate-pulse">"#,
        r#"<div class="skeleton skeleton-thumbnail mb-3"></div>"#,
        r#"<div class="skeleton skeleton-text"></div>"#,
        r#"<div class="skeleton skeleton-text" style="width: 60%"></div>"#,
        r#"</div>"#,
    );
    card.repeat(count)
}

pub fn show_skeleton(container: &Element, count: usize) {
    container.set_inner_html(&skeleton_markup(count));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_markup_repeats_one_card_per_slot() {
        let markup = skeleton_markup(3);
        assert_eq!(markup.matches("skeleton-card").count(), 3);
        assert_eq!(markup.matches("skeleton-thumbnail").count(), 3);
    }

    #[test]
    fn zero_slots_render_nothing() {
        assert!(skeleton_markup(0).is_empty());
    }
}
