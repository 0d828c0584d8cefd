//! The site's page behaviors, one module each.
//!
//! Every behavior is built from its section of [`crate::config::PageConfig`]
//! and registered by [`crate::behavior::registry`]. None of them reads
//! another's state.

pub mod accordion;
pub mod buttons;
pub mod cards;
pub mod counters;
pub mod entrance;
pub mod forms;
pub mod images;
pub mod links;
pub mod menu;
pub mod scroll_spy;
pub mod scroll_top;
pub mod smooth_scroll;

#[cfg(test)]
pub(crate) mod test_support;

use crate::page::{NodeId, Page};
use crate::selector::Selector;

/// Clear the hover transform and shadow set on `mouseenter`.
pub(crate) fn clear_hover(page: &mut dyn Page, node: NodeId) {
    page.set_style(node, "transform", "");
    page.set_style(node, "box-shadow", "");
}

/// Append a `<style>` carrying `marker` to `<head>` unless one already exists.
/// Returns whether a node was added.
pub(crate) fn ensure_keyframes(page: &mut dyn Page, marker: &str, css: &str) -> bool {
    let Some(head) = page.head() else {
        return false;
    };
    let selector = match Selector::parse(&format!("style[{marker}]")) {
        Ok(selector) => selector,
        Err(err) => {
            log::warn!("pagefx: keyframes marker: {err}");
            return false;
        }
    };
    if !page.query_within(head, &selector).is_empty() {
        return false;
    }
    let style = page.create_element("style");
    page.set_attr(style, marker, "");
    page.set_text(style, css);
    page.append_child(head, style);
    true
}
