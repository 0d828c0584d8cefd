//! Smooth scrolling for in-page anchors, offset below the sticky header.

#[cfg(test)]
#[path = "smooth_scroll_test.rs"]
mod smooth_scroll_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{SmoothScrollConfig, selector};
use crate::error::ConfigError;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::selector::Selector;
use crate::timers::{Schedule, TimerId};

pub struct SmoothScroll {
    links_sel: Selector,
    header_sel: Selector,
    default_header_height_px: f64,
    margin_px: f64,
    initial_hash_delay_ms: u64,
    links: Vec<NodeId>,
    initial: Option<(TimerId, String)>,
}

/// What a click on an anchor with `href` should do on `pathname`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Leave it to the browser.
    Follow,
    /// Prevent the navigation and scroll to this `#fragment`.
    Scroll(String),
}

/// Classify an anchor's `href`. `#` and `#!` are placeholders and ignored;
/// fragments on other documents navigate normally.
#[must_use]
pub fn classify(href: &str, pathname: &str) -> LinkAction {
    if href.is_empty() || href == "#" || href == "#!" {
        return LinkAction::Follow;
    }
    if href.starts_with('#') {
        return LinkAction::Scroll(href.to_owned());
    }
    match href.split_once('#') {
        Some((path, fragment)) if path.is_empty() || path == pathname => LinkAction::Scroll(format!("#{fragment}")),
        _ => LinkAction::Follow,
    }
}

impl SmoothScroll {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &SmoothScrollConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            links_sel: selector("smoothScroll.links", &config.links)?,
            header_sel: selector("smoothScroll.header", &config.header)?,
            default_header_height_px: config.default_header_height_px,
            margin_px: config.margin_px,
            initial_hash_delay_ms: config.initial_hash_delay_ms,
            links: Vec::new(),
            initial: None,
        })
    }

    /// Scroll so the element named by `hash` sits just below the header.
    fn scroll_to_hash(&self, page: &mut dyn Page, hash: &str) {
        let Some(target) = hash.strip_prefix('#').and_then(|id| page.element_by_id(id)) else {
            return;
        };
        let header_height = page
            .query(&self.header_sel)
            .map_or(self.default_header_height_px, |h| page.metrics(h).offset_height);
        let top = page.metrics(target).rect.top + page.scroll_y() - header_height - self.margin_px;
        page.scroll_to(top);
    }
}

impl Behavior for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth_scroll"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        self.links = page.query_all(&self.links_sel);
        ctx.listen_all(&self.links, EventKind::Click);

        let hash = page.hash();
        if !hash.is_empty() {
            let id = ctx.set_timeout(self.initial_hash_delay_ms);
            self.initial = Some((id, hash));
        }
        Attach::when(!self.links.is_empty() || self.initial.is_some())
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        let (Target::Node(link), PageEvent::Click { .. }) = (current, event) else {
            return;
        };
        let href = page.attr(link, "href").unwrap_or_default();
        if let LinkAction::Scroll(hash) = classify(&href, &page.pathname()) {
            ctx.prevent_default();
            self.scroll_to_hash(page, &hash);
        }
    }

    fn on_timer(&mut self, id: TimerId, page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        if let Some((_, hash)) = self.initial.take_if(|(pending, _)| *pending == id) {
            self.scroll_to_hash(page, &hash);
        }
    }
}
