//! Highlights the nav link of the section currently under the header.

#[cfg(test)]
#[path = "scroll_spy_test.rs"]
mod scroll_spy_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{ScrollSpyConfig, selector};
use crate::error::ConfigError;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::rate_limit::Throttle;
use crate::selector::Selector;
use crate::timers::TimerId;

pub struct ScrollSpy {
    sections_sel: Selector,
    links_sel: Selector,
    active_class: String,
    offset_px: f64,
    throttle: Throttle,
    sections: Vec<NodeId>,
    links: Vec<NodeId>,
}

impl ScrollSpy {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &ScrollSpyConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            sections_sel: selector("scrollSpy.sections", &config.sections)?,
            links_sel: selector("scrollSpy.links", &config.links)?,
            active_class: config.active_class.clone(),
            offset_px: config.offset_px,
            throttle: Throttle::new(config.throttle_ms),
            sections: Vec::new(),
            links: Vec::new(),
        })
    }

    /// Mark the link for every section spanning `scrollY + offset`, in
    /// document order, so the last such section ends up active.
    fn update(&self, page: &mut dyn Page) {
        let pos = page.scroll_y() + self.offset_px;
        for &section in &self.sections {
            let metrics = page.metrics(section);
            let top = metrics.offset_top;
            if pos < top || pos >= top + metrics.offset_height {
                continue;
            }
            let href = format!("#{}", page.attr(section, "id").unwrap_or_default());
            for &link in &self.links {
                page.remove_class(link, &self.active_class);
                page.remove_attr(link, "aria-current");
                if page.attr(link, "href").as_deref() == Some(href.as_str()) {
                    page.add_class(link, &self.active_class);
                    page.set_attr(link, "aria-current", "page");
                }
            }
        }
    }
}

impl Behavior for ScrollSpy {
    fn name(&self) -> &'static str {
        "scroll_spy"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        self.sections = page.query_all(&self.sections_sel);
        self.links = page.query_all(&self.links_sel);
        if self.sections.is_empty() || self.links.is_empty() {
            return Attach::Absent;
        }
        ctx.listen(Target::Window, EventKind::Scroll);
        self.update(page);
        Attach::Attached
    }

    fn on_event(&mut self, _current: Target, event: &PageEvent, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        if matches!(event, PageEvent::Scroll) && self.throttle.try_acquire(ctx) {
            self.update(page);
        }
    }

    fn on_timer(&mut self, id: TimerId, _page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        self.throttle.fire(id);
    }
}
