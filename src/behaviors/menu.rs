//! Collapsible navigation menu.
//!
//! Closed on load. The toggle flips it; a nav-link click, a click outside
//! both toggle and panel, Escape, or a settled resize to desktop width close
//! it. While open the body is scroll-locked.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{MenuConfig, selector};
use crate::error::ConfigError;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::rate_limit::Debounce;
use crate::selector::Selector;
use crate::timers::TimerId;

pub struct Menu {
    toggle_sel: Selector,
    panel_sel: Selector,
    links_sel: Selector,
    open_class: String,
    panel_height: String,
    breakpoint_px: f64,
    resize: Debounce<()>,
    toggle: Option<NodeId>,
    panel: Option<NodeId>,
    links: Vec<NodeId>,
}

impl Menu {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &MenuConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            toggle_sel: selector("menu.toggle", &config.toggle)?,
            panel_sel: selector("menu.panel", &config.panel)?,
            links_sel: selector("menu.links", &config.links)?,
            open_class: config.open_class.clone(),
            panel_height: config.panel_height.clone(),
            breakpoint_px: config.breakpoint_px,
            resize: Debounce::new(config.resize_debounce_ms),
            toggle: None,
            panel: None,
            links: Vec::new(),
        })
    }

    fn is_open(&self, page: &dyn Page) -> bool {
        self.panel.is_some_and(|p| page.has_class(p, &self.open_class))
    }

    fn open(&self, page: &mut dyn Page) {
        let (Some(toggle), Some(panel)) = (self.toggle, self.panel) else {
            return;
        };
        page.add_class(panel, &self.open_class);
        page.set_attr(toggle, "aria-expanded", "true");
        if let Some(body) = page.body() {
            page.set_style(body, "overflow", "hidden");
        }
        page.set_style(panel, "height", &self.panel_height);
    }

    fn close(&self, page: &mut dyn Page) {
        let (Some(toggle), Some(panel)) = (self.toggle, self.panel) else {
            return;
        };
        page.remove_class(panel, &self.open_class);
        page.set_attr(toggle, "aria-expanded", "false");
        if let Some(body) = page.body() {
            page.set_style(body, "overflow", "");
        }
    }

    fn is_outside(&self, page: &dyn Page, node: NodeId) -> bool {
        let inside = |root: Option<NodeId>| root.is_some_and(|r| page.contains(r, node));
        !inside(self.toggle) && !inside(self.panel)
    }
}

impl Behavior for Menu {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        let (Some(toggle), Some(panel)) = (page.query(&self.toggle_sel), page.query(&self.panel_sel)) else {
            return Attach::Absent;
        };
        self.toggle = Some(toggle);
        self.panel = Some(panel);
        self.links = page.query_all(&self.links_sel);

        ctx.listen(Target::Node(toggle), EventKind::Click);
        ctx.listen_all(&self.links, EventKind::Click);
        ctx.listen(Target::Document, EventKind::Click);
        ctx.listen(Target::Document, EventKind::KeyDown);
        ctx.listen(Target::Window, EventKind::Resize);
        Attach::Attached
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        match (current, event) {
            (Target::Node(node), PageEvent::Click { .. }) if Some(node) == self.toggle => {
                if self.is_open(page) {
                    self.close(page);
                } else {
                    self.open(page);
                }
            }
            (Target::Node(node), PageEvent::Click { .. }) if self.links.contains(&node) => self.close(page),
            (Target::Document, PageEvent::Click { target, .. }) => {
                if self.is_outside(page, *target) {
                    self.close(page);
                }
            }
            (Target::Document, PageEvent::KeyDown { key }) => {
                if key.is_escape() && self.is_open(page) {
                    self.close(page);
                    if let Some(toggle) = self.toggle {
                        page.focus(toggle);
                    }
                }
            }
            (Target::Window, PageEvent::Resize) => self.resize.call((), ctx),
            _ => {}
        }
    }

    fn on_timer(&mut self, id: TimerId, page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        if self.resize.fire(id).is_some() && page.inner_width() >= self.breakpoint_px {
            self.close(page);
        }
    }

    fn detach(&mut self, page: &mut dyn Page) {
        self.close(page);
    }
}
