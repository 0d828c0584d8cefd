//! Height animation for accordion panels.
//!
//! Collapsing first pins `max-height` to the content height and drops it to
//! zero a moment later, so the CSS transition has a start value.

#[cfg(test)]
#[path = "accordion_test.rs"]
mod accordion_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{AccordionConfig, selector};
use crate::error::ConfigError;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::selector::Selector;
use crate::timers::{Schedule, TimerId};

pub struct Accordion {
    controls_sel: Selector,
    target_attribute: String,
    collapse_delay_ms: u64,
    collapsing: Vec<(TimerId, NodeId)>,
}

impl Accordion {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &AccordionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            controls_sel: selector("accordion.controls", &config.controls)?,
            target_attribute: config.target_attribute.clone(),
            collapse_delay_ms: config.collapse_delay_ms,
            collapsing: Vec::new(),
        })
    }

    /// The panel a control points at, if the reference parses and resolves.
    fn panel(&self, page: &dyn Page, control: NodeId) -> Option<NodeId> {
        let raw = page.attr(control, &self.target_attribute)?;
        match Selector::parse(&raw) {
            Ok(sel) => page.query(&sel),
            Err(err) => {
                log::debug!("accordion: ignoring target `{raw}`: {err}");
                None
            }
        }
    }

    fn toggle(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>, control: NodeId) {
        let Some(panel) = self.panel(page, control) else {
            return;
        };
        let height = format!("{}px", page.metrics(panel).scroll_height);
        page.set_style(panel, "max-height", &height);
        if page.attr(control, "aria-expanded").as_deref() == Some("true") {
            let timer = ctx.set_timeout(self.collapse_delay_ms);
            self.collapsing.push((timer, panel));
            page.set_attr(control, "aria-expanded", "false");
            page.add_class(control, "collapsed");
        } else {
            page.set_attr(control, "aria-expanded", "true");
            page.remove_class(control, "collapsed");
        }
    }
}

impl Behavior for Accordion {
    fn name(&self) -> &'static str {
        "accordion"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        let controls = page.query_all(&self.controls_sel);
        ctx.listen_all(&controls, EventKind::Click);
        Attach::when(!controls.is_empty())
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        if let (Target::Node(control), PageEvent::Click { .. }) = (current, event) {
            self.toggle(page, ctx, control);
        }
    }

    fn on_timer(&mut self, id: TimerId, page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        if let Some(index) = self.collapsing.iter().position(|(timer, _)| *timer == id) {
            let (_, panel) = self.collapsing.swap_remove(index);
            page.set_style(panel, "max-height", "0");
        }
    }
}
