//! Text links nudge right on hover.

#[cfg(test)]
#[path = "links_test.rs"]
mod links_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{LinkConfig, selector};
use crate::error::ConfigError;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::selector::Selector;

pub struct LinkHover {
    targets_sel: Selector,
    shift: String,
    links: Vec<NodeId>,
}

impl LinkHover {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &LinkConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            targets_sel: selector("links.targets", &config.targets)?,
            shift: format!("translateX({}px)", config.shift_px),
            links: Vec::new(),
        })
    }
}

impl Behavior for LinkHover {
    fn name(&self) -> &'static str {
        "links"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        self.links = page.query_all(&self.targets_sel);
        ctx.listen_all(&self.links, EventKind::MouseEnter);
        ctx.listen_all(&self.links, EventKind::MouseLeave);
        Attach::when(!self.links.is_empty())
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        let Target::Node(link) = current else {
            return;
        };
        match event {
            PageEvent::MouseEnter { .. } => {
                page.set_style(link, "transform", &self.shift);
                page.set_style(link, "transition", "transform 0.2s ease-out");
            }
            PageEvent::MouseLeave { .. } => page.set_style(link, "transform", ""),
            _ => {}
        }
    }
}
