//! Fade-and-rise entrance for content blocks as they scroll into view.

#[cfg(test)]
#[path = "entrance_test.rs"]
mod entrance_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{EntranceConfig, selector};
use crate::error::ConfigError;
use crate::event::{IntersectionEntry, ObserverOptions};
use crate::page::{NodeId, Page};
use crate::runtime::ObserverId;
use crate::selector::Selector;

pub struct Entrance {
    targets_sel: Selector,
    options: ObserverOptions,
    offset_px: f64,
    stagger_s: f64,
    targets: Vec<NodeId>,
}

impl Entrance {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &EntranceConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            targets_sel: selector("entrance.targets", &config.targets)?,
            options: ObserverOptions {
                threshold: config.threshold,
                root_margin_bottom_px: config.root_margin_bottom_px,
            },
            offset_px: config.offset_px,
            stagger_s: config.stagger_s,
            targets: Vec::new(),
        })
    }

    /// The `transition` for the element at `index` in document order.
    #[must_use]
    pub fn transition(&self, index: usize) -> String {
        #[allow(clippy::cast_precision_loss)]
        let delay = index as f64 * self.stagger_s;
        let delay = (delay * 1000.0).round() / 1000.0;
        format!("opacity 0.8s ease-out {delay}s, transform 0.8s ease-out {delay}s")
    }
}

impl Behavior for Entrance {
    fn name(&self) -> &'static str {
        "entrance"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        self.targets = page.query_all(&self.targets_sel);
        if self.targets.is_empty() {
            return Attach::Absent;
        }
        let observer = ctx.create_observer(self.options);
        let hidden = format!("translateY({}px)", self.offset_px);
        for (index, &node) in self.targets.iter().enumerate() {
            page.set_style(node, "opacity", "0");
            page.set_style(node, "transform", &hidden);
            page.set_style(node, "transition", &self.transition(index));
            ctx.observe(observer, node);
        }
        Attach::Attached
    }

    fn on_intersect(&mut self, _observer: ObserverId, entry: &IntersectionEntry, page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        if entry.is_intersecting {
            page.set_style(entry.target, "opacity", "1");
            page.set_style(entry.target, "transform", "translateY(0)");
        }
    }
}
