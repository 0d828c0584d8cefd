//! Lazy loading and a one-time fade-in for images.

#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{ImageConfig, selector};
use crate::error::ConfigError;
use crate::event::{IntersectionEntry, ObserverOptions};
use crate::page::Page;
use crate::runtime::ObserverId;
use crate::selector::Selector;

pub struct ImageReveal {
    targets_sel: Selector,
    options: ObserverOptions,
}

impl ImageReveal {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &ImageConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            targets_sel: selector("images.targets", &config.targets)?,
            options: ObserverOptions::threshold(config.threshold),
        })
    }
}

impl Behavior for ImageReveal {
    fn name(&self) -> &'static str {
        "images"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        let images = page.query_all(&self.targets_sel);
        if images.is_empty() {
            return Attach::Absent;
        }
        let observer = ctx.create_observer(self.options);
        for img in images {
            if !page.has_attr(img, "loading") {
                page.set_attr(img, "loading", "lazy");
            }
            page.set_style(img, "opacity", "0");
            page.set_style(img, "transform", "scale(0.95)");
            page.set_style(img, "transition", "opacity 0.6s ease-out, transform 0.6s ease-out");
            ctx.observe(observer, img);
        }
        Attach::Attached
    }

    fn on_intersect(&mut self, observer: ObserverId, entry: &IntersectionEntry, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        if !entry.is_intersecting {
            return;
        }
        page.set_style(entry.target, "opacity", "1");
        page.set_style(entry.target, "transform", "scale(1)");
        ctx.unobserve(observer, entry.target);
    }
}
