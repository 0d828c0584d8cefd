//! Floating "back to top" button, shown once the visitor has scrolled down.

#[cfg(test)]
#[path = "scroll_top_test.rs"]
mod scroll_top_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::ScrollTopConfig;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::rate_limit::Throttle;
use crate::timers::TimerId;

pub const BUTTON_CLASS: &str = "scroll-to-top";

const BUTTON_STYLE: [(&str, &str); 14] = [
    ("position", "fixed"),
    ("bottom", "30px"),
    ("right", "30px"),
    ("width", "50px"),
    ("height", "50px"),
    ("border-radius", "50%"),
    ("background-color", "var(--color-accent)"),
    ("color", "var(--color-text-inverse)"),
    ("border", "none"),
    ("font-size", "24px"),
    ("cursor", "pointer"),
    ("transition", "all 0.3s ease-in-out"),
    ("z-index", "1000"),
    ("box-shadow", "var(--shadow-lg)"),
];

pub struct ScrollToTop {
    reveal_after_px: f64,
    label: String,
    throttle: Throttle,
    button: Option<NodeId>,
}

impl ScrollToTop {
    #[must_use]
    pub fn from_config(config: &ScrollTopConfig) -> Self {
        Self {
            reveal_after_px: config.reveal_after_px,
            label: config.label.clone(),
            throttle: Throttle::new(config.throttle_ms),
            button: None,
        }
    }

    fn set_visible(page: &mut dyn Page, button: NodeId, visible: bool) {
        let (opacity, transform) = if visible { ("1", "translateY(0)") } else { ("0", "translateY(20px)") };
        page.set_style(button, "opacity", opacity);
        page.set_style(button, "transform", transform);
    }
}

impl Behavior for ScrollToTop {
    fn name(&self) -> &'static str {
        "scroll_top"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        let Some(body) = page.body() else {
            return Attach::Absent;
        };
        let button = page.create_element("button");
        page.add_class(button, BUTTON_CLASS);
        page.set_attr(button, "type", "button");
        page.set_attr(button, "aria-label", &self.label);
        page.set_text(button, "↑");
        for (property, value) in BUTTON_STYLE {
            page.set_style(button, property, value);
        }
        Self::set_visible(page, button, false);
        page.append_child(body, button);
        self.button = Some(button);

        ctx.listen(Target::Node(button), EventKind::Click);
        ctx.listen(Target::Window, EventKind::Scroll);
        Attach::Attached
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        let Some(button) = self.button else {
            return;
        };
        match (current, event) {
            (Target::Node(_), PageEvent::Click { .. }) => page.scroll_to(0.0),
            (Target::Window, PageEvent::Scroll) => {
                if self.throttle.try_acquire(ctx) {
                    let visible = page.scroll_y() > self.reveal_after_px;
                    Self::set_visible(page, button, visible);
                }
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, id: TimerId, _page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        self.throttle.fire(id);
    }

    fn detach(&mut self, page: &mut dyn Page) {
        if let Some(button) = self.button.take() {
            page.remove(button);
        }
    }
}
