//! Button lift on hover and a click ripple.

#[cfg(test)]
#[path = "buttons_test.rs"]
mod buttons_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{ButtonConfig, selector};
use crate::error::ConfigError;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::selector::Selector;
use crate::timers::{Schedule, TimerId};

const RIPPLE_MARKER: &str = "data-ripple";
const RIPPLE_KEYFRAMES: &str = "@keyframes ripple { to { transform: scale(4); opacity: 0; } }";

/// Where a ripple goes inside its button, in the button's own coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// A circle covering the button, centred on the pointer.
    #[must_use]
    pub fn at(rect: crate::page::Rect, client_x: f64, client_y: f64) -> Self {
        let size = rect.width.max(rect.height);
        Self { size, left: client_x - rect.left - size / 2.0, top: client_y - rect.top - size / 2.0 }
    }
}

pub struct ButtonEffects {
    targets_sel: Selector,
    ripple_ms: u64,
    buttons: Vec<NodeId>,
    ripples: Vec<(TimerId, NodeId)>,
}

impl ButtonEffects {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &ButtonConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            targets_sel: selector("buttons.targets", &config.targets)?,
            ripple_ms: config.ripple_ms,
            buttons: Vec::new(),
            ripples: Vec::new(),
        })
    }

    fn ripple(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>, button: NodeId, client_x: f64, client_y: f64) {
        let geometry = RippleGeometry::at(page.metrics(button).rect, client_x, client_y);
        let span = page.create_element("span");
        let size = format!("{}px", geometry.size);
        let styles = [
            ("position", "absolute".to_owned()),
            ("width", size.clone()),
            ("height", size),
            ("border-radius", "50%".to_owned()),
            ("background", "rgba(255, 255, 255, 0.5)".to_owned()),
            ("top", format!("{}px", geometry.top)),
            ("left", format!("{}px", geometry.left)),
            ("transform", "scale(0)".to_owned()),
            ("animation", format!("ripple {}s ease-out", self.ripple_s())),
            ("pointer-events", "none".to_owned()),
        ];
        for (property, value) in &styles {
            page.set_style(span, property, value);
        }
        super::ensure_keyframes(page, RIPPLE_MARKER, RIPPLE_KEYFRAMES);
        page.append_child(button, span);

        let timer = ctx.set_timeout(self.ripple_ms);
        self.ripples.push((timer, span));
    }

    #[allow(clippy::cast_precision_loss)]
    fn ripple_s(&self) -> f64 {
        self.ripple_ms as f64 / 1000.0
    }
}

impl Behavior for ButtonEffects {
    fn name(&self) -> &'static str {
        "buttons"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        self.buttons = page.query_all(&self.targets_sel);
        for &button in &self.buttons {
            page.set_style(button, "position", "relative");
            page.set_style(button, "overflow", "hidden");
        }
        ctx.listen_all(&self.buttons, EventKind::MouseEnter);
        ctx.listen_all(&self.buttons, EventKind::MouseLeave);
        ctx.listen_all(&self.buttons, EventKind::Click);
        Attach::when(!self.buttons.is_empty())
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        let Target::Node(button) = current else {
            return;
        };
        match event {
            PageEvent::MouseEnter { .. } => {
                page.set_style(button, "transform", "translateY(-2px)");
                page.set_style(button, "box-shadow", "var(--shadow-lg)");
            }
            PageEvent::MouseLeave { .. } => super::clear_hover(page, button),
            PageEvent::Click { client_x, client_y, .. } => self.ripple(page, ctx, button, *client_x, *client_y),
            _ => {}
        }
    }

    fn on_timer(&mut self, id: TimerId, page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        if let Some(index) = self.ripples.iter().position(|(timer, _)| *timer == id) {
            let (_, span) = self.ripples.swap_remove(index);
            page.remove(span);
        }
    }

    fn detach(&mut self, page: &mut dyn Page) {
        for (_, span) in self.ripples.drain(..) {
            page.remove(span);
        }
    }
}
