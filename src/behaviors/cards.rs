//! Card lift on hover.

#[cfg(test)]
#[path = "cards_test.rs"]
mod cards_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{CardConfig, selector};
use crate::error::ConfigError;
use crate::event::{EventKind, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::selector::Selector;

pub struct CardHover {
    targets_sel: Selector,
    cards: Vec<NodeId>,
}

impl CardHover {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &CardConfig) -> Result<Self, ConfigError> {
        Ok(Self { targets_sel: selector("cards.targets", &config.targets)?, cards: Vec::new() })
    }
}

impl Behavior for CardHover {
    fn name(&self) -> &'static str {
        "cards"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        self.cards = page.query_all(&self.targets_sel);
        ctx.listen_all(&self.cards, EventKind::MouseEnter);
        ctx.listen_all(&self.cards, EventKind::MouseLeave);
        Attach::when(!self.cards.is_empty())
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        let Target::Node(card) = current else {
            return;
        };
        match event {
            PageEvent::MouseEnter { .. } => {
                page.set_style(card, "transform", "translateY(-8px) scale(1.02)");
                page.set_style(card, "box-shadow", "var(--shadow-xl)");
            }
            PageEvent::MouseLeave { .. } => super::clear_hover(page, card),
            _ => {}
        }
    }
}
