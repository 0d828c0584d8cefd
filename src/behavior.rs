//! The behavior abstraction and the capabilities handed to it.
//!
//! A behavior finds its elements in `attach`, registers what it needs through
//! [`Ctx`] (listeners, intersection observers, timers) and then reacts to
//! whatever the runtime routes back to it. It never holds the page or the
//! timer queue itself; both are lent for the duration of each callback.
//!
//! Absence is a normal outcome: a behavior whose elements are not on the page
//! returns [`Attach::Absent`] and is never called again.

use crate::behaviors::{
    accordion::Accordion, buttons::ButtonEffects, cards::CardHover, counters::Counters, entrance::Entrance,
    forms::FormValidator, images::ImageReveal, links::LinkHover, menu::Menu, scroll_spy::ScrollSpy,
    scroll_top::ScrollToTop, smooth_scroll::SmoothScroll,
};
use crate::config::PageConfig;
use crate::error::ConfigError;
use crate::event::{EventKind, IntersectionEntry, ObserverOptions, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::runtime::{ListenerId, Listeners, ObserverId, Observers};
use crate::timers::{Schedule, TimerId, Timers};

/// Outcome of [`Behavior::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// Elements were found and wired.
    Attached,
    /// Nothing to control on this page.
    Absent,
}

impl Attach {
    /// `Attached` when `present` holds, else `Absent`.
    #[must_use]
    pub fn when(present: bool) -> Self {
        if present { Self::Attached } else { Self::Absent }
    }
}

/// An independent unit of page interaction.
pub trait Behavior {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Find elements, apply initial state and register listeners.
    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach;

    /// A DOM event for a listener this behavior registered on `current`.
    fn on_event(&mut self, _current: Target, _event: &PageEvent, _page: &mut dyn Page, _ctx: &mut Ctx<'_>) {}

    /// An intersection change reported by one of this behavior's observers.
    fn on_intersect(
        &mut self,
        _observer: ObserverId,
        _entry: &IntersectionEntry,
        _page: &mut dyn Page,
        _ctx: &mut Ctx<'_>,
    ) {
    }

    /// One of this behavior's timers expired.
    fn on_timer(&mut self, _id: TimerId, _page: &mut dyn Page, _ctx: &mut Ctx<'_>) {}

    /// Undo page state the behavior owns. Listeners, observers and timers are
    /// released by the runtime.
    fn detach(&mut self, _page: &mut dyn Page) {}
}

/// Capabilities lent to a behavior for one callback.
pub struct Ctx<'a> {
    owner: usize,
    timers: &'a mut Timers,
    listeners: &'a mut Listeners,
    observers: &'a mut Observers,
    default_prevented: bool,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(
        owner: usize,
        timers: &'a mut Timers,
        listeners: &'a mut Listeners,
        observers: &'a mut Observers,
    ) -> Self {
        Self { owner, timers, listeners, observers, default_prevented: false }
    }

    /// Slot index of the behavior being called.
    #[must_use]
    pub fn owner(&self) -> usize {
        self.owner
    }

    pub fn listen(&mut self, target: Target, kind: EventKind) -> ListenerId {
        self.listeners.add(self.owner, target, kind)
    }

    /// Register the same listener kind on every node.
    pub fn listen_all(&mut self, nodes: &[NodeId], kind: EventKind) {
        for node in nodes {
            self.listen(Target::Node(*node), kind);
        }
    }

    pub fn create_observer(&mut self, options: ObserverOptions) -> ObserverId {
        self.observers.create(self.owner, options)
    }

    pub fn observe(&mut self, observer: ObserverId, node: NodeId) {
        self.observers.observe(observer, node);
    }

    pub fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        self.observers.unobserve(observer, node);
    }

    /// Suppress the browser's default action for the event being handled.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl Schedule for Ctx<'_> {
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        self.timers.set_timeout(self.owner, delay_ms)
    }

    fn set_interval(&mut self, period_ms: u64) -> TimerId {
        self.timers.set_interval(self.owner, period_ms)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }
}

/// Build the site's behaviors, in page-ready order.
///
/// # Errors
///
/// Returns [`ConfigError::Selector`] if any configured selector fails to parse.
pub fn registry(config: &PageConfig) -> Result<Vec<Box<dyn Behavior>>, ConfigError> {
    Ok(vec![
        Box::new(Menu::from_config(&config.menu)?),
        Box::new(SmoothScroll::from_config(&config.smooth_scroll)?),
        Box::new(ScrollSpy::from_config(&config.scroll_spy)?),
        Box::new(FormValidator::from_config(&config.forms)?),
        Box::new(Entrance::from_config(&config.entrance)?),
        Box::new(ButtonEffects::from_config(&config.buttons)?),
        Box::new(CardHover::from_config(&config.cards)?),
        Box::new(Counters::from_config(&config.counters)?),
        Box::new(ScrollToTop::from_config(&config.scroll_top)),
        Box::new(ImageReveal::from_config(&config.images)?),
        Box::new(Accordion::from_config(&config.accordion)?),
        Box::new(LinkHover::from_config(&config.links)?),
    ])
}
