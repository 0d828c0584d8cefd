//! Runtime: owns the page and the behaviors, and routes everything between them.
//!
//! DESIGN
//! ======
//! Behaviors register listeners, observers and timers through
//! [`crate::behavior::Ctx`]; the runtime keeps the tables and calls back the
//! owning behavior by slot index. There are two ways in:
//!
//! - A browser host attaches one real listener per registration and calls
//!   [`Runtime::deliver`], [`Runtime::intersect`] and [`Runtime::fire_timer`].
//!   It learns about registrations by draining the request outboxes of a
//!   runtime built with [`Runtime::mirrored`].
//! - Tests (or any headless host) call [`Runtime::dispatch`], which walks the
//!   propagation path itself, [`Runtime::report_visibility`] and
//!   [`Runtime::advance`].
//!
//! Both paths end in the same per-slot callback, so behavior code cannot tell
//! them apart.

#[cfg(test)]
#[path = "runtime_test.rs"]
mod runtime_test;

use std::collections::BTreeMap;

use crate::behavior::{Attach, Behavior, Ctx, registry};
use crate::config::PageConfig;
use crate::error::Error;
use crate::event::{EventKind, IntersectionEntry, ObserverOptions, PageEvent};
use crate::page::{NodeId, Page, Target};
use crate::timers::{Outbox, TimerId, TimerRequest, Timers};

// =============================================================
// Listener table
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    pub owner: usize,
    pub target: Target,
    pub kind: EventKind,
}

/// A listener change the browser host must mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerRequest {
    Add(Listener),
    Remove(ListenerId),
}

#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<Listener>,
    outbox: Outbox<ListenerRequest>,
}

impl Listeners {
    pub fn add(&mut self, owner: usize, target: Target, kind: EventKind) -> ListenerId {
        self.next_id += 1;
        let listener = Listener { id: ListenerId(self.next_id), owner, target, kind };
        self.entries.push(listener);
        self.outbox.push(ListenerRequest::Add(listener));
        listener.id
    }

    pub fn remove_owner(&mut self, owner: usize) {
        let (gone, keep): (Vec<Listener>, Vec<Listener>) = self.entries.drain(..).partition(|l| l.owner == owner);
        self.entries = keep;
        for l in gone {
            self.outbox.push(ListenerRequest::Remove(l.id));
        }
    }

    #[must_use]
    pub fn get(&self, id: ListenerId) -> Option<Listener> {
        self.entries.iter().find(|l| l.id == id).copied()
    }

    /// Listeners of `kind` on `target`, in registration order.
    #[must_use]
    pub fn on(&self, target: Target, kind: EventKind) -> Vec<Listener> {
        self.entries
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .copied()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn drain_requests(&mut self) -> Vec<ListenerRequest> {
        self.outbox.drain()
    }
}

// =============================================================
// Observer table
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

#[derive(Debug, Clone)]
struct Observer {
    owner: usize,
    options: ObserverOptions,
    targets: Vec<NodeId>,
}

/// An observer change the browser host must mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObserverRequest {
    Create { id: ObserverId, options: ObserverOptions },
    Observe { id: ObserverId, node: NodeId },
    Unobserve { id: ObserverId, node: NodeId },
    Disconnect(ObserverId),
}

#[derive(Debug, Default)]
pub struct Observers {
    next_id: u64,
    entries: BTreeMap<ObserverId, Observer>,
    outbox: Outbox<ObserverRequest>,
}

impl Observers {
    pub fn create(&mut self, owner: usize, options: ObserverOptions) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.entries.insert(id, Observer { owner, options, targets: Vec::new() });
        self.outbox.push(ObserverRequest::Create { id, options });
        id
    }

    pub fn observe(&mut self, id: ObserverId, node: NodeId) {
        if let Some(observer) = self.entries.get_mut(&id) {
            if !observer.targets.contains(&node) {
                observer.targets.push(node);
                self.outbox.push(ObserverRequest::Observe { id, node });
            }
        }
    }

    pub fn unobserve(&mut self, id: ObserverId, node: NodeId) {
        if let Some(observer) = self.entries.get_mut(&id) {
            let before = observer.targets.len();
            observer.targets.retain(|n| *n != node);
            if observer.targets.len() != before {
                self.outbox.push(ObserverRequest::Unobserve { id, node });
            }
        }
    }

    pub fn remove_owner(&mut self, owner: usize) {
        let ids: Vec<ObserverId> = self
            .entries
            .iter()
            .filter(|(_, o)| o.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            self.entries.remove(&id);
            self.outbox.push(ObserverRequest::Disconnect(id));
        }
    }

    #[must_use]
    pub fn owner(&self, id: ObserverId) -> Option<usize> {
        self.entries.get(&id).map(|o| o.owner)
    }

    #[must_use]
    pub fn is_observing(&self, id: ObserverId, node: NodeId) -> bool {
        self.entries.get(&id).is_some_and(|o| o.targets.contains(&node))
    }

    /// Observers watching `node`, with their options.
    #[must_use]
    pub fn watching(&self, node: NodeId) -> Vec<(ObserverId, ObserverOptions)> {
        self.entries
            .iter()
            .filter(|(_, o)| o.targets.contains(&node))
            .map(|(id, o)| (*id, o.options))
            .collect()
    }

    pub fn drain_requests(&mut self) -> Vec<ObserverRequest> {
        self.outbox.drain()
    }
}

// =============================================================
// Runtime
// =============================================================

struct Slot {
    behavior: Box<dyn Behavior>,
    attached: bool,
}

/// What happened to one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Number of listeners that ran.
    pub delivered: usize,
    pub default_prevented: bool,
}

pub struct Runtime<P: Page> {
    page: P,
    slots: Vec<Slot>,
    timers: Timers,
    listeners: Listeners,
    observers: Observers,
}

impl<P: Page + 'static> Runtime<P> {
    /// A headless runtime; nothing is recorded for a host.
    pub fn new(page: P, behaviors: Vec<Box<dyn Behavior>>) -> Self {
        Self {
            page,
            slots: behaviors.into_iter().map(|behavior| Slot { behavior, attached: false }).collect(),
            timers: Timers::new(),
            listeners: Listeners::default(),
            observers: Observers::default(),
        }
    }

    /// A runtime whose registrations are recorded for a browser host to mirror.
    pub fn mirrored(page: P, behaviors: Vec<Box<dyn Behavior>>) -> Self {
        let mut runtime = Self::new(page, behaviors);
        runtime.timers = Timers::mirrored();
        runtime.listeners.outbox = Outbox::enabled();
        runtime.observers.outbox = Outbox::enabled();
        runtime
    }

    /// Build every registered behavior from `config` and attach them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a configured selector does not parse.
    pub fn boot(page: P, config: &PageConfig) -> Result<Self, Error> {
        let mut runtime = Self::new(page, registry(config)?);
        runtime.attach_all();
        Ok(runtime)
    }

    /// Attach every behavior that is not attached yet, in slot order.
    pub fn attach_all(&mut self) -> Vec<(&'static str, Attach)> {
        let mut report = Vec::with_capacity(self.slots.len());
        for owner in 0..self.slots.len() {
            if self.slots[owner].attached {
                continue;
            }
            let (outcome, _) = self.call(owner, |behavior, page, ctx| behavior.attach(page, ctx));
            let name = self.slots[owner].behavior.name();
            match outcome {
                Attach::Attached => {
                    self.slots[owner].attached = true;
                    log::debug!("{name}: attached");
                }
                Attach::Absent => {
                    self.release(owner);
                    log::debug!("{name}: no elements, skipped");
                }
            }
            report.push((name, outcome));
        }
        report
    }

    fn call<R>(&mut self, owner: usize, f: impl FnOnce(&mut dyn Behavior, &mut dyn Page, &mut Ctx<'_>) -> R) -> (R, bool) {
        let mut ctx = Ctx::new(owner, &mut self.timers, &mut self.listeners, &mut self.observers);
        let out = f(self.slots[owner].behavior.as_mut(), &mut self.page, &mut ctx);
        (out, ctx.default_prevented())
    }

    fn release(&mut self, owner: usize) {
        self.timers.cancel_owner(owner);
        self.listeners.remove_owner(owner);
        self.observers.remove_owner(owner);
    }

    /// Detach every behavior and release everything it registered.
    pub fn teardown(&mut self) {
        for owner in 0..self.slots.len() {
            if !self.slots[owner].attached {
                continue;
            }
            self.slots[owner].behavior.detach(&mut self.page);
            self.slots[owner].attached = false;
            self.release(owner);
            log::debug!("{}: detached", self.slots[owner].behavior.name());
        }
    }

    // --- Accessors ---

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    /// Registration changes since the last call, for a browser host.
    pub fn drain_requests(&mut self) -> (Vec<ListenerRequest>, Vec<ObserverRequest>, Vec<TimerRequest>) {
        (self.listeners.drain_requests(), self.observers.drain_requests(), self.timers.drain_requests())
    }

    // --- Host entry points ---

    /// Run the behavior behind one registered listener. Returns whether it
    /// asked for the default action to be suppressed.
    pub fn deliver(&mut self, listener: ListenerId, event: &PageEvent) -> bool {
        let Some(l) = self.listeners.get(listener) else {
            return false;
        };
        if !self.slots.get(l.owner).is_some_and(|s| s.attached) {
            return false;
        }
        let (_, prevented) = self.call(l.owner, |behavior, page, ctx| behavior.on_event(l.target, event, page, ctx));
        prevented
    }

    /// Route an intersection entry to the observer's owner.
    pub fn intersect(&mut self, observer: ObserverId, entry: &IntersectionEntry) {
        let Some(owner) = self.observers.owner(observer) else {
            return;
        };
        if !self.observers.is_observing(observer, entry.target) {
            return;
        }
        self.call(owner, |behavior, page, ctx| behavior.on_intersect(observer, entry, page, ctx));
    }

    /// A host timer expired.
    pub fn fire_timer(&mut self, id: TimerId) {
        if let Some(owner) = self.timers.fired(id) {
            self.call(owner, |behavior, page, ctx| behavior.on_timer(id, page, ctx));
        }
    }

    // --- Headless entry points ---

    /// Dispatch an event through the page the way the DOM propagates it:
    /// target, ancestors, document, window for bubbling events; the target
    /// alone for `mouseenter`/`mouseleave`; the window for scroll and resize.
    pub fn dispatch(&mut self, event: PageEvent) -> Dispatch {
        let kind = event.kind();
        let mut path = Vec::new();
        match (event.target(), kind) {
            (Some(node), k) if k.bubbles() => {
                let mut cursor = Some(node);
                while let Some(n) = cursor {
                    path.push(Target::Node(n));
                    cursor = self.page.parent(n);
                }
                path.push(Target::Document);
                path.push(Target::Window);
            }
            (Some(node), _) => path.push(Target::Node(node)),
            (None, EventKind::KeyDown) => {
                path.push(Target::Document);
                path.push(Target::Window);
            }
            (None, _) => path.push(Target::Window),
        }

        let mut outcome = Dispatch::default();
        for target in path {
            for listener in self.listeners.on(target, kind) {
                outcome.delivered += 1;
                if self.deliver(listener.id, &event) {
                    outcome.default_prevented = true;
                }
            }
        }
        outcome
    }

    /// Report that `node` is now `ratio` visible to every observer watching
    /// it. The entry counts as intersecting once `ratio` reaches the
    /// observer's threshold (and is non-zero).
    pub fn report_visibility(&mut self, node: NodeId, ratio: f64) {
        for (observer, options) in self.observers.watching(node) {
            let entry = IntersectionEntry {
                target: node,
                is_intersecting: ratio > 0.0 && ratio >= options.threshold,
                ratio,
            };
            self.intersect(observer, &entry);
        }
    }

    /// Move virtual time forward by `ms`, firing due timers in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now_ms() + ms;
        while let Some((id, owner)) = self.timers.pop_due(until) {
            self.call(owner, |behavior, page, ctx| behavior.on_timer(id, page, ctx));
        }
        self.timers.set_now(until);
    }
}
