use std::cell::RefCell;
use std::collections::HashMap;

use gloo_timers::callback::{Interval, Timeout};
use js_sys::Array;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Event, EventTarget, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::{WebPage, logged};
use crate::behavior::{Attach, registry};
use crate::config::PageConfig;
use crate::event::{EventKind, IntersectionEntry, ObserverOptions};
use crate::runtime::{Listener, ListenerId, ListenerRequest, ObserverId, ObserverRequest, Runtime};
use crate::timers::{TimerId, TimerRequest};

thread_local! {
    static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
}

/// Start function: boot once the document has been parsed.
#[wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Warn };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("pagefx: logger already set"));
    }

    let page = match WebPage::new() {
        Ok(page) => page,
        Err(err) => {
            log::error!("pagefx: {err}");
            return;
        }
    };
    if page.ready_state() != "loading" {
        start(page);
        return;
    }

    let document = page.document().clone();
    let ready = Closure::once(move || start(page));
    let added = document.add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref());
    if logged("addEventListener", added).is_some() {
        ready.forget();
    }
}

fn start(page: WebPage) {
    let config = page.read_config();
    let behaviors = match registry(&config) {
        Ok(behaviors) => behaviors,
        Err(err) => {
            log::warn!("pagefx: {err}; using defaults");
            match registry(&PageConfig::default()) {
                Ok(behaviors) => behaviors,
                Err(err) => {
                    log::error!("pagefx: {err}");
                    return;
                }
            }
        }
    };

    let mut runtime = Runtime::mirrored(page, behaviors);
    let report = runtime.attach_all();
    let attached = report.iter().filter(|(_, outcome)| *outcome == Attach::Attached).count();
    log::info!("pagefx: {attached}/{} behaviors attached", report.len());

    let mut host = Host::new(runtime);
    host.sync();
    HOST.with(|cell| *cell.borrow_mut() = Some(host));
}

/// Run `f` against the host, then mirror whatever the behaviors registered.
///
/// A callback that arrives while another one is still running (the DOM can
/// dispatch synchronously from inside a write) is dropped.
fn with_host(f: impl FnOnce(&mut Host)) {
    HOST.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            log::debug!("pagefx: nested callback dropped");
            return;
        };
        let Some(host) = slot.as_mut() else {
            return;
        };
        host.spent.clear();
        f(host);
        host.sync();
    });
}

// =============================================================
// Host
// =============================================================

struct Binding {
    target: EventTarget,
    kind: EventKind,
    callback: Closure<dyn FnMut(Event)>,
}

struct Watch {
    observer: IntersectionObserver,
    callback: Closure<dyn FnMut(Array)>,
}

enum Pending {
    Once(Timeout),
    Every(Interval),
}

/// Closures retired during the current callback. They may still be on the
/// stack, so they are dropped at the start of the next one.
#[derive(Default)]
struct Spent {
    events: Vec<Closure<dyn FnMut(Event)>>,
    entries: Vec<Closure<dyn FnMut(Array)>>,
    timers: Vec<Closure<dyn FnMut()>>,
}

impl Spent {
    fn clear(&mut self) {
        self.events.clear();
        self.entries.clear();
        self.timers.clear();
    }
}

struct Host {
    runtime: Runtime<WebPage>,
    listeners: HashMap<ListenerId, Binding>,
    observers: HashMap<ObserverId, Watch>,
    timers: HashMap<TimerId, Pending>,
    spent: Spent,
}

impl Host {
    fn new(runtime: Runtime<WebPage>) -> Self {
        Self {
            runtime,
            listeners: HashMap::new(),
            observers: HashMap::new(),
            timers: HashMap::new(),
            spent: Spent::default(),
        }
    }

    fn sync(&mut self) {
        let (listeners, observers, timers) = self.runtime.drain_requests();
        for request in listeners {
            match request {
                ListenerRequest::Add(listener) => self.listen(listener),
                ListenerRequest::Remove(id) => self.unlisten(id),
            }
        }
        for request in observers {
            match request {
                ObserverRequest::Create { id, options } => self.create_observer(id, options),
                ObserverRequest::Observe { id, node } => {
                    if let (Some(watch), Some(el)) = (self.observers.get(&id), self.runtime.page().element(node)) {
                        watch.observer.observe(&el);
                    }
                }
                ObserverRequest::Unobserve { id, node } => {
                    if let (Some(watch), Some(el)) = (self.observers.get(&id), self.runtime.page().element(node)) {
                        watch.observer.unobserve(&el);
                    }
                }
                ObserverRequest::Disconnect(id) => {
                    if let Some(watch) = self.observers.remove(&id) {
                        watch.observer.disconnect();
                        self.spent.entries.push(watch.callback);
                    }
                }
            }
        }
        for request in timers {
            match request {
                TimerRequest::Schedule { id, delay_ms, repeat } => self.schedule(id, delay_ms, repeat),
                TimerRequest::Cancel(id) => self.retire_timer(id),
            }
        }
    }

    // --- Listeners ---

    fn listen(&mut self, listener: Listener) {
        let Some(target) = self.runtime.page().event_target(listener.target) else {
            return;
        };
        let id = listener.id;
        let callback = Closure::wrap(Box::new(move |event: Event| {
            with_host(|host| host.deliver(id, &event));
        }) as Box<dyn FnMut(Event)>);
        let added = target.add_event_listener_with_callback(listener.kind.as_str(), callback.as_ref().unchecked_ref());
        if logged("addEventListener", added).is_some() {
            self.listeners.insert(id, Binding { target, kind: listener.kind, callback });
        }
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some(binding) = self.listeners.remove(&id) else {
            return;
        };
        logged(
            "removeEventListener",
            binding
                .target
                .remove_event_listener_with_callback(binding.kind.as_str(), binding.callback.as_ref().unchecked_ref()),
        );
        self.spent.events.push(binding.callback);
    }

    fn deliver(&mut self, id: ListenerId, event: &Event) {
        let Some(kind) = self.listeners.get(&id).map(|binding| binding.kind) else {
            return;
        };
        let Some(page_event) = self.runtime.page().translate(kind, event) else {
            return;
        };
        if self.runtime.deliver(id, &page_event) {
            event.prevent_default();
        }
    }

    // --- Observers ---

    fn create_observer(&mut self, id: ObserverId, options: ObserverOptions) {
        let callback = Closure::wrap(Box::new(move |entries: Array| {
            with_host(|host| host.intersect(id, &entries));
        }) as Box<dyn FnMut(Array)>);
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());
        let created = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init);
        if let Some(observer) = logged("IntersectionObserver", created) {
            self.observers.insert(id, Watch { observer, callback });
        }
    }

    fn intersect(&mut self, id: ObserverId, entries: &Array) {
        for value in entries.iter() {
            let entry = match value.dyn_into::<IntersectionObserverEntry>() {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            let target = self.runtime.page().intern(entry.target());
            let entry = IntersectionEntry {
                target,
                is_intersecting: entry.is_intersecting(),
                ratio: entry.intersection_ratio(),
            };
            self.runtime.intersect(id, &entry);
        }
    }

    // --- Timers ---

    fn schedule(&mut self, id: TimerId, delay_ms: u64, repeat: bool) {
        let ms = u32::try_from(delay_ms).unwrap_or(u32::MAX);
        let pending = if repeat {
            Pending::Every(Interval::new(ms, move || with_host(|host| host.runtime.fire_timer(id))))
        } else {
            Pending::Once(Timeout::new(ms, move || with_host(|host| host.timeout_fired(id))))
        };
        self.timers.insert(id, pending);
    }

    fn timeout_fired(&mut self, id: TimerId) {
        self.retire_timer(id);
        self.runtime.fire_timer(id);
    }

    fn retire_timer(&mut self, id: TimerId) {
        let closure = match self.timers.remove(&id) {
            Some(Pending::Once(timeout)) => timeout.cancel(),
            Some(Pending::Every(interval)) => interval.cancel(),
            None => return,
        };
        self.spent.timers.push(closure);
    }
}
