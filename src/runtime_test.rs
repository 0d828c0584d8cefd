use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::config::{MenuConfig, PageConfig};
use crate::memory::MemoryPage;
use crate::timers::Schedule;

type Log = Rc<RefCell<Vec<String>>>;

/// Registers what it is told to and records every callback.
struct Recorder {
    log: Log,
    listen: Vec<(Target, EventKind)>,
    observe: Option<(ObserverOptions, NodeId)>,
    timeout_ms: Option<u64>,
    prevent: bool,
    present: bool,
}

impl Recorder {
    fn new(log: &Log) -> Self {
        Self { log: Rc::clone(log), listen: Vec::new(), observe: None, timeout_ms: None, prevent: false, present: true }
    }
}

impl Behavior for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn attach(&mut self, _page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        for (target, kind) in &self.listen {
            ctx.listen(*target, *kind);
        }
        if let Some((options, node)) = self.observe {
            let observer = ctx.create_observer(options);
            ctx.observe(observer, node);
        }
        if let Some(ms) = self.timeout_ms {
            ctx.set_timeout(ms);
        }
        self.log.borrow_mut().push("attach".to_owned());
        Attach::when(self.present)
    }

    fn on_event(&mut self, current: Target, event: &PageEvent, _page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        if self.prevent {
            ctx.prevent_default();
        }
        self.log.borrow_mut().push(format!("{} on {current:?}", event.kind().as_str()));
    }

    fn on_intersect(&mut self, _observer: ObserverId, entry: &IntersectionEntry, _page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        self.log.borrow_mut().push(format!("intersect {}", entry.is_intersecting));
    }

    fn on_timer(&mut self, _id: TimerId, _page: &mut dyn Page, _ctx: &mut Ctx<'_>) {
        self.log.borrow_mut().push("timer".to_owned());
    }

    fn detach(&mut self, _page: &mut dyn Page) {
        self.log.borrow_mut().push("detach".to_owned());
    }
}

fn tree() -> (MemoryPage, NodeId, NodeId) {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let list = page.append(body, "ul").id();
    let item = page.append(list, "li").id();
    (page, list, item)
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn click_bubbles_target_ancestors_document_window() {
    let log = Log::default();
    let (page, list, item) = tree();
    let mut recorder = Recorder::new(&log);
    recorder.listen = vec![
        (Target::Window, EventKind::Click),
        (Target::Document, EventKind::Click),
        (Target::Node(list), EventKind::Click),
        (Target::Node(item), EventKind::Click),
    ];
    let mut rt = Runtime::new(page, vec![Box::new(recorder)]);
    rt.attach_all();
    let outcome = rt.dispatch(PageEvent::Click { target: item, client_x: 0.0, client_y: 0.0 });
    assert_eq!(outcome.delivered, 4);
    assert_eq!(
        entries(&log)[1..],
        [
            format!("click on {:?}", Target::Node(item)),
            format!("click on {:?}", Target::Node(list)),
            "click on Document".to_owned(),
            "click on Window".to_owned(),
        ]
    );
}

#[test]
fn mouseenter_does_not_bubble() {
    let log = Log::default();
    let (page, list, item) = tree();
    let mut recorder = Recorder::new(&log);
    recorder.listen = vec![(Target::Node(list), EventKind::MouseEnter)];
    let mut rt = Runtime::new(page, vec![Box::new(recorder)]);
    rt.attach_all();
    assert_eq!(rt.dispatch(PageEvent::MouseEnter { target: item }).delivered, 0);
    assert_eq!(rt.dispatch(PageEvent::MouseEnter { target: list }).delivered, 1);
}

#[test]
fn keydown_goes_to_document() {
    let log = Log::default();
    let (page, _, _) = tree();
    let mut recorder = Recorder::new(&log);
    recorder.listen = vec![(Target::Document, EventKind::KeyDown), (Target::Window, EventKind::Scroll)];
    let mut rt = Runtime::new(page, vec![Box::new(recorder)]);
    rt.attach_all();
    assert_eq!(rt.dispatch(PageEvent::KeyDown { key: crate::event::Key("a".to_owned()) }).delivered, 1);
    assert_eq!(rt.dispatch(PageEvent::Scroll).delivered, 1);
    assert_eq!(rt.dispatch(PageEvent::Resize).delivered, 0);
}

#[test]
fn prevent_default_is_reported() {
    let log = Log::default();
    let (page, _, item) = tree();
    let mut recorder = Recorder::new(&log);
    recorder.listen = vec![(Target::Node(item), EventKind::Submit)];
    recorder.prevent = true;
    let mut rt = Runtime::new(page, vec![Box::new(recorder)]);
    rt.attach_all();
    assert!(rt.dispatch(PageEvent::Submit { form: item }).default_prevented);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn absent_behavior_is_released() {
    let log = Log::default();
    let (page, _, item) = tree();
    let mut recorder = Recorder::new(&log);
    recorder.listen = vec![(Target::Window, EventKind::Scroll)];
    recorder.observe = Some((ObserverOptions::threshold(0.5), item));
    recorder.timeout_ms = Some(10);
    recorder.present = false;
    let mut rt = Runtime::new(page, vec![Box::new(recorder)]);
    assert_eq!(rt.attach_all(), vec![("recorder", Attach::Absent)]);
    assert!(rt.listeners().is_empty());
    assert!(rt.observers().watching(item).is_empty());
    assert!(rt.timers().is_empty());
    rt.dispatch(PageEvent::Scroll);
    rt.advance(100);
    assert_eq!(entries(&log), vec!["attach".to_owned()]);
}

#[test]
fn attach_all_skips_attached() {
    let log = Log::default();
    let mut rt = Runtime::new(MemoryPage::new(), vec![Box::new(Recorder::new(&log))]);
    rt.attach_all();
    assert!(rt.attach_all().is_empty());
    assert_eq!(entries(&log), vec!["attach".to_owned()]);
}

#[test]
fn teardown_detaches_and_releases() {
    let log = Log::default();
    let (page, _, item) = tree();
    let mut recorder = Recorder::new(&log);
    recorder.listen = vec![(Target::Window, EventKind::Scroll)];
    recorder.observe = Some((ObserverOptions::threshold(0.5), item));
    recorder.timeout_ms = Some(10);
    let mut rt = Runtime::new(page, vec![Box::new(recorder)]);
    rt.attach_all();
    rt.teardown();
    assert!(rt.listeners().is_empty());
    assert!(rt.timers().is_empty());
    rt.report_visibility(item, 1.0);
    assert_eq!(entries(&log), vec!["attach".to_owned(), "detach".to_owned()]);
}

// =============================================================
// Observers and timers
// =============================================================

#[test]
fn visibility_respects_threshold() {
    let log = Log::default();
    let (page, _, item) = tree();
    let mut recorder = Recorder::new(&log);
    recorder.observe = Some((ObserverOptions::threshold(0.5), item));
    let mut rt = Runtime::new(page, vec![Box::new(recorder)]);
    rt.attach_all();
    rt.report_visibility(item, 0.2);
    rt.report_visibility(item, 0.5);
    rt.report_visibility(item, 0.0);
    assert_eq!(entries(&log)[1..], ["intersect false", "intersect true", "intersect false"]);
}

#[test]
fn advance_fires_due_timers() {
    let log = Log::default();
    let mut recorder = Recorder::new(&log);
    recorder.timeout_ms = Some(30);
    let mut rt = Runtime::new(MemoryPage::new(), vec![Box::new(recorder)]);
    rt.attach_all();
    rt.advance(29);
    assert_eq!(entries(&log).len(), 1);
    rt.advance(1);
    assert_eq!(entries(&log)[1], "timer");
    assert_eq!(rt.timers().now_ms(), 30);
}

// =============================================================
// Host mirroring
// =============================================================

#[test]
fn mirrored_runtime_records_requests() {
    let log = Log::default();
    let (page, _, item) = tree();
    let mut recorder = Recorder::new(&log);
    recorder.listen = vec![(Target::Node(item), EventKind::Click)];
    recorder.observe = Some((ObserverOptions::threshold(0.1), item));
    recorder.timeout_ms = Some(50);
    let mut rt = Runtime::mirrored(page, vec![Box::new(recorder)]);
    rt.attach_all();

    let (listeners, observers, timers) = rt.drain_requests();
    let [ListenerRequest::Add(listener)] = listeners[..] else {
        panic!("expected one listener, got {listeners:?}");
    };
    assert_eq!(listener.target, Target::Node(item));
    assert_eq!(observers.len(), 2);
    assert!(matches!(timers[..], [TimerRequest::Schedule { delay_ms: 50, repeat: false, .. }]));

    assert!(!rt.deliver(listener.id, &PageEvent::Click { target: item, client_x: 0.0, client_y: 0.0 }));
    assert_eq!(entries(&log).last(), Some(&format!("click on {:?}", Target::Node(item))));

    rt.teardown();
    let (listeners, observers, _) = rt.drain_requests();
    assert_eq!(listeners, vec![ListenerRequest::Remove(listener.id)]);
    assert!(matches!(observers[..], [ObserverRequest::Disconnect(_)]));
}

#[test]
fn headless_runtime_records_nothing() {
    let log = Log::default();
    let mut recorder = Recorder::new(&log);
    recorder.listen = vec![(Target::Window, EventKind::Scroll)];
    let mut rt = Runtime::new(MemoryPage::new(), vec![Box::new(recorder)]);
    rt.attach_all();
    let (listeners, observers, timers) = rt.drain_requests();
    assert!(listeners.is_empty() && observers.is_empty() && timers.is_empty());
}

#[test]
fn fire_timer_after_cancel_is_ignored() {
    let log = Log::default();
    let mut rt = Runtime::mirrored(MemoryPage::new(), vec![Box::new(Recorder::new(&log))]);
    rt.attach_all();
    let id = rt.timers.set_timeout(0, 5);
    rt.timers.cancel(id);
    rt.fire_timer(id);
    assert_eq!(entries(&log), vec!["attach".to_owned()]);
}

#[test]
fn deliver_unknown_listener_is_ignored() {
    let mut rt = Runtime::new(MemoryPage::new(), Vec::new());
    assert!(!rt.deliver(ListenerId(42), &PageEvent::Scroll));
}

// =============================================================
// Boot
// =============================================================

#[test]
fn boot_on_bare_page_attaches_only_scroll_top() {
    let rt = Runtime::boot(MemoryPage::new(), &PageConfig::default()).unwrap();
    assert_eq!(rt.listeners().len(), 2);
    let body = rt.page().body().unwrap();
    assert_eq!(rt.page().children(body).len(), 1);
}

#[test]
fn boot_rejects_bad_selector() {
    let config = PageConfig {
        menu: MenuConfig { toggle: "button:hover".to_owned(), ..MenuConfig::default() },
        ..PageConfig::default()
    };
    let err = Runtime::boot(MemoryPage::new(), &config).err().unwrap();
    assert!(err.to_string().contains("menu.toggle"));
}
