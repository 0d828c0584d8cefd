//! Shared setup for behavior tests.

use crate::behavior::{Attach, Behavior};
use crate::event::{Key, PageEvent};
use crate::memory::MemoryPage;
use crate::page::NodeId;
use crate::runtime::Runtime;

/// Attach a single behavior to `page` and report the outcome.
pub(crate) fn boot(page: MemoryPage, behavior: impl Behavior + 'static) -> (Runtime<MemoryPage>, Attach) {
    let mut runtime = Runtime::new(page, vec![Box::new(behavior)]);
    let outcome = runtime.attach_all().first().map_or(Attach::Absent, |(_, a)| *a);
    (runtime, outcome)
}

pub(crate) fn click(target: NodeId) -> PageEvent {
    PageEvent::Click { target, client_x: 0.0, client_y: 0.0 }
}

pub(crate) fn key(name: &str) -> PageEvent {
    PageEvent::KeyDown { key: Key(name.to_owned()) }
}
