//! Virtual timer queue.
//!
//! Every deferred action (debounce settle, throttle cooldown, ripple cleanup,
//! counter ticks, the simulated redirect) is a timer here, identified by a
//! [`TimerId`] and owned by the behavior slot that scheduled it.
//!
//! Without a host the queue is driven by [`Timers::pop_due`], which is how
//! tests move time forward. A browser host creates the queue with
//! [`Timers::mirrored`], drains [`TimerRequest`]s after each runtime call,
//! backs them with real timeouts, and reports each expiry through
//! [`Timers::fired`].

#[cfg(test)]
#[path = "timers_test.rs"]
mod timers_test;

use std::collections::BTreeMap;

/// Identifier of a scheduled timer. Never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// A change the browser host must mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRequest {
    Schedule { id: TimerId, delay_ms: u64, repeat: bool },
    Cancel(TimerId),
}

/// Requests recorded for a browser host. A disabled outbox drops them.
#[derive(Debug)]
pub struct Outbox<R>(Option<Vec<R>>);

impl<R> Default for Outbox<R> {
    fn default() -> Self {
        Self(None)
    }
}

impl<R> Outbox<R> {
    #[must_use]
    pub fn enabled() -> Self {
        Self(Some(Vec::new()))
    }

    pub fn push(&mut self, request: R) {
        if let Some(queue) = &mut self.0 {
            queue.push(request);
        }
    }

    /// Everything pushed since the last drain.
    pub fn drain(&mut self) -> Vec<R> {
        self.0.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

/// Scheduling on behalf of one owner. Implemented by [`crate::behavior::Ctx`].
pub trait Schedule {
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId;
    fn set_interval(&mut self, period_ms: u64) -> TimerId;
    fn cancel(&mut self, id: TimerId) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    owner: usize,
    due_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Timers {
    now_ms: u64,
    next_id: u64,
    entries: BTreeMap<TimerId, Entry>,
    outbox: Outbox<TimerRequest>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue whose schedule/cancel operations are recorded for a host.
    #[must_use]
    pub fn mirrored() -> Self {
        Self { outbox: Outbox::enabled(), ..Self::default() }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Run once for `owner` after `delay_ms`.
    pub fn set_timeout(&mut self, owner: usize, delay_ms: u64) -> TimerId {
        self.insert(owner, delay_ms, None)
    }

    /// Run for `owner` every `period_ms` until cancelled.
    pub fn set_interval(&mut self, owner: usize, period_ms: u64) -> TimerId {
        self.insert(owner, period_ms, Some(period_ms.max(1)))
    }

    fn insert(&mut self, owner: usize, delay_ms: u64, period_ms: Option<u64>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.insert(id, Entry { owner, due_ms: self.now_ms + delay_ms, period_ms });
        self.outbox.push(TimerRequest::Schedule { id, delay_ms, repeat: period_ms.is_some() });
        id
    }

    /// Cancel a pending timer. Returns whether it was pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.entries.remove(&id).is_some();
        if removed {
            self.outbox.push(TimerRequest::Cancel(id));
        }
        removed
    }

    /// Cancel every timer scheduled by `owner`.
    pub fn cancel_owner(&mut self, owner: usize) {
        let ids: Vec<TimerId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            self.cancel(id);
        }
    }

    /// Take the next timer due at or before `until_ms`, moving the clock to
    /// its due time. Repeating timers are re-armed for their next period.
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, usize)> {
        let (id, entry) = self
            .entries
            .iter()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(id, e)| (e.due_ms, **id))
            .map(|(id, e)| (*id, *e))?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        self.consume(id, entry);
        Some((id, entry.owner))
    }

    /// Record that the host's real timer for `id` expired. Returns the owner,
    /// or `None` if the timer was cancelled in the meantime.
    pub fn fired(&mut self, id: TimerId) -> Option<usize> {
        let entry = *self.entries.get(&id)?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        self.consume(id, entry);
        Some(entry.owner)
    }

    fn consume(&mut self, id: TimerId, entry: Entry) {
        match entry.period_ms {
            Some(period) => {
                if let Some(e) = self.entries.get_mut(&id) {
                    e.due_ms = entry.due_ms + period;
                }
            }
            None => {
                self.entries.remove(&id);
            }
        }
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Requests recorded since the last drain. Always empty unless mirrored.
    pub fn drain_requests(&mut self) -> Vec<TimerRequest> {
        self.outbox.drain()
    }
}
