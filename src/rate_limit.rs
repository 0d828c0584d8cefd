//! Debounce and throttle for high-frequency handlers.
//!
//! Both are plain state over a [`Schedule`]: the wrapper owns its pending
//! [`TimerId`] and nothing else holds it. Calls are serialised by the timer
//! queue, so a wrapped handler never re-enters itself.

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod rate_limit_test;

use crate::timers::{Schedule, TimerId};

/// Runs only after `delay_ms` of quiet, with the arguments of the last call.
#[derive(Debug)]
pub struct Debounce<A> {
    delay_ms: u64,
    pending: Option<(TimerId, A)>,
}

impl<A> Debounce<A> {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms, pending: None }
    }

    /// Record a call: any pending run is cancelled and rescheduled.
    pub fn call(&mut self, args: A, timers: &mut dyn Schedule) {
        if let Some((id, _)) = self.pending.take() {
            timers.cancel(id);
        }
        let id = timers.set_timeout(self.delay_ms);
        self.pending = Some((id, args));
    }

    /// Hand back the arguments to run with if `id` is this debounce's timer.
    pub fn fire(&mut self, id: TimerId) -> Option<A> {
        match &self.pending {
            Some((pending, _)) if *pending == id => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Runs immediately, then ignores calls until `delay_ms` has passed.
#[derive(Debug)]
pub struct Throttle {
    delay_ms: u64,
    cooldown: Option<TimerId>,
}

impl Throttle {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms, cooldown: None }
    }

    /// Whether the wrapped handler should run for this call. A `true` starts
    /// the cooldown.
    pub fn try_acquire(&mut self, timers: &mut dyn Schedule) -> bool {
        if self.cooldown.is_some() {
            return false;
        }
        self.cooldown = Some(timers.set_timeout(self.delay_ms));
        true
    }

    /// Re-arm when `id` is this throttle's cooldown. Returns whether it was.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.cooldown == Some(id) {
            self.cooldown = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn is_cooling(&self) -> bool {
        self.cooldown.is_some()
    }
}
