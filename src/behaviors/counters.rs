//! Count-up numbers that run once when they scroll into view.

#[cfg(test)]
#[path = "counters_test.rs"]
mod counters_test;

use crate::behavior::{Attach, Behavior, Ctx};
use crate::config::{CounterConfig, selector};
use crate::error::ConfigError;
use crate::event::{IntersectionEntry, ObserverOptions};
use crate::page::{NodeId, Page};
use crate::runtime::ObserverId;
use crate::selector::Selector;
use crate::timers::{Schedule, TimerId};
use crate::tween::{Easing, Tween};

const COUNTED_CLASS: &str = "counted";

/// Leading integer of `raw`, the way `parseInt` reads it: optional
/// whitespace and sign, then digits; anything after is ignored.
#[must_use]
pub fn parse_target(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    match rest[..digits].parse::<i64>() {
        Ok(n) => Some(sign * n),
        Err(_) => None,
    }
}

struct Run {
    timer: TimerId,
    node: NodeId,
    target: i64,
    tween: Tween,
}

pub struct Counters {
    targets_sel: Selector,
    attribute: String,
    options: ObserverOptions,
    duration_ms: u64,
    tick_ms: u64,
    easing: Easing,
    runs: Vec<Run>,
}

impl Counters {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] for an unparseable selector.
    pub fn from_config(config: &CounterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            targets_sel: selector("counters.targets", &config.targets)?,
            attribute: config.attribute.clone(),
            options: ObserverOptions::threshold(config.threshold),
            duration_ms: config.duration_ms,
            tick_ms: config.tick_ms,
            easing: config.easing,
            runs: Vec::new(),
        })
    }

    fn start(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>, node: NodeId) {
        page.add_class(node, COUNTED_CLASS);
        let raw = page.attr(node, &self.attribute).unwrap_or_default();
        let Some(target) = parse_target(&raw) else {
            log::warn!("counters: `{raw}` is not a number, left as is");
            return;
        };
        #[allow(clippy::cast_precision_loss)]
        let tween = Tween::new(0.0, target as f64, self.duration_ms, self.tick_ms, self.easing);
        let timer = ctx.set_interval(self.tick_ms);
        self.runs.push(Run { timer, node, target, tween });
    }
}

impl Behavior for Counters {
    fn name(&self) -> &'static str {
        "counters"
    }

    fn attach(&mut self, page: &mut dyn Page, ctx: &mut Ctx<'_>) -> Attach {
        let nodes = page.query_all(&self.targets_sel);
        if nodes.is_empty() {
            return Attach::Absent;
        }
        let observer = ctx.create_observer(self.options);
        for node in nodes {
            ctx.observe(observer, node);
        }
        Attach::Attached
    }

    fn on_intersect(&mut self, _observer: ObserverId, entry: &IntersectionEntry, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        if entry.is_intersecting && !page.has_class(entry.target, COUNTED_CLASS) {
            self.start(page, ctx, entry.target);
        }
    }

    fn on_timer(&mut self, id: TimerId, page: &mut dyn Page, ctx: &mut Ctx<'_>) {
        let Some(index) = self.runs.iter().position(|r| r.timer == id) else {
            return;
        };
        let run = &mut self.runs[index];
        let frame = run.tween.step();
        if frame.done {
            page.set_text(run.node, &run.target.to_string());
            ctx.cancel(id);
            self.runs.swap_remove(index);
        } else {
            page.set_text(run.node, &frame.value.floor().to_string());
        }
    }
}
