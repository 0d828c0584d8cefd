//! Fixed-tick interpolation.
//!
//! A [`Tween`] maps a tick count onto a value between `from` and `to` over a
//! duration, through an [`Easing`]. Progress is derived from ticks rather
//! than wall-clock time, so a run always takes the same number of steps and
//! the last step lands exactly on `to`.

#[cfg(test)]
#[path = "tween_test.rs"]
mod tween_test;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseOutCubic,
}

impl Easing {
    /// Map linear progress `t` in `0.0..=1.0` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// One sampled step of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub value: f64,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: u64,
    pub tick_ms: u64,
    pub easing: Easing,
    ticks: u64,
}

impl Tween {
    #[must_use]
    pub fn new(from: f64, to: f64, duration_ms: u64, tick_ms: u64, easing: Easing) -> Self {
        Self { from, to, duration_ms, tick_ms: tick_ms.max(1), easing, ticks: 0 }
    }

    /// Number of ticks a full run takes.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.duration_ms.div_ceil(self.tick_ms).max(1)
    }

    /// Advance one tick and sample.
    pub fn step(&mut self) -> Frame {
        self.ticks = (self.ticks + 1).min(self.total_ticks());
        self.sample()
    }

    /// Sample at the current tick without advancing.
    #[must_use]
    pub fn sample(&self) -> Frame {
        let total = self.total_ticks();
        if self.ticks >= total {
            return Frame { value: self.to, done: true };
        }
        #[allow(clippy::cast_precision_loss)]
        let t = self.ticks as f64 / total as f64;
        let value = self.from + (self.to - self.from) * self.easing.apply(t);
        Frame { value, done: false }
    }
}
