//! Interaction behaviors for the marketing site.
//!
//! This crate is compiled to WebAssembly and enhances server-rendered markup:
//! the collapsible navigation menu, smooth in-page scrolling, the scroll spy,
//! form validation with a simulated submission, and the decorative entrance and
//! hover effects. Behaviors never touch the browser directly. They talk to a
//! [`page::Page`] and a [`behavior::Ctx`], so the same code runs against the
//! live DOM (feature `hydrate`) and against [`memory::MemoryPage`] in tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`runtime`] | Owns the page and behaviors, routes events, observers and timers |
//! | [`behavior`] | The `Behavior` trait, `Ctx` capabilities and the registry |
//! | [`behaviors`] | The twelve page behaviors |
//! | [`page`] | Page capability trait and node handles |
//! | [`memory`] | In-memory page used by tests and headless hosts |
//! | [`selector`] | CSS selectors the behaviors query with |
//! | [`slots`] | Id arena that reuses released slots |
//! | [`event`] | Event, key and intersection types |
//! | [`timers`] | Virtual timer queue |
//! | [`rate_limit`] | Debounce and throttle over the timer queue |
//! | [`tween`] | Fixed-tick interpolation used by counters |
//! | [`config`] | Selectors, delays and messages, loaded from JSON |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants |
//! | `web` | Browser host (feature `hydrate`) |

pub mod behavior;
pub mod behaviors;
pub mod config;
pub mod consts;
pub mod error;
pub mod event;
pub mod memory;
pub mod page;
pub mod rate_limit;
pub mod runtime;
pub mod selector;
pub mod slots;
pub mod timers;
pub mod tween;
#[cfg(feature = "hydrate")]
pub mod web;
