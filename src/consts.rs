//! Shared numeric constants for the page behaviors.

// ── Navigation ─────────────────────────────────────────────────

/// Viewport width (CSS px) at which the collapsed menu is no longer used.
pub const MENU_BREAKPOINT_PX: f64 = 768.0;

/// Quiet window before a resize is acted upon.
pub const RESIZE_DEBOUNCE_MS: u64 = 150;

/// Header height assumed when the page has no `<header>`.
pub const DEFAULT_HEADER_HEIGHT_PX: f64 = 72.0;

/// Gap kept between the header and a scrolled-to section.
pub const SCROLL_MARGIN_PX: f64 = 20.0;

/// Delay before scrolling to the hash present at load, so layout can settle.
pub const INITIAL_HASH_DELAY_MS: u64 = 100;

/// Look-ahead added to `scrollY` when deciding which section is current.
pub const SCROLL_SPY_OFFSET_PX: f64 = 100.0;

/// Throttle window for scroll handlers.
pub const SCROLL_THROTTLE_MS: u64 = 100;

// ── Forms ──────────────────────────────────────────────────────

/// Delay between a valid submit and the redirect to the confirmation page.
pub const SUBMIT_REDIRECT_MS: u64 = 1500;

/// Minimum length of a non-empty multi-line message.
pub const MIN_MESSAGE_CHARS: usize = 10;

// ── Motion ─────────────────────────────────────────────────────

/// Per-element stagger for entrance transitions, in seconds.
pub const ENTRANCE_STAGGER_S: f64 = 0.05;

/// Lifetime of a ripple span; matches the keyframe duration.
pub const RIPPLE_MS: u64 = 600;

/// Total run time of a counter animation.
pub const COUNTER_DURATION_MS: u64 = 2000;

/// Frame tick used by counters.
pub const FRAME_TICK_MS: u64 = 16;

/// `scrollY` above which the scroll-to-top button is shown.
pub const SCROLL_TOP_REVEAL_PX: f64 = 300.0;

/// Delay between pinning an accordion's height and collapsing it.
pub const ACCORDION_COLLAPSE_MS: u64 = 10;
