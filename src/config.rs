//! Behavior configuration: selectors, timings, thresholds and messages.
//!
//! Every field has a default matching the site's markup, so an empty JSON
//! object (or no config at all) yields the stock behavior. The browser host
//! reads overrides from a `<script type="application/json" id="pagefx-config">`
//! data island.
//!
//! Selectors stay strings here and are parsed when behaviors are built, so a
//! bad selector is reported with the field it came from.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::selector::Selector;
use crate::tween::Easing;

/// Id of the JSON data island the browser host reads.
pub const CONFIG_ELEMENT_ID: &str = "pagefx-config";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub menu: MenuConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub scroll_spy: ScrollSpyConfig,
    pub forms: FormConfig,
    pub entrance: EntranceConfig,
    pub buttons: ButtonConfig,
    pub cards: CardConfig,
    pub counters: CounterConfig,
    pub scroll_top: ScrollTopConfig,
    pub images: ImageConfig,
    pub accordion: AccordionConfig,
    pub links: LinkConfig,
}

impl PageConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the range errors
    /// of [`PageConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check thresholds and durations.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        threshold("entrance.threshold", self.entrance.threshold)?;
        threshold("counters.threshold", self.counters.threshold)?;
        threshold("images.threshold", self.images.threshold)?;
        positive("menu.resizeDebounceMs", self.menu.resize_debounce_ms)?;
        positive("scrollSpy.throttleMs", self.scroll_spy.throttle_ms)?;
        positive("scrollTop.throttleMs", self.scroll_top.throttle_ms)?;
        positive("counters.tickMs", self.counters.tick_ms)?;
        positive("buttons.rippleMs", self.buttons.ripple_ms)?;
        Ok(())
    }
}

fn threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Threshold { field, value })
    }
}

fn positive(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroDuration { field })
    } else {
        Ok(())
    }
}

/// Parse a configured selector, tagging errors with the field name.
///
/// # Errors
///
/// Returns [`ConfigError::Selector`] when the text does not parse.
pub fn selector(field: &'static str, raw: &str) -> Result<Selector, ConfigError> {
    Selector::parse(raw).map_err(|source| ConfigError::Selector { field, source })
}

// =============================================================
// Navigation
// =============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    pub toggle: String,
    pub panel: String,
    pub links: String,
    pub open_class: String,
    pub breakpoint_px: f64,
    pub resize_debounce_ms: u64,
    /// Inline height applied to the open panel.
    pub panel_height: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle: ".navbar-toggler".to_owned(),
            panel: ".navbar-collapse".to_owned(),
            links: ".nav-link".to_owned(),
            open_class: "show".to_owned(),
            breakpoint_px: MENU_BREAKPOINT_PX,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            panel_height: "calc(100vh - var(--nav-h))".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmoothScrollConfig {
    pub links: String,
    pub header: String,
    pub default_header_height_px: f64,
    pub margin_px: f64,
    pub initial_hash_delay_ms: u64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            links: "a[href*=\"#\"]".to_owned(),
            header: "header".to_owned(),
            default_header_height_px: DEFAULT_HEADER_HEIGHT_PX,
            margin_px: SCROLL_MARGIN_PX,
            initial_hash_delay_ms: INITIAL_HASH_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollSpyConfig {
    pub sections: String,
    pub links: String,
    pub active_class: String,
    pub offset_px: f64,
    pub throttle_ms: u64,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            sections: "section[id]".to_owned(),
            links: ".nav-link".to_owned(),
            active_class: "active".to_owned(),
            offset_px: SCROLL_SPY_OFFSET_PX,
            throttle_ms: SCROLL_THROTTLE_MS,
        }
    }
}

// =============================================================
// Forms
// =============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    pub forms: String,
    pub fields: String,
    pub submit: String,
    /// Confirmation page loaded after a successful (simulated) submit.
    pub redirect_to: String,
    pub redirect_delay_ms: u64,
    pub messages: FormMessages,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            forms: "form".to_owned(),
            fields: "input, textarea, select".to_owned(),
            submit: "button[type=\"submit\"]".to_owned(),
            redirect_to: "thank_you.html".to_owned(),
            redirect_delay_ms: SUBMIT_REDIRECT_MS,
            messages: FormMessages::default(),
        }
    }
}

/// User-facing form messages. Defaults are the site's Russian copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormMessages {
    pub required: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub message: String,
    pub sending: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            required: "Это поле обязательно для заполнения".to_owned(),
            email: "Введите корректный email адрес".to_owned(),
            phone: "Введите корректный номер телефона".to_owned(),
            name: "Имя должно содержать от 2 до 50 символов и только буквы".to_owned(),
            message: "Сообщение должно содержать минимум 10 символов".to_owned(),
            sending: "Отправляется...".to_owned(),
        }
    }
}

// =============================================================
// Motion
// =============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntranceConfig {
    pub targets: String,
    pub threshold: f64,
    pub root_margin_bottom_px: f64,
    pub offset_px: f64,
    pub stagger_s: f64,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            targets: ".card, .btn, .c-button, img, h1, h2, h3, p, .hero-section".to_owned(),
            threshold: 0.1,
            root_margin_bottom_px: -50.0,
            offset_px: 30.0,
            stagger_s: ENTRANCE_STAGGER_S,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonConfig {
    pub targets: String,
    pub ripple_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { targets: ".btn, .c-button, a[class*=\"btn\"]".to_owned(), ripple_ms: RIPPLE_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    pub targets: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self { targets: ".card".to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterConfig {
    pub targets: String,
    /// Attribute holding the integer target.
    pub attribute: String,
    pub threshold: f64,
    pub duration_ms: u64,
    pub tick_ms: u64,
    /// `linear` (the site's stepping) or `easeOutCubic`.
    pub easing: Easing,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            targets: "[data-count]".to_owned(),
            attribute: "data-count".to_owned(),
            threshold: 0.5,
            duration_ms: COUNTER_DURATION_MS,
            tick_ms: FRAME_TICK_MS,
            easing: Easing::Linear,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollTopConfig {
    pub reveal_after_px: f64,
    pub throttle_ms: u64,
    pub label: String,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self {
            reveal_after_px: SCROLL_TOP_REVEAL_PX,
            throttle_ms: SCROLL_THROTTLE_MS,
            label: "Scroll to top".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageConfig {
    pub targets: String,
    pub threshold: f64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self { targets: "img".to_owned(), threshold: 0.1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionConfig {
    pub controls: String,
    /// Attribute on the control naming its panel, e.g. `#faq-1`.
    pub target_attribute: String,
    pub collapse_delay_ms: u64,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            controls: ".accordion-button".to_owned(),
            target_attribute: "data-bs-target".to_owned(),
            collapse_delay_ms: ACCORDION_COLLAPSE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkConfig {
    pub targets: String,
    pub shift_px: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { targets: "a:not(.btn):not(.c-button)".to_owned(), shift_px: 4.0 }
    }
}
