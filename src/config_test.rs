#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn empty_object_yields_defaults() {
    let config = PageConfig::from_json("{}").unwrap();
    assert_eq!(config, PageConfig::default());
}

#[test]
fn defaults_match_site_markup() {
    let config = PageConfig::default();
    assert_eq!(config.menu.toggle, ".navbar-toggler");
    assert_eq!(config.menu.breakpoint_px, 768.0);
    assert_eq!(config.menu.resize_debounce_ms, 150);
    assert_eq!(config.forms.redirect_to, "thank_you.html");
    assert_eq!(config.forms.redirect_delay_ms, 1500);
    assert_eq!(config.counters.threshold, 0.5);
    assert_eq!(config.scroll_top.reveal_after_px, 300.0);
}

#[test]
fn default_selectors_all_parse() {
    let c = PageConfig::default();
    for raw in [
        &c.menu.toggle,
        &c.menu.panel,
        &c.menu.links,
        &c.smooth_scroll.links,
        &c.smooth_scroll.header,
        &c.scroll_spy.sections,
        &c.scroll_spy.links,
        &c.forms.forms,
        &c.forms.fields,
        &c.forms.submit,
        &c.entrance.targets,
        &c.buttons.targets,
        &c.cards.targets,
        &c.counters.targets,
        &c.images.targets,
        &c.accordion.controls,
        &c.links.targets,
    ] {
        assert!(selector("test", raw).is_ok(), "default selector `{raw}` should parse");
    }
}

// =============================================================
// Overrides
// =============================================================

#[test]
fn partial_override_keeps_other_defaults() {
    let config = PageConfig::from_json(
        r#"{
            "forms": { "redirectTo": "/merci.html", "messages": { "sending": "Sending..." } },
            "menu": { "breakpointPx": 992 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.forms.redirect_to, "/merci.html");
    assert_eq!(config.forms.messages.sending, "Sending...");
    assert_eq!(config.forms.messages.required, FormMessages::default().required);
    assert_eq!(config.menu.breakpoint_px, 992.0);
    assert_eq!(config.menu.toggle, ".navbar-toggler");
}

// =============================================================
// Errors
// =============================================================

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(PageConfig::from_json("{"), Err(ConfigError::Parse(_))));
    assert!(matches!(
        PageConfig::from_json(r#"{ "menu": { "breakpointPx": "wide" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn threshold_out_of_range_is_rejected() {
    let err = PageConfig::from_json(r#"{ "counters": { "threshold": 1.5 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Threshold { field: "counters.threshold", .. }));
}

#[test]
fn zero_tick_is_rejected() {
    let err = PageConfig::from_json(r#"{ "counters": { "tickMs": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroDuration { field: "counters.tickMs" }));
}

#[test]
fn bad_selector_names_its_field() {
    let err = selector("cards.targets", ".card:hover").unwrap_err();
    assert!(err.to_string().starts_with("selector `cards.targets` is invalid"));
}
