use super::*;
use crate::behaviors::test_support::{boot, click, key};
use crate::memory::MemoryPage;
use crate::runtime::Runtime;

struct Nav {
    toggle: NodeId,
    panel: NodeId,
    link: NodeId,
    outside: NodeId,
}

fn nav_page() -> (MemoryPage, Nav) {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let header = page.append(body, "nav").id();
    let toggle = page.append(header, "button").class("navbar-toggler").attr("aria-expanded", "false").id();
    let panel = page.append(header, "div").class("navbar-collapse").id();
    let link = page.append(panel, "a").class("nav-link").attr("href", "#about").id();
    let outside = page.append(body, "main").id();
    page.set_inner_width(375.0);
    (page, Nav { toggle, panel, link, outside })
}

fn menu() -> Menu {
    Menu::from_config(&MenuConfig::default()).unwrap()
}

fn opened() -> (Runtime<MemoryPage>, Nav) {
    let (page, nav) = nav_page();
    let (mut rt, _) = boot(page, menu());
    rt.dispatch(click(nav.toggle));
    (rt, nav)
}

fn is_open(rt: &Runtime<MemoryPage>, nav: &Nav) -> bool {
    rt.page().has_class(nav.panel, "show")
}

// =============================================================
// Attach
// =============================================================

#[test]
fn absent_without_toggle() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    page.append(body, "div").class("navbar-collapse");
    let (rt, outcome) = boot(page, menu());
    assert_eq!(outcome, Attach::Absent);
    assert!(rt.listeners().is_empty());
}

#[test]
fn starts_closed() {
    let (page, nav) = nav_page();
    let (rt, outcome) = boot(page, menu());
    assert_eq!(outcome, Attach::Attached);
    assert!(!is_open(&rt, &nav));
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn toggle_click_opens_and_locks_scroll() {
    let (rt, nav) = opened();
    let page = rt.page();
    let body = page.body().unwrap();
    assert!(is_open(&rt, &nav));
    assert_eq!(page.attr(nav.toggle, "aria-expanded").as_deref(), Some("true"));
    assert_eq!(page.style(body, "overflow").as_deref(), Some("hidden"));
    assert_eq!(page.style(nav.panel, "height").as_deref(), Some("calc(100vh - var(--nav-h))"));
}

#[test]
fn second_toggle_click_closes() {
    let (mut rt, nav) = opened();
    rt.dispatch(click(nav.toggle));
    let body = rt.page().body().unwrap();
    assert!(!is_open(&rt, &nav));
    assert_eq!(rt.page().attr(nav.toggle, "aria-expanded").as_deref(), Some("false"));
    assert_eq!(rt.page().style(body, "overflow"), None);
}

#[test]
fn nav_link_click_closes() {
    let (mut rt, nav) = opened();
    rt.dispatch(click(nav.link));
    assert!(!is_open(&rt, &nav));
}

#[test]
fn click_inside_panel_keeps_open() {
    let (mut rt, nav) = opened();
    rt.dispatch(click(nav.panel));
    assert!(is_open(&rt, &nav));
}

#[test]
fn outside_click_closes() {
    let (mut rt, nav) = opened();
    rt.dispatch(click(nav.outside));
    assert!(!is_open(&rt, &nav));
}

#[test]
fn escape_closes_and_focuses_toggle() {
    let (mut rt, nav) = opened();
    rt.dispatch(key("Escape"));
    assert!(!is_open(&rt, &nav));
    assert_eq!(rt.page().focused(), Some(nav.toggle));
}

#[test]
fn escape_while_closed_does_not_steal_focus() {
    let (page, nav) = nav_page();
    let (mut rt, _) = boot(page, menu());
    rt.dispatch(key("Escape"));
    assert_eq!(rt.page().focused(), None);
    assert!(!is_open(&rt, &nav));
}

#[test]
fn other_keys_are_ignored() {
    let (mut rt, nav) = opened();
    rt.dispatch(key("Enter"));
    assert!(is_open(&rt, &nav));
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_to_desktop_closes_after_debounce() {
    let (mut rt, nav) = opened();
    rt.page_mut().set_inner_width(768.0);
    rt.dispatch(PageEvent::Resize);
    rt.advance(149);
    assert!(is_open(&rt, &nav));
    rt.advance(1);
    assert!(!is_open(&rt, &nav));
}

#[test]
fn resize_burst_settles_once() {
    let (mut rt, nav) = opened();
    rt.page_mut().set_inner_width(1200.0);
    for _ in 0..5 {
        rt.dispatch(PageEvent::Resize);
        rt.advance(100);
    }
    assert!(is_open(&rt, &nav));
    rt.advance(50);
    assert!(!is_open(&rt, &nav));
}

#[test]
fn resize_on_mobile_keeps_open() {
    let (mut rt, nav) = opened();
    rt.page_mut().set_inner_width(767.0);
    rt.dispatch(PageEvent::Resize);
    rt.advance(500);
    assert!(is_open(&rt, &nav));
}

#[test]
fn teardown_releases_scroll_lock() {
    let (mut rt, nav) = opened();
    rt.teardown();
    let body = rt.page().body().unwrap();
    assert!(!is_open(&rt, &nav));
    assert_eq!(rt.page().style(body, "overflow"), None);
    assert!(rt.listeners().is_empty());
}
