#![allow(clippy::float_cmp)]

use super::*;

fn sel(s: &str) -> Selector {
    Selector::parse(s).unwrap()
}

// =============================================================
// Tree
// =============================================================

#[test]
fn new_page_has_head_and_body() {
    let page = MemoryPage::new();
    let head = page.head().unwrap();
    let body = page.body().unwrap();
    assert_eq!(page.children(page.root()), vec![head, body]);
    assert_eq!(page.tag(body), "body");
}

#[test]
fn query_all_is_document_order() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let nav = page.append(body, "nav").id();
    let a = page.append(nav, "a").class("nav-link").id();
    let main = page.append(body, "main").id();
    let b = page.append(main, "a").class("nav-link").id();
    let c = page.append(nav, "a").class("nav-link").id();
    assert_eq!(page.query_all(&sel(".nav-link")), vec![a, c, b]);
    assert_eq!(page.query(&sel("a")), Some(a));
}

#[test]
fn query_within_excludes_root_and_outside_nodes() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let form = page.append(body, "form").id();
    let input = page.append(form, "input").id();
    page.append(body, "input");
    assert_eq!(page.query_within(form, &sel("input, form")), vec![input]);
}

#[test]
fn detached_nodes_are_not_queried() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let span = page.create_element("span");
    assert!(page.query(&sel("span")).is_none());
    page.append_child(body, span);
    assert_eq!(page.query(&sel("span")), Some(span));
    page.remove(span);
    assert!(!page.is_attached(span));
    assert!(page.query(&sel("span")).is_none());
}

#[test]
fn insert_after_places_next_sibling() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let group = page.append(body, "div").id();
    let first = page.append(group, "input").id();
    let last = page.append(group, "button").id();
    let msg = page.create_element("div");
    page.insert_after(first, msg);
    assert_eq!(page.children(group), vec![first, msg, last]);
    assert_eq!(page.parent(msg), Some(group));
}

#[test]
fn append_child_refuses_cycles() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let outer = page.append(body, "div").id();
    let inner = page.append(outer, "div").id();
    page.append_child(inner, outer);
    assert_eq!(page.parent(outer), Some(body));
}

#[test]
fn contains_walks_ancestors() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let button = page.append(body, "button").id();
    let icon = page.append(button, "span").id();
    assert!(page.contains(button, icon));
    assert!(page.contains(button, button));
    assert!(!page.contains(icon, button));
}

#[test]
fn element_by_id_finds_attached_element() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let about = page.append(body, "section").attr("id", "about").id();
    assert_eq!(page.element_by_id("about"), Some(about));
    assert_eq!(page.element_by_id("missing"), None);
}

#[test]
fn foreign_ids_are_ignored() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let stray = NodeId(999);
    page.set_text(stray, "x");
    page.append_text(stray, "y");
    page.set_layout(stray, Layout::default());
    page.set_value(stray, "v");
    page.append_child(body, stray);
    page.append_child(stray, body);
    page.insert_after(body, stray);
    page.insert_after(stray, body);
    page.remove(stray);
    assert_eq!(page.text(stray), "");
    assert!(page.children(stray).is_empty());
    assert!(page.query_within(stray, &sel("*")).is_empty());
    assert_eq!(page.children(page.root()).len(), 2);
    assert!(page.children(body).is_empty());
    assert!(page.is_attached(body));
}

// =============================================================
// Element state
// =============================================================

#[test]
fn class_list_add_remove_is_idempotent() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let el = page.append(body, "div").class("card").id();
    page.add_class(el, "show");
    page.add_class(el, "show");
    assert_eq!(page.attr(el, "class").as_deref(), Some("card show"));
    page.remove_class(el, "card");
    assert_eq!(page.attr(el, "class").as_deref(), Some("show"));
    assert!(!page.has_class(el, "card"));
}

#[test]
fn empty_style_value_removes_property() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let el = page.append(body, "div").id();
    page.set_style(el, "opacity", "0");
    assert_eq!(page.style(el, "opacity").as_deref(), Some("0"));
    page.set_style(el, "opacity", "");
    assert_eq!(page.style(el, "opacity"), None);
}

#[test]
fn text_concatenates_descendants_and_set_text_replaces() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let button = page.append(body, "button").text("Send").id();
    let spinner = page.create_element("span");
    page.set_text(button, "");
    page.append_child(button, spinner);
    page.append_text(button, "Sending...");
    assert_eq!(page.text(button), "Sending...");
    assert!(page.is_attached(spinner));
    page.set_text(button, "Send");
    assert_eq!(page.text(button), "Send");
    assert!(!page.is_attached(spinner));
}

#[test]
fn input_type_follows_dom_defaults() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let plain = page.append(body, "input").id();
    let email = page.append(body, "input").attr("type", "EMAIL").id();
    let area = page.append(body, "textarea").id();
    let div = page.append(body, "div").id();
    assert_eq!(page.input_type(plain), "text");
    assert_eq!(page.input_type(email), "email");
    assert_eq!(page.input_type(area), "textarea");
    assert_eq!(page.input_type(div), "");
}

#[test]
fn disabled_is_an_attribute() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let button = page.append(body, "button").id();
    page.set_disabled(button, true);
    assert!(page.has_attr(button, "disabled"));
    page.set_disabled(button, false);
    assert!(!page.has_attr(button, "disabled"));
}

// =============================================================
// Layout and window
// =============================================================

#[test]
fn metrics_are_relative_to_scroll() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let section = page.append(body, "section").at(900.0, 400.0).id();
    page.set_scroll_y(250.0);
    let m = page.metrics(section);
    assert_eq!(m.offset_top, 900.0);
    assert_eq!(m.offset_height, 400.0);
    assert_eq!(m.rect.top, 650.0);
}

#[test]
fn scroll_to_records_and_moves() {
    let mut page = MemoryPage::new();
    page.scroll_to(-40.0);
    assert_eq!(page.scroll_y(), 0.0);
    assert_eq!(page.scroll_requests(), &[-40.0]);
}

#[test]
fn navigate_is_recorded() {
    let mut page = MemoryPage::new();
    page.navigate("thank_you.html");
    assert_eq!(page.navigations(), &["thank_you.html".to_owned()]);
}
