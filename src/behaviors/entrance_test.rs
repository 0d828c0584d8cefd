use super::*;
use crate::behaviors::test_support::boot;
use crate::memory::MemoryPage;

fn entrance() -> Entrance {
    Entrance::from_config(&EntranceConfig::default()).unwrap()
}

fn landing() -> (MemoryPage, Vec<NodeId>) {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let hero = page.append(body, "section").class("hero-section").id();
    let title = page.append(hero, "h1").text("Welcome").id();
    let card = page.append(body, "div").class("card").id();
    let copy = page.append(card, "p").text("Copy").id();
    page.append(body, "span");
    (page, vec![hero, title, card, copy])
}

#[test]
fn targets_start_hidden_with_staggered_transition() {
    let (page, nodes) = landing();
    let (rt, outcome) = boot(page, entrance());
    assert_eq!(outcome, Attach::Attached);
    for node in &nodes {
        assert_eq!(rt.page().style(*node, "opacity").as_deref(), Some("0"));
        assert_eq!(rt.page().style(*node, "transform").as_deref(), Some("translateY(30px)"));
    }
    assert_eq!(
        rt.page().style(nodes[0], "transition").as_deref(),
        Some("opacity 0.8s ease-out 0s, transform 0.8s ease-out 0s")
    );
    assert_eq!(
        rt.page().style(nodes[3], "transition").as_deref(),
        Some("opacity 0.8s ease-out 0.15s, transform 0.8s ease-out 0.15s")
    );
}

#[test]
fn intersecting_reveals() {
    let (page, nodes) = landing();
    let (mut rt, _) = boot(page, entrance());
    rt.report_visibility(nodes[2], 0.05);
    assert_eq!(rt.page().style(nodes[2], "opacity").as_deref(), Some("0"));
    rt.report_visibility(nodes[2], 0.3);
    assert_eq!(rt.page().style(nodes[2], "opacity").as_deref(), Some("1"));
    assert_eq!(rt.page().style(nodes[2], "transform").as_deref(), Some("translateY(0)"));
}

#[test]
fn leaving_and_returning_is_idempotent() {
    let (page, nodes) = landing();
    let (mut rt, _) = boot(page, entrance());
    rt.report_visibility(nodes[0], 1.0);
    rt.report_visibility(nodes[0], 0.0);
    assert_eq!(rt.page().style(nodes[0], "opacity").as_deref(), Some("1"));
    rt.report_visibility(nodes[0], 1.0);
    assert_eq!(rt.page().style(nodes[0], "opacity").as_deref(), Some("1"));
    assert!(rt.observers().is_observing(ObserverId(1), nodes[0]));
}

#[test]
fn observer_uses_shrunk_root_margin() {
    let e = entrance();
    assert_eq!(e.options.root_margin(), "0px 0px -50px 0px");
    assert!((e.options.threshold - 0.1).abs() < 1e-9);
}

#[test]
fn absent_without_targets() {
    let (rt, outcome) = boot(MemoryPage::new(), entrance());
    assert_eq!(outcome, Attach::Absent);
    assert!(rt.observers().watching(NodeId(0)).is_empty());
}
