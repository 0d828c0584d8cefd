use super::*;
use crate::behaviors::test_support::boot;
use crate::memory::MemoryPage;

fn hover() -> CardHover {
    CardHover::from_config(&CardConfig::default()).unwrap()
}

#[test]
fn hover_lifts_card_and_leave_clears() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let card = page.append(body, "div").class("card").id();
    let other = page.append(body, "div").class("card").id();
    let (mut rt, outcome) = boot(page, hover());
    assert_eq!(outcome, Attach::Attached);

    rt.dispatch(PageEvent::MouseEnter { target: card });
    assert_eq!(rt.page().style(card, "transform").as_deref(), Some("translateY(-8px) scale(1.02)"));
    assert_eq!(rt.page().style(card, "box-shadow").as_deref(), Some("var(--shadow-xl)"));
    assert_eq!(rt.page().style(other, "transform"), None);

    rt.dispatch(PageEvent::MouseLeave { target: card });
    assert_eq!(rt.page().style(card, "transform"), None);
    assert_eq!(rt.page().style(card, "box-shadow"), None);
}

#[test]
fn entering_a_child_does_not_reach_the_card() {
    let mut page = MemoryPage::new();
    let body = page.body().unwrap();
    let card = page.append(body, "div").class("card").id();
    let title = page.append(card, "h3").id();
    let (mut rt, _) = boot(page, hover());
    let outcome = rt.dispatch(PageEvent::MouseEnter { target: title });
    assert_eq!(outcome.delivered, 0);
    assert_eq!(rt.page().style(card, "transform"), None);
}

#[test]
fn absent_without_cards() {
    let (_, outcome) = boot(MemoryPage::new(), hover());
    assert_eq!(outcome, Attach::Absent);
}
