#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn counter_tween_takes_125_ticks() {
    let tween = Tween::new(0.0, 100.0, 2000, 16, Easing::Linear);
    assert_eq!(tween.total_ticks(), 125);
}

#[test]
fn linear_progress_is_proportional() {
    let mut tween = Tween::new(0.0, 250.0, 2000, 16, Easing::Linear);
    let first = tween.step();
    assert!((first.value - 2.0).abs() < 1e-9);
    assert!(!first.done);
    for _ in 1..62 {
        tween.step();
    }
    assert!((tween.sample().value - 124.0).abs() < 1e-9);
}

#[test]
fn last_tick_lands_exactly_on_target() {
    let mut tween = Tween::new(0.0, 7.0, 2000, 16, Easing::Linear);
    let mut last = tween.sample();
    let mut steps = 0;
    while !last.done {
        last = tween.step();
        steps += 1;
    }
    assert_eq!(steps, 125);
    assert_eq!(last.value, 7.0);
}

#[test]
fn stepping_past_the_end_stays_done() {
    let mut tween = Tween::new(10.0, 20.0, 32, 16, Easing::Linear);
    tween.step();
    tween.step();
    let frame = tween.step();
    assert!(frame.done);
    assert_eq!(frame.value, 20.0);
}

#[test]
fn zero_duration_completes_on_first_step() {
    let mut tween = Tween::new(0.0, 5.0, 0, 16, Easing::Linear);
    assert_eq!(tween.step(), Frame { value: 5.0, done: true });
}

#[test]
fn ease_out_front_loads_progress() {
    assert_eq!(Easing::EaseOutCubic.apply(0.0), 0.0);
    assert_eq!(Easing::EaseOutCubic.apply(1.0), 1.0);
    assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
    assert_eq!(Easing::Linear.apply(1.5), 1.0);
}
