use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use popkit_core::geometry::Vector;
use popkit_core::gesture::PanEvent;
use popkit_overlay::{LifecycleState, OverlayController, OverlayStyle, Transition};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Present,
    Dismiss,
    Tick(u64),
    PanBegan,
    PanChanged(f64, f64),
    PanEnded(f64, f64),
    PanCancelled,
    Keyboard(f64),
    Timer(u64),
    TapBackdrop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Present),
        Just(Op::Dismiss),
        (0u64..600).prop_map(Op::Tick),
        Just(Op::PanBegan),
        (-800.0..800.0f64, -3000.0..3000.0f64).prop_map(|(t, v)| Op::PanChanged(t, v)),
        (-800.0..800.0f64, -3000.0..3000.0f64).prop_map(|(t, v)| Op::PanEnded(t, v)),
        Just(Op::PanCancelled),
        (0.0..400.0f64).prop_map(Op::Keyboard),
        (0u64..1500).prop_map(Op::Timer),
        Just(Op::TapBackdrop),
    ]
}

fn style() -> impl Strategy<Value = OverlayStyle> {
    prop_oneof![
        Just(OverlayStyle::Alert),
        Just(OverlayStyle::HalfModal),
        Just(OverlayStyle::Popover),
        Just(OverlayStyle::Notification),
    ]
}

proptest! {
    #[test]
    fn overlay_invariants_hold(style in style(), ops in prop::collection::vec(op(), 1..60)) {
        let mut c = OverlayController::new();
        c.set_style(style);
        c.add_text("content");

        let present_runs = Rc::new(Cell::new(0u32));
        let dismiss_runs = Rc::new(Cell::new(0u32));
        let mut presents_started = 0u32;
        let mut dismisses_started = 0u32;

        for op in ops {
            match op {
                Op::Present => {
                    let r = Rc::clone(&present_runs);
                    if c.present(Some(Box::new(move || r.set(r.get() + 1)))) == Transition::Started {
                        presents_started += 1;
                    }
                }
                Op::Dismiss => {
                    let r = Rc::clone(&dismiss_runs);
                    if c.dismiss(Some(Box::new(move || r.set(r.get() + 1)))) == Transition::Started {
                        dismisses_started += 1;
                    }
                }
                Op::Tick(ms) => {
                    c.tick(Duration::from_millis(ms));
                }
                Op::PanBegan => c.pan(PanEvent::began()),
                Op::PanChanged(t, v) => c.pan(PanEvent::changed(Vector::vertical(t), Vector::vertical(v))),
                Op::PanEnded(t, v) => c.pan(PanEvent::ended(Vector::vertical(t), Vector::vertical(v))),
                Op::PanCancelled => c.pan(PanEvent::cancelled(Vector::ZERO)),
                Op::Keyboard(h) => c.set_keyboard_height(h),
                Op::Timer(ms) => c.set_timer(Some(Duration::from_millis(ms)), None),
                Op::TapBackdrop => {
                    c.tap_backdrop();
                }
            }

            prop_assert_eq!(c.drag_session().is_some(), c.state() == LifecycleState::Dragging);
            prop_assert!(c.drag_session().is_none() || style.is_draggable());
            let p = c.placement();
            prop_assert!((0.0..=1.0).contains(&p.alpha));
            prop_assert!((0.0..=1.0).contains(&p.backdrop_alpha));
            prop_assert!(p.frame.width >= 0.0 && p.frame.height >= 0.0);
            prop_assert!((0.0..=1.0).contains(&c.timer_progress()));
            prop_assert_eq!(c.style(), style);
        }

        prop_assert!(present_runs.get() <= presents_started);
        prop_assert!(dismiss_runs.get() <= dismisses_started);
    }

    #[test]
    fn settled_overlay_reaches_onscreen_alpha(style in style(), settle in 400u64..2000) {
        let mut c = OverlayController::new();
        c.set_style(style);
        c.present(None);
        c.tick(Duration::from_millis(settle));
        prop_assert_eq!(c.state(), LifecycleState::Presented);
        prop_assert_eq!(c.placement().alpha, 1.0);
    }
}
