//! Drives the card transition engine from a plain loop and prints the frame
//! values a renderer would apply each tick. Run with
//! `RUST_LOG=debug cargo run --example card` to see the state machine log.

use std::time::Duration;

use cardo::prelude::*;

const TICK: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();

    let mut controller = TransitionController::new(CardLayout::new(640.0));
    controller.on_transition_complete(|state| println!("  -> settled {state:?}"));
    let mut gestures = GestureAdapter::new();

    println!("tap: expanding the card");
    gestures.handle_event(&mut controller, GestureEvent::Tap);
    run_until_idle(&mut controller);

    println!("drag: pulling the card a third of the way down, then letting go");
    gestures.handle_event(
        &mut controller,
        GestureEvent::Pan {
            phase: PanPhase::Began,
            dx: 0.0,
            dy: 0.0,
        },
    );
    let mut dy = 0.0;
    for _ in 0..12 {
        dy += 16.0;
        gestures.handle_event(
            &mut controller,
            GestureEvent::Pan {
                phase: PanPhase::Changed,
                dx: 0.0,
                dy,
            },
        );
        print_frame(&controller);
    }
    gestures.handle_event(
        &mut controller,
        GestureEvent::Pan {
            phase: PanPhase::Ended,
            dx: 0.0,
            dy,
        },
    );
    // Released before the midpoint: the card snaps back to expanded
    run_until_idle(&mut controller);

    println!("drag: committing the collapse this time");
    gestures.handle_event(
        &mut controller,
        GestureEvent::Pan {
            phase: PanPhase::Began,
            dx: 0.0,
            dy: 0.0,
        },
    );
    gestures.handle_event(
        &mut controller,
        GestureEvent::Pan {
            phase: PanPhase::Changed,
            dx: 0.0,
            dy: 400.0,
        },
    );
    gestures.handle_event(
        &mut controller,
        GestureEvent::Pan {
            phase: PanPhase::Ended,
            dx: 0.0,
            dy: 400.0,
        },
    );
    run_until_idle(&mut controller);
}

fn run_until_idle(controller: &mut TransitionController) {
    while !controller.is_idle() {
        controller.advance(TICK);
        print_frame(controller);
    }
}

fn print_frame(controller: &TransitionController) {
    let frame = controller.frame();
    println!(
        "  top {:7.2}  scale {:.3}  overlay {:.3}  radius {:.2}  corners {:?}  status {:?}",
        frame.card_top,
        frame.content_scale,
        frame.overlay_opacity,
        frame.corner_radius,
        frame.corner_mask,
        frame.status_style
    );
}
