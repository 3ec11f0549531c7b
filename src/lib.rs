//! Headless interactive card presentation transitions.
//!
//! A card panel slides between a collapsed peek at the bottom of a container
//! and a fully expanded sheet, driven by a tap or scrubbed live by a drag. A
//! drag released partway resumes the transition toward whichever rest state
//! is nearer, so abandoning a gesture snaps the card back.
//!
//! The crate is split in two: [`controller::TransitionController`] owns the
//! state machine and the group of property timelines, and
//! [`gesture::GestureAdapter`] turns raw tap/pan samples into controller
//! calls. Rendering is left entirely to the host: drive
//! [`TransitionController::advance`] from a frame clock and apply the values
//! in [`TransitionController::frame`] to any presentation medium.
//!
//! ```
//! use std::time::Duration;
//! use cardo::prelude::*;
//!
//! let mut controller = TransitionController::new(CardLayout::new(500.0));
//! let mut gestures = GestureAdapter::new();
//!
//! gestures.handle_event(&mut controller, GestureEvent::Tap);
//! while !controller.is_idle() {
//!     controller.advance(Duration::from_millis(16));
//!     let _frame = controller.frame(); // apply to the presentation layer
//! }
//! assert!(controller.is_card_visible());
//! ```
//!
//! [`TransitionController::advance`]: controller::TransitionController::advance
//! [`TransitionController::frame`]: controller::TransitionController::frame

pub mod animation;
pub mod controller;
pub mod gesture;

pub mod prelude {
    pub use crate::animation::{
        Animatable, DampedCurve, Endpoint, PropertyAnimator, TimingFunction, Transition,
    };
    pub use crate::controller::{
        CardFrame, CardLayout, CardState, CornerMask, StatusStyle, TransitionController,
    };
    pub use crate::gesture::{GestureAdapter, GestureEvent, PanPhase};
}
