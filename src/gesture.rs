//! Translates raw input events into transition-controller calls.
//!
//! The platform owns gesture recognition; this adapter only consumes the
//! resulting samples. A tap toggles the card. A pan drives the transition
//! interactively: its vertical translation is normalized against the card's
//! travel distance into a completion fraction, with the sign flipped so
//! dragging toward the card's other rest state always advances the in-flight
//! timeline.

use std::time::Duration;

use crate::controller::TransitionController;

/// Lifecycle of a pan gesture. Phases arrive in order: `Began`, then any
/// number of `Changed`, then `Ended` or `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// A recognized input event. Pan translations are cumulative since the
/// gesture began, positive down and to the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Tap,
    Pan { phase: PanPhase, dx: f32, dy: f32 },
}

/// Normalizes gestures into [`TransitionController`] calls.
pub struct GestureAdapter {
    duration: Duration,
}

impl GestureAdapter {
    /// Nominal duration of every card transition
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

    pub fn new() -> Self {
        Self {
            duration: Self::DEFAULT_DURATION,
        }
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn handle_event(&mut self, controller: &mut TransitionController, event: GestureEvent) {
        match event {
            GestureEvent::Tap => self.handle_tap(controller),
            GestureEvent::Pan { phase, dy, .. } => self.handle_pan(controller, phase, dy),
        }
    }

    /// A tap triggers a full transition toward the other rest state.
    pub fn handle_tap(&mut self, controller: &mut TransitionController) {
        controller.animate_transition(controller.next_state(), self.duration);
    }

    /// Feed one pan sample. `translation_y` is the cumulative vertical
    /// translation since the gesture began, positive downward.
    pub fn handle_pan(
        &mut self,
        controller: &mut TransitionController,
        phase: PanPhase,
        translation_y: f32,
    ) {
        match phase {
            PanPhase::Began => {
                controller.begin_interactive_transition(controller.next_state(), self.duration);
            }
            PanPhase::Changed => {
                let normalized = translation_y / controller.layout().travel();
                // An expanded card collapses by dragging down (positive
                // translation); a collapsed card expands by dragging up
                // (negative translation). Either way the in-flight timeline's
                // fraction must grow, hence the flip for the hidden card.
                let fraction = if controller.is_card_visible() {
                    normalized
                } else {
                    -normalized
                };
                controller.update_interactive_transition(fraction);
            }
            // A cancelled pan commits the same way a released one does
            PanPhase::Ended | PanPhase::Cancelled => controller.end_interactive_transition(),
        }
    }
}

impl Default for GestureAdapter {
    fn default() -> Self {
        Self::new()
    }
}
