//! The interactive transition state machine.
//!
//! [`TransitionController`] owns the card's logical state and the group of
//! property animations driving a state change. A transition can be kicked off
//! discretely (tap) or interactively (drag): an interactive transition pauses
//! the whole group so the drag can scrub it like a timeline, and releasing
//! resumes every handle toward its nearest endpoint, which is what lets a
//! drag be abandoned halfway and snap back.
//!
//! The controller is headless. It never touches a presentation medium; the
//! rendering layer calls [`TransitionController::frame`] each frame and
//! applies the interpolated values however it likes.

use std::time::Duration;

use bitflags::bitflags;

use crate::animation::{DampedCurve, Endpoint, PropertyAnimator, Transition};

/// The two rest states of the card panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// Peeking above the bottom edge by the collapsed height
    Collapsed,
    /// Covering the container up to the collapsed height from the top
    Expanded,
}

impl CardState {
    /// The logical negation: the state a trigger moves toward.
    pub fn toggled(self) -> Self {
        match self {
            CardState::Collapsed => CardState::Expanded,
            CardState::Expanded => CardState::Collapsed,
        }
    }
}

/// Status indicator style requested from the host while the card is up.
/// Applied as a discrete switch; it rides an animation timeline only so it
/// participates in pause/scrub/resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusStyle {
    #[default]
    Default,
    LightContent,
}

bitflags! {
    /// Which corners of the card are rounded
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CornerMask: u8 {
        const TOP_LEFT     = 0b0001;
        const TOP_RIGHT    = 0b0010;
        const BOTTOM_LEFT  = 0b0100;
        const BOTTOM_RIGHT = 0b1000;
    }
}

impl CornerMask {
    /// Both top corners, the expanded card's mask
    pub const TOP: Self = Self::TOP_LEFT.union(Self::TOP_RIGHT);
}

/// Container geometry the transition targets are derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    /// Height of the host container
    pub container_height: f32,
    /// Height of the card's always-visible title strip
    pub collapsed_height: f32,
}

impl CardLayout {
    pub const DEFAULT_COLLAPSED_HEIGHT: f32 = 50.0;

    pub fn new(container_height: f32) -> Self {
        Self {
            container_height,
            collapsed_height: Self::DEFAULT_COLLAPSED_HEIGHT,
        }
    }

    pub fn with_collapsed_height(container_height: f32, collapsed_height: f32) -> Self {
        Self {
            container_height,
            collapsed_height,
        }
    }

    /// Offset of the card's top edge from the container's top for a rest state
    pub fn card_top(&self, state: CardState) -> f32 {
        match state {
            CardState::Collapsed => self.container_height - self.collapsed_height,
            CardState::Expanded => self.collapsed_height,
        }
    }

    /// Distance the card's top edge travels between the two rest states.
    /// Also the drag range a gesture is normalized against. Kept strictly
    /// positive so it is safe as a divisor.
    pub fn travel(&self) -> f32 {
        (self.container_height - self.collapsed_height).max(f32::EPSILON)
    }
}

/// Per-frame snapshot of every animatable property, read by the rendering
/// layer and applied to whatever presentation medium it uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    /// Offset of the card's top edge from the container's top
    pub card_top: f32,
    /// Uniform scale applied to the host content behind the card
    pub content_scale: f32,
    /// Opacity of the dim overlay between host content and card, in [0, 1]
    pub overlay_opacity: f32,
    /// Corner radius of the card
    pub corner_radius: f32,
    /// Which corners the radius is applied to
    pub corner_mask: CornerMask,
    /// Status indicator style requested from the host
    pub status_style: StatusStyle,
}

impl CardFrame {
    /// Host content scale while the card is expanded
    pub const EXPANDED_SCALE: f32 = 0.94;
    /// Card corner radius while expanded
    pub const EXPANDED_CORNER_RADIUS: f32 = 5.0;

    /// The values every property rests at in the given state.
    pub fn resting(layout: &CardLayout, state: CardState) -> Self {
        match state {
            CardState::Expanded => Self {
                card_top: layout.card_top(CardState::Expanded),
                content_scale: Self::EXPANDED_SCALE,
                overlay_opacity: 1.0,
                corner_radius: Self::EXPANDED_CORNER_RADIUS,
                corner_mask: CornerMask::TOP,
                status_style: StatusStyle::LightContent,
            },
            CardState::Collapsed => Self {
                card_top: layout.card_top(CardState::Collapsed),
                content_scale: 1.0,
                overlay_opacity: 0.0,
                corner_radius: 0.0,
                corner_mask: CornerMask::empty(),
                status_style: StatusStyle::Default,
            },
        }
    }
}

/// Apply the same operation to every handle in a group. The handles animate
/// different value types, so this has to be a macro rather than a loop.
macro_rules! each_handle {
    ($group:expr, $handle:ident => $body:expr) => {{
        {
            let $handle = &mut $group.position;
            $body;
        }
        {
            let $handle = &mut $group.scale;
            $body;
        }
        {
            let $handle = &mut $group.overlay;
            $body;
        }
        {
            let $handle = &mut $group.corner_radius;
            $body;
        }
        {
            let $handle = &mut $group.corner_mask;
            $body;
        }
        {
            let $handle = &mut $group.status_style;
            $body;
        }
    }};
}

/// The all-or-nothing set of animations driving one state change. A group is
/// a fixed struct of handles, so a partial group cannot be constructed. All
/// handles share duration and timing; the position handle is primary and
/// decides completion for the group.
struct TransitionGroup {
    position: PropertyAnimator<f32>,
    scale: PropertyAnimator<f32>,
    overlay: PropertyAnimator<f32>,
    corner_radius: PropertyAnimator<f32>,
    corner_mask: PropertyAnimator<CornerMask>,
    status_style: PropertyAnimator<StatusStyle>,
    /// State this group animates toward
    target: CardState,
}

impl TransitionGroup {
    /// Number of property animations in every group
    const LEN: usize = 6;

    fn new(layout: &CardLayout, from: CardState, target: CardState, transition: Transition) -> Self {
        let from = CardFrame::resting(layout, from);
        let to = CardFrame::resting(layout, target);
        Self {
            position: PropertyAnimator::new(from.card_top, to.card_top, transition.clone()),
            scale: PropertyAnimator::new(from.content_scale, to.content_scale, transition.clone()),
            overlay: PropertyAnimator::new(
                from.overlay_opacity,
                to.overlay_opacity,
                transition.clone(),
            ),
            corner_radius: PropertyAnimator::new(
                from.corner_radius,
                to.corner_radius,
                transition.clone(),
            ),
            corner_mask: PropertyAnimator::new(from.corner_mask, to.corner_mask, transition.clone()),
            status_style: PropertyAnimator::new(from.status_style, to.status_style, transition),
            target,
        }
    }

    fn start_all(&mut self) {
        each_handle!(self, handle => handle.start());
    }

    /// Pause every handle, returning the recorded fractional completion.
    /// Handles share duration and timing so their fractions agree; the last
    /// recorded value wins if they ever diverge.
    fn pause_all(&mut self) -> f32 {
        let mut progress = 0.0;
        each_handle!(self, handle => progress = handle.pause());
        progress
    }

    fn set_fraction_all(&mut self, fraction: f32) {
        each_handle!(self, handle => handle.set_fraction(fraction));
    }

    fn resume_all(&mut self) {
        each_handle!(self, handle => handle.resume());
    }

    fn advance_all(&mut self, dt: Duration) {
        each_handle!(self, handle => {
            handle.advance(dt);
        });
    }

    fn frame(&self) -> CardFrame {
        CardFrame {
            card_top: self.position.value(),
            content_scale: self.scale.value(),
            overlay_opacity: self.overlay.value(),
            corner_radius: self.corner_radius.value(),
            corner_mask: self.corner_mask.value(),
            status_style: self.status_style.value(),
        }
    }
}

/// Where the controller is in its state machine. The original kept a mutable
/// animator list and branched on emptiness; the tagged state makes the
/// all-or-nothing group invariant structural.
enum TransitionPhase {
    /// No transition in flight
    Idle,
    /// A group is playing toward its target
    Running(TransitionGroup),
    /// A group is paused and being scrubbed by a drag
    Scrubbing {
        group: TransitionGroup,
        /// Fraction recorded when the in-flight group was interrupted;
        /// scrub updates are absolute offsets from this snapshot
        progress_when_interrupted: f32,
    },
}

/// Observer invoked once per group with the state the card settled in.
pub type CompletionCallback = Box<dyn FnMut(CardState)>;

/// Coordinates the card's state, its in-flight animation group, and the
/// interactive-scrub bookkeeping.
pub struct TransitionController {
    layout: CardLayout,
    card_visible: bool,
    phase: TransitionPhase,
    on_complete: Option<CompletionCallback>,
}

impl TransitionController {
    pub fn new(layout: CardLayout) -> Self {
        Self {
            layout,
            card_visible: false,
            phase: TransitionPhase::Idle,
            on_complete: None,
        }
    }

    /// Register an observer invoked once per group when it settles, with the
    /// state the card ended up in.
    pub fn on_transition_complete(&mut self, callback: impl FnMut(CardState) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// True iff the current rest state is [`CardState::Expanded`]. Only flips
    /// when a group completes, never speculatively during scrubbing.
    pub fn is_card_visible(&self) -> bool {
        self.card_visible
    }

    pub fn current_state(&self) -> CardState {
        if self.card_visible {
            CardState::Expanded
        } else {
            CardState::Collapsed
        }
    }

    /// The state a fresh trigger would move toward.
    pub fn next_state(&self) -> CardState {
        self.current_state().toggled()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, TransitionPhase::Idle)
    }

    /// 0 when idle, otherwise the fixed group size.
    pub fn running_animation_count(&self) -> usize {
        match self.phase {
            TransitionPhase::Idle => 0,
            _ => TransitionGroup::LEN,
        }
    }

    /// The in-flight group's timeline position, if any.
    pub fn transition_fraction(&self) -> Option<f32> {
        match &self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::Running(group) | TransitionPhase::Scrubbing { group, .. } => {
                Some(group.position.fraction())
            }
        }
    }

    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    /// Current interpolated values for every animatable property.
    pub fn frame(&self) -> CardFrame {
        match &self.phase {
            TransitionPhase::Idle => CardFrame::resting(&self.layout, self.current_state()),
            TransitionPhase::Running(group) | TransitionPhase::Scrubbing { group, .. } => {
                group.frame()
            }
        }
    }

    /// Start a transition toward `target`. No-op while a group is in flight:
    /// overlapping groups are forbidden and a second trigger is absorbed.
    pub fn animate_transition(&mut self, target: CardState, duration: Duration) {
        if !matches!(self.phase, TransitionPhase::Idle) {
            log::debug!("transition group already in flight, ignoring {target:?} trigger");
            return;
        }
        let transition = Transition::damped(
            duration.as_secs_f32() * 1000.0,
            DampedCurve::CRITICAL,
        );
        let mut group = TransitionGroup::new(&self.layout, self.current_state(), target, transition);
        group.start_all();
        log::debug!(
            "starting card transition {:?} -> {target:?} over {duration:?}",
            self.current_state()
        );
        self.phase = TransitionPhase::Running(group);
    }

    /// Begin driving a transition interactively. If idle, materializes the
    /// group exactly as a tap would, then pauses every handle and records the
    /// interruption snapshot. If a group is already in flight it is paused
    /// and re-scrubbed rather than replaced.
    pub fn begin_interactive_transition(&mut self, target: CardState, duration: Duration) {
        if self.is_idle() {
            self.animate_transition(target, duration);
        }
        match std::mem::replace(&mut self.phase, TransitionPhase::Idle) {
            TransitionPhase::Running(mut group) => {
                let progress_when_interrupted = group.pause_all();
                log::debug!(
                    "interactive transition paused at fraction {progress_when_interrupted:.3}"
                );
                self.phase = TransitionPhase::Scrubbing {
                    group,
                    progress_when_interrupted,
                };
            }
            // Already scrubbing: re-entrant begin keeps the existing snapshot
            other => self.phase = other,
        }
    }

    /// Scrub the paused group. `fraction` is an absolute offset from the
    /// interruption snapshot, so the call is idempotent at any frequency with
    /// no accumulation. No-op unless a scrub is in progress.
    pub fn update_interactive_transition(&mut self, fraction: f32) {
        if let TransitionPhase::Scrubbing {
            group,
            progress_when_interrupted,
        } = &mut self.phase
        {
            let fraction = (fraction + *progress_when_interrupted).clamp(0.0, 1.0);
            log::trace!("scrub to fraction {fraction:.3}");
            group.set_fraction_all(fraction);
        }
    }

    /// Release the scrub: every handle resumes at the original rate toward
    /// its nearest endpoint, so a group below the midpoint reverses back to
    /// the original state. No-op unless a scrub is in progress.
    pub fn end_interactive_transition(&mut self) {
        match std::mem::replace(&mut self.phase, TransitionPhase::Idle) {
            TransitionPhase::Scrubbing { mut group, .. } => {
                group.resume_all();
                log::debug!(
                    "interactive transition released at fraction {:.3}",
                    group.position.fraction()
                );
                self.phase = TransitionPhase::Running(group);
            }
            other => self.phase = other,
        }
    }

    /// Frame tick. Advances a running group; a scrubbed (paused) group stays
    /// put until released. When the primary handle settles the group is
    /// cleared, the card state updated, and the completion observer notified.
    pub fn advance(&mut self, dt: Duration) {
        let (endpoint, target) = {
            let TransitionPhase::Running(group) = &mut self.phase else {
                return;
            };
            group.advance_all(dt);
            match group.position.finished_at() {
                Some(endpoint) => (endpoint, group.target),
                None => return,
            }
        };
        // Reverse-completion settles back in the original state; the card
        // only becomes visible when a group finishes at its target.
        let settled = match endpoint {
            Endpoint::End => target,
            Endpoint::Start => self.current_state(),
        };
        self.card_visible = settled == CardState::Expanded;
        self.phase = TransitionPhase::Idle;
        log::debug!("card transition settled at {endpoint:?}, card is {settled:?}");
        if let Some(callback) = self.on_complete.as_mut() {
            callback(settled);
        }
    }

    /// Re-derive the position endpoints after a container resize, preserving
    /// the current fraction. The original left resize-mid-scrub undefined;
    /// re-deriving keeps the scrub range consistent with the new geometry.
    pub fn set_container_height(&mut self, container_height: f32) {
        self.layout.container_height = container_height;
        let layout = self.layout;
        let current = self.current_state();
        match &mut self.phase {
            TransitionPhase::Running(group) | TransitionPhase::Scrubbing { group, .. } => {
                group
                    .position
                    .retarget(layout.card_top(current), layout.card_top(group.target));
            }
            TransitionPhase::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(300);
    const TICK: Duration = Duration::from_millis(16);

    fn controller() -> TransitionController {
        TransitionController::new(CardLayout::new(500.0))
    }

    fn settle(controller: &mut TransitionController) {
        for _ in 0..100 {
            if controller.is_idle() {
                return;
            }
            controller.advance(TICK);
        }
        panic!("transition did not settle");
    }

    #[test]
    fn test_resting_frames() {
        let layout = CardLayout::new(500.0);
        let collapsed = CardFrame::resting(&layout, CardState::Collapsed);
        assert_eq!(collapsed.card_top, 450.0);
        assert_eq!(collapsed.content_scale, 1.0);
        assert_eq!(collapsed.overlay_opacity, 0.0);
        assert_eq!(collapsed.corner_radius, 0.0);
        assert_eq!(collapsed.corner_mask, CornerMask::empty());
        assert_eq!(collapsed.status_style, StatusStyle::Default);

        let expanded = CardFrame::resting(&layout, CardState::Expanded);
        assert_eq!(expanded.card_top, 50.0);
        assert_eq!(expanded.content_scale, CardFrame::EXPANDED_SCALE);
        assert_eq!(expanded.overlay_opacity, 1.0);
        assert_eq!(expanded.corner_radius, CardFrame::EXPANDED_CORNER_RADIUS);
        assert_eq!(expanded.corner_mask, CornerMask::TOP);
        assert_eq!(expanded.status_style, StatusStyle::LightContent);
    }

    #[test]
    fn test_group_is_all_or_nothing() {
        let mut controller = controller();
        assert_eq!(controller.running_animation_count(), 0);
        controller.animate_transition(CardState::Expanded, DURATION);
        assert_eq!(controller.running_animation_count(), 6);
        controller.begin_interactive_transition(CardState::Expanded, DURATION);
        assert_eq!(controller.running_animation_count(), 6);
        controller.end_interactive_transition();
        assert_eq!(controller.running_animation_count(), 6);
        settle(&mut controller);
        assert_eq!(controller.running_animation_count(), 0);
    }

    #[test]
    fn test_trigger_while_running_is_noop() {
        let mut controller = controller();
        controller.animate_transition(CardState::Expanded, DURATION);
        controller.advance(Duration::from_millis(100));
        let mid_frame = controller.frame();
        let mid_fraction = controller.transition_fraction();

        controller.animate_transition(CardState::Collapsed, DURATION);
        assert_eq!(controller.frame(), mid_frame);
        assert_eq!(controller.transition_fraction(), mid_fraction);

        settle(&mut controller);
        assert!(controller.is_card_visible());
    }

    #[test]
    fn test_round_trip_restores_collapsed_values_exactly() {
        let mut controller = controller();
        let initial = controller.frame();

        controller.animate_transition(CardState::Expanded, DURATION);
        settle(&mut controller);
        assert!(controller.is_card_visible());
        assert_eq!(
            controller.frame(),
            CardFrame::resting(controller.layout(), CardState::Expanded)
        );

        controller.animate_transition(CardState::Collapsed, DURATION);
        settle(&mut controller);
        assert!(!controller.is_card_visible());
        assert_eq!(controller.frame(), initial);
    }

    #[test]
    fn test_scrub_is_absolute_from_snapshot() {
        let mut controller = controller();
        controller.begin_interactive_transition(CardState::Expanded, DURATION);
        // Group was created and immediately paused, so the snapshot is 0
        controller.update_interactive_transition(0.4);
        assert_eq!(controller.transition_fraction(), Some(0.4));
        controller.update_interactive_transition(1.7);
        assert_eq!(controller.transition_fraction(), Some(1.0));
        controller.update_interactive_transition(-2.0);
        assert_eq!(controller.transition_fraction(), Some(0.0));
        // History-independent: not affected by the prior clamped calls
        controller.update_interactive_transition(0.25);
        assert_eq!(controller.transition_fraction(), Some(0.25));
    }

    #[test]
    fn test_scrub_offsets_from_interrupted_progress() {
        let mut controller = controller();
        controller.animate_transition(CardState::Expanded, DURATION);
        controller.advance(Duration::from_millis(150));
        controller.begin_interactive_transition(CardState::Expanded, DURATION);
        let snapshot = controller.transition_fraction().unwrap();
        assert!((snapshot - 0.5).abs() < 1e-5);

        controller.update_interactive_transition(0.2);
        let fraction = controller.transition_fraction().unwrap();
        assert!((fraction - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_release_below_midpoint_reverses() {
        let mut controller = controller();
        controller.begin_interactive_transition(CardState::Expanded, DURATION);
        controller.update_interactive_transition(0.3);
        controller.end_interactive_transition();
        settle(&mut controller);
        assert!(!controller.is_card_visible());
        assert_eq!(
            controller.frame(),
            CardFrame::resting(controller.layout(), CardState::Collapsed)
        );
    }

    #[test]
    fn test_release_above_midpoint_completes() {
        let mut controller = controller();
        controller.begin_interactive_transition(CardState::Expanded, DURATION);
        controller.update_interactive_transition(0.8);
        controller.end_interactive_transition();
        settle(&mut controller);
        assert!(controller.is_card_visible());
    }

    #[test]
    fn test_update_and_end_while_idle_are_noops() {
        let mut controller = controller();
        controller.update_interactive_transition(0.5);
        controller.end_interactive_transition();
        assert!(controller.is_idle());
        assert!(!controller.is_card_visible());
        assert_eq!(
            controller.frame(),
            CardFrame::resting(controller.layout(), CardState::Collapsed)
        );
    }

    #[test]
    fn test_reentrant_begin_keeps_snapshot() {
        let mut controller = controller();
        controller.animate_transition(CardState::Expanded, DURATION);
        controller.advance(Duration::from_millis(150));
        controller.begin_interactive_transition(CardState::Expanded, DURATION);
        let snapshot = controller.transition_fraction().unwrap();

        controller.begin_interactive_transition(CardState::Collapsed, DURATION);
        assert_eq!(controller.transition_fraction(), Some(snapshot));
        controller.update_interactive_transition(0.1);
        let fraction = controller.transition_fraction().unwrap();
        assert!((fraction - (snapshot + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_completion_observer_reports_settled_state() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let settled = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&settled);

        let mut controller = controller();
        controller.on_transition_complete(move |state| sink.borrow_mut().push(state));

        controller.animate_transition(CardState::Expanded, DURATION);
        settle(&mut controller);

        // Abandoned drag reverses; observer reports the original state
        controller.begin_interactive_transition(CardState::Collapsed, DURATION);
        controller.update_interactive_transition(0.2);
        controller.end_interactive_transition();
        settle(&mut controller);

        assert_eq!(
            *settled.borrow(),
            vec![CardState::Expanded, CardState::Expanded]
        );
        assert!(controller.is_card_visible());
    }

    #[test]
    fn test_discrete_properties_snap_during_scrub() {
        let mut controller = controller();
        controller.begin_interactive_transition(CardState::Expanded, DURATION);

        controller.update_interactive_transition(0.05);
        let frame = controller.frame();
        assert_eq!(frame.status_style, StatusStyle::Default);
        assert_eq!(frame.corner_mask, CornerMask::empty());

        controller.update_interactive_transition(0.9);
        let frame = controller.frame();
        assert_eq!(frame.status_style, StatusStyle::LightContent);
        assert_eq!(frame.corner_mask, CornerMask::TOP);
    }

    #[test]
    fn test_resize_rederives_position_endpoints() {
        let mut controller = controller();
        controller.begin_interactive_transition(CardState::Expanded, DURATION);
        controller.update_interactive_transition(1.0);
        assert_eq!(controller.frame().card_top, 50.0);

        controller.set_container_height(800.0);
        // Fully scrubbed to the target, which is unaffected by resize; the
        // origin endpoint moved with the container bottom
        assert_eq!(controller.frame().card_top, 50.0);
        controller.update_interactive_transition(0.0);
        assert_eq!(controller.frame().card_top, 750.0);
    }

    #[test]
    fn test_resize_while_idle_moves_rest_frame() {
        let mut controller = controller();
        controller.set_container_height(640.0);
        assert_eq!(controller.frame().card_top, 590.0);
    }
}
