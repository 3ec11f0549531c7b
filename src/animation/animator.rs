//! The pausable, scrubbable, reversible timeline primitive.
//!
//! A [`PropertyAnimator`] owns one property's timeline between a `from` and a
//! `to` value. While running it is advanced by an external frame clock; while
//! paused its fraction can be set directly (scrubbing). Resuming continues at
//! the original rate toward the *nearest* endpoint: a timeline scrubbed back
//! below the midpoint reverse-completes to its original value instead of
//! forward-completing to the target. That rule is what makes a half-hearted
//! drag snap back.

use std::time::Duration;

use super::animatable::Animatable;
use super::Transition;

/// Which end of the timeline an animator settled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Reverse-completed back to the `from` value
    Start,
    /// Forward-completed to the `to` value
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Paused,
    Running,
    Finished(Endpoint),
}

/// An independently-timed animation over a single property.
#[derive(Debug, Clone)]
pub struct PropertyAnimator<T: Animatable> {
    from: T,
    to: T,
    transition: Transition,
    /// Linear timeline position in [0, 1]; easing is applied on read
    fraction: f32,
    direction: Direction,
    phase: Phase,
}

impl<T: Animatable> PropertyAnimator<T> {
    /// Paused fraction below which `resume` plays in reverse.
    pub const RESUME_THRESHOLD: f32 = 0.5;

    /// Create an animator at fraction 0, paused. Call [`start`](Self::start)
    /// to begin forward playback.
    pub fn new(from: T, to: T, transition: Transition) -> Self {
        Self {
            from,
            to,
            transition,
            fraction: 0.0,
            direction: Direction::Forward,
            phase: Phase::Paused,
        }
    }

    /// Begin forward playback from the current fraction.
    pub fn start(&mut self) {
        if matches!(self.phase, Phase::Paused) {
            self.direction = Direction::Forward;
            self.phase = Phase::Running;
        }
    }

    /// Freeze the timeline and report its current fractional completion.
    pub fn pause(&mut self) -> f32 {
        if matches!(self.phase, Phase::Running) {
            self.phase = Phase::Paused;
        }
        self.fraction
    }

    /// Scrub the paused timeline to an absolute fraction, clamped to [0, 1].
    /// Ignored unless paused; scrubbing never completes the animation.
    pub fn set_fraction(&mut self, fraction: f32) {
        if matches!(self.phase, Phase::Paused) {
            self.fraction = fraction.clamp(0.0, 1.0);
        }
    }

    /// Resume a paused timeline toward the nearest endpoint at the original
    /// rate, with no delay. A fraction below [`RESUME_THRESHOLD`] plays in
    /// reverse and settles at the `from` value.
    ///
    /// [`RESUME_THRESHOLD`]: Self::RESUME_THRESHOLD
    pub fn resume(&mut self) {
        if matches!(self.phase, Phase::Paused) {
            self.direction = if self.fraction < Self::RESUME_THRESHOLD {
                Direction::Reverse
            } else {
                Direction::Forward
            };
            self.phase = Phase::Running;
        }
    }

    /// Advance the timeline by one frame tick. Paused and finished timelines
    /// do not move. Returns the endpoint once the animator has settled.
    pub fn advance(&mut self, dt: Duration) -> Option<Endpoint> {
        if matches!(self.phase, Phase::Running) {
            let step = if self.transition.duration_ms > 0.0 {
                dt.as_secs_f32() * 1000.0 / self.transition.duration_ms
            } else {
                // Degenerate duration completes on the first tick
                1.0
            };
            match self.direction {
                Direction::Forward => {
                    self.fraction += step;
                    if self.fraction >= 1.0 {
                        self.fraction = 1.0;
                        self.phase = Phase::Finished(Endpoint::End);
                    }
                }
                Direction::Reverse => {
                    self.fraction -= step;
                    if self.fraction <= 0.0 {
                        self.fraction = 0.0;
                        self.phase = Phase::Finished(Endpoint::Start);
                    }
                }
            }
        }
        self.finished_at()
    }

    /// Current interpolated value. Endpoints are returned exactly, not via
    /// interpolation, so a completed round trip restores original values
    /// bit-for-bit.
    pub fn value(&self) -> T {
        if self.fraction <= 0.0 {
            return self.from.clone();
        }
        if self.fraction >= 1.0 {
            return self.to.clone();
        }
        T::lerp(
            &self.from,
            &self.to,
            self.transition.timing.evaluate(self.fraction),
        )
    }

    /// Linear timeline position in [0, 1]
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused)
    }

    /// The endpoint this animator settled at, if it has finished.
    pub fn finished_at(&self) -> Option<Endpoint> {
        match self.phase {
            Phase::Finished(endpoint) => Some(endpoint),
            _ => None,
        }
    }

    /// Replace both endpoint values, preserving the current fraction.
    /// Used when the container geometry changes mid-transition.
    pub fn retarget(&mut self, from: T, to: T) {
        self.from = from;
        self.to = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimingFunction;

    fn linear(from: f32, to: f32, duration_ms: f32) -> PropertyAnimator<f32> {
        PropertyAnimator::new(from, to, Transition::new(duration_ms, TimingFunction::Linear))
    }

    #[test]
    fn test_forward_playback_completes_at_end() {
        let mut animator = linear(0.0, 100.0, 100.0);
        animator.start();
        assert_eq!(animator.advance(Duration::from_millis(50)), None);
        assert!((animator.value() - 50.0).abs() < 1e-3);
        assert_eq!(
            animator.advance(Duration::from_millis(60)),
            Some(Endpoint::End)
        );
        assert_eq!(animator.value(), 100.0);
        assert_eq!(animator.fraction(), 1.0);
    }

    #[test]
    fn test_pause_reports_fraction_and_freezes() {
        let mut animator = linear(0.0, 1.0, 100.0);
        animator.start();
        animator.advance(Duration::from_millis(30));
        let paused_at = animator.pause();
        assert!((paused_at - 0.3).abs() < 1e-5);
        animator.advance(Duration::from_millis(30));
        assert_eq!(animator.fraction(), paused_at);
    }

    #[test]
    fn test_scrub_is_absolute_and_clamped() {
        let mut animator = linear(0.0, 1.0, 100.0);
        animator.start();
        animator.pause();
        animator.set_fraction(0.7);
        assert_eq!(animator.fraction(), 0.7);
        animator.set_fraction(1.8);
        assert_eq!(animator.fraction(), 1.0);
        animator.set_fraction(-0.4);
        assert_eq!(animator.fraction(), 0.0);
        // Scrubbing to an endpoint does not finish the animation
        assert_eq!(animator.finished_at(), None);
    }

    #[test]
    fn test_scrub_ignored_while_running() {
        let mut animator = linear(0.0, 1.0, 100.0);
        animator.start();
        animator.advance(Duration::from_millis(20));
        animator.set_fraction(0.9);
        assert!((animator.fraction() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_resume_below_midpoint_reverses_to_start() {
        let mut animator = linear(10.0, 20.0, 100.0);
        animator.start();
        animator.pause();
        animator.set_fraction(0.3);
        animator.resume();
        // 0.3 of a 100ms timeline takes 30ms to rewind
        assert_eq!(animator.advance(Duration::from_millis(20)), None);
        assert_eq!(
            animator.advance(Duration::from_millis(20)),
            Some(Endpoint::Start)
        );
        assert_eq!(animator.value(), 10.0);
    }

    #[test]
    fn test_resume_at_midpoint_completes_forward() {
        let mut animator = linear(0.0, 1.0, 100.0);
        animator.start();
        animator.pause();
        animator.set_fraction(0.5);
        animator.resume();
        assert_eq!(
            animator.advance(Duration::from_millis(60)),
            Some(Endpoint::End)
        );
    }

    #[test]
    fn test_zero_duration_completes_first_tick() {
        let mut animator = linear(0.0, 1.0, 0.0);
        animator.start();
        assert_eq!(animator.advance(Duration::ZERO), Some(Endpoint::End));
        assert_eq!(animator.value(), 1.0);
    }

    #[test]
    fn test_retarget_preserves_fraction() {
        let mut animator = linear(0.0, 100.0, 100.0);
        animator.start();
        animator.advance(Duration::from_millis(50));
        animator.retarget(0.0, 200.0);
        assert!((animator.fraction() - 0.5).abs() < 1e-5);
        assert!((animator.value() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_finished_animator_stays_finished() {
        let mut animator = linear(0.0, 1.0, 50.0);
        animator.start();
        animator.advance(Duration::from_millis(60));
        assert_eq!(animator.finished_at(), Some(Endpoint::End));
        animator.pause();
        animator.set_fraction(0.2);
        animator.resume();
        assert_eq!(animator.finished_at(), Some(Endpoint::End));
        assert_eq!(animator.fraction(), 1.0);
    }
}
