mod animatable;
mod animator;
mod damped;
mod timing;

pub use animatable::{Animatable, SNAP_THRESHOLD};
pub use animator::{Endpoint, PropertyAnimator};
pub use damped::DampedCurve;
pub use timing::TimingFunction;

/// Configuration for how a property animates toward its target
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
        }
    }

    /// Create a damped transition with the given duration and damping ratio
    pub fn damped(duration_ms: f32, curve: DampedCurve) -> Self {
        Self {
            duration_ms,
            timing: TimingFunction::Damped(curve),
        }
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for Transition {
    /// Default transition is critically damped, matching the card demo timing
    fn default() -> Self {
        Self::damped(300.0, DampedCurve::CRITICAL)
    }
}
