use crate::controller::{CornerMask, StatusStyle};

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + Send + Sync + 'static {
    /// Interpolation between two values.
    /// t = 0.0 returns `from`, t = 1.0 returns `to`.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

/// Eased progress below which a discrete property still renders its `from`
/// value; at or above it the value snaps to `to`. Discrete properties ride
/// the same timelines as continuous ones so they participate in
/// pause/scrub/resume, they just cannot blend.
pub const SNAP_THRESHOLD: f32 = 0.5;

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for StatusStyle {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        if t < SNAP_THRESHOLD {
            *from
        } else {
            *to
        }
    }
}

impl Animatable for CornerMask {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        if t < SNAP_THRESHOLD {
            *from
        } else {
            *to
        }
    }
}
