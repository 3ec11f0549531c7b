/// Closed-form damped motion curve evaluated over normalized time.
///
/// Unlike a real-time spring integrator, the curve is a pure function of
/// normalized progress, so a paused timeline can be scrubbed to an arbitrary
/// fraction and resumed without replaying simulation steps.
///
/// The curve is the step response of a damped harmonic oscillator with a
/// single damping-ratio parameter. A ratio of 1.0 is critically damped:
/// the value approaches the target as fast as possible without overshoot.
/// Ratios above 1.0 are overdamped and settle more slowly. Ratios below 1.0
/// would overshoot and are clamped up to 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DampedCurve {
    /// Damping ratio, `>= 1.0`.
    pub ratio: f32,
}

impl DampedCurve {
    /// Critically damped: no overshoot, fastest settle.
    pub const CRITICAL: Self = Self { ratio: 1.0 };

    /// Overdamped: same shape, softer approach to the target.
    pub const GENTLE: Self = Self { ratio: 1.5 };

    /// Natural angular frequency in normalized-time units, chosen so the
    /// critically damped curve has settled within 0.5% by t = 1.
    const OMEGA: f32 = 8.0;

    pub fn new(ratio: f32) -> Self {
        Self {
            ratio: ratio.max(1.0),
        }
    }

    /// Evaluate the curve at normalized time `t` in [0, 1].
    ///
    /// Returns exactly 0.0 at t = 0 and exactly 1.0 at t = 1; the raw
    /// oscillator response only reaches the target asymptotically, so the
    /// output is normalized by the response at t = 1.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return 0.0;
        }
        if t == 1.0 {
            return 1.0;
        }
        let ratio = self.ratio.max(1.0);
        Self::raw(ratio, t) / Self::raw(ratio, 1.0)
    }

    /// Step response of the damped oscillator, rising from 0 toward 1.
    fn raw(ratio: f32, t: f32) -> f32 {
        let omega = Self::OMEGA;
        if (ratio - 1.0).abs() < 1e-4 {
            // Critically damped: x(t) = 1 - e^(-wt) * (1 + wt)
            let wt = omega * t;
            1.0 - (-wt).exp() * (1.0 + wt)
        } else {
            // Overdamped: two distinct real roots
            let s = (ratio * ratio - 1.0).sqrt();
            let r1 = omega * (-ratio + s);
            let r2 = omega * (-ratio - s);
            1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }
}

impl Default for DampedCurve {
    fn default() -> Self {
        Self::CRITICAL
    }
}
