// extensions/easing.rs
//
// Easing curves and interpolation helpers for behaviours.
// No dependencies on GameObject/Scene, just math.

use std::f32::consts::PI;
use std::ops::{Add, Mul};

/// Easing curve applied to a normalized journey fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Piecewise quadratic slow start and end.
    QuadInOut,
    /// Sine wave slow start and end.
    SineInOut,
    /// Rational quadratic slow start and end, `t² / (t² + (1 - t)²)`.
    /// The only curve evaluated without clamping its input.
    #[default]
    SlowInOut,
}

impl Easing {
    /// Apply the curve to `t`.
    ///
    /// Every curve except [`Easing::SlowInOut`] clamps `t` to [0, 1] first.
    /// `SlowInOut` accepts any fraction; its denominator never drops below 0.5,
    /// so the result is finite for every finite `t`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = match self {
            Easing::SlowInOut => t,
            _ => t.clamp(0.0, 1.0),
        };
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::SlowInOut => slow_in_out(t),
        }
    }
}

#[inline]
fn slow_in_out(t: f32) -> f32 {
    let sqt = t * t;
    sqt / (2.0 * (sqt - t) + 1.0)
}

// ── Interpolation helpers ──────────────────────────────────────────────────

/// Linearly interpolate between two values, `(1 - t) * p0 + t * p1`.
///
/// Exact at both ends: `lerp(p0, p1, 0.0) == p0` and `lerp(p0, p1, 1.0) == p1`.
#[inline]
pub fn lerp<T>(p0: T, p1: T, t: f32) -> T
where
    T: Add<Output = T> + Mul<f32, Output = T>,
{
    p0 * (1.0 - t) + p1 * t
}

/// Interpolate with easing.
#[inline]
pub fn ease<T>(p0: T, p1: T, t: f32, easing: Easing) -> T
where
    T: Add<Output = T> + Mul<f32, Output = T>,
{
    lerp(p0, p1, easing.apply(t))
}
