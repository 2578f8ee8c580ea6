//! Easing curves.
//!
//! The formulas follow the classic Penner equations as popularized by tween.js,
//! including the elastic family whose output overshoots `[0, 1]`.

use std::f32::consts::PI;

/// An easing curve mapping normalized time to normalized progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// No easing.
    #[default]
    Linear,
    /// Accelerating quadratic.
    QuadraticIn,
    /// Decelerating quadratic.
    QuadraticOut,
    /// Quadratic acceleration then deceleration.
    QuadraticInOut,
    /// Accelerating cubic.
    CubicIn,
    /// Decelerating cubic.
    CubicOut,
    /// Cubic acceleration then deceleration.
    CubicInOut,
    /// Sine acceleration then deceleration.
    SinusoidalInOut,
    /// Spring winding up before the start.
    ElasticIn,
    /// Spring settling after the end.
    ElasticOut,
    /// Spring on both ends.
    ElasticInOut,
}

impl Easing {
    /// Evaluates the curve at `t`, clamped to `[0, 1]` beforehand.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::QuadraticInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t
                } else {
                    let t = t - 1.0;
                    -0.5 * (t * (t - 2.0) - 1.0)
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            Easing::CubicInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t * t
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * t + 2.0)
                }
            }
            Easing::SinusoidalInOut => 0.5 * (1.0 - (PI * t).cos()),
            Easing::ElasticIn => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                -(2.0f32).powf(10.0 * (t - 1.0)) * ((t - 1.1) * 5.0 * PI).sin()
            }
            Easing::ElasticOut => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                (2.0f32).powf(-10.0 * t) * ((t - 0.1) * 5.0 * PI).sin() + 1.0
            }
            Easing::ElasticInOut => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let t = t * 2.0;
                if t < 1.0 {
                    -0.5 * (2.0f32).powf(10.0 * (t - 1.0)) * ((t - 1.1) * 5.0 * PI).sin()
                } else {
                    0.5 * (2.0f32).powf(-10.0 * (t - 1.0)) * ((t - 1.1) * 5.0 * PI).sin() + 1.0
                }
            }
        }
    }
}
