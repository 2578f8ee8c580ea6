use super::Easing;
use crate::palette::Rgb;
use glamx::Vec3;

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    /// Interpolates between `self` (at `t = 0`) and `other` (at `t = 1`).
    ///
    /// `t` may leave `[0, 1]` with overshooting easing curves.
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Rgb {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Rgb::lerp(self, other, t)
    }
}

/// Shortest duration a tween may have, in seconds.
pub const MIN_DURATION: f32 = 1.0e-6;

/// A timed interpolation between two values.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    /// Creates a linear tween lasting `duration` seconds.
    pub fn new(from: T, to: T, duration: f32) -> Self {
        Tween {
            from,
            to,
            duration: duration.max(MIN_DURATION),
            elapsed: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The start value.
    pub fn from(&self) -> T {
        self.from
    }

    /// The end value.
    pub fn to(&self) -> T {
        self.to
    }

    /// The duration, in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// The easing curve.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Normalized elapsed time in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.is_complete() {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Whether the full duration has elapsed.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The interpolated value at the current time.
    pub fn value(&self) -> T {
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }

    /// Rewinds to the start.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advances by `dt` seconds.
    ///
    /// Returns the time left over past completion, if this step completed the tween.
    /// A tween of (at most) [`MIN_DURATION`] completes on its first step, even a zero one.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if self.is_complete() {
            return Some(dt.max(0.0));
        }

        self.elapsed += dt.max(0.0);

        if self.elapsed >= self.duration || self.duration <= MIN_DURATION {
            let leftover = (self.elapsed - self.duration).max(0.0);
            self.elapsed = self.duration;
            Some(leftover)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_and_reports_leftover() {
        let mut tween = Tween::new(0.0f32, 10.0, 1.0);
        assert_eq!(tween.advance(0.25), None);
        assert!((tween.value() - 2.5).abs() < 1.0e-6);

        let leftover = tween.advance(1.0).unwrap();
        assert!((leftover - 0.25).abs() < 1.0e-6);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 10.0);
    }

    #[test]
    fn negative_steps_do_not_rewind() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0);
        tween.advance(0.5);
        tween.advance(-0.4);
        assert!((tween.progress() - 0.5).abs() < 1.0e-6);
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let mut tween = Tween::new(Vec3::ZERO, Vec3::X, 0.0);
        assert!(tween.advance(0.0).is_some());
        assert_eq!(tween.value(), Vec3::X);
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn zero_duration_tween_hands_the_whole_step_over() {
        let mut tween = Tween::new(0.0f32, 1.0, 0.0);
        let leftover = tween.advance(0.5).unwrap();
        assert!((leftover - 0.5).abs() < 1.0e-5);
        assert_eq!(tween.advance(0.25), Some(0.25));
        assert_eq!(tween.value(), 1.0);
    }
}
