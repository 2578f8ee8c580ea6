use super::{Easing, Lerp, Tween};

/// Tweens chained into a cycle: keyframe `i` animates to keyframe `(i + 1) % n`, and the
/// completion of the last tween starts the first one again.
///
/// There is no terminal state. Time left over when a tween completes is carried into
/// the next one, so a single long step may complete several tweens.
#[derive(Clone, Debug)]
pub struct TweenRing<T> {
    tweens: Vec<Tween<T>>,
    active: usize,
    completions: u64,
}

impl<T: Lerp> TweenRing<T> {
    /// Builds the ring over `keyframes`, every tween lasting `duration` seconds.
    ///
    /// Returns `None` if `keyframes` is empty.
    pub fn new(keyframes: &[T], duration: f32, easing: Easing) -> Option<Self> {
        if keyframes.is_empty() {
            return None;
        }

        let n = keyframes.len();
        let tweens = keyframes
            .iter()
            .enumerate()
            .map(|(i, from)| Tween::new(*from, keyframes[(i + 1) % n], duration).with_easing(easing))
            .collect();

        Some(TweenRing {
            tweens,
            active: 0,
            completions: 0,
        })
    }

    /// Number of tweens in the ring.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Always `false`: a ring has at least one tween.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Index of the running tween.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The running tween.
    pub fn active(&self) -> &Tween<T> {
        &self.tweens[self.active]
    }

    /// Total number of tween completions so far.
    pub fn completions(&self) -> u64 {
        self.completions
    }

    /// The interpolated value of the running tween.
    pub fn value(&self) -> T {
        self.active().value()
    }

    /// Duration of one full lap around the ring.
    pub fn cycle_duration(&self) -> f32 {
        self.tweens.iter().map(Tween::duration).sum()
    }

    /// Advances the ring by `dt` seconds and returns the new value.
    pub fn advance(&mut self, dt: f32) -> T {
        let mut remaining = dt.max(0.0);

        // Skip whole laps: they leave the ring exactly where it was.
        let cycle = self.cycle_duration();
        let head = self.tweens[self.active].duration();
        if remaining >= cycle + head {
            let beyond = remaining - head;
            let laps = (beyond / cycle).floor() as u64;
            remaining = head + beyond.rem_euclid(cycle);
            self.completions = self
                .completions
                .saturating_add(laps.saturating_mul(self.tweens.len() as u64));
        }

        while let Some(leftover) = self.tweens[self.active].advance(remaining) {
            self.completions += 1;
            self.active = (self.active + 1) % self.tweens.len();
            self.tweens[self.active].reset();
            remaining = leftover;

            if remaining <= 0.0 {
                break;
            }
        }

        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_keyframes_have_no_ring() {
        assert!(TweenRing::<f32>::new(&[], 1.0, Easing::Linear).is_none());
    }

    #[test]
    fn last_tween_wraps_to_first_keyframe() {
        let ring = TweenRing::new(&[0.0f32, 1.0, 2.0], 1.0, Easing::Linear).unwrap();
        assert_eq!(ring.tweens[2].from(), 2.0);
        assert_eq!(ring.tweens[2].to(), 0.0);
    }

    #[test]
    fn huge_steps_skip_whole_laps() {
        let mut ring = TweenRing::new(&[0.0f32, 10.0], 1.0, Easing::Linear).unwrap();
        let value = ring.advance(1000.5);
        assert_eq!(ring.completions(), 1000);
        assert_eq!(ring.active_index(), 0);
        assert!((value - 5.0).abs() < 1.0e-2);
    }

    #[test]
    fn astronomically_long_steps_stay_on_the_ring() {
        let mut ring = TweenRing::new(&[0.0f32, 10.0, 20.0], 1.0, Easing::Linear).unwrap();
        let value = ring.advance(1.0e30);
        assert!(ring.active_index() < 3);
        assert!(ring.completions() > 0);
        assert!((0.0..=20.0).contains(&value));

        ring.advance(f32::MAX);
        assert!(ring.active_index() < 3);
    }

    #[test]
    fn zero_duration_ring_terminates() {
        let mut ring = TweenRing::new(&[0.0f32, 1.0], 0.0, Easing::Linear).unwrap();
        ring.advance(0.016);
        ring.advance(0.016);
        assert!(ring.completions() > 0);
    }
}
