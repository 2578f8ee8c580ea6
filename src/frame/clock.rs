use web_time::Instant;

/// Turns refresh timestamps into per-frame deltas.
///
/// Timestamps are in milliseconds, as handed out by display refresh callbacks. The first
/// timestamp only primes the clock; every later one yields
/// `(time - last_time) / 1000` seconds, clamped to be non-negative.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameClock {
    last_time: Option<f64>,
    elapsed: f64,
    frames: u64,
}

impl FrameClock {
    /// A clock that has not seen any frame yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `time` and returns the delta since the previous timestamp, in seconds.
    ///
    /// Returns `None` on the very first call.
    pub fn advance(&mut self, time: f64) -> Option<f32> {
        let delta = self
            .last_time
            .map(|last| ((time - last) / 1000.0).max(0.0));

        if let Some(delta) = delta {
            self.elapsed += delta;
        }

        self.last_time = Some(match self.last_time {
            Some(last) => last.max(time),
            None => time,
        });
        self.frames += 1;

        delta.map(|d| d as f32)
    }

    /// Whether at least one timestamp was recorded.
    pub fn is_primed(&self) -> bool {
        self.last_time.is_some()
    }

    /// The last recorded timestamp, in milliseconds.
    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    /// Sum of all deltas so far, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of timestamps recorded.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Monotonic millisecond timestamps measured from its creation.
#[derive(Copy, Clone, Debug)]
pub struct WallClock {
    origin: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    /// Starts measuring now.
    pub fn new() -> Self {
        WallClock {
            origin: Instant::now(),
        }
    }

    /// Milliseconds since creation.
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_no_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(16.0), None);
        assert!(clock.is_primed());
        let delta = clock.advance(32.0).unwrap();
        assert!((delta - 0.016).abs() < 1.0e-6);
    }

    #[test]
    fn backwards_timestamps_clamp_to_zero() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        assert_eq!(clock.advance(50.0), Some(0.0));
        // The clock keeps the latest timestamp, so time does not run twice.
        let delta = clock.advance(110.0).unwrap();
        assert!((delta - 0.01).abs() < 1.0e-6);
    }

    #[test]
    fn wall_clock_is_monotonic() {
        let clock = WallClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
