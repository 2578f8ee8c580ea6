use glamx::{Quat, Vec3};

/// Values stored in keyframe tracks.
pub trait Interpolate: Copy {
    /// Linear interpolation (spherical for rotations).
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Cubic Hermite interpolation with glTF tangents scaled by the keyframe span `dt`.
    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32)
        -> Self;
}

#[inline]
fn hermite(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    let s0 = 1.0 - s2;
    let s1 = s3 - t2 + t;
    (s0, s1, s2, s3)
}

impl Interpolate for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite(t);
        s0 * v0 + s1 * out_tangent0 * dt + s2 * v1 + s3 * in_tangent1 * dt
    }
}

impl Interpolate for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite(t);
        v0 * s0 + out_tangent0 * (s1 * dt) + v1 * s2 + in_tangent1 * (s3 * dt)
    }
}

impl Interpolate for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite(t);
        let q = v0 * s0 + out_tangent0 * (s1 * dt) + v1 * s2 + in_tangent1 * (s3 * dt);
        q.normalize()
    }
}

/// How values between two keyframes are computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interpolation {
    /// Linear (spherical for rotations).
    Linear,
    /// Hold the previous keyframe.
    Step,
    /// Cubic Hermite; every keyframe stores `[in_tangent, value, out_tangent]`.
    CubicSpline,
}

/// Remembers the last keyframe interval a track was sampled in.
///
/// Playback mostly moves forward by small steps, so the next sample usually falls in the
/// same or the following interval.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyframeCursor {
    last_index: usize,
}

const MAX_SCAN: usize = 3;

/// Keyframe times and values of one animated property.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeTrack<T> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: Interpolation,
}

impl<T: Interpolate> KeyframeTrack<T> {
    /// Creates a track.
    ///
    /// Returns `None` if there is no keyframe or if the number of values does not match
    /// the number of times (three values per time for cubic splines).
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: Interpolation) -> Option<Self> {
        let per_key = match interpolation {
            Interpolation::CubicSpline => 3,
            _ => 1,
        };

        if times.is_empty() || values.len() != times.len() * per_key {
            return None;
        }

        Some(KeyframeTrack {
            times,
            values,
            interpolation,
        })
    }

    /// Keyframe times, in seconds.
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// The interpolation mode.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Time of the last keyframe.
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples the track at `time`, clamping outside the keyframe range.
    pub fn sample(&self, time: f32) -> T {
        let next = self.times.partition_point(|&t| t <= time);
        self.sample_at(next.saturating_sub(1), time)
    }

    /// Samples the track at `time`, starting the keyframe search from `cursor`.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        let len = self.times.len();
        if len == 1 {
            return self.value_at(0);
        }

        let i = cursor.last_index.min(len - 1);
        let local = if time >= self.times[i] {
            (i..(i + MAX_SCAN).min(len - 1))
                .find(|&k| time < self.times[k + 1])
                .or_else(|| (i + MAX_SCAN >= len - 1 && time >= self.times[len - 1]).then_some(len - 1))
        } else {
            (i.saturating_sub(MAX_SCAN)..i)
                .rev()
                .find(|&k| time >= self.times[k])
        };

        let index = local.unwrap_or_else(|| {
            self.times
                .partition_point(|&t| t <= time)
                .saturating_sub(1)
        });
        cursor.last_index = index;

        self.sample_at(index, time)
    }

    fn value_at(&self, index: usize) -> T {
        match self.interpolation {
            Interpolation::CubicSpline => self.values[index * 3 + 1],
            _ => self.values[index],
        }
    }

    fn sample_at(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index + 1 >= len {
            return self.value_at(len - 1);
        }

        let (t0, t1) = (self.times[index], self.times[index + 1]);
        let span = t1 - t0;
        let t = if span > 1.0e-6 {
            ((time - t0) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        match self.interpolation {
            Interpolation::Step => self.value_at(index),
            Interpolation::Linear => T::interpolate_linear(self.value_at(index), self.value_at(index + 1), t),
            Interpolation::CubicSpline => {
                let a = index * 3;
                let b = (index + 1) * 3;
                T::interpolate_cubic(
                    self.values[a + 1],
                    self.values[a + 2],
                    self.values[b],
                    self.values[b + 1],
                    t,
                    span,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_are_rejected() {
        assert!(KeyframeTrack::new(vec![0.0, 1.0], vec![1.0f32], Interpolation::Linear).is_none());
        assert!(KeyframeTrack::new(vec![0.0], vec![1.0f32], Interpolation::CubicSpline).is_none());
        assert!(KeyframeTrack::<f32>::new(vec![], vec![], Interpolation::Step).is_none());
    }

    #[test]
    fn cursor_and_binary_search_agree() {
        let times: Vec<f32> = (0..20).map(|i| i as f32 * 0.5).collect();
        let values: Vec<f32> = (0..20).map(|i| (i * i) as f32).collect();
        let track = KeyframeTrack::new(times, values, Interpolation::Linear).unwrap();

        let mut cursor = KeyframeCursor::default();
        // Forward, jump back, scrub around.
        for &time in &[0.1, 0.7, 1.3, 2.2, 9.9, 0.2, 4.4, 4.1, 3.0, 12.0, -1.0] {
            let a = track.sample_with_cursor(time, &mut cursor);
            let b = track.sample(time);
            assert!((a - b).abs() < 1.0e-4, "t = {}: {} vs {}", time, a, b);
        }
    }

    #[test]
    fn rotations_slerp() {
        let track = KeyframeTrack::new(
            vec![0.0, 1.0],
            vec![Quat::IDENTITY, Quat::from_rotation_y(std::f32::consts::PI / 2.0)],
            Interpolation::Linear,
        )
        .unwrap();

        let half = track.sample(0.5);
        let expected = Quat::from_rotation_y(std::f32::consts::PI / 4.0);
        assert!(half.angle_between(expected) < 1.0e-4);
    }

    #[test]
    fn cubic_spline_passes_through_keyframes() {
        let track = KeyframeTrack::new(
            vec![0.0, 1.0],
            vec![0.0f32, 2.0, 1.0, 1.0, 5.0, 0.0],
            Interpolation::CubicSpline,
        )
        .unwrap();

        assert!((track.sample(0.0) - 2.0).abs() < 1.0e-6);
        assert!((track.sample(1.0) - 5.0).abs() < 1.0e-6);
    }
}
