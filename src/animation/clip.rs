use super::{Interpolate, Interpolation, KeyframeTrack};
use glamx::{Quat, Vec3};

/// Keyframes of one node property.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackData {
    /// Local translation.
    Translation(KeyframeTrack<Vec3>),
    /// Local rotation.
    Rotation(KeyframeTrack<Quat>),
    /// Local scale.
    Scale(KeyframeTrack<Vec3>),
}

impl TrackData {
    /// Time of the last keyframe.
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Translation(t) | TrackData::Scale(t) => t.end_time(),
            TrackData::Rotation(t) => t.end_time(),
        }
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        match self {
            TrackData::Translation(t) | TrackData::Scale(t) => t.times().len(),
            TrackData::Rotation(t) => t.times().len(),
        }
    }

    /// Always `false`: tracks have at least one keyframe.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A track bound to a node of the animated model.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// Index of the animated node, in model order.
    pub node: usize,
    /// The keyframes.
    pub data: TrackData,
}

/// A named set of tracks played together.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    name: String,
    duration: f32,
    tracks: Vec<Track>,
}

impl AnimationClip {
    /// Creates a clip; its duration is the time of the latest keyframe.
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0f32, f32::max);

        AnimationClip {
            name: name.into(),
            duration,
            tracks,
        }
    }

    /// The clip name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length of the clip, in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// The tracks.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Removes keyframes that do not change the animation: a linear or step keyframe
    /// equal to both of its neighbors.
    pub fn optimize(mut self) -> Self {
        for track in &mut self.tracks {
            match &mut track.data {
                TrackData::Translation(t) | TrackData::Scale(t) => drop_redundant(t),
                TrackData::Rotation(t) => drop_redundant(t),
            }
        }
        self
    }
}

fn drop_redundant<T: Interpolate + PartialEq>(track: &mut KeyframeTrack<T>) {
    if track.interpolation() == Interpolation::CubicSpline || track.times().len() < 3 {
        return;
    }

    let times = track.times();
    let values: Vec<T> = times.iter().map(|&t| track.sample(t)).collect();
    let last = times.len() - 1;

    let (kept_times, kept_values): (Vec<f32>, Vec<T>) = times
        .iter()
        .zip(values.iter())
        .enumerate()
        .filter(|(i, (_, v))| *i == 0 || *i == last || **v != values[i - 1] || **v != values[i + 1])
        .map(|(_, (t, v))| (*t, *v))
        .unzip();

    if let Some(optimized) = KeyframeTrack::new(kept_times, kept_values, track.interpolation()) {
        *track = optimized;
    }
}
