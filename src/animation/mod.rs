//! Keyframe animation of node transforms.

pub use self::clip::{AnimationClip, Track, TrackData};
pub use self::mixer::{AnimationMixer, ClipAction, LoopMode};
pub use self::track::{Interpolate, Interpolation, KeyframeCursor, KeyframeTrack};

mod clip;
mod mixer;
mod track;
