use super::{AnimationClip, KeyframeCursor, TrackData};
use crate::target::PoseTarget;
use std::sync::Arc;

/// What happens when playback reaches the end of a clip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Stop on the last frame.
    Once,
    /// Restart from the beginning.
    #[default]
    Loop,
    /// Play backward, then forward again.
    PingPong,
}

/// Playback state of one clip.
#[derive(Clone, Debug)]
pub struct ClipAction {
    clip: Arc<AnimationClip>,
    cursors: Vec<KeyframeCursor>,

    /// Local playback time, in seconds.
    pub time: f32,
    /// Playback speed multiplier; negative values play backward.
    pub time_scale: f32,
    /// Loop behavior.
    pub loop_mode: LoopMode,
    /// Paused actions keep their time but still hold their pose.
    pub paused: bool,
    /// Disabled actions are neither advanced nor applied.
    pub enabled: bool,
}

impl ClipAction {
    /// A looping action at time zero.
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let cursors = vec![KeyframeCursor::default(); clip.tracks().len()];
        ClipAction {
            clip,
            cursors,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
        }
    }

    /// The clip played by this action.
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Resumes playback.
    pub fn play(&mut self) -> &mut Self {
        self.enabled = true;
        self.paused = false;
        self
    }

    /// Stops playback and rewinds.
    pub fn stop(&mut self) -> &mut Self {
        self.enabled = false;
        self.time = 0.0;
        self
    }

    /// Sets the loop mode.
    pub fn set_loop_mode(&mut self, mode: LoopMode) -> &mut Self {
        self.loop_mode = mode;
        self
    }

    /// Advances playback time by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }

        let duration = self.clip.duration();
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                self.time = self.time.rem_euclid(duration);
            }
            LoopMode::PingPong => {
                let t = self.time.rem_euclid(duration * 2.0);
                self.time = if t > duration { duration * 2.0 - t } else { t };
            }
        }
    }

    /// Writes the sampled pose into `nodes`, indexed like the clip's tracks.
    ///
    /// Tracks pointing past the end of `nodes` are skipped.
    pub fn apply<N: PoseTarget>(&mut self, nodes: &mut [N]) {
        if !self.enabled {
            return;
        }

        for (track, cursor) in self.clip.tracks().iter().zip(self.cursors.iter_mut()) {
            let Some(node) = nodes.get_mut(track.node) else {
                continue;
            };

            match &track.data {
                TrackData::Translation(t) => node.set_translation(t.sample_with_cursor(self.time, cursor)),
                TrackData::Rotation(t) => node.set_rotation(t.sample_with_cursor(self.time, cursor)),
                TrackData::Scale(t) => node.set_scale(t.sample_with_cursor(self.time, cursor)),
            }
        }
    }
}

/// Plays clips on a set of nodes.
#[derive(Clone, Debug, Default)]
pub struct AnimationMixer {
    actions: Vec<ClipAction>,
}

impl AnimationMixer {
    /// An empty mixer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The action playing `clip`, created on first request.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>) -> &mut ClipAction {
        let existing = self.actions.iter().position(|a| Arc::ptr_eq(a.clip(), &clip));
        let index = match existing {
            Some(i) => i,
            None => {
                self.actions.push(ClipAction::new(clip));
                self.actions.len() - 1
            }
        };
        &mut self.actions[index]
    }

    /// All actions, in creation order.
    pub fn actions(&self) -> &[ClipAction] {
        &self.actions
    }

    /// Advances every action by `dt` seconds, then applies them in creation order.
    pub fn update<N: PoseTarget>(&mut self, dt: f32, nodes: &mut [N]) {
        for action in &mut self.actions {
            action.update(dt);
        }

        for action in &mut self.actions {
            action.apply(nodes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Interpolation, KeyframeTrack, Track};
    use glamx::{Quat, Vec3};

    #[derive(Default)]
    struct Recorder {
        translation: Vec3,
    }

    impl PoseTarget for Recorder {
        fn set_translation(&mut self, translation: Vec3) {
            self.translation = translation;
        }
        fn set_rotation(&mut self, _: Quat) {}
        fn set_scale(&mut self, _: Vec3) {}
    }

    fn slide() -> Arc<AnimationClip> {
        let track = KeyframeTrack::new(vec![0.0, 2.0], vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)], Interpolation::Linear)
            .unwrap();
        Arc::new(AnimationClip::new(
            "slide",
            vec![Track {
                node: 0,
                data: TrackData::Translation(track),
            }],
        ))
    }

    #[test]
    fn loop_wraps_time() {
        let mut action = ClipAction::new(slide());
        action.update(2.5);
        assert!((action.time - 0.5).abs() < 1.0e-5);
    }

    #[test]
    fn once_stops_on_last_frame() {
        let mut action = ClipAction::new(slide());
        action.set_loop_mode(LoopMode::Once);
        action.update(3.0);
        assert_eq!(action.time, 2.0);
        assert!(action.paused);
    }

    #[test]
    fn ping_pong_reflects() {
        let mut action = ClipAction::new(slide());
        action.set_loop_mode(LoopMode::PingPong);
        action.update(2.5);
        assert!((action.time - 1.5).abs() < 1.0e-5);
    }

    #[test]
    fn mixer_drives_nodes() {
        let clip = slide();
        let mut mixer = AnimationMixer::new();
        mixer.clip_action(clip.clone()).play();
        assert_eq!(mixer.clip_action(clip).time, 0.0);
        assert_eq!(mixer.actions().len(), 1);

        let mut nodes = [Recorder::default()];
        mixer.update(1.0, &mut nodes);
        assert!((nodes[0].translation.x - 1.0).abs() < 1.0e-5);

        let mut none: [Recorder; 0] = [];
        mixer.update(0.5, &mut none);
    }
}
