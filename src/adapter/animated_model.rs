use super::{Adapter, Loadable, ModelMount};
use crate::animation::{AnimationMixer, LoopMode};
use crate::error::Result;
use crate::frame::FrameContext;
use crate::loader::{ModelData, PendingAsset};
use std::task::Poll;

struct MountedModel<N> {
    mixer: AnimationMixer,
    nodes: Vec<N>,
}

/// Drives a model that is still being loaded.
///
/// Stays [`Loadable::NotReady`] until the load resolves. The frame it does, the model is
/// mounted and its first clip starts looping; every later update advances the clip by
/// the frame delta. A failed load is logged once and leaves the adapter not ready.
pub struct AnimatedModelAdapter<M: ModelMount> {
    label: String,
    pending: Option<PendingAsset<ModelData>>,
    mount: M,
    model: Loadable<MountedModel<M::Node>>,
}

impl<M: ModelMount> AnimatedModelAdapter<M> {
    /// Waits for `pending`, then mounts it through `mount`.
    pub fn new(pending: PendingAsset<ModelData>, mount: M) -> Self {
        AnimatedModelAdapter {
            label: pending.label().to_owned(),
            pending: Some(pending),
            mount,
            model: Loadable::NotReady,
        }
    }

    /// The mounted nodes, once ready.
    pub fn nodes(&self) -> Option<&[M::Node]> {
        self.model.as_ref().map(|m| &m.nodes[..])
    }

    /// The animation mixer, once ready.
    pub fn mixer(&self) -> Option<&AnimationMixer> {
        self.model.as_ref().map(|m| &m.mixer)
    }

    /// Whether the load ended without producing a model.
    pub fn has_failed(&self) -> bool {
        self.pending.is_none() && !self.model.is_ready()
    }

    fn on_loaded(&mut self, model: ModelData) -> Result<()> {
        let mut nodes = self.mount.mount(&model)?;
        let mut mixer = AnimationMixer::new();

        match model.clips.first() {
            Some(clip) => {
                log::info!(
                    "`{}` ready: playing `{}` ({:.2}s)",
                    self.label,
                    clip.name(),
                    clip.duration()
                );
                let _ = mixer
                    .clip_action(clip.clone())
                    .set_loop_mode(LoopMode::Loop)
                    .play();
            }
            None => log::info!("`{}` ready: no animation", self.label),
        }

        mixer.update(0.0, &mut nodes);
        self.model = Loadable::Ready(MountedModel { mixer, nodes });
        Ok(())
    }
}

impl<M: ModelMount> Adapter for AnimatedModelAdapter<M> {
    fn label(&self) -> &str {
        &self.label
    }

    fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()> {
        if let Loadable::Ready(model) = &mut self.model {
            model.mixer.update(frame.delta, &mut model.nodes);
            return Ok(());
        }

        let Some(pending) = &mut self.pending else {
            return Ok(());
        };

        match pending.poll() {
            Poll::Pending => Ok(()),
            Poll::Ready(Ok(model)) => {
                self.pending = None;
                self.on_loaded(model)
            }
            Poll::Ready(Err(err)) => {
                self.pending = None;
                log::error!("`{}` failed to load: {}", self.label, err);
                Ok(())
            }
        }
    }
}

