//! Asset loading that never blocks the frame loop.
//!
//! A load runs on its own thread and hands its result over a one-shot channel. The
//! frame loop holds a [`PendingAsset`] and polls it once per frame. On `wasm32`, where
//! threads are not available, the load runs inline and the asset is ready on the first
//! poll.

pub use self::font::{load_font, FontData};
pub use self::model::{load_gltf, ModelData, ModelNode, ModelPrimitive};

use crate::error::{Error, Result};
use std::task::Poll;

mod font;
mod model;

/// Receiving end of an asset load.
pub struct PendingAsset<T> {
    label: String,
    receiver: Option<oneshot::Receiver<Result<T>>>,
}

/// Sending end of an asset load.
pub struct AssetSender<T> {
    sender: oneshot::Sender<Result<T>>,
}

impl<T> AssetSender<T> {
    /// Delivers the load result. Ignored if the pending side was dropped.
    pub fn send(self, result: Result<T>) {
        let _ = self.sender.send(result);
    }
}

/// Creates a connected sender/pending pair.
pub fn channel<T>(label: impl Into<String>) -> (AssetSender<T>, PendingAsset<T>) {
    let (sender, receiver) = oneshot::channel();
    (
        AssetSender { sender },
        PendingAsset {
            label: label.into(),
            receiver: Some(receiver),
        },
    )
}

impl<T> PendingAsset<T> {
    /// Name of the asset, for logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the result was already handed out by [`PendingAsset::poll`].
    pub fn is_resolved(&self) -> bool {
        self.receiver.is_none()
    }

    /// Checks whether the load finished.
    ///
    /// The result is returned once; later polls stay pending. A load whose sender was
    /// dropped without a result resolves to [`Error::Canceled`].
    pub fn poll(&mut self) -> Poll<Result<T>> {
        let Some(receiver) = &self.receiver else {
            return Poll::Pending;
        };

        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Poll::Ready(result)
            }
            Err(oneshot::TryRecvError::Empty) => Poll::Pending,
            Err(oneshot::TryRecvError::Disconnected) => {
                self.receiver = None;
                Poll::Ready(Err(Error::Canceled(self.label.clone())))
            }
        }
    }
}

/// Runs `load` off the frame loop.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_load<T, F>(label: impl Into<String>, load: F) -> PendingAsset<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (sender, pending) = channel(label);
    let spawned = std::thread::Builder::new()
        .name(format!("load {}", pending.label()))
        .spawn(move || sender.send(load()));

    if let Err(err) = spawned {
        log::warn!("could not start loader thread for `{}`: {}", pending.label(), err);
    }

    pending
}

/// Runs `load` immediately.
#[cfg(target_arch = "wasm32")]
pub fn spawn_load<T, F>(label: impl Into<String>, load: F) -> PendingAsset<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (sender, pending) = channel(label);
    sender.send(load());
    pending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polls_pending_until_sent() {
        let (sender, mut pending) = channel::<u32>("answer");
        assert!(pending.poll().is_pending());
        sender.send(Ok(42));
        assert!(matches!(pending.poll(), Poll::Ready(Ok(42))));
        assert!(pending.is_resolved());
        assert!(pending.poll().is_pending());
    }

    #[test]
    fn dropped_sender_cancels() {
        let (sender, mut pending) = channel::<u32>("lost");
        drop(sender);
        assert!(matches!(pending.poll(), Poll::Ready(Err(Error::Canceled(ref l))) if l == "lost"));
    }

    #[test]
    fn background_load_eventually_resolves() {
        let mut pending = spawn_load("sum", || Ok((1..=10).sum::<u32>()));
        let deadline = web_time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            if let Poll::Ready(result) = pending.poll() {
                assert_eq!(result.unwrap(), 55);
                break;
            }
            assert!(web_time::Instant::now() < deadline);
            std::thread::yield_now();
        }
    }
}
