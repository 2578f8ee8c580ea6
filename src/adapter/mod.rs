//! Object adapters: one renderable entity paired with the state that drives it.

pub use self::animated_model::AnimatedModelAdapter;
pub use self::color_cycle::{ColorCycleAdapter, TRANSITION_SECONDS};
pub use self::mount::{GeometryMount, ModelMount, SceneMount};
pub use self::rigid_body::RigidBodyAdapter;
pub use self::text::TextMeshAdapter;

use crate::error::Result;
use crate::frame::FrameContext;

mod animated_model;
mod color_cycle;
mod mount;
mod rigid_body;
mod text;

/// Copies authoritative state onto a visual representation, once per frame.
pub trait Adapter {
    /// Name used in logs and errors.
    fn label(&self) -> &str;

    /// Whether the adapter has everything it needs to drive its visuals.
    fn is_ready(&self) -> bool {
        true
    }

    /// Updates the visual representation for this frame.
    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()>;
}

/// State of something that becomes available asynchronously.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Loadable<T> {
    /// Still loading, or failed to load.
    #[default]
    NotReady,
    /// Available.
    Ready(T),
}

impl<T> Loadable<T> {
    /// Whether the payload is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Loadable::Ready(_))
    }

    /// The payload, if available.
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            Loadable::NotReady => None,
        }
    }

    /// The payload, if available.
    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(value) => Some(value),
            Loadable::NotReady => None,
        }
    }
}

impl<T> From<Option<T>> for Loadable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Loadable::NotReady, Loadable::Ready)
    }
}
