/*!
# Lumina

Small 3D demo scenes built on top of [kiss3d](https://docs.rs/kiss3d).

Each scene wires together a window, a scene graph, an orbit camera, lights and a frame
loop:

* **luminescence**: a glTF model playing its first animation clip under a bloom pass.
* **color cycle**: a perpetual ring of elastic color tweens over the deep tone palette
  driving the clear color (and, optionally, a line of text).
* **text geometry**: extruded 3D text built from a TrueType font.

## Frame loop

A [`FrameDriver`](frame::FrameDriver) turns refresh timestamps into deltas and, every
frame, steps the [physics world](physics::PhysicsWorld) with fixed sub-steps, updates
every registered [`Adapter`](adapter::Adapter) in order, then the camera controls. The
[`Stage`](stage::Stage) submits the frame right after.

Adapters copy authoritative state onto what is rendered: a rigid body pose onto a mesh,
a sampled animation clip onto the nodes of a model, a tweened color onto tint targets.
Assets are loaded in the background; adapters waiting for one are
[`NotReady`](adapter::Loadable::NotReady) and do nothing until it arrives.

```no_run
use lumina::demos::{self, color_cycle::ColorCycleOptions, SceneContext};

#[kiss3d::main]
async fn main() {
    let ctx = SceneContext::default().with_title("color cycle");
    demos::color_cycle::run(&ctx, &ColorCycleOptions::default()).await;
}
```

## Faults

Adapter updates return a [`Result`]. With [`FaultPolicy::LogAndContinue`](frame::FaultPolicy)
(the default) a failing adapter is logged and skipped for that frame; with
[`FaultPolicy::Halt`](frame::FaultPolicy) the loop stops and reports the error.
*/
#![allow(clippy::module_inception)]
#![allow(clippy::type_complexity)]

pub use glamx;

pub use crate::error::{Error, Result};

pub mod adapter;
pub mod animation;
pub mod camera;
pub mod config;
pub mod demos;
pub mod error;
pub mod frame;
pub mod loader;
pub mod mesh;
pub mod palette;
pub mod physics;
pub mod post_processing;
pub mod stage;
pub mod target;
pub mod text;
pub mod tween;
pub mod viewport;

pub mod prelude {
    pub use crate::adapter::*;
    pub use crate::animation::*;
    pub use crate::camera::*;
    pub use crate::config::*;
    pub use crate::frame::*;
    pub use crate::loader::*;
    pub use crate::mesh::*;
    pub use crate::palette::*;
    pub use crate::physics::*;
    pub use crate::post_processing::*;
    pub use crate::stage::*;
    pub use crate::target::*;
    pub use crate::text::*;
    pub use crate::tween::*;
    pub use crate::viewport::*;
    pub use crate::{Error, Result};
    pub use glamx::{Quat, Vec2, Vec3};
}
