//! Scene assemblers.
//!
//! Each demo builds a [`Stage`](crate::stage::Stage), registers its adapters with a
//! [`FrameDriver`](crate::frame::FrameDriver) and runs the frame loop until the window
//! closes. Everything a demo needs is passed in through a [`SceneContext`].

use crate::camera::OrbitControls;
use crate::config::{
    BloomSettings, CameraSettings, OrbitSettings, PhysicsSettings, WindowSettings,
};
use crate::frame::FaultPolicy;
use crate::palette::{Rgb, DEEP_TONE};
use glamx::Vec3;

pub mod color_cycle;
pub mod luminescence;
pub mod text_geometry;

/// Settings shared by every demo.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneContext {
    /// Window title and size.
    pub window: WindowSettings,
    /// Initial camera placement and frustum.
    pub camera: CameraSettings,
    /// Orbit controls behavior.
    pub orbit: OrbitSettings,
    /// Physics stepping, for demos with rigid bodies.
    pub physics: PhysicsSettings,
    /// Bloom pass, for demos using it.
    pub bloom: BloomSettings,
    /// What the frame loop does with adapter faults.
    pub policy: FaultPolicy,
    /// Colors cycled through by color tween rings.
    pub palette: Vec<Rgb>,
}

impl Default for SceneContext {
    fn default() -> Self {
        SceneContext {
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            orbit: OrbitSettings::default(),
            physics: PhysicsSettings::default(),
            bloom: BloomSettings::default(),
            policy: FaultPolicy::default(),
            palette: DEEP_TONE.to_vec(),
        }
    }
}

impl SceneContext {
    /// Uses `title` for the window.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Orbit controls starting at `eye`, looking at the configured target.
    pub fn orbit_camera(&self, eye: Vec3) -> OrbitControls {
        let camera = CameraSettings { eye, ..self.camera };
        OrbitControls::new(&camera, self.orbit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiss3d::camera::Camera3d;

    #[test]
    fn default_context_cycles_the_deep_tones() {
        let ctx = SceneContext::default();
        assert_eq!(ctx.palette.len(), 12);
        assert_eq!(ctx.palette[0], DEEP_TONE[0]);
    }

    #[test]
    fn orbit_camera_starts_at_the_requested_eye() {
        let ctx = SceneContext::default();
        let camera = ctx.orbit_camera(Vec3::new(4.0, 2.0, 2.0));
        assert!((camera.eye() - Vec3::new(4.0, 2.0, 2.0)).length() < 1.0e-4);
    }
}
