//! Settings for the demo scenes.
//!
//! Every struct has a `Default` matching the values the demos were tuned with. With the
//! `serde` feature enabled they can be (de)serialized.

use glamx::Vec3;

/// Rigid-body simulation settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicsSettings {
    /// Gravity, in m/s².
    pub gravity: Vec3,
    /// Length of one simulation sub-step, in seconds.
    pub fixed_time_step: f32,
    /// Upper bound on sub-steps run for a single frame.
    pub max_sub_steps: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        PhysicsSettings {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            fixed_time_step: 1.0 / 60.0,
            max_sub_steps: 3,
        }
    }
}

/// Bloom post-processing settings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BloomSettings {
    /// Tone mapping exposure. The shader uses `exposure^4`.
    pub exposure: f32,
    /// Intensity of the glow added back onto the image.
    pub strength: f32,
    /// Blur radius, in multiples of the base kernel spread.
    pub radius: f32,
    /// Luminance above which pixels start to glow.
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        BloomSettings {
            exposure: 1.8,
            strength: 3.0,
            radius: 1.2,
            threshold: 0.0,
        }
    }
}

impl BloomSettings {
    /// The linear exposure factor applied before tone mapping.
    pub fn tone_mapping_exposure(&self) -> f32 {
        self.exposure.powf(4.0)
    }
}

/// Perspective camera placement and frustum.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraSettings {
    /// Vertical field of view, in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub znear: f32,
    /// Far clipping plane.
    pub zfar: f32,
    /// Initial eye position.
    pub eye: Vec3,
    /// Point looked at.
    pub target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            fov_degrees: 50.0,
            znear: 0.01,
            zfar: 1000.0,
            eye: Vec3::new(1.0, 1.0, 1.0),
            target: Vec3::ZERO,
        }
    }
}

/// Orbit camera controls.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitSettings {
    /// Largest angle between the up axis and the view direction, in radians.
    pub max_polar_angle: f32,
    /// Smallest angle between the up axis and the view direction, in radians.
    pub min_polar_angle: f32,
    /// Closest the eye may get to the target.
    pub min_distance: f32,
    /// Farthest the eye may get from the target.
    pub max_distance: f32,
    /// Whether the camera orbits on its own.
    pub auto_rotate: bool,
    /// Auto-rotation speed; `1.0` is one turn per minute, `2.0` one every 30 seconds.
    pub auto_rotate_speed: f32,
    /// Whether rotation keeps gliding after the mouse is released.
    pub enable_damping: bool,
    /// Fraction of the pending motion dropped per 60 Hz frame.
    pub damping_factor: f32,
    /// Mouse rotation sensitivity.
    pub rotate_speed: f32,
    /// Scroll zoom sensitivity.
    pub zoom_speed: f32,
    /// Right-drag pan sensitivity.
    pub pan_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        OrbitSettings {
            max_polar_angle: std::f32::consts::FRAC_PI_2,
            min_polar_angle: 0.0,
            min_distance: 1.0,
            max_distance: 100.0,
            auto_rotate: false,
            auto_rotate_speed: 1.0,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
        }
    }
}

/// Window (surface) settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSettings {
    /// Window title.
    pub title: String,
    /// Initial width, in pixels.
    pub width: u32,
    /// Initial height, in pixels.
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            title: "lumina".to_string(),
            width: 800,
            height: 600,
        }
    }
}
