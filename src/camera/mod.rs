//! Camera controls.

pub use self::orbit_controls::OrbitControls;

mod orbit_controls;
