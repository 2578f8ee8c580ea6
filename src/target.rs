//! Seams between adapters and what they drive.
//!
//! Adapters never talk to the engine directly: they write into a [`PoseTarget`] or a
//! [`TintTarget`]. The engine scene nodes implement both, and so can anything else
//! (recorders in tests, HUD elements, lights).

use crate::palette::Rgb;
use glamx::{Quat, Vec3};
use kiss3d::color::Color;
use kiss3d::scene::SceneNode3d;
use std::cell::Cell;
use std::rc::Rc;

/// Something with a local transform.
pub trait PoseTarget {
    /// Sets the local translation.
    fn set_translation(&mut self, translation: Vec3);
    /// Sets the local rotation.
    fn set_rotation(&mut self, rotation: Quat);
    /// Sets the local scale.
    fn set_scale(&mut self, scale: Vec3);

    /// Sets translation and rotation at once.
    fn set_pose(&mut self, translation: Vec3, rotation: Quat) {
        self.set_translation(translation);
        self.set_rotation(rotation);
    }
}

/// Something with a single color.
pub trait TintTarget {
    /// Replaces the color.
    fn set_tint(&mut self, color: Rgb);
}

impl PoseTarget for SceneNode3d {
    #[inline]
    fn set_translation(&mut self, translation: Vec3) {
        let _ = self.set_position(translation);
    }

    #[inline]
    fn set_rotation(&mut self, rotation: Quat) {
        let _ = SceneNode3d::set_rotation(self, rotation);
    }

    #[inline]
    fn set_scale(&mut self, scale: Vec3) {
        let _ = self.set_local_scale(scale.x, scale.y, scale.z);
    }
}

impl TintTarget for SceneNode3d {
    #[inline]
    fn set_tint(&mut self, color: Rgb) {
        let _ = self.set_color(color.to_color());
    }
}

impl<T: TintTarget + ?Sized> TintTarget for Box<T> {
    fn set_tint(&mut self, color: Rgb) {
        (**self).set_tint(color)
    }
}

/// Shared clear color of a stage.
///
/// Adapters hold clones and write into it; the stage reads it right before each frame
/// is submitted.
#[derive(Clone, Debug)]
pub struct Backdrop {
    color: Rc<Cell<Color>>,
}

impl Backdrop {
    /// A backdrop starting with `color`.
    pub fn new(color: Rgb) -> Self {
        Backdrop {
            color: Rc::new(Cell::new(color.to_color())),
        }
    }

    /// The current clear color.
    pub fn color(&self) -> Color {
        self.color.get()
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Backdrop::new(Rgb::new(0.0, 0.0, 0.0))
    }
}

impl TintTarget for Backdrop {
    fn set_tint(&mut self, color: Rgb) {
        self.color.set(color.to_color());
    }
}

/// A color handed from one adapter to another.
///
/// Writers tint it like any target; the reader takes the latest color, if a new one
/// was written since the last take.
#[derive(Clone, Debug, Default)]
pub struct SharedTint {
    color: Rc<Cell<Option<Rgb>>>,
}

impl SharedTint {
    /// An empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the color written since the last call, if any.
    pub fn take(&self) -> Option<Rgb> {
        self.color.take()
    }
}

impl TintTarget for SharedTint {
    fn set_tint(&mut self, color: Rgb) {
        self.color.set(Some(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_tint_keeps_the_latest_color_once() {
        let tint = SharedTint::new();
        let mut writer = tint.clone();

        writer.set_tint(Rgb::new(1.0, 2.0, 3.0));
        writer.set_tint(Rgb::new(4.0, 5.0, 6.0));
        assert_eq!(tint.take(), Some(Rgb::new(4.0, 5.0, 6.0)));
        assert_eq!(tint.take(), None);
    }

    #[test]
    fn backdrop_clones_share_the_color() {
        let backdrop = Backdrop::default();
        let mut writer = backdrop.clone();
        writer.set_tint(Rgb::new(255.0, 0.0, 0.0));
        assert_eq!(backdrop.color().r, 1.0);
    }
}
