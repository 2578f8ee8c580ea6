//! Extruded text built from a TrueType font.

use super::SceneContext;
use crate::adapter::{SceneMount, TextMeshAdapter};
use crate::config::OrbitSettings;
use crate::frame::FrameDriver;
use crate::loader::{load_font, spawn_load};
use crate::stage::Stage;
use crate::text::TextOptions;
use glamx::Vec3;
use std::path::PathBuf;

/// Eye position of the camera.
pub const CAMERA_EYE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
/// Text shown when none is given.
pub const TITLE: &str = "[ TextGeometry Scene ]\nDEEP TONE COLOR ANIMATION";
/// Closest the camera may get to the text.
pub const MIN_DISTANCE: f32 = 0.1;

/// What the text geometry scene shows.
#[derive(Clone, Debug, PartialEq)]
pub struct TextGeometryOptions {
    /// The TrueType/OpenType font file.
    pub font: PathBuf,
    /// Geometry and placement of the text.
    pub text: TextOptions,
}

impl TextGeometryOptions {
    /// Shows `text` with `font`, laid out like the title: built at the default glyph
    /// size, shifted left and scaled down a hundredfold.
    pub fn new(font: impl Into<PathBuf>, text: &str) -> Self {
        TextGeometryOptions {
            font: font.into(),
            text: TextOptions {
                translate: Vec3::new(-100.0, 10.0, 0.0),
                scale: Vec3::splat(0.01),
                ..TextOptions::new(text)
            },
        }
    }
}

/// Opens the window and runs the scene until it is closed.
pub async fn run(ctx: &SceneContext, options: &TextGeometryOptions) {
    log::info!(
        "text geometry: {:?} with {}",
        options.text.text,
        options.font.display()
    );

    let mut stage = Stage::new(&ctx.window).await;
    stage.set_ambient(0.6);
    let _key = stage.add_directional_light(Vec3::new(-1.0, -1.0, -1.0), 0.6);

    let ctx = SceneContext {
        orbit: OrbitSettings {
            min_distance: MIN_DISTANCE,
            ..ctx.orbit
        },
        ..ctx.clone()
    };
    let mut camera = ctx.orbit_camera(CAMERA_EYE);
    let _viewport = camera.track_viewport(stage.resize_observer());

    let path = options.font.clone();
    let pending = spawn_load(path.display().to_string(), move || load_font(&path));
    let mount = SceneMount::new(stage.scene_mut().add_group());

    let mut driver = FrameDriver::new(ctx.policy);
    driver.add_adapter(TextMeshAdapter::new(pending, options.text.clone(), mount));

    stage.run(&mut driver, &mut camera).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_lands_near_the_origin() {
        let options = TextGeometryOptions::new("font.ttf", TITLE);
        let placed = (options.text.translate * options.text.scale).abs();
        assert!(placed.max_element() <= 1.0);
        assert_eq!(options.text.text.lines().count(), 2);
    }
}
