//! The background, and optionally a line of text, cycling through a palette.

use super::SceneContext;
use crate::adapter::{ColorCycleAdapter, SceneMount, TextMeshAdapter};
use crate::frame::FrameDriver;
use crate::loader::{load_font, spawn_load};
use crate::stage::Stage;
use crate::target::SharedTint;
use crate::text::TextOptions;
use glamx::Vec3;
use std::path::PathBuf;

/// Eye position of the camera.
pub const CAMERA_EYE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
/// Where the directional light shines from.
pub const LIGHT_POSITION: Vec3 = Vec3::new(7.0, 10.0, -2.0);
/// Intensity of the directional light.
pub const LIGHT_INTENSITY: f32 = 0.3;
/// Ambient light intensity.
pub const AMBIENT: f32 = 1.0;

/// What the color cycle scene contains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorCycleOptions {
    /// Font for an optional line of text tinted along with the background.
    pub font: Option<PathBuf>,
    /// The text shown when a font is given.
    pub text: String,
}

/// Text placement used when a font is given.
pub fn text_options(text: &str) -> TextOptions {
    TextOptions {
        size: 0.2,
        height: 0.05,
        translate: Vec3::new(-0.5, 0.0, 0.0),
        ..TextOptions::new(text)
    }
}

/// Opens the window and runs the scene until it is closed.
///
/// Returns without opening anything if the palette in `ctx` is empty.
pub async fn run(ctx: &SceneContext, options: &ColorCycleOptions) {
    let Some(mut cycle) = ColorCycleAdapter::new("color cycle", &ctx.palette) else {
        log::error!("color cycle: the palette is empty");
        return;
    };
    log::info!("color cycle: {} colors", ctx.palette.len());

    let mut stage = Stage::new(&ctx.window).await;
    stage.set_ambient(AMBIENT);
    let _light = stage.add_directional_light(-LIGHT_POSITION, LIGHT_INTENSITY);

    let mut camera = ctx.orbit_camera(CAMERA_EYE);
    let _viewport = camera.track_viewport(stage.resize_observer());

    let mut driver = FrameDriver::new(ctx.policy);
    cycle.add_target(stage.backdrop());

    let text = options.font.clone().map(|path| {
        let tint = SharedTint::new();
        cycle.add_target(tint.clone());

        let pending = spawn_load(path.display().to_string(), move || load_font(&path));
        let mount = SceneMount::new(stage.scene_mut().add_group());
        TextMeshAdapter::new(pending, text_options(&options.text), mount).with_tint(tint)
    });

    driver.add_adapter(cycle);
    if let Some(text) = text {
        driver.add_adapter(text);
    }

    stage.run(&mut driver, &mut camera).await;
}
