//! A window, its scene graph and the loop driving them.

use crate::config::{BloomSettings, WindowSettings};
use crate::frame::{Controls, FrameDriver, FrameReport, WallClock};
use crate::post_processing::Bloom;
use crate::target::Backdrop;
use crate::viewport::{ResizeObserver, ResizeSubscription, Viewport};
use glamx::Vec3;
use kiss3d::camera::Camera3d;
use kiss3d::color::Color;
use kiss3d::light::Light;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::scene::SceneNode3d;
use kiss3d::window::Window;

const AXES_WIDTH: f32 = 2.0;

/// Everything rendered each frame.
///
/// The stage owns the window, the root of the scene graph, the clear color and the
/// optional bloom pass. It polls the surface size before every frame and forwards
/// changes to its [`ResizeObserver`].
pub struct Stage {
    window: Window,
    scene: SceneNode3d,
    backdrop: Backdrop,
    bloom: Option<(Bloom, ResizeSubscription)>,
    resize: ResizeObserver,
    axes: Option<f32>,
}

impl Stage {
    /// Opens a window described by `settings`.
    pub async fn new(settings: &WindowSettings) -> Stage {
        let window = Window::new_with_size(&settings.title, settings.width, settings.height).await;
        log::info!(
            "opened `{}` ({}x{})",
            settings.title,
            settings.width,
            settings.height
        );

        let mut stage = Stage {
            window,
            scene: SceneNode3d::empty(),
            backdrop: Backdrop::default(),
            bloom: None,
            resize: ResizeObserver::new(),
            axes: None,
        };
        let _ = stage.observe_size();
        stage
    }

    /// The window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The window, for engine settings not covered here.
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Root of the scene graph.
    pub fn scene(&self) -> &SceneNode3d {
        &self.scene
    }

    /// Root of the scene graph, for adding nodes.
    pub fn scene_mut(&mut self) -> &mut SceneNode3d {
        &mut self.scene
    }

    /// A handle on the clear color, usable as a tint target.
    pub fn backdrop(&self) -> Backdrop {
        self.backdrop.clone()
    }

    /// Notifies subscribers when the surface size changes.
    pub fn resize_observer(&self) -> &ResizeObserver {
        &self.resize
    }

    /// Last observed surface size.
    pub fn viewport(&self) -> Viewport {
        self.resize.current().unwrap_or_default()
    }

    /// Sets the ambient light intensity.
    pub fn set_ambient(&mut self, ambient: f32) {
        self.window.set_ambient(ambient);
    }

    /// Adds a directional light shining along `direction`.
    pub fn add_directional_light(&mut self, direction: Vec3, intensity: f32) -> SceneNode3d {
        self.scene
            .add_light(Light::directional(direction.normalize_or_zero()).with_intensity(intensity))
    }

    /// Draws the X (red), Y (green) and Z (blue) axes with the given length every frame.
    pub fn show_axes(&mut self, length: f32) {
        self.axes = Some(length);
    }

    /// Enables the bloom pass.
    pub fn enable_bloom(&mut self, settings: BloomSettings) {
        let bloom = Bloom::new(settings);
        let subscription = bloom.track_viewport(&self.resize);
        self.bloom = Some((bloom, subscription));
    }

    /// The bloom pass, if enabled.
    pub fn bloom_mut(&mut self) -> Option<&mut Bloom> {
        self.bloom.as_mut().map(|(bloom, _)| bloom)
    }

    /// Reports the current surface size to the resize subscribers.
    ///
    /// Returns `true` if the size changed.
    pub fn observe_size(&mut self) -> bool {
        let viewport = Viewport::new(self.window.width(), self.window.height());
        self.resize.observe(viewport)
    }

    /// Renders one frame seen through `camera`.
    ///
    /// Returns `false` once the window is closed.
    pub async fn submit(&mut self, camera: &mut dyn Camera3d) -> bool {
        self.window.set_background_color(self.backdrop.color());

        if let Some(length) = self.axes {
            let origin = Vec3::ZERO;
            let axes = [
                (Vec3::X, Color::new(1.0, 0.0, 0.0, 1.0)),
                (Vec3::Y, Color::new(0.0, 1.0, 0.0, 1.0)),
                (Vec3::Z, Color::new(0.0, 0.0, 1.0, 1.0)),
            ];
            for (axis, color) in axes {
                self.window
                    .draw_line(origin, axis * length, color, AXES_WIDTH, true);
            }
        }

        let effect = self
            .bloom
            .as_mut()
            .map(|(bloom, _)| bloom as &mut dyn PostProcessingEffect);

        self.window
            .render(Some(&mut self.scene), None, Some(camera), None, None, effect)
            .await
    }

    /// Drives frames until the window closes or a halting fault occurs.
    ///
    /// Each frame ticks `driver` with a wall-clock timestamp, which updates physics,
    /// adapters and `camera` in that order, then renders.
    pub async fn run<C>(mut self, driver: &mut FrameDriver, camera: &mut C)
    where
        C: Camera3d + Controls,
    {
        let clock = WallClock::new();

        while !self.window.should_close() {
            match driver.tick(clock.now_ms(), Some(&mut *camera)) {
                Ok(FrameReport { faults, frame, .. }) if faults > 0 => {
                    log::debug!("frame {}: {} adapter(s) failed", frame, faults);
                }
                Ok(_) => {}
                Err(err) => {
                    log::error!("stopping: {}", err);
                    break;
                }
            }

            let _ = self.observe_size();

            if !self.submit(camera).await {
                break;
            }
        }

        log::info!("stage closed after {} frames", driver.clock().frames());
    }
}
