use super::Adapter;
use crate::error::Result;
use crate::frame::FrameContext;
use crate::palette::Rgb;
use crate::target::TintTarget;
use crate::tween::{Easing, TweenRing};

/// Seconds each color transition takes.
pub const TRANSITION_SECONDS: f32 = 1.0;

/// Cycles colors forever and paints them onto every target.
pub struct ColorCycleAdapter {
    label: String,
    ring: TweenRing<Rgb>,
    targets: Vec<Box<dyn TintTarget>>,
}

impl ColorCycleAdapter {
    /// Tweens through `palette` with elastic in-out transitions of one second each.
    ///
    /// Returns `None` for an empty palette.
    pub fn new(label: impl Into<String>, palette: &[Rgb]) -> Option<Self> {
        let ring = TweenRing::new(palette, TRANSITION_SECONDS, Easing::ElasticInOut)?;
        Some(Self::with_ring(label, ring))
    }

    /// Uses an already configured ring.
    pub fn with_ring(label: impl Into<String>, ring: TweenRing<Rgb>) -> Self {
        ColorCycleAdapter {
            label: label.into(),
            ring,
            targets: Vec::new(),
        }
    }

    /// Adds a target painted on every update.
    pub fn add_target(&mut self, target: impl TintTarget + 'static) -> &mut Self {
        self.targets.push(Box::new(target));
        self
    }

    /// The tween ring.
    pub fn ring(&self) -> &TweenRing<Rgb> {
        &self.ring
    }

    /// The color currently shown.
    pub fn color(&self) -> Rgb {
        self.ring.value()
    }
}

impl Adapter for ColorCycleAdapter {
    fn label(&self) -> &str {
        &self.label
    }

    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()> {
        let color = self.ring.advance(frame.delta);
        for target in &mut self.targets {
            target.set_tint(color);
        }
        Ok(())
    }
}
