//! Glyph outlines laid out as flat contours.

use glamx::Vec2;
use rusttype::{Font, OutlineBuilder, Scale};

/// Number of straight segments each curve is split into.
pub const DEFAULT_CURVE_SEGMENTS: u32 = 12;

/// Collects glyph outlines as closed polylines, in a y-up frame.
struct ContourCollector {
    contours: Vec<Vec<Vec2>>,
    current: Vec<Vec2>,
    origin: Vec2,
    segments: u32,
}

impl ContourCollector {
    fn point(&self, x: f32, y: f32) -> Vec2 {
        // Scaled outlines come out y-down.
        Vec2::new(self.origin.x + x, self.origin.y - y)
    }

    fn last(&self) -> Vec2 {
        self.current.last().copied().unwrap_or(self.origin)
    }

    fn flush(&mut self) {
        if self.current.len() >= 3 {
            self.contours.push(std::mem::take(&mut self.current));
        } else {
            self.current.clear();
        }
    }
}

impl OutlineBuilder for ContourCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        let p = self.point(x, y);
        self.current.push(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.current.push(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (p0, p1, p2) = (self.last(), self.point(x1, y1), self.point(x, y));
        for i in 1..=self.segments {
            let t = i as f32 / self.segments as f32;
            let u = 1.0 - t;
            self.current.push(p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t));
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (p0, p1, p2, p3) = (
            self.last(),
            self.point(x1, y1),
            self.point(x2, y2),
            self.point(x, y),
        );
        for i in 1..=self.segments {
            let t = i as f32 / self.segments as f32;
            let u = 1.0 - t;
            self.current.push(
                p0 * (u * u * u)
                    + p1 * (3.0 * u * u * t)
                    + p2 * (3.0 * u * t * t)
                    + p3 * (t * t * t),
            );
        }
    }

    fn close(&mut self) {
        self.flush();
    }
}

/// Lays `text` out and returns the outline contours of every glyph.
///
/// `size` is the em size in scene units. The first baseline is at `y = 0` and each
/// `'\n'` moves down by one line height.
pub fn text_contours(
    font: &Font<'_>,
    text: &str,
    size: f32,
    curve_segments: u32,
) -> Vec<Vec<Vec2>> {
    let units = font.v_metrics_unscaled();
    let units_per_em = f32::from(font.units_per_em().max(1));
    let scale = Scale::uniform(size * (units.ascent - units.descent) / units_per_em);

    let v_metrics = font.v_metrics(scale);
    let line_height = v_metrics.ascent - v_metrics.descent + v_metrics.line_gap;

    let mut collector = ContourCollector {
        contours: Vec::new(),
        current: Vec::new(),
        origin: Vec2::ZERO,
        segments: curve_segments.max(1),
    };

    for (row, line) in text.split('\n').enumerate() {
        let mut x = 0.0;
        let mut previous = None;

        for c in line.chars() {
            let glyph = font.glyph(c).scaled(scale);
            if let Some(previous) = previous {
                x += font.pair_kerning(scale, previous, glyph.id());
            }

            collector.origin = Vec2::new(x, -(row as f32) * line_height);
            let _ = glyph.build_outline(&mut collector);
            collector.flush();

            x += glyph.h_metrics().advance_width;
            previous = Some(glyph.id());
        }
    }

    collector.contours
}
