use super::extrude::extrude_contours;
use super::outline::{text_contours, DEFAULT_CURVE_SEGMENTS};
use crate::loader::FontData;
use crate::mesh::MeshData;
use crate::palette::Rgb;
use glamx::{Quat, Vec3};

/// How a [`TextMesh`] is shaped and placed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextOptions {
    /// The text; `'\n'` starts a new line.
    pub text: String,
    /// Em size, in scene units before scaling.
    pub size: f32,
    /// Extrusion depth.
    pub height: f32,
    /// Fill color.
    pub color: Rgb,
    /// Translation applied to the geometry first.
    pub translate: Vec3,
    /// Rotation angles around X, then Y, then Z, in radians.
    pub rotate: Vec3,
    /// Scale applied last.
    pub scale: Vec3,
    /// Straight segments per outline curve.
    pub curve_segments: u32,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            text: String::new(),
            size: 10.0,
            height: 1.0,
            color: Rgb::new(255.0, 255.0, 255.0),
            translate: Vec3::ZERO,
            rotate: Vec3::ZERO,
            scale: Vec3::ONE,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }
}

impl TextOptions {
    /// Options for `text` with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        TextOptions {
            text: text.into(),
            ..TextOptions::default()
        }
    }
}

/// Extruded text geometry, rebuilt when the text changes.
#[derive(Clone, Debug)]
pub struct TextMesh {
    font: FontData,
    options: TextOptions,
    geometry: MeshData,
    revision: u64,
}

impl TextMesh {
    /// Builds the geometry of `options.text`.
    pub fn new(font: FontData, options: TextOptions) -> Self {
        let geometry = build_geometry(&font, &options);
        TextMesh {
            font,
            options,
            geometry,
            revision: 0,
        }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.options.text
    }

    /// Replaces the text and rebuilds the geometry if it changed.
    pub fn set_text(&mut self, text: &str) {
        if self.options.text != text {
            self.options.text = text.to_owned();
            self.geometry = build_geometry(&self.font, &self.options);
            self.revision += 1;
        }
    }

    /// The fill color.
    pub fn color(&self) -> Rgb {
        self.options.color
    }

    /// Changes the fill color; the geometry is kept.
    pub fn set_color(&mut self, color: Rgb) {
        self.options.color = color;
    }

    /// The options the geometry was built with.
    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    /// The current geometry.
    pub fn geometry(&self) -> &MeshData {
        &self.geometry
    }

    /// Incremented every time the geometry is rebuilt.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn build_geometry(font: &FontData, options: &TextOptions) -> MeshData {
    let contours = text_contours(font.font(), &options.text, options.size, options.curve_segments);
    let mut mesh = extrude_contours(&contours, options.height);
    place(&mut mesh, options);
    mesh
}

/// Applies the translate, rotate, scale placement of `options` to `mesh`.
pub fn place(mesh: &mut MeshData, options: &TextOptions) {
    mesh.translate_by(options.translate);
    mesh.rotate_by(Quat::from_rotation_x(options.rotate.x));
    mesh.rotate_by(Quat::from_rotation_y(options.rotate.y));
    mesh.rotate_by(Quat::from_rotation_z(options.rotate.z));
    mesh.scale_by(options.scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_translates_before_scaling() {
        let mut mesh = MeshData::new(vec![Vec3::ZERO], Vec::new());
        let options = TextOptions {
            translate: Vec3::new(-100.0, 10.0, 0.0),
            scale: Vec3::splat(0.01),
            ..TextOptions::new("title")
        };
        place(&mut mesh, &options);

        assert!((mesh.coords[0] - Vec3::new(-1.0, 0.1, 0.0)).length() < 1.0e-6);
    }

    #[test]
    fn rotations_apply_x_first() {
        let mut mesh = MeshData::new(vec![Vec3::Y], Vec::new());
        let options = TextOptions {
            rotate: Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, std::f32::consts::FRAC_PI_2),
            ..TextOptions::default()
        };
        place(&mut mesh, &options);

        // X turns +Y into +Z, which the Z rotation leaves alone.
        assert!((mesh.coords[0] - Vec3::Z).length() < 1.0e-6);
    }
}
