//! Extruded 3D text.
//!
//! Glyph outlines are flattened into contours, grouped into shapes with holes,
//! triangulated, and extruded along `+Z`.

pub use self::extrude::{
    extrude, extrude_contours, shapes_from_contours, signed_area, triangulate, Silhouette,
};
pub use self::outline::{text_contours, DEFAULT_CURVE_SEGMENTS};
pub use self::text_mesh::{place, TextMesh, TextOptions};

mod extrude;
mod outline;
mod text_mesh;
