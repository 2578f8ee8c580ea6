//! Engine-independent triangle meshes.
//!
//! Loaders and the text extruder produce [`MeshData`]; the scene side turns it into an
//! engine [`RenderMesh`] only when mounting.

use glamx::{Quat, Vec2, Vec3};
use kiss3d::procedural::{IndexBuffer, RenderMesh};

/// An indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshData {
    /// Vertex positions.
    pub coords: Vec<Vec3>,
    /// Per-vertex normals.
    pub normals: Option<Vec<Vec3>>,
    /// Per-vertex texture coordinates.
    pub uvs: Option<Vec<Vec2>>,
    /// Triangles, counter-clockwise when seen from outside.
    pub faces: Vec<[u32; 3]>,
}

impl MeshData {
    /// Creates a mesh from positions and triangles.
    pub fn new(coords: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        MeshData {
            coords,
            normals: None,
            uvs: None,
            faces,
        }
    }

    /// Whether the mesh has no triangle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.faces.len()
    }

    /// Translates each vertex.
    #[inline]
    pub fn translate_by(&mut self, t: Vec3) {
        for c in self.coords.iter_mut() {
            *c += t;
        }
    }

    /// Rotates each vertex and normal around the origin.
    #[inline]
    pub fn rotate_by(&mut self, r: Quat) {
        for c in self.coords.iter_mut() {
            *c = r * *c;
        }

        for n in self.normals.iter_mut().flatten() {
            *n = r * *n;
        }
    }

    /// Scales each vertex; normals follow the inverse scale and are renormalized.
    #[inline]
    pub fn scale_by(&mut self, s: Vec3) {
        for c in self.coords.iter_mut() {
            *c *= s;
        }

        if let Some(normals) = &mut self.normals {
            let inv_scale = Vec3::new(1.0 / s.x, 1.0 / s.y, 1.0 / s.z);
            for n in normals.iter_mut() {
                *n = (*n * inv_scale).normalize_or_zero();
            }
        }

        // A mirroring scale turns triangles inside out.
        if s.x * s.y * s.z < 0.0 {
            self.flip_triangles();
        }
    }

    /// Flips the orientation of every triangle.
    pub fn flip_triangles(&mut self) {
        for f in self.faces.iter_mut() {
            f.swap(1, 2);
        }
    }

    /// Appends the triangles of `other`, dropping attributes only one side has.
    pub fn append(&mut self, other: &MeshData) {
        let offset = self.coords.len() as u32;
        let was_empty = self.coords.is_empty();

        self.coords.extend_from_slice(&other.coords);
        self.faces
            .extend(other.faces.iter().map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]));

        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut a), Some(b)) => {
                a.extend_from_slice(b);
                Some(a)
            }
            (None, Some(b)) if was_empty => Some(b.clone()),
            _ => None,
        };
        self.uvs = match (self.uvs.take(), &other.uvs) {
            (Some(mut a), Some(b)) => {
                a.extend_from_slice(b);
                Some(a)
            }
            (None, Some(b)) if was_empty => Some(b.clone()),
            _ => None,
        };
    }

    /// Axis-aligned bounds, as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.coords.first()?;
        Some(
            self.coords
                .iter()
                .fold((first, first), |(lo, hi), c| (lo.min(*c), hi.max(*c))),
        )
    }

    /// Recomputes smooth normals from the triangles.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.coords.len()];

        for f in &self.faces {
            let [a, b, c] = f.map(|i| self.coords[i as usize]);
            let normal = (b - a).cross(c - a).normalize_or_zero();

            for i in f {
                normals[*i as usize] += normal;
            }
        }

        for n in normals.iter_mut() {
            *n = n.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Converts to the engine representation.
    pub fn into_render_mesh(self) -> RenderMesh {
        RenderMesh::new(
            self.coords,
            self.normals,
            self.uvs,
            Some(IndexBuffer::Unified(self.faces)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]])
    }

    #[test]
    fn normals_follow_winding() {
        let mut mesh = triangle();
        mesh.recompute_normals();
        assert_eq!(mesh.normals.as_ref().unwrap()[0], Vec3::Z);

        mesh.flip_triangles();
        mesh.recompute_normals();
        assert_eq!(mesh.normals.as_ref().unwrap()[0], -Vec3::Z);
    }

    #[test]
    fn append_offsets_indices() {
        let mut mesh = triangle();
        let mut other = triangle();
        other.translate_by(Vec3::Z);
        mesh.append(&other);

        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.faces[1], [3, 4, 5]);
        assert_eq!(mesh.bounds(), Some((Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0))));
    }

    #[test]
    fn mirroring_scale_keeps_outward_winding() {
        let mut mesh = triangle();
        mesh.scale_by(Vec3::new(1.0, 1.0, -1.0));
        assert_eq!(mesh.faces[0], [0, 2, 1]);
    }
}
