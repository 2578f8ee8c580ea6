use crate::animation::{AnimationClip, Interpolation, KeyframeTrack, Track, TrackData};
use crate::error::{Error, Result};
use crate::mesh::MeshData;
use ::gltf::animation::util::ReadOutputs;
use glamx::{Quat, Vec2, Vec3};
use std::path::Path;
use std::sync::Arc;

/// One drawable part of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelPrimitive {
    /// Triangles of the primitive, in node space.
    pub mesh: MeshData,
    /// Base color factor of its material, RGBA in `[0, 1]`.
    pub base_color: [f32; 4],
    /// Emissive factor of its material, RGB in `[0, 1]`.
    pub emissive: [f32; 3],
}

/// A node of a loaded model with its local transform.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelNode {
    /// Node name, if the file gives one.
    pub name: Option<String>,
    /// Index of the parent node.
    pub parent: Option<usize>,
    /// Local translation.
    pub translation: Vec3,
    /// Local rotation.
    pub rotation: Quat,
    /// Local scale.
    pub scale: Vec3,
    /// Geometry attached to the node.
    pub primitives: Vec<ModelPrimitive>,
}

impl Default for ModelNode {
    fn default() -> Self {
        ModelNode {
            name: None,
            parent: None,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            primitives: Vec::new(),
        }
    }
}

/// A model with its node hierarchy and animation clips.
///
/// Nodes keep the file order, so animation tracks address them by index.
#[derive(Clone, Debug, Default)]
pub struct ModelData {
    /// All nodes.
    pub nodes: Vec<ModelNode>,
    /// Nodes of the displayed scene.
    pub roots: Vec<usize>,
    /// Animation clips.
    pub clips: Vec<Arc<AnimationClip>>,
}

impl ModelData {
    /// Children of `node`, in file order.
    pub fn children(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.parent == Some(node))
            .map(|(i, _)| i)
    }

    /// Total number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|n| &n.primitives)
            .map(|p| p.mesh.num_triangles())
            .sum()
    }

    /// Parses a `.glb` or a self-contained `.gltf` held in memory.
    pub fn from_slice(label: &str, bytes: &[u8]) -> Result<Self> {
        let (document, buffers, _images) =
            ::gltf::import_slice(bytes).map_err(|source| Error::Gltf {
                path: label.into(),
                source,
            })?;
        Self::from_document(Path::new(label), &document, &buffers)
    }

    fn from_document(
        path: &Path,
        document: &::gltf::Document,
        buffers: &[::gltf::buffer::Data],
    ) -> Result<Self> {
        let mut nodes = document
            .nodes()
            .map(|node| {
                let (t, r, s) = node.transform().decomposed();
                let primitives = match node.mesh() {
                    Some(mesh) => read_mesh(path, &mesh, buffers)?,
                    None => Vec::new(),
                };

                Ok(ModelNode {
                    name: node.name().map(str::to_owned),
                    parent: None,
                    translation: Vec3::from_array(t),
                    rotation: Quat::from_array(r),
                    scale: Vec3::from_array(s),
                    primitives,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for node in document.nodes() {
            for child in node.children() {
                nodes[child.index()].parent = Some(node.index());
            }
        }

        let roots = match document.default_scene().or_else(|| document.scenes().next()) {
            Some(scene) => scene.nodes().map(|n| n.index()).collect(),
            None => (0..nodes.len()).filter(|i| nodes[*i].parent.is_none()).collect(),
        };

        let clips = document
            .animations()
            .map(|animation| Arc::new(read_clip(&animation, buffers)))
            .collect();

        Ok(ModelData {
            nodes,
            roots,
            clips,
        })
    }
}

/// Reads a `.gltf` or `.glb` file with its external buffers.
pub fn load_gltf(path: impl AsRef<Path>) -> Result<ModelData> {
    let path = path.as_ref();
    let (document, buffers, _images) = ::gltf::import(path).map_err(|source| Error::Gltf {
        path: path.to_path_buf(),
        source,
    })?;

    let model = ModelData::from_document(path, &document, &buffers)?;
    log::info!(
        "loaded {:?}: {} nodes, {} triangles, {} animations",
        path,
        model.nodes.len(),
        model.num_triangles(),
        model.clips.len()
    );

    Ok(model)
}

fn read_mesh(
    path: &Path,
    mesh: &::gltf::Mesh,
    buffers: &[::gltf::buffer::Data],
) -> Result<Vec<ModelPrimitive>> {
    let mut primitives = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != ::gltf::mesh::Mode::Triangles {
            log::warn!(
                "{:?}: skipping {:?} primitive of mesh {:?}",
                path,
                primitive.mode(),
                mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let coords: Vec<Vec3> = reader
            .read_positions()
            .ok_or_else(|| Error::MissingData {
                path: path.to_path_buf(),
                what: format!("vertex positions in mesh {:?}", mesh.name().unwrap_or("?")),
            })?
            .map(Vec3::from_array)
            .collect();

        let normals = reader
            .read_normals()
            .map(|normals| normals.map(Vec3::from_array).collect());
        let uvs = reader
            .read_tex_coords(0)
            .map(|uvs| uvs.into_f32().map(Vec2::from_array).collect());

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..coords.len() as u32).collect(),
        };
        let faces = indices
            .chunks_exact(3)
            .map(|f| [f[0], f[1], f[2]])
            .collect();

        let mut data = MeshData {
            coords,
            normals,
            uvs,
            faces,
        };
        if data.normals.is_none() {
            data.recompute_normals();
        }

        let material = primitive.material();
        primitives.push(ModelPrimitive {
            mesh: data,
            base_color: material.pbr_metallic_roughness().base_color_factor(),
            emissive: material.emissive_factor(),
        });
    }

    Ok(primitives)
}

fn read_clip(animation: &::gltf::Animation, buffers: &[::gltf::buffer::Data]) -> AnimationClip {
    let mut tracks = Vec::new();

    for channel in animation.channels() {
        let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
        let node = channel.target().node().index();

        let interpolation = match channel.sampler().interpolation() {
            ::gltf::animation::Interpolation::Linear => Interpolation::Linear,
            ::gltf::animation::Interpolation::Step => Interpolation::Step,
            ::gltf::animation::Interpolation::CubicSpline => Interpolation::CubicSpline,
        };

        let Some(inputs) = reader.read_inputs() else {
            log::warn!("animation channel on node {} has no keyframe times", node);
            continue;
        };
        let times: Vec<f32> = inputs.collect();

        let data = match reader.read_outputs() {
            Some(ReadOutputs::Translations(values)) => {
                KeyframeTrack::new(times, values.map(Vec3::from_array).collect(), interpolation)
                    .map(TrackData::Translation)
            }
            Some(ReadOutputs::Rotations(values)) => KeyframeTrack::new(
                times,
                values.into_f32().map(Quat::from_array).collect(),
                interpolation,
            )
            .map(TrackData::Rotation),
            Some(ReadOutputs::Scales(values)) => {
                KeyframeTrack::new(times, values.map(Vec3::from_array).collect(), interpolation)
                    .map(TrackData::Scale)
            }
            Some(ReadOutputs::MorphTargetWeights(_)) => {
                log::debug!("ignoring morph target weights on node {}", node);
                continue;
            }
            None => None,
        };

        match data {
            Some(data) => tracks.push(Track { node, data }),
            None => log::warn!("malformed animation channel on node {}", node),
        }
    }

    let name = animation
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("animation {}", animation.index()));

    AnimationClip::new(name, tracks).optimize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_a_gltf_error() {
        let err = ModelData::from_slice("broken.glb", b"definitely not gltf").unwrap_err();
        assert!(matches!(err, Error::Gltf { .. }));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = load_gltf("does/not/exist.glb").unwrap_err();
        assert!(err.to_string().contains("exist.glb"));
    }

    #[test]
    fn children_follow_parent_links() {
        let model = ModelData {
            nodes: vec![
                ModelNode::default(),
                ModelNode {
                    parent: Some(0),
                    ..ModelNode::default()
                },
                ModelNode {
                    parent: Some(0),
                    ..ModelNode::default()
                },
            ],
            roots: vec![0],
            clips: Vec::new(),
        };

        assert_eq!(model.children(0).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(model.children(1).count(), 0);
    }
}
