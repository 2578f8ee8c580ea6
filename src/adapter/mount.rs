//! Instantiating loaded data into the scene graph.

use crate::error::Result;
use crate::loader::ModelData;
use crate::mesh::MeshData;
use crate::target::{PoseTarget, TintTarget};
use glamx::Vec3;
use kiss3d::color::Color;
use kiss3d::scene::SceneNode3d;

/// Turns a loaded model into scene nodes.
pub trait ModelMount {
    /// Handle to one mounted node.
    type Node: PoseTarget;

    /// Mounts `model` and returns one handle per model node, in model order.
    fn mount(&mut self, model: &ModelData) -> Result<Vec<Self::Node>>;
}

/// Turns standalone geometry into a scene node, and removes it again.
pub trait GeometryMount {
    /// Handle to the mounted geometry.
    type Node: TintTarget;

    /// Adds `mesh` to the scene.
    fn mount_geometry(&mut self, mesh: &MeshData) -> Self::Node;

    /// Removes a node returned by [`GeometryMount::mount_geometry`].
    fn unmount(&mut self, node: &mut Self::Node);
}

/// Mounts under a node of the engine scene graph.
#[derive(Clone)]
pub struct SceneMount {
    parent: SceneNode3d,
}

impl SceneMount {
    /// Mounts everything as children of `parent`.
    pub fn new(parent: SceneNode3d) -> Self {
        SceneMount { parent }
    }

    fn build(
        model: &ModelData,
        index: usize,
        parent: &mut SceneNode3d,
        nodes: &mut [Option<SceneNode3d>],
    ) {
        if nodes[index].is_some() {
            return;
        }

        let data = &model.nodes[index];
        let mut group = parent.add_group();
        group.set_translation(data.translation);
        PoseTarget::set_rotation(&mut group, data.rotation);
        group.set_scale(data.scale);

        for primitive in &data.primitives {
            if primitive.mesh.is_empty() {
                continue;
            }

            let [r, g, b, a] = primitive.base_color;
            let [er, eg, eb] = primitive.emissive;
            let render_mesh = primitive.mesh.clone().into_render_mesh();
            let mut mesh = group.add_render_mesh(render_mesh, Vec3::ONE);
            let _ = mesh.set_color(Color::new(r, g, b, a));
            if er + eg + eb > 0.0 {
                let _ = mesh.set_emissive(Color::new(er, eg, eb, 1.0));
            }
        }

        nodes[index] = Some(group.clone());
        for child in model.children(index) {
            Self::build(model, child, &mut group, nodes);
        }
    }
}

impl ModelMount for SceneMount {
    type Node = SceneNode3d;

    fn mount(&mut self, model: &ModelData) -> Result<Vec<SceneNode3d>> {
        let mut nodes = vec![None; model.nodes.len()];
        let mut root = self.parent.add_group();

        for &index in &model.roots {
            if index < nodes.len() {
                Self::build(model, index, &mut root, &mut nodes);
            }
        }

        // Nodes outside the displayed scene still get a handle so tracks can address them.
        Ok(nodes
            .into_iter()
            .map(|node| node.unwrap_or_else(SceneNode3d::empty))
            .collect())
    }
}

impl GeometryMount for SceneMount {
    type Node = SceneNode3d;

    fn mount_geometry(&mut self, mesh: &MeshData) -> SceneNode3d {
        if mesh.is_empty() {
            self.parent.add_group()
        } else {
            self.parent.add_render_mesh(mesh.clone().into_render_mesh(), Vec3::ONE)
        }
    }

    fn unmount(&mut self, node: &mut SceneNode3d) {
        node.remove();
    }
}
