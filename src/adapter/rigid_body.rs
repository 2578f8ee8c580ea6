use super::Adapter;
use crate::error::Result;
use crate::frame::FrameContext;
use crate::physics::{BodyHandle, PhysicsWorld, RigidBodyDesc};
use crate::target::PoseTarget;

/// Keeps a mesh on top of a simulated rigid body.
pub struct RigidBodyAdapter<M> {
    label: String,
    body: BodyHandle,
    mesh: M,
}

impl<M: PoseTarget> RigidBodyAdapter<M> {
    /// Adds a body described by `desc` to `world` and places `mesh` at its initial pose.
    pub fn spawn(
        label: impl Into<String>,
        world: &mut PhysicsWorld,
        desc: RigidBodyDesc,
        mut mesh: M,
    ) -> Self {
        let body = world.add_body(desc);
        mesh.set_pose(desc.position, desc.rotation);

        RigidBodyAdapter {
            label: label.into(),
            body,
            mesh,
        }
    }

    /// The simulated body.
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// The driven mesh.
    pub fn mesh(&self) -> &M {
        &self.mesh
    }
}

impl<M: PoseTarget> Adapter for RigidBodyAdapter<M> {
    fn label(&self) -> &str {
        &self.label
    }

    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()> {
        if let Some(body) = frame.physics.and_then(|world| world.body(self.body)) {
            self.mesh.set_pose(body.position(), body.rotation());
        }
        Ok(())
    }
}
