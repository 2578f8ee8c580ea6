use super::{BodyHandle, RigidBody, RigidBodyDesc, Shape};
use crate::config::PhysicsSettings;
use glamx::Vec3;
use rapier3d::prelude::{
    CCDSolver, ColliderSet, DefaultBroadPhase, ImpulseJointSet, IntegrationParameters,
    IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline, RigidBodySet,
};

/// A rigid-body world simulated by rapier: gravity, box and plane colliders, contacts
/// between every pair of bodies.
///
/// Time is advanced with a fixed step through [`PhysicsWorld::step`]; frame deltas are
/// accumulated and consumed in whole sub-steps, at most `max_sub_steps` per call.
pub struct PhysicsWorld {
    gravity: Vec3,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    accumulator: f32,
    time: f64,
    steps: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsSettings::default().gravity)
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("gravity", &self.gravity)
            .field("bodies", &self.bodies.len())
            .field("time", &self.time)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl PhysicsWorld {
    /// An empty world with the given gravity, in m/s².
    pub fn new(gravity: Vec3) -> Self {
        PhysicsWorld {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            accumulator: 0.0,
            time: 0.0,
            steps: 0,
        }
    }

    /// The gravity vector.
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Sets the gravity vector.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Simulated time, in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of fixed steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of bodies currently in the world.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world has no body.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Inserts a body with its collider and returns its handle.
    pub fn add_body(&mut self, desc: RigidBodyDesc) -> BodyHandle {
        let handle = self.bodies.insert(desc.body());
        let _ = self
            .colliders
            .insert_with_parent(desc.collider(), handle, &mut self.bodies);
        BodyHandle(handle)
    }

    /// Removes a body and its collider, returning its last state if the handle was valid.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let last = self.body(handle)?;
        let _ = self.bodies.remove(
            handle.0,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        Some(last)
    }

    /// The state of the body behind `handle`, if any.
    pub fn body(&self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.get(handle.0)?;
        let shape = body
            .colliders()
            .first()
            .and_then(|collider| self.colliders.get(*collider))
            .map(Shape::from_collider)
            .unwrap_or(Shape::Plane);

        Some(RigidBody::read(body, shape))
    }

    /// Advances the simulation by `delta` seconds of wall time using sub-steps of
    /// `fixed_step` seconds, running at most `max_sub_steps` of them.
    ///
    /// Time that does not fit in the allowed sub-steps is dropped instead of being
    /// caught up later. Returns the number of sub-steps run.
    pub fn step(&mut self, fixed_step: f32, delta: f32, max_sub_steps: u32) -> u32 {
        if fixed_step <= 0.0 || !delta.is_finite() {
            return 0;
        }

        self.accumulator += delta.max(0.0);

        let mut sub_steps = 0;
        while self.accumulator >= fixed_step && sub_steps < max_sub_steps {
            self.internal_step(fixed_step);
            self.accumulator -= fixed_step;
            sub_steps += 1;
        }

        if sub_steps == max_sub_steps && self.accumulator >= fixed_step {
            log::trace!(
                "physics fell behind, dropping {:.4}s of simulation",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        sub_steps
    }

    /// Runs exactly one step of `dt` seconds.
    pub fn internal_step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );

        self.time += dt as f64;
        self.steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_steps_are_bounded() {
        let mut world = PhysicsWorld::default();
        world.add_body(RigidBodyDesc::new(Vec3::Y, 1.0, Shape::cuboid(0.5, 0.5, 0.5)));

        assert_eq!(world.step(1.0 / 60.0, 1.0, 3), 3);
        // The backlog was dropped: a regular frame runs a single step.
        assert_eq!(world.step(1.0 / 60.0, 1.0 / 60.0 + 1.0e-4, 3), 1);
    }

    #[test]
    fn short_frames_accumulate() {
        let mut world = PhysicsWorld::default();
        assert_eq!(world.step(0.01, 0.004, 3), 0);
        assert_eq!(world.step(0.01, 0.004, 3), 0);
        assert_eq!(world.step(0.01, 0.004, 3), 1);
    }

    #[test]
    fn removed_handles_stay_invalid() {
        let mut world = PhysicsWorld::default();
        let a = world.add_body(RigidBodyDesc::ground(Vec3::ZERO));
        let b = world.add_body(RigidBodyDesc::ground(Vec3::ZERO));
        assert!(world.remove_body(a).is_some());
        assert!(world.body(a).is_none());
        assert!(world.remove_body(a).is_none());

        let c = world.add_body(RigidBodyDesc::ground(Vec3::ZERO));
        assert_ne!(c, a);
        assert!(world.body(a).is_none());
        assert_eq!(world.len(), 2);
        assert!(world.body(b).is_some());
    }

    #[test]
    fn bodies_report_their_description() {
        let mut world = PhysicsWorld::default();
        let ground = world.add_body(RigidBodyDesc::ground(Vec3::ZERO));
        let crate_box = world.add_body(RigidBodyDesc::new(
            Vec3::new(1.0, 2.0, 3.0),
            5.0,
            Shape::cuboid(0.5, 0.25, 0.5),
        ));

        let ground = world.body(ground).unwrap();
        assert!(ground.is_static());
        assert_eq!(ground.shape(), Shape::Plane);
        assert_eq!(ground.mass(), 0.0);

        let crate_box = world.body(crate_box).unwrap();
        assert!(!crate_box.is_static());
        assert_eq!(crate_box.shape(), Shape::cuboid(0.5, 0.25, 0.5));
        assert!((crate_box.mass() - 5.0).abs() < 1.0e-3);
        assert!((crate_box.position() - Vec3::new(1.0, 2.0, 3.0)).length() < 1.0e-6);
    }

    #[test]
    fn spinning_body_stays_normalized() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let h = world.add_body(
            RigidBodyDesc::new(Vec3::ZERO, 1.0, Shape::cuboid(1.0, 1.0, 1.0))
                .with_angular_velocity(Vec3::new(0.0, 3.0, 0.0)),
        );

        for _ in 0..600 {
            world.internal_step(1.0 / 60.0);
        }

        let rotation = world.body(h).unwrap().rotation();
        assert!((rotation.length() - 1.0).abs() < 1.0e-4);
    }

    #[test]
    fn stacked_boxes_rest_on_each_other() {
        let mut world = PhysicsWorld::default();
        let _ = world.add_body(RigidBodyDesc::ground(Vec3::ZERO));
        let shape = Shape::cuboid(0.5, 0.5, 0.5);
        let lower = world.add_body(RigidBodyDesc::new(Vec3::new(0.0, 0.5, 0.0), 1.0, shape));
        let upper = world.add_body(RigidBodyDesc::new(Vec3::new(0.0, 2.0, 0.0), 1.0, shape));

        for _ in 0..600 {
            world.internal_step(1.0 / 60.0);
        }

        let lower = world.body(lower).unwrap().position();
        let upper = world.body(upper).unwrap().position();
        let gap = upper.y - lower.y;
        assert!((lower.y - 0.5).abs() < 2.0e-2, "lower box at {}", lower.y);
        assert!((gap - 1.0).abs() < 2.0e-2, "boxes {} apart", gap);
        assert!(upper.x.abs() < 5.0e-2 && upper.z.abs() < 5.0e-2);
    }
}
