use glamx::{Quat, Vec3};
use rapier3d::prelude::{
    Collider, ColliderBuilder, RigidBody as RapierBody, RigidBodyBuilder, RigidBodyHandle,
};

/// Collision shape of a rigid body.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Infinite plane through the body origin, with the local `+Z` axis as its normal.
    ///
    /// Planes are always static.
    Plane,
    /// Box given by its half extents along the local axes.
    Cuboid {
        /// Half of the box size along each local axis.
        half_extents: Vec3,
    },
}

impl Shape {
    /// A box with the given half extents.
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Shape::Cuboid {
            half_extents: Vec3::new(hx, hy, hz),
        }
    }

    pub(super) fn from_collider(collider: &Collider) -> Self {
        match collider.shape().as_cuboid() {
            Some(cuboid) => Shape::Cuboid {
                half_extents: cuboid.half_extents,
            },
            None => Shape::Plane,
        }
    }
}

/// Handle of a body registered in a [`PhysicsWorld`](super::PhysicsWorld).
///
/// Handles are generational: once its body is removed, a handle stays invalid even if
/// the slot is reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(super) RigidBodyHandle);

impl BodyHandle {
    /// The raw slot index.
    pub fn index(self) -> usize {
        self.0.into_raw_parts().0 as usize
    }
}

/// Description of a body to insert into the world.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigidBodyDesc {
    /// Initial world position.
    pub position: Vec3,
    /// Initial orientation.
    pub rotation: Quat,
    /// Mass in kilograms. Zero makes the body static.
    pub mass: f32,
    /// Collision shape.
    pub shape: Shape,
    /// Initial linear velocity, in m/s.
    pub linear_velocity: Vec3,
    /// Initial angular velocity, in rad/s.
    pub angular_velocity: Vec3,
}

impl RigidBodyDesc {
    /// A body at rest at `position` with the given mass and shape.
    pub fn new(position: Vec3, mass: f32, shape: Shape) -> Self {
        RigidBodyDesc {
            position,
            rotation: Quat::IDENTITY,
            mass,
            shape,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    /// A static ground plane at `position` facing `+Y`.
    pub fn ground(position: Vec3) -> Self {
        RigidBodyDesc::new(position, 0.0, Shape::Plane)
            .with_rotation(Quat::from_axis_angle(Vec3::X, (-90.0f32).to_radians()))
    }

    /// Sets the initial orientation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the initial linear velocity.
    pub fn with_linear_velocity(mut self, velocity: Vec3) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Sets the initial angular velocity.
    pub fn with_angular_velocity(mut self, velocity: Vec3) -> Self {
        self.angular_velocity = velocity;
        self
    }

    /// Whether the described body is immovable.
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0 || self.shape == Shape::Plane
    }

    pub(super) fn body(&self) -> RapierBody {
        let builder = if self.is_static() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
                .linvel(self.linear_velocity)
                .angvel(self.angular_velocity)
        };

        builder
            .translation(self.position)
            .rotation(self.rotation.normalize().to_scaled_axis())
            .build()
    }

    pub(super) fn collider(&self) -> Collider {
        let builder = match self.shape {
            Shape::Plane => ColliderBuilder::halfspace(rapier3d::na::Unit::new_unchecked(Vec3::Z)),
            Shape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        };

        if self.is_static() {
            builder.build()
        } else {
            builder.mass(self.mass).build()
        }
    }
}

/// State of a body owned by the physics world, read at the last step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RigidBody {
    position: Vec3,
    rotation: Quat,
    linear_velocity: Vec3,
    angular_velocity: Vec3,
    mass: f32,
    shape: Shape,
    is_static: bool,
}

impl RigidBody {
    pub(super) fn read(body: &RapierBody, shape: Shape) -> Self {
        let pose = body.position();
        let velocity = body.vels();
        let is_static = !body.is_dynamic();

        RigidBody {
            position: pose.translation,
            rotation: pose.rotation,
            linear_velocity: velocity.linvel,
            angular_velocity: velocity.angvel,
            mass: if is_static { 0.0 } else { body.mass() },
            shape,
            is_static,
        }
    }

    /// World position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World orientation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Linear velocity.
    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    /// Angular velocity.
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Mass in kilograms, zero for static bodies.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Collision shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Whether the body is immovable.
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}
