//! Rigid bodies simulated by rapier, stepped with a fixed time step.

pub use self::body::{BodyHandle, RigidBody, RigidBodyDesc, Shape};
pub use self::world::PhysicsWorld;

mod body;
mod world;
