//! Rigid-body physics, delegated to `rapier2d`.
//!
//! [`PhysicsWorld`] owns every body, collider and joint in the scene and
//! exposes the handful of operations the demo needs: building the static box,
//! the balls and the spring, stepping, clearing forces, picking a body under
//! a point and driving the drag joint.

mod world;

pub use rapier2d::prelude::{ImpulseJointHandle, RigidBodyHandle};
pub use world::{BallMaterial, DragJointParams, PhysicsWorld, StepParams};

use glam::Vec2;
use rapier2d::math::{Point, Real, Vector};

pub(crate) fn to_vector(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

pub(crate) fn to_point(v: Vec2) -> Point<Real> {
    Point::new(v.x, v.y)
}

pub(crate) fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}
