use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::parry::bounding_volume::Aabb;
use rapier2d::pipeline::{DebugRenderBackend, DebugRenderPipeline};
use rapier2d::prelude::*;

use super::{to_point, to_vec2, to_vector};

/// Solver settings applied on every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub gravity: Vec2,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    /// Furthest a body may travel in one step. Faster bodies are slowed down.
    pub max_translation: f32,
}

/// Surface properties of a ball collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallMaterial {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

/// Drag joint tuning: a damped pull towards the target point,
/// capped at `max_force`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragJointParams {
    pub max_force: f32,
    pub frequency_hz: f32,
    pub damping_ratio: f32,
}

/// The rapier world plus the bookkeeping every step needs.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    /// Colliders were added or removed since the query pipeline last saw them.
    query_dirty: bool,
    max_translation: f32,
}

impl PhysicsWorld {
    pub fn new(params: StepParams) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(params.velocity_iterations).unwrap_or(NonZeroUsize::MIN);
        integration_parameters.num_internal_stabilization_iterations = params.position_iterations;

        Self {
            gravity: to_vector(params.gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            query_dirty: false,
            max_translation: params.max_translation,
        }
    }

    /// Fixed box of full size `size` centred on `center`.
    pub fn create_static_box(&mut self, center: Vec2, size: Vec2) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().translation(to_vector(center)).build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::cuboid(size.x * 0.5, size.y * 0.5).build();
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        self.query_dirty = true;
        handle
    }

    /// Dynamic circle of `radius` centred on `center`.
    pub fn create_ball(&mut self, center: Vec2, radius: f32, material: BallMaterial) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(center))
            .ccd_enabled(true)
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(radius)
            .density(material.density)
            .friction(material.friction)
            .restitution(material.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .build();
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        if let Some(body) = self.bodies.get_mut(handle) {
            body.recompute_mass_properties_from_colliders(&self.colliders);
        }
        self.query_dirty = true;
        handle
    }

    /// Damped spring between the centres of two bodies.
    pub fn create_spring(
        &mut self,
        a: RigidBodyHandle,
        b: RigidBodyHandle,
        rest_length: f32,
        stiffness: f32,
        damping: f32,
    ) -> ImpulseJointHandle {
        let joint = SpringJointBuilder::new(rest_length, stiffness, damping)
            .local_anchor1(point![0.0, 0.0])
            .local_anchor2(point![0.0, 0.0])
            .build();
        self.impulse_joints.insert(a, b, joint, true)
    }

    /// Join `body` to `anchor` so the point of `body` under `target` is pulled
    /// towards `target`. Returns `None` if either body is missing.
    pub fn create_drag_joint(
        &mut self,
        anchor: RigidBodyHandle,
        body: RigidBodyHandle,
        target: Vec2,
        params: DragJointParams,
    ) -> Option<ImpulseJointHandle> {
        let target = to_point(target);
        let anchor_local = self.bodies.get(anchor)?.position().inverse_transform_point(&target);
        let body_local = self.bodies.get(body)?.position().inverse_transform_point(&target);

        let omega = std::f32::consts::TAU * params.frequency_hz;
        let stiffness = omega * omega;
        let damping = 2.0 * params.damping_ratio * omega;

        let mut builder = GenericJointBuilder::new(JointAxesMask::empty())
            .local_anchor1(anchor_local)
            .local_anchor2(body_local)
            .contacts_enabled(false);
        for axis in [JointAxis::LinX, JointAxis::LinY] {
            builder = builder
                .motor_model(axis, MotorModel::AccelerationBased)
                .motor_position(axis, 0.0, stiffness, damping)
                .motor_max_force(axis, params.max_force);
        }

        Some(self.impulse_joints.insert(anchor, body, builder.build(), true))
    }

    /// Move the target of a drag joint. Returns `false` if the joint is gone.
    pub fn set_drag_target(&mut self, joint: ImpulseJointHandle, target: Vec2) -> bool {
        let Some(joint) = self.impulse_joints.get_mut(joint) else {
            return false;
        };
        let Some(anchor) = self.bodies.get(joint.body1) else {
            return false;
        };
        let local = anchor.position().inverse_transform_point(&to_point(target));
        joint.data.set_local_anchor1(local);

        let dragged = joint.body2;
        if let Some(body) = self.bodies.get_mut(dragged) {
            body.wake_up(true);
        }
        true
    }

    /// Current world-space target of a drag joint.
    pub fn drag_target(&self, joint: ImpulseJointHandle) -> Option<Vec2> {
        let joint = self.impulse_joints.get(joint)?;
        let anchor = self.bodies.get(joint.body1)?;
        let world = anchor.position() * joint.data.local_anchor1();
        Some(Vec2::new(world.x, world.y))
    }

    pub fn remove_joint(&mut self, joint: ImpulseJointHandle) -> bool {
        self.impulse_joints.remove(joint, true).is_some()
    }

    /// Remove a body with its colliders and every joint attached to it.
    pub fn remove_body(&mut self, body: RigidBodyHandle) -> bool {
        self.query_dirty = true;
        self.bodies
            .remove(
                body,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn contains_body(&self, body: RigidBodyHandle) -> bool {
        self.bodies.contains(body)
    }

    pub fn contains_joint(&self, joint: ImpulseJointHandle) -> bool {
        self.impulse_joints.get(joint).is_some()
    }

    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance the simulation by `dt` seconds, then cap every body's speed
    /// at `max_translation` per step.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.query_dirty = false;

        if dt <= 0.0 {
            return;
        }
        let max_speed = self.max_translation / dt;
        for (_, body) in self.bodies.iter_mut() {
            let speed = body.linvel().norm();
            if body.is_dynamic() && speed > max_speed {
                let capped = *body.linvel() * (max_speed / speed);
                body.set_linvel(capped, false);
            }
        }
    }

    /// Drop user forces and torques accumulated since the last step.
    pub fn clear_forces(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    /// First dynamic body whose collider contains `point`.
    ///
    /// The query pipeline yields colliders whose bounding box overlaps a box
    /// of half-extent `epsilon` around `point`; each candidate on a dynamic
    /// body is then tested for exact containment. The callback returns
    /// `false` to stop at the first hit.
    pub fn pick_body(&mut self, point: Vec2, epsilon: f32) -> Option<RigidBodyHandle> {
        if self.query_dirty {
            self.query_pipeline.update(&self.colliders);
            self.query_dirty = false;
        }

        let query = Aabb::new(to_point(point - Vec2::splat(epsilon)), to_point(point + Vec2::splat(epsilon)));
        let point = to_point(point);
        let mut found = None;
        self.query_pipeline.colliders_with_aabb_intersecting_aabb(&query, |handle| {
            let Some(collider) = self.colliders.get(*handle) else {
                return true;
            };
            let Some(parent) = collider.parent() else {
                return true;
            };
            let dynamic = self.bodies.get(parent).is_some_and(|body| body.is_dynamic());
            if dynamic && collider.shape().contains_point(collider.position(), &point) {
                found = Some(parent);
                return false;
            }
            true
        });
        found
    }

    pub fn mass(&self, body: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(body).map(|b| b.mass())
    }

    pub fn translation(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(body).map(|b| to_vec2(b.translation()))
    }

    pub fn rotation(&self, body: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(body).map(|b| b.rotation().angle())
    }

    pub fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(body).map(|b| to_vec2(b.linvel()))
    }

    /// Teleport a body, keeping its rotation and velocity.
    pub fn set_translation(&mut self, body: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(body) {
            body.set_translation(to_vector(position), true);
        }
    }

    /// Force applied at a world-space point until the next `clear_forces`.
    pub fn add_force_at_point(&mut self, body: RigidBodyHandle, force: Vec2, point: Vec2) {
        if let Some(body) = self.bodies.get_mut(body) {
            body.add_force_at_point(to_vector(force), to_point(point), true);
        }
    }

    pub fn apply_impulse_at_point(&mut self, body: RigidBodyHandle, impulse: Vec2, point: Vec2) {
        if let Some(body) = self.bodies.get_mut(body) {
            body.apply_impulse_at_point(to_vector(impulse), to_point(point), true);
        }
    }

    /// Run rapier's debug renderer over the whole world.
    pub fn debug_render(&self, pipeline: &mut DebugRenderPipeline, backend: &mut impl DebugRenderBackend) {
        pipeline.render(
            backend,
            &self.bodies,
            &self.colliders,
            &self.impulse_joints,
            &self.multibody_joints,
            &self.narrow_phase,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATERIAL: BallMaterial = BallMaterial {
        density: 1.0,
        friction: 0.1,
        restitution: 0.5,
    };

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(StepParams {
            gravity: Vec2::new(0.0, 9.8),
            velocity_iterations: 8,
            position_iterations: 8,
            max_translation: 2.0,
        })
    }

    #[test]
    fn test_pick_inside_and_outside_ball() {
        let mut world = world();
        let ball = world.create_ball(Vec2::new(10.0, 10.0), 2.0, MATERIAL);

        assert_eq!(world.pick_body(Vec2::new(11.0, 10.5), 0.001), Some(ball));
        assert_eq!(world.pick_body(Vec2::new(12.5, 10.0), 0.001), None);
        // Inside the bounding box, outside the circle.
        assert_eq!(world.pick_body(Vec2::new(11.8, 11.8), 0.001), None);
    }

    #[test]
    fn test_pick_follows_moving_body() {
        let mut world = world();
        let ball = world.create_ball(Vec2::new(10.0, 10.0), 2.0, MATERIAL);
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let now = world.translation(ball).unwrap();
        assert!(now.y > 12.0);
        assert_eq!(world.pick_body(now, 0.001), Some(ball));
        assert_eq!(world.pick_body(Vec2::new(10.0, 10.0), 0.001), None);
    }

    #[test]
    fn test_step_caps_speed() {
        let mut world = PhysicsWorld::new(StepParams {
            gravity: Vec2::ZERO,
            velocity_iterations: 8,
            position_iterations: 8,
            max_translation: 2.0,
        });
        let ball = world.create_ball(Vec2::ZERO, 1.0, MATERIAL);
        let mass = world.mass(ball).unwrap();
        world.apply_impulse_at_point(ball, Vec2::new(500.0 * mass, 0.0), Vec2::ZERO);

        world.step(1.0 / 60.0);
        let speed = world.linear_velocity(ball).unwrap().length();
        assert!(speed <= 120.0 + 1e-3, "speed {speed} above the cap");
        assert!(speed > 100.0);
    }

    #[test]
    fn test_pick_skips_static_bodies() {
        let mut world = world();
        world.create_static_box(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert_eq!(world.pick_body(Vec2::ZERO, 0.001), None);
    }

    #[test]
    fn test_ball_falls_under_gravity() {
        let mut world = world();
        let ball = world.create_ball(Vec2::new(0.0, 0.0), 1.0, MATERIAL);
        for _ in 0..30 {
            world.step(1.0 / 60.0);
        }
        let y = world.translation(ball).unwrap().y;
        assert!(y > 0.8, "ball should fall down the screen, got y = {y}");
    }

    #[test]
    fn test_mass_scales_with_density() {
        let mut world = world();
        let light = world.create_ball(Vec2::ZERO, 1.0, MATERIAL);
        let heavy = world.create_ball(
            Vec2::new(10.0, 0.0),
            1.0,
            BallMaterial { density: 2.0, ..MATERIAL },
        );
        let light_mass = world.mass(light).unwrap();
        let heavy_mass = world.mass(heavy).unwrap();
        assert!(light_mass > 0.0);
        assert!((heavy_mass - 2.0 * light_mass).abs() < 1e-3);
    }

    #[test]
    fn test_drag_joint_lifecycle() {
        let mut world = world();
        let anchor = world.create_static_box(Vec2::new(0.0, 50.0), Vec2::new(100.0, 10.0));
        let ball = world.create_ball(Vec2::new(0.0, 0.0), 1.0, MATERIAL);
        let params = DragJointParams {
            max_force: 1000.0,
            frequency_hz: 5.0,
            damping_ratio: 0.7,
        };

        let joint = world
            .create_drag_joint(anchor, ball, Vec2::new(0.5, 0.0), params)
            .unwrap();
        assert!(world.contains_joint(joint));
        assert!((world.drag_target(joint).unwrap() - Vec2::new(0.5, 0.0)).length() < 1e-4);

        assert!(world.set_drag_target(joint, Vec2::new(5.0, -3.0)));
        assert!((world.drag_target(joint).unwrap() - Vec2::new(5.0, -3.0)).length() < 1e-4);

        assert!(world.remove_joint(joint));
        assert!(!world.contains_joint(joint));
        assert!(!world.set_drag_target(joint, Vec2::ZERO));
        assert!(!world.remove_joint(joint));
    }

    #[test]
    fn test_drag_pulls_body_towards_target() {
        let mut world = PhysicsWorld::new(StepParams {
            gravity: Vec2::ZERO,
            velocity_iterations: 8,
            position_iterations: 8,
            max_translation: 2.0,
        });
        let anchor = world.create_static_box(Vec2::new(0.0, 100.0), Vec2::new(10.0, 10.0));
        let ball = world.create_ball(Vec2::new(0.0, 0.0), 1.0, MATERIAL);
        let mass = world.mass(ball).unwrap();
        let params = DragJointParams {
            max_force: 1000.0 * mass,
            frequency_hz: 5.0,
            damping_ratio: 0.7,
        };
        let joint = world.create_drag_joint(anchor, ball, Vec2::ZERO, params).unwrap();
        world.set_drag_target(joint, Vec2::new(10.0, 0.0));

        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
        let x = world.translation(ball).unwrap().x;
        assert!(x > 5.0, "ball should follow the drag target, got x = {x}");
    }

    #[test]
    fn test_removing_body_removes_its_joints() {
        let mut world = world();
        let a = world.create_ball(Vec2::ZERO, 1.0, MATERIAL);
        let b = world.create_ball(Vec2::new(5.0, 0.0), 1.0, MATERIAL);
        let spring = world.create_spring(a, b, 5.0, 1.0, 0.1);
        assert_eq!(world.joint_count(), 1);

        assert!(world.remove_body(b));
        assert!(!world.contains_joint(spring));
        assert!(!world.contains_body(b));
        assert_eq!(world.pick_body(Vec2::new(5.0, 0.0), 0.001), None);
    }

    #[test]
    fn test_clear_forces_drops_pending_force() {
        let mut world = PhysicsWorld::new(StepParams {
            gravity: Vec2::ZERO,
            velocity_iterations: 8,
            position_iterations: 8,
            max_translation: 2.0,
        });
        let ball = world.create_ball(Vec2::ZERO, 1.0, MATERIAL);
        world.add_force_at_point(ball, Vec2::new(100.0, 0.0), Vec2::ZERO);
        world.clear_forces();
        world.step(1.0 / 60.0);
        assert_eq!(world.linear_velocity(ball).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_impulse_changes_velocity() {
        let mut world = PhysicsWorld::new(StepParams {
            gravity: Vec2::ZERO,
            velocity_iterations: 8,
            position_iterations: 8,
            max_translation: 2.0,
        });
        let ball = world.create_ball(Vec2::ZERO, 1.0, MATERIAL);
        world.apply_impulse_at_point(ball, Vec2::new(1.0, 0.0), Vec2::ZERO);
        assert!(world.linear_velocity(ball).unwrap().x > 0.0);
    }

    #[test]
    fn test_set_translation_teleports() {
        let mut world = world();
        let ball = world.create_ball(Vec2::ZERO, 1.0, MATERIAL);
        world.set_translation(ball, Vec2::new(30.0, 40.0));
        assert_eq!(world.translation(ball), Some(Vec2::new(30.0, 40.0)));
    }
}
