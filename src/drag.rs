//! Mouse drag protocol.
//!
//! A press over a dynamic body grabs it with a drag joint anchored to a static
//! body; moves retarget the joint; a release destroys it. The selection and
//! the joint live together in [`DragState::Dragging`], so one cannot exist
//! without the other.
//!
//! All points here are world coordinates. Mapping from window pixels happens
//! in the game loop.

use glam::Vec2;

use crate::config::DragConfig;
use crate::physics::{DragJointParams, ImpulseJointHandle, PhysicsWorld, RigidBodyHandle};

/// The grabbed body and the joint pulling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDrag {
    pub body: RigidBodyHandle,
    pub joint: ImpulseJointHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Result of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A body was under the pointer and is now being dragged.
    Grabbed(RigidBodyHandle),
    /// Nothing under the pointer.
    Missed,
    /// A drag was already in progress.
    Ignored,
}

#[derive(Debug)]
pub struct DragController {
    anchor: RigidBodyHandle,
    settings: DragConfig,
    state: DragState,
}

impl DragController {
    /// Controller whose drag joints hang off `anchor`.
    pub fn new(anchor: RigidBodyHandle, settings: DragConfig) -> Self {
        Self {
            anchor,
            settings,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn selected(&self) -> Option<RigidBodyHandle> {
        match self.state {
            DragState::Dragging(drag) => Some(drag.body),
            DragState::Idle => None,
        }
    }

    pub fn joint(&self) -> Option<ImpulseJointHandle> {
        match self.state {
            DragState::Dragging(drag) => Some(drag.joint),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Try to grab the body under `point`.
    pub fn press(&mut self, world: &mut PhysicsWorld, point: Vec2) -> PressOutcome {
        if self.is_dragging() {
            tracing::debug!(x = point.x, y = point.y, "press ignored, drag in progress");
            return PressOutcome::Ignored;
        }

        let Some(body) = world.pick_body(point, self.settings.query_epsilon) else {
            return PressOutcome::Missed;
        };
        let Some(mass) = world.mass(body) else {
            return PressOutcome::Missed;
        };

        let params = DragJointParams {
            max_force: self.settings.force_per_mass * mass,
            frequency_hz: self.settings.frequency_hz,
            damping_ratio: self.settings.damping_ratio,
        };
        match world.create_drag_joint(self.anchor, body, point, params) {
            Some(joint) => {
                self.state = DragState::Dragging(ActiveDrag { body, joint });
                tracing::debug!(?body, x = point.x, y = point.y, "drag started");
                PressOutcome::Grabbed(body)
            }
            None => PressOutcome::Missed,
        }
    }

    /// Retarget the drag joint. Does nothing while idle.
    pub fn move_to(&mut self, world: &mut PhysicsWorld, point: Vec2) {
        if !self.validate(world) {
            return;
        }
        if let DragState::Dragging(drag) = self.state {
            world.set_drag_target(drag.joint, point);
        }
    }

    /// Destroy the drag joint and clear the selection. Safe to call twice.
    pub fn release(&mut self, world: &mut PhysicsWorld) {
        if !self.validate(world) {
            return;
        }
        if let DragState::Dragging(drag) = std::mem::take(&mut self.state) {
            world.remove_joint(drag.joint);
            tracing::debug!(body = ?drag.body, "drag released");
        }
    }

    /// Drop back to idle if the dragged body or its joint has disappeared.
    /// Returns whether a drag is still active.
    pub fn validate(&mut self, world: &PhysicsWorld) -> bool {
        let DragState::Dragging(drag) = self.state else {
            return false;
        };
        if world.contains_body(drag.body) && world.contains_joint(drag.joint) {
            return true;
        }
        tracing::debug!(body = ?drag.body, "dragged body or joint vanished, going idle");
        self.state = DragState::Idle;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BallMaterial, StepParams};

    struct Fixture {
        world: PhysicsWorld,
        ball: RigidBodyHandle,
        drag: DragController,
    }

    fn fixture() -> Fixture {
        let mut world = PhysicsWorld::new(StepParams {
            gravity: Vec2::new(0.0, 9.8),
            velocity_iterations: 8,
            position_iterations: 8,
            max_translation: 2.0,
        });
        let ground = world.create_static_box(Vec2::new(50.0, 100.0), Vec2::new(100.0, 10.0));
        let ball = world.create_ball(
            Vec2::new(50.0, 50.0),
            3.0,
            BallMaterial {
                density: 1.0,
                friction: 0.1,
                restitution: 0.5,
            },
        );
        Fixture {
            world,
            ball,
            drag: DragController::new(ground, DragConfig::default()),
        }
    }

    #[test]
    fn test_press_on_ball_grabs_it() {
        let mut f = fixture();
        let outcome = f.drag.press(&mut f.world, Vec2::new(51.0, 50.0));
        assert_eq!(outcome, PressOutcome::Grabbed(f.ball));
        assert_eq!(f.drag.selected(), Some(f.ball));
        assert_eq!(f.world.joint_count(), 1);
    }

    #[test]
    fn test_press_on_empty_space_misses() {
        let mut f = fixture();
        assert_eq!(f.drag.press(&mut f.world, Vec2::new(20.0, 20.0)), PressOutcome::Missed);
        assert_eq!(f.drag.state(), DragState::Idle);
        assert_eq!(f.world.joint_count(), 0);
    }

    #[test]
    fn test_press_on_ground_misses() {
        let mut f = fixture();
        assert_eq!(f.drag.press(&mut f.world, Vec2::new(50.0, 99.0)), PressOutcome::Missed);
    }

    #[test]
    fn test_move_retargets_joint() {
        let mut f = fixture();
        f.drag.press(&mut f.world, Vec2::new(50.0, 50.0));
        f.drag.move_to(&mut f.world, Vec2::new(30.0, 40.0));

        let joint = f.drag.joint().unwrap();
        let target = f.world.drag_target(joint).unwrap();
        assert!((target - Vec2::new(30.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn test_drag_pulls_body_towards_target() {
        let mut f = fixture();
        f.drag.press(&mut f.world, Vec2::new(50.0, 50.0));
        f.drag.move_to(&mut f.world, Vec2::new(30.0, 50.0));
        for _ in 0..60 {
            f.world.step(1.0 / 60.0);
        }
        assert!(f.world.translation(f.ball).unwrap().x < 45.0);
    }

    #[test]
    fn test_release_removes_joint() {
        let mut f = fixture();
        f.drag.press(&mut f.world, Vec2::new(50.0, 50.0));
        f.drag.release(&mut f.world);
        assert_eq!(f.drag.state(), DragState::Idle);
        assert_eq!(f.world.joint_count(), 0);
    }

    #[test]
    fn test_second_press_is_ignored() {
        let mut f = fixture();
        f.drag.press(&mut f.world, Vec2::new(50.0, 50.0));
        let before = f.drag.state();
        assert_eq!(f.drag.press(&mut f.world, Vec2::new(50.0, 50.0)), PressOutcome::Ignored);
        assert_eq!(f.drag.state(), before);
        assert_eq!(f.world.joint_count(), 1);
    }

    #[test]
    fn test_removed_body_drops_to_idle() {
        let mut f = fixture();
        f.drag.press(&mut f.world, Vec2::new(50.0, 50.0));
        f.world.remove_body(f.ball);
        assert!(!f.drag.validate(&f.world));
        assert_eq!(f.drag.state(), DragState::Idle);
        f.drag.release(&mut f.world);
        assert_eq!(f.world.joint_count(), 0);
    }
}
