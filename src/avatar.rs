//! Physics body ↔ sprite binding.

use glam::Vec2;

use crate::physics::{PhysicsWorld, RigidBodyHandle};
use crate::render::{Canvas, Sprite};

/// Pairs one physics body with the sprite that draws it.
///
/// The world owns the body; the avatar only holds its handle and owns the
/// sprite. [`sync`](Avatar::sync) copies the body's position and rotation
/// into the sprite as-is, without interpolation.
#[derive(Debug, Clone)]
pub struct Avatar {
    body: RigidBodyHandle,
    sprite: Sprite,
}

impl Avatar {
    pub fn new(body: RigidBodyHandle, sprite: Sprite) -> Self {
        Self { body, sprite }
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Copy the body transform into the sprite.
    pub fn sync(&mut self, world: &PhysicsWorld) {
        if let Some(position) = world.translation(self.body) {
            self.sprite.position = position;
        }
        if let Some(rotation) = world.rotation(self.body) {
            self.sprite.rotation = rotation;
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.draw_sprite(&self.sprite);
    }

    /// Current world position of the body.
    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.translation(self.body)
    }

    /// Teleport the body. Velocity is left untouched.
    pub fn set_position(&self, world: &mut PhysicsWorld, position: Vec2) {
        world.set_translation(self.body, position);
    }

    /// Apply `force` at the world point `origin` until forces are cleared.
    pub fn apply_force(&self, world: &mut PhysicsWorld, force: Vec2, origin: Vec2) {
        world.add_force_at_point(self.body, force, origin);
    }

    /// Apply `impulse` at the world point `origin`.
    pub fn apply_impulse(&self, world: &mut PhysicsWorld, impulse: Vec2, origin: Vec2) {
        world.apply_impulse_at_point(self.body, impulse, origin);
    }
}
