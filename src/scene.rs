//! Scene construction: the walled box, the two balls and the spring.

use glam::Vec2;

use crate::avatar::Avatar;
use crate::config::{ArenaConfig, DemoConfig};
use crate::physics::{BallMaterial, ImpulseJointHandle, PhysicsWorld, RigidBodyHandle};
use crate::render::{Canvas, RectShape, Sprite, TextureId};
use crate::textures::TextureData;

/// Static bodies enclosing the play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub ground: RigidBodyHandle,
    pub roof: RigidBodyHandle,
    pub left: RigidBodyHandle,
    pub right: RigidBodyHandle,
}

/// Everything the game loop draws or drags.
#[derive(Debug)]
pub struct Scene {
    walls: Walls,
    borders: [RectShape; 4],
    balls: [Avatar; 2],
    spring: ImpulseJointHandle,
}

impl Scene {
    /// Create the scene's bodies in `world`.
    ///
    /// `ball_texture` is the image already registered as `texture`; its pixel
    /// width and the configured pixels-per-unit give the ball radius.
    pub fn build(world: &mut PhysicsWorld, config: &DemoConfig, texture: TextureId, ball_texture: &TextureData) -> Self {
        let walls = build_walls(world, &config.arena);

        let radius = ball_texture.world_radius(config.balls.pixels_per_unit);
        let material = BallMaterial {
            density: config.balls.density,
            friction: config.balls.friction,
            restitution: config.balls.restitution,
        };
        let spawn_ball = |world: &mut PhysicsWorld, at: Vec2| {
            let body = world.create_ball(at, radius, material);
            let mut sprite = Sprite::new(texture, Vec2::splat(radius * 2.0));
            sprite.position = at;
            Avatar::new(body, sprite)
        };
        let first = spawn_ball(world, config.balls.first_spawn);
        let second = spawn_ball(world, config.balls.second_spawn);

        let spring = world.create_spring(
            first.body(),
            second.body(),
            config.spring.rest_length,
            config.spring.stiffness,
            config.spring.damping,
        );

        tracing::info!(
            radius,
            bodies = world.body_count(),
            joints = world.joint_count(),
            "scene built"
        );

        Self {
            walls,
            borders: border_rects(&config.arena),
            balls: [first, second],
            spring,
        }
    }

    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    /// Body drag joints are anchored to.
    pub fn anchor(&self) -> RigidBodyHandle {
        self.walls.ground
    }

    pub fn borders(&self) -> &[RectShape; 4] {
        &self.borders
    }

    pub fn balls(&self) -> &[Avatar; 2] {
        &self.balls
    }

    pub fn spring(&self) -> ImpulseJointHandle {
        self.spring
    }

    pub fn sync(&mut self, world: &PhysicsWorld) {
        for ball in &mut self.balls {
            ball.sync(world);
        }
    }

    /// Borders first, then the balls on top.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for rect in &self.borders {
            canvas.draw_rect(rect);
        }
        for ball in &self.balls {
            ball.draw(canvas);
        }
    }
}

// Each wall is centred on an edge of the box.
fn build_walls(world: &mut PhysicsWorld, arena: &ArenaConfig) -> Walls {
    let (w, h, t) = (arena.width, arena.height, arena.wall_thickness);
    Walls {
        ground: world.create_static_box(Vec2::new(w * 0.5, h), Vec2::new(w, t)),
        roof: world.create_static_box(Vec2::new(w * 0.5, 0.0), Vec2::new(w, t)),
        left: world.create_static_box(Vec2::new(0.0, h * 0.5), Vec2::new(t, h)),
        right: world.create_static_box(Vec2::new(w, h * 0.5), Vec2::new(t, h)),
    }
}

/// Coloured strips along the inside of each wall: ground, roof, left, right.
pub fn border_rects(arena: &ArenaConfig) -> [RectShape; 4] {
    let (w, h, b) = (arena.width, arena.height, arena.border);
    [
        RectShape::new(Vec2::new(0.0, h - b), Vec2::new(w, b), arena.ground_color),
        RectShape::new(Vec2::ZERO, Vec2::new(w, b), arena.roof_color),
        RectShape::new(Vec2::ZERO, Vec2::new(b, h), arena.left_wall_color),
        RectShape::new(Vec2::new(w - b, 0.0), Vec2::new(b, h), arena.right_wall_color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::StepParams;
    use crate::render::Color;

    fn build() -> (PhysicsWorld, Scene) {
        let config = DemoConfig::default();
        let mut world = PhysicsWorld::new(StepParams {
            gravity: config.physics.gravity,
            velocity_iterations: config.physics.velocity_iterations,
            position_iterations: config.physics.position_iterations,
            max_translation: config.physics.max_translation,
        });
        let texture = TextureData::disc(64, [255, 255, 255, 255]);
        let scene = Scene::build(&mut world, &config, TextureId(1), &texture);
        (world, scene)
    }

    #[test]
    fn test_scene_body_and_joint_counts() {
        let (world, scene) = build();
        assert_eq!(world.body_count(), 6);
        assert_eq!(world.joint_count(), 1);
        assert!(world.contains_joint(scene.spring()));
        assert_eq!(scene.anchor(), scene.walls().ground);
    }

    #[test]
    fn test_balls_sized_from_texture() {
        let (world, scene) = build();
        // 64 px at 10 px per unit is a 3.2 unit radius.
        for ball in scene.balls() {
            assert!((ball.sprite().size.x - 6.4).abs() < 1e-5);
            assert!(world.mass(ball.body()).unwrap() > 0.0);
        }
        assert_eq!(scene.balls()[0].sprite().position, Vec2::new(50.0, 50.0));
        assert_eq!(scene.balls()[1].sprite().position, Vec2::new(60.0, 50.0));
    }

    #[test]
    fn test_border_layout() {
        let borders = border_rects(&ArenaConfig::default());
        assert_eq!(borders[0], RectShape::new(Vec2::new(0.0, 95.0), Vec2::new(100.0, 5.0), Color::RED));
        assert_eq!(borders[1], RectShape::new(Vec2::ZERO, Vec2::new(100.0, 5.0), Color::BLUE));
        assert_eq!(borders[2], RectShape::new(Vec2::ZERO, Vec2::new(5.0, 100.0), Color::GREEN));
        assert_eq!(borders[3], RectShape::new(Vec2::new(95.0, 0.0), Vec2::new(5.0, 100.0), Color::YELLOW));
    }

    #[test]
    fn test_walls_are_not_pickable() {
        let (mut world, _scene) = build();
        assert_eq!(world.pick_body(Vec2::new(50.0, 99.0), 0.001), None);
        assert_eq!(world.pick_body(Vec2::new(1.0, 50.0), 0.001), None);
    }

    #[test]
    fn test_balls_stay_inside_box() {
        let (mut world, mut scene) = build();
        // One minute at 60 fps. Bouncy contacts must not pump the balls
        // through the walls.
        for frame in 0..3600 {
            world.step(1.0 / 60.0);
            world.clear_forces();
            scene.sync(&world);
            for ball in scene.balls() {
                let p = ball.sprite().position;
                assert!(p.x > 0.0 && p.x < 100.0, "x escaped at frame {frame}: {p}");
                assert!(p.y > 0.0 && p.y < 100.0, "y escaped at frame {frame}: {p}");
            }
        }
    }
}
