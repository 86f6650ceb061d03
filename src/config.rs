//! Demo configuration.
//!
//! Every constant the scene is built from lives here. The defaults reproduce
//! the classic setup: an 800x600 window looking at a 100x100 world box, two
//! balls joined by a soft spring, gravity pointing down the screen.
//!
//! # Example
//!
//! ```ignore
//! use spring_balls::DemoConfig;
//!
//! let config = DemoConfig::default()
//!     .with_window_size(1024, 768)
//!     .with_gravity(0.0, 20.0)
//!     .with_debug_draw(true);
//! ```
//!
//! Overrides can also come from a JSON file; missing fields keep their
//! defaults:
//!
//! ```json
//! { "window": { "fps": 120 }, "balls": { "restitution": 0.9 } }
//! ```

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::{Color, View};

/// Window size, title and frame-rate cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Frame-rate cap. The physics step is derived from it.
    pub fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Spring Balls".to_string(),
            fps: 60,
        }
    }
}

/// World-space camera: how much of the world is visible and where.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub size: Vec2,
    pub center: Vec2,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(100.0, 100.0),
            center: Vec2::new(50.0, 50.0),
        }
    }
}

/// Physics stepping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity in world units per second squared. Positive y points down.
    pub gravity: Vec2,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    /// Furthest a body may travel in one step, in world units.
    pub max_translation: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.8),
            velocity_iterations: 8,
            position_iterations: 8,
            max_translation: 2.0,
        }
    }
}

/// The static box the balls bounce in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Full thickness of each physics wall. Walls are centred on the box edges,
    /// so only half of it is inside the box.
    pub wall_thickness: f32,
    /// Thickness of the coloured border drawn inside the box.
    pub border: f32,
    pub ground_color: Color,
    pub roof_color: Color,
    pub left_wall_color: Color,
    pub right_wall_color: Color,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            wall_thickness: 10.0,
            border: 5.0,
            ground_color: Color::RED,
            roof_color: Color::BLUE,
            left_wall_color: Color::GREEN,
            right_wall_color: Color::YELLOW,
        }
    }
}

/// Ball appearance and material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Image used for both balls. Its width sizes the collision circle.
    pub texture: PathBuf,
    /// Image pixels per world unit.
    pub pixels_per_unit: f32,
    pub density: f32,
    pub friction: f32,
    /// Combined with the walls using the max rule, so values above 1 gain energy.
    pub restitution: f32,
    pub first_spawn: Vec2,
    pub second_spawn: Vec2,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            texture: PathBuf::from("assets/ball.png"),
            pixels_per_unit: 10.0,
            density: 1.9,
            friction: 0.1,
            restitution: 1.8,
            first_spawn: Vec2::new(50.0, 50.0),
            second_spawn: Vec2::new(60.0, 50.0),
        }
    }
}

/// Spring joining the two balls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            rest_length: 10.0,
            stiffness: 1.9,
            damping: 0.2,
        }
    }
}

/// Mouse drag tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Maximum drag force per unit of the grabbed body's mass.
    pub force_per_mass: f32,
    /// Half-extent of the box queried around the pointer.
    pub query_epsilon: f32,
    /// Response frequency of the drag joint.
    pub frequency_hz: f32,
    pub damping_ratio: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            force_per_mass: 1000.0,
            query_epsilon: 0.001,
            frequency_hz: 5.0,
            damping_ratio: 0.7,
        }
    }
}

/// Complete demo configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub view: ViewConfig,
    pub physics: PhysicsConfig,
    pub arena: ArenaConfig,
    pub balls: BallConfig,
    pub spring: SpringConfig,
    pub drag: DragConfig,
    pub clear_color: Color,
    /// Draw collider outlines and joints over the scene.
    pub debug_draw: bool,
}

impl DemoConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: DemoConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// The camera described by [`ViewConfig`].
    pub fn camera(&self) -> View {
        View::new(self.view.size, self.view.center)
    }

    /// Set the window size in pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Set the frame-rate cap (and with it the physics step).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.window.fps = fps;
        self
    }

    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.physics.gravity = Vec2::new(x, y);
        self
    }

    /// Set the image used for the balls.
    pub fn with_ball_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.balls.texture = path.into();
        self
    }

    pub fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug_draw = enabled;
        self
    }

    /// Check that every value can build a working scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window size must be non-zero"));
        }
        if self.window.fps == 0 {
            return Err(invalid("fps must be non-zero"));
        }
        if self.view.size.x <= 0.0 || self.view.size.y <= 0.0 {
            return Err(invalid("view size must be positive"));
        }
        if self.physics.velocity_iterations == 0 || self.physics.position_iterations == 0 {
            return Err(invalid("solver iteration counts must be non-zero"));
        }
        if self.physics.max_translation <= 0.0 {
            return Err(invalid("max_translation must be positive"));
        }
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 || self.arena.wall_thickness <= 0.0 {
            return Err(invalid("arena dimensions must be positive"));
        }
        if self.balls.pixels_per_unit <= 0.0 {
            return Err(invalid("pixels_per_unit must be positive"));
        }
        if self.balls.density <= 0.0 || self.balls.friction < 0.0 || self.balls.restitution < 0.0 {
            return Err(invalid("ball material must have positive density and non-negative friction/restitution"));
        }
        if self.spring.rest_length < 0.0 || self.spring.stiffness < 0.0 || self.spring.damping < 0.0 {
            return Err(invalid("spring parameters must be non-negative"));
        }
        if self.drag.force_per_mass <= 0.0 || self.drag.query_epsilon <= 0.0 || self.drag.frequency_hz <= 0.0 {
            return Err(invalid("drag parameters must be positive"));
        }
        if self.drag.damping_ratio < 0.0 {
            return Err(invalid("drag damping_ratio must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}
