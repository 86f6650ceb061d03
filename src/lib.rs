//! # spring-balls
//!
//! Two balls joined by a spring bounce around a walled box. Grab either ball
//! with the left mouse button and drag it around.
//!
//! Rigid-body simulation is done by `rapier2d`; drawing goes through `wgpu`
//! on a `winit` window. This crate wires the two together:
//!
//! - [`physics`] wraps the rapier world with the operations the demo needs.
//! - [`render`] defines the [`Canvas`](render::Canvas) the game draws onto and
//!   its GPU implementation.
//! - [`scene`] builds the box, the balls and the spring.
//! - [`drag`] is the press / move / release protocol.
//! - [`game`] runs one frame at a time against any canvas.
//! - [`app`] is the window shell.
//!
//! ## Quick Start
//!
//! ```ignore
//! use spring_balls::prelude::*;
//!
//! fn main() -> Result<(), DemoError> {
//!     spring_balls::run(DemoConfig::default().with_debug_draw(true))
//! }
//! ```
//!
//! ## Coordinates
//!
//! The world is 100 × 100 units with the origin in the top-left corner and y
//! pointing down, so gravity is `(0, 9.8)`. The view stretches it over the
//! whole window regardless of the window's pixel size.
//!
//! ## Headless use
//!
//! [`Game::frame`] takes the canvas and the frame's input explicitly, so the
//! loop can be driven without a window:
//!
//! ```ignore
//! let mut game = Game::with_texture(config, TextureData::disc(64, [255; 4]), &mut canvas);
//! game.frame(&mut canvas, [InputEvent::PointerPressed { button: MouseButton::Left, position }])?;
//! ```

pub mod app;
pub mod avatar;
pub mod config;
pub mod drag;
pub mod error;
pub mod game;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod textures;
pub mod time;

pub use app::run;
pub use avatar::Avatar;
pub use config::DemoConfig;
pub use drag::{DragController, DragState, PressOutcome};
pub use error::{ConfigError, DemoError, GpuError, RenderError, TextureError};
pub use game::{Game, LoopControl};
pub use glam::Vec2;
pub use input::{InputEvent, InputQueue, MouseButton};
pub use physics::PhysicsWorld;
pub use render::{Canvas, Color, RectShape, Sprite, TextureId, View};
pub use textures::{FilterMode, TextureData};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use spring_balls::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::DemoConfig;
    pub use crate::drag::{DragState, PressOutcome};
    pub use crate::error::DemoError;
    pub use crate::game::{Game, LoopControl};
    pub use crate::input::{InputEvent, MouseButton};
    pub use crate::render::{Canvas, Color, RectShape, Sprite, TextureId, View};
    pub use crate::textures::TextureData;
    pub use crate::Vec2;
}
