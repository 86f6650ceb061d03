//! Drawing surface abstraction.
//!
//! The game loop only talks to a [`Canvas`]: it clears, draws rectangles,
//! sprites and lines in world coordinates, maps pointer pixels to world
//! coordinates through the active [`View`], and presents. [`GpuCanvas`]
//! implements it on a `winit` window with `wgpu`; tests use a recording
//! canvas.

mod debug;
mod gpu;
mod shader;
mod view;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use debug::{hsla_to_color, CanvasDebugBackend};
pub use gpu::GpuCanvas;
pub use shader::SPRITE_SHADER;
pub use view::View;

use crate::error::RenderError;
use crate::textures::TextureData;

/// RGBA colour with 8 bits per channel, in sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as linear floats, ready to be multiplied in a shader that
    /// writes to an sRGB target.
    pub fn to_linear(self) -> [f32; 4] {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [channel(self.r), channel(self.g), channel(self.b), self.a as f32 / 255.0]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Handle to a texture registered with a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    /// The 1x1 white texture every canvas provides for flat fills.
    pub const WHITE: TextureId = TextureId(0);
}

/// Axis-aligned filled rectangle, positioned by its top-left corner
/// (world y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl RectShape {
    pub fn new(position: Vec2, size: Vec2, color: Color) -> Self {
        Self { position, size, color }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

/// Textured quad centred on `position`, rotated by `rotation` radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    pub position: Vec2,
    /// Size in world units.
    pub size: Vec2,
    pub rotation: f32,
    pub tint: Color,
}

impl Sprite {
    pub fn new(texture: TextureId, size: Vec2) -> Self {
        Self {
            texture,
            position: Vec2::ZERO,
            size,
            rotation: 0.0,
            tint: Color::WHITE,
        }
    }
}

/// The render surface the game loop draws onto.
pub trait Canvas {
    /// Pixel size of the drawable area.
    fn size(&self) -> (u32, u32);

    /// Active camera.
    fn view(&self) -> View;

    fn set_view(&mut self, view: View);

    /// Upload a texture for later sprite draws.
    fn register_texture(&mut self, texture: &TextureData) -> TextureId;

    fn clear(&mut self, color: Color);

    fn draw_rect(&mut self, rect: &RectShape);

    fn draw_sprite(&mut self, sprite: &Sprite);

    /// Draw a line `thickness` world units wide.
    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    /// Submit everything drawn since the last `clear`.
    fn present(&mut self) -> Result<(), RenderError>;

    /// Map a pixel coordinate to world space through the active view.
    fn map_pixel_to_coords(&self, pixel: Vec2) -> Vec2 {
        let (width, height) = self.size();
        self.view().pixel_to_world(pixel, Vec2::new(width as f32, height as f32))
    }
}
