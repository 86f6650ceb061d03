//! Shared helpers for integration tests.

#![allow(dead_code)]

use spring_balls::prelude::*;
use spring_balls::RenderError;

/// A draw call captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Rect(RectShape),
    Sprite(Sprite),
    Line { from: Vec2, to: Vec2, color: Color },
}

/// Canvas that records draw calls instead of rendering them.
#[derive(Debug)]
pub struct RecordingCanvas {
    pub width: u32,
    pub height: u32,
    pub view: View,
    pub textures: Vec<(u32, u32)>,
    /// Calls since the last `clear`.
    pub calls: Vec<DrawCall>,
    pub presented: usize,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            view: View::default(),
            // Slot 0 is the white texture, as on the GPU canvas.
            textures: vec![(1, 1)],
            calls: Vec::new(),
            presented: 0,
        }
    }

    pub fn rects(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Rect(_))).count()
    }

    pub fn sprites(&self) -> Vec<Sprite> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Sprite(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Line { .. })).count()
    }

    /// Pixel that maps to the world point `world` through the current view.
    pub fn pixel_at(&self, world: Vec2) -> Vec2 {
        self.view
            .world_to_pixel(world, Vec2::new(self.width as f32, self.height as f32))
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn view(&self) -> View {
        self.view
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
    }

    fn register_texture(&mut self, texture: &TextureData) -> TextureId {
        self.textures.push((texture.width, texture.height));
        TextureId(self.textures.len() as u32 - 1)
    }

    fn clear(&mut self, color: Color) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_rect(&mut self, rect: &RectShape) {
        self.calls.push(DrawCall::Rect(*rect));
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.calls.push(DrawCall::Sprite(*sprite));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, _thickness: f32, color: Color) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.presented += 1;
        Ok(())
    }
}

/// 64 px ball image: radius 3.2 world units at the default scale.
pub fn ball_texture() -> TextureData {
    TextureData::disc(64, [255, 255, 255, 255])
}

pub fn new_game(config: DemoConfig) -> (Game, RecordingCanvas) {
    let mut canvas = RecordingCanvas::new(config.window.width, config.window.height);
    let game = Game::with_texture(config, ball_texture(), &mut canvas);
    (game, canvas)
}

/// Default game with gravity turned off, so the balls stay where they spawn.
pub fn still_game() -> (Game, RecordingCanvas) {
    new_game(DemoConfig::default().with_gravity(0.0, 0.0))
}

/// A frame with no input.
pub const NO_INPUT: [InputEvent; 0] = [];
