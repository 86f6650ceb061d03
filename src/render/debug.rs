use glam::Vec2;
use rapier2d::math::{Point, Real};
use rapier2d::pipeline::{DebugRenderBackend, DebugRenderObject};

use super::{Canvas, Color};

/// Feeds rapier's debug render pipeline into a [`Canvas`] as thin lines.
pub struct CanvasDebugBackend<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    thickness: f32,
}

impl<'a, C: Canvas + ?Sized> CanvasDebugBackend<'a, C> {
    pub fn new(canvas: &'a mut C, thickness: f32) -> Self {
        Self { canvas, thickness }
    }
}

impl<C: Canvas + ?Sized> DebugRenderBackend for CanvasDebugBackend<'_, C> {
    fn draw_line(&mut self, _object: DebugRenderObject, a: Point<Real>, b: Point<Real>, color: [f32; 4]) {
        self.canvas.draw_line(
            Vec2::new(a.x, a.y),
            Vec2::new(b.x, b.y),
            self.thickness,
            hsla_to_color(color),
        );
    }
}

/// Convert the `[hue in degrees, saturation, lightness, alpha]` colours the
/// debug renderer emits into RGBA.
pub fn hsla_to_color([h, s, l, a]: [f32; 4]) -> Color {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c * 0.5;
    let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::rgba(to_u8(r), to_u8(g), to_u8(b), (a.clamp(0.0, 1.0) * 255.0).round() as u8)
}
