use glam::{Mat4, Vec2};

/// 2D camera: a `size` wide window onto the world centred on `center`.
///
/// The view is stretched to fill the whole surface regardless of its pixel
/// size, and world y grows downwards like screen y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub size: Vec2,
    pub center: Vec2,
}

impl View {
    pub fn new(size: Vec2, center: Vec2) -> Self {
        Self { size, center }
    }

    /// Top-left world corner of the visible area.
    pub fn top_left(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    /// Map a pixel on a surface of `surface_size` pixels to world space.
    pub fn pixel_to_world(&self, pixel: Vec2, surface_size: Vec2) -> Vec2 {
        let normalized = pixel / surface_size.max(Vec2::ONE);
        self.top_left() + normalized * self.size
    }

    /// Map a world point to a pixel on a surface of `surface_size` pixels.
    pub fn world_to_pixel(&self, world: Vec2, surface_size: Vec2) -> Vec2 {
        (world - self.top_left()) / self.size * surface_size
    }

    /// Orthographic projection from world space to clip space.
    pub fn projection(&self) -> Mat4 {
        let half = self.size * 0.5;
        Mat4::orthographic_rh(
            self.center.x - half.x,
            self.center.x + half.x,
            // y down: the bottom edge of the screen has the larger world y
            self.center.y + half.y,
            self.center.y - half.y,
            -1.0,
            1.0,
        )
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 50.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_pixel_corners_map_to_view_edges() {
        let view = View::default();
        assert_eq!(view.pixel_to_world(Vec2::ZERO, SURFACE), Vec2::ZERO);
        assert_eq!(view.pixel_to_world(SURFACE, SURFACE), Vec2::new(100.0, 100.0));
        assert_eq!(view.pixel_to_world(SURFACE * 0.5, SURFACE), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_non_square_surface_stretches() {
        let view = View::default();
        let world = view.pixel_to_world(Vec2::new(80.0, 60.0), SURFACE);
        assert!((world - Vec2::new(10.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_world_to_pixel_inverts() {
        let view = View::new(Vec2::new(40.0, 20.0), Vec2::new(-5.0, 3.0));
        let pixel = Vec2::new(123.0, 456.0);
        let world = view.pixel_to_world(pixel, SURFACE);
        let back = view.world_to_pixel(world, SURFACE);
        assert!((back - pixel).length() < 1e-3);
    }

    #[test]
    fn test_projection_flips_y() {
        let proj = View::default().projection();
        let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let bottom_right = proj * Vec4::new(100.0, 100.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < 1e-5);
        assert!((top_left.y - 1.0).abs() < 1e-5);
        assert!((bottom_right.x - 1.0).abs() < 1e-5);
        assert!((bottom_right.y + 1.0).abs() < 1e-5);
    }
}
