//! Texture loading for sprites.
//!
//! The demo has a single external asset, the ball image, loaded once at
//! startup. Its width decides how large the balls are, so a missing or
//! unreadable file is fatal.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use std::path::Path;

use crate::error::TextureError;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering. Good for pixel art.
    Nearest,
}

/// CPU-side RGBA8 image, ready to be registered with a canvas.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    pub filter: FilterMode,
}

impl TextureData {
    /// Create a texture from raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not `width * height * 4` bytes long.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
        }
    }

    /// Load a texture from an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| TextureError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path.to_path_buf()));
        }
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
            filter: FilterMode::Linear,
        })
    }

    /// Create a solid color texture (1x1 pixel).
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
            filter: FilterMode::Nearest,
        }
    }

    /// A `size` x `size` filled circle on a transparent background.
    pub fn disc(size: u32, color: [u8; 4]) -> Self {
        let radius = size as f32 * 0.5;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                if dx * dx + dy * dy <= radius * radius {
                    data.extend_from_slice(&color);
                } else {
                    data.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }
        Self::from_rgba(data, size, size)
    }

    /// Radius in world units of a ball drawn with this texture, assuming a
    /// square image with the ball touching its edges.
    pub fn world_radius(&self, pixels_per_unit: f32) -> f32 {
        self.width as f32 * 0.5 / pixels_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid() {
        let tex = TextureData::solid(1, 2, 3, 4);
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_disc_center_filled_corner_clear() {
        let tex = TextureData::disc(8, [255, 0, 0, 255]);
        assert_eq!(tex.data.len(), 8 * 8 * 4);
        let pixel = |x: u32, y: u32| {
            let i = ((y * 8 + x) * 4) as usize;
            &tex.data[i..i + 4]
        };
        assert_eq!(pixel(4, 4), &[255, 0, 0, 255]);
        assert_eq!(pixel(0, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_world_radius() {
        let tex = TextureData::disc(64, [255; 4]);
        assert!((tex.world_radius(10.0) - 3.2).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn test_from_rgba_size_mismatch() {
        TextureData::from_rgba(vec![0; 3], 1, 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = TextureData::from_file("no/such/ball.png").unwrap_err();
        assert!(matches!(err, TextureError::ImageLoad { .. }));
        assert!(err.to_string().contains("no/such/ball.png"));
    }

    #[test]
    fn test_load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ball.png");
        let source = TextureData::disc(16, [10, 20, 30, 255]);
        image::save_buffer(&path, &source.data, 16, 16, image::ExtendedColorType::Rgba8).unwrap();

        let loaded = TextureData::from_file(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (16, 16));
        assert_eq!(loaded.data, source.data);
    }
}
