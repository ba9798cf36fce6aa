//! Point-sprite image loading.
//!
//! The sprite is a small RGBA image applied to every particle. It normally
//! comes from a PNG or JPEG asset; when the asset is missing the demo falls
//! back to a procedurally generated soft radial dot so it still runs from a
//! bare checkout.

use std::path::Path;

use crate::error::TextureError;

/// RGBA pixel data for the point-sprite texture.
#[derive(Debug, Clone)]
pub struct SpriteImage {
    /// Raw RGBA pixels, `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SpriteImage {
    /// Load a sprite from a PNG or JPEG file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Procedural sprite: a white dot whose alpha falls off linearly from
    /// the center to the edge.
    pub fn radial(size: u32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let half = (size.max(2) - 1) as f32 * 0.5;
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 - half) / half;
                let dy = (y as f32 - half) / half;
                let dist = (dx * dx + dy * dy).sqrt().min(1.0);
                let alpha = ((1.0 - dist) * 255.0).round() as u8;
                data.extend_from_slice(&[255, 255, 255, alpha]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Load from `path`, falling back to [`radial`](Self::radial) when the
    /// asset is unavailable.
    pub fn load_or_radial<P: AsRef<Path>>(path: P, fallback_size: u32) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(sprite) => sprite,
            Err(e) => {
                eprintln!(
                    "[whoosh] sprite '{}' unavailable ({}); using procedural sprite",
                    path.as_ref().display(),
                    e
                );
                Self::radial(fallback_size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_dimensions() {
        let sprite = SpriteImage::radial(16);
        assert_eq!(sprite.width, 16);
        assert_eq!(sprite.height, 16);
        assert_eq!(sprite.data.len(), 16 * 16 * 4);
    }

    #[test]
    fn test_radial_alpha_falloff() {
        let sprite = SpriteImage::radial(17);
        let alpha_at = |x: u32, y: u32| sprite.data[((y * 17 + x) * 4 + 3) as usize];

        // Opaque in the middle, transparent in the corners.
        assert_eq!(alpha_at(8, 8), 255);
        assert_eq!(alpha_at(0, 0), 0);
        assert_eq!(alpha_at(16, 16), 0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let sprite = SpriteImage::load_or_radial("does/not/exist.png", 8);
        assert_eq!(sprite.width, 8);
    }
}
