//! The in-memory raster type shared by every edit operation.
//!
//! A [`Raster`] is an immutable-by-convention RGBA pixel buffer plus its
//! native dimensions. Edits never mutate a raster in place; every transform
//! produces a new one and the session decides which handle is current.
//!
//! RGBA (4 bytes per pixel) rather than RGB because rotation fills the
//! expanded canvas with transparency, and the photometric operations must
//! carry alpha through untouched.

/// A raster image with RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Image width in native pixels.
    pub width: u32,
    /// Image height in native pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Number of channels per pixel (RGBA).
    pub const CHANNELS: usize = 4;

    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * Self::CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a fully transparent raster of the given dimensions.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * Self::CHANNELS],
        }
    }

    /// Create a Raster from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * Self::CHANNELS
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
