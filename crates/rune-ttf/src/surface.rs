use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::color::Color;
use crate::error::{Result, TtfError};

/// Number of entries in an indexed surface's palette.
pub const PALETTE_SIZE: usize = 256;

/// Pixel storage of a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One byte per pixel, an index into a 256-entry palette.
    Indexed8,
    /// Four bytes per pixel, straight (non-premultiplied) RGBA.
    Rgba32,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Indexed8 => 1,
            PixelFormat::Rgba32 => 4,
        }
    }
}

/// Pixel surface produced by a render call. The caller owns it.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    format: PixelFormat,
    /// Row-major, tightly packed (pitch = width * bytes per pixel).
    pixels: Vec<u8>,
    /// Present for `Indexed8`, always `PALETTE_SIZE` entries.
    palette: Option<Vec<Color>>,
    /// Palette index treated as fully transparent.
    color_key: Option<u8>,
}

/// Largest pixel buffer a surface may hold, in bytes.
pub(crate) const MAX_SURFACE_BYTES: u64 = i32::MAX as u64;

const OUT_OF_MEMORY: &str = "Out of memory";

/// Byte length of a `width` x `height` buffer, or an error when it would
/// exceed [`MAX_SURFACE_BYTES`].
pub(crate) fn buffer_len(
    width: u64,
    height: u64,
    bytes_per_pixel: u64,
) -> std::result::Result<usize, String> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(bytes_per_pixel))
        .filter(|&n| n <= MAX_SURFACE_BYTES)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| OUT_OF_MEMORY.to_string())
}

/// Zero-filled buffer of `len` bytes. A refused allocation is an error
/// rather than an abort.
pub(crate) fn zeroed(len: usize) -> std::result::Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| OUT_OF_MEMORY.to_string())?;
    buf.resize(len, 0);
    Ok(buf)
}

impl Surface {
    fn with_pixels(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Self {
        let palette = match format {
            PixelFormat::Indexed8 => Some(vec![Color::BLACK; PALETTE_SIZE]),
            PixelFormat::Rgba32 => None,
        };
        Self {
            width,
            height,
            format,
            pixels,
            palette,
            color_key: None,
        }
    }

    /// Indexed surface filled with index 0 and an all-black palette.
    pub fn new_indexed(width: u32, height: u32) -> Self {
        let pixels = vec![0; width as usize * height as usize];
        Self::with_pixels(width, height, PixelFormat::Indexed8, pixels)
    }

    /// Fully transparent RGBA surface.
    pub fn new_rgba(width: u32, height: u32) -> Self {
        let pixels = vec![0; width as usize * height as usize * 4];
        Self::with_pixels(width, height, PixelFormat::Rgba32, pixels)
    }

    /// Like [`Surface::new_indexed`] / [`Surface::new_rgba`], but fails with
    /// a render error when the buffer is too large to allocate.
    pub(crate) fn try_new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = buffer_len(
            width.into(),
            height.into(),
            format.bytes_per_pixel() as u64,
        )
        .map_err(TtfError::Render)?;
        let pixels = zeroed(len).map_err(TtfError::Render)?;
        Ok(Self::with_pixels(width, height, format, pixels))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn palette(&self) -> Option<&[Color]> {
        self.palette.as_deref()
    }

    /// Overwrite palette entries starting at `first`.
    ///
    /// Returns `false` when the surface has no palette or the range runs
    /// past the end; entries that fit are still written.
    pub fn set_colors(&mut self, colors: &[Color], first: usize) -> bool {
        let Some(palette) = self.palette.as_mut() else {
            return false;
        };
        let mut complete = true;
        for (i, color) in colors.iter().enumerate() {
            match palette.get_mut(first + i) {
                Some(slot) => *slot = *color,
                None => complete = false,
            }
        }
        complete
    }

    pub fn color_key(&self) -> Option<u8> {
        self.color_key
    }

    /// Set or remove the transparent palette index. Ignored on RGBA surfaces.
    pub fn set_color_key(&mut self, key: Option<u8>) {
        if self.format == PixelFormat::Indexed8 {
            self.color_key = key;
        }
    }

    /// True when every pixel has full alpha.
    pub fn is_opaque(&self) -> bool {
        match self.format {
            PixelFormat::Indexed8 => match self.color_key {
                None => true,
                Some(key) => !self.pixels.contains(&key),
            },
            PixelFormat::Rgba32 => self.pixels.chunks_exact(4).all(|px| px[3] == 255),
        }
    }

    /// Straight RGBA value of the pixel at (x, y), or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.width as usize + x as usize;
        match self.format {
            PixelFormat::Indexed8 => {
                let index = self.pixels[i];
                let c = self.palette.as_ref()?[index as usize];
                let alpha = if self.color_key == Some(index) { 0 } else { 255 };
                Some([c.r, c.g, c.b, alpha])
            }
            PixelFormat::Rgba32 => {
                let p = &self.pixels[i * 4..i * 4 + 4];
                Some([p[0], p[1], p[2], p[3]])
            }
        }
    }

    /// Expand to an RGBA image, resolving palette and color key.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.pixel(x, y).unwrap_or([0, 0, 0, 0]))
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::debug!(
            "saving {}x{} surface to {}",
            self.width,
            self.height,
            path.display()
        );
        self.to_rgba_image()
            .save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
