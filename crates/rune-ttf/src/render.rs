//! Render policy: which surface a render call produces for a given
//! antialias flag and background.

use crate::color::Color;
use crate::error::Result;
use crate::surface::{PALETTE_SIZE, PixelFormat, Surface};

/// Coverage at or above this value is "ink" when antialiasing is off.
pub(crate) const SOLID_THRESHOLD: u8 = 0x80;

/// Surface-producing operation chosen for a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Paletted, no antialiasing. Index 0 is the background slot.
    Solid,
    /// Paletted, antialiased as a 256-step gradient between two colors.
    Shaded,
    /// RGBA, foreground color with coverage in alpha.
    Blended,
}

impl RenderMode {
    pub fn select(antialias: bool, background: Option<Color>) -> Self {
        match (antialias, background) {
            (true, None) => RenderMode::Blended,
            (true, Some(_)) => RenderMode::Shaded,
            (false, _) => RenderMode::Solid,
        }
    }
}

/// Inputs of a render call besides the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub antialias: bool,
    pub foreground: Color,
    /// `None` leaves the background transparent.
    pub background: Option<Color>,
}

impl RenderOptions {
    pub fn new(antialias: bool, foreground: Color) -> Self {
        Self {
            antialias,
            foreground,
            background: None,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn mode(&self) -> RenderMode {
        RenderMode::select(self.antialias, self.background)
    }
}

/// 8-bit glyph coverage for a whole line of text, as produced by the
/// rasterizer.
#[derive(Debug, Clone)]
pub(crate) struct Coverage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Build the surface for `options` from rasterized coverage.
pub(crate) fn compose(coverage: &Coverage, options: &RenderOptions) -> Result<Surface> {
    let fg = options.foreground;
    match (options.mode(), options.background) {
        (RenderMode::Blended, _) => blended(coverage, fg),
        (RenderMode::Shaded, Some(bg)) => shaded(coverage, fg, bg),
        (RenderMode::Shaded, None) => shaded(coverage, fg, fg.inverted()),
        (RenderMode::Solid, None) => solid(coverage, fg),
        (RenderMode::Solid, Some(bg)) => {
            let mut surface = solid(coverage, fg)?;
            surface.set_colors(&[bg], 0);
            surface.set_color_key(None);
            Ok(surface)
        }
    }
}

/// Index 0 is transparent (color key) and holds the inverted foreground,
/// index 1 is the foreground.
fn solid(coverage: &Coverage, fg: Color) -> Result<Surface> {
    let mut surface = Surface::try_new(coverage.width, coverage.height, PixelFormat::Indexed8)?;
    surface.set_colors(&[fg.inverted(), fg], 0);
    surface.set_color_key(Some(0));
    for (dst, &c) in surface.pixels_mut().iter_mut().zip(&coverage.data) {
        *dst = u8::from(c >= SOLID_THRESHOLD);
    }
    Ok(surface)
}

fn shaded(coverage: &Coverage, fg: Color, bg: Color) -> Result<Surface> {
    let mut surface = Surface::try_new(coverage.width, coverage.height, PixelFormat::Indexed8)?;
    let ramp: Vec<Color> = (0..PALETTE_SIZE).map(|i| bg.lerp(fg, i as u8)).collect();
    surface.set_colors(&ramp, 0);
    surface.pixels_mut().copy_from_slice(&coverage.data);
    Ok(surface)
}

fn blended(coverage: &Coverage, fg: Color) -> Result<Surface> {
    let mut surface = Surface::try_new(coverage.width, coverage.height, PixelFormat::Rgba32)?;
    for (px, &c) in surface.pixels_mut().chunks_exact_mut(4).zip(&coverage.data) {
        px.copy_from_slice(&[fg.r, fg.g, fg.b, c]);
    }
    Ok(surface)
}
