use std::fmt;
use std::sync::Arc;

use crate::color::Color;
use crate::error::{Result, TtfError};
use crate::library::LibraryState;
use crate::metrics::{FontMetrics, GlyphMetrics};
use crate::native::NativeFace;
use crate::render::{self, RenderOptions};
use crate::style::FontStyle;
use crate::surface::Surface;
use crate::value::{Value, check_arity};

/// An open font at a fixed point size.
///
/// Owns its native face exclusively. The face is released once, either by
/// [`Font::close`] or on drop; every call after `close` fails with
/// [`TtfError::UseAfterClose`].
pub struct Font {
    library: Arc<LibraryState>,
    face: Option<NativeFace>,
    point_size: u32,
    origin: String,
}

impl Font {
    pub(crate) fn new(library: Arc<LibraryState>, face: NativeFace, point_size: u32, origin: String) -> Self {
        Self {
            library,
            face: Some(face),
            point_size,
            origin,
        }
    }

    fn face(&self) -> Result<&NativeFace> {
        let face = self.face.as_ref().ok_or(TtfError::UseAfterClose)?;
        self.library.ensure_init()?;
        Ok(face)
    }

    fn face_mut(&mut self) -> Result<&mut NativeFace> {
        let face = self.face.as_mut().ok_or(TtfError::UseAfterClose)?;
        self.library.ensure_init()?;
        Ok(face)
    }

    /// Where the font came from (file path or `<memory>`).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn point_size(&self) -> u32 {
        self.point_size
    }

    pub fn is_closed(&self) -> bool {
        self.face.is_none()
    }

    /// Release the native face now. A second call fails with `UseAfterClose`.
    pub fn close(&mut self) -> Result<()> {
        match self.face.take() {
            Some(face) => {
                drop(face);
                log::debug!("closed font {}", self.origin);
                Ok(())
            }
            None => Err(TtfError::UseAfterClose),
        }
    }

    pub fn style(&self) -> Result<FontStyle> {
        Ok(self.face()?.style())
    }

    pub fn set_style(&mut self, style: FontStyle) -> Result<()> {
        self.face_mut()?.set_style(style);
        Ok(())
    }

    fn flag(&self, flag: FontStyle) -> Result<bool> {
        Ok(self.style()?.contains(flag))
    }

    /// Set or clear `flag`, returning its previous value.
    fn replace_flag(&mut self, flag: FontStyle, enabled: bool) -> Result<bool> {
        let face = self.face_mut()?;
        let style = face.style();
        let old = style.contains(flag);
        if old != enabled {
            face.set_style(style.with(flag, enabled));
        }
        Ok(old)
    }

    pub fn bold(&self) -> Result<bool> {
        self.flag(FontStyle::BOLD)
    }

    /// Returns the previous value.
    pub fn set_bold(&mut self, enabled: bool) -> Result<bool> {
        self.replace_flag(FontStyle::BOLD, enabled)
    }

    pub fn italic(&self) -> Result<bool> {
        self.flag(FontStyle::ITALIC)
    }

    /// Returns the previous value.
    pub fn set_italic(&mut self, enabled: bool) -> Result<bool> {
        self.replace_flag(FontStyle::ITALIC, enabled)
    }

    pub fn underline(&self) -> Result<bool> {
        self.flag(FontStyle::UNDERLINE)
    }

    /// Returns the previous value.
    pub fn set_underline(&mut self, enabled: bool) -> Result<bool> {
        self.replace_flag(FontStyle::UNDERLINE, enabled)
    }

    /// All four line metrics, recomputed from the face.
    pub fn metrics(&self) -> Result<FontMetrics> {
        Ok(self.face()?.line_metrics().rounded())
    }

    /// Largest glyph height, bottom of descent to top of ascent.
    pub fn height(&self) -> Result<i32> {
        Ok(self.metrics()?.height)
    }

    /// Baseline to top of the tallest glyph.
    pub fn ascent(&self) -> Result<i32> {
        Ok(self.metrics()?.ascent)
    }

    /// Baseline to bottom of the lowest glyph; zero or negative.
    pub fn descent(&self) -> Result<i32> {
        Ok(self.metrics()?.descent)
    }

    /// Recommended distance between consecutive baselines.
    pub fn line_skip(&self) -> Result<i32> {
        Ok(self.metrics()?.line_skip)
    }

    /// `None` when the font has no glyph for `ch`.
    pub fn glyph_metrics(&self, ch: char) -> Result<Option<GlyphMetrics>> {
        Ok(self.face()?.glyph_metrics(ch))
    }

    /// Dimensions of the surface rendering `text` would produce.
    pub fn size_text(&self, text: &str) -> Result<(u32, u32)> {
        let face = self.face()?;
        if text.is_empty() {
            let height = face.line_metrics().height_px().max(0) as u32;
            return Ok((0, height));
        }
        let coverage = face.rasterize(text).map_err(TtfError::Render)?;
        Ok((coverage.width, coverage.height))
    }

    /// Render `text` with the current style.
    ///
    /// | antialias | background | result |
    /// |---|---|---|
    /// | yes | none | RGBA, transparent background |
    /// | yes | given | indexed, gradient palette, opaque |
    /// | no | none | indexed, color-keyed background |
    /// | no | given | indexed, opaque background |
    pub fn render(
        &self,
        text: &str,
        antialias: bool,
        foreground: Color,
        background: Option<Color>,
    ) -> Result<Surface> {
        self.render_with(
            text,
            &RenderOptions {
                antialias,
                foreground,
                background,
            },
        )
    }

    pub fn render_with(&self, text: &str, options: &RenderOptions) -> Result<Surface> {
        let face = self.face()?;
        let coverage = face.rasterize(text).map_err(TtfError::Render)?;
        let surface = render::compose(&coverage, options)?;
        log::debug!(
            "rendered {:?} as {:?} ({}x{})",
            text,
            options.mode(),
            surface.width(),
            surface.height()
        );
        Ok(surface)
    }

    /// Positional form: `[text, antialias, foreground, background?]`.
    ///
    /// Colors are `[r, g, b]` arrays. A `Nil` background counts as absent.
    pub fn render_values(&self, args: &[Value]) -> Result<Surface> {
        check_arity(args, 3)?;
        let text = args[0].as_str()?;
        let antialias = args[1].is_truthy();
        let foreground = args[2].as_color()?;
        let background = match args.get(3) {
            Some(v) if !v.is_nil() => Some(v.as_color()?),
            _ => None,
        };
        self.render(text, antialias, foreground, background)
    }
}

impl Drop for Font {
    fn drop(&mut self) {
        if self.face.take().is_some() {
            log::debug!("released font {} on drop", self.origin);
        }
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("origin", &self.origin)
            .field("point_size", &self.point_size)
            .field("closed", &self.is_closed())
            .finish()
    }
}
