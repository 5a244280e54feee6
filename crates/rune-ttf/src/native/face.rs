use std::sync::Arc;

use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::{Angle, Format, Transform};
use swash::{CacheKey, FontRef, GlyphId};

use crate::Version;
use crate::metrics::{GlyphMetrics, ScaledLineMetrics};
use crate::render::Coverage;
use crate::style::FontStyle;
use crate::surface::{buffer_len, zeroed};

pub(crate) const AVAILABLE: bool = true;

/// Horizontal shear of synthetic italics (about 11.7 degrees).
const ITALIC_SHEAR: f32 = 0.207;

/// Outline sources in order of preference.
const SOURCES: &[Source] = &[Source::Outline, Source::Bitmap(StrikeWith::BestFit)];

/// Version of swash this build is linked against, as resolved in
/// `Cargo.lock` by the build script.
pub(crate) fn version() -> Version {
    parse_version(env!("RUNE_TTF_NATIVE_VERSION"))
}

fn parse_version(text: &str) -> Version {
    let mut parts = text.split(['.', '-', '+']).map(|s| s.parse().unwrap_or(0));
    Version {
        major: parts.next().unwrap_or(0),
        minor: parts.next().unwrap_or(0),
        patch: parts.next().unwrap_or(0),
    }
}

/// swash keeps no process-wide state; scale contexts are created per call.
pub(crate) fn init() -> Result<(), String> {
    Ok(())
}

pub(crate) fn quit() {}

/// Font face owned by a single font handle.
///
/// Holds the font file bytes and the style bits applied when rasterizing.
#[derive(Debug)]
pub(crate) struct NativeFace {
    data: Arc<[u8]>,
    /// Offset to the table directory for this face.
    offset: u32,
    key: CacheKey,
    /// Pixels per em.
    size: f32,
    style: FontStyle,
}

/// A rendered glyph positioned on the line, x relative to the pen origin.
struct PlacedGlyph {
    x: i64,
    top: i64,
    image: Image,
}

impl NativeFace {
    pub fn from_bytes(data: Arc<[u8]>, index: usize, size: f32) -> Result<Self, String> {
        let font = FontRef::from_index(&data, index)
            .ok_or_else(|| format!("no usable font face at index {index}"))?;
        if font.metrics(&[]).units_per_em == 0 {
            return Err("font has no units per em".to_string());
        }
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            offset,
            key,
            size,
            style: FontStyle::NORMAL,
        })
    }

    fn as_swash_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn set_style(&mut self, style: FontStyle) {
        self.style = style;
    }

    pub fn line_metrics(&self) -> ScaledLineMetrics {
        let m = self.as_swash_ref().metrics(&[]).scale(self.size);
        ScaledLineMetrics {
            ascent: m.ascent,
            descent: m.descent,
            line_gap: m.leading,
            underline_offset: m.underline_offset,
            underline_thickness: m.stroke_size,
        }
    }

    /// Extra advance per glyph when bold.
    fn bold_overhang(&self) -> f32 {
        if self.style.contains(FontStyle::BOLD) {
            (self.size / 10.0).floor()
        } else {
            0.0
        }
    }

    fn renderer(&self) -> Render<'static> {
        let mut render = Render::new(SOURCES);
        render.format(Format::Alpha);
        if self.style.contains(FontStyle::BOLD) {
            render.embolden((self.size / 24.0).max(0.5));
        }
        if self.style.contains(FontStyle::ITALIC) {
            let shear = Angle::from_radians(ITALIC_SHEAR.atan());
            render.transform(Some(Transform::skew(shear, Angle::from_radians(0.0))));
        }
        render
    }

    pub fn glyph_metrics(&self, ch: char) -> Option<GlyphMetrics> {
        let font = self.as_swash_ref();
        let glyph_id = font.charmap().map(ch);
        if glyph_id == 0 {
            return None;
        }
        let advance = font.glyph_metrics(&[]).scale(self.size).advance_width(glyph_id)
            + self.bold_overhang();

        let mut context = ScaleContext::new();
        let mut scaler = context.builder(font).size(self.size).hint(true).build();
        let (min_x, max_x, min_y, max_y) = match self.renderer().render(&mut scaler, glyph_id) {
            Some(img) => {
                let p = img.placement;
                (p.left, p.left + p.width as i32, p.top - p.height as i32, p.top)
            }
            None => (0, 0, 0, 0),
        };
        Some(GlyphMetrics {
            min_x,
            max_x,
            min_y,
            max_y,
            advance: advance.round() as i32,
        })
    }

    /// Rasterize one line of text into a coverage buffer whose height is the
    /// font height and whose baseline sits at the rounded ascent.
    ///
    /// Lines whose surface would exceed the surface size limit fail with
    /// "Out of memory" before any glyph is rasterized.
    pub fn rasterize(&self, text: &str) -> Result<Coverage, String> {
        if text.is_empty() {
            return Err("Text has zero width".to_string());
        }

        let font = self.as_swash_ref();
        let charmap = font.charmap();
        let advances = font.glyph_metrics(&[]).scale(self.size);
        let overhang = f64::from(self.bold_overhang());

        let line = self.line_metrics();
        let ascent = i64::from(line.ascent_px());
        let height = i64::from(line.height_px().max(1));

        let mut pen = 0.0f64;
        let mut origins = Vec::new();
        for ch in text.chars() {
            let glyph_id: GlyphId = charmap.map(ch);
            origins.push((glyph_id, pen.round() as i64));
            pen += f64::from(advances.advance_width(glyph_id)) + overhang;
        }
        let advance = pen.ceil() as i64;
        buffer_len(advance.max(1) as u64, height as u64, 4)?;

        let render = self.renderer();
        let mut context = ScaleContext::new();
        let mut scaler = context.builder(font).size(self.size).hint(true).build();

        let mut placed = Vec::new();
        let (mut min_x, mut max_x) = (0i64, advance);
        for (glyph_id, origin) in origins {
            let Some(image) = render.render(&mut scaler, glyph_id) else {
                continue;
            };
            let p = image.placement;
            if p.width == 0 || p.height == 0 {
                continue;
            }
            let x = origin + i64::from(p.left);
            min_x = min_x.min(x);
            max_x = max_x.max(x + i64::from(p.width));
            placed.push(PlacedGlyph {
                x,
                top: i64::from(p.top),
                image,
            });
        }

        let width = (max_x - min_x).max(1);
        // RGBA is the widest surface this coverage can become.
        buffer_len(width as u64, height as u64, 4)?;
        let mut data = zeroed(buffer_len(width as u64, height as u64, 1)?)?;
        let stride = width as usize;

        for glyph in &placed {
            let gw = glyph.image.placement.width as i64;
            let gh = glyph.image.placement.height as i64;
            let alpha = glyph_alpha(&glyph.image);
            let left = glyph.x - min_x;
            let top = ascent - glyph.top;
            for row in 0..gh {
                let y = top + row;
                if y < 0 || y >= height {
                    continue;
                }
                let src_row = &alpha[(row * gw) as usize..((row + 1) * gw) as usize];
                for (col, &src) in src_row.iter().enumerate() {
                    let x = left + col as i64;
                    if x < 0 || x >= width {
                        continue;
                    }
                    let dst = &mut data[y as usize * stride + x as usize];
                    *dst = (*dst).max(src);
                }
            }
        }

        if self.style.contains(FontStyle::UNDERLINE) {
            let (row, thickness) = line.underline_rows(height as i32);
            for y in row..row.saturating_add(thickness).min(height as i32) {
                let start = y as usize * stride;
                data[start..start + stride].fill(255);
            }
        }

        log::trace!(
            "rasterized {} glyphs into {}x{} coverage",
            placed.len(),
            width,
            height
        );
        Ok(Coverage {
            width: width as u32,
            height: height as u32,
            data,
        })
    }
}

/// Single-channel coverage of a rendered glyph.
fn glyph_alpha(image: &Image) -> Vec<u8> {
    match image.content {
        Content::Mask => image.data.clone(),
        // Derive coverage from the alpha channel.
        Content::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
        Content::SubpixelMask => image
            .data
            .chunks_exact(4)
            .map(|px| px[0].max(px[1]).max(px[2]))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_locked_swash_release() {
        let v = version();
        assert_eq!(v.to_string(), env!("RUNE_TTF_NATIVE_VERSION"));
        assert_eq!((v.major, v.minor), (0, 1));
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("0.1.19").as_tuple(), (0, 1, 19));
        assert_eq!(parse_version("1.2.3-beta.1").as_tuple(), (1, 2, 3));
        assert_eq!(parse_version("2").as_tuple(), (2, 0, 0));
    }
}
