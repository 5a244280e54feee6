use std::sync::Arc;

use crate::Version;
use crate::metrics::{GlyphMetrics, ScaledLineMetrics};
use crate::render::Coverage;
use crate::style::FontStyle;

pub(crate) const AVAILABLE: bool = false;

const MISSING: &str = "font rendering support was not compiled in";

pub(crate) fn version() -> Version {
    Version::default()
}

pub(crate) fn init() -> Result<(), String> {
    Err(MISSING.to_string())
}

pub(crate) fn quit() {}

/// No faces can exist without a rendering library.
pub(crate) enum NativeFace {}

impl NativeFace {
    pub fn from_bytes(_data: Arc<[u8]>, _index: usize, _size: f32) -> Result<Self, String> {
        Err(MISSING.to_string())
    }

    pub fn style(&self) -> FontStyle {
        match *self {}
    }

    pub fn set_style(&mut self, _style: FontStyle) {
        match *self {}
    }

    pub fn line_metrics(&self) -> ScaledLineMetrics {
        match *self {}
    }

    pub fn glyph_metrics(&self, _ch: char) -> Option<GlyphMetrics> {
        match *self {}
    }

    pub fn rasterize(&self, _text: &str) -> Result<Coverage, String> {
        match *self {}
    }
}
