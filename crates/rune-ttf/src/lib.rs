//! rune-ttf: TrueType font handles and text-to-surface rendering.
//!
//! A thin binding over a glyph rendering library (swash, behind the
//! `native` feature):
//! - [`Library`]: initialization token; fonts are opened through it
//! - [`Font`]: owned font handle with style bits, metrics and `render`
//! - [`Surface`]: caller-owned pixel surface returned by `render`
//!
//! # Example
//! ```no_run
//! use rune_ttf::{Color, Library};
//!
//! let library = Library::init()?;
//! let mut font = library.open("DejaVuSans.ttf", 16)?;
//! font.set_bold(true)?;
//! let surface = font.render("Hello", true, Color::WHITE, None)?;
//! surface.save_png("hello.png")?;
//! library.quit();
//! # Ok::<(), rune_ttf::TtfError>(())
//! ```

use std::fmt;

mod color;
mod error;
mod font;
mod library;
mod metrics;
mod native;
pub mod render;
mod style;
mod surface;
pub mod value;

pub use color::Color;
pub use error::{Result, TtfError};
pub use font::Font;
pub use library::Library;
pub use metrics::{FontMetrics, GlyphMetrics};
pub use render::{RenderMode, RenderOptions};
pub use style::FontStyle;
pub use surface::{PALETTE_SIZE, PixelFormat, Surface};
pub use value::Value;

/// Version triple of the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl Version {
    pub fn as_tuple(self) -> (u8, u8, u8) {
        (self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version of the rendering layer compiled into this build, or `0.0.0`
/// when built without the `native` feature.
pub fn version() -> Version {
    native::version()
}

/// Whether font rendering support was compiled in.
pub fn is_usable() -> bool {
    native::AVAILABLE
}
