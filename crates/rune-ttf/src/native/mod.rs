//! Boundary to the glyph rendering library.
//!
//! With the `native` feature this is swash; without it every entry point
//! reports that rendering support is missing.

#[cfg(feature = "native")]
mod face;
#[cfg(feature = "native")]
pub(crate) use face::{AVAILABLE, NativeFace, init, quit, version};

#[cfg(not(feature = "native"))]
mod unavailable;
#[cfg(not(feature = "native"))]
pub(crate) use unavailable::{AVAILABLE, NativeFace, init, quit, version};
