use thiserror::Error;

/// Result type for font binding operations.
pub type Result<T> = std::result::Result<T, TtfError>;

/// Errors surfaced by the font binding.
///
/// Native failures carry the diagnostic string reported by the rendering
/// layer. Nothing is retried.
#[derive(Error, Debug)]
pub enum TtfError {
    /// The library is not initialized, or initializing it failed.
    #[error("{0}")]
    Initialization(String),

    /// A font file could not be read or parsed.
    #[error("could not load font {origin}: {message}")]
    ResourceLoad { origin: String, message: String },

    /// The rendering layer produced no surface.
    #[error("could not render font object: {0}")]
    Render(String),

    /// Wrong number or shape of inputs.
    #[error("{0}")]
    Argument(String),

    /// Built without the `native` feature.
    #[error("font rendering support was not compiled in")]
    Unsupported,

    /// The font handle was already closed.
    #[error("font has already been closed")]
    UseAfterClose,

    /// Saving a surface failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl TtfError {
    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        TtfError::Argument(msg.into())
    }
}
