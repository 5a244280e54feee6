use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, TtfError};
use crate::font::Font;
use crate::native::{self, NativeFace};
use crate::value::{Value, check_arity};

#[derive(Debug, Default)]
pub(crate) struct LibraryState {
    initialized: AtomicBool,
}

impl LibraryState {
    pub(crate) fn ensure_init(&self) -> Result<()> {
        if !native::AVAILABLE {
            return Err(TtfError::Unsupported);
        }
        if !self.initialized.load(Ordering::Acquire) {
            return Err(TtfError::Initialization(
                "font library is not initialized (call setup first)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initialization token for the font rendering library.
///
/// Fonts can only be opened through an initialized `Library`, and every
/// font keeps a reference back to it: after [`Library::quit`] all of its
/// fonts refuse to work until [`Library::setup`] succeeds again.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct Library {
    state: Arc<LibraryState>,
}

impl Library {
    /// A token for a library that has not been set up yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token and set it up in one step.
    pub fn init() -> Result<Self> {
        let library = Self::new();
        library.setup()?;
        Ok(library)
    }

    /// Initialize the rendering library. Calling it again after [`quit`]
    /// brings the library back.
    ///
    /// [`quit`]: Library::quit
    pub fn setup(&self) -> Result<()> {
        if !native::AVAILABLE {
            return Err(TtfError::Unsupported);
        }
        native::init()
            .map_err(|e| TtfError::Initialization(format!("could not setup TTF: {e}")))?;
        self.state.initialized.store(true, Ordering::Release);
        log::info!("font library initialized (version {})", crate::version());
        Ok(())
    }

    /// Shut the library down if it is initialized. Never fails.
    pub fn quit(&self) {
        if self.state.initialized.swap(false, Ordering::AcqRel) {
            native::quit();
            log::info!("font library shut down");
        }
    }

    /// Whether the library is currently initialized.
    pub fn was_init(&self) -> bool {
        self.state.initialized.load(Ordering::Acquire)
    }

    /// Open the first face of the font file at `path`.
    ///
    /// `point_size` is at 72 DPI, i.e. pixels per em.
    pub fn open(&self, path: impl AsRef<Path>, point_size: u32) -> Result<Font> {
        self.open_index(path, point_size, 0)
    }

    /// Open face `index` of a font file or collection.
    pub fn open_index(&self, path: impl AsRef<Path>, point_size: u32, index: usize) -> Result<Font> {
        self.state.ensure_init()?;
        let path = path.as_ref();
        let origin = path.display().to_string();
        let data = std::fs::read(path).map_err(|e| TtfError::ResourceLoad {
            origin: origin.clone(),
            message: e.to_string(),
        })?;
        self.open_data(Arc::from(data), point_size, index, origin)
    }

    /// Open a font from bytes already in memory.
    pub fn open_bytes(&self, bytes: impl Into<Arc<[u8]>>, point_size: u32) -> Result<Font> {
        self.state.ensure_init()?;
        self.open_data(bytes.into(), point_size, 0, "<memory>".to_string())
    }

    /// Positional form: `[path, point_size]`.
    pub fn open_values(&self, args: &[Value]) -> Result<Font> {
        check_arity(args, 2)?;
        let path = args[0].as_str()?;
        let size = args[1].as_int()?;
        let size = u32::try_from(size)
            .map_err(|_| TtfError::Argument(format!("invalid point size {size}")))?;
        self.open(path, size)
    }

    fn open_data(&self, data: Arc<[u8]>, point_size: u32, index: usize, origin: String) -> Result<Font> {
        if point_size == 0 {
            return Err(TtfError::Argument("point size must be positive".to_string()));
        }
        let face = NativeFace::from_bytes(data, index, point_size as f32).map_err(|message| {
            TtfError::ResourceLoad {
                origin: origin.clone(),
                message,
            }
        })?;
        log::debug!("opened font {origin} at {point_size}pt (face {index})");
        Ok(Font::new(self.state.clone(), face, point_size, origin))
    }
}
