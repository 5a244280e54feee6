//! C ABI exports for embedding rune-ttf in a scripting host.
//!
//! Fonts cross the boundary as integer handles into a process-wide
//! registry; surfaces cross as owned pointers. Every call returns a
//! [`RuneTtfStatus`] and leaves the error message for
//! [`ffi::rune_ttf_last_error`].

pub mod ffi;

use std::cell::RefCell;
use std::ffi::CString;

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rune_ttf::{Font, Library, TtfError};

/// Status code returned by every exported function.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuneTtfStatus {
    Ok = 0,
    Initialization = 1,
    ResourceLoad = 2,
    Render = 3,
    Argument = 4,
    Unsupported = 5,
    UseAfterClose = 6,
}

impl From<&TtfError> for RuneTtfStatus {
    fn from(err: &TtfError) -> Self {
        match err {
            TtfError::Initialization(_) => RuneTtfStatus::Initialization,
            TtfError::ResourceLoad { .. } => RuneTtfStatus::ResourceLoad,
            TtfError::Render(_) | TtfError::Image(_) => RuneTtfStatus::Render,
            TtfError::Argument(_) => RuneTtfStatus::Argument,
            TtfError::Unsupported => RuneTtfStatus::Unsupported,
            TtfError::UseAfterClose => RuneTtfStatus::UseAfterClose,
        }
    }
}

/// Library token plus every font the host currently holds.
pub struct Registry {
    library: Library,
    fonts: HashMap<u32, Font>,
    /// Next handle to hand out, `None` once every `u32` has been used.
    /// Handles are never reused, so a stale one can't alias a newer font.
    next_handle: Option<u32>,
}

impl Registry {
    fn new() -> Self {
        Self {
            library: Library::new(),
            fonts: HashMap::new(),
            next_handle: Some(1),
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn insert(&mut self, font: Font) -> rune_ttf::Result<u32> {
        let Some(handle) = self.next_handle else {
            return Err(TtfError::ResourceLoad {
                origin: font.origin().to_string(),
                message: "no font handles left".to_string(),
            });
        };
        self.next_handle = handle.checked_add(1);
        self.fonts.insert(handle, font);
        Ok(handle)
    }

    /// Unknown and closed handles are both reported as use-after-close.
    pub fn font_mut(&mut self, handle: u32) -> rune_ttf::Result<&mut Font> {
        self.fonts.get_mut(&handle).ok_or(TtfError::UseAfterClose)
    }

    pub fn remove(&mut self, handle: u32) -> rune_ttf::Result<Font> {
        self.fonts.remove(&handle).ok_or(TtfError::UseAfterClose)
    }

    pub fn open_fonts(&self) -> usize {
        self.fonts.len()
    }
}

static REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

pub fn with_registry<F, R>(f: F) -> R
where
    F: FnOnce(&mut Registry) -> R,
{
    let mut registry = REGISTRY.lock();
    f(&mut registry)
}

/// Run `f` against the font behind `handle`.
pub fn with_font<F, R>(handle: u32, f: F) -> rune_ttf::Result<R>
where
    F: FnOnce(&mut Font) -> rune_ttf::Result<R>,
{
    with_registry(|r| f(r.font_mut(handle)?))
}

/// Record the outcome of a call for `rune_ttf_last_error` and convert it to
/// a status code.
pub(crate) fn report<T>(result: rune_ttf::Result<T>) -> (RuneTtfStatus, Option<T>) {
    match result {
        Ok(value) => {
            set_last_error(None);
            (RuneTtfStatus::Ok, Some(value))
        }
        Err(err) => {
            log::debug!("rune-ttf call failed: {err}");
            let status = RuneTtfStatus::from(&err);
            set_last_error(Some(err.to_string()));
            (status, None)
        }
    }
}

fn set_last_error(message: Option<String>) {
    // Interior NULs would truncate the message; replace them.
    let message = message.and_then(|m| CString::new(m.replace('\0', " ")).ok());
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
}

pub(crate) fn last_error_ptr() -> *const std::ffi::c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |m| m.as_ptr())
    })
}
