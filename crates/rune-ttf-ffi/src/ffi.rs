//! Exported C symbols.
//!
//! Out-pointers may be null, in which case the value is dropped. Handles
//! are `u32`; `0` is never a valid handle.

use std::ffi::{CStr, c_char};

use rune_ttf::{Color, Surface, TtfError};

use crate::{RuneTtfStatus, last_error_ptr, report, with_font, with_registry};

/// RGB color as passed by the host.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RuneTtfColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<RuneTtfColor> for Color {
    fn from(c: RuneTtfColor) -> Self {
        Color::rgb(c.r, c.g, c.b)
    }
}

unsafe fn write_out<T>(out: *mut T, value: T) {
    if !out.is_null() {
        unsafe { out.write(value) };
    }
}

unsafe fn read_str<'a>(ptr: *const c_char, what: &str) -> rune_ttf::Result<&'a str> {
    if ptr.is_null() {
        return Err(TtfError::Argument(format!("{what} must not be null")));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| TtfError::Argument(format!("{what} is not valid UTF-8")))
}

/// Report the compiled-in rendering layer version; all zero when font
/// support is not built in.
///
/// # Safety
/// Each out-pointer must be null or valid for a `u8` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rune_ttf_version(major: *mut u8, minor: *mut u8, patch: *mut u8) {
    let v = rune_ttf::version();
    unsafe {
        write_out(major, v.major);
        write_out(minor, v.minor);
        write_out(patch, v.patch);
    }
}

/// Whether font support was compiled in.
#[unsafe(no_mangle)]
pub extern "C" fn rune_ttf_usable() -> bool {
    rune_ttf::is_usable()
}

/// Initialize the font library. Also installs the logger on first use.
#[unsafe(no_mangle)]
pub extern "C" fn rune_ttf_setup() -> RuneTtfStatus {
    let _ = env_logger::try_init();
    let (status, _) = report(with_registry(|r| r.library().setup()));
    status
}

/// Shut the library down if it is up. Open handles stay registered but
/// fail until the next successful setup.
#[unsafe(no_mangle)]
pub extern "C" fn rune_ttf_quit() {
    with_registry(|r| r.library().quit());
}

#[unsafe(no_mangle)]
pub extern "C" fn rune_ttf_was_init() -> bool {
    with_registry(|r| r.library().was_init())
}

/// Open a font file at `point_size` and store its handle in `out_handle`.
///
/// # Safety
/// `path` must be null or a NUL-terminated string; `out_handle` must be null
/// or valid for a `u32` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rune_ttf_open(
    path: *const c_char,
    point_size: i32,
    out_handle: *mut u32,
) -> RuneTtfStatus {
    let result = unsafe { read_str(path, "path") }.and_then(|path| {
        let size = u32::try_from(point_size)
            .map_err(|_| TtfError::Argument(format!("invalid point size {point_size}")))?;
        with_registry(|r| {
            let font = r.library().open(path, size)?;
            r.insert(font)
        })
    });
    let (status, handle) = report(result);
    unsafe { write_out(out_handle, handle.unwrap_or(0)) };
    status
}

/// Release the font behind `handle`. Later calls with it fail with
/// `UseAfterClose`.
#[unsafe(no_mangle)]
pub extern "C" fn rune_ttf_close(handle: u32) -> RuneTtfStatus {
    let result = with_registry(|r| r.remove(handle)).and_then(|mut font| font.close());
    report(result).0
}

macro_rules! style_accessors {
    ($($get:ident, $set:ident => $getter:ident, $setter:ident;)*) => {$(
        /// Read a style bit.
        ///
        /// # Safety
        /// `out` must be null or valid for a `bool` write.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $get(handle: u32, out: *mut bool) -> RuneTtfStatus {
            let (status, value) = report(with_font(handle, |f| f.$getter()));
            if let Some(value) = value {
                unsafe { write_out(out, value) };
            }
            status
        }

        /// Set a style bit; the previous value goes to `out_old`.
        ///
        /// # Safety
        /// `out_old` must be null or valid for a `bool` write.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $set(handle: u32, enabled: bool, out_old: *mut bool) -> RuneTtfStatus {
            let (status, old) = report(with_font(handle, |f| f.$setter(enabled)));
            if let Some(old) = old {
                unsafe { write_out(out_old, old) };
            }
            status
        }
    )*};
}

style_accessors! {
    rune_ttf_get_bold, rune_ttf_set_bold => bold, set_bold;
    rune_ttf_get_italic, rune_ttf_set_italic => italic, set_italic;
    rune_ttf_get_underline, rune_ttf_set_underline => underline, set_underline;
}

macro_rules! metric_accessors {
    ($($name:ident => $method:ident;)*) => {$(
        /// Read a font metric in pixels.
        ///
        /// # Safety
        /// `out` must be null or valid for an `i32` write.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(handle: u32, out: *mut i32) -> RuneTtfStatus {
            let (status, value) = report(with_font(handle, |f| f.$method()));
            if let Some(value) = value {
                unsafe { write_out(out, value) };
            }
            status
        }
    )*};
}

metric_accessors! {
    rune_ttf_height => height;
    rune_ttf_ascent => ascent;
    rune_ttf_descent => descent;
    rune_ttf_line_skip => line_skip;
}

/// Render `text` and hand the new surface to the caller via `out_surface`.
///
/// `text` and `foreground` are required; a null for either is reported as
/// `Argument`. A null `background` leaves it transparent.
///
/// # Safety
/// Non-null pointers must be valid: `text` NUL-terminated, colors readable,
/// `out_surface` writable. The surface must be released with
/// [`rune_ttf_surface_free`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rune_ttf_render(
    handle: u32,
    text: *const c_char,
    antialias: bool,
    foreground: *const RuneTtfColor,
    background: *const RuneTtfColor,
    out_surface: *mut *mut Surface,
) -> RuneTtfStatus {
    let result = (|| {
        if text.is_null() || foreground.is_null() {
            let given = 1 + usize::from(!text.is_null()) + usize::from(!foreground.is_null());
            return Err(TtfError::Argument(format!(
                "wrong number of arguments ({given} for 3)"
            )));
        }
        let text = unsafe { read_str(text, "text") }?;
        let fg = Color::from(unsafe { *foreground });
        let bg = (!background.is_null()).then(|| Color::from(unsafe { *background }));
        with_font(handle, |f| f.render(text, antialias, fg, bg))
    })();
    let (status, surface) = report(result);
    let ptr = surface.map_or(std::ptr::null_mut(), |s| Box::into_raw(Box::new(s)));
    unsafe { write_out(out_surface, ptr) };
    status
}

/// # Safety
/// `surface` must be null or a live pointer from `rune_ttf_render`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rune_ttf_surface_width(surface: *const Surface) -> u32 {
    unsafe { surface.as_ref() }.map_or(0, Surface::width)
}

/// # Safety
/// `surface` must be null or a live pointer from `rune_ttf_render`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rune_ttf_surface_height(surface: *const Surface) -> u32 {
    unsafe { surface.as_ref() }.map_or(0, Surface::height)
}

/// # Safety
/// `surface` must be null or a live pointer from `rune_ttf_render`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rune_ttf_surface_has_color_key(surface: *const Surface) -> bool {
    unsafe { surface.as_ref() }.is_some_and(|s| s.color_key().is_some())
}

/// Copy the surface as straight RGBA (`width * height * 4` bytes) into `buf`.
///
/// # Safety
/// `surface` must be a live pointer from `rune_ttf_render`; `buf` must be
/// valid for `len` byte writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rune_ttf_surface_pixels(
    surface: *const Surface,
    buf: *mut u8,
    len: usize,
) -> RuneTtfStatus {
    let result = (|| {
        let surface = unsafe { surface.as_ref() }
            .ok_or_else(|| TtfError::Argument("surface must not be null".to_string()))?;
        let rgba = surface.to_rgba_image().into_raw();
        if buf.is_null() || len < rgba.len() {
            return Err(TtfError::Argument(format!(
                "pixel buffer needs {} bytes",
                rgba.len()
            )));
        }
        unsafe { std::ptr::copy_nonoverlapping(rgba.as_ptr(), buf, rgba.len()) };
        Ok(())
    })();
    report(result).0
}

/// Release a surface returned by `rune_ttf_render`. Null is ignored.
///
/// # Safety
/// `surface` must be null or a pointer from `rune_ttf_render` not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rune_ttf_surface_free(surface: *mut Surface) {
    if !surface.is_null() {
        drop(unsafe { Box::from_raw(surface) });
    }
}

/// Message of the last failed call on this thread, or null after a
/// successful one. Valid until the next call into this library.
#[unsafe(no_mangle)]
pub extern "C" fn rune_ttf_last_error() -> *const c_char {
    last_error_ptr()
}
